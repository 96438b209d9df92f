use booklog::{
    book::{Book, BookFields},
    types::{Category, ReadingStatus},
    view::{
        edit::EditSession,
        page::{CategoryFilter, StatusFilter, ViewState, filter_books},
    },
};

fn book(id: &str, status: ReadingStatus, category: Category) -> Book {
    Book {
        id: id.to_string(),
        title: format!("Title {id}"),
        author: "Unknown Author".to_string(),
        category,
        status,
        rating: 0,
        review: None,
        progress: 0,
    }
}

fn shelf_of(n: usize) -> Vec<Book> {
    (0..n)
        .map(|i| book(&format!("b{i}"), ReadingStatus::WantToRead, Category::Fiction))
        .collect()
}

#[test]
fn twenty_five_books_page_three_shows_five_and_page_four_clamps() {
    let books = shelf_of(25);
    let mut view = ViewState::default();

    view.set_page(3);
    let page = view.page_view(&books);
    assert_eq!(page.page, 3);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items[0].id, "b20");

    view.set_page(4);
    let page = view.page_view(&books);
    assert_eq!(page.page, 3);
    assert_eq!(page.items.len(), 5);
}

#[test]
fn empty_collection_yields_zero_pages_without_panicking() {
    let mut view = ViewState::default();
    view.set_page(7);
    let page = view.page_view(&[]);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_count, 0);
    assert_eq!(page.filtered, 0);
    assert!(page.items.is_empty());
}

#[test]
fn exact_multiple_fills_the_last_page() {
    let books = shelf_of(20);
    let mut view = ViewState::default();
    view.set_page(2);
    let page = view.page_view(&books);
    assert_eq!(page.page_count, 2);
    assert_eq!(page.items.len(), 10);
}

#[test]
fn changing_either_filter_resets_to_page_one() {
    let books = shelf_of(25);
    let mut view = ViewState::default();
    view.set_page(3);
    assert_eq!(view.page_view(&books).page, 3);

    view.set_status(StatusFilter::Only(ReadingStatus::WantToRead));
    assert_eq!(view.page(), 1);

    view.set_page(2);
    view.set_category(CategoryFilter::Only(Category::Fiction));
    assert_eq!(view.page(), 1);
}

#[test]
fn filters_combine_with_logical_and() {
    let books = vec![
        book("a", ReadingStatus::Finished, Category::Fiction),
        book("b", ReadingStatus::Finished, Category::Science),
        book("c", ReadingStatus::WantToRead, Category::Fiction),
        book("d", ReadingStatus::WantToRead, Category::Science),
    ];

    let both = filter_books(
        &books,
        StatusFilter::Only(ReadingStatus::Finished),
        CategoryFilter::Only(Category::Fiction),
    );
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, "a");

    let status_only = filter_books(
        &books,
        StatusFilter::Only(ReadingStatus::Finished),
        CategoryFilter::All,
    );
    assert_eq!(status_only.len(), 2);

    let category_only = filter_books(
        &books,
        StatusFilter::All,
        CategoryFilter::Only(Category::Fiction),
    );
    assert_eq!(category_only.len(), 2);
}

#[test]
fn clear_filters_restores_the_full_collection() {
    let books = vec![
        book("a", ReadingStatus::Finished, Category::Fiction),
        book("b", ReadingStatus::WantToRead, Category::Science),
    ];
    let mut view = ViewState::default();
    view.set_status(StatusFilter::Only(ReadingStatus::Finished));
    assert_eq!(view.page_view(&books).filtered, 1);

    view.clear_filters();
    assert_eq!(view.page_view(&books).filtered, 2);
}

#[test]
fn filter_wire_values_round_trip() {
    assert_eq!(StatusFilter::parse("allbooks"), Some(StatusFilter::All));
    assert_eq!(
        StatusFilter::parse("currentlyreading"),
        Some(StatusFilter::Only(ReadingStatus::CurrentlyReading))
    );
    assert_eq!(StatusFilter::parse("reading"), None);

    assert_eq!(
        CategoryFilter::parse("allcategories"),
        Some(CategoryFilter::All)
    );
    assert_eq!(
        CategoryFilter::parse("Non Fiction"),
        Some(CategoryFilter::Only(Category::NonFiction))
    );
    assert_eq!(CategoryFilter::parse("Cooking"), None);
}

#[test]
fn edit_session_walks_idle_editing_saving_idle() {
    let mut session = EditSession::default();
    assert!(session.is_idle());

    let original = book("b1", ReadingStatus::CurrentlyReading, Category::Fiction);
    assert!(session.begin(original.clone()));
    assert_eq!(session.editing().map(|b| b.id.as_str()), Some("b1"));

    let saved = session.save().expect("working copy");
    assert_eq!(saved.id, "b1");
    assert_eq!(session, EditSession::Saving("b1".to_string()));

    // A second form cannot open while the save is in flight.
    assert!(!session.begin(original));
    assert!(session.save().is_none());

    session.settle();
    assert!(session.is_idle());
}

#[test]
fn edit_session_cancel_discards_the_working_copy() {
    let mut session = EditSession::default();
    session.begin(book("b1", ReadingStatus::WantToRead, Category::Poetry));
    session.cancel();
    assert!(session.is_idle());
    assert!(session.save().is_none());
}

#[test]
fn edit_session_change_applies_the_finished_transition() {
    let mut session = EditSession::default();
    session.begin(book("b1", ReadingStatus::CurrentlyReading, Category::Fiction));

    let fields = BookFields {
        title: "Title b1".to_string(),
        author: "Unknown Author".to_string(),
        category: Category::Fiction,
        status: ReadingStatus::CurrentlyReading,
        rating: 9,
        review: None,
        progress: 100,
    };
    let copy = session.change(fields).expect("editing");
    assert_eq!(copy.status, ReadingStatus::Finished);
    assert_eq!(copy.rating, 5);

    // Outside Editing the change is a no-op.
    session.save();
    assert!(
        session
            .change(BookFields {
                title: "x".to_string(),
                author: "y".to_string(),
                category: Category::Fiction,
                status: ReadingStatus::WantToRead,
                rating: 0,
                review: None,
                progress: 0,
            })
            .is_none()
    );
}
