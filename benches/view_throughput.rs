use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use booklog::{
    book::Book,
    types::{Category, ReadingStatus},
    view::page::{CategoryFilter, StatusFilter, ViewState, filter_books},
};

fn shelf_of(n: usize) -> Vec<Book> {
    (0..n)
        .map(|i| Book {
            id: format!("b{i:06}"),
            title: format!("Title {i}"),
            author: "Unknown Author".to_string(),
            category: Category::ALL[i % Category::ALL.len()],
            status: ReadingStatus::ALL[i % ReadingStatus::ALL.len()],
            rating: (i % 6) as u8,
            review: None,
            progress: (i % 101) as u8,
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let books = shelf_of(50_000);
    c.bench_function("filter_50k_both_predicates", |b| {
        b.iter(|| {
            filter_books(
                &books,
                StatusFilter::Only(ReadingStatus::Finished),
                CategoryFilter::Only(Category::Fiction),
            )
            .len()
        });
    });
}

fn bench_page_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_view");
    for size in [1_000usize, 10_000, 50_000] {
        let books = shelf_of(size);
        let mut view = ViewState::default();
        view.set_status(StatusFilter::Only(ReadingStatus::CurrentlyReading));
        view.set_page(size / 30);

        group.bench_with_input(BenchmarkId::from_parameter(size), &books, |b, books| {
            b.iter(|| view.page_view(books).items.len());
        });
    }
    group.finish();
}

fn bench_unfiltered_last_page(c: &mut Criterion) {
    let books = shelf_of(50_000);
    let mut view = ViewState::default();
    view.set_page(usize::MAX);

    c.bench_function("page_view_50k_clamped_last_page", |b| {
        b.iter(|| view.page_view(&books).page);
    });
}

criterion_group!(benches, bench_filter, bench_page_view, bench_unfiltered_last_page);
criterion_main!(benches);
