use std::sync::Mutex;

use booklog::{
    backend::memory::MemoryBackend,
    routes::{Route, resolve},
    runtime::handle::{BookLogHandle, RuntimeConfig, spawn_booklog},
    session::{DEFAULT_TOKEN_TEMPLATE, IdentityProvider, SessionBridge},
    types::UserId,
};

struct FakeProvider {
    loaded: bool,
    signed_in: bool,
    user_id: Option<UserId>,
    token: Option<String>,
    requested_templates: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn signed_in(user: &str) -> Self {
        Self {
            loaded: true,
            signed_in: true,
            user_id: Some(user.to_string()),
            token: Some(format!("{user}:nonce")),
            requested_templates: Mutex::new(Vec::new()),
        }
    }

    fn signed_out() -> Self {
        Self {
            loaded: true,
            signed_in: false,
            user_id: None,
            token: None,
            requested_templates: Mutex::new(Vec::new()),
        }
    }
}

impl IdentityProvider for FakeProvider {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    fn user_id(&self) -> Option<UserId> {
        self.user_id.clone()
    }

    fn get_token(&self, template: &str) -> Option<String> {
        self.requested_templates
            .lock()
            .expect("lock")
            .push(template.to_string());
        self.token.clone()
    }
}

fn spawn_memory() -> BookLogHandle {
    spawn_booklog(Box::new(MemoryBackend::new()), RuntimeConfig::default())
}

#[tokio::test]
async fn bridge_exchanges_the_provider_session_for_an_owner() {
    let handle = spawn_memory();
    let provider = FakeProvider::signed_in("alice");
    let bridge = SessionBridge::new();

    let owner = bridge.sync(&provider, &handle).await.expect("sync");
    assert_eq!(owner.as_deref(), Some("alice"));
    assert_eq!(handle.owner().await.expect("owner").as_deref(), Some("alice"));
    assert_eq!(
        provider.requested_templates.lock().expect("lock").as_slice(),
        [DEFAULT_TOKEN_TEMPLATE.to_string()]
    );

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn bridge_is_idempotent_for_an_active_session() {
    let handle = spawn_memory();
    let provider = FakeProvider::signed_in("alice");
    let bridge = SessionBridge::new();

    bridge.sync(&provider, &handle).await.expect("first sync");
    let owner = bridge.sync(&provider, &handle).await.expect("second sync");
    assert_eq!(owner.as_deref(), Some("alice"));

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn unloaded_provider_leaves_the_session_untouched() {
    let handle = spawn_memory();
    handle.sign_in("alice:t1").await.expect("sign in");

    let provider = FakeProvider {
        loaded: false,
        ..FakeProvider::signed_out()
    };
    let owner = SessionBridge::new()
        .sync(&provider, &handle)
        .await
        .expect("sync");
    assert_eq!(owner.as_deref(), Some("alice"));

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn signed_out_provider_clears_the_bridged_credential() {
    let handle = spawn_memory();
    handle.sign_in("alice:t1").await.expect("sign in");

    let owner = SessionBridge::new()
        .sync(&FakeProvider::signed_out(), &handle)
        .await
        .expect("sync");
    assert_eq!(owner, None);
    assert_eq!(handle.owner().await.expect("owner"), None);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn missing_token_degrades_to_unauthenticated() {
    let handle = spawn_memory();
    handle.sign_in("alice:t1").await.expect("sign in");

    let provider = FakeProvider {
        token: None,
        ..FakeProvider::signed_in("alice")
    };
    let owner = SessionBridge::new()
        .sync(&provider, &handle)
        .await
        .expect("sync");
    assert_eq!(owner, None);
    assert_eq!(handle.owner().await.expect("owner"), None);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn custom_templates_reach_the_provider() {
    let handle = spawn_memory();
    let provider = FakeProvider::signed_in("alice");
    let bridge = SessionBridge::with_template("integration_test");

    bridge.sync(&provider, &handle).await.expect("sync");
    assert_eq!(
        provider.requested_templates.lock().expect("lock").as_slice(),
        ["integration_test".to_string()]
    );

    handle.shutdown().await.expect("shutdown");
}

#[test]
fn known_paths_resolve_while_signed_in() {
    assert_eq!(resolve("/", true), Route::Home);
    assert_eq!(resolve("", true), Route::Home);
    assert_eq!(resolve("/mybooks", true), Route::MyList);
    assert_eq!(resolve("/addbook", true), Route::AddRecord);
    assert_eq!(
        resolve("/bookdetail/b42", true),
        Route::RecordDetail("b42".to_string())
    );
    assert_eq!(resolve("/mybooks/", true), Route::MyList);
}

#[test]
fn record_mutating_destinations_redirect_home_when_signed_out() {
    assert_eq!(resolve("/mybooks", false), Route::Home);
    assert_eq!(resolve("/addbook", false), Route::Home);
    assert_eq!(resolve("/bookdetail/b42", false), Route::Home);
    assert_eq!(resolve("/", false), Route::Home);
}

#[test]
fn unknown_and_malformed_paths_fall_through() {
    assert_eq!(resolve("/nope", true), Route::NotFound);
    assert_eq!(resolve("/bookdetail/", true), Route::NotFound);
    assert_eq!(resolve("/bookdetail/a/b", true), Route::NotFound);
    assert_eq!(resolve("/sign-in", true), Route::Home);
    assert_eq!(resolve("/sign-up/continue", false), Route::Home);
}
