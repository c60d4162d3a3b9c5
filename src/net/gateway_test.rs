use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;
use crate::net::http::TransportError;
use crate::net::testing::ScriptedTransport;
use crate::net::types::{Credential, User};
use crate::state::persistence::{KeyValueStore, MemoryStore, TOKEN_KEY};
use crate::util::navigation::MemoryNavigator;

struct Harness {
    transport: ScriptedTransport,
    store: MemoryStore,
    navigator: MemoryNavigator,
    held: Rc<RefCell<Option<Credential>>>,
    invalidations: Rc<Cell<u32>>,
    gateway: Gateway<ScriptedTransport>,
}

fn harness(path: &str) -> Harness {
    let transport = ScriptedTransport::new();
    let store = MemoryStore::new();
    let navigator = MemoryNavigator::at(path);
    let held: Rc<RefCell<Option<Credential>>> = Rc::new(RefCell::new(None));
    let invalidations = Rc::new(Cell::new(0));
    let source = held.clone();
    let dropped = held.clone();
    let counter = invalidations.clone();
    let gateway = Gateway::new(
        transport.clone(),
        &ClientConfig::new("http://api.test/api"),
        Persistence::new(Rc::new(store.clone())),
        Rc::new(navigator.clone()),
        Box::new(move || source.borrow().clone()),
        Box::new(move || {
            dropped.replace(None);
            counter.set(counter.get() + 1);
        }),
    );
    Harness { transport, store, navigator, held, invalidations, gateway }
}

fn sign_in(h: &Harness) {
    let user = User {
        id: "u1".to_owned(),
        email: "a@b.com".to_owned(),
        username: "alice".to_owned(),
        created_at: "2024-01-01T00:00:00Z".to_owned(),
    };
    let credential = Credential::new("tok1").unwrap();
    Persistence::new(Rc::new(h.store.clone())).save(&credential, &user);
    h.held.replace(Some(credential));
}

// =============================================================
// Request policy
// =============================================================

#[test]
fn attaches_held_credential_as_bearer() {
    let h = harness("/decks");
    sign_in(&h);
    h.transport.reply(200, "{}");

    block_on(h.gateway.send(HttpRequest::get("/decks"))).unwrap();

    let sent = h.transport.last();
    assert_eq!(sent.url, "http://api.test/api/decks");
    assert_eq!(sent.request.header_value(AUTHORIZATION), Some("Bearer tok1"));
    assert_eq!(sent.request.header_value(ACCEPT), Some(APPLICATION_JSON));
}

#[test]
fn credential_comes_from_the_session_not_storage() {
    let h = harness("/decks");
    h.held.replace(Credential::new("in-memory"));
    h.store.set(TOKEN_KEY, "stale").unwrap();
    h.transport.reply(200, "{}").reply(200, "{}");

    block_on(h.gateway.send(HttpRequest::get("/decks"))).unwrap();
    assert_eq!(h.transport.last().request.header_value(AUTHORIZATION), Some("Bearer in-memory"));

    h.held.replace(None);
    block_on(h.gateway.send(HttpRequest::get("/decks"))).unwrap();
    assert!(!h.transport.last().request.has_header(AUTHORIZATION));
}

#[test]
fn leaves_request_anonymous_without_credential() {
    let h = harness("/login");
    h.transport.reply(200, "{}");

    block_on(h.gateway.send(HttpRequest::get("/decks"))).unwrap();

    assert!(!h.transport.last().request.has_header(AUTHORIZATION));
}

#[test]
fn does_not_override_caller_authorization_header() {
    let h = harness("/decks");
    sign_in(&h);
    h.transport.reply(200, "{}");

    let request = HttpRequest::get("/decks").header("authorization", "Bearer other");
    block_on(h.gateway.send(request)).unwrap();

    let sent = h.transport.last().request;
    let auth_headers: Vec<_> = sent.headers.iter().filter(|(k, _)| k.eq_ignore_ascii_case(AUTHORIZATION)).collect();
    assert_eq!(auth_headers.len(), 1);
    assert_eq!(sent.header_value(AUTHORIZATION), Some("Bearer other"));
}

// =============================================================
// Response policy
// =============================================================

#[test]
fn unauthorized_off_public_page_clears_storage_and_redirects() {
    let h = harness("/decks");
    sign_in(&h);
    h.transport.reply(401, r#"{"message":"Token expired"}"#);

    let err = block_on(h.gateway.send(HttpRequest::get("/decks"))).unwrap_err();

    assert!(err.is_unauthorized());
    assert!(h.store.is_empty());
    assert!(h.held.borrow().is_none());
    assert_eq!(h.invalidations.get(), 1);
    assert_eq!(h.navigator.visits(), vec![SIGN_IN_PATH.to_owned()]);
}

#[test]
fn unauthorized_on_login_page_does_not_redirect() {
    let h = harness("/login");
    h.transport.reply(401, r#"{"message":"Invalid credentials"}"#);

    let err = block_on(h.gateway.send(HttpRequest::post("/auth/login"))).unwrap_err();

    assert!(err.is_unauthorized());
    assert!(h.navigator.visits().is_empty());
    assert_eq!(h.navigator.current_path(), "/login");
}

#[test]
fn unauthorized_on_register_page_does_not_redirect() {
    let h = harness("/register");
    h.transport.reply(401, "");

    let _ = block_on(h.gateway.send(HttpRequest::post("/auth/register")));

    assert!(h.navigator.visits().is_empty());
}

#[test]
fn unauthorized_body_is_still_returned_to_caller() {
    let h = harness("/login");
    h.transport.reply(401, r#"{"message":"Invalid credentials"}"#);

    match block_on(h.gateway.send(HttpRequest::post("/auth/login"))) {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid credentials"));
        }
        other => panic!("expected 401 status error, got {other:?}"),
    }
}

#[test]
fn other_failures_pass_through_without_teardown() {
    let h = harness("/decks");
    sign_in(&h);
    h.transport.reply(403, "").reply(404, "").reply(500, "");

    for expected in [403, 404, 500] {
        let err = block_on(h.gateway.send(HttpRequest::get("/decks/d1"))).unwrap_err();
        assert_eq!(err.status(), Some(expected));
    }

    assert_eq!(h.store.get(TOKEN_KEY).as_deref(), Some("tok1"));
    assert_eq!(h.invalidations.get(), 0);
    assert!(h.navigator.visits().is_empty());
}

#[test]
fn transport_errors_propagate_without_teardown() {
    let h = harness("/decks");
    sign_in(&h);
    h.transport.fail(TransportError::Timeout(10_000));

    let err = block_on(h.gateway.send(HttpRequest::get("/decks"))).unwrap_err();

    assert!(matches!(err, ApiError::Transport(TransportError::Timeout(10_000))));
    assert_eq!(h.invalidations.get(), 0);
}

// =============================================================
// JSON helpers
// =============================================================

#[test]
fn get_json_decodes_body() {
    let h = harness("/decks");
    h.transport.reply(200, r#"{"id":"u1","email":"a@b.com","username":"alice","createdAt":"2024-01-01T00:00:00Z"}"#);

    let user: User = block_on(h.gateway.get_json("/users/me")).unwrap();

    assert_eq!(user.username, "alice");
}

#[test]
fn get_json_reports_unexpected_body_as_decode_error() {
    let h = harness("/decks");
    h.transport.reply(200, "not json");

    let err = block_on(h.gateway.get_json::<User>("/users/me")).unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn post_json_sends_encoded_body() {
    let h = harness("/login");
    h.transport.reply(200, "{}");

    let _: serde_json::Value = block_on(h.gateway.post_json("/auth/login", &serde_json::json!({ "email": "a@b.com" }))).unwrap();

    let sent = h.transport.last().request;
    assert_eq!(sent.method, crate::net::http::Method::Post);
    assert_eq!(sent.body.as_deref(), Some(r#"{"email":"a@b.com"}"#));
}

#[test]
fn delete_ignores_empty_success_body() {
    let h = harness("/decks");
    h.transport.reply(204, "");

    block_on(h.gateway.delete("/decks/d1")).unwrap();

    assert_eq!(h.transport.last().request.method, crate::net::http::Method::Delete);
}

#[test]
fn public_paths_are_exact_matches() {
    assert!(is_public_path("/login"));
    assert!(is_public_path("/register"));
    assert!(!is_public_path("/decks"));
    assert!(!is_public_path("/login/help"));
}
