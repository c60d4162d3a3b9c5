use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::config::ClientConfig;
use crate::net::http::Method;
use crate::net::testing::ScriptedTransport;
use crate::state::persistence::{MemoryStore, Persistence};
use crate::util::navigation::MemoryNavigator;

const DECK_JSON: &str = r#"{
    "id": "d1", "title": "Verbs", "description": "Irregular verbs", "tags": ["es", "verbs"],
    "isPublic": false, "cardCount": 3,
    "owner": {"id": "u1", "username": "alice"},
    "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-02T00:00:00Z"
}"#;

fn gateway(transport: &ScriptedTransport) -> Gateway<ScriptedTransport> {
    Gateway::new(
        transport.clone(),
        &ClientConfig::new("http://api.test/api"),
        Persistence::new(Rc::new(MemoryStore::new())),
        Rc::new(MemoryNavigator::at("/decks")),
        Box::new(|| None),
        Box::new(|| {}),
    )
}

// =============================================================
// DeckFilters
// =============================================================

#[test]
fn empty_filters_produce_no_query() {
    assert!(DeckFilters::default().query_pairs().is_empty());
}

#[test]
fn filters_encode_in_documented_order() {
    let filters = DeckFilters {
        page: Some(2),
        size: Some(12),
        search: Some("verbs".to_owned()),
        tags: vec!["es".to_owned(), "grammar".to_owned()],
        only_public: Some(true),
    };
    let keys: Vec<_> = filters.query_pairs().into_iter().map(|(k, v)| format!("{k}={v}")).collect();
    assert_eq!(keys, vec!["page=2", "size=12", "search=verbs", "tags=es,grammar", "onlyPublic=true"]);
}

#[test]
fn empty_search_is_omitted() {
    let filters = DeckFilters { search: Some(String::new()), ..DeckFilters::default() };
    assert!(filters.query_pairs().is_empty());
}

// =============================================================
// Calls
// =============================================================

#[test]
fn list_decks_sends_filters_as_query() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &format!(r#"{{"content":[{DECK_JSON}],"page":0,"size":12,"totalElements":1,"totalPages":1}}"#));
    let filters = DeckFilters { page: Some(0), size: Some(12), search: Some("irregular verbs".to_owned()), ..DeckFilters::default() };

    let page = block_on(list_decks(&gateway(&transport), &filters)).unwrap();

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].tags, vec!["es", "verbs"]);
    assert_eq!(transport.last().url, "http://api.test/api/decks?page=0&size=12&search=irregular%20verbs");
}

#[test]
fn create_deck_posts_payload() {
    let transport = ScriptedTransport::new();
    transport.reply(201, DECK_JSON);
    let data = DeckRequest { title: "Verbs".to_owned(), is_public: Some(false), ..DeckRequest::default() };

    let deck = block_on(create_deck(&gateway(&transport), &data)).unwrap();

    assert_eq!(deck.id, "d1");
    let sent = transport.last().request;
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.path, "/decks");
    assert_eq!(sent.body.as_deref(), Some(r#"{"title":"Verbs","isPublic":false}"#));
}

#[test]
fn get_update_delete_target_deck_path() {
    let transport = ScriptedTransport::new();
    transport.reply(200, DECK_JSON).reply(200, DECK_JSON).reply(204, "");
    let gw = gateway(&transport);

    block_on(get_deck(&gw, "d1")).unwrap();
    block_on(update_deck(&gw, "d1", &UpdateDeckRequest { title: Some("New".to_owned()), ..UpdateDeckRequest::default() }))
        .unwrap();
    block_on(delete_deck(&gw, "d1")).unwrap();

    let sent: Vec<_> = transport.sent().into_iter().map(|s| (s.request.method, s.request.path)).collect();
    assert_eq!(
        sent,
        vec![
            (Method::Get, "/decks/d1".to_owned()),
            (Method::Patch, "/decks/d1".to_owned()),
            (Method::Delete, "/decks/d1".to_owned()),
        ]
    );
}

#[test]
fn deck_ids_are_path_encoded() {
    let transport = ScriptedTransport::new();
    transport.reply(200, DECK_JSON);

    block_on(get_deck(&gateway(&transport), "a/b")).unwrap();

    assert_eq!(transport.last().request.path, "/decks/a%2Fb");
}

#[test]
fn missing_deck_surfaces_status() {
    let transport = ScriptedTransport::new();
    transport.reply(404, r#"{"error":"Deck not found"}"#);

    let err = block_on(get_deck(&gateway(&transport), "nope")).unwrap_err();

    assert_eq!(err.status(), Some(404));
}
