//! Deck resource calls.
//!
//! Thin shims over the gateway; credential and 401 handling happen there.

#[cfg(test)]
#[path = "decks_test.rs"]
mod decks_test;

use super::errors::ApiError;
use super::gateway::Gateway;
use super::http::{HttpRequest, Transport};
use super::types::{DeckRequest, DeckResponse, PageResponse, UpdateDeckRequest};

pub const DECKS_PATH: &str = "/decks";

/// Listing filters. Unset fields are left out of the query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckFilters {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub only_public: Option<bool>,
}

impl DeckFilters {
    /// Query pairs in the order the server documents them.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_owned(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_owned(), size.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search".to_owned(), search.to_owned()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags".to_owned(), self.tags.join(",")));
        }
        if let Some(only_public) = self.only_public {
            pairs.push(("onlyPublic".to_owned(), only_public.to_string()));
        }
        pairs
    }
}

fn deck_path(id: &str) -> String {
    format!("{DECKS_PATH}/{}", urlencoding::encode(id))
}

/// # Errors
///
/// Any gateway error, unchanged.
pub async fn create_deck<T: Transport>(gateway: &Gateway<T>, data: &DeckRequest) -> Result<DeckResponse, ApiError> {
    gateway.post_json(DECKS_PATH, data).await
}

/// # Errors
///
/// Any gateway error, unchanged.
pub async fn get_deck<T: Transport>(gateway: &Gateway<T>, id: &str) -> Result<DeckResponse, ApiError> {
    gateway.get_json(&deck_path(id)).await
}

/// # Errors
///
/// Any gateway error, unchanged.
pub async fn list_decks<T: Transport>(
    gateway: &Gateway<T>,
    filters: &DeckFilters,
) -> Result<PageResponse<DeckResponse>, ApiError> {
    gateway.fetch_json(HttpRequest::get(DECKS_PATH).queries(filters.query_pairs())).await
}

/// # Errors
///
/// Any gateway error, unchanged.
pub async fn update_deck<T: Transport>(
    gateway: &Gateway<T>,
    id: &str,
    data: &UpdateDeckRequest,
) -> Result<DeckResponse, ApiError> {
    gateway.patch_json(&deck_path(id), data).await
}

/// # Errors
///
/// Any gateway error, unchanged.
pub async fn delete_deck<T: Transport>(gateway: &Gateway<T>, id: &str) -> Result<(), ApiError> {
    gateway.delete(&deck_path(id)).await
}
