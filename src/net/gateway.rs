//! The shared request pipeline for every call to the remote API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Session store, deck calls and pages all go through one `Gateway`, so the
//! credential and unauthorized-response policies cannot be skipped:
//!
//! - Before dispatch, the credential held by the session is attached as a
//!   bearer token unless the caller already set `Authorization`.
//! - A 401 from anywhere erases the persisted session, invalidates the
//!   in-memory session, and forces navigation to `/login` unless the user is
//!   already on a public entry point. The 401 is still returned to the caller.
//!
//! The gateway does not know the session store; it is handed a credential
//! source and an invalidation callback at construction. Storage is only
//! touched to erase it, so a rejected write never strips the header.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::errors::ApiError;
use super::http::{ACCEPT, APPLICATION_JSON, AUTHORIZATION, HttpRequest, HttpResponse, Transport, UNAUTHORIZED};
use super::types::Credential;
use crate::config::ClientConfig;
use crate::state::persistence::Persistence;
use crate::util::navigation::Navigator;

/// Where the user is sent after the server rejects their credential.
pub const SIGN_IN_PATH: &str = "/login";

/// Entry points reachable without a session; never redirected from.
pub const PUBLIC_PATHS: [&str; 2] = ["/login", "/register"];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Called once per unauthorized response to drop the in-memory session.
pub type InvalidateSession = Box<dyn Fn()>;

/// Reads the credential of the in-memory session at dispatch time.
pub type CredentialSource = Box<dyn Fn() -> Option<Credential>>;

pub struct Gateway<T> {
    transport: T,
    base_url: String,
    persistence: Persistence,
    navigator: Rc<dyn Navigator>,
    credential: CredentialSource,
    invalidate: InvalidateSession,
}

impl<T: Transport> Gateway<T> {
    pub fn new(
        transport: T,
        config: &ClientConfig,
        persistence: Persistence,
        navigator: Rc<dyn Navigator>,
        credential: CredentialSource,
        invalidate: InvalidateSession,
    ) -> Self {
        Self { transport, base_url: config.api_base_url.clone(), persistence, navigator, credential, invalidate }
    }

    /// Dispatch `request` and return the response if it is a 2xx.
    ///
    /// # Errors
    ///
    /// `ApiError::Transport` if no response arrived, `ApiError::Status` for any
    /// non-2xx response (including 401, after teardown).
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = self.decorate(request);
        let url = request.url(&self.base_url);
        debug!("gateway: {} {}", request.method.as_str(), request.path);

        let response = self.transport.send(&url, &request).await?;
        if response.status == UNAUTHORIZED {
            self.teardown(&request.path);
        }
        if !response.is_success() {
            debug!("gateway: {} {} -> {}", request.method.as_str(), request.path, response.status);
            return Err(ApiError::Status { status: response.status, body: response.body });
        }
        Ok(response)
    }

    /// Dispatch `request` and decode a JSON response body.
    ///
    /// # Errors
    ///
    /// As [`Gateway::send`], plus `ApiError::Decode` for an unexpected body.
    pub async fn fetch_json<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let response = self.send(request).await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// # Errors
    ///
    /// See [`Gateway::fetch_json`].
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.fetch_json(HttpRequest::get(path)).await
    }

    /// # Errors
    ///
    /// See [`Gateway::fetch_json`]; `ApiError::Encode` if `body` cannot be
    /// serialized.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = HttpRequest::post(path).json(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.fetch_json(request).await
    }

    /// # Errors
    ///
    /// See [`Gateway::post_json`].
    pub async fn patch_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = HttpRequest::patch(path).json(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.fetch_json(request).await
    }

    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(HttpRequest::delete(path)).await.map(|_| ())
    }

    fn decorate(&self, mut request: HttpRequest) -> HttpRequest {
        if !request.has_header(ACCEPT) {
            request = request.header(ACCEPT, APPLICATION_JSON);
        }
        if request.has_header(AUTHORIZATION) {
            return request;
        }
        match (self.credential)() {
            Some(credential) => request.header(AUTHORIZATION, credential.bearer()),
            None => request,
        }
    }

    fn teardown(&self, request_path: &str) {
        self.persistence.clear();
        (self.invalidate)();

        let location = self.navigator.current_path();
        if is_public_path(&location) {
            debug!("gateway: 401 from {request_path} on public page {location}; not redirecting");
            return;
        }
        warn!("gateway: 401 from {request_path}; session ended, redirecting to {SIGN_IN_PATH}");
        self.navigator.navigate(SIGN_IN_PATH);
    }
}
