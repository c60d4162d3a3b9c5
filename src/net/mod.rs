//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` is the single choke point for outbound calls; `http` defines the
//! request/response values and the transport seam underneath it; `auth` and
//! `decks` are thin endpoint shims over the gateway; `types` defines the wire
//! schema shared by all of them.

pub mod auth;
pub mod decks;
pub mod errors;
pub mod gateway;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
