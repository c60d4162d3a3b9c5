//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and reaches the session only
//! through `SessionContext`; guards are applied by the router in `app`.

pub mod deck_detail;
pub mod deck_form;
pub mod decks;
pub mod login;
pub mod register;
