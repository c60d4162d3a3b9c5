//! Client-side state.
//!
//! DESIGN
//! ======
//! `session` is the only stateful component with a transition set; it owns
//! the in-memory session and keeps `persistence` in step with it.

pub mod persistence;
pub mod session;
