//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure UI rules from
//! page and component logic to improve reuse and testability.

pub mod guards;
pub mod navigation;
pub mod pagination;
pub mod validation;
