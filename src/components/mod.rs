//! Reusable UI components shared by pages.

pub mod pager;
pub mod route_guard;
