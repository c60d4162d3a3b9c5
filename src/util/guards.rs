//! Route guards for private and public screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route applies the same rule: wait while the session is loading, then
//! either render or redirect. Waiting covers the optimistic bootstrap phase,
//! so a restored session never flashes the sign-in page.

#[cfg(test)]
#[path = "guards_test.rs"]
mod guards_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Requires a session.
    Private,
    /// Sign-in and sign-up; pointless with a session.
    Public,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Wait,
    Render,
    Redirect(&'static str),
}

pub fn decide(access: RouteAccess, state: &SessionState) -> GuardDecision {
    if state.is_loading() {
        return GuardDecision::Wait;
    }
    match (access, state.is_authenticated()) {
        (RouteAccess::Private, false) => GuardDecision::Redirect("/login"),
        (RouteAccess::Public, true) => GuardDecision::Redirect("/"),
        _ => GuardDecision::Render,
    }
}

/// Redirect whenever the guard decision for `access` becomes a redirect.
pub fn install_guard_redirect<F>(state: ReadSignal<SessionState>, access: RouteAccess, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(target) = state.with(|s| decide(access, s)) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
