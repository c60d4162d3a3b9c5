//! Wraps a route's view in the private/public session guard.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::SessionContext;
use crate::util::guards::{GuardDecision, RouteAccess, decide, install_guard_redirect};

/// Renders `children` only once the guard for `access` says so; shows a
/// session check placeholder while the session is loading.
#[component]
pub fn RouteGuard(access: RouteAccess, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    install_guard_redirect(session.state, access, use_navigate());

    let allowed = move || session.state.with(|s| decide(access, s)) == GuardDecision::Render;

    view! {
        <Show
            when=allowed
            fallback=|| view! { <div class="session-check">"Checking session..."</div> }
        >
            {children()}
        </Show>
    }
}
