//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::route_guard::RouteGuard;
use crate::config::ClientConfig;
use crate::net::http::FetchTransport;
use crate::pages::{
    deck_detail::DeckDetailPage, deck_form::DeckFormPage, decks::DecksPage, login::LoginPage, register::RegisterPage,
};
use crate::state::persistence::BrowserStore;
use crate::state::session::{SessionState, SessionStore};
use crate::util::guards::RouteAccess;
use crate::util::navigation::BrowserNavigator;

pub type AppSession = SessionStore<FetchTransport>;

/// What components get from `expect_context::<SessionContext>()`.
///
/// `state` is read-only; all writes go through the store's operations.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    store: StoredValue<AppSession, LocalStorage>,
}

impl SessionContext {
    /// A handle to the shared store for use inside `spawn_local`.
    pub fn store(&self) -> AppSession {
        self.store.get_value()
    }
}

fn browser_session() -> AppSession {
    let config = ClientConfig::from_env();
    SessionStore::new(
        FetchTransport::new(config.request_timeout_ms),
        &config,
        std::rc::Rc::new(BrowserStore),
        std::rc::Rc::new(BrowserNavigator),
    )
}

/// Root application component.
///
/// Creates the session store, mirrors its state into a signal, starts the
/// one-time bootstrap, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = browser_session();
    let (state, set_state) = signal(store.state());
    store.subscribe(move |next| set_state.set(next.clone()));

    let bootstrap = store.clone();
    leptos::task::spawn_local(async move { bootstrap.bootstrap().await });

    provide_context(SessionContext { state, store: StoredValue::new_local(store) });

    view! {
        <Title text="Flashcards"/>

        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/decks"/> }/>
                <Route
                    path=StaticSegment("decks")
                    view=|| view! { <RouteGuard access=RouteAccess::Private><DecksPage/></RouteGuard> }
                />
                <Route
                    path=(StaticSegment("decks"), StaticSegment("new"))
                    view=|| view! { <RouteGuard access=RouteAccess::Private><DeckFormPage/></RouteGuard> }
                />
                <Route
                    path=(StaticSegment("decks"), ParamSegment("id"))
                    view=|| view! { <RouteGuard access=RouteAccess::Private><DeckDetailPage/></RouteGuard> }
                />
                <Route
                    path=(StaticSegment("decks"), ParamSegment("id"), StaticSegment("edit"))
                    view=|| view! { <RouteGuard access=RouteAccess::Private><DeckFormPage/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <RouteGuard access=RouteAccess::Public><LoginPage/></RouteGuard> }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| view! { <RouteGuard access=RouteAccess::Public><RegisterPage/></RouteGuard> }
                />
            </Routes>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <a href="/">"Back to start"</a>
        </div>
    }
}
