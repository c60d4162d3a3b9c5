//! Deck list: the authenticated landing screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fetches one page of decks through the session's gateway whenever the page
//! or the submitted search changes. A 401 here is handled by the gateway
//! (teardown + redirect); this page only shows other failures.

use leptos::prelude::*;

use crate::app::SessionContext;
use crate::components::pager::Pager;
use crate::net::decks::{DeckFilters, list_decks};
use crate::net::errors::error_message;
use crate::net::types::DeckResponse;

const PAGE_SIZE: u32 = 12;

#[component]
pub fn DecksPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    let page = RwSignal::new(0_u32);
    let search_input = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());

    let decks = LocalResource::new(move || {
        let filters = DeckFilters {
            page: Some(page.get()),
            size: Some(PAGE_SIZE),
            search: Some(search.get()),
            ..DeckFilters::default()
        };
        let gateway = session.store().gateway();
        async move { list_decks(&gateway, &filters).await.map_err(|e| error_message(&e)) }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        page.set(0);
        search.set(search_input.get_untracked().trim().to_owned());
    };
    let on_page = Callback::new(move |next: u32| page.set(next));
    let on_logout = move |_| session.store().logout();

    let username = move || {
        session.state.with(|s| s.current_user().map(|u| u.username.clone()).unwrap_or_default())
    };

    view! {
        <div class="decks-page">
            <header class="decks-header">
                <h1>"My decks"</h1>
                <span class="decks-header__user">{username}</span>
                <a class="decks-header__new" href="/decks/new">"New deck"</a>
                <button class="decks-header__logout" on:click=on_logout>"Log out"</button>
            </header>
            <form class="decks-search" on:submit=on_search>
                <input
                    class="decks-search__input"
                    type="search"
                    placeholder="Search decks"
                    prop:value=move || search_input.get()
                    on:input=move |ev| search_input.set(event_target_value(&ev))
                />
                <button type="submit">"Search"</button>
            </form>
            <Transition fallback=|| view! { <p class="decks-loading">"Loading decks..."</p> }>
                {move || Suspend::new(async move {
                    match decks.await {
                        Ok(result) => {
                            let total_pages = result.total_pages;
                            let searching = !search.get_untracked().is_empty();
                            view! {
                                <DeckGrid decks=result.content searching=searching/>
                                <Pager
                                    current=page
                                    total=Signal::derive(move || total_pages)
                                    on_change=on_page
                                />
                            }
                                .into_any()
                        }
                        Err(message) => view! { <p class="decks-error" role="alert">{message}</p> }.into_any(),
                    }
                })}
            </Transition>
        </div>
    }
}

#[component]
fn DeckGrid(decks: Vec<DeckResponse>, searching: bool) -> impl IntoView {
    if decks.is_empty() {
        let message = if searching { "No decks match your search" } else { "You have no decks yet" };
        return view! { <p class="decks-empty">{message}</p> }.into_any();
    }

    view! {
        <ul class="deck-grid">
            {decks.into_iter().map(|deck| view! { <DeckCard deck=deck/> }).collect_view()}
        </ul>
    }
    .into_any()
}

#[component]
fn DeckCard(deck: DeckResponse) -> impl IntoView {
    let visibility = if deck.is_public { "Public" } else { "Private" };
    let cards = match deck.card_count {
        1 => "1 card".to_owned(),
        n => format!("{n} cards"),
    };

    let href = format!("/decks/{}", deck.id);

    view! {
        <li class="deck-card">
            <h2 class="deck-card__title">
                <a href=href>{deck.title}</a>
            </h2>
            <p class="deck-card__description">{deck.description.unwrap_or_default()}</p>
            <ul class="deck-card__tags">
                {deck.tags.into_iter().map(|tag| view! { <li class="deck-card__tag">{tag}</li> }).collect_view()}
            </ul>
            <p class="deck-card__meta">
                <span>{cards}</span>
                <span class="deck-card__visibility">{visibility}</span>
                <span>{format!("by {}", deck.owner.username)}</span>
            </p>
        </li>
    }
}
