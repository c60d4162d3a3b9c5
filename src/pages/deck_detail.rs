//! Single deck at `/decks/:id`: its details, plus edit and delete actions.
//!
//! Delete asks for confirmation in place and returns to the list once the
//! server accepts it.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::app::SessionContext;
use crate::net::decks::{delete_deck, get_deck};
use crate::net::errors::error_message;
use crate::net::types::DeckResponse;

#[component]
pub fn DeckDetailPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let params = use_params_map();

    let deck = LocalResource::new(move || {
        let id = params.with(|p| p.get("id")).unwrap_or_default();
        let gateway = session.store().gateway();
        async move { get_deck(&gateway, &id).await.map_err(|e| error_message(&e)) }
    });

    view! {
        <div class="deck-detail-page">
            <a class="deck-detail-page__back" href="/decks">"Back to decks"</a>
            <Suspense fallback=|| view! { <p class="deck-detail__loading">"Loading deck..."</p> }>
                {move || Suspend::new(async move {
                    match deck.await {
                        Ok(deck) => view! { <DeckDetail deck=deck/> }.into_any(),
                        Err(message) => view! { <p class="deck-detail__error" role="alert">{message}</p> }.into_any(),
                    }
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn DeckDetail(deck: DeckResponse) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let confirming = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let id = deck.id.clone();
    let on_delete = move |_: leptos::ev::MouseEvent| {
        if deleting.get_untracked() {
            return;
        }
        deleting.set(true);
        error.set(None);
        let gateway = session.store().gateway();
        let navigate = navigate.clone();
        let id = id.clone();
        leptos::task::spawn_local(async move {
            match delete_deck(&gateway, &id).await {
                Ok(()) => navigate("/decks", NavigateOptions::default()),
                Err(e) => {
                    error.set(Some(error_message(&e)));
                    confirming.set(false);
                }
            }
            deleting.set(false);
        });
    };

    let visibility = if deck.is_public { "Public" } else { "Private" };
    let cards = match deck.card_count {
        1 => "1 card".to_owned(),
        n => format!("{n} cards"),
    };
    let edit_href = format!("/decks/{}/edit", deck.id);

    view! {
        <article class="deck-detail">
            <header class="deck-detail__header">
                <h1>{deck.title}</h1>
                <span class="deck-detail__visibility">{visibility}</span>
            </header>
            <p class="deck-detail__description">
                {deck.description.unwrap_or_else(|| "No description".to_owned())}
            </p>
            <ul class="deck-detail__tags">
                {deck.tags.into_iter().map(|tag| view! { <li class="deck-detail__tag">{tag}</li> }).collect_view()}
            </ul>
            <dl class="deck-detail__meta">
                <dt>"Cards"</dt>
                <dd>{cards}</dd>
                <dt>"Owner"</dt>
                <dd>{deck.owner.username}</dd>
                <dt>"Created"</dt>
                <dd>{deck.created_at}</dd>
                <dt>"Updated"</dt>
                <dd>{deck.updated_at}</dd>
            </dl>
            <Show when=move || error.with(Option::is_some)>
                <p class="deck-detail__error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="deck-detail__actions">
                <a class="deck-detail__edit" href=edit_href>"Edit"</a>
                <Show
                    when=move || confirming.get()
                    fallback=move || {
                        view! {
                            <button class="deck-detail__delete" on:click=move |_| confirming.set(true)>
                                "Delete"
                            </button>
                        }
                    }
                >
                    <span class="deck-detail__confirm">"Delete this deck and all its cards?"</span>
                    <button
                        class="deck-detail__delete"
                        disabled=move || deleting.get()
                        on:click=on_delete.clone()
                    >
                        {move || if deleting.get() { "Deleting..." } else { "Yes, delete" }}
                    </button>
                    <button
                        class="deck-detail__cancel"
                        disabled=move || deleting.get()
                        on:click=move |_| confirming.set(false)
                    >
                        "Cancel"
                    </button>
                </Show>
            </div>
        </article>
    }
}
