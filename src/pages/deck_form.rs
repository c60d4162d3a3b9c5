//! Deck editor: creates a deck at `/decks/new`, edits one at `/decks/:id/edit`.
//!
//! In edit mode the deck is loaded once on mount and the form is prefilled;
//! saving sends the full set of editable fields. Field errors render inline
//! under their inputs, server errors in the alert at the top.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::app::SessionContext;
use crate::net::decks::{create_deck, get_deck, update_deck};
use crate::net::errors::error_message;
use crate::util::validation::{DeckForm, FieldErrors};

#[component]
pub fn DeckFormPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();
    let params = use_params_map();

    let deck_id = params.with_untracked(|p| p.get("id"));
    let editing = deck_id.is_some();

    let form = RwSignal::new(DeckForm::default());
    let field_errors = RwSignal::new(FieldErrors::default());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(editing);
    let busy = RwSignal::new(false);

    if let Some(id) = deck_id.clone() {
        let gateway = session.store().gateway();
        leptos::task::spawn_local(async move {
            match get_deck(&gateway, &id).await {
                Ok(deck) => form.set(DeckForm::from_deck(&deck)),
                Err(e) => error.set(Some(error_message(&e))),
            }
            loading.set(false);
        });
    }

    let heading = if editing { "Edit deck" } else { "New deck" };
    let cancel_href = match &deck_id {
        Some(id) => format!("/decks/{id}"),
        None => "/decks".to_owned(),
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || loading.get_untracked() {
            return;
        }
        error.set(None);

        let current = form.get_untracked();
        let errors = current.validate();
        let valid = errors.is_empty();
        field_errors.set(errors);
        if !valid {
            return;
        }

        busy.set(true);
        let gateway = session.store().gateway();
        let navigate = navigate.clone();
        let deck_id = deck_id.clone();
        leptos::task::spawn_local(async move {
            let saved = match &deck_id {
                Some(id) => update_deck(&gateway, id, &current.to_update_request()).await,
                None => create_deck(&gateway, &current.to_create_request()).await,
            };
            match saved {
                Ok(deck) => navigate(&format!("/decks/{}", deck.id), NavigateOptions::default()),
                Err(e) => error.set(Some(error_message(&e))),
            }
            busy.set(false);
        });
    };

    let field_error = move |field: &'static str| field_errors.with(|errs| errs.get(field).map(str::to_owned));
    let locked = move || busy.get() || loading.get();

    view! {
        <div class="deck-form-page">
            <a class="deck-form-page__back" href=cancel_href.clone()>"Back"</a>
            <h1>{heading}</h1>
            <form class="deck-form" on:submit=on_submit>
                <Show when=move || error.with(Option::is_some)>
                    <p class="deck-form__alert" role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || loading.get()>
                    <p class="deck-form__loading">"Loading deck..."</p>
                </Show>
                <label for="title">"Title"</label>
                <input
                    id="title"
                    class="deck-form__input"
                    type="text"
                    disabled=locked
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                />
                <span class="deck-form__field-error">{move || field_error("title")}</span>
                <label for="description">"Description"</label>
                <textarea
                    id="description"
                    class="deck-form__input"
                    rows="4"
                    disabled=locked
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
                <span class="deck-form__field-error">{move || field_error("description")}</span>
                <label for="tags">"Tags"</label>
                <input
                    id="tags"
                    class="deck-form__input"
                    type="text"
                    placeholder="spanish, verbs"
                    disabled=locked
                    prop:value=move || form.with(|f| f.tags.clone())
                    on:input=move |ev| form.update(|f| f.tags = event_target_value(&ev))
                />
                <label class="deck-form__checkbox">
                    <input
                        type="checkbox"
                        disabled=locked
                        prop:checked=move || form.with(|f| f.is_public)
                        on:change=move |ev| form.update(|f| f.is_public = event_target_checked(&ev))
                    />
                    "Public deck"
                </label>
                <div class="deck-form__actions">
                    <button class="deck-form__submit" type="submit" disabled=locked>
                        {move || match (busy.get(), editing) {
                            (true, _) => "Saving...",
                            (false, true) => "Save changes",
                            (false, false) => "Create deck",
                        }}
                    </button>
                    <a class="deck-form__cancel" href=cancel_href>"Cancel"</a>
                </div>
            </form>
        </div>
    }
}
