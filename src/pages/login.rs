//! Sign-in page: email + password against the session store.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::SessionContext;
use crate::net::types::LoginRequest;
use crate::util::validation::{FieldErrors, validate_login};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);

        let request = LoginRequest { email: email.get_untracked().trim().to_owned(), password: password.get_untracked() };
        let errors = validate_login(&request.email, &request.password);
        let valid = errors.is_empty();
        field_errors.set(errors);
        if !valid {
            return;
        }

        busy.set(true);
        let store = session.store();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match store.login(&request).await {
                Ok(()) => navigate("/", NavigateOptions::default()),
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    let field_error = move |field: &'static str| field_errors.with(|errs| errs.get(field).map(str::to_owned));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Flashcards"</h1>
                <p class="auth-card__subtitle">"Welcome back. Sign in to your cards."</p>
                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || error.with(Option::is_some)>
                        <p class="auth-alert" role="alert">
                            {move || error.get().unwrap_or_default()}
                            <button type="button" class="auth-alert__close" on:click=move |_| error.set(None)>
                                "x"
                            </button>
                        </p>
                    </Show>
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        class="auth-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        disabled=move || busy.get()
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <span class="auth-field-error">{move || field_error("email")}</span>
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        autocomplete="current-password"
                        disabled=move || busy.get()
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <span class="auth-field-error">{move || field_error("password")}</span>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    "No account? "
                    <a href="/register">"Register here"</a>
                </p>
            </div>
        </div>
    }
}
