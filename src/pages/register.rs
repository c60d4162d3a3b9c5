//! Sign-up page; a successful registration signs the user in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::SessionContext;
use crate::net::types::RegisterRequest;
use crate::util::validation::{FieldErrors, RegisterForm, validate_register};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());
    let field_errors = RwSignal::new(FieldErrors::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);

        let mut current = form.get_untracked();
        current.email = current.email.trim().to_owned();
        current.username = current.username.trim().to_owned();
        let errors = validate_register(&current);
        let valid = errors.is_empty();
        field_errors.set(errors);
        if !valid {
            return;
        }

        busy.set(true);
        let request = RegisterRequest { email: current.email, username: current.username, password: current.password };
        let store = session.store();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match store.register(&request).await {
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
                <h1>"Create account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || error.with(Option::is_some)>
                        <p class="auth-alert" role="alert">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        class="auth-input"
                        type="email"
                        autocomplete="email"
                        disabled=move || busy.get()
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <span class="auth-field-error">{move || field_error("email")}</span>
                    <label for="username">"Username"</label>
                    <input
                        id="username"
                        class="auth-input"
                        type="text"
                        autocomplete="username"
                        disabled=move || busy.get()
                        prop:value=move || form.with(|f| f.username.clone())
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                    />
                    <span class="auth-field-error">{move || field_error("username")}</span>
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        disabled=move || busy.get()
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <span class="auth-field-error">{move || field_error("password")}</span>
                    <label for="confirm_password">"Confirm password"</label>
                    <input
                        id="confirm_password"
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        disabled=move || busy.get()
                        prop:value=move || form.with(|f| f.confirm_password.clone())
                        on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                    />
                    <span class="auth-field-error">{move || field_error("confirm_password")}</span>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
