//! Login and sign-up forms, shown side by side as tabs.

use dioxus::prelude::*;
use store::forms::RegisterForm;

use crate::auth::{sign_in, sign_up, use_auth, use_backend};
use crate::components::{Button, ButtonVariant, Input, Label};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Login,
    SignUp,
}

/// Login / Sign Up tabs. Success is observed through the auth context.
#[component]
pub fn AuthPanel() -> Element {
    let mut tab = use_signal(|| Tab::Login);
    let mut auth = use_auth();

    let mut select = move |next: Tab| {
        auth.write().error = None;
        tab.set(next);
    };

    rsx! {
        div {
            class: "auth-panel",
            div {
                class: "auth-tabs",
                role: "tablist",
                button {
                    class: if tab() == Tab::Login { "auth-tab active" } else { "auth-tab" },
                    onclick: move |_| select(Tab::Login),
                    "Login"
                }
                button {
                    class: if tab() == Tab::SignUp { "auth-tab active" } else { "auth-tab" },
                    onclick: move |_| select(Tab::SignUp),
                    "Sign Up"
                }
            }
            match tab() {
                Tab::Login => rsx! { LoginForm {} },
                Tab::SignUp => rsx! { SignUpForm {} },
            }
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let auth = use_auth();
    let client = use_backend();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            busy.set(true);
            if sign_in(auth, &client, email().trim(), &password()).await {
                password.set(String::new());
            }
            busy.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit,
            h3 { class: "auth-form-title", "Welcome back" }
            div {
                class: "mb-4",
                Label { html_for: "login-email", "Email" }
                Input {
                    id: "login-email",
                    class: "w-full mt-1.5",
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: email(),
                    required: true,
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }
            div {
                class: "mb-4",
                Label { html_for: "login-password", "Password" }
                Input {
                    id: "login-password",
                    class: "w-full mt-1.5",
                    r#type: "password",
                    value: password(),
                    required: true,
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
            }
            if let Some(err) = auth().error {
                div { class: "form-error", role: "alert", "{err}" }
            }
            Button {
                variant: ButtonVariant::Primary,
                class: "w-full",
                r#type: "submit",
                disabled: busy(),
                if busy() { "Logging in..." } else { "Login" }
            }
        }
    }
}

#[component]
fn SignUpForm() -> Element {
    let mut auth = use_auth();
    let client = use_backend();
    let mut form = use_signal(RegisterForm::default);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let registration = match form.read().validate() {
            Ok(registration) => registration,
            Err(err) => {
                auth.write().error = Some(err.to_string());
                return;
            }
        };
        let client = client.clone();
        spawn(async move {
            busy.set(true);
            sign_up(auth, &client, registration).await;
            busy.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit,
            h3 { class: "auth-form-title", "Create an account" }
            div {
                class: "mb-4",
                Label { html_for: "signup-name", "Name" }
                Input {
                    id: "signup-name",
                    class: "w-full mt-1.5",
                    placeholder: "Your name",
                    value: form.read().name.clone(),
                    required: true,
                    oninput: move |evt: FormEvent| form.write().name = evt.value(),
                }
            }
            div {
                class: "mb-4",
                Label { html_for: "signup-email", "Email" }
                Input {
                    id: "signup-email",
                    class: "w-full mt-1.5",
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: form.read().email.clone(),
                    required: true,
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }
            }
            div {
                class: "mb-4",
                Label { html_for: "signup-password", "Password" }
                Input {
                    id: "signup-password",
                    class: "w-full mt-1.5",
                    r#type: "password",
                    placeholder: "At least 8 characters",
                    value: form.read().password.clone(),
                    required: true,
                    oninput: move |evt: FormEvent| form.write().password = evt.value(),
                }
            }
            if let Some(err) = auth().error {
                div { class: "form-error", role: "alert", "{err}" }
            }
            Button {
                variant: ButtonVariant::Primary,
                class: "w-full",
                r#type: "submit",
                disabled: busy(),
                if busy() { "Creating account..." } else { "Sign Up" }
            }
        }
    }
}
