use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::guard::AuthGate;

/// Landing page: the sign-in panel, or a welcome card once signed in.
#[component]
pub fn HomeView() -> Element {
    rsx! {
        AuthGate { Welcome {} }
    }
}

#[component]
fn Welcome() -> Element {
    let auth = use_auth();
    let Some(user) = auth().user else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "Munchkin Site" }
            div {
                class: "welcome-card",
                h2 { class: "view-section-title", "Welcome, {user.display_name()}!" }
                p { class: "view-muted", "You are logged in with: {user.email}" }
                LogoutButton { class: "btn btn-outline mt-4" }
            }
        }
    }
}
