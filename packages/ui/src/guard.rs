//! Route guards: nothing protected renders until the session is known.

use dioxus::prelude::*;

use crate::auth::{use_auth, AuthState};
use crate::views::AuthPanel;

/// What a guard shows for a given auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Redirect,
    Render,
}

impl GuardDecision {
    pub fn for_state(state: &AuthState) -> Self {
        if state.loading {
            Self::Loading
        } else if state.user.is_none() {
            Self::Redirect
        } else {
            Self::Render
        }
    }
}

/// Renders `children` for a signed-in user; otherwise calls `on_redirect` and renders nothing.
#[component]
pub fn ProtectedRoute(on_redirect: EventHandler<()>, children: Element) -> Element {
    let auth = use_auth();

    use_effect(move || {
        if GuardDecision::for_state(&auth.read()) == GuardDecision::Redirect {
            on_redirect.call(());
        }
    });

    let decision = GuardDecision::for_state(&auth.read());
    match decision {
        GuardDecision::Loading => rsx! {
            div { class: "view-status", "Checking authentication..." }
        },
        GuardDecision::Redirect => rsx! {},
        GuardDecision::Render => rsx! { {children} },
    }
}

/// Root gate: the sign-in panel while signed out, `children` otherwise.
#[component]
pub fn AuthGate(children: Element) -> Element {
    let auth = use_auth();

    let decision = GuardDecision::for_state(&auth.read());
    match decision {
        GuardDecision::Loading => rsx! {
            div { class: "view-status", "Loading authentication..." }
        },
        GuardDecision::Redirect => rsx! {
            div {
                class: "view-page auth-gate",
                h1 { class: "view-title text-center", "Munchkin Site" }
                h2 { class: "view-subtitle text-center", "Please log in or sign up to continue" }
                AuthPanel {}
            }
        },
        GuardDecision::Render => rsx! { {children} },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::UserInfo;

    fn user() -> UserInfo {
        UserInfo {
            id: "u1".into(),
            collection_id: String::new(),
            collection_name: "users".into(),
            email: "ada@example.com".into(),
            name: "Ada".into(),
            avatar: String::new(),
            verified: true,
        }
    }

    #[test]
    fn loading_wins_over_everything() {
        let state = AuthState {
            user: Some(user()),
            loading: true,
            error: None,
        };
        assert_eq!(GuardDecision::for_state(&state), GuardDecision::Loading);
    }

    #[test]
    fn signed_out_redirects() {
        let state = AuthState {
            loading: false,
            ..AuthState::default()
        };
        assert_eq!(GuardDecision::for_state(&state), GuardDecision::Redirect);
    }

    #[test]
    fn signed_in_renders() {
        let state = AuthState {
            user: Some(user()),
            loading: false,
            error: None,
        };
        assert_eq!(GuardDecision::for_state(&state), GuardDecision::Render);
    }
}
