//! Authentication context and hooks for the UI.
//!
//! The backend client is provided once at the root (`use_context_provider`) and
//! [`AuthProvider`] mirrors its session into an [`AuthState`] signal. Nothing here
//! is a global: every view reaches the session through context.

use api::{PocketBase, UserInfo};
use dioxus::prelude::*;
use store::forms::Registration;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    /// True until the stored session has been checked.
    pub loading: bool,
    /// Last sign-in or sign-up failure.
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The backend client provided at the root of the app.
pub fn use_backend() -> PocketBase {
    use_context::<PocketBase>()
}

/// Provider component that manages authentication state.
///
/// Expects a [`PocketBase`] in context. Subscribes once to the client's auth store
/// and keeps `user` in step with it until unmounted.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_backend();
    let mut auth_state = use_signal(AuthState::default);

    use_hook(move || {
        let session = client.auth_store().clone();
        spawn(async move {
            let mut changes = session.subscribe();
            let user = session.is_valid().then(|| session.user()).flatten();
            auth_state.set(AuthState {
                user,
                loading: false,
                error: None,
            });

            while changes.changed().await.is_ok() {
                let user = changes
                    .borrow_and_update()
                    .as_ref()
                    .filter(|record| record.is_valid())
                    .map(|record| record.user.clone());
                if auth_state.peek().user != user {
                    auth_state.write().user = user;
                }
            }
        });
    });

    // Expired tokens produce no change notification; check periodically.
    #[cfg(target_arch = "wasm32")]
    {
        let client = use_backend();
        use_hook(move || {
            spawn(async move {
                loop {
                    gloo_timers::future::sleep(std::time::Duration::from_secs(60)).await;
                    let session = client.auth_store();
                    if session.record().is_some() && !session.is_valid() {
                        tracing::info!("session expired");
                        client.logout();
                    }
                }
            });
        });
    }

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Sign in and record the outcome in `auth`. Returns whether it succeeded.
pub async fn sign_in(
    mut auth: Signal<AuthState>,
    client: &PocketBase,
    email: &str,
    password: &str,
) -> bool {
    auth.write().error = None;
    match client.login(email, password).await {
        Ok(user) => {
            let mut state = auth.write();
            state.user = Some(user);
            state.error = None;
            true
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            auth.write().error = Some(e.to_string());
            false
        }
    }
}

/// Create an account and sign in with it.
pub async fn sign_up(
    mut auth: Signal<AuthState>,
    client: &PocketBase,
    registration: Registration,
) -> bool {
    auth.write().error = None;
    match client
        .register(
            &registration.email,
            &registration.password,
            &registration.name,
        )
        .await
    {
        Ok(user) => {
            let mut state = auth.write();
            state.user = Some(user);
            state.error = None;
            true
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            auth.write().error = Some(e.to_string());
            false
        }
    }
}

/// Drop the session. The user is cleared before this returns.
pub fn sign_out(mut auth: Signal<AuthState>, client: &PocketBase) {
    client.logout();
    let mut state = auth.write();
    state.user = None;
    state.error = None;
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth_state = use_auth();
    let client = use_backend();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| sign_out(auth_state, &client),
            "{label}"
        }
    }
}
