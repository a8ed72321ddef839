//! Inline banners for failures, confirmations, and empty lists.

use dioxus::prelude::*;
use store::Banner;

use crate::components::{Button, ButtonVariant};

/// Error banner with a retry control when retrying can help.
#[component]
pub fn ErrorBanner(banner: Banner, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "banner banner-error",
            role: "alert",
            p { "{banner.message}" }
            if banner.retryable {
                Button {
                    variant: ButtonVariant::Outline,
                    class: "mt-4",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        }
    }
}

/// One-line inline status message.
#[component]
pub fn StatusBanner(message: String, #[props(default)] success: bool) -> Element {
    rsx! {
        div {
            class: if success { "banner banner-success" } else { "banner banner-error" },
            role: "status",
            "{message}"
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", p { "{message}" } }
    }
}

#[component]
pub fn LoadingState(message: String) -> Element {
    rsx! {
        div {
            class: "view-status",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}
