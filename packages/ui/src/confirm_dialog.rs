use dioxus::prelude::*;
use store::DeleteConfirm;

use crate::components::{Button, ButtonVariant};
use crate::views::ModalOverlay;

/// Delete confirmation bound to a [`DeleteConfirm`]. Hidden while the dialog is closed.
#[component]
pub fn ConfirmDelete(
    confirm: Signal<DeleteConfirm>,
    /// What is being deleted, e.g. "dream".
    item: String,
    /// `action` phrase for permission failures, e.g. "delete this dream".
    action: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let dialog = confirm.read().clone();
    if !dialog.is_open() {
        return rsx! {};
    }
    let deleting = dialog.is_deleting();

    rsx! {
        ModalOverlay {
            title: "Delete {item}",
            on_close: move |_| {
                if !deleting {
                    on_cancel.call(());
                }
            },
            p {
                class: "modal-body",
                "Are you sure you want to delete this {item}? This action cannot be undone."
            }
            if let Some(err) = &dialog.error {
                div { class: "banner banner-error", "{err.describe(&action)}" }
            }
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: deleting,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: deleting,
                    onclick: move |_| on_confirm.call(()),
                    if deleting { "Deleting..." } else { "Delete" }
                }
            }
        }
    }
}
