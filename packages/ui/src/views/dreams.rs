use dioxus::prelude::*;
use store::forms::DreamForm;
use store::time::relative;
use store::{Action, Dream, ListSpec};

use crate::auth::use_auth;
use crate::banner::{EmptyState, ErrorBanner, LoadingState};
use crate::components::{Button, ButtonVariant};
use crate::confirm_dialog::ConfirmDelete;
use crate::editors::{use_submission, DreamEditor};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::list::{use_record_list, RecordList};
use crate::views::ModalOverlay;
use crate::Icon;

/// The dream journal: every dream, newest first.
#[component]
pub fn DreamsView() -> Element {
    let list = use_record_list::<Dream>(ListSpec::dreams);
    let auth = use_auth();
    let mut show_add = use_signal(|| false);
    let submission = use_submission();

    let on_create = move |form: DreamForm| {
        let author = auth()
            .user
            .map(|u| u.display_name().to_string())
            .unwrap_or_default();
        let input = match form.to_new(&author) {
            Ok(input) => input,
            Err(err) => return submission.fail(err),
        };
        spawn(async move {
            let action = list.action(Action::Add);
            if submission.run(&action, list.create(input)).await.is_some() {
                show_add.set(false);
            }
        });
    };

    let state = list.state.read();
    let banner = list.banner();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Dreams" }
                Button {
                    onclick: move |_| {
                        submission.reset();
                        show_add.set(true);
                    },
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Add Dream"
                }
            }

            if show_add() {
                ModalOverlay {
                    title: "Add New Dream",
                    on_close: move |_| show_add.set(false),
                    DreamEditor {
                        submit_label: "Add Dream",
                        submission,
                        on_submit: on_create,
                        on_cancel: move |_| show_add.set(false),
                    }
                }
            }

            if let Some(banner) = banner {
                ErrorBanner { banner, on_retry: move |_| list.refresh() }
            }

            if state.is_loading() && state.items.is_empty() {
                LoadingState { message: "Loading dreams..." }
            } else if state.items.is_empty() && state.error.is_none() {
                EmptyState { message: "No dreams yet. Add your first dream above!" }
            } else {
                div {
                    class: "record-list",
                    for dream in state.items.iter() {
                        DreamCard { key: "{dream.id}", dream: dream.clone(), list }
                    }
                }
            }

            ConfirmDelete {
                confirm: list.confirm,
                item: "dream",
                action: list.action(Action::Delete),
                on_confirm: move |_| {
                    spawn(async move {
                        list.confirm_delete().await;
                    });
                },
                on_cancel: move |_| list.cancel_delete(),
            }
        }
    }
}

#[component]
fn DreamCard(dream: Dream, list: RecordList<Dream>) -> Element {
    let mut editing = use_signal(|| false);
    let submission = use_submission();
    let id = dream.id.clone();

    if editing() {
        let on_save = move |form: DreamForm| {
            let patch = match form.to_patch() {
                Ok(patch) => patch,
                Err(err) => return submission.fail(err),
            };
            let id = id.clone();
            spawn(async move {
                let action = list.action(Action::Update);
                if submission.run(&action, list.edit(id, patch)).await.is_some() {
                    editing.set(false);
                }
            });
        };
        return rsx! {
            div {
                class: "record-card",
                DreamEditor {
                    initial: DreamForm::from_dream(&dream),
                    submission,
                    on_submit: on_save,
                    on_cancel: move |_| editing.set(false),
                }
            }
        };
    }

    rsx! {
        article {
            class: "record-card",
            div {
                class: "record-card-header",
                h2 { class: "record-card-title", "{dream.title}" }
                div {
                    class: "record-card-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Edit dream",
                        onclick: move |_| {
                            submission.reset();
                            editing.set(true);
                        },
                        Icon { icon: FaPen, width: 12, height: 12 }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Delete dream",
                        onclick: move |_| list.request_delete(id.clone()),
                        Icon { icon: FaTrash, width: 12, height: 12 }
                    }
                }
            }
            p { class: "record-card-body", "{dream.body}" }
            p {
                class: "record-card-meta",
                "Dreamed by {dream.author()} \u{2022} {relative(&dream.created)}"
            }
        }
    }
}
