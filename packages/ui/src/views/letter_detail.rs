//! A single letter: read, edit in place, delete with confirmation.

use dioxus::prelude::*;
use store::forms::LetterForm;
use store::time::long_date;
use store::{Action, BackendError, DeleteConfirm, Letter, ListSpec, RecordSource};

use crate::auth::use_backend;
use crate::banner::{ErrorBanner, LoadingState};
use crate::components::{Button, ButtonVariant};
use crate::confirm_dialog::ConfirmDelete;
use crate::editors::{use_submission, LetterEditor};
use crate::icons::{FaArrowLeft, FaPen, FaTrash};
use crate::list::use_list_config;
use crate::Icon;

#[derive(Clone, Debug, PartialEq)]
enum Loaded {
    Loading,
    Found(Letter),
    Failed(BackendError),
}

#[component]
pub fn LetterDetailView(id: String, on_back: EventHandler<()>, on_deleted: EventHandler<()>) -> Element {
    let client = use_backend();
    let lists = use_list_config();
    let spec = use_hook(move || ListSpec::letters(&lists));
    let mut letter = use_signal(|| Loaded::Loading);
    let mut editing = use_signal(|| false);
    let mut confirm = use_signal(DeleteConfirm::default);
    let submission = use_submission();

    let load = {
        let client = client.clone();
        let id = id.clone();
        move || {
            let client = client.clone();
            let id = id.clone();
            spawn(async move {
                letter.set(Loaded::Loading);
                let loaded = match client.get_one::<Letter>(&id).await {
                    Ok(found) => Loaded::Found(found),
                    Err(err) => {
                        tracing::error!("Error fetching letter {id}: {err}");
                        Loaded::Failed(err)
                    }
                };
                letter.set(loaded);
            });
        }
    };

    use_hook({
        let load = load.clone();
        move || {
            load();
        }
    });

    let on_save = {
        let client = client.clone();
        let id = id.clone();
        let action = spec.action(Action::Update);
        move |form: LetterForm| {
            let patch = match form.to_patch() {
                Ok(patch) => patch,
                Err(err) => return submission.fail(err),
            };
            let client = client.clone();
            let id = id.clone();
            let action = action.clone();
            spawn(async move {
                if let Some(updated) = submission
                    .run(&action, client.update::<Letter>(&id, &patch))
                    .await
                {
                    letter.set(Loaded::Found(updated));
                    editing.set(false);
                }
            });
        }
    };

    let on_confirm_delete = {
        let client = client.clone();
        move |_: ()| {
            let client = client.clone();
            spawn(async move {
                let Some(id) = confirm.write().begin() else {
                    return;
                };
                let result = client.delete::<Letter>(&id).await;
                if let Err(err) = &result {
                    tracing::error!("Error deleting letter {id}: {err}");
                }
                let deleted = result.is_ok();
                confirm.write().finish(result);
                if deleted {
                    on_deleted.call(());
                }
            });
        }
    };

    let back = rsx! {
        Button {
            variant: ButtonVariant::Ghost,
            onclick: move |_| on_back.call(()),
            Icon { icon: FaArrowLeft, width: 12, height: 12 }
            " Back to Letters"
        }
    };

    let current = letter();
    let body = match current {
        Loaded::Loading => rsx! { LoadingState { message: "Loading letter..." } },
        Loaded::Failed(err) if err.status == 404 => rsx! {
            div { class: "empty-state", p { "Letter not found" } }
        },
        Loaded::Failed(err) => rsx! {
            ErrorBanner {
                banner: err.banner(&spec.action(Action::View)),
                on_retry: move |_| {
                    load();
                },
            }
        },
        Loaded::Found(found) if editing() => rsx! {
            div {
                class: "record-card",
                LetterEditor {
                    initial: LetterForm::from_letter(&found),
                    submission,
                    on_submit: on_save,
                    on_cancel: move |_| editing.set(false),
                }
            }
        },
        Loaded::Found(found) => {
            let target = found.id.clone();
            rsx! {
                article {
                    class: "letter",
                    div {
                        class: "record-card-header",
                        h1 { class: "view-title", "{found.title}" }
                        div {
                            class: "record-card-actions",
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| {
                                    submission.reset();
                                    editing.set(true);
                                },
                                Icon { icon: FaPen, width: 12, height: 12 }
                                " Edit"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: move |_| confirm.write().request(target.clone()),
                                Icon { icon: FaTrash, width: 12, height: 12 }
                                " Delete"
                            }
                        }
                    }
                    p { class: "record-card-meta", "To: {found.to}" }
                    p { class: "record-card-meta", "From: {found.sender()}" }
                    p { class: "record-card-meta", "{long_date(&found.created)}" }
                    div { class: "letter-content", "{found.content}" }
                }
            }
        }
    };

    rsx! {
        div {
            class: "view-page",
            {back}
            {body}
            ConfirmDelete {
                confirm,
                item: "letter",
                action: spec.action(Action::Delete),
                on_confirm: on_confirm_delete,
                on_cancel: move |_| confirm.write().cancel(),
            }
        }
    }
}
