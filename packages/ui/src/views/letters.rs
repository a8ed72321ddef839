use dioxus::prelude::*;
use store::forms::LetterForm;
use store::time::relative;
use store::{Action, Letter, ListSpec};

use crate::auth::use_auth;
use crate::banner::{EmptyState, ErrorBanner, LoadingState};
use crate::components::Button;
use crate::editors::{use_submission, LetterEditor};
use crate::icons::FaPlus;
use crate::list::{use_list_config, use_record_list};
use crate::views::ModalOverlay;
use crate::Icon;

/// Characters of a letter shown on its card.
const PREVIEW_CHARS: usize = 150;

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

/// Grid of letters; selecting one calls `on_open` with its id.
#[component]
pub fn LettersView(on_open: EventHandler<String>) -> Element {
    let lists = use_list_config();
    let list = use_record_list::<Letter>(move || ListSpec::letters(&lists));
    let auth = use_auth();
    let mut show_add = use_signal(|| false);
    let submission = use_submission();

    let on_create = move |form: LetterForm| {
        let author_id = auth().user.map(|u| u.id).unwrap_or_default();
        let input = match form.to_new(&author_id) {
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
                h1 { class: "view-title", "Letters" }
                Button {
                    onclick: move |_| {
                        submission.reset();
                        show_add.set(true);
                    },
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Write Letter"
                }
            }

            if show_add() {
                ModalOverlay {
                    title: "Write a Letter",
                    on_close: move |_| show_add.set(false),
                    LetterEditor {
                        submit_label: "Send Letter",
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
                LoadingState { message: "Loading letters..." }
            } else if state.items.is_empty() && state.error.is_none() {
                EmptyState { message: "No letters found. Write your first letter!" }
            } else {
                div {
                    class: "card-grid",
                    for letter in state.items.iter() {
                        LetterCard {
                            key: "{letter.id}",
                            letter: letter.clone(),
                            on_open,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LetterCard(letter: Letter, on_open: EventHandler<String>) -> Element {
    let id = letter.id.clone();

    rsx! {
        article {
            class: "record-card clickable",
            onclick: move |_| on_open.call(id.clone()),
            h2 { class: "record-card-title", "{letter.title}" }
            p { class: "record-card-meta", "To: {letter.to}" }
            p { class: "record-card-meta", "From: {letter.sender()}" }
            p { class: "record-card-body", "{preview(&letter.content)}" }
            p { class: "record-card-meta", "{relative(&letter.created)}" }
        }
    }
}
