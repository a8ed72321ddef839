use dioxus::prelude::*;
use store::forms::CategoryForm;
use store::{summarize, Action, CategorySummary, ListSpec, Review};

use crate::auth::use_auth;
use crate::banner::{EmptyState, ErrorBanner, LoadingState};
use crate::components::Button;
use crate::editors::{use_submission, CategoryEditor};
use crate::icons::FaPlus;
use crate::list::{use_list_config, use_record_list};
use crate::views::ModalOverlay;
use crate::Icon;

/// Category overview derived from the scanned reviews.
#[component]
pub fn ReviewsView(on_open_category: EventHandler<String>) -> Element {
    let lists = use_list_config();
    let list = use_record_list::<Review>(move || ListSpec::review_scan(&lists));
    let auth = use_auth();
    let mut show_add = use_signal(|| false);
    let submission = use_submission();

    let on_create = move |form: CategoryForm| {
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
                // Counts and averages come from a fresh scan.
                list.refresh();
            }
        });
    };

    let state = list.state.read();
    let categories = summarize(&state.items);
    let banner = list.banner();

    rsx! {
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Review Categories" }
                Button {
                    onclick: move |_| {
                        submission.reset();
                        show_add.set(true);
                    },
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Add Category"
                }
            }

            if show_add() {
                ModalOverlay {
                    title: "Add New Category",
                    on_close: move |_| show_add.set(false),
                    CategoryEditor {
                        submission,
                        on_submit: on_create,
                        on_cancel: move |_| show_add.set(false),
                    }
                }
            }

            if let Some(banner) = banner {
                ErrorBanner { banner, on_retry: move |_| list.refresh() }
            }

            if state.is_loading() && categories.is_empty() {
                LoadingState { message: "Loading categories..." }
            } else if categories.is_empty() && state.error.is_none() {
                EmptyState { message: "No categories found. Add your first category!" }
            } else {
                div {
                    class: "card-grid",
                    for summary in categories {
                        CategoryCard {
                            key: "{summary.name}",
                            summary,
                            on_open: on_open_category,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CategoryCard(summary: CategorySummary, on_open: EventHandler<String>) -> Element {
    let name = summary.name.clone();

    rsx! {
        article {
            class: "record-card clickable",
            onclick: move |_| on_open.call(name.clone()),
            h2 { class: "record-card-title", "{summary.name}" }
            p { class: "record-card-meta", "{summary.count_label()}" }
            p { class: "category-average", "Average: {summary.average_label()}" }
        }
    }
}
