use dioxus::prelude::*;
use store::categories::{average_rating, format_rating};
use store::forms::ReviewForm;
use store::time::relative;
use store::{Action, ListSpec, Review};

use crate::auth::use_auth;
use crate::banner::{EmptyState, ErrorBanner, LoadingState};
use crate::components::{Button, ButtonVariant};
use crate::confirm_dialog::ConfirmDelete;
use crate::editors::{use_submission, ReviewEditor};
use crate::icons::{FaArrowLeft, FaPen, FaPlus, FaTrash};
use crate::list::{use_list_config, use_record_list, RecordList};
use crate::views::ModalOverlay;
use crate::Icon;

/// Reviews filed under one category.
///
/// The category is read once on mount; give the component a `key` so that
/// switching categories remounts it.
#[component]
pub fn CategoryReviewsView(category: String, on_back: EventHandler<()>) -> Element {
    let lists = use_list_config();
    let list = use_record_list::<Review>({
        let category = category.clone();
        move || ListSpec::category_reviews(&category, &lists)
    });
    let auth = use_auth();
    let mut show_add = use_signal(|| false);
    let submission = use_submission();

    let on_create = {
        let category = category.clone();
        move |form: ReviewForm| {
            let author = auth()
                .user
                .map(|u| u.display_name().to_string())
                .unwrap_or_default();
            let input = match form.to_new(&category, &author) {
                Ok(input) => input,
                Err(err) => return submission.fail(err),
            };
            spawn(async move {
                let action = list.action(Action::Add);
                if submission.run(&action, list.create(input)).await.is_some() {
                    show_add.set(false);
                }
            });
        }
    };

    let state = list.state.read();
    let banner = list.banner();
    let average = format_rating(average_rating(&state.items));

    rsx! {
        div {
            class: "view-page",
            Button {
                variant: ButtonVariant::Ghost,
                onclick: move |_| on_back.call(()),
                Icon { icon: FaArrowLeft, width: 12, height: 12 }
                " Back to Categories"
            }
            div {
                class: "view-header",
                div {
                    h1 { class: "view-title", "{category}" }
                    if !state.items.is_empty() {
                        p { class: "category-average", "Average Rating: {average}/10" }
                    }
                }
                Button {
                    onclick: move |_| {
                        submission.reset();
                        show_add.set(true);
                    },
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Add Review"
                }
            }

            if show_add() {
                ModalOverlay {
                    title: "Add Review to {category}",
                    on_close: move |_| show_add.set(false),
                    ReviewEditor {
                        submit_label: "Add Review",
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
                LoadingState { message: "Loading reviews..." }
            } else if state.items.is_empty() && state.error.is_none() {
                EmptyState { message: "No reviews found for this category. Add your first review!" }
            } else {
                div {
                    class: "record-list",
                    for review in state.items.iter() {
                        ReviewCard { key: "{review.id}", review: review.clone(), list }
                    }
                }
            }

            ConfirmDelete {
                confirm: list.confirm,
                item: "review",
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
fn ReviewCard(review: Review, list: RecordList<Review>) -> Element {
    let mut editing = use_signal(|| false);
    let submission = use_submission();
    let id = review.id.clone();

    if editing() {
        let on_save = move |form: ReviewForm| {
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
                ReviewEditor {
                    initial: ReviewForm::from_review(&review),
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
                h2 { class: "record-card-title", "{review.title}" }
                span { class: "rating-badge", "{format_rating(review.rating)}/10" }
            }
            if !review.description.is_empty() {
                p { class: "record-card-body", "{review.description}" }
            }
            div {
                class: "record-card-footer",
                p {
                    class: "record-card-meta",
                    "By {review.author()} \u{2022} {relative(&review.created)}"
                }
                div {
                    class: "record-card-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Edit review",
                        onclick: move |_| {
                            submission.reset();
                            editing.set(true);
                        },
                        Icon { icon: FaPen, width: 12, height: 12 }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Delete review",
                        onclick: move |_| list.request_delete(id.clone()),
                        Icon { icon: FaTrash, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}
