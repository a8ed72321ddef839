//! Create/edit forms for dreams, letters, reviews and categories.
//!
//! Editors hold the raw field text and check it with the `store::forms` validators
//! before handing the form to `on_submit`. The owning view performs the backend
//! call and reports progress back through `busy` and `error`.

use std::future::Future;

use dioxus::prelude::*;
use store::forms::{CategoryForm, DreamForm, FormError, LetterForm, ReviewForm};
use store::BackendError;

use crate::components::{Button, ButtonVariant, Input, Label, Textarea};

/// In-flight flag and error slot for one form.
#[derive(Clone, Copy, PartialEq)]
pub struct Submission {
    pub busy: Signal<bool>,
    pub error: Signal<Option<String>>,
}

pub fn use_submission() -> Submission {
    Submission {
        busy: use_signal(|| false),
        error: use_signal(|| None),
    }
}

impl Submission {
    /// Run `call` with the busy flag raised. A failure is rendered for `action`
    /// and stored in `error`.
    pub async fn run<T>(
        self,
        action: &str,
        call: impl Future<Output = Result<T, BackendError>>,
    ) -> Option<T> {
        let Submission { mut busy, mut error } = self;
        if busy() {
            return None;
        }
        busy.set(true);
        error.set(None);
        let result = call.await;
        busy.set(false);
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!("Failed to {action}: {err}");
                error.set(Some(err.describe(action)));
                None
            }
        }
    }

    pub fn fail(self, err: FormError) {
        let mut error = self.error;
        error.set(Some(err.to_string()));
    }

    pub fn reset(self) {
        let Submission { mut busy, mut error } = self;
        busy.set(false);
        error.set(None);
    }
}

fn form_alert(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            div { class: "form-error", role: "alert", "{message}" }
        }
    }
}

fn form_actions(
    submit_label: &str,
    busy_label: &str,
    busy: bool,
    on_cancel: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        div {
            class: "flex gap-2 mt-5",
            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled: busy,
                if busy { "{busy_label}" } else { "{submit_label}" }
            }
            if let Some(cancel) = on_cancel {
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: busy,
                    onclick: move |_| cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
pub fn DreamEditor(
    #[props(default)] initial: DreamForm,
    #[props(default = "Save Dream".to_string())] submit_label: String,
    submission: Submission,
    on_submit: EventHandler<DreamForm>,
    on_cancel: Option<EventHandler<()>>,
) -> Element {
    let mut form = use_signal(move || initial);
    let error = (submission.error)();

    rsx! {
        form {
            class: "record-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let current = form();
                match current.to_patch() {
                    Ok(_) => on_submit.call(current),
                    Err(err) => submission.fail(err),
                }
            },
            div {
                class: "mb-4",
                Label { html_for: "dream-title", "Title" }
                Input {
                    id: "dream-title",
                    class: "w-full mt-1.5",
                    placeholder: "Dream title",
                    value: form.read().title.clone(),
                    required: true,
                    oninput: move |evt: FormEvent| form.write().title = evt.value(),
                }
            }
            div {
                class: "mb-4",
                Label { html_for: "dream-body", "Dream" }
                Textarea {
                    id: "dream-body",
                    class: "w-full mt-1.5",
                    placeholder: "Describe your dream...",
                    value: form.read().body.clone(),
                    rows: 6,
                    required: true,
                    oninput: move |evt: FormEvent| form.write().body = evt.value(),
                }
            }
            {form_alert(error)}
            {form_actions(&submit_label, "Saving...", (submission.busy)(), on_cancel)}
        }
    }
}

#[component]
pub fn LetterEditor(
    #[props(default)] initial: LetterForm,
    #[props(default = "Save Letter".to_string())] submit_label: String,
    submission: Submission,
    on_submit: EventHandler<LetterForm>,
    on_cancel: Option<EventHandler<()>>,
) -> Element {
    let mut form = use_signal(move || initial);
    let error = (submission.error)();

    rsx! {
        form {
            class: "record-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let current = form();
                match current.to_patch() {
                    Ok(_) => on_submit.call(current),
                    Err(err) => submission.fail(err),
                }
            },
            div {
                class: "mb-4",
                Label { html_for: "letter-title", "Title" }
                Input {
                    id: "letter-title",
                    class: "w-full mt-1.5",
                    placeholder: "Letter title",
                    value: form.read().title.clone(),
                    required: true,
                    oninput: move |evt: FormEvent| form.write().title = evt.value(),
                }
            }
            div {
                class: "grid grid-cols-2 gap-3 mb-4",
                div {
                    Label { html_for: "letter-to", "To" }
                    Input {
                        id: "letter-to",
                        class: "w-full mt-1.5",
                        placeholder: "Recipient",
                        value: form.read().to.clone(),
                        required: true,
                        oninput: move |evt: FormEvent| form.write().to = evt.value(),
                    }
                }
                div {
                    Label { html_for: "letter-from", "From" }
                    Input {
                        id: "letter-from",
                        class: "w-full mt-1.5",
                        placeholder: "Anonymous",
                        value: form.read().from.clone(),
                        oninput: move |evt: FormEvent| form.write().from = evt.value(),
                    }
                }
            }
            div {
                class: "mb-4",
                Label { html_for: "letter-content", "Content" }
                Textarea {
                    id: "letter-content",
                    class: "w-full mt-1.5",
                    placeholder: "Write your letter...",
                    value: form.read().content.clone(),
                    rows: 8,
                    required: true,
                    oninput: move |evt: FormEvent| form.write().content = evt.value(),
                }
            }
            {form_alert(error)}
            {form_actions(&submit_label, "Saving...", (submission.busy)(), on_cancel)}
        }
    }
}

/// Title, description and rating fields, shared by the review and category editors.
#[component]
fn ReviewFields(form: Signal<ReviewForm>, rating_text: Signal<String>) -> Element {
    rsx! {
        div {
            class: "mb-4",
            Label { html_for: "review-title", "Title" }
            Input {
                id: "review-title",
                class: "w-full mt-1.5",
                placeholder: "Review title",
                value: form.read().title.clone(),
                required: true,
                oninput: move |evt: FormEvent| form.write().title = evt.value(),
            }
        }
        div {
            class: "mb-4",
            Label { html_for: "review-description", "Description" }
            Textarea {
                id: "review-description",
                class: "w-full mt-1.5",
                placeholder: "What did you think?",
                value: form.read().description.clone(),
                rows: 4,
                oninput: move |evt: FormEvent| form.write().description = evt.value(),
            }
        }
        div {
            class: "mb-4",
            Label { html_for: "review-rating", "Rating (0-10)" }
            Input {
                id: "review-rating",
                class: "w-full mt-1.5",
                r#type: "number",
                min: "0",
                max: "10",
                step: "0.5",
                value: rating_text(),
                oninput: move |evt: FormEvent| rating_text.set(evt.value()),
            }
        }
    }
}

/// Rating as typed; unparsable text fails the rating check.
fn parse_rating(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

#[component]
pub fn ReviewEditor(
    #[props(default)] initial: ReviewForm,
    #[props(default = "Save Review".to_string())] submit_label: String,
    submission: Submission,
    on_submit: EventHandler<ReviewForm>,
    on_cancel: Option<EventHandler<()>>,
) -> Element {
    let rating = initial.rating;
    let form = use_signal(move || initial);
    let rating_text = use_signal(move || rating.to_string());
    let error = (submission.error)();

    rsx! {
        form {
            class: "record-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let current = ReviewForm {
                    rating: parse_rating(&rating_text()),
                    ..form()
                };
                match current.to_patch() {
                    Ok(_) => on_submit.call(current),
                    Err(err) => submission.fail(err),
                }
            },
            ReviewFields { form, rating_text }
            {form_alert(error)}
            {form_actions(&submit_label, "Saving...", (submission.busy)(), on_cancel)}
        }
    }
}

/// New category: a category name plus its first review.
#[component]
pub fn CategoryEditor(
    submission: Submission,
    on_submit: EventHandler<CategoryForm>,
    on_cancel: Option<EventHandler<()>>,
) -> Element {
    let mut category = use_signal(String::new);
    let form = use_signal(ReviewForm::default);
    let rating_text = use_signal(|| ReviewForm::default().rating.to_string());
    let error = (submission.error)();

    rsx! {
        form {
            class: "record-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let current = CategoryForm {
                    category: category(),
                    review: ReviewForm {
                        rating: parse_rating(&rating_text()),
                        ..form()
                    },
                };
                // Author is stamped by the caller; validate the fields only.
                match current.to_new("") {
                    Ok(_) => on_submit.call(current),
                    Err(err) => submission.fail(err),
                }
            },
            div {
                class: "mb-4",
                Label { html_for: "category-name", "Category" }
                Input {
                    id: "category-name",
                    class: "w-full mt-1.5",
                    placeholder: "e.g. Coffee",
                    value: category(),
                    required: true,
                    oninput: move |evt: FormEvent| category.set(evt.value()),
                }
            }
            p { class: "view-muted mb-4", "Every category starts with its first review." }
            ReviewFields { form, rating_text }
            {form_alert(error)}
            {form_actions("Add Category", "Adding...", (submission.busy)(), on_cancel)}
        }
    }
}
