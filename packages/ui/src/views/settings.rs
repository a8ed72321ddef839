use api::{AvatarUpload, ProfileUpdate, UserInfo, AVATAR_THUMB};
use dioxus::prelude::*;
use store::forms::ProfileForm;

use crate::auth::{use_auth, use_backend};
use crate::banner::{LoadingState, StatusBanner};
use crate::components::{Button, ButtonVariant, Input, Label};
use crate::preview::PreviewUrl;
use crate::theme::ThemeSelector;

/// Account settings: profile, avatar and theme.
#[component]
pub fn SettingsView() -> Element {
    let auth = use_auth();

    let Some(user) = auth().user else {
        return rsx! { LoadingState { message: "Loading profile..." } };
    };

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "Account Settings" }

            section {
                class: "mb-8",
                h2 { class: "view-section-title", "Profile" }
                ProfileSection { key: "{user.id}", user }
            }

            section {
                h2 { class: "view-section-title", "Appearance" }
                ThemeSelector {}
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Status {
    success: bool,
    message: String,
}

#[component]
fn ProfileSection(user: UserInfo) -> Element {
    let client = use_backend();
    let mut form = use_signal({
        let user = user.clone();
        move || ProfileForm {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    });
    let mut avatar = use_signal(|| Option::<AvatarUpload>::None);
    // Replacing the value drops the old preview, which revokes its URL.
    let mut preview = use_signal(|| Option::<PreviewUrl>::None);
    let mut status = use_signal(|| Option::<Status>::None);
    let mut saving = use_signal(|| false);

    let on_pick = move |evt: FormEvent| {
        spawn(async move {
            let Some(engine) = evt.files() else {
                return;
            };
            let Some(name) = engine.files().into_iter().next() else {
                return;
            };
            let Some(bytes) = engine.read_file(&name).await else {
                tracing::warn!("could not read {name}");
                return;
            };
            let upload = AvatarUpload::new(name, bytes);
            preview.set(PreviewUrl::create(&upload));
            avatar.set(Some(upload));
        });
    };

    let on_save = {
        let client = client.clone();
        let id = user.id.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let (name, email) = match form.read().validate() {
                Ok(fields) => fields,
                Err(err) => {
                    status.set(Some(Status {
                        success: false,
                        message: err.to_string(),
                    }));
                    return;
                }
            };
            let client = client.clone();
            let id = id.clone();
            spawn(async move {
                saving.set(true);
                status.set(None);
                let update = ProfileUpdate {
                    name,
                    email,
                    avatar: avatar(),
                };
                let outcome = match client.update_profile(&id, update).await {
                    Ok(_) => {
                        avatar.set(None);
                        preview.set(None);
                        Status {
                            success: true,
                            message: "Profile updated successfully!".to_string(),
                        }
                    }
                    Err(err) => {
                        tracing::error!("Error updating profile: {err}");
                        Status {
                            success: false,
                            message: format!("Failed to update profile: {}", err.describe("update your profile")),
                        }
                    }
                };
                status.set(Some(outcome));
                saving.set(false);
            });
        }
    };

    let current_avatar = match &*preview.read() {
        Some(local) => Some(local.as_str().to_string()),
        None => client.file_url(&user, Some(AVATAR_THUMB)),
    };
    let initial = user
        .display_name()
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    rsx! {
        form {
            class: "record-form",
            onsubmit: on_save,

            div {
                class: "avatar-row mb-4",
                if let Some(src) = current_avatar {
                    img { class: "avatar-large", src: "{src}", alt: "Avatar" }
                } else {
                    div { class: "avatar-large avatar-fallback", "{initial}" }
                }
                div {
                    Label { html_for: "settings-avatar", "Avatar" }
                    input {
                        id: "settings-avatar",
                        class: "field-input mt-1.5",
                        r#type: "file",
                        accept: "image/*",
                        onchange: on_pick,
                    }
                }
            }

            div {
                class: "mb-4",
                Label { html_for: "settings-name", "Name" }
                Input {
                    id: "settings-name",
                    class: "w-full mt-1.5",
                    value: form.read().name.clone(),
                    required: true,
                    oninput: move |evt: FormEvent| form.write().name = evt.value(),
                }
            }
            div {
                class: "mb-4",
                Label { html_for: "settings-email", "Email" }
                Input {
                    id: "settings-email",
                    class: "w-full mt-1.5",
                    r#type: "email",
                    value: form.read().email.clone(),
                    required: true,
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }
            }

            if let Some(Status { success, message }) = status() {
                StatusBanner { success, message }
            }

            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled: saving(),
                if saving() { "Saving..." } else { "Save Changes" }
            }
        }
    }
}
