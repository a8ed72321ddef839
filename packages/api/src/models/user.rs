//! # User records and profile updates
//!
//! [`UserInfo`] is the auth model the backend returns with every token: it is what
//! the auth store persists and what views read the current user from. The backend's
//! `users` collection stores the avatar as a file name; [`crate::PocketBase::file_url`]
//! turns it into a URL.
//!
//! [`ProfileUpdate`] is the single combined change sent by the settings form; the
//! avatar travels as an [`AvatarUpload`] file part.

use serde::{Deserialize, Serialize};

/// A signed-in user as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    /// File name of the avatar within the user's record, empty when unset.
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub verified: bool,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn has_avatar(&self) -> bool {
        !self.avatar.is_empty()
    }
}

/// Avatar image chosen in the settings form.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn mime(&self) -> &'static str {
        mime_for(&self.file_name)
    }
}

/// Image mime type guessed from a file extension.
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Name, email and optionally a new avatar, sent as one update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub avatar: Option<AvatarUpload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_auth_model() {
        let user: UserInfo = serde_json::from_str(
            r#"{"id":"u1","collectionId":"_pb_users_auth_","collectionName":"users","email":"ada@example.com","name":"","avatar":"me_x1.png","verified":true}"#,
        )
        .unwrap();
        assert_eq!(user.collection_id, "_pb_users_auth_");
        assert_eq!(user.display_name(), "ada@example.com");
        assert!(user.has_avatar());
    }

    #[test]
    fn guesses_image_mime() {
        assert_eq!(mime_for("me.PNG"), "image/png");
        assert_eq!(mime_for("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
        assert_eq!(AvatarUpload::new("a.webp", vec![]).mime(), "image/webp");
    }
}
