//! # Record models for dreams, letters, and reviews
//!
//! Each record type mirrors one backend collection. The structs are
//! `Serialize + Deserialize` with the backend's wire names, so the same types are
//! returned by [`crate::MemoryBackend`] in tests and by the HTTP client in the app.
//!
//! | Record | Collection | Create payload | Update payload |
//! |--------|-----------|----------------|----------------|
//! | [`Dream`] | `dreams` | [`NewDream`] | [`DreamPatch`] |
//! | [`Letter`] | `letters` | [`NewLetter`] | [`LetterPatch`] |
//! | [`Review`] | `reviews` | [`NewReview`] | [`ReviewPatch`] |
//!
//! Review categories are not a collection of their own; see [`crate::categories`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Author shown when a record carries no author.
pub const ANONYMOUS: &str = "Anonymous";

/// A record stored in one backend collection.
pub trait Record: Clone + PartialEq + DeserializeOwned + 'static {
    /// Backend collection name.
    const COLLECTION: &'static str;
    /// Payload sent when creating a record.
    type Input: Serialize + Clone + 'static;
    /// Payload sent when updating a record.
    type Patch: Serialize + Clone + 'static;

    fn id(&self) -> &str;
    /// Backend creation timestamp, as sent by the backend.
    fn created(&self) -> &str;
}

/// A dream journal entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dream {
    pub id: String,
    pub title: String,
    /// Free-text dream description.
    #[serde(rename = "dream", default)]
    pub body: String,
    /// Display name of the author.
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl Dream {
    pub fn author(&self) -> &str {
        non_blank_or_anonymous(&self.user)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewDream {
    pub title: String,
    #[serde(rename = "dream")]
    pub body: String,
    pub user: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DreamPatch {
    pub title: String,
    #[serde(rename = "dream")]
    pub body: String,
}

impl Record for Dream {
    const COLLECTION: &'static str = "dreams";
    type Input = NewDream;
    type Patch = DreamPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn created(&self) -> &str {
        &self.created
    }
}

/// A letter addressed to someone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub to: String,
    /// Sender; stored as [`ANONYMOUS`] when left blank.
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub content: String,
    /// Id of the user who wrote the letter.
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl Letter {
    pub fn sender(&self) -> &str {
        non_blank_or_anonymous(&self.from)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewLetter {
    pub title: String,
    pub to: String,
    pub from: String,
    pub content: String,
    pub user: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LetterPatch {
    pub title: String,
    pub to: String,
    pub from: String,
    pub content: String,
}

impl Record for Letter {
    const COLLECTION: &'static str = "letters";
    type Input = NewLetter;
    type Patch = LetterPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn created(&self) -> &str {
        &self.created
    }
}

/// A rated review filed under a free-text category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Rating out of 10 in half-point steps.
    #[serde(default)]
    pub rating: f64,
    /// Display name of the author.
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl Review {
    pub fn author(&self) -> &str {
        non_blank_or_anonymous(&self.user)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub category: String,
    pub title: String,
    pub description: String,
    pub rating: f64,
    pub user: String,
}

/// Editable review fields. Owner and category never change after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewPatch {
    pub title: String,
    pub description: String,
    pub rating: f64,
}

impl Record for Review {
    const COLLECTION: &'static str = "reviews";
    type Input = NewReview;
    type Patch = ReviewPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn created(&self) -> &str {
        &self.created
    }
}

fn non_blank_or_anonymous(value: &str) -> &str {
    if value.trim().is_empty() {
        ANONYMOUS
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dream_body_uses_wire_name() {
        let dream: Dream = serde_json::from_str(
            r#"{"id":"d1","title":"Flying","dream":"I flew over the city","user":"U","created":"2025-01-01 10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(dream.body, "I flew over the city");
        assert_eq!(dream.author(), "U");

        let json = serde_json::to_value(DreamPatch {
            title: "t".into(),
            body: "b".into(),
        })
        .unwrap();
        assert_eq!(json["dream"], "b");
    }

    #[test]
    fn blank_authors_render_as_anonymous() {
        let review: Review =
            serde_json::from_str(r#"{"id":"r1","title":"Latte","rating":7.5}"#).unwrap();
        assert_eq!(review.author(), ANONYMOUS);
        assert_eq!(review.category, "");
    }

    #[test]
    fn review_patch_omits_owner_and_category() {
        let json = serde_json::to_value(ReviewPatch {
            title: "t".into(),
            description: "d".into(),
            rating: 4.0,
        })
        .unwrap();
        assert!(json.get("user").is_none());
        assert!(json.get("category").is_none());
    }
}
