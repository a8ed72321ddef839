//! Form input and validation for every editable record.
//!
//! Forms hold raw text as typed; `to_new`/`to_patch` trim and validate it and
//! produce the payload sent to the backend.

use thiserror::Error;

use crate::models::{
    DreamPatch, LetterPatch, NewDream, NewLetter, NewReview, ReviewPatch, ANONYMOUS,
};

/// Rating a new review starts at.
pub const DEFAULT_RATING: f64 = 7.0;
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please enter a {0}")]
    Missing(&'static str),
    #[error("Rating must be between 0 and 10 in steps of 0.5")]
    Rating,
    #[error("Please enter a valid email address")]
    Email,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    Password,
}

fn required(value: &str, name: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(name))
    } else {
        Ok(trimmed.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DreamForm {
    pub title: String,
    pub body: String,
}

impl DreamForm {
    pub fn from_dream(dream: &crate::models::Dream) -> Self {
        Self {
            title: dream.title.clone(),
            body: dream.body.clone(),
        }
    }

    pub fn to_patch(&self) -> Result<DreamPatch, FormError> {
        let title = self.title.trim();
        let body = self.body.trim();
        if title.is_empty() || body.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(DreamPatch {
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    /// `author` is the current user's display name.
    pub fn to_new(&self, author: &str) -> Result<NewDream, FormError> {
        let DreamPatch { title, body } = self.to_patch()?;
        Ok(NewDream {
            title,
            body,
            user: author.to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LetterForm {
    pub title: String,
    pub to: String,
    pub from: String,
    pub content: String,
}

impl LetterForm {
    pub fn from_letter(letter: &crate::models::Letter) -> Self {
        Self {
            title: letter.title.clone(),
            to: letter.to.clone(),
            from: letter.from.clone(),
            content: letter.content.clone(),
        }
    }

    pub fn to_patch(&self) -> Result<LetterPatch, FormError> {
        let title = self.title.trim();
        let to = self.to.trim();
        let content = self.content.trim();
        if title.is_empty() || to.is_empty() || content.is_empty() {
            return Err(FormError::MissingFields);
        }
        let from = match self.from.trim() {
            "" => ANONYMOUS,
            from => from,
        };
        Ok(LetterPatch {
            title: title.to_string(),
            to: to.to_string(),
            from: from.to_string(),
            content: content.to_string(),
        })
    }

    /// `author_id` is the current user's record id.
    pub fn to_new(&self, author_id: &str) -> Result<NewLetter, FormError> {
        let LetterPatch {
            title,
            to,
            from,
            content,
        } = self.to_patch()?;
        Ok(NewLetter {
            title,
            to,
            from,
            content,
            user: author_id.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewForm {
    pub title: String,
    pub description: String,
    pub rating: f64,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            rating: DEFAULT_RATING,
        }
    }
}

/// Whether `rating` is within 0..=10 in half-point steps.
pub fn valid_rating(rating: f64) -> bool {
    (0.0..=10.0).contains(&rating) && (rating * 2.0).fract() == 0.0
}

impl ReviewForm {
    pub fn from_review(review: &crate::models::Review) -> Self {
        Self {
            title: review.title.clone(),
            description: review.description.clone(),
            rating: review.rating,
        }
    }

    pub fn to_patch(&self) -> Result<ReviewPatch, FormError> {
        let title = required(&self.title, "title")?;
        if !valid_rating(self.rating) {
            return Err(FormError::Rating);
        }
        Ok(ReviewPatch {
            title,
            description: self.description.trim().to_string(),
            rating: self.rating,
        })
    }

    pub fn to_new(&self, category: &str, author: &str) -> Result<NewReview, FormError> {
        let category = required(category, "category")?;
        let ReviewPatch {
            title,
            description,
            rating,
        } = self.to_patch()?;
        Ok(NewReview {
            category,
            title,
            description,
            rating,
            user: author.to_string(),
        })
    }
}

/// Creating a category means creating its first review.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryForm {
    pub category: String,
    pub review: ReviewForm,
}

impl CategoryForm {
    pub fn to_new(&self, author: &str) -> Result<NewReview, FormError> {
        self.review.to_new(&self.category, author)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validated registration fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, FormError> {
        let name = required(&self.name, "name")?;
        let email = self.email.trim();
        if !email.contains('@') {
            return Err(FormError::Email);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::Password);
        }
        Ok(Registration {
            name,
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

impl ProfileForm {
    /// Trimmed `(name, email)`.
    pub fn validate(&self) -> Result<(String, String), FormError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok((name.to_string(), email.to_string()))
    }
}
