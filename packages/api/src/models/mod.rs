//! Data models for the application.

mod user;

pub use user::{mime_for, AvatarUpload, ProfileUpdate, UserInfo};
