//! # API crate — backend client for Munchkin Site
//!
//! Every network call the frontend makes goes through [`PocketBase`], a small REST
//! client for a PocketBase-compatible backend. It implements [`store::RecordSource`],
//! so the generic list lifecycle in `store` drives it the same way tests drive
//! [`store::MemoryBackend`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Observable session store, token expiry, browser persistence, password sign-in and sign-up |
//! | [`client`] | Record CRUD, connectivity probe, profile update with avatar upload, file URLs |
//! | [`error`] | `AuthError` / `RegistrationError` and mapping of HTTP failures onto `BackendError` |
//! | [`models`] | The user model and profile update payloads |

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use auth::{AuthRecord, AuthStore};
pub use client::{PocketBase, AVATAR_THUMB};
pub use error::{AuthError, RegistrationError};
pub use models::{AvatarUpload, ProfileUpdate, UserInfo};
