//! This crate contains all shared UI for the workspace.
//!
//! Everything here reads the backend client ([`api::PocketBase`]) and the
//! [`store::SiteConfig`] from context; the platform binary provides both.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

mod auth;
pub use auth::{sign_in, sign_out, sign_up, use_auth, use_backend, AuthProvider, AuthState, LogoutButton};

mod guard;
pub use guard::{AuthGate, GuardDecision, ProtectedRoute};

mod list;
pub use list::{use_list_config, use_record_list, RecordList};

mod banner;
pub use banner::{EmptyState, ErrorBanner, LoadingState, StatusBanner};

mod confirm_dialog;
pub use confirm_dialog::ConfirmDelete;

pub mod editors;
pub use editors::{use_submission, CategoryEditor, DreamEditor, LetterEditor, ReviewEditor, Submission};

mod preview;
pub use preview::PreviewUrl;

mod sidebar;
pub use sidebar::{AppSidebar, NavItem};

mod theme;
pub use theme::{apply_theme, load_theme_from_storage, use_theme, Theme, ThemeSelector, ThemeSignal, ThemeToggle};
