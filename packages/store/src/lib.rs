pub mod categories;
pub mod config;
pub mod confirm;
pub mod error;
pub mod forms;
pub mod lifecycle;
pub mod models;
pub mod query;
pub mod source;
pub mod time;

mod memory;
pub use memory::MemoryBackend;

pub use categories::{summarize, CategorySummary};
pub use config::SiteConfig;
pub use confirm::{ConfirmPhase, DeleteConfirm};
pub use error::{BackendError, Banner, ErrorKind};
pub use lifecycle::{Action, Lifecycle, ListSpec, ListState, Phase, RefreshPolicy, Scope, StateCell};
pub use models::{Dream, Letter, Record, Review};
pub use query::{Filter, ListQuery, Page};
pub use source::RecordSource;
