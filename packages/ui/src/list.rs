//! The record-list hook shared by every resource view.
//!
//! [`use_record_list`] owns a [`ListState`] and a [`DeleteConfirm`] in signals and
//! runs the [`Lifecycle`] flows against them. Signal writes happen only between
//! awaits, never across one.

use api::PocketBase;
use dioxus::prelude::*;
use store::config::ListConfig;
use store::{
    Action, BackendError, Banner, DeleteConfirm, Lifecycle, ListSpec, ListState, Record, SiteConfig,
    StateCell,
};

use crate::auth::use_backend;

/// Handle to one view's list. `Copy`, so it moves freely into event handlers.
pub struct RecordList<R: Record> {
    pub state: Signal<ListState<R>>,
    pub confirm: Signal<DeleteConfirm>,
    lifecycle: Signal<Lifecycle<PocketBase>>,
}

impl<R: Record> Clone for RecordList<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for RecordList<R> {}

impl<R: Record> PartialEq for RecordList<R> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.confirm == other.confirm
    }
}

/// List sizes from the [`SiteConfig`] provided at the root.
pub fn use_list_config() -> ListConfig {
    use_context::<SiteConfig>().lists
}

/// List state for `spec`, fetched once on mount.
pub fn use_record_list<R: Record>(spec: impl FnOnce() -> ListSpec) -> RecordList<R> {
    let client = use_backend();
    let lifecycle = use_signal(move || Lifecycle::new(client, spec()));
    let state = use_signal(ListState::<R>::new);
    let confirm = use_signal(DeleteConfirm::default);
    let list = RecordList {
        state,
        confirm,
        lifecycle,
    };
    use_hook(move || list.refresh());
    list
}

/// A signal as a [`StateCell`]: one short write per transition, none held across an await.
struct SignalCell<T: 'static>(Signal<T>);

impl<T: 'static> StateCell<T> for SignalCell<T> {
    fn update<O>(&mut self, f: impl FnOnce(&mut T) -> O) -> O {
        let mut value = self.0.write();
        f(&mut *value)
    }
}

impl<R: Record> RecordList<R> {
    fn lifecycle(&self) -> Lifecycle<PocketBase> {
        self.lifecycle.peek().clone()
    }

    pub fn spec(&self) -> ListSpec {
        self.lifecycle.peek().spec().clone()
    }

    /// Phrase for permission messages, e.g. "add letters".
    pub fn action(&self, action: Action) -> String {
        self.lifecycle.peek().spec().action(action)
    }

    /// Run a fetch cycle. A response that lost the race to a newer fetch is dropped.
    pub async fn fetch(self) {
        if let Err(err) = self.lifecycle().fetch(SignalCell(self.state)).await {
            tracing::error!("Error fetching {}: {err}", R::COLLECTION);
        }
    }

    /// Re-fetch in the background (initial load, retry, refresh).
    pub fn refresh(self) {
        spawn(self.fetch());
    }

    /// Create a record and put it at the head of the list.
    pub async fn create(self, input: R::Input) -> Result<R, BackendError> {
        self.lifecycle().create(SignalCell(self.state), &input).await
    }

    /// Update a record, then patch the list in place or re-fetch it.
    pub async fn edit(self, id: String, patch: R::Patch) -> Result<R, BackendError> {
        self.lifecycle()
            .update(SignalCell(self.state), &id, &patch)
            .await
    }

    /// Open the delete confirmation for `id`.
    pub fn request_delete(self, id: String) {
        let mut confirm = self.confirm;
        confirm.write().request(id);
    }

    pub fn cancel_delete(self) {
        let mut confirm = self.confirm;
        confirm.write().cancel();
    }

    /// Delete the record the confirmation is open for. No-op unless it is open.
    pub async fn confirm_delete(self) -> Option<String> {
        let result = self
            .lifecycle()
            .delete(SignalCell(self.state), SignalCell(self.confirm))
            .await;
        match result {
            Ok(deleted) => deleted,
            Err(err) => {
                tracing::error!("Error deleting from {}: {err}", R::COLLECTION);
                None
            }
        }
    }

    /// Error banner for the last fetch.
    pub fn banner(&self) -> Option<Banner> {
        self.state.read().banner(&self.action(Action::View))
    }
}
