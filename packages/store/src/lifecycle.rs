//! # Generic record-list lifecycle
//!
//! Every resource page (dreams, letters, reviews in a category, the category
//! overview) runs the same loop: fetch a list, render it, mutate it after create,
//! edit and delete. This module holds that loop once.
//!
//! - [`ListSpec`] names what to fetch and how a page reacts to edits.
//! - [`ListState`] is the per-view state machine. Its transitions are synchronous
//!   so the UI can apply them to a signal between awaits.
//! - [`Lifecycle`] drives a [`RecordSource`] and applies the results to a state
//!   held in any [`StateCell`]: a plain `&mut` in tests, a signal in the UI.
//!
//! ```text
//! Idle ──begin_fetch──▶ Loading ──finish_fetch(Ok)──▶ Ready
//!                          ▲    ╰─finish_fetch(Err)─▶ Errored
//!                          ╰──────begin_fetch─────────╯ (refresh / retry)
//! ```
//!
//! Each fetch is tagged with a [`FetchTicket`]; a response whose ticket is not the
//! latest issued is dropped so a slow early response cannot overwrite newer data.

use tracing::{debug, info, warn};

use crate::config::ListConfig;
use crate::confirm::DeleteConfirm;
use crate::error::{Banner, BackendError};
use crate::models::Record;
use crate::query::{Filter, ListQuery};
use crate::source::RecordSource;

/// How much of the collection a view loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// A single page as described by the query.
    Page,
    /// Every matching record.
    Full,
}

/// What a view does with its list after a successful edit or delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshPolicy {
    PatchLocally,
    Refetch,
}

/// The user action a failure message refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    View,
    Add,
    Update,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListSpec {
    pub query: ListQuery,
    pub scope: Scope,
    pub after_edit: RefreshPolicy,
    /// Probe the backend before fetching so "unreachable" is reported as such.
    pub probe_health: bool,
    /// Plural noun for messages ("dreams").
    pub noun: &'static str,
    /// Singular noun for messages ("dream").
    pub item: &'static str,
}

impl ListSpec {
    /// All dreams, newest first, re-fetched after every edit or delete.
    pub fn dreams() -> Self {
        Self {
            query: ListQuery::newest_first(),
            scope: Scope::Full,
            after_edit: RefreshPolicy::Refetch,
            probe_health: true,
            noun: "dreams",
            item: "dream",
        }
    }

    /// First page of letters, newest first.
    pub fn letters(lists: &ListConfig) -> Self {
        Self {
            query: ListQuery::newest_first().with_per_page(lists.page_size),
            scope: Scope::Page,
            after_edit: RefreshPolicy::PatchLocally,
            probe_health: true,
            noun: "letters",
            item: "letter",
        }
    }

    /// First page of the reviews filed under `category`.
    pub fn category_reviews(category: &str, lists: &ListConfig) -> Self {
        Self {
            query: ListQuery::newest_first()
                .with_per_page(lists.page_size)
                .with_filter(Filter::equals("category", category)),
            scope: Scope::Page,
            after_edit: RefreshPolicy::PatchLocally,
            probe_health: true,
            noun: "reviews",
            item: "review",
        }
    }

    /// The reviews scanned to derive the category overview.
    pub fn review_scan(lists: &ListConfig) -> Self {
        Self {
            query: ListQuery::default().with_per_page(lists.category_scan_limit),
            scope: Scope::Page,
            after_edit: RefreshPolicy::Refetch,
            probe_health: true,
            noun: "categories",
            item: "review",
        }
    }

    /// Phrase completing "You do not have permission to ...".
    pub fn action(&self, action: Action) -> String {
        match action {
            Action::View => format!("view these {}", self.noun),
            Action::Add => format!("add {}", self.noun),
            Action::Update => format!("update this {}", self.item),
            Action::Delete => format!("delete this {}", self.item),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

/// Issued by [`ListState::begin_fetch`]; only the latest ticket may finish a fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct ListState<R> {
    pub items: Vec<R>,
    pub phase: Phase,
    pub error: Option<BackendError>,
    issued: u64,
    /// Records created while the current fetch is in flight.
    created_during_fetch: Vec<R>,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            phase: Phase::Idle,
            error: None,
            issued: 0,
            created_during_fetch: Vec::new(),
        }
    }
}

impl<R: Record> ListState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.phase = Phase::Loading;
        self.error = None;
        self.created_during_fetch.clear();
        FetchTicket(self.issued)
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and the result was dropped.
    ///
    /// Records created after the request went out stay at the head even if the
    /// response does not contain them yet.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<R>, BackendError>) -> bool {
        if ticket.0 != self.issued || self.phase != Phase::Loading {
            debug!(ticket = ticket.0, latest = self.issued, "dropping stale list response");
            return false;
        }
        let created = std::mem::take(&mut self.created_during_fetch);
        match result {
            Ok(items) => {
                self.items = items;
                for record in created {
                    if !self.items.iter().any(|r| r.id() == record.id()) {
                        self.items.insert(0, record);
                    }
                }
                self.phase = Phase::Ready;
            }
            Err(err) => {
                self.error = Some(err);
                self.phase = Phase::Errored;
            }
        }
        true
    }

    /// Put a freshly created record at the head of the list.
    pub fn insert_created(&mut self, record: R) {
        if self.is_loading() {
            self.created_during_fetch.push(record.clone());
        }
        self.items.insert(0, record);
    }

    /// Swap the entry with the same id in place. `false` if it is not listed.
    pub fn replace(&mut self, record: R) -> bool {
        match self.items.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<R> {
        self.created_during_fetch.retain(|r| r.id() != id);
        let index = self.items.iter().position(|r| r.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Reflect a successful edit. Returns `true` when the caller must re-fetch.
    pub fn apply_edit(&mut self, record: R, policy: RefreshPolicy) -> bool {
        match policy {
            RefreshPolicy::PatchLocally => {
                self.replace(record);
                false
            }
            RefreshPolicy::Refetch => true,
        }
    }

    /// Reflect a successful delete. Returns `true` when the caller must re-fetch.
    pub fn apply_delete(&mut self, id: &str, policy: RefreshPolicy) -> bool {
        match policy {
            RefreshPolicy::PatchLocally => {
                self.remove(id);
                false
            }
            RefreshPolicy::Refetch => true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Error banner for the last fetch, if it failed.
    pub fn banner(&self, action: &str) -> Option<Banner> {
        match (&self.phase, &self.error) {
            (Phase::Errored, Some(err)) => Some(err.banner(action)),
            _ => None,
        }
    }
}

/// Somewhere a piece of view state lives.
///
/// [`Lifecycle`] only touches state through [`StateCell::update`], between awaits,
/// so the same flow runs against a local value or a reactive signal.
pub trait StateCell<T> {
    fn update<O>(&mut self, f: impl FnOnce(&mut T) -> O) -> O;
}

impl<T> StateCell<T> for &mut T {
    fn update<O>(&mut self, f: impl FnOnce(&mut T) -> O) -> O {
        f(&mut **self)
    }
}

/// Drives a [`RecordSource`] according to a [`ListSpec`].
#[derive(Clone, Debug)]
pub struct Lifecycle<S> {
    source: S,
    spec: ListSpec,
}

impl<S: RecordSource> Lifecycle<S> {
    pub fn new(source: S, spec: ListSpec) -> Self {
        Self { source, spec }
    }

    pub fn spec(&self) -> &ListSpec {
        &self.spec
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the records this spec describes.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, BackendError> {
        if self.spec.probe_health && !self.source.health().await {
            warn!(collection = R::COLLECTION, "health probe failed");
            return Err(BackendError::unreachable("health check failed"));
        }
        let result = match self.spec.scope {
            Scope::Page => self
                .source
                .list::<R>(&self.spec.query)
                .await
                .map(|page| page.items),
            Scope::Full => self.source.list_all::<R>(&self.spec.query).await,
        };
        match &result {
            Ok(items) => debug!(collection = R::COLLECTION, count = items.len(), "list loaded"),
            Err(err) => warn!(collection = R::COLLECTION, %err, "list failed"),
        }
        result
    }

    pub async fn submit_create<R: Record>(&self, input: &R::Input) -> Result<R, BackendError> {
        let result = self.source.create::<R>(input).await;
        match &result {
            Ok(record) => info!(collection = R::COLLECTION, id = record.id(), "record created"),
            Err(err) => warn!(collection = R::COLLECTION, %err, "create failed"),
        }
        result
    }

    pub async fn submit_update<R: Record>(&self, id: &str, patch: &R::Patch) -> Result<R, BackendError> {
        let result = self.source.update::<R>(id, patch).await;
        match &result {
            Ok(_) => info!(collection = R::COLLECTION, id, "record updated"),
            Err(err) => warn!(collection = R::COLLECTION, id, %err, "update failed"),
        }
        result
    }

    pub async fn submit_delete<R: Record>(&self, id: &str) -> Result<(), BackendError> {
        let result = self.source.delete::<R>(id).await;
        match &result {
            Ok(()) => info!(collection = R::COLLECTION, id, "record deleted"),
            Err(err) => warn!(collection = R::COLLECTION, id, %err, "delete failed"),
        }
        result
    }

    /// Run one fetch cycle against `state`.
    pub async fn fetch<R: Record>(
        &self,
        mut state: impl StateCell<ListState<R>>,
    ) -> Result<(), BackendError> {
        let ticket = state.update(|s| s.begin_fetch());
        let result = self.load::<R>().await;
        let outcome = match &result {
            Ok(_) => Ok(()),
            Err(err) => Err(err.clone()),
        };
        state.update(|s| s.finish_fetch(ticket, result));
        outcome
    }

    /// Create a record and put it at the head of the list. On failure the list is untouched.
    pub async fn create<R: Record>(
        &self,
        mut state: impl StateCell<ListState<R>>,
        input: &R::Input,
    ) -> Result<R, BackendError> {
        let record = self.submit_create::<R>(input).await?;
        state.update(|s| s.insert_created(record.clone()));
        Ok(record)
    }

    /// Update a record, then patch the list or re-fetch it per [`ListSpec::after_edit`].
    ///
    /// A failed re-fetch lands in the list's error banner; the edit itself succeeded.
    pub async fn update<R: Record>(
        &self,
        mut state: impl StateCell<ListState<R>>,
        id: &str,
        patch: &R::Patch,
    ) -> Result<R, BackendError> {
        let record = self.submit_update::<R>(id, patch).await?;
        let policy = self.spec.after_edit;
        if state.update(|s| s.apply_edit(record.clone(), policy)) {
            self.refetch(state, "edit").await;
        }
        Ok(record)
    }

    /// Delete the record `confirm` is open for.
    ///
    /// Does nothing and returns `Ok(None)` unless the dialog is open, so a record
    /// can never be deleted without confirmation. On failure the dialog reopens with
    /// the error and the list keeps the entry.
    pub async fn delete<R: Record>(
        &self,
        mut state: impl StateCell<ListState<R>>,
        mut confirm: impl StateCell<DeleteConfirm>,
    ) -> Result<Option<String>, BackendError> {
        let Some(id) = confirm.update(|c| c.begin()) else {
            return Ok(None);
        };
        let result = self.submit_delete::<R>(&id).await;
        confirm.update(|c| c.finish(result.clone()));
        result?;
        let policy = self.spec.after_edit;
        if state.update(|s| s.apply_delete(&id, policy)) {
            self.refetch(state, "delete").await;
        }
        Ok(Some(id))
    }

    async fn refetch<R: Record>(&self, state: impl StateCell<ListState<R>>, after: &str) {
        if let Err(err) = self.fetch(state).await {
            warn!(collection = R::COLLECTION, after, %err, "re-fetch failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::summarize;
    use crate::error::CONNECTIVITY_MESSAGE;
    use crate::forms::{CategoryForm, DreamForm, ReviewForm};
    use crate::memory::MemoryBackend;
    use crate::models::{Dream, DreamPatch, Letter, NewDream, NewLetter, Review, ReviewPatch};
    use crate::query::Page;
    use crate::time::relative;

    fn letter(title: &str) -> NewLetter {
        NewLetter {
            title: title.into(),
            to: "Mom".into(),
            from: "Me".into(),
            content: "Hello".into(),
            user: "u1".into(),
        }
    }

    #[tokio::test]
    async fn test_created_dream_lands_at_head() {
        let backend = MemoryBackend::new();
        let dreams = Lifecycle::new(backend.clone(), ListSpec::dreams());
        let mut state = ListState::<Dream>::new();
        dreams.fetch(&mut state).await.unwrap();
        assert_eq!(state.phase, Phase::Ready);
        assert!(state.items.is_empty());

        backend
            .insert(
                "dreams",
                &NewDream {
                    title: "Older".into(),
                    body: "x".into(),
                    user: "V".into(),
                },
            )
            .unwrap();
        dreams.fetch(&mut state).await.unwrap();

        let input = DreamForm {
            title: "Flying".into(),
            body: "I flew over the city".into(),
        }
        .to_new("U")
        .unwrap();
        dreams.create(&mut state, &input).await.unwrap();

        assert_eq!(state.items.len(), 2);
        let head = &state.items[0];
        assert_eq!(head.title, "Flying");
        assert_eq!(head.author(), "U");
        assert_eq!(relative(&head.created), "just now");
    }

    #[tokio::test]
    async fn test_unreachable_backend_offers_retry() {
        let backend = MemoryBackend::new();
        backend.insert("letters", &letter("Hi")).unwrap();
        backend.set_online(false);

        let spec = ListSpec::letters(&ListConfig::default());
        let action = spec.action(Action::View);
        let letters = Lifecycle::new(backend.clone(), spec);
        let mut state = ListState::<Letter>::new();

        let err = letters.fetch(&mut state).await.unwrap_err();
        assert_eq!(err.status, 0);
        assert_eq!(state.phase, Phase::Errored);
        let banner = state.banner(&action).unwrap();
        assert_eq!(banner.message, CONNECTIVITY_MESSAGE);
        assert!(banner.retryable);

        backend.set_online(true);
        letters.fetch(&mut state).await.unwrap();
        assert_eq!(state.phase, Phase::Ready);
        assert!(state.banner(&action).is_none());
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test]
    async fn test_forbidden_fetch_is_not_retryable() {
        let backend = MemoryBackend::new();
        backend.deny("dreams");
        let dreams = Lifecycle::new(backend, ListSpec::dreams());
        let mut state = ListState::<Dream>::new();
        let _ = dreams.fetch(&mut state).await;

        let banner = state.banner(&dreams.spec().action(Action::View)).unwrap();
        assert_eq!(
            banner.message,
            "You do not have permission to view these dreams."
        );
        assert!(!banner.retryable);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_list_unchanged() {
        let backend = MemoryBackend::new();
        backend.insert("letters", &letter("Kept")).unwrap();
        let letters = Lifecycle::new(backend.clone(), ListSpec::letters(&ListConfig::default()));
        let mut state = ListState::<Letter>::new();
        letters.fetch(&mut state).await.unwrap();

        backend.fail_next(BackendError::new(400, "Failed to create record."));
        let err = letters.create(&mut state, &letter("Lost")).await.unwrap_err();
        assert_eq!(err.describe("add letters"), "Failed to create record.");
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].title, "Kept");
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut state = ListState::<Letter>::new();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(state.finish_fetch(second, Ok(Vec::new())));
        assert_eq!(state.phase, Phase::Ready);
        assert!(!state.finish_fetch(first, Err(BackendError::unreachable("late"))));
        assert_eq!(state.phase, Phase::Ready);
        assert!(state.error.is_none());
    }

    #[test]
    fn finish_requires_loading() {
        let mut state = ListState::<Letter>::new();
        let ticket = state.begin_fetch();
        assert!(state.finish_fetch(ticket, Ok(Vec::new())));
        // the same ticket cannot complete twice
        assert!(!state.finish_fetch(ticket, Err(BackendError::unreachable("x"))));
        assert_eq!(state.phase, Phase::Ready);
    }

    #[tokio::test]
    async fn test_create_during_fetch_survives_older_response() {
        let backend = MemoryBackend::new();
        backend.insert("letters", &letter("Old")).unwrap();
        let letters = Lifecycle::new(backend.clone(), ListSpec::letters(&ListConfig::default()));
        let mut state = ListState::<Letter>::new();

        let ticket = state.begin_fetch();
        let response = letters.load::<Letter>().await;
        let created = letters.create(&mut state, &letter("New")).await.unwrap();
        assert!(state.finish_fetch(ticket, response));

        let titles: Vec<_> = state.items.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["New", "Old"]);
        assert_eq!(state.items[0].id, created.id);

        // once the backend reports it, it is not listed twice
        letters.fetch(&mut state).await.unwrap();
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn create_during_fetch_is_not_duplicated() {
        let mut state = ListState::<Letter>::new();
        let ticket = state.begin_fetch();
        let record = Letter {
            id: "l1".into(),
            title: "New".into(),
            to: "Mom".into(),
            from: "Me".into(),
            content: "Hello".into(),
            user: "u1".into(),
            created: String::new(),
            updated: String::new(),
        };
        state.insert_created(record.clone());
        assert!(state.finish_fetch(ticket, Ok(vec![record.clone()])));
        assert_eq!(state.items.len(), 1);

        // created then removed before the response arrived: stays removed
        let ticket = state.begin_fetch();
        state.insert_created(Letter {
            id: "l2".into(),
            ..record.clone()
        });
        state.remove("l2");
        assert!(state.finish_fetch(ticket, Ok(vec![record])));
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refetch_after_delete_shows_banner() {
        /// Writes go through; every list request fails.
        struct ListsDown(MemoryBackend);

        impl RecordSource for ListsDown {
            async fn health(&self) -> bool {
                true
            }
            async fn list<R: Record>(&self, _query: &ListQuery) -> Result<Page<R>, BackendError> {
                Err(BackendError::unreachable("lists down"))
            }
            async fn get_one<R: Record>(&self, id: &str) -> Result<R, BackendError> {
                self.0.get_one(id).await
            }
            async fn create<R: Record>(&self, input: &R::Input) -> Result<R, BackendError> {
                self.0.create::<R>(input).await
            }
            async fn update<R: Record>(&self, id: &str, patch: &R::Patch) -> Result<R, BackendError> {
                self.0.update::<R>(id, patch).await
            }
            async fn delete<R: Record>(&self, id: &str) -> Result<(), BackendError> {
                self.0.delete::<R>(id).await
            }
        }

        let backend = MemoryBackend::new();
        let dreams = Lifecycle::new(ListsDown(backend.clone()), ListSpec::dreams());
        let mut state = ListState::<Dream>::new();
        let created = dreams
            .create(
                &mut state,
                &NewDream {
                    title: "Falling".into(),
                    body: "down".into(),
                    user: "U".into(),
                },
            )
            .await
            .unwrap();

        let mut confirm = DeleteConfirm::default();
        confirm.request(&created.id);
        assert_eq!(
            dreams.delete(&mut state, &mut confirm).await,
            Ok(Some(created.id))
        );
        assert!(!confirm.is_open());
        assert_eq!(state.phase, Phase::Errored);
        assert!(state.banner("view these dreams").is_some());
        assert_eq!(backend.count("dreams"), 0);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let backend = MemoryBackend::new();
        backend.insert("letters", &letter("One")).unwrap();
        let letters = Lifecycle::new(backend.clone(), ListSpec::letters(&ListConfig::default()));
        let mut state = ListState::<Letter>::new();
        letters.fetch(&mut state).await.unwrap();
        let id = state.items[0].id.clone();

        let mut confirm = DeleteConfirm::default();
        assert_eq!(letters.delete(&mut state, &mut confirm).await, Ok(None));

        confirm.request(&id);
        confirm.cancel();
        assert_eq!(letters.delete(&mut state, &mut confirm).await, Ok(None));
        assert_eq!(state.items.len(), 1);
        assert_eq!(backend.count("letters"), 1);

        confirm.request(&id);
        assert_eq!(
            letters.delete(&mut state, &mut confirm).await,
            Ok(Some(id))
        );
        assert!(state.items.is_empty());
        assert!(!confirm.is_open());
        assert_eq!(backend.count("letters"), 0);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry_and_reopens() {
        let backend = MemoryBackend::new();
        backend.insert("letters", &letter("One")).unwrap();
        let letters = Lifecycle::new(backend.clone(), ListSpec::letters(&ListConfig::default()));
        let mut state = ListState::<Letter>::new();
        letters.fetch(&mut state).await.unwrap();

        let mut confirm = DeleteConfirm::default();
        confirm.request(state.items[0].id.clone());
        backend.fail_next(BackendError::unreachable("down"));
        assert!(letters.delete(&mut state, &mut confirm).await.is_err());
        assert_eq!(state.items.len(), 1);
        assert!(confirm.is_open());
        assert!(!confirm.is_deleting());
        assert!(confirm.error.is_some());
    }

    #[tokio::test]
    async fn test_dream_edit_refetches() {
        let backend = MemoryBackend::new();
        let dreams = Lifecycle::new(backend.clone(), ListSpec::dreams());
        let mut state = ListState::<Dream>::new();
        let created = dreams
            .create(
                &mut state,
                &NewDream {
                    title: "Falling".into(),
                    body: "down".into(),
                    user: "U".into(),
                },
            )
            .await
            .unwrap();
        // written by someone else; only a re-fetch can show it
        backend
            .insert(
                "dreams",
                &NewDream {
                    title: "Other".into(),
                    body: "x".into(),
                    user: "V".into(),
                },
            )
            .unwrap();

        dreams
            .update(
                &mut state,
                &created.id,
                &DreamPatch {
                    title: "Flying".into(),
                    body: "up".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(state.phase, Phase::Ready);
        let titles: Vec<_> = state.items.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, ["Other", "Flying"]);
    }

    #[tokio::test]
    async fn test_review_edit_patches_in_place() {
        let backend = MemoryBackend::new();
        let coffee = Lifecycle::new(
            backend.clone(),
            ListSpec::category_reviews("Coffee", &ListConfig::default()),
        );
        let mut state = ListState::<Review>::new();
        let form = ReviewForm {
            title: "Latte".into(),
            ..ReviewForm::default()
        };
        let review = coffee
            .create(&mut state, &form.to_new("Coffee", "U").unwrap())
            .await
            .unwrap();
        coffee
            .update(
                &mut state,
                &review.id,
                &ReviewPatch {
                    title: "Flat white".into(),
                    description: String::new(),
                    rating: 8.5,
                },
            )
            .await
            .unwrap();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.items[0].title, "Flat white");
        assert_eq!(state.items[0].category, "Coffee");
    }

    #[tokio::test]
    async fn test_new_category_summary() {
        let backend = MemoryBackend::new();
        let lists = ListConfig::default();
        let scan = Lifecycle::new(backend.clone(), ListSpec::review_scan(&lists));
        let mut state = ListState::<Review>::new();

        for (title, rating) in [("Espresso", 10.0), ("Drip", 4.0)] {
            let form = CategoryForm {
                category: "Coffee".into(),
                review: ReviewForm {
                    title: title.into(),
                    description: String::new(),
                    rating,
                },
            };
            scan.submit_create::<Review>(&form.to_new("U").unwrap())
                .await
                .unwrap();
        }
        scan.fetch(&mut state).await.unwrap();

        let summaries = summarize(&state.items);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Coffee");
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].average_label(), "7.0/10");

        let coffee = Lifecycle::new(backend, ListSpec::category_reviews("Coffee", &lists));
        let mut reviews = ListState::<Review>::new();
        coffee.fetch(&mut reviews).await.unwrap();
        assert_eq!(reviews.items.len(), 2);
    }
}
