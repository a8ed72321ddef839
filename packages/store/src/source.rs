//! The seam between the list lifecycle and whatever holds the records.
//!
//! [`RecordSource`] is implemented by the HTTP client in the `api` crate and by
//! [`crate::MemoryBackend`] for tests. All methods are async and fail with a
//! [`BackendError`]; none of them retry.

use std::future::Future;

use crate::error::BackendError;
use crate::models::Record;
use crate::query::{ListQuery, Page};

/// Async CRUD access to record collections.
pub trait RecordSource {
    /// Largest page a single list call may request.
    const MAX_PER_PAGE: u32 = 500;

    /// Lightweight reachability probe. `false` means "server unreachable".
    fn health(&self) -> impl Future<Output = bool>;

    fn list<R: Record>(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<R>, BackendError>>;

    fn get_one<R: Record>(&self, id: &str) -> impl Future<Output = Result<R, BackendError>>;

    fn create<R: Record>(
        &self,
        input: &R::Input,
    ) -> impl Future<Output = Result<R, BackendError>>;

    fn update<R: Record>(
        &self,
        id: &str,
        patch: &R::Patch,
    ) -> impl Future<Output = Result<R, BackendError>>;

    fn delete<R: Record>(&self, id: &str) -> impl Future<Output = Result<(), BackendError>>;

    /// Every record matching `query`, walking pages of [`Self::MAX_PER_PAGE`].
    fn list_all<R: Record>(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Vec<R>, BackendError>> {
        async move {
            let mut items = Vec::new();
            let mut page = 1;
            loop {
                let request = query
                    .clone()
                    .with_page(page)
                    .with_per_page(Self::MAX_PER_PAGE);
                let batch = self.list::<R>(&request).await?;
                let fetched = batch.items.len();
                items.extend(batch.items);
                if fetched < Self::MAX_PER_PAGE as usize || page >= batch.total_pages {
                    break;
                }
                page += 1;
            }
            Ok(items)
        }
    }
}
