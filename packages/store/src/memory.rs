use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::BackendError;
use crate::models::Record;
use crate::query::{ListQuery, Page};
use crate::source::RecordSource;
use crate::time::BACKEND_FORMAT;

/// In-memory RecordSource for tests and offline previews.
///
/// Records are kept as JSON objects per collection so any [`Record`] type works.
/// Failures can be injected to exercise the error paths of the list lifecycle.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    next_id: u64,
    last_created: Option<DateTime<Utc>>,
    offline: bool,
    denied: HashSet<String>,
    failures: VecDeque<BackendError>,
}

const NOT_FOUND: &str = "The requested resource wasn't found.";

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate the server going away (status 0 on every call, failing probe).
    pub fn set_online(&self, online: bool) {
        self.lock().offline = !online;
    }

    /// Answer every request against `collection` with 403.
    pub fn deny(&self, collection: &str) {
        self.lock().denied.insert(collection.to_string());
    }

    /// Fail the next request (of any kind) with `error`.
    pub fn fail_next(&self, error: BackendError) {
        self.lock().failures.push_back(error);
    }

    /// Number of records currently stored in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.lock().collections.get(collection).map_or(0, Vec::len)
    }

    /// Store a record as if it had been created through the backend.
    pub fn insert<T: Serialize>(&self, collection: &str, input: &T) -> Result<Value, BackendError> {
        let mut inner = self.lock();
        inner.insert(collection, input)
    }
}

impl Inner {
    fn check(&mut self, collection: &str) -> Result<(), BackendError> {
        if self.offline {
            return Err(BackendError::unreachable("Failed to fetch"));
        }
        if let Some(error) = self.failures.pop_front() {
            return Err(error);
        }
        if self.denied.contains(collection) {
            return Err(BackendError::new(
                403,
                "Only superusers can perform this action.",
            ));
        }
        Ok(())
    }

    /// Strictly increasing at the millisecond precision the backend stores.
    fn next_timestamp(&mut self) -> String {
        let mut now = Utc::now().trunc_subsecs(3);
        if let Some(last) = self.last_created {
            if now <= last {
                now = last + Duration::milliseconds(1);
            }
        }
        self.last_created = Some(now);
        now.format(BACKEND_FORMAT).to_string()
    }

    fn insert<T: Serialize>(&mut self, collection: &str, input: &T) -> Result<Value, BackendError> {
        let mut value = serde_json::to_value(input)
            .map_err(|e| BackendError::new(400, format!("Failed to create record. {e}")))?;
        let Value::Object(fields) = &mut value else {
            return Err(BackendError::new(400, "Failed to create record."));
        };
        self.next_id += 1;
        let stamp = self.next_timestamp();
        fields.insert("id".into(), Value::String(format!("mem{:012}", self.next_id)));
        fields.insert("collectionName".into(), Value::String(collection.to_string()));
        fields.insert("created".into(), Value::String(stamp.clone()));
        fields.insert("updated".into(), Value::String(stamp));
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(value.clone());
        Ok(value)
    }

    fn position(&self, collection: &str, id: &str) -> Result<usize, BackendError> {
        self.collections
            .get(collection)
            .and_then(|records| {
                records
                    .iter()
                    .position(|r| r.get("id").and_then(Value::as_str) == Some(id))
            })
            .ok_or_else(|| BackendError::new(404, NOT_FOUND))
    }
}

fn decode<R: Record>(value: Value) -> Result<R, BackendError> {
    serde_json::from_value(value).map_err(|e| BackendError::new(400, e.to_string()))
}

fn compare_field(a: &Value, b: &Value, field: &str) -> std::cmp::Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(std::cmp::Ordering::Equal),
        (Some(x), Some(y)) => x.as_str().unwrap_or_default().cmp(y.as_str().unwrap_or_default()),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

impl RecordSource for MemoryBackend {
    async fn health(&self) -> bool {
        !self.lock().offline
    }

    async fn list<R: Record>(&self, query: &ListQuery) -> Result<Page<R>, BackendError> {
        let mut inner = self.lock();
        inner.check(R::COLLECTION)?;
        let mut records: Vec<Value> = inner
            .collections
            .get(R::COLLECTION)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|r| query.filter.as_ref().map_or(true, |f| f.matches(r)))
            .collect();
        if let Some(sort) = &query.sort {
            let (descending, field) = match sort.strip_prefix('-') {
                Some(field) => (true, field),
                None => (false, sort.trim_start_matches('+')),
            };
            records.sort_by(|a, b| {
                let ord = compare_field(a, b, field);
                if descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let per_page = query.per_page.max(1);
        let total_items = records.len() as u64;
        let total_pages = records.len().div_ceil(per_page as usize) as u32;
        let skip = (query.page.max(1) as usize - 1) * per_page as usize;
        let items = records
            .into_iter()
            .skip(skip)
            .take(per_page as usize)
            .map(decode::<R>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            page: query.page.max(1),
            per_page,
            total_items,
            total_pages,
            items,
        })
    }

    async fn get_one<R: Record>(&self, id: &str) -> Result<R, BackendError> {
        let mut inner = self.lock();
        inner.check(R::COLLECTION)?;
        let index = inner.position(R::COLLECTION, id)?;
        decode(inner.collections[R::COLLECTION][index].clone())
    }

    async fn create<R: Record>(&self, input: &R::Input) -> Result<R, BackendError> {
        let mut inner = self.lock();
        inner.check(R::COLLECTION)?;
        let value = inner.insert(R::COLLECTION, input)?;
        decode(value)
    }

    async fn update<R: Record>(&self, id: &str, patch: &R::Patch) -> Result<R, BackendError> {
        let mut inner = self.lock();
        inner.check(R::COLLECTION)?;
        let index = inner.position(R::COLLECTION, id)?;
        let changes = serde_json::to_value(patch)
            .map_err(|e| BackendError::new(400, format!("Failed to update record. {e}")))?;
        let stamp = inner.next_timestamp();
        let Some(records) = inner.collections.get_mut(R::COLLECTION) else {
            return Err(BackendError::new(404, NOT_FOUND));
        };
        let record = &mut records[index];
        if let (Value::Object(target), Value::Object(source)) = (&mut *record, changes) {
            for (key, value) in source {
                target.insert(key, value);
            }
            target.insert("updated".into(), Value::String(stamp));
        }
        decode(record.clone())
    }

    async fn delete<R: Record>(&self, id: &str) -> Result<(), BackendError> {
        let mut inner = self.lock();
        inner.check(R::COLLECTION)?;
        let index = inner.position(R::COLLECTION, id)?;
        if let Some(records) = inner.collections.get_mut(R::COLLECTION) {
            records.remove(index);
        }
        Ok(())
    }
}
