//! Generic keyed store used by every resource type.

use std::collections::BTreeMap;

use time::OffsetDateTime;
use tokio::sync::Mutex;

use super::{IdAllocator, Page, StoreError, paginate};

/// A record type that can live inside a [`ResourceStore`].
///
/// Implementors describe how to build a record from its creation input, how to merge a partial
/// update, how to match list criteria, and (optionally) which uniqueness rules apply.
pub trait Record: Clone + Send + Sync + 'static {
    /// Validated creation input.
    type Draft: Send;
    /// Partial update input; absent fields are left untouched.
    type Changes: Send;
    /// Optional list predicates, combined with logical AND.
    type Criteria: Sync;

    /// Resource name used in error messages and logs.
    const KIND: &'static str;

    /// Identifier of this record.
    fn id(&self) -> u64;

    /// Build a fresh record with the allocated identifier and creation time.
    fn create(id: u64, draft: Self::Draft, created_at: OffsetDateTime) -> Self;

    /// Merge the supplied fields into the record.
    fn apply(&mut self, changes: Self::Changes);

    /// Stamp the last-update time.
    fn touch(&mut self, updated_at: OffsetDateTime);

    /// Whether the record satisfies every present predicate.
    fn matches(&self, criteria: &Self::Criteria) -> bool;

    /// Reject a draft that collides with an existing record.
    fn check_draft(
        _draft: &Self::Draft,
        _existing: &mut dyn Iterator<Item = &Self>,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    /// Reject changes that collide with any record other than the one being updated.
    fn check_changes(
        _changes: &Self::Changes,
        _others: &mut dyn Iterator<Item = &Self>,
    ) -> Result<(), StoreError> {
        Ok(())
    }
}

struct StoreState<R> {
    ids: IdAllocator,
    records: BTreeMap<u64, R>,
}

/// In-memory store owning every record of type `R`.
///
/// All state sits behind one mutex that is held for the whole of each operation, so
/// check-then-write sequences (uniqueness checks, id allocation, merges) are atomic with respect
/// to concurrent callers. Records are kept in identifier order, which is also insertion order.
/// Callers only ever receive clones.
pub struct ResourceStore<R: Record> {
    state: Mutex<StoreState<R>>,
}

impl<R: Record> Default for ResourceStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ResourceStore<R> {
    /// Create an empty store with its own identifier sequence.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                ids: IdAllocator::new(),
                records: BTreeMap::new(),
            }),
        }
    }

    /// Insert a new record built from `draft` and return a copy of it.
    pub async fn insert(&self, draft: R::Draft) -> Result<R, StoreError> {
        let mut state = self.state.lock().await;
        if let Err(err) = R::check_draft(&draft, &mut state.records.values()) {
            tracing::debug!(kind = R::KIND, error = %err, "Rejected insert");
            return Err(err);
        }
        let id = state.ids.next_id();
        let record = R::create(id, draft, OffsetDateTime::now_utc());
        state.records.insert(id, record.clone());
        tracing::debug!(kind = R::KIND, id, "Inserted record");
        Ok(record)
    }

    /// Fetch a copy of the record stored under `id`.
    pub async fn get(&self, id: u64) -> Result<R, StoreError> {
        let state = self.state.lock().await;
        state.records.get(&id).cloned().ok_or_else(|| not_found::<R>(id))
    }

    /// Apply a partial update and stamp `updated_at`, returning the updated copy.
    ///
    /// The timestamp is refreshed even when `changes` carries no fields.
    pub async fn update(&self, id: u64, changes: R::Changes) -> Result<R, StoreError> {
        let mut state = self.state.lock().await;
        if !state.records.contains_key(&id) {
            return Err(not_found::<R>(id));
        }
        let mut others = state.records.values().filter(|record| record.id() != id);
        if let Err(err) = R::check_changes(&changes, &mut others) {
            tracing::debug!(kind = R::KIND, id, error = %err, "Rejected update");
            return Err(err);
        }
        let record = state
            .records
            .get_mut(&id)
            .ok_or_else(|| not_found::<R>(id))?;
        record.apply(changes);
        record.touch(OffsetDateTime::now_utc());
        tracing::debug!(kind = R::KIND, id, "Updated record");
        Ok(record.clone())
    }

    /// Run `mutate` against the stored record, stamp `updated_at`, and return the updated copy.
    pub(crate) async fn modify(
        &self,
        id: u64,
        mutate: impl FnOnce(&mut R) + Send,
    ) -> Result<R, StoreError> {
        let mut state = self.state.lock().await;
        let record = state
            .records
            .get_mut(&id)
            .ok_or_else(|| not_found::<R>(id))?;
        mutate(record);
        record.touch(OffsetDateTime::now_utc());
        Ok(record.clone())
    }

    /// Remove the record stored under `id`. Its identifier is never handed out again.
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        match state.records.remove(&id) {
            Some(_) => {
                tracing::debug!(kind = R::KIND, id, "Deleted record");
                Ok(())
            }
            None => Err(not_found::<R>(id)),
        }
    }

    /// Filter the stored records by `criteria`, then slice the result.
    pub async fn list(&self, criteria: &R::Criteria, skip: usize, limit: usize) -> Page<R> {
        let state = self.state.lock().await;
        let matching: Vec<R> = state
            .records
            .values()
            .filter(|record| record.matches(criteria))
            .cloned()
            .collect();
        paginate(matching, skip, limit)
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.records.is_empty()
    }
}

fn not_found<R: Record>(id: u64) -> StoreError {
    StoreError::NotFound { kind: R::KIND, id }
}
