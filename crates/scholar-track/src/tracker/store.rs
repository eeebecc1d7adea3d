use std::cmp::Ordering as CmpOrdering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{ScholarshipFields, ScholarshipId, ScholarshipPatch, ScholarshipRecord};

/// Storage abstraction so the service and router can be exercised in isolation.
pub trait ScholarshipStore: Send + Sync {
    /// All records, deadline ascending with undated records last.
    fn list(&self) -> Result<Vec<ScholarshipRecord>, StoreError>;
    fn get(&self, id: ScholarshipId) -> Result<Option<ScholarshipRecord>, StoreError>;
    fn insert(&self, fields: ScholarshipFields) -> Result<ScholarshipRecord, StoreError>;
    fn update(
        &self,
        id: ScholarshipId,
        patch: ScholarshipPatch,
    ) -> Result<ScholarshipRecord, StoreError>;
    /// Returns whether a record was removed; a missing id is not an error here.
    fn delete(&self, id: ScholarshipId) -> Result<bool, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("scholarship not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Listing order: deadline ascending, undated last, then id.
pub fn deadline_order(left: &ScholarshipRecord, right: &ScholarshipRecord) -> CmpOrdering {
    let by_deadline = match (left.deadline, right.deadline) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => CmpOrdering::Less,
        (None, Some(_)) => CmpOrdering::Greater,
        (None, None) => CmpOrdering::Equal,
    };
    by_deadline.then_with(|| left.id.cmp(&right.id))
}

#[derive(Clone)]
pub struct InMemoryScholarshipStore {
    records: Arc<Mutex<BTreeMap<ScholarshipId, ScholarshipRecord>>>,
    sequence: Arc<AtomicI64>,
}

impl Default for InMemoryScholarshipStore {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
            sequence: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl InMemoryScholarshipStore {
    pub fn with_records<I>(fields: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = ScholarshipFields>,
    {
        let store = Self::default();
        for entry in fields {
            store.insert(entry)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<ScholarshipId, ScholarshipRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }

    fn next_id(&self) -> ScholarshipId {
        ScholarshipId(self.sequence.fetch_add(1, Ordering::Relaxed))
    }
}

impl ScholarshipStore for InMemoryScholarshipStore {
    fn list(&self) -> Result<Vec<ScholarshipRecord>, StoreError> {
        let guard = self.lock()?;
        let mut records: Vec<ScholarshipRecord> = guard.values().cloned().collect();
        records.sort_by(deadline_order);
        Ok(records)
    }

    fn get(&self, id: ScholarshipId) -> Result<Option<ScholarshipRecord>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(&id).cloned())
    }

    fn insert(&self, fields: ScholarshipFields) -> Result<ScholarshipRecord, StoreError> {
        let mut guard = self.lock()?;
        let record = ScholarshipRecord::from_fields(self.next_id(), fields);
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(
        &self,
        id: ScholarshipId,
        patch: ScholarshipPatch,
    ) -> Result<ScholarshipRecord, StoreError> {
        let mut guard = self.lock()?;
        let record = guard.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.apply(patch);
        Ok(record.clone())
    }

    fn delete(&self, id: ScholarshipId) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(&id).is_some())
    }
}
