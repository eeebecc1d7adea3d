use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::domain::{ScholarshipDraft, ScholarshipId, ScholarshipPatchRequest, ScholarshipRecord};
use super::filter::RecordFilter;
use super::report::{DashboardLimits, DashboardSummary};
use super::store::{ScholarshipStore, StoreError};
use super::validation::{RecordGuard, ValidationError};

/// Service composing the input guard, the record store, and the dashboard aggregation.
pub struct ScholarshipService<S> {
    guard: RecordGuard,
    store: Arc<S>,
    limits: DashboardLimits,
}

impl<S> ScholarshipService<S>
where
    S: ScholarshipStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_limits(store, DashboardLimits::default())
    }

    pub fn with_limits(store: Arc<S>, limits: DashboardLimits) -> Self {
        Self {
            guard: RecordGuard,
            store,
            limits,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Records in deadline order, narrowed by the filter.
    pub fn list(&self, filter: &RecordFilter) -> Result<Vec<ScholarshipRecord>, ServiceError> {
        let records = self.store.list()?;
        Ok(filter.apply(records))
    }

    pub fn get(&self, id: ScholarshipId) -> Result<ScholarshipRecord, ServiceError> {
        let record = self.store.get(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    pub fn create(&self, draft: ScholarshipDraft) -> Result<ScholarshipRecord, ServiceError> {
        let fields = self.guard.fields_from_draft(draft)?;
        let record = self.store.insert(fields)?;
        info!(id = %record.id, name = %record.scholarship_name, "scholarship created");
        Ok(record)
    }

    pub fn update(
        &self,
        id: ScholarshipId,
        request: ScholarshipPatchRequest,
    ) -> Result<ScholarshipRecord, ServiceError> {
        let patch = self.guard.patch_from_request(request)?;
        let record = self.store.update(id, patch)?;
        info!(id = %record.id, status = %record.status, "scholarship updated");
        Ok(record)
    }

    /// Removes a record; an unknown id surfaces as `NotFound`.
    pub fn delete(&self, id: ScholarshipId) -> Result<(), ServiceError> {
        if self.store.delete(id)? {
            info!(%id, "scholarship deleted");
            Ok(())
        } else {
            debug!(%id, "delete requested for unknown scholarship");
            Err(StoreError::NotFound.into())
        }
    }

    pub fn dashboard(&self, now: NaiveDateTime) -> Result<DashboardSummary, ServiceError> {
        let records = self.store.list()?;
        Ok(DashboardSummary::build_with_limits(
            &records,
            now,
            self.limits,
        ))
    }
}

/// Error raised by the scholarship service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
