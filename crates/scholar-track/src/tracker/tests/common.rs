use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::tracker::domain::{
    FundingType, ScholarshipDraft, ScholarshipFields, ScholarshipId, ScholarshipPatch,
    ScholarshipRecord,
};
use crate::tracker::store::{InMemoryScholarshipStore, ScholarshipStore, StoreError};
use crate::tracker::{scholarship_router, ScholarshipService};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn gates_draft() -> ScholarshipDraft {
    ScholarshipDraft {
        required_documents: Some(vec![
            "CV".to_string(),
            "Transcript".to_string(),
            "Research proposal".to_string(),
        ]),
        documents_done: Some(vec!["CV".to_string()]),
        deadline: Some(date(2026, 10, 14)),
        apply_link: Some("https://www.gatescambridge.org".to_string()),
        ..ScholarshipDraft::new(
            "Gates Cambridge",
            "University of Cambridge",
            "United Kingdom",
            FundingType::Full,
        )
    }
}

pub(super) fn daad_draft() -> ScholarshipDraft {
    ScholarshipDraft {
        deadline: Some(date(2026, 11, 30)),
        status: Some("In Progress".to_string()),
        ..ScholarshipDraft::new("DAAD EPOS", "TU Munich", "Germany", FundingType::Partial)
    }
}

pub(super) fn build_service() -> (
    ScholarshipService<InMemoryScholarshipStore>,
    Arc<InMemoryScholarshipStore>,
) {
    let store = Arc::new(InMemoryScholarshipStore::default());
    (ScholarshipService::new(store.clone()), store)
}

pub(super) fn router_with_service(
    service: ScholarshipService<InMemoryScholarshipStore>,
) -> axum::Router {
    scholarship_router(Arc::new(service))
}

pub(super) struct UnavailableStore;

impl ScholarshipStore for UnavailableStore {
    fn list(&self) -> Result<Vec<ScholarshipRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn get(&self, _id: ScholarshipId) -> Result<Option<ScholarshipRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _fields: ScholarshipFields) -> Result<ScholarshipRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _id: ScholarshipId,
        _patch: ScholarshipPatch,
    ) -> Result<ScholarshipRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: ScholarshipId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
