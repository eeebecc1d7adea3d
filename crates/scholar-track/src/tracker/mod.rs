//! Scholarship application tracking: records, store, HTTP contract, and dashboard.

pub mod cache;
pub mod client;
pub mod contract;
pub mod csv_io;
pub mod documents;
pub mod domain;
pub mod filter;
pub mod report;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use cache::QueryCache;
pub use client::{ClientError, TrackerClient};
pub use documents::DocumentChecklist;
pub use domain::{
    ApplicationStatus, FundingType, ScholarshipDraft, ScholarshipFields, ScholarshipId,
    ScholarshipPatch, ScholarshipPatchRequest, ScholarshipRecord,
};
pub use filter::RecordFilter;
pub use report::{completion_ratio, days_left, DashboardLimits, DashboardSummary};
pub use router::scholarship_router;
pub use service::{ScholarshipService, ServiceError};
pub use store::{InMemoryScholarshipStore, ScholarshipStore, StoreError};
pub use validation::{RecordGuard, ValidationError};
