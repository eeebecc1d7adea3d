use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use scholar_track::error::AppError;
use scholar_track::tracker::csv_io;
use scholar_track::tracker::domain::parse_instant;
use scholar_track::tracker::{ApplicationStatus, InMemoryScholarshipStore};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the in-memory store, seeded from a CSV export when one is given.
pub(crate) fn load_store(seed_csv: Option<&Path>) -> Result<InMemoryScholarshipStore, AppError> {
    match seed_csv {
        Some(path) => {
            let fields = csv_io::import_path(path)?;
            Ok(InMemoryScholarshipStore::with_records(fields)?)
        }
        None => Ok(InMemoryScholarshipStore::default()),
    }
}

pub(crate) fn parse_instant_arg(raw: &str) -> Result<NaiveDateTime, String> {
    parse_instant(raw)
}

pub(crate) fn parse_status_arg(raw: &str) -> Result<ApplicationStatus, String> {
    ApplicationStatus::from_label(raw.trim()).ok_or_else(|| {
        let labels: Vec<&str> = ApplicationStatus::ordered()
            .into_iter()
            .map(ApplicationStatus::label)
            .collect();
        format!("unknown status '{raw}' (expected one of: {})", labels.join(", "))
    })
}
