use super::super::domain::{ApplicationStatus, ScholarshipId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountEntry {
    pub status: ApplicationStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCountEntry {
    pub country: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDeadlineView {
    pub id: ScholarshipId,
    pub scholarship_name: String,
    pub university_name: String,
    pub country: String,
    pub deadline: NaiveDate,
    pub deadline_label: String,
    pub days_left: i64,
    pub urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProgressView {
    pub id: ScholarshipId,
    pub scholarship_name: String,
    pub completion_ratio: f64,
    pub completion_percent: i64,
}
