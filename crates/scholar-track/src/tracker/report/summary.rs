use super::super::domain::{ApplicationStatus, ScholarshipRecord};
use super::progress::{completion_ratio, days_left, is_after, DashboardLimits};
use super::views::{
    CountryCountEntry, RecordProgressView, StatusCountEntry, UpcomingDeadlineView,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dashboard figures derived from the full record set at one evaluation instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub evaluated_at: NaiveDateTime,
    pub total: usize,
    pub accepted_count: usize,
    pub applied_count: usize,
    /// Everything neither applied nor accepted, rejected included.
    pub pending_count: usize,
    pub status_breakdown: Vec<StatusCountEntry>,
    pub country_breakdown: Vec<CountryCountEntry>,
    pub upcoming_deadlines: Vec<UpcomingDeadlineView>,
    pub record_progress: Vec<RecordProgressView>,
}

impl DashboardSummary {
    pub fn build(records: &[ScholarshipRecord], now: NaiveDateTime) -> Self {
        Self::build_with_limits(records, now, DashboardLimits::default())
    }

    pub fn build_with_limits(
        records: &[ScholarshipRecord],
        now: NaiveDateTime,
        limits: DashboardLimits,
    ) -> Self {
        let total = records.len();
        let accepted_count = count_status(records, ApplicationStatus::Accepted);
        let applied_count = count_status(records, ApplicationStatus::Applied);

        Self {
            evaluated_at: now,
            total,
            accepted_count,
            applied_count,
            pending_count: total - (applied_count + accepted_count),
            status_breakdown: status_breakdown(records),
            country_breakdown: country_breakdown(records, limits.top_countries),
            upcoming_deadlines: upcoming_deadlines(records, now, limits),
            record_progress: records.iter().map(record_progress).collect(),
        }
    }
}

fn count_status(records: &[ScholarshipRecord], status: ApplicationStatus) -> usize {
    records
        .iter()
        .filter(|record| record.status == status)
        .count()
}

fn status_breakdown(records: &[ScholarshipRecord]) -> Vec<StatusCountEntry> {
    let mut entries: Vec<StatusCountEntry> = Vec::new();
    for record in records {
        match entries.iter_mut().find(|entry| entry.status == record.status) {
            Some(entry) => entry.count += 1,
            None => entries.push(StatusCountEntry {
                status: record.status,
                count: 1,
            }),
        }
    }
    entries
}

fn country_breakdown(records: &[ScholarshipRecord], limit: usize) -> Vec<CountryCountEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<CountryCountEntry> = Vec::new();

    for record in records {
        match positions.get(record.country.as_str()) {
            Some(&index) => entries[index].count += 1,
            None => {
                positions.insert(record.country.as_str(), entries.len());
                entries.push(CountryCountEntry {
                    country: record.country.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts keep first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

fn upcoming_deadlines(
    records: &[ScholarshipRecord],
    now: NaiveDateTime,
    limits: DashboardLimits,
) -> Vec<UpcomingDeadlineView> {
    let mut upcoming: Vec<(&ScholarshipRecord, chrono::NaiveDate)> = records
        .iter()
        .filter_map(|record| record.deadline.map(|deadline| (record, deadline)))
        .filter(|(_, deadline)| is_after(*deadline, now))
        .collect();

    upcoming.sort_by_key(|(_, deadline)| *deadline);

    upcoming
        .into_iter()
        .take(limits.upcoming_deadlines)
        .map(|(record, deadline)| {
            let days_left = days_left(deadline, now);
            UpcomingDeadlineView {
                id: record.id,
                scholarship_name: record.scholarship_name.clone(),
                university_name: record.university_name.clone(),
                country: record.country.clone(),
                deadline,
                deadline_label: deadline.format("%b %-d, %Y").to_string(),
                days_left,
                urgent: days_left <= limits.urgent_within_days,
            }
        })
        .collect()
}

fn record_progress(record: &ScholarshipRecord) -> RecordProgressView {
    let ratio = completion_ratio(record);
    RecordProgressView {
        id: record.id,
        scholarship_name: record.scholarship_name.clone(),
        completion_ratio: ratio,
        completion_percent: (ratio * 100.0).round() as i64,
    }
}
