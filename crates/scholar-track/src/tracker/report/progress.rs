use super::super::documents::DocumentChecklist;
use super::super::domain::ScholarshipRecord;
use chrono::{NaiveDate, NaiveDateTime};

/// Cut-offs applied when building the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLimits {
    pub top_countries: usize,
    pub upcoming_deadlines: usize,
    pub urgent_within_days: i64,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            top_countries: 5,
            upcoming_deadlines: 3,
            urgent_within_days: 7,
        }
    }
}

/// Signup, start, and document progress averaged over the steps that apply.
///
/// Without required documents only signup and start count (divisor 2). The
/// document share is the literal done/required ratio and is not clamped.
pub fn completion_ratio(record: &ScholarshipRecord) -> f64 {
    let signup = if record.portal_signup { 1.0 } else { 0.0 };
    let started = if record.apply_started { 1.0 } else { 0.0 };

    match DocumentChecklist::from_record(record).literal_ratio() {
        Some(documents) => (signup + started + documents) / 3.0,
        None => (signup + started) / 2.0,
    }
}

/// Whole calendar days from the evaluation date to the deadline.
pub fn days_left(deadline: NaiveDate, now: NaiveDateTime) -> i64 {
    (deadline - now.date()).num_days()
}

/// True when the deadline, taken as the start of its day, is strictly later than `now`.
pub fn is_after(deadline: NaiveDate, now: NaiveDateTime) -> bool {
    deadline.and_time(chrono::NaiveTime::MIN) > now
}
