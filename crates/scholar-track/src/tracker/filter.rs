use serde::{Deserialize, Deserializer};

use super::domain::{ApplicationStatus, ScholarshipRecord};

/// List-view narrowing: free text over university and country, plus an exact status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub search: Option<String>,
    /// Blank and `All` mean no status narrowing.
    #[serde(default, deserialize_with = "status_label")]
    pub status: Option<ApplicationStatus>,
}

impl RecordFilter {
    pub fn matches(&self, record: &ScholarshipRecord) -> bool {
        self.matches_search(record) && self.matches_status(record)
    }

    pub fn apply(&self, records: Vec<ScholarshipRecord>) -> Vec<ScholarshipRecord> {
        if self.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.needle().is_none() && self.status.is_none()
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_search(&self, record: &ScholarshipRecord) -> bool {
        match self.needle() {
            Some(needle) => {
                record.university_name.to_lowercase().contains(&needle)
                    || record.country.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    fn matches_status(&self, record: &ScholarshipRecord) -> bool {
        self.status.map_or(true, |status| record.status == status)
    }
}

fn status_label<'de, D>(deserializer: D) -> Result<Option<ApplicationStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("All") => Ok(None),
        Some(label) => ApplicationStatus::from_label(label)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("Unknown status '{label}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(university: &str, country: &str, status: ApplicationStatus) -> ScholarshipRecord {
        ScholarshipRecord {
            scholarship_name: "Fulbright Foreign Student Program".to_string(),
            university_name: university.to_string(),
            country: country.to_string(),
            status,
            ..ScholarshipRecord::default()
        }
    }

    #[test]
    fn search_is_case_insensitive_over_university_and_country() {
        let records = vec![
            record("University of Toronto", "Canada", ApplicationStatus::Applied),
            record("TU Munich", "Germany", ApplicationStatus::Applied),
            record("Seoul National University", "South Korea", ApplicationStatus::Applied),
        ];

        let filter = RecordFilter {
            search: Some("GERMANY".to_string()),
            status: None,
        };
        assert_eq!(filter.apply(records.clone()).len(), 1);

        let filter = RecordFilter {
            search: Some("university".to_string()),
            status: None,
        };
        assert_eq!(filter.apply(records).len(), 2);
    }

    #[test]
    fn search_ignores_scholarship_name() {
        let filter = RecordFilter {
            search: Some("fulbright".to_string()),
            status: None,
        };
        assert!(!filter.matches(&record("MIT", "USA", ApplicationStatus::Applied)));
    }

    #[test]
    fn status_filter_is_exact() {
        let filter = RecordFilter {
            search: Some(String::new()),
            status: Some(ApplicationStatus::Rejected),
        };
        assert!(filter.matches(&record("MIT", "USA", ApplicationStatus::Rejected)));
        assert!(!filter.matches(&record("MIT", "USA", ApplicationStatus::Accepted)));
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        let records = vec![record("MIT", "USA", ApplicationStatus::Applied)];
        assert_eq!(filter.apply(records.clone()), records);
    }

    #[test]
    fn blank_or_all_status_decodes_to_no_filter() {
        for raw in ["", "  ", "All"] {
            let filter: RecordFilter =
                serde_json::from_value(json!({ "search": "", "status": raw })).expect("decodes");
            assert_eq!(filter.status, None);
            assert!(filter.is_empty());
        }

        let filter: RecordFilter =
            serde_json::from_value(json!({ "status": "In Progress" })).expect("decodes");
        assert_eq!(filter.status, Some(ApplicationStatus::InProgress));
        assert!(serde_json::from_value::<RecordFilter>(json!({ "status": "Pending" })).is_err());
    }
}
