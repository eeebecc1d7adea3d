use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Store-assigned identifier for a scholarship record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScholarshipId(pub i64);

impl fmt::Display for ScholarshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FundingType {
    #[default]
    Full,
    Partial,
    #[serde(rename = "Self-funded")]
    SelfFunded,
    External,
}

impl FundingType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Full, Self::Partial, Self::SelfFunded, Self::External]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Partial => "Partial",
            Self::SelfFunded => "Self-funded",
            Self::External => "External",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|funding| funding.label() == value)
    }
}

/// Application status; matching is exact and case-sensitive against the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    Researching,
    #[serde(rename = "In Progress")]
    InProgress,
    Applied,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::NotStarted,
            Self::Researching,
            Self::InProgress,
            Self::Applied,
            Self::Interview,
            Self::Accepted,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Researching => "Researching",
            Self::InProgress => "In Progress",
            Self::Applied => "Applied",
            Self::Interview => "Interview",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == value)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A tracked scholarship application.
///
/// Decoding is relaxed: every missing or `null` field falls back to its natural
/// default so dashboard aggregation never fails on partial payloads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScholarshipRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: ScholarshipId,
    #[serde(deserialize_with = "null_as_default")]
    pub scholarship_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub university_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub funding_type: FundingType,
    pub professor_email: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub required_documents: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub documents_done: Vec<String>,
    #[serde(deserialize_with = "deserialize_optional_deadline")]
    pub deadline: Option<NaiveDate>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: ApplicationStatus,
    pub apply_link: Option<String>,
    pub notes: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub portal_signup: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub apply_started: bool,
}

impl ScholarshipRecord {
    pub fn from_fields(id: ScholarshipId, fields: ScholarshipFields) -> Self {
        let ScholarshipFields {
            scholarship_name,
            university_name,
            country,
            funding_type,
            professor_email,
            required_documents,
            documents_done,
            deadline,
            status,
            apply_link,
            notes,
            portal_signup,
            apply_started,
        } = fields;

        Self {
            id,
            scholarship_name,
            university_name,
            country,
            funding_type,
            professor_email,
            required_documents,
            documents_done,
            deadline,
            status,
            apply_link,
            notes,
            portal_signup,
            apply_started,
        }
    }

    /// Applies every field present in the patch and leaves the rest untouched.
    pub fn apply(&mut self, patch: ScholarshipPatch) {
        let ScholarshipPatch {
            scholarship_name,
            university_name,
            country,
            funding_type,
            professor_email,
            required_documents,
            documents_done,
            deadline,
            status,
            apply_link,
            notes,
            portal_signup,
            apply_started,
        } = patch;

        if let Some(value) = scholarship_name {
            self.scholarship_name = value;
        }
        if let Some(value) = university_name {
            self.university_name = value;
        }
        if let Some(value) = country {
            self.country = value;
        }
        if let Some(value) = funding_type {
            self.funding_type = value;
        }
        if let Some(value) = professor_email {
            self.professor_email = value;
        }
        if let Some(value) = required_documents {
            self.required_documents = value;
        }
        if let Some(value) = documents_done {
            self.documents_done = value;
        }
        if let Some(value) = deadline {
            self.deadline = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = apply_link {
            self.apply_link = value;
        }
        if let Some(value) = notes {
            self.notes = value;
        }
        if let Some(value) = portal_signup {
            self.portal_signup = value;
        }
        if let Some(value) = apply_started {
            self.apply_started = value;
        }
    }
}

/// Validated create payload with defaults applied; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ScholarshipFields {
    pub scholarship_name: String,
    pub university_name: String,
    pub country: String,
    pub funding_type: FundingType,
    pub professor_email: Option<String>,
    pub required_documents: Vec<String>,
    pub documents_done: Vec<String>,
    pub deadline: Option<NaiveDate>,
    pub status: ApplicationStatus,
    pub apply_link: Option<String>,
    pub notes: Option<String>,
    pub portal_signup: bool,
    pub apply_started: bool,
}

/// Create request as received on the wire.
///
/// Required fields stay optional here so validation can report which one is
/// missing instead of failing inside the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholarship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_done: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_deadline",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_signup: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_started: Option<bool>,
}

impl ScholarshipDraft {
    pub fn new(
        scholarship_name: impl Into<String>,
        university_name: impl Into<String>,
        country: impl Into<String>,
        funding_type: FundingType,
    ) -> Self {
        Self {
            scholarship_name: Some(scholarship_name.into()),
            university_name: Some(university_name.into()),
            country: Some(country.into()),
            funding_type: Some(funding_type.label().to_string()),
            ..Self::default()
        }
    }
}

/// Update request as received on the wire.
///
/// Outer `None` means "leave untouched"; for nullable columns `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipPatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholarship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub professor_email: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_done: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_present_deadline",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub apply_link: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_signup: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_started: Option<bool>,
}

/// Validated partial update handed to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScholarshipPatch {
    pub scholarship_name: Option<String>,
    pub university_name: Option<String>,
    pub country: Option<String>,
    pub funding_type: Option<FundingType>,
    pub professor_email: Option<Option<String>>,
    pub required_documents: Option<Vec<String>>,
    pub documents_done: Option<Vec<String>>,
    pub deadline: Option<Option<NaiveDate>>,
    pub status: Option<ApplicationStatus>,
    pub apply_link: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub portal_signup: Option<bool>,
    pub apply_started: Option<bool>,
}

/// Parses a deadline given either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_deadline(raw: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| Some(timestamp.date_naive()))
        .map_err(|err| format!("failed to parse '{raw}' as a date ({err})"))
}

/// Parses an evaluation instant: `YYYY-MM-DDTHH:MM:SS`, RFC 3339, or a bare date (midnight).
pub fn parse_instant(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    if let Ok(instant) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(instant);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.naive_local());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|err| format!("failed to parse '{raw}' as a date or date-time ({err})"))
}

fn deserialize_optional_deadline<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(value) => parse_deadline(&value).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_present_deadline<'de, D>(
    deserializer: D,
) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_deadline(deserializer).map(Some)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
