//! Spreadsheet import/export of scholarship records.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{parse_deadline, ScholarshipDraft, ScholarshipFields, ScholarshipRecord};
use super::validation::{RecordGuard, ValidationError};

const LIST_SEPARATOR: char = ';';

const HEADERS: [&str; 14] = [
    "ID",
    "Scholarship Name",
    "University Name",
    "Country",
    "Funding Type",
    "Professor Email",
    "Required Documents",
    "Documents Done",
    "Deadline",
    "Status",
    "Apply Link",
    "Notes",
    "Portal Signup",
    "Apply Started",
];

#[derive(Debug, thiserror::Error)]
pub enum CsvImportError {
    #[error("failed to read scholarship export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scholarship CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

pub fn import_path<P: AsRef<Path>>(path: P) -> Result<Vec<ScholarshipFields>, CsvImportError> {
    let file = std::fs::File::open(path)?;
    import_reader(file)
}

/// Reads rows and validates each one the same way the create endpoint does.
pub fn import_reader<R: Read>(reader: R) -> Result<Vec<ScholarshipFields>, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let guard = RecordGuard;
    let mut imported = Vec::new();

    for (index, row) in csv_reader.deserialize::<ScholarshipRow>().enumerate() {
        let fields = row?
            .into_draft()
            .and_then(|draft| guard.fields_from_draft(draft))
            .map_err(|source| CsvImportError::Row {
                row: index + 1,
                source,
            })?;
        imported.push(fields);
    }

    Ok(imported)
}

pub fn export_writer<W: Write>(writer: W, records: &[ScholarshipRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for record in records {
        csv_writer.write_record([
            record.id.to_string(),
            record.scholarship_name.clone(),
            record.university_name.clone(),
            record.country.clone(),
            record.funding_type.label().to_string(),
            record.professor_email.clone().unwrap_or_default(),
            join_list(&record.required_documents),
            join_list(&record.documents_done),
            record
                .deadline
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            record.status.label().to_string(),
            record.apply_link.clone().unwrap_or_default(),
            record.notes.clone().unwrap_or_default(),
            record.portal_signup.to_string(),
            record.apply_started.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ScholarshipRow {
    #[serde(rename = "Scholarship Name", default, deserialize_with = "empty_string_as_none")]
    scholarship_name: Option<String>,
    #[serde(rename = "University Name", default, deserialize_with = "empty_string_as_none")]
    university_name: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(rename = "Funding Type", default, deserialize_with = "empty_string_as_none")]
    funding_type: Option<String>,
    #[serde(rename = "Professor Email", default, deserialize_with = "empty_string_as_none")]
    professor_email: Option<String>,
    #[serde(rename = "Required Documents", default)]
    required_documents: String,
    #[serde(rename = "Documents Done", default)]
    documents_done: String,
    #[serde(rename = "Deadline", default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Apply Link", default, deserialize_with = "empty_string_as_none")]
    apply_link: Option<String>,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(rename = "Portal Signup", default, deserialize_with = "flag")]
    portal_signup: Option<bool>,
    #[serde(rename = "Apply Started", default, deserialize_with = "flag")]
    apply_started: Option<bool>,
}

impl ScholarshipRow {
    fn into_draft(self) -> Result<ScholarshipDraft, ValidationError> {
        let deadline = match self.deadline.as_deref() {
            Some(raw) => parse_deadline(raw)
                .map_err(|message| ValidationError::for_field("deadline", message))?,
            None => None,
        };

        Ok(ScholarshipDraft {
            scholarship_name: self.scholarship_name,
            university_name: self.university_name,
            country: self.country,
            funding_type: self.funding_type,
            professor_email: self.professor_email,
            required_documents: Some(split_list(&self.required_documents)),
            documents_done: Some(split_list(&self.documents_done)),
            deadline,
            status: self.status,
            apply_link: self.apply_link,
            notes: self.notes,
            portal_signup: self.portal_signup,
            apply_started: self.apply_started,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_list(entries: &[String]) -> String {
    entries.join(&LIST_SEPARATOR.to_string())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = empty_string_as_none(deserializer)?;
    match opt.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(None),
        Some("true" | "yes" | "y" | "1") => Ok(Some(true)),
        Some("false" | "no" | "n" | "0") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected yes/no flag, found '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::domain::{ApplicationStatus, FundingType, ScholarshipId};
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
Scholarship Name,University Name,Country,Funding Type,Professor Email,Required Documents,Documents Done,Deadline,Status,Apply Link,Notes,Portal Signup,Apply Started
Gates Cambridge,University of Cambridge,United Kingdom,Full,,CV; Transcript ;Research proposal,CV,2026-10-14,Researching,https://www.gatescambridge.org,,yes,no
MEXT,University of Tokyo,Japan,Full,sato@u-tokyo.ac.jp,,,,,,,,
";

    #[test]
    fn import_parses_lists_flags_and_defaults() {
        let rows = import_reader(SAMPLE.as_bytes()).expect("sample imports");
        assert_eq!(rows.len(), 2);

        let gates = &rows[0];
        assert_eq!(
            gates.required_documents,
            vec!["CV", "Transcript", "Research proposal"]
        );
        assert_eq!(gates.documents_done, vec!["CV"]);
        assert_eq!(gates.deadline, NaiveDate::from_ymd_opt(2026, 10, 14));
        assert_eq!(gates.status, ApplicationStatus::Researching);
        assert!(gates.portal_signup);
        assert!(!gates.apply_started);
        assert_eq!(gates.professor_email, None);

        let mext = &rows[1];
        assert_eq!(mext.status, ApplicationStatus::NotStarted);
        assert_eq!(mext.funding_type, FundingType::Full);
        assert!(mext.required_documents.is_empty());
        assert_eq!(mext.deadline, None);
    }

    #[test]
    fn import_reports_the_offending_row() {
        let data = "\
Scholarship Name,University Name,Country,Funding Type
Chevening,UCL,United Kingdom,Full
,LSE,United Kingdom,Full
";
        match import_reader(data.as_bytes()) {
            Err(CsvImportError::Row { row, source }) => {
                assert_eq!(row, 2);
                assert_eq!(source.field.as_deref(), Some("scholarshipName"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn import_rejects_unparseable_deadlines() {
        let data = "\
Scholarship Name,University Name,Country,Funding Type,Deadline
DAAD,TU Berlin,Germany,Full,sometime in spring
";
        match import_reader(data.as_bytes()) {
            Err(CsvImportError::Row { row, source }) => {
                assert_eq!(row, 1);
                assert_eq!(source.field.as_deref(), Some("deadline"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn export_writes_header_and_joined_lists() {
        let record = ScholarshipRecord {
            id: ScholarshipId(3),
            scholarship_name: "Vanier".to_string(),
            university_name: "McGill".to_string(),
            country: "Canada".to_string(),
            funding_type: FundingType::External,
            required_documents: vec!["CV".to_string(), "Essay".to_string()],
            deadline: NaiveDate::from_ymd_opt(2026, 11, 1),
            status: ApplicationStatus::Applied,
            portal_signup: true,
            ..ScholarshipRecord::default()
        };

        let mut buffer = Vec::new();
        export_writer(&mut buffer, &[record]).expect("export succeeds");
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();

        assert!(lines
            .next()
            .expect("header")
            .starts_with("ID,Scholarship Name,University Name"));
        assert_eq!(
            lines.next().expect("row"),
            "3,Vanier,McGill,Canada,External,,CV;Essay,,2026-11-01,Applied,,,true,false"
        );
    }
}
