use super::domain::{
    ApplicationStatus, FundingType, ScholarshipDraft, ScholarshipFields, ScholarshipPatch,
    ScholarshipPatchRequest,
};

/// Rejected input, reported to callers as HTTP 400 with the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    pub fn for_field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }
}

/// Turns wire payloads into store-ready values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordGuard;

impl RecordGuard {
    pub fn fields_from_draft(
        &self,
        draft: ScholarshipDraft,
    ) -> Result<ScholarshipFields, ValidationError> {
        let ScholarshipDraft {
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
        } = draft;

        let scholarship_name = non_empty(
            "scholarshipName",
            "Scholarship name is required",
            scholarship_name,
        )?;
        let university_name = non_empty(
            "universityName",
            "University name is required",
            university_name,
        )?;
        let country = country.ok_or_else(|| {
            ValidationError::for_field("country", "Country is required")
        })?;
        let funding_type = match funding_type {
            Some(raw) => parse_funding(&raw)?,
            None => {
                return Err(ValidationError::for_field(
                    "fundingType",
                    "Funding type is required",
                ))
            }
        };
        let status = match status {
            Some(raw) => parse_status(&raw)?,
            None => ApplicationStatus::default(),
        };

        Ok(ScholarshipFields {
            scholarship_name,
            university_name,
            country,
            funding_type,
            professor_email: blank_as_none(professor_email),
            required_documents: required_documents.unwrap_or_default(),
            documents_done: documents_done.unwrap_or_default(),
            deadline,
            status,
            apply_link: blank_as_none(apply_link),
            notes: blank_as_none(notes),
            portal_signup: portal_signup.unwrap_or(false),
            apply_started: apply_started.unwrap_or(false),
        })
    }

    pub fn patch_from_request(
        &self,
        request: ScholarshipPatchRequest,
    ) -> Result<ScholarshipPatch, ValidationError> {
        let ScholarshipPatchRequest {
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
        } = request;

        let scholarship_name = match scholarship_name {
            Some(value) => Some(non_empty(
                "scholarshipName",
                "Scholarship name is required",
                Some(value),
            )?),
            None => None,
        };
        let university_name = match university_name {
            Some(value) => Some(non_empty(
                "universityName",
                "University name is required",
                Some(value),
            )?),
            None => None,
        };
        let funding_type = funding_type.as_deref().map(parse_funding).transpose()?;
        let status = status.as_deref().map(parse_status).transpose()?;

        Ok(ScholarshipPatch {
            scholarship_name,
            university_name,
            country,
            funding_type,
            professor_email: professor_email.map(blank_as_none),
            required_documents,
            documents_done,
            deadline,
            status,
            apply_link: apply_link.map(blank_as_none),
            notes: notes.map(blank_as_none),
            portal_signup,
            apply_started,
        })
    }
}

fn non_empty(
    field: &str,
    message: &str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::for_field(field, message)),
    }
}

fn blank_as_none(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_funding(raw: &str) -> Result<FundingType, ValidationError> {
    FundingType::from_label(raw).ok_or_else(|| {
        ValidationError::for_field("fundingType", format!("Unknown funding type '{raw}'"))
    })
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, ValidationError> {
    ApplicationStatus::from_label(raw)
        .ok_or_else(|| ValidationError::for_field("status", format!("Unknown status '{raw}'")))
}
