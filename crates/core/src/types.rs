use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stage of the application pipeline a job record is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl JobStatus {
    /// Every status in counter display order.
    pub const ALL: [JobStatus; 4] = [
        Self::Applied,
        Self::Interview,
        Self::Offer,
        Self::Rejected,
    ];

    /// Returns the canonical wire representation for the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        Self::Applied
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced when parsing a status from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status {0:?}, expected one of applied, interview, offer, rejected")]
pub struct ParseStatusError(String);

impl FromStr for JobStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "applied" => Ok(Self::Applied),
            "interview" => Ok(Self::Interview),
            "offer" => Ok(Self::Offer),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseStatusError(value.to_string())),
        }
    }
}

/// Canonical job record as stored by the remote service.
///
/// The identifier is assigned by the service; a decoded record always
/// carries one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: JobStatus,
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub link: String,
}

/// Submission payload for a new record; the remote service assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub status: JobStatus,
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub link: String,
}

impl JobDraft {
    /// Required-field check applied before submission.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.company.trim().is_empty() {
            return Err(DraftError::MissingCompany);
        }
        if self.role.trim().is_empty() {
            return Err(DraftError::MissingRole);
        }
        Ok(())
    }
}

/// Validation errors for a submission draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("company must not be empty")]
    MissingCompany,
    #[error("role must not be empty")]
    MissingRole,
}

/// Partial update payload; `None` fields are omitted from the request
/// body and keep their server-side value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl JobPatch {
    /// Builds a patch that changes only the status.
    pub fn status_only(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl From<JobDraft> for JobPatch {
    fn from(draft: JobDraft) -> Self {
        Self {
            company: Some(draft.company),
            role: Some(draft.role),
            status: Some(draft.status),
            applied_date: Some(draft.applied_date),
            link: Some(draft.link),
        }
    }
}

/// Direction of the applied-date sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSort {
    Newest,
    Oldest,
}

impl DateSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

impl Default for DateSort {
    fn default() -> Self {
        Self::Newest
    }
}

impl fmt::Display for DateSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced when parsing a sort direction from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort {0:?}, expected newest or oldest")]
pub struct ParseSortError(String);

impl FromStr for DateSort {
    type Err = ParseSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            _ => Err(ParseSortError(value.to_string())),
        }
    }
}

/// Active filter and sort criteria for the derived view.
///
/// Held only by the view model, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub status: Option<JobStatus>,
    pub date_sort: DateSort,
}

/// Commands dispatched into the dashboard by the driving surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    LoadRequested,
    SubmitRequested {
        draft: JobDraft,
        editing_id: Option<String>,
    },
    DeleteRequested {
        id: String,
    },
    StatusChangeRequested {
        id: String,
        status: JobStatus,
    },
    FilterChanged {
        criteria: FilterCriteria,
    },
}

impl Intent {
    /// Returns the metrics label associated with the intent.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LoadRequested => "load",
            Self::SubmitRequested { editing_id, .. } => match editing_id {
                Some(_) => "edit",
                None => "create",
            },
            Self::DeleteRequested { .. } => "delete",
            Self::StatusChangeRequested { .. } => "status",
            Self::FilterChanged { .. } => "filter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(value: &str) -> NaiveDate {
        value.parse().expect("valid date")
    }

    #[test]
    fn record_decodes_wire_shape() {
        let payload = json!({
            "id": "job-1",
            "company": "Acme",
            "role": "Platform Engineer",
            "status": "Interview",
            "appliedDate": "2024-02-01",
            "link": "https://acme.example/careers/42"
        });
        let record: JobRecord = serde_json::from_value(payload).expect("decode record");
        assert_eq!(record.id, "job-1");
        assert_eq!(record.status, JobStatus::Interview);
        assert_eq!(record.applied_date, date("2024-02-01"));
        assert_eq!(record.link, "https://acme.example/careers/42");
    }

    #[test]
    fn record_tolerates_missing_link() {
        let payload = json!({
            "id": "job-2",
            "company": "Acme",
            "role": "Engineer",
            "status": "Applied",
            "appliedDate": "2024-01-10"
        });
        let record: JobRecord = serde_json::from_value(payload).expect("decode record");
        assert_eq!(record.link, "");
    }

    #[test]
    fn record_without_id_fails_decode() {
        let payload = json!({
            "company": "Acme",
            "role": "Engineer",
            "status": "Applied",
            "appliedDate": "2024-01-10",
            "link": ""
        });
        assert!(serde_json::from_value::<JobRecord>(payload).is_err());
    }

    #[test]
    fn record_with_malformed_date_fails_decode() {
        let payload = json!({
            "id": "job-3",
            "company": "Acme",
            "role": "Engineer",
            "status": "Applied",
            "appliedDate": "next tuesday",
            "link": ""
        });
        assert!(serde_json::from_value::<JobRecord>(payload).is_err());
    }

    #[test]
    fn draft_serializes_camel_case_body() {
        let draft = JobDraft {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            status: JobStatus::Applied,
            applied_date: date("2024-03-05"),
            link: String::new(),
        };
        let body = serde_json::to_value(&draft).expect("encode draft");
        assert_eq!(
            body,
            json!({
                "company": "Acme",
                "role": "Engineer",
                "status": "Applied",
                "appliedDate": "2024-03-05",
                "link": ""
            })
        );
    }

    #[test]
    fn draft_status_defaults_to_applied() {
        let payload = json!({
            "company": "Acme",
            "role": "Engineer",
            "appliedDate": "2024-03-05"
        });
        let draft: JobDraft = serde_json::from_value(payload).expect("decode draft");
        assert_eq!(draft.status, JobStatus::Applied);
    }

    #[test]
    fn draft_validation_requires_company_and_role() {
        let mut draft = JobDraft {
            company: "  ".to_string(),
            role: "Engineer".to_string(),
            status: JobStatus::Applied,
            applied_date: date("2024-03-05"),
            link: String::new(),
        };
        assert_eq!(draft.validate(), Err(DraftError::MissingCompany));

        draft.company = "Acme".to_string();
        draft.role = String::new();
        assert_eq!(draft.validate(), Err(DraftError::MissingRole));

        draft.role = "Engineer".to_string();
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn status_only_patch_serializes_single_field() {
        let patch = JobPatch::status_only(JobStatus::Offer);
        let body = serde_json::to_value(&patch).expect("encode patch");
        assert_eq!(body, json!({ "status": "Offer" }));
    }

    #[test]
    fn full_patch_carries_every_field() {
        let draft = JobDraft {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            status: JobStatus::Rejected,
            applied_date: date("2024-03-05"),
            link: "https://acme.example".to_string(),
        };
        let body = serde_json::to_value(JobPatch::from(draft)).expect("encode patch");
        assert_eq!(
            body,
            json!({
                "company": "Acme",
                "role": "Engineer",
                "status": "Rejected",
                "appliedDate": "2024-03-05",
                "link": "https://acme.example"
            })
        );
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("offer".parse::<JobStatus>(), Ok(JobStatus::Offer));
        assert_eq!("INTERVIEW".parse::<JobStatus>(), Ok(JobStatus::Interview));
        assert!("ghosted".parse::<JobStatus>().is_err());
    }

    #[test]
    fn sort_parses_both_directions() {
        assert_eq!("newest".parse::<DateSort>(), Ok(DateSort::Newest));
        assert_eq!("Oldest".parse::<DateSort>(), Ok(DateSort::Oldest));
        assert!("recent".parse::<DateSort>().is_err());
    }

    #[test]
    fn intent_kind_distinguishes_create_from_edit() {
        let draft = JobDraft {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            status: JobStatus::Applied,
            applied_date: date("2024-03-05"),
            link: String::new(),
        };
        let create = Intent::SubmitRequested {
            draft: draft.clone(),
            editing_id: None,
        };
        let edit = Intent::SubmitRequested {
            draft,
            editing_id: Some("job-1".to_string()),
        };
        assert_eq!(create.kind(), "create");
        assert_eq!(edit.kind(), "edit");
    }
}
