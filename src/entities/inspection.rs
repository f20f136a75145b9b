//! Inspection entity type - submitted inspection records with free-form fields

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Status};
use crate::core::identity::EntityId;

/// One answered form field on an inspection record
///
/// Labels are free text chosen by whoever designed the form, so two projects
/// rarely agree on spelling. Semantic meaning is recovered downstream by the
/// analytics label classifier; this struct stores the raw pair untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldResponse {
    /// Field label as authored on the form
    pub label: String,

    /// Raw value as entered, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldResponse {
    /// Create a response with a value
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }

    /// Create a response that was left blank
    pub fn blank(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }
}

/// An inspection record entity
///
/// The record is immutable input for reporting: QIT reads records that the
/// surrounding workflow produced and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    /// Unique identifier
    pub id: EntityId,

    /// Record title/summary
    pub title: String,

    /// Inspection number (e.g., "INSP-2025-0042")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_number: Option<String>,

    /// Company the inspected project belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Inspector who performed the inspection
    pub inspector: String,

    /// When the record was submitted for approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,

    /// Answered form fields, in form order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<FieldResponse>,

    /// Workflow status (draft/pending/approved/rejected)
    #[serde(default)]
    pub status: Status,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this record)
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

fn default_revision() -> u32 {
    1
}

impl Entity for Inspection {
    const PREFIX: &'static str = "INSP";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> &str {
        match self.status {
            Status::Draft => "draft",
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Inspection {
    /// Create a new inspection record
    pub fn new(title: String, inspector: String, author: String) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Insp),
            title,
            inspection_number: None,
            company: None,
            inspector,
            submitted_at: None,
            responses: Vec::new(),
            status: Status::default(),
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }

    /// The calendar day the record counts toward in reports
    ///
    /// Submission date when present, creation date otherwise. Older records
    /// predate the submitted_at field, so the fallback is load-bearing.
    pub fn report_day(&self) -> NaiveDate {
        self.submitted_at.unwrap_or(self.created).date_naive()
    }
}
