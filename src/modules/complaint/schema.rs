use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};
use validator::{Validate, ValidationError};

use crate::constants::PRIORITY_OPTIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("must be one of Low, Medium, High, Urgent")]
pub struct InvalidPriority;

impl FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            "Urgent" => Ok(Priority::Urgent),
            _ => Err(InvalidPriority),
        }
    }
}

/// One uploaded file, embedded in the payload.
///
/// `size_bytes` always equals the decoded length of `content_base64`; build it
/// with [`Attachment::from_bytes`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Attachment {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub filename: String,
    pub content_type: Option<String>,
    #[validate(range(max = 5242880, message = "must not exceed 5242880 bytes"))]
    pub size_bytes: u64,
    pub content_base64: String,
}

impl Attachment {
    pub fn from_bytes(filename: &str, content_type: Option<&str>, bytes: &[u8]) -> Self {
        Attachment {
            filename: filename.to_string(),
            content_type: content_type.map(str::to_string),
            size_bytes: bytes.len() as u64,
            content_base64: STANDARD.encode(bytes),
        }
    }
}

/// The JSON body posted to the webhook.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComplaintSubmission {
    #[validate(length(min = 2, max = 100, message = "must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "invalid format"))]
    pub email: String,
    #[validate(length(min = 3, max = 200, message = "must be between 3 and 200 characters"))]
    pub subject: String,
    #[validate(length(min = 10, max = 2000, message = "must be between 10 and 2000 characters"))]
    pub complaint: String,
    pub priority: Priority,
    #[validate(custom(function = validate_timestamp))]
    pub timestamp: String,
    #[validate(length(min = 1, message = "at least one attachment is required"), nested)]
    pub attachments: Vec<Attachment>,
}

fn validate_timestamp(value: &str) -> Result<(), ValidationError> {
    chrono::DateTime::parse_from_rfc3339(value).map(|_| ()).map_err(|_| {
        ValidationError::new("timestamp")
            .with_message(Cow::Borrowed("must be an ISO-8601 datetime"))
    })
}

/// Metadata the form page needs to draw its widgets.
#[derive(Debug, Serialize)]
pub struct FormMetadata {
    pub priorities: [&'static str; 4],
    pub default_priority: Priority,
    pub max_attachment_bytes: usize,
    pub name_length: (usize, usize),
    pub subject_length: (usize, usize),
    pub complaint_length: (usize, usize),
}

impl Default for FormMetadata {
    fn default() -> Self {
        Self {
            priorities: PRIORITY_OPTIONS,
            default_priority: Priority::default(),
            max_attachment_bytes: crate::constants::MAX_ATTACHMENT_BYTES,
            name_length: (2, 100),
            subject_length: (3, 200),
            complaint_length: (10, 2000),
        }
    }
}
