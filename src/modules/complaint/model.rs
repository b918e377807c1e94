use serde::Serialize;
use std::fmt;

use crate::modules::complaint::schema::Priority;

/// A file as it arrived from the picker, before any checks.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// In-progress form values. Owned by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub complaint: String,
    pub priority: String,
    pub files: Vec<UploadedFile>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            complaint: String::new(),
            priority: Priority::default().as_str().to_string(),
            files: Vec::new(),
        }
    }
}

impl FormState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            complaint: self.complaint.clone(),
            priority: self.priority.clone(),
            attachments: self.files.iter().map(|f| f.filename.clone()).collect(),
        }
    }
}

/// What the page should show in the form after a submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub complaint: String,
    pub priority: String,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Why a form could not be turned into a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    MissingRequiredFields,
    MissingAttachment,
    /// One message per rejected file, in upload order.
    OversizedFiles(Vec<String>),
    InvalidFields(Vec<FieldError>),
}

impl ValidationFailure {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationFailure::MissingRequiredFields => {
                "Please fill in all required fields (marked with *)"
            }
            ValidationFailure::MissingAttachment => {
                "Please attach at least one supporting document (required)."
            }
            ValidationFailure::OversizedFiles(_) => "Some files are too large.",
            ValidationFailure::InvalidFields(_) => "Validation issues:",
        }
    }

    pub fn details(&self) -> Vec<String> {
        match self {
            ValidationFailure::OversizedFiles(errors) => errors.clone(),
            ValidationFailure::InvalidFields(errors) => {
                errors.iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        }
    }
}
