use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::modules::complaint::{
    model::{FormSnapshot, FormState, ValidationFailure},
    service::SubmissionResult,
    submitter::SubmitOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Success,
    RequiredFields,
    MissingAttachment,
    OversizedFiles,
    InvalidFields,
    UnexpectedStatus,
    Timeout,
    TransportError,
    UnknownError,
}

/// The one message a submission attempt produces, plus the form to show next.
#[derive(Debug, Serialize)]
pub struct SubmissionReport {
    pub kind: ReportKind,
    pub message: String,
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    pub form: FormSnapshot,
}

impl SubmissionReport {
    /// `form` is the state after the attempt (already reset on success).
    pub fn new(result: &SubmissionResult, form: &FormState) -> Self {
        let mut report = SubmissionReport {
            kind: ReportKind::Success,
            message: String::new(),
            details: Vec::new(),
            status_code: None,
            response_body: None,
            form: form.snapshot(),
        };

        match result {
            SubmissionResult::Rejected(failure) => {
                report.kind = match failure {
                    ValidationFailure::MissingRequiredFields => ReportKind::RequiredFields,
                    ValidationFailure::MissingAttachment => ReportKind::MissingAttachment,
                    ValidationFailure::OversizedFiles(_) => ReportKind::OversizedFiles,
                    ValidationFailure::InvalidFields(_) => ReportKind::InvalidFields,
                };
                report.message = failure.message().to_string();
                report.details = failure.details();
            }
            SubmissionResult::Sent(outcome) => {
                report.kind = match outcome {
                    SubmitOutcome::Success => ReportKind::Success,
                    SubmitOutcome::UnexpectedStatus { status, body } => {
                        report.status_code = Some(*status);
                        report.response_body = Some(body.clone());
                        ReportKind::UnexpectedStatus
                    }
                    SubmitOutcome::Timeout => ReportKind::Timeout,
                    SubmitOutcome::TransportError(_) => ReportKind::TransportError,
                    SubmitOutcome::UnknownError(_) => ReportKind::UnknownError,
                };
                report.message = outcome.message();
            }
        }
        report
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ReportKind::Success => StatusCode::OK,
            ReportKind::RequiredFields
            | ReportKind::MissingAttachment
            | ReportKind::OversizedFiles
            | ReportKind::InvalidFields => StatusCode::UNPROCESSABLE_ENTITY,
            ReportKind::UnexpectedStatus | ReportKind::TransportError => StatusCode::BAD_GATEWAY,
            ReportKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ReportKind::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::Responder for SubmissionReport {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status()).json(self)
    }
}
