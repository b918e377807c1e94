use crate::modules::complaint::schema::ComplaintSubmission;

/// Every way a webhook call can end. Failures are classified here so the
/// caller never inspects transport errors itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Success,
    UnexpectedStatus { status: u16, body: String },
    Timeout,
    TransportError(String),
    UnknownError(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success)
    }

    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Success => "Your complaint has been submitted successfully!".to_string(),
            SubmitOutcome::UnexpectedStatus { status, .. } => {
                format!("Submission received with status code: {status}")
            }
            SubmitOutcome::Timeout => "Request timed out. Please try again.".to_string(),
            SubmitOutcome::TransportError(cause) => {
                format!("An error occurred while submitting: {cause}")
            }
            SubmitOutcome::UnknownError(cause) => format!("Unexpected error: {cause}"),
        }
    }
}

#[async_trait::async_trait]
pub trait Submitter {
    async fn submit(&self, submission: &ComplaintSubmission) -> SubmitOutcome;
}
