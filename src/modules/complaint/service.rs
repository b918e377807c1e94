use chrono::SecondsFormat;
use log::{info, warn};
use std::sync::Arc;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::constants::MAX_ATTACHMENT_BYTES;
use crate::modules::complaint::{
    model::{FormState, UploadedFile, ValidationFailure},
    schema::{Attachment, ComplaintSubmission, Priority},
    submitter::{SubmitOutcome, Submitter},
};
use crate::utils::field_errors;

/// Result of one press of the submit button.
#[derive(Debug)]
pub enum SubmissionResult {
    /// Never reached the network.
    Rejected(ValidationFailure),
    Sent(SubmitOutcome),
}

pub fn validate(
    form: &FormState,
    files: &[UploadedFile],
) -> Result<ComplaintSubmission, ValidationFailure> {
    let timestamp = chrono::Local::now().to_rfc3339_opts(SecondsFormat::Micros, false);
    validate_at(form, files, timestamp)
}

/// Same as [`validate`] with the submission timestamp supplied by the caller.
pub fn validate_at(
    form: &FormState,
    files: &[UploadedFile],
    timestamp: String,
) -> Result<ComplaintSubmission, ValidationFailure> {
    let required = [&form.name, &form.email, &form.subject, &form.complaint];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(ValidationFailure::MissingRequiredFields);
    }
    if files.is_empty() {
        return Err(ValidationFailure::MissingAttachment);
    }

    let mut oversized = Vec::new();
    let mut attachments = Vec::with_capacity(files.len());
    for file in files {
        if file.bytes.len() > MAX_ATTACHMENT_BYTES {
            oversized.push(format!("{} exceeds 5 MB limit.", file.filename));
            continue;
        }
        attachments.push(Attachment::from_bytes(
            &file.filename,
            file.content_type.as_deref(),
            &file.bytes,
        ));
    }

    if !oversized.is_empty() {
        return Err(ValidationFailure::OversizedFiles(oversized));
    }
    if attachments.is_empty() {
        return Err(ValidationFailure::MissingAttachment);
    }

    let priority = form.priority.parse::<Priority>();
    let candidate = ComplaintSubmission {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        subject: form.subject.trim().to_string(),
        complaint: form.complaint.trim().to_string(),
        priority: *priority.as_ref().unwrap_or(&Priority::Low),
        timestamp,
        attachments,
    };

    let mut errors = candidate.validate().err().unwrap_or_else(ValidationErrors::new);
    if let Err(e) = priority {
        errors.add("priority", ValidationError::new("priority").with_message(e.to_string().into()));
    }

    if errors.is_empty() {
        Ok(candidate)
    } else {
        Err(ValidationFailure::InvalidFields(field_errors(&errors)))
    }
}

pub struct ComplaintService<S>
where
    S: Submitter + Send + Sync,
{
    submitter: Arc<S>,
}

impl<S> ComplaintService<S>
where
    S: Submitter + Send + Sync,
{
    pub fn new(submitter: Arc<S>) -> Self {
        info!("ComplaintService initialized");
        Self { submitter }
    }

    /// Validates the form and, if it passes, forwards it to the webhook.
    ///
    /// The form is reset only when the webhook answers with success; every
    /// other result leaves it untouched so the user can retry.
    pub async fn submit(&self, form: &mut FormState) -> SubmissionResult {
        let submission = match validate(form, &form.files) {
            Ok(submission) => submission,
            Err(failure) => {
                info!("Complaint rejected by validation: {}", failure.message());
                return SubmissionResult::Rejected(failure);
            }
        };

        info!(
            "Submitting complaint '{}' with {} attachment(s)",
            submission.subject,
            submission.attachments.len()
        );
        let outcome = self.submitter.submit(&submission).await;

        if outcome.is_success() {
            form.reset();
        } else {
            warn!("Complaint not accepted: {}", outcome.message());
        }
        SubmissionResult::Sent(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const TS: &str = "2026-10-15T09:30:00.000000+00:00";

    fn file(name: &str, size: usize) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: vec![7u8; size],
        }
    }

    fn jane() -> FormState {
        FormState {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            subject: "Broken unit".into(),
            complaint: "It stopped working after one week of use.".into(),
            priority: "High".into(),
            files: vec![file("invoice.pdf", 1024)],
        }
    }

    fn check(form: &FormState) -> Result<ComplaintSubmission, ValidationFailure> {
        validate_at(form, &form.files, TS.to_string())
    }

    fn invalid_fields(result: Result<ComplaintSubmission, ValidationFailure>) -> Vec<String> {
        match result {
            Err(ValidationFailure::InvalidFields(errors)) => {
                errors.iter().map(|e| e.field.clone()).collect()
            }
            other => panic!("Expected InvalidFields, got {:?}", other),
        }
    }

    // === Required fields ===

    #[test]
    fn test_each_blank_required_field_is_rejected() {
        for field in ["name", "email", "subject", "complaint"] {
            let mut form = jane();
            let value = match field {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "subject" => &mut form.subject,
                _ => &mut form.complaint,
            };
            *value = "   ".to_string();
            assert_eq!(check(&form).unwrap_err(), ValidationFailure::MissingRequiredFields);
        }
    }

    #[test]
    fn test_no_files_is_rejected() {
        let mut form = jane();
        form.files.clear();
        assert_eq!(check(&form).unwrap_err(), ValidationFailure::MissingAttachment);
    }

    #[test]
    fn test_required_fields_checked_before_files() {
        let form = FormState::default();
        assert_eq!(check(&form).unwrap_err(), ValidationFailure::MissingRequiredFields);
    }

    // === Size filtering ===

    #[test]
    fn test_file_at_limit_is_accepted() {
        let mut form = jane();
        form.files = vec![file("exact.bin", MAX_ATTACHMENT_BYTES)];
        let submission = check(&form).unwrap();
        assert_eq!(submission.attachments[0].size_bytes, 5_242_880);
    }

    #[test]
    fn test_file_over_limit_is_rejected() {
        let mut form = jane();
        form.files = vec![file("big.bin", MAX_ATTACHMENT_BYTES + 1), file("ok.pdf", 10)];
        assert_eq!(
            check(&form).unwrap_err(),
            ValidationFailure::OversizedFiles(vec!["big.bin exceeds 5 MB limit.".to_string()])
        );
    }

    #[test]
    fn test_every_oversized_file_reported() {
        let mut form = jane();
        form.files = vec![
            file("a.bin", MAX_ATTACHMENT_BYTES + 1),
            file("b.bin", MAX_ATTACHMENT_BYTES + 1),
            file("c.bin", MAX_ATTACHMENT_BYTES + 1),
        ];
        match check(&form).unwrap_err() {
            ValidationFailure::OversizedFiles(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].starts_with("a.bin"));
                assert!(errors[1].starts_with("b.bin"));
                assert!(errors[2].starts_with("c.bin"));
            }
            other => panic!("Expected OversizedFiles, got {:?}", other),
        }
    }

    // === Structural validation ===

    #[test]
    fn test_name_is_trimmed() {
        let padded = FormState { name: " Jane ".into(), ..jane() };
        let plain = FormState { name: "Jane".into(), ..jane() };
        assert_eq!(check(&padded).unwrap().name, "Jane");
        assert_eq!(check(&plain).unwrap().name, "Jane");
    }

    #[test]
    fn test_email_format() {
        let bad = FormState { email: "not-an-email".into(), ..jane() };
        assert_eq!(invalid_fields(check(&bad)), vec!["email"]);

        let good = FormState { email: "a@b.co".into(), ..jane() };
        assert_eq!(check(&good).unwrap().email, "a@b.co");
    }

    #[test]
    fn test_invalid_priority_rejected() {
        let form = FormState { priority: "Critical".into(), ..jane() };
        match check(&form).unwrap_err() {
            ValidationFailure::InvalidFields(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(
                    errors[0].to_string(),
                    "priority: must be one of Low, Medium, High, Urgent"
                );
            }
            other => panic!("Expected InvalidFields, got {:?}", other),
        }
    }

    #[test]
    fn test_all_violations_reported_in_order() {
        let form = FormState {
            name: "J".into(),
            email: "nope".into(),
            subject: "Hi".into(),
            complaint: "Too short".into(),
            priority: "low".into(),
            ..jane()
        };
        assert_eq!(
            invalid_fields(check(&form)),
            vec!["name", "email", "subject", "complaint", "priority"]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 100 two-byte characters
        let form = FormState { name: "é".repeat(100), ..jane() };
        assert!(check(&form).is_ok());
        let form = FormState { name: "é".repeat(101), ..jane() };
        assert_eq!(invalid_fields(check(&form)), vec!["name"]);
    }

    #[test]
    fn test_long_filename_reported_with_path() {
        let mut form = jane();
        form.files = vec![file(&"x".repeat(256), 4)];
        assert_eq!(invalid_fields(check(&form)), vec!["attachments[0].filename"]);
    }

    #[test]
    fn test_jane_doe_builds_payload() {
        let submission = check(&jane()).unwrap();
        assert_eq!(submission.priority, Priority::High);
        assert_eq!(submission.timestamp, TS);
        assert_eq!(submission.attachments.len(), 1);
        assert_eq!(submission.attachments[0].size_bytes, 1024);
        assert_eq!(submission.attachments[0].filename, "invoice.pdf");
    }

    #[test]
    fn test_validate_stamps_parseable_timestamp() {
        let form = jane();
        let submission = validate(&form, &form.files).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&submission.timestamp).is_ok());
    }

    // === Controller ===

    struct FakeSubmitter {
        outcome: SubmitOutcome,
        calls: AtomicUsize,
        last: Mutex<Option<ComplaintSubmission>>,
    }

    impl FakeSubmitter {
        fn returning(outcome: SubmitOutcome) -> Arc<Self> {
            Arc::new(Self { outcome, calls: AtomicUsize::new(0), last: Mutex::new(None) })
        }
    }

    #[async_trait::async_trait]
    impl Submitter for FakeSubmitter {
        async fn submit(&self, submission: &ComplaintSubmission) -> SubmitOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(submission.clone());
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_success_resets_form() {
        let fake = FakeSubmitter::returning(SubmitOutcome::Success);
        let service = ComplaintService::new(fake.clone());
        let mut form = jane();

        let result = service.submit(&mut form).await;

        assert!(matches!(result, SubmissionResult::Sent(SubmitOutcome::Success)));
        assert_eq!(form, FormState::default());
        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);
        let sent = fake.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.attachments[0].size_bytes, 1024);
    }

    #[tokio::test]
    async fn test_failures_keep_form() {
        let outcomes = [
            SubmitOutcome::UnexpectedStatus { status: 500, body: "boom".into() },
            SubmitOutcome::Timeout,
            SubmitOutcome::TransportError("connection refused".into()),
            SubmitOutcome::UnknownError("bad request builder".into()),
        ];
        for outcome in outcomes {
            let service = ComplaintService::new(FakeSubmitter::returning(outcome));
            let mut form = jane();
            let result = service.submit(&mut form).await;
            assert!(matches!(result, SubmissionResult::Sent(_)));
            assert_eq!(form, jane());
        }
    }

    #[tokio::test]
    async fn test_rejected_form_never_submitted() {
        let fake = FakeSubmitter::returning(SubmitOutcome::Success);
        let service = ComplaintService::new(fake.clone());
        let mut form = FormState { email: "not-an-email".into(), ..jane() };

        let result = service.submit(&mut form).await;

        assert!(matches!(result, SubmissionResult::Rejected(ValidationFailure::InvalidFields(_))));
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.email, "not-an-email");
    }
}
