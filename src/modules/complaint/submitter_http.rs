use reqwest::Client;
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::api::error::SystemError;
use crate::constants::WEBHOOK_TIMEOUT;
use crate::modules::complaint::{
    schema::ComplaintSubmission,
    submitter::{SubmitOutcome, Submitter},
};

/// Posts submissions as JSON to the configured webhook. One attempt, no retries.
#[derive(Clone)]
pub struct WebhookSubmitter {
    endpoint: String,
    client: Client,
}

impl WebhookSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SystemError> {
        Self::with_timeout(endpoint, WEBHOOK_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SystemError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, client))
    }

    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self { endpoint: endpoint.into(), client }
    }
}

#[async_trait::async_trait]
impl Submitter for WebhookSubmitter {
    #[instrument(skip(self, submission), fields(endpoint = %self.endpoint))]
    async fn submit(&self, submission: &ComplaintSubmission) -> SubmitOutcome {
        let body = match serde_json::to_vec(submission) {
            Ok(body) => body,
            Err(e) => {
                error!("failed to serialize complaint: {e}");
                return SubmitOutcome::UnknownError(e.to_string());
            }
        };

        debug!(bytes = body.len(), "dispatching complaint to webhook");

        let response = match self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return classify(e),
        };

        let status = response.status().as_u16();
        if status == 200 {
            debug!("webhook accepted complaint");
            return SubmitOutcome::Success;
        }

        match response.text().await {
            Ok(body) => {
                warn!(status, "webhook returned unexpected status");
                SubmitOutcome::UnexpectedStatus { status, body }
            }
            Err(e) => classify(e),
        }
    }
}

fn classify(err: reqwest::Error) -> SubmitOutcome {
    if err.is_timeout() {
        warn!("webhook request timed out");
        return SubmitOutcome::Timeout;
    }

    let cause = error_chain(&err);
    if err.is_builder() {
        error!("could not build webhook request: {cause}");
        SubmitOutcome::UnknownError(cause)
    } else if err.is_connect() || err.is_request() || err.is_body() || err.is_redirect() {
        warn!("webhook transport error: {cause}");
        SubmitOutcome::TransportError(cause)
    } else {
        error!("unexpected webhook error: {cause}");
        SubmitOutcome::UnknownError(cause)
    }
}

// reqwest keeps the useful part (refused, dns, tls) in the source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
