//! Client side of the contact form: the submission state machine and an
//! HTTP client that posts to the endpoint.
//!
//! The status texts are shared with the contact page script, which renders
//! them from the same constants.

use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use super::ContactSubmission;

pub const SENDING_MESSAGE: &str = "Sending...";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I will get back to you soon.";
pub const FAILED_PREFIX: &str = "Failed to send message: ";
pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const TRANSPORT_ERROR_MESSAGE: &str = "An error occurred while sending the message.";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// No response, or a body that is not JSON
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
}

/// State of a contact form submission.
///
/// `Idle -> Sending -> (Success | Failed)`. Editing the form after a
/// result returns it to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Sending,
    Success,
    Failed(String),
}

impl FormState {
    /// Start a submission. Any earlier result is discarded.
    pub fn submit(self) -> FormState {
        FormState::Sending
    }

    /// Whether a new submission may start from this state
    pub fn can_submit(&self) -> bool {
        !matches!(self, FormState::Sending)
    }

    /// Record the outcome of the request in flight
    pub fn finish(self, outcome: &Result<String, SubmitError>) -> FormState {
        if self != FormState::Sending {
            return self;
        }
        match outcome {
            Ok(_) => FormState::Success,
            Err(SubmitError::Rejected { message, .. }) => FormState::Failed(format!(
                "{}{}",
                FAILED_PREFIX,
                message.as_deref().unwrap_or(UNKNOWN_ERROR)
            )),
            Err(SubmitError::Transport(_)) => {
                FormState::Failed(TRANSPORT_ERROR_MESSAGE.to_string())
            }
        }
    }

    /// The user edited a field
    pub fn edit(self) -> FormState {
        match self {
            FormState::Success | FormState::Failed(_) => FormState::Idle,
            other => other,
        }
    }

    /// Text shown under the form; nothing while idle
    pub fn status_text(&self) -> Option<&str> {
        match self {
            FormState::Idle => None,
            FormState::Sending => Some(SENDING_MESSAGE),
            FormState::Success => Some(SUCCESS_MESSAGE),
            FormState::Failed(text) => Some(text),
        }
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_text().unwrap_or(""))
    }
}

/// Response body as the client reads it; `message` may be absent
#[derive(Debug, Deserialize)]
struct Reply {
    message: Option<String>,
}

/// Posts submissions to a contact endpoint
#[derive(Clone)]
pub struct ContactClient {
    client: Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Send a submission. Returns the server's acknowledgment on success.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<String, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        let message = response.json::<Reply>().await?.message;

        if status.is_success() {
            tracing::debug!("Contact endpoint accepted submission");
            Ok(message.unwrap_or_default())
        } else {
            tracing::debug!("Contact endpoint rejected submission: {}", status);
            Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Run one submission through the state machine, starting from `state`
    pub async fn send(&self, state: FormState, submission: &ContactSubmission) -> FormState {
        if !state.can_submit() {
            return state;
        }
        let state = state.submit();
        let outcome = self.submit(submission).await;
        if let Err(e) = &outcome {
            tracing::warn!("Contact submission failed: {}", e);
        }
        state.finish(&outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContactConfig;
    use crate::contact::{contact_handler, ContactService, LogSink};
    use axum::{routing::any, Router};
    use std::sync::Arc;

    fn rejected(message: Option<&str>) -> Result<String, SubmitError> {
        Err(SubmitError::Rejected {
            status: 400,
            message: message.map(|m| m.to_string()),
        })
    }

    #[test]
    fn test_state_transitions() {
        let state = FormState::default();
        assert_eq!(state.status_text(), None);

        let state = state.submit();
        assert_eq!(state.status_text(), Some("Sending..."));
        assert!(!state.can_submit());

        let state = state.finish(&Ok("Message received successfully!".to_string()));
        assert_eq!(state, FormState::Success);
        assert_eq!(
            state.to_string(),
            "Message sent successfully! I will get back to you soon."
        );

        assert_eq!(state.edit(), FormState::Idle);
    }

    #[test]
    fn test_failed_messages() {
        let state = FormState::Sending.finish(&rejected(Some("All fields are required.")));
        assert_eq!(
            state.status_text(),
            Some("Failed to send message: All fields are required.")
        );
        assert_eq!(state.clone().edit(), FormState::Idle);

        let state = FormState::Sending.finish(&rejected(None));
        assert_eq!(
            state.status_text(),
            Some("Failed to send message: Unknown error")
        );
    }

    #[test]
    fn test_finish_outside_sending_is_ignored() {
        assert_eq!(FormState::Idle.finish(&rejected(None)), FormState::Idle);
        // Editing while sending does not cancel the request
        assert_eq!(FormState::Sending.edit(), FormState::Sending);
    }

    async fn spawn_endpoint() -> String {
        let config = ContactConfig {
            delay_ms: 0,
            ..ContactConfig::default()
        };
        let service = ContactService::new(&config, Arc::new(LogSink));
        let app = Router::new()
            .route("/api/contact", any(contact_handler))
            .with_state(service);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api/contact", addr)
    }

    #[tokio::test]
    async fn test_client_round_trip() {
        let client = ContactClient::new(spawn_endpoint().await);

        let ok = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        };
        let state = client.send(FormState::Idle, &ok).await;
        assert_eq!(state, FormState::Success);

        let bad = ContactSubmission {
            message: String::new(),
            ..ok
        };
        let state = client.send(FormState::Success, &bad).await;
        assert_eq!(
            state,
            FormState::Failed("Failed to send message: All fields are required.".to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_error() {
        // Bind then drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ContactClient::new(format!("http://{}/api/contact", addr));
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        };
        let state = client.send(FormState::Idle, &submission).await;
        assert_eq!(
            state,
            FormState::Failed("An error occurred while sending the message.".to_string())
        );
    }
}
