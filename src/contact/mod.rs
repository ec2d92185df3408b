//! Contact form endpoint
//!
//! Accepts `{name, email, message}` as JSON, validates that all three are
//! non-empty strings, waits for the configured delay and hands the
//! submission to a [`ContactSink`].

pub mod client;

use axum::{
    body::Bytes,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::ContactConfig;

pub const RECEIVED_MESSAGE: &str = "Message received successfully!";
pub const FIELDS_REQUIRED_MESSAGE: &str = "All fields are required.";

/// A validated contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("{}", FIELDS_REQUIRED_MESSAGE)]
    MissingFields,
}

impl ContactSubmission {
    /// Validate a request body.
    ///
    /// Each field must be a non-empty string. Whitespace is not trimmed, so
    /// `" "` is accepted. A body that is not a JSON object is rejected the
    /// same way as one with missing fields.
    pub fn validate(body: &Value) -> Result<Self, ContactError> {
        let field = |name: &str| -> Result<String, ContactError> {
            match body.get(name) {
                Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
                _ => Err(ContactError::MissingFields),
            }
        };

        Ok(Self {
            name: field("name")?,
            email: field("email")?,
            message: field("message")?,
        })
    }
}

/// Where accepted submissions go
pub trait ContactSink: Send + Sync {
    fn deliver(&self, submission: &ContactSubmission) -> anyhow::Result<()>;
}

/// Records submissions in the log and nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ContactSink for LogSink {
    fn deliver(&self, submission: &ContactSubmission) -> anyhow::Result<()> {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            message = %submission.message,
            "Contact form submission received"
        );
        Ok(())
    }
}

/// JSON body of every contact response that carries one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

fn json_message(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ContactResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// The contact endpoint, independent of how it is mounted
#[derive(Clone)]
pub struct ContactService {
    sink: Arc<dyn ContactSink>,
    delay: Duration,
}

impl ContactService {
    pub fn new(config: &ContactConfig, sink: Arc<dyn ContactSink>) -> Self {
        Self {
            sink,
            delay: Duration::from_millis(config.delay_ms),
        }
    }

    /// Handle one request to the endpoint
    pub async fn handle(&self, method: &Method, body: &[u8]) -> Response {
        if *method != Method::POST {
            tracing::debug!(method = %method, "Rejected contact request");
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                format!("Method {} Not Allowed", method),
            )
                .into_response();
        }

        let submission = match serde_json::from_slice::<Value>(body)
            .map_err(|_| ContactError::MissingFields)
            .and_then(|value| ContactSubmission::validate(&value))
        {
            Ok(submission) => submission,
            Err(e) => {
                tracing::debug!("Invalid contact submission: {}", e);
                return json_message(StatusCode::BAD_REQUEST, &e.to_string());
            }
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Err(e) = self.sink.deliver(&submission) {
            tracing::error!("Failed to deliver contact submission: {:#}", e);
            return json_message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.");
        }

        json_message(StatusCode::OK, RECEIVED_MESSAGE)
    }
}

/// axum handler for the endpoint; accepts every method
pub async fn contact_handler(
    axum::extract::State(service): axum::extract::State<ContactService>,
    method: Method,
    body: Bytes,
) -> Response {
    service.handle(&method, &body).await
}
