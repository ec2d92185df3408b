//! Submit the contact form against a running server

use anyhow::Result;

use crate::contact::client::{ContactClient, FormState};
use crate::contact::ContactSubmission;
use crate::helpers::url_for;
use crate::Folio;

/// Endpoint URL of the local server described by the config
pub fn default_endpoint(folio: &Folio) -> String {
    let config = &folio.config;
    format!(
        "http://{}:{}{}",
        config.server.ip,
        config.server.port,
        url_for(config, &config.contact.endpoint)
    )
}

/// Send one submission and print each status the form passes through
pub async fn run(folio: &Folio, submission: ContactSubmission, url: Option<String>) -> Result<()> {
    let endpoint = url.unwrap_or_else(|| default_endpoint(folio));
    tracing::debug!("Posting contact form to {}", endpoint);

    let client = ContactClient::new(endpoint);
    println!("{}", FormState::Sending);

    match client.send(FormState::Idle, &submission).await {
        FormState::Success => {
            println!("{}", FormState::Success);
            Ok(())
        }
        other => anyhow::bail!("{}", other),
    }
}
