//! Email relay for the contact form.
//!
//! Posts the submission as JSON to a FormSubmit-style AJAX endpoint which
//! forwards it to the team inbox. Success is judged by the HTTP status only.

use async_trait::async_trait;
use reqwest::Client;
use saveserve_core::config::RelayConfig;
use saveserve_core::{ContactForm, Role};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{RelayError, Result};

const SERVICE: &str = "formsubmit";

/// JSON body sent to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayPayload {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub message: String,
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "_template")]
    pub template: &'static str,
    #[serde(rename = "_captcha")]
    pub captcha: &'static str,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
}

impl RelayPayload {
    pub fn from_form(form: &ContactForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            role: form.role,
            message: form.message.clone(),
            subject: format!("SaveServe: New {} Application", form.role),
            template: "table",
            captcha: "false",
            reply_to: form.email.clone(),
        }
    }
}

/// Something that can forward a submission by email.
#[async_trait]
pub trait FormRelay: Send + Sync {
    async fn deliver(&self, payload: &RelayPayload) -> Result<()>;
}

pub struct FormSubmitClient {
    client: Client,
    endpoint: String,
}

impl FormSubmitClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormRelay for FormSubmitClient {
    async fn deliver(&self, payload: &RelayPayload) -> Result<()> {
        debug!(endpoint = %self.endpoint, subject = %payload.subject, "posting submission to relay");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| RelayError::network("contact form relay", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::rejected(SERVICE, status.as_u16(), &body));
        }

        info!(status = status.as_u16(), "relay accepted submission");
        Ok(())
    }
}
