//! The external form service that receives orders.

use super::error::DeliveryError;
use super::submit::FormPayload;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f/xojwvzdp";

/// Accepts a filled-in order form. One call is one attempt; retrying is up to the customer.
#[async_trait]
pub trait FormCollaborator: Send + Sync {
    async fn submit(&self, payload: &FormPayload) -> Result<(), DeliveryError>;
}

/// Posts the form as JSON to a Formspree endpoint. Any 2xx answer is a success.
#[derive(Debug, Clone)]
pub struct FormspreeCollaborator {
    client: reqwest::Client,
    endpoint: String,
}

impl FormspreeCollaborator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for FormspreeCollaborator {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_ENDPOINT)
    }
}

#[async_trait]
impl FormCollaborator for FormspreeCollaborator {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn submit(&self, payload: &FormPayload) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "Form accepted");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %body, "Form rejected");
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
