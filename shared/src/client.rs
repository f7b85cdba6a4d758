//! Contract for the remote voter-record service and the response handling
//! shared by every transport.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::{Identifier, Voter};

pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:3001";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("request failed: {message}")]
    Transport { status: Option<u16>, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Transport { status: None, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub service_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_BASE_URL)
    }
}

impl ClientConfig {
    /// `service_base_url` should look like `http://localhost:3001`; a trailing slash is dropped.
    pub fn new(service_base_url: impl Into<String>) -> Self {
        let url: String = service_base_url.into();
        Self { service_base_url: url.trim_end_matches('/').to_string() }
    }

    pub fn voters_url(&self) -> String {
        format!("{}/voters", self.service_base_url)
    }

    pub fn voter_url(&self, id: &Identifier) -> String {
        format!("{}/voters/{}", self.service_base_url, id)
    }
}

/// Read and write access to the voter-record service. One attempt per call.
#[async_trait(?Send)]
pub trait VoterApi {
    async fn fetch_all(&self) -> Result<Vec<Voter>, ClientError>;

    async fn update(&self, id: &Identifier, voter: &Voter) -> Result<Voter, ClientError>;
}

pub fn check_status(status: u16, body: &str) -> Result<(), ClientError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = if body.trim().is_empty() {
        format!("service returned {status}")
    } else {
        format!("service returned {status}: {}", body.trim())
    };
    Err(ClientError::Transport { status: Some(status), message })
}

pub fn decode_voters(body: &str) -> Result<Vec<Voter>, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

pub fn decode_voter(body: &str) -> Result<Voter, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// The service may answer a PUT with its canonical record or with nothing useful;
/// in the latter case the record that was sent stands.
pub fn decode_update(body: &str, sent: &Voter) -> Voter {
    match decode_voter(body) {
        Ok(voter) => voter,
        Err(_) => sent.clone(),
    }
}
