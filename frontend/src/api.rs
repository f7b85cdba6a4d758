use async_trait::async_trait;
use gloo_net::http::Request;
use shared::client::{check_status, decode_update, decode_voters};
use shared::{ClientConfig, ClientError, Identifier, Voter, VoterApi};
use tracing::{debug, info};

/// `VoterApi` over the browser's fetch.
pub struct HttpVoterClient {
    config: ClientConfig,
}

impl HttpVoterClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl VoterApi for HttpVoterClient {
    async fn fetch_all(&self) -> Result<Vec<Voter>, ClientError> {
        let url = self.config.voters_url();
        debug!(url = %url, "GET voters");
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ClientError::network(e.to_string()))?;
        check_status(status, &body)?;

        let voters = decode_voters(&body)?;
        info!(count = voters.len(), "fetched voters");
        Ok(voters)
    }

    async fn update(&self, id: &Identifier, voter: &Voter) -> Result<Voter, ClientError> {
        let url = self.config.voter_url(id);
        debug!(url = %url, "PUT voter");
        let response = Request::put(&url)
            .json(voter)
            .map_err(|e| ClientError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ClientError::network(e.to_string()))?;
        check_status(status, &body)?;
        Ok(decode_update(&body, voter))
    }
}
