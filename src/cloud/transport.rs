use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::error::{CloudError, CloudResult};
use super::payload::RequestPayload;

const JSON_CONTENT_TYPE: &str = "application/json";
const USER_AGENT: &str = concat!("wordcloud-client/", env!("CARGO_PKG_VERSION"));

/// Delivers a payload to the word-cloud service and returns the raw image
/// body. Runs on worker threads.
pub trait CloudTransport: Send + Sync {
    fn send(&self, payload: &RequestPayload) -> CloudResult<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> CloudResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| CloudError::Transport {
                message: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl CloudTransport for HttpTransport {
    fn send(&self, payload: &RequestPayload) -> CloudResult<Vec<u8>> {
        let body = payload.to_json()?;
        tracing::debug!(
            endpoint = %self.endpoint,
            words = payload.words.len(),
            bytes = body.len(),
            "posting word cloud request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .map_err(|err| CloudError::Transport {
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %self.endpoint, status = status.as_u16(), "word cloud service returned an error status");
            return Err(CloudError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let image = response.bytes().map_err(|err| CloudError::Unexpected {
            message: format!("failed to read response body: {err}"),
        })?;
        tracing::debug!(bytes = image.len(), "received word cloud image body");
        Ok(image.to_vec())
    }
}
