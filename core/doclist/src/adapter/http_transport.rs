//! reqwest blocking による Transport 実装

use crate::error::Error;
use crate::ports::outbound::Transport;

/// 設定済みベース URL への GET を発行する Transport
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<String, Error> {
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .map_err(|e| Error::transport(format!("GET {} failed: {}", path, e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::transport(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(Error::transport(format!(
                "GET {} returned HTTP {}",
                path, status
            )));
        }

        Ok(body)
    }
}
