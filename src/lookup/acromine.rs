//! Acromine dictionary client.
//!
//! The service exposes a single endpoint:
//! `GET {base_url}/dictionary.py?sf=<acronym>` answering with a JSON array of
//! records. Unknown acronyms come back as `[]`, not as an error status.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::lookup::{Definition, LookupClient, LookupError, LookupResponse};

pub const DEFAULT_BASE_URL: &str = "http://www.nactem.ac.uk/software/acromine";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Acromine API client
pub struct AcromineClient {
    base_url: String,
    client: reqwest::Client,
}

impl AcromineClient {
    /// Creates a new Acromine client.
    ///
    /// # Arguments
    /// * `base_url` - Optional custom base URL (defaults to the public NaCTeM host)
    /// * `timeout` - Transport timeout applied to every request
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if base_url.is_empty() {
            return Err(LookupError::Config("base URL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/dictionary.py", self.base_url)
    }
}

/// Decodes a response body. Blank bodies are treated as absent.
fn decode_body(text: &str) -> Result<Option<Vec<Definition>>, LookupError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Vec<Definition>>(text)
        .map(Some)
        .map_err(|e| LookupError::Parse(e.to_string()))
}

#[async_trait]
impl LookupClient for AcromineClient {
    fn name(&self) -> &str {
        "acromine"
    }

    async fn fetch(&self, acronym: &str) -> Result<LookupResponse, LookupError> {
        let url = self.endpoint();
        info!("Acromine request: url={}, sf={:?}", url, acronym);

        let response = self
            .client
            .get(&url)
            .query(&[("sf", acronym)])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("Acromine response status: {}", status);

        if !response.status().is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Acromine API error: {} - {}", status, err_body);
            return Ok(LookupResponse { status, body: None });
        }

        let text = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;
        debug!("Acromine body: {} bytes", text.len());

        let body = decode_body(&text)?;
        if let Some(ref records) = body {
            info!("Acromine returned {} record(s) for {:?}", records.len(), acronym);
        }
        Ok(LookupResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_base_url() {
        let client = AcromineClient::new(None, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(
            client.endpoint(),
            "http://www.nactem.ac.uk/software/acromine/dictionary.py"
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client =
            AcromineClient::new(Some("http://localhost:8080/".to_string()), DEFAULT_TIMEOUT)
                .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/dictionary.py");
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        let result = AcromineClient::new(Some("/".to_string()), DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(LookupError::Config(_))));
    }

    #[test]
    fn test_decode_body_blank_is_absent() {
        assert_eq!(decode_body("").unwrap(), None);
        assert_eq!(decode_body("  \n").unwrap(), None);
    }

    #[test]
    fn test_decode_body_empty_array_is_present() {
        assert_eq!(decode_body("[]").unwrap(), Some(vec![]));
    }

    #[test]
    fn test_decode_body_rejects_garbage() {
        assert!(matches!(decode_body("<html>"), Err(LookupError::Parse(_))));
    }
}
