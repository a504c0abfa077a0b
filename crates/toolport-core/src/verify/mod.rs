//! Remote verification of tool ids.

pub mod tool_url;

use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::types::ServerDetails;

pub use tool_url::{extract_tool_id, normalize_input};

const USER_AGENT: &str = concat!("toolport/", env!("CARGO_PKG_VERSION"));

/// Client for the server-details endpoint.
#[derive(Debug, Clone)]
pub struct Verifier {
    endpoint: String,
    http: reqwest::Client,
}

impl Verifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn details_url(&self, tool_id: &str) -> String {
        format!("{}/{tool_id}", self.endpoint)
    }

    /// Confirm `tool_id` exists and fetch its connection details.
    pub async fn verify(&self, tool_id: &str, api_key: &str) -> Result<ServerDetails> {
        let url = self.details_url(tool_id);
        tracing::debug!(%url, "verifying tool");

        let response = self.http.get(&url).bearer_auth(api_key).send().await?;
        check_status(response.status(), tool_id)?;

        let details: ServerDetails = response.json().await?;
        tracing::debug!(server_id = %details.server_id, "tool verified");
        Ok(details)
    }
}

fn check_status(status: StatusCode, tool_id: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND {
        return Err(Error::InvalidToolId {
            tool_id: tool_id.to_string(),
        });
    }
    Err(Error::VerificationFailed {
        status: status
            .canonical_reason()
            .map(String::from)
            .unwrap_or_else(|| status.as_str().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_url_joins_endpoint_and_id() {
        let verifier = Verifier::new("https://example.test/details/").unwrap();
        assert_eq!(
            verifier.details_url("0f1234de"),
            "https://example.test/details/0f1234de"
        );
    }

    #[test]
    fn not_found_is_invalid_tool_id() {
        let err = check_status(StatusCode::NOT_FOUND, "abc").unwrap_err();
        assert!(matches!(err, Error::InvalidToolId { .. }));
    }

    #[test]
    fn other_failures_carry_status_text() {
        let err = check_status(StatusCode::UNAUTHORIZED, "abc").unwrap_err();
        assert_eq!(err.to_string(), "Server verification failed: Unauthorized");
    }

    #[test]
    fn success_passes() {
        assert!(check_status(StatusCode::OK, "abc").is_ok());
    }
}
