// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Circle Iris API attestation provider implementation.

use alloy_primitives::FixedBytes;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, trace};

use crate::chain::{Network, IRIS_API, IRIS_API_SANDBOX};
use crate::error::{BridgeError, Result};
use crate::protocol::AttestationResponse;
use crate::provider::ProviderConfig;
use crate::traits::AttestationProvider;

/// Seconds to back off when a 429 carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 300;

/// Attestation provider backed by Circle's Iris HTTP API.
///
/// ```rust,no_run
/// use usdc_cctp::providers::IrisAttestationProvider;
/// use usdc_cctp::traits::AttestationProvider;
/// use alloy_primitives::FixedBytes;
///
/// # async fn example() -> usdc_cctp::Result<()> {
/// let provider = IrisAttestationProvider::sandbox();
/// let response = provider.get_attestation(FixedBytes::ZERO).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IrisAttestationProvider {
    base_url: String,
    client: Client,
}

impl IrisAttestationProvider {
    /// `base_url` is the service root, e.g. <https://iris-api.circle.com>.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// Uses `config.timeout` as the per-request timeout.
    pub fn with_config(base_url: impl Into<String>, config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn production() -> Self {
        Self::new(IRIS_API)
    }

    pub fn sandbox() -> Self {
        Self::new(IRIS_API_SANDBOX)
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(network.attestation_api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/attestations/0x{messageHash}`
    pub fn attestation_url(&self, message_hash: FixedBytes<32>) -> String {
        format!("{}/attestations/{message_hash}", self.base_url)
    }
}

#[async_trait]
impl AttestationProvider for IrisAttestationProvider {
    #[instrument(skip(self), fields(message_hash = %message_hash))]
    async fn get_attestation(&self, message_hash: FixedBytes<32>) -> Result<AttestationResponse> {
        let url = self.attestation_url(message_hash);
        trace!(url = %url, "Requesting attestation from Iris API");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        trace!(status_code = %status, "Received response from Iris API");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

            debug!(retry_after_seconds = retry_after, "Rate limit exceeded");
            return Err(BridgeError::RateLimitExceeded {
                retry_after_seconds: retry_after,
            });
        }

        if status == StatusCode::NOT_FOUND {
            debug!("Attestation not found");
            return Err(BridgeError::AttestationNotFound);
        }

        if !status.is_success() {
            debug!(status_code = status.as_u16(), "Attestation service error");
            return Err(BridgeError::AttestationService {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let attestation: AttestationResponse = serde_json::from_str(&body)?;
        debug!(status = %attestation.status, "Attestation response parsed");

        Ok(attestation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::AttestationStatus;
    use alloy_primitives::Bytes;

    fn hash() -> FixedBytes<32> {
        FixedBytes::from([0xab; 32])
    }

    #[test]
    fn test_attestation_url() {
        let provider = IrisAttestationProvider::sandbox();
        insta::assert_snapshot!(
            provider.attestation_url(hash()),
            @"https://iris-api-sandbox.circle.com/attestations/0xabababababababababababababababababababababababababababababababab"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let provider = IrisAttestationProvider::new("http://localhost:1234/");
        assert_eq!(provider.base_url(), "http://localhost:1234");
        assert_eq!(
            IrisAttestationProvider::for_network(Network::Mainnet).base_url(),
            "https://iris-api.circle.com"
        );
    }

    #[tokio::test]
    async fn test_complete_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", format!("/attestations/{}", hash()).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"complete","attestation":"0xdeadbeef"}"#)
            .create_async()
            .await;

        let provider = IrisAttestationProvider::new(server.url());
        let response = provider.get_attestation(hash()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, AttestationStatus::Complete);
        assert_eq!(
            response.attestation,
            Some(Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]))
        );
    }

    #[tokio::test]
    async fn test_pending_quirk() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", format!("/attestations/{}", hash()).as_str())
            .with_status(200)
            .with_body(r#"{"status":"pending_confirmations","attestation":"PENDING"}"#)
            .create_async()
            .await;

        let provider = IrisAttestationProvider::new(server.url());
        let response = provider.get_attestation(hash()).await.unwrap();
        assert_eq!(response.status, AttestationStatus::PendingConfirmations);
        assert!(response.attestation.is_none());
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", format!("/attestations/{}", hash()).as_str())
            .with_status(404)
            .with_body(r#"{"error":"Message hash not found"}"#)
            .create_async()
            .await;

        let provider = IrisAttestationProvider::new(server.url());
        let err = provider.get_attestation(hash()).await.unwrap_err();
        assert!(matches!(err, BridgeError::AttestationNotFound));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_rate_limited_with_retry_after() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", format!("/attestations/{}", hash()).as_str())
            .with_status(429)
            .with_header("retry-after", "7")
            .create_async()
            .await;

        let provider = IrisAttestationProvider::new(server.url());
        let err = provider.get_attestation(hash()).await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::RateLimitExceeded {
                retry_after_seconds: 7
            }
        ));
    }

    #[tokio::test]
    async fn test_rate_limited_without_retry_after() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", format!("/attestations/{}", hash()).as_str())
            .with_status(429)
            .create_async()
            .await;

        let provider = IrisAttestationProvider::new(server.url());
        let err = provider.get_attestation(hash()).await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::RateLimitExceeded {
                retry_after_seconds: DEFAULT_RETRY_AFTER_SECS
            }
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_transient() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", format!("/attestations/{}", hash()).as_str())
            .with_status(503)
            .create_async()
            .await;

        let provider = IrisAttestationProvider::new(server.url());
        let err = provider.get_attestation(hash()).await.unwrap_err();
        assert!(matches!(err, BridgeError::AttestationService { status: 503 }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transient() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let provider = IrisAttestationProvider::new(format!("http://127.0.0.1:{port}"));
        let err = provider.get_attestation(hash()).await.unwrap_err();
        assert!(matches!(err, BridgeError::Network(_)), "{err}");
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_transient() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", format!("/attestations/{}", hash()).as_str())
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let provider = IrisAttestationProvider::new(server.url());
        let err = provider.get_attestation(hash()).await.unwrap_err();
        assert!(matches!(err, BridgeError::Json(_)));
        assert!(!err.is_transient());
    }
}
