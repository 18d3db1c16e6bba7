pub mod response;

pub use self::response::{classify, normalize, FailurePolicy, UpstreamOutcome};

use anyhow::Result;
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, error, instrument};
use url::Url;

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// HTTP client for the backend API.
///
/// The base URL is injected once at construction; nothing in the request path
/// reads the environment.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: Url,
    client: Client,
}

impl UpstreamClient {
    /// # Errors
    /// Return error if the underlying client cannot be built
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self { base_url, client })
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');

        let endpoint_url = Url::parse(&format!("{base}{endpoint}"))?;

        debug!("endpoint URL: {}", endpoint);

        Ok(endpoint_url)
    }

    /// Issue one request against the backend API.
    ///
    /// Non-2xx responses are a normal, representable result; only
    /// network-level failures and unparseable 2xx bodies surface as
    /// `TransportFailure`. Never retries.
    #[instrument(skip(self, body, token))]
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        token: Option<&SecretString>,
    ) -> UpstreamOutcome {
        let url = match self.endpoint_url(endpoint) {
            Ok(url) => url,
            Err(err) => {
                error!("Invalid upstream URL for {}: {}", endpoint, err);

                return UpstreamOutcome::TransportFailure(err.to_string());
            }
        };

        let mut request = self.client.request(method, url);

        // JSON content type only when a body is present
        if let Some(body) = body {
            request = request.json(body);
        }

        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                error!("Upstream request to {} failed: {}", endpoint, err);

                return UpstreamOutcome::TransportFailure(err.to_string());
            }
        };

        let status = response.status();

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                error!("Failed to read upstream body from {}: {}", endpoint, err);

                return UpstreamOutcome::TransportFailure(err.to_string());
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(json) => classify(status, json),
            Err(err) if status.is_success() => {
                error!("Upstream {} returned unparseable body: {}", endpoint, err);

                UpstreamOutcome::TransportFailure(err.to_string())
            }
            // Non-2xx with a plain-text body still classifies by status
            Err(_) => classify(status, Value::String(text)),
        }
    }
}
