//! Client configuration.
//!
//! [`ClientConfig`] holds everything needed to reach the service: the base
//! endpoint and the knobs passed to the default HTTP transport. It is built
//! via [`ClientConfigBuilder`], which rejects a malformed endpoint up front
//! so no request can ever be aimed at an invalid URL.

use crate::error::GotenbergError;
use crate::validate;
use serde::{Deserialize, Serialize};

/// Default `User-Agent` header sent by [`crate::ReqwestTransport`].
pub const DEFAULT_USER_AGENT: &str = concat!("gotenberg-client/", env!("CARGO_PKG_VERSION"));

/// Configuration for a [`crate::GotenbergClient`].
///
/// Fields are private: every value, whether built or deserialised, has
/// passed [`ClientConfigBuilder::build`].
///
/// # Example
/// ```rust
/// use gotenberg_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .endpoint("http://localhost:3000")
///     .timeout_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.endpoint(), "http://localhost:3000/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClientConfigDocument")]
pub struct ClientConfig {
    endpoint: String,
    timeout_secs: Option<u64>,
    user_agent: String,
}

impl ClientConfig {
    /// Create a new builder. The endpoint must be set before `build()`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            endpoint: None,
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Shorthand for a config with only an endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, GotenbergError> {
        Self::builder().endpoint(endpoint.as_ref()).build()
    }

    /// Service base URL, always ending in `/`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whole-request timeout in seconds. `None` leaves it to the transport.
    ///
    /// Conversions of large office documents can take minutes; there is no
    /// default cap.
    pub fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }

    /// `User-Agent` header value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Absolute URL of `wire_path` below the endpoint.
    pub fn url_for(&self, wire_path: &str) -> String {
        format!("{}{}", self.endpoint, wire_path)
    }
}

/// Serialised form of [`ClientConfig`]; deserialisation goes through the builder.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClientConfigDocument {
    endpoint: String,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    user_agent: Option<String>,
}

impl TryFrom<ClientConfigDocument> for ClientConfig {
    type Error = GotenbergError;

    fn try_from(doc: ClientConfigDocument) -> Result<Self, Self::Error> {
        let mut b = ClientConfig::builder().endpoint(doc.endpoint);
        if let Some(secs) = doc.timeout_secs {
            b = b.timeout_secs(secs);
        }
        if let Some(ua) = doc.user_agent {
            b = b.user_agent(ua);
        }
        b.build()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: String,
}

impl ClientConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Build the configuration, validating and normalising the endpoint.
    pub fn build(self) -> Result<ClientConfig, GotenbergError> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| GotenbergError::InvalidConfig("endpoint is required".into()))?;
        let endpoint = normalize_endpoint(&endpoint)?;

        if self.timeout_secs == Some(0) {
            return Err(GotenbergError::InvalidConfig(
                "Timeout must be ≥ 1 second".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(GotenbergError::InvalidConfig(
                "User agent must not be empty".into(),
            ));
        }

        Ok(ClientConfig {
            endpoint,
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent,
        })
    }
}

/// Validate `endpoint` and append a trailing slash if it has none.
pub fn normalize_endpoint(endpoint: &str) -> Result<String, GotenbergError> {
    let trimmed = endpoint.trim();
    if !validate::is_valid_url(trimmed) {
        return Err(GotenbergError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
        });
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}
