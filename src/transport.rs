//! HTTP submission seam.
//!
//! [`GotenbergClient`](crate::GotenbergClient) hands a finished
//! [`MultipartForm`] and an absolute URL to a [`Transport`] and returns
//! whatever the transport returns, untouched. Connection pooling, timeouts
//! and cancellation all belong to the transport; swapping it out (for a test
//! double, a proxy-aware client, a blocking client) changes no validation
//! behaviour.

use crate::config::ClientConfig;
use crate::error::GotenbergError;
use crate::request::MultipartForm;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// Sends a multipart POST and returns the raw response.
///
/// Implementations must be `Send + Sync`: one client may serve many
/// concurrent conversions.
#[async_trait]
pub trait Transport: Send + Sync {
    /// The raw response handed back to the caller.
    type Response: Send;
    /// Network-level failure. A non-2xx status is not an error.
    type Error: std::error::Error + Send + Sync + 'static;

    async fn submit_multipart(
        &self,
        url: &str,
        form: MultipartForm,
    ) -> Result<Self::Response, Self::Error>;
}

/// Default transport built on a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an already-configured reqwest client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a reqwest client with the timeout and user agent from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, GotenbergError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(secs) = config.timeout_secs() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(GotenbergError::transport)?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

/// Encode a [`MultipartForm`] as a reqwest form: text fields first, then
/// one part per file with a `filename` content-disposition parameter.
pub fn to_reqwest_form(form: MultipartForm) -> Form {
    let mut out = Form::new();
    for (name, value) in form.text_fields {
        out = out.text(name, value);
    }
    for file in form.file_parts {
        out = out.part(file.name, Part::bytes(file.bytes).file_name(file.filename));
    }
    out
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Response = reqwest::Response;
    type Error = reqwest::Error;

    async fn submit_multipart(
        &self,
        url: &str,
        form: MultipartForm,
    ) -> Result<reqwest::Response, reqwest::Error> {
        debug!(
            "POST {} ({} fields, {} files)",
            url,
            form.text_fields.len(),
            form.file_parts.len()
        );
        self.client
            .post(url)
            .multipart(to_reqwest_form(form))
            .send()
            .await
    }
}
