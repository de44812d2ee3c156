//! The conversion client: one method per route.
//!
//! Each method resolves its [`RouteSpec`], assembles the form (all
//! validation happens here, before any I/O on the network), and hands the
//! form to the [`Transport`]. The transport's response is returned as-is,
//! including error statuses; its errors are wrapped in
//! [`GotenbergError::Transport`] without being retried.
//!
//! The client holds no mutable state. Share it behind an `Arc` to run many
//! conversions concurrently.

use crate::config::ClientConfig;
use crate::error::GotenbergError;
use crate::files::FileSource;
use crate::properties::PageProperties;
use crate::request::{ConversionRequest, MultipartForm};
use crate::route::{Route, RouteSpec};
use crate::transport::{ReqwestTransport, Transport};
use tracing::{info, warn};

/// Client for a single conversion service endpoint.
///
/// # Example
/// ```rust,no_run
/// use gotenberg_client::{GotenbergClient, PageProperties};
/// use std::path::PathBuf;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GotenbergClient::new("http://localhost:3000")?;
/// let props = PageProperties::builder().landscape(true).build();
/// let files = [PathBuf::from("site/index.html"), PathBuf::from("site/style.css")];
///
/// let response = client.convert_html(&files, &props).await?;
/// if response.status().is_success() {
///     std::fs::write("site.pdf", response.bytes().await?)?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GotenbergClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl GotenbergClient<ReqwestTransport> {
    /// Client with the default reqwest transport.
    ///
    /// # Errors
    /// [`GotenbergError::InvalidEndpoint`] if `endpoint` is not an absolute URL.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, GotenbergError> {
        Self::from_config(ClientConfig::new(endpoint)?)
    }

    /// Client with a reqwest transport configured from `config`.
    pub fn from_config(config: ClientConfig) -> Result<Self, GotenbergError> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::from_parts(config, transport))
    }
}

impl<T: Transport> GotenbergClient<T> {
    /// Client with a caller-supplied transport.
    pub fn with_transport(endpoint: impl AsRef<str>, transport: T) -> Result<Self, GotenbergError> {
        Ok(Self::from_parts(ClientConfig::new(endpoint)?, transport))
    }

    /// Pair a config with a transport. `config` is already validated: a
    /// [`ClientConfig`] can only come from its builder or from deserialisation
    /// through that builder.
    pub fn from_parts(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Normalised endpoint, ending in `/`.
    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL a route is posted to.
    pub fn route_url(&self, route: Route) -> String {
        self.config.url_for(route.spec().wire_path)
    }

    /// Chromium HTML conversion. `files` must include an `index.html`; every
    /// other file is uploaded as an asset.
    pub async fn convert_html<F: FileSource>(
        &self,
        files: &[F],
        properties: &PageProperties,
    ) -> Result<T::Response, GotenbergError> {
        self.submit(ConversionRequest::files(Route::Html.spec(), files, properties))
            .await
    }

    /// Chromium Markdown conversion. Uploads the `index.html` template and
    /// every `*.md` file; anything else is dropped.
    pub async fn convert_markdown<F: FileSource>(
        &self,
        files: &[F],
        properties: &PageProperties,
    ) -> Result<T::Response, GotenbergError> {
        self.submit(ConversionRequest::files(Route::Markdown.spec(), files, properties))
            .await
    }

    /// Chromium conversion of a remote page.
    pub async fn convert_url(
        &self,
        url: &str,
        properties: &PageProperties,
    ) -> Result<T::Response, GotenbergError> {
        self.submit(ConversionRequest::<&dyn FileSource>::url(
            Route::Url.spec(),
            url,
            properties,
        ))
        .await
    }

    /// LibreOffice conversion. Files with unsupported extensions are dropped.
    pub async fn convert_with_libre_office<F: FileSource>(
        &self,
        files: &[F],
        properties: &PageProperties,
    ) -> Result<T::Response, GotenbergError> {
        self.submit(ConversionRequest::files(Route::LibreOffice.spec(), files, properties))
            .await
    }

    /// PDF-engines conversion of the supplied PDFs.
    pub async fn convert_with_pdf_engines<F: FileSource>(
        &self,
        files: &[F],
        properties: &PageProperties,
    ) -> Result<T::Response, GotenbergError> {
        self.submit(ConversionRequest::files(
            Route::PdfEnginesConvert.spec(),
            files,
            properties,
        ))
        .await
    }

    /// PDF-engines merge, in the order the PDFs are supplied.
    pub async fn merge_with_pdf_engines<F: FileSource>(
        &self,
        files: &[F],
        properties: &PageProperties,
    ) -> Result<T::Response, GotenbergError> {
        self.submit(ConversionRequest::files(
            Route::PdfEnginesMerge.spec(),
            files,
            properties,
        ))
        .await
    }

    /// Validate, assemble and send an arbitrary request.
    pub async fn submit<F: FileSource>(
        &self,
        request: ConversionRequest<'_, F>,
    ) -> Result<T::Response, GotenbergError> {
        let form = request.assemble()?;
        self.dispatch(request.route, form).await
    }

    async fn dispatch(
        &self,
        route: &RouteSpec,
        form: MultipartForm,
    ) -> Result<T::Response, GotenbergError> {
        let url = self.config.url_for(route.wire_path);
        info!(
            "Submitting {} request to {} ({} file part(s))",
            route.name,
            url,
            form.file_parts.len()
        );
        match self.transport.submit_multipart(&url, form).await {
            Ok(response) => {
                info!("{} request completed", route.name);
                Ok(response)
            }
            Err(e) => {
                warn!("{} request failed: {}", route.name, e);
                Err(GotenbergError::transport(e))
            }
        }
    }
}
