//! # gotenberg-client
//!
//! Build and send validated multipart requests to a
//! [Gotenberg](https://gotenberg.dev) document-conversion service.
//!
//! The crate does not render anything itself. It checks page options and
//! input files against the rules of each service route, assembles the
//! multipart form, and ships it through a pluggable HTTP transport. Any
//! validation failure is reported before a single byte leaves the process.
//!
//! ## Request Flow
//!
//! ```text
//! caller
//!  │
//!  ├─ 1. PageProperties  validated rendering options (builder, fail-fast)
//!  ├─ 2. Route           static table: wire path, file filter, index rule
//!  ├─ 3. Assemble        empty? index? filter, read bytes → MultipartForm
//!  ├─ 4. Transport       POST endpoint + wire path (reqwest by default)
//!  └─ 5. Response        returned unmodified, error statuses included
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gotenberg_client::{GotenbergClient, PageProperties, PdfFormat};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GotenbergClient::new("http://localhost:3000")?;
//!     let props = PageProperties::builder()
//!         .margins(0.5)?
//!         .pdf_format(PdfFormat::PdfA2b)
//!         .build();
//!
//!     let files = [PathBuf::from("report.docx"), PathBuf::from("data.xlsx")];
//!     let response = client.convert_with_libre_office(&files, &props).await?;
//!     eprintln!("status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Routes
//!
//! | Method | Wire path | Accepts | `index.html` |
//! |--------|-----------|---------|--------------|
//! | `convert_html` | `forms/chromium/convert/html` | any file | yes |
//! | `convert_markdown` | `forms/chromium/convert/markdown` | `*.md` + `index.html` | yes |
//! | `convert_url` | `forms/chromium/convert/url` | a URL | no |
//! | `convert_with_libre_office` | `forms/libreoffice/convert` | office formats | no |
//! | `convert_with_pdf_engines` | `forms/pdfengines/convert` | `*.pdf` | no |
//! | `merge_with_pdf_engines` | `forms/pdfengines/merge` | `*.pdf` | no |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `gotenberg` binary (clap, anyhow, tracing-subscriber, tokio, serde_json) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod files;
pub mod properties;
pub mod request;
pub mod route;
pub mod transport;
pub mod validate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::GotenbergClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{BoxError, GotenbergError};
pub use files::{FileSource, MemoryFile};
pub use properties::{PageProperties, PagePropertiesBuilder, PdfFormat};
pub use request::{ConversionRequest, FilePart, MultipartForm, RequestInput};
pub use route::{FileFilter, Route, RouteSpec};
pub use transport::{ReqwestTransport, Transport};
