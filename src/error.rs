//! Error types for the gotenberg-client library.
//!
//! Every failure is reported through [`GotenbergError`]. Validation errors
//! (bad endpoint, bad page dimensions, files a route will not accept) are
//! raised locally before any network activity, so a request is either sent
//! complete or not at all. Transport failures are wrapped but never retried
//! or rewritten; the original error is reachable through
//! [`std::error::Error::source`].
//!
//! A non-2xx status from the service is *not* an error at this layer: the
//! raw response is handed back to the caller for inspection.

use thiserror::Error;

/// Boxed error produced by a [`crate::transport::Transport`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors returned by the gotenberg-client library.
#[derive(Debug, Error)]
pub enum GotenbergError {
    // ── URL errors ────────────────────────────────────────────────────────
    /// The configured service endpoint is not a valid absolute URL.
    #[error("Invalid service endpoint '{endpoint}': expected an absolute URL such as http://localhost:3000")]
    InvalidEndpoint { endpoint: String },

    /// The target of a URL conversion is not a valid absolute URL.
    #[error("Invalid URL '{url}': expected an absolute http, https, ftp or file URL")]
    InvalidUrl { url: String },

    // ── Page property errors ──────────────────────────────────────────────
    /// A paper dimension or margin is at or below its minimum.
    #[error("{field} must be greater than {minimum} inches, got {value}")]
    InvalidDimension {
        field: &'static str,
        value: f32,
        minimum: f32,
    },

    /// A native page range is not of the form `start-end` with `1 <= start < end`.
    #[error(
        "Invalid page range {start}-{end}: start and end must be positive and end greater than start"
    )]
    InvalidRange { start: u32, end: u32 },

    // ── File errors ───────────────────────────────────────────────────────
    /// No files were supplied to a file-based route.
    #[error("Files should not be empty ({route} route)")]
    EmptyInput { route: &'static str },

    /// The route requires an entry file that was not supplied.
    #[error("No {file} file found; the {route} route requires one")]
    MissingRequiredFile {
        route: &'static str,
        file: &'static str,
    },

    /// Every supplied file was rejected by the route's file filter.
    #[error("No eligible files for the {route} route. {hint}")]
    NoMatchingFiles {
        route: &'static str,
        hint: &'static str,
    },

    /// A file passed the route filter but its bytes could not be read.
    #[error("Failed to read '{name}': {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A file has no base name usable as a form part name (empty, or not UTF-8).
    #[error("Cannot upload '{name}' to the {route} route: file names must be non-empty UTF-8")]
    InvalidFileName { route: &'static str, name: String },

    /// A URL was handed to a file route, or files to the URL route.
    #[error("The {route} route does not accept this kind of input")]
    UnsupportedInput { route: &'static str },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or deserialisation validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Transport errors ──────────────────────────────────────────────────
    /// The HTTP submission failed (connection refused, timeout, TLS, ...).
    #[error("Transport failure: {0}")]
    Transport(#[source] BoxError),
}

impl GotenbergError {
    /// Wrap a transport-layer error without altering it.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        GotenbergError::Transport(err.into())
    }

    /// True for every kind raised before a request reaches the network.
    pub fn is_validation(&self) -> bool {
        !matches!(self, GotenbergError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_dimension_display() {
        let e = GotenbergError::InvalidDimension {
            field: "Paper width",
            value: 0.5,
            minimum: 1.0,
        };
        let msg = e.to_string();
        assert!(msg.contains("Paper width"), "got: {msg}");
        assert!(msg.contains("0.5"), "got: {msg}");
    }

    #[test]
    fn no_matching_files_carries_hint() {
        let e = GotenbergError::NoMatchingFiles {
            route: "pdfengines/merge",
            hint: "PDF Engines route accepts only PDF files.",
        };
        assert!(e.to_string().contains("accepts only PDF files"));
    }

    #[test]
    fn transport_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let e = GotenbergError::transport(io);
        assert!(!e.is_validation());
        let source = e.source().expect("source preserved");
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn validation_kinds() {
        assert!(GotenbergError::EmptyInput { route: "html" }.is_validation());
        assert!(GotenbergError::InvalidRange { start: 5, end: 1 }.is_validation());
        assert!(GotenbergError::InvalidFileName {
            route: "chromium/html",
            name: "logo\u{FFFD}.png".into(),
        }
        .is_validation());
    }
}
