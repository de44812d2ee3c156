//! Request assembly: validate inputs against a route and build the form.
//!
//! ## Order of checks
//!
//! ```text
//! URL route   : url syntax ──▶ properties + {url}
//! file routes : non-empty ──▶ index present? ──▶ filter ──▶ non-empty ──▶ read bytes
//! ```
//!
//! Every check runs before the transport is touched, so a request that fails
//! here has sent nothing. The output [`MultipartForm`] is transport-agnostic:
//! ordered text fields plus ordered file parts.

use crate::error::GotenbergError;
use crate::files::{self, FileSource, INDEX_HTML};
use crate::properties::PageProperties;
use crate::route::RouteSpec;
use crate::validate;
use tracing::debug;

/// One binary part. `name` and `filename` are both the file's base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A wire-ready multipart body, not yet encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub text_fields: Vec<(String, String)>,
    pub file_parts: Vec<FilePart>,
}

impl MultipartForm {
    /// Value of the first text field called `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text_fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// File part names, in upload order.
    pub fn file_names(&self) -> Vec<&str> {
        self.file_parts.iter().map(|p| p.name.as_str()).collect()
    }

    fn with_properties(properties: &PageProperties) -> Self {
        Self {
            text_fields: properties
                .form_fields()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            file_parts: Vec::new(),
        }
    }
}

/// What a request uploads: files for file routes, a URL for the URL route.
#[derive(Debug)]
pub enum RequestInput<'a, F> {
    Files(&'a [F]),
    Url(&'a str),
}

impl<F> Clone for RequestInput<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for RequestInput<'_, F> {}

/// A single conversion call. Borrowed from the caller and dropped once the
/// form is built.
#[derive(Debug)]
pub struct ConversionRequest<'a, F> {
    pub route: &'static RouteSpec,
    pub input: RequestInput<'a, F>,
    pub properties: &'a PageProperties,
}

impl<F> Clone for ConversionRequest<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for ConversionRequest<'_, F> {}

impl<'a, F: FileSource> ConversionRequest<'a, F> {
    pub fn files(route: &'static RouteSpec, files: &'a [F], properties: &'a PageProperties) -> Self {
        Self {
            route,
            input: RequestInput::Files(files),
            properties,
        }
    }

    pub fn url(route: &'static RouteSpec, url: &'a str, properties: &'a PageProperties) -> Self {
        Self {
            route,
            input: RequestInput::Url(url),
            properties,
        }
    }

    /// Validate and build the form.
    pub fn assemble(&self) -> Result<MultipartForm, GotenbergError> {
        match (self.input, self.route.is_url_based()) {
            (RequestInput::Url(url), true) => assemble_url(self.route, self.properties, url),
            (RequestInput::Files(files), false) => assemble_files(self.route, self.properties, files),
            _ => Err(GotenbergError::UnsupportedInput {
                route: self.route.name,
            }),
        }
    }
}

/// Build the form for a URL-based route.
pub fn assemble_url(
    route: &RouteSpec,
    properties: &PageProperties,
    url: &str,
) -> Result<MultipartForm, GotenbergError> {
    if !route.is_url_based() {
        return Err(GotenbergError::UnsupportedInput { route: route.name });
    }
    // The checked string is the one sent.
    let url = url.trim();
    if !validate::is_valid_url(url) {
        return Err(GotenbergError::InvalidUrl {
            url: url.to_string(),
        });
    }

    let mut form = MultipartForm::with_properties(properties);
    form.text_fields.push(("url".to_string(), url.to_string()));
    Ok(form)
}

/// Build the form for a file-based route.
///
/// Files the route's filter rejects are dropped silently; original order is
/// kept for the rest.
pub fn assemble_files<F: FileSource>(
    route: &RouteSpec,
    properties: &PageProperties,
    files: &[F],
) -> Result<MultipartForm, GotenbergError> {
    let filter = route
        .file_filter
        .ok_or(GotenbergError::UnsupportedInput { route: route.name })?;

    if files.is_empty() {
        return Err(GotenbergError::EmptyInput { route: route.name });
    }

    if route.requires_index && !files::contains_index(files) {
        return Err(GotenbergError::MissingRequiredFile {
            route: route.name,
            file: INDEX_HTML,
        });
    }

    let accepted: Vec<&F> = files
        .iter()
        .filter(|f| {
            let keep = filter.accepts(*f);
            if !keep {
                debug!("{}: skipping '{}'", route.name, f.display_name());
            }
            keep
        })
        .collect();

    if accepted.is_empty() {
        return Err(GotenbergError::NoMatchingFiles {
            route: route.name,
            hint: route.empty_after_filter_message,
        });
    }

    // Names are checked for every file before any bytes are read.
    let named = accepted
        .into_iter()
        .map(|file| match file.base_name() {
            Some(name) if !name.is_empty() => Ok((name, file)),
            _ => Err(GotenbergError::InvalidFileName {
                route: route.name,
                name: file.display_name(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut form = MultipartForm::with_properties(properties);
    for (name, file) in named {
        form.file_parts.push(file_part(name, file)?);
    }
    debug!("{}: {} file part(s) assembled", route.name, form.file_parts.len());

    Ok(form)
}

fn file_part<F: FileSource + ?Sized>(name: &str, file: &F) -> Result<FilePart, GotenbergError> {
    let name = name.to_string();
    let bytes = file.read_bytes().map_err(|source| GotenbergError::FileRead {
        name: name.clone(),
        source,
    })?;
    Ok(FilePart {
        filename: name.clone(),
        name,
        bytes,
    })
}
