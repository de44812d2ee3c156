//! The static route table.
//!
//! Each [`Route`] maps to one [`RouteSpec`]: its path below the service
//! endpoint, which files it accepts and whether it needs an `index.html`.
//! The table is a `static` array and is never mutated, so it can be read
//! from any number of concurrent requests without locking.

use crate::files::{self, FileSource};
use std::fmt;

/// A logical conversion or merge operation offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Chromium: HTML document (plus assets) to PDF.
    Html,
    /// Chromium: Markdown files wrapped by an `index.html` template.
    Markdown,
    /// Chromium: a remote page by URL.
    Url,
    /// LibreOffice: office documents and images to PDF.
    LibreOffice,
    /// PDF engines: convert PDFs to a PDF/A format.
    PdfEnginesConvert,
    /// PDF engines: merge PDFs in upload order.
    PdfEnginesMerge,
}

impl Route {
    /// Every route, in table order.
    pub const ALL: [Route; 6] = [
        Route::Html,
        Route::Markdown,
        Route::Url,
        Route::LibreOffice,
        Route::PdfEnginesConvert,
        Route::PdfEnginesMerge,
    ];

    /// The route's entry in [`ROUTE_TABLE`].
    pub fn spec(self) -> &'static RouteSpec {
        &ROUTE_TABLE[self as usize]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// Which supplied files a route uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    /// Every supplied file (HTML assets can be of any type).
    Any,
    /// Markdown files and the `index.html` template that includes them.
    MarkdownOrIndex,
    /// Extensions the LibreOffice route understands.
    OfficeSupported,
    /// `*.pdf` only.
    Pdf,
}

impl FileFilter {
    pub fn accepts<F: FileSource + ?Sized>(self, file: &F) -> bool {
        match self {
            FileFilter::Any => true,
            FileFilter::MarkdownOrIndex => files::is_markdown(file) || files::is_index_html(file),
            FileFilter::OfficeSupported => files::is_supported_by_office_converter(file),
            FileFilter::Pdf => files::is_pdf(file),
        }
    }
}

/// Static description of one route.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteSpec {
    pub route: Route,
    /// Short label used in logs and error messages.
    pub name: &'static str,
    /// Path appended to the normalised endpoint, without a leading slash.
    pub wire_path: &'static str,
    /// `None` for the URL route, which takes a `url` field instead of files.
    pub file_filter: Option<FileFilter>,
    pub requires_index: bool,
    /// Hint attached to [`crate::GotenbergError::NoMatchingFiles`].
    pub empty_after_filter_message: &'static str,
}

impl RouteSpec {
    pub fn is_url_based(&self) -> bool {
        self.file_filter.is_none()
    }
}

/// All routes, indexed by `Route as usize`.
pub static ROUTE_TABLE: [RouteSpec; 6] = [
    RouteSpec {
        route: Route::Html,
        name: "chromium/html",
        wire_path: "forms/chromium/convert/html",
        file_filter: Some(FileFilter::Any),
        requires_index: true,
        empty_after_filter_message: "Chromium's HTML route accepts an index.html and its assets.",
    },
    RouteSpec {
        route: Route::Markdown,
        name: "chromium/markdown",
        wire_path: "forms/chromium/convert/markdown",
        file_filter: Some(FileFilter::MarkdownOrIndex),
        requires_index: true,
        empty_after_filter_message:
            "Chromium's markdown route accepts a single index.html and markdown files.",
    },
    RouteSpec {
        route: Route::Url,
        name: "chromium/url",
        wire_path: "forms/chromium/convert/url",
        file_filter: None,
        requires_index: false,
        empty_after_filter_message: "",
    },
    RouteSpec {
        route: Route::LibreOffice,
        name: "libreoffice",
        wire_path: "forms/libreoffice/convert",
        file_filter: Some(FileFilter::OfficeSupported),
        requires_index: false,
        empty_after_filter_message: "File extensions are not supported by LibreOffice. \
            Please refer to https://gotenberg.dev/docs/modules/libreoffice for more details.",
    },
    RouteSpec {
        route: Route::PdfEnginesConvert,
        name: "pdfengines/convert",
        wire_path: "forms/pdfengines/convert",
        file_filter: Some(FileFilter::Pdf),
        requires_index: false,
        empty_after_filter_message: "PDF Engines route accepts only PDF files.",
    },
    RouteSpec {
        route: Route::PdfEnginesMerge,
        name: "pdfengines/merge",
        wire_path: "forms/pdfengines/merge",
        file_filter: Some(FileFilter::Pdf),
        requires_index: false,
        empty_after_filter_message: "PDF Engines route accepts only PDF files.",
    },
];
