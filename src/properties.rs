//! Page and rendering options sent with every conversion request.
//!
//! [`PageProperties`] is an immutable value: its fields are private and the
//! only ways to obtain one are [`PagePropertiesBuilder::build`],
//! [`PageProperties::default`] and deserialisation, all of which go through
//! the same validating setters. An out-of-range paper size or margin is
//! therefore unrepresentable once a value exists.
//!
//! Setters validate eagerly and return `Err` at the offending call, so a
//! builder chain fails at the first bad value rather than at `build()`.
//!
//! ```rust
//! use gotenberg_client::{PageProperties, PdfFormat};
//!
//! let props = PageProperties::builder()
//!     .paper_width(8.27)?
//!     .paper_height(11.7)?
//!     .margins(0.5)?
//!     .native_page_ranges(1, 5)?
//!     .landscape(true)
//!     .pdf_format(PdfFormat::PdfA2b)
//!     .build();
//!
//! assert_eq!(props.native_page_ranges(), "1-5");
//! # Ok::<(), gotenberg_client::GotenbergError>(())
//! ```

use crate::error::GotenbergError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Paper width must be strictly greater than this many inches.
pub const MIN_PAPER_WIDTH: f32 = 1.0;
/// Paper height must be strictly greater than this many inches.
pub const MIN_PAPER_HEIGHT: f32 = 1.5;
/// Margins must be strictly greater than this many inches.
pub const MIN_MARGIN: f32 = 0.0;

/// US Letter width in inches.
pub const DEFAULT_PAPER_WIDTH: f32 = 8.5;
/// US Letter height in inches.
pub const DEFAULT_PAPER_HEIGHT: f32 = 11.0;
/// Roughly one centimetre, in inches.
pub const DEFAULT_MARGIN: f32 = 0.39;
pub const DEFAULT_SCALE: f32 = 1.0;

/// Value of the `nativePdfFormat` field; the service reads it only for
/// native LibreOffice exports.
pub const NATIVE_PDF_FORMAT: PdfFormat = PdfFormat::PdfA1a;

/// Number of text fields produced by [`PageProperties::form_fields`].
pub const FORM_FIELD_COUNT: usize = 14;

// ── PdfFormat ────────────────────────────────────────────────────────────

/// PDF/A archival format the service converts the result into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PdfFormat {
    /// No PDF/A conversion (sent as an empty string). (default)
    #[default]
    #[serde(rename = "")]
    Unset,
    /// PDF/A-1a. Legacy: newer service releases reject it for new conversions.
    #[serde(rename = "PDF/A-1a")]
    PdfA1a,
    /// PDF/A-2b.
    #[serde(rename = "PDF/A-2b")]
    PdfA2b,
    /// PDF/A-3b.
    #[serde(rename = "PDF/A-3b")]
    PdfA3b,
}

impl PdfFormat {
    /// Every variant, in declaration order.
    pub const ALL: [PdfFormat; 4] = [
        PdfFormat::Unset,
        PdfFormat::PdfA1a,
        PdfFormat::PdfA2b,
        PdfFormat::PdfA3b,
    ];

    /// The exact string sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PdfFormat::Unset => "",
            PdfFormat::PdfA1a => "PDF/A-1a",
            PdfFormat::PdfA2b => "PDF/A-2b",
            PdfFormat::PdfA3b => "PDF/A-3b",
        }
    }

    /// True for formats the service has deprecated.
    pub fn is_deprecated(self) -> bool {
        matches!(self, PdfFormat::PdfA1a)
    }
}

impl fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PdfFormat {
    type Err = GotenbergError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PdfFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| GotenbergError::InvalidConfig(format!("unknown PDF format '{s}'")))
    }
}

// ── PageProperties ───────────────────────────────────────────────────────

/// Validated, immutable rendering options.
///
/// Dimensions are in inches. Build one with [`PageProperties::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PagePropertiesDocument")]
pub struct PageProperties {
    paper_width: f32,
    paper_height: f32,
    margin_top: f32,
    margin_bottom: f32,
    margin_left: f32,
    margin_right: f32,
    prefer_css_page_size: bool,
    print_background: bool,
    landscape: bool,
    scale: f32,
    native_page_ranges: String,
    pdf_format: PdfFormat,
    pdf_universal_access: bool,
}

impl Default for PageProperties {
    fn default() -> Self {
        PagePropertiesBuilder::default().build()
    }
}

impl PageProperties {
    /// Create a new builder holding the default values.
    pub fn builder() -> PagePropertiesBuilder {
        PagePropertiesBuilder::default()
    }

    pub fn paper_width(&self) -> f32 {
        self.paper_width
    }

    pub fn paper_height(&self) -> f32 {
        self.paper_height
    }

    pub fn margin_top(&self) -> f32 {
        self.margin_top
    }

    pub fn margin_bottom(&self) -> f32 {
        self.margin_bottom
    }

    pub fn margin_left(&self) -> f32 {
        self.margin_left
    }

    pub fn margin_right(&self) -> f32 {
        self.margin_right
    }

    pub fn prefer_css_page_size(&self) -> bool {
        self.prefer_css_page_size
    }

    pub fn print_background(&self) -> bool {
        self.print_background
    }

    pub fn landscape(&self) -> bool {
        self.landscape
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// `"start-end"`, or empty for all pages.
    pub fn native_page_ranges(&self) -> &str {
        &self.native_page_ranges
    }

    pub fn pdf_format(&self) -> PdfFormat {
        self.pdf_format
    }

    pub fn pdf_universal_access(&self) -> bool {
        self.pdf_universal_access
    }

    /// Render every attribute as a `(name, value)` text field.
    ///
    /// All fields are emitted regardless of route; the service ignores the
    /// ones that do not apply. Floats use the shortest round-trip decimal
    /// form with a mandatory fractional part (`11.0`, `0.39`).
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("paperWidth", render_float(self.paper_width)),
            ("paperHeight", render_float(self.paper_height)),
            ("marginTop", render_float(self.margin_top)),
            ("marginBottom", render_float(self.margin_bottom)),
            ("marginLeft", render_float(self.margin_left)),
            ("marginRight", render_float(self.margin_right)),
            ("preferCssPageSize", self.prefer_css_page_size.to_string()),
            ("printBackground", self.print_background.to_string()),
            ("landscape", self.landscape.to_string()),
            ("scale", render_float(self.scale)),
            ("nativePageRanges", self.native_page_ranges.clone()),
            ("pdfFormat", self.pdf_format.as_str().to_string()),
            ("nativePdfFormat", NATIVE_PDF_FORMAT.as_str().to_string()),
            ("pdfua", self.pdf_universal_access.to_string()),
        ]
    }
}

fn render_float(value: f32) -> String {
    // Debug keeps the trailing ".0" that Display drops.
    format!("{value:?}")
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Staging area for [`PageProperties`].
///
/// Validating setters return `Result<Self, GotenbergError>`; the rest return
/// `Self`. The builder is `Clone` and [`build`](Self::build) borrows it, so
/// one builder can produce any number of independent snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePropertiesBuilder {
    props: PageProperties,
}

impl Default for PagePropertiesBuilder {
    fn default() -> Self {
        Self {
            props: PageProperties {
                paper_width: DEFAULT_PAPER_WIDTH,
                paper_height: DEFAULT_PAPER_HEIGHT,
                margin_top: DEFAULT_MARGIN,
                margin_bottom: DEFAULT_MARGIN,
                margin_left: DEFAULT_MARGIN,
                margin_right: DEFAULT_MARGIN,
                prefer_css_page_size: false,
                print_background: false,
                landscape: false,
                scale: DEFAULT_SCALE,
                native_page_ranges: String::new(),
                pdf_format: PdfFormat::Unset,
                pdf_universal_access: false,
            },
        }
    }
}

impl PagePropertiesBuilder {
    pub fn paper_width(mut self, inches: f32) -> Result<Self, GotenbergError> {
        self.props.paper_width = above("Paper width", inches, MIN_PAPER_WIDTH)?;
        Ok(self)
    }

    pub fn paper_height(mut self, inches: f32) -> Result<Self, GotenbergError> {
        self.props.paper_height = above("Paper height", inches, MIN_PAPER_HEIGHT)?;
        Ok(self)
    }

    pub fn margin_top(mut self, inches: f32) -> Result<Self, GotenbergError> {
        self.props.margin_top = above("Top margin", inches, MIN_MARGIN)?;
        Ok(self)
    }

    pub fn margin_bottom(mut self, inches: f32) -> Result<Self, GotenbergError> {
        self.props.margin_bottom = above("Bottom margin", inches, MIN_MARGIN)?;
        Ok(self)
    }

    pub fn margin_left(mut self, inches: f32) -> Result<Self, GotenbergError> {
        self.props.margin_left = above("Left margin", inches, MIN_MARGIN)?;
        Ok(self)
    }

    pub fn margin_right(mut self, inches: f32) -> Result<Self, GotenbergError> {
        self.props.margin_right = above("Right margin", inches, MIN_MARGIN)?;
        Ok(self)
    }

    /// Set all four margins to the same value.
    pub fn margins(self, inches: f32) -> Result<Self, GotenbergError> {
        self.margin_top(inches)?
            .margin_bottom(inches)?
            .margin_left(inches)?
            .margin_right(inches)
    }

    /// Restrict output to pages `start..=end`, stored as `"start-end"`.
    ///
    /// Requires `1 <= start < end`.
    pub fn native_page_ranges(mut self, start: u32, end: u32) -> Result<Self, GotenbergError> {
        if start < 1 || start >= end {
            return Err(GotenbergError::InvalidRange { start, end });
        }
        self.props.native_page_ranges = format!("{start}-{end}");
        Ok(self)
    }

    pub fn pdf_format(mut self, format: PdfFormat) -> Self {
        if format.is_deprecated() {
            warn!("PDF format {} is deprecated by the conversion service", format);
        }
        self.props.pdf_format = format;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.props.scale = scale;
        self
    }

    pub fn prefer_css_page_size(mut self, v: bool) -> Self {
        self.props.prefer_css_page_size = v;
        self
    }

    pub fn print_background(mut self, v: bool) -> Self {
        self.props.print_background = v;
        self
    }

    pub fn landscape(mut self, v: bool) -> Self {
        self.props.landscape = v;
        self
    }

    pub fn pdf_universal_access(mut self, v: bool) -> Self {
        self.props.pdf_universal_access = v;
        self
    }

    /// Snapshot the current values. Never fails: every value already passed
    /// its setter's validation.
    pub fn build(&self) -> PageProperties {
        self.props.clone()
    }
}

fn above(field: &'static str, value: f32, minimum: f32) -> Result<f32, GotenbergError> {
    // Written as a positive comparison so NaN is rejected too.
    if value > minimum {
        Ok(value)
    } else {
        Err(GotenbergError::InvalidDimension {
            field,
            value,
            minimum,
        })
    }
}

// ── Deserialisation ──────────────────────────────────────────────────────

/// Loose, all-optional form of [`PageProperties`] used for deserialisation.
///
/// Missing keys keep the builder defaults; present keys go through the
/// validating setters.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PagePropertiesDocument {
    pub paper_width: Option<f32>,
    pub paper_height: Option<f32>,
    pub margin_top: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub margin_left: Option<f32>,
    pub margin_right: Option<f32>,
    pub prefer_css_page_size: Option<bool>,
    pub print_background: Option<bool>,
    pub landscape: Option<bool>,
    pub scale: Option<f32>,
    /// `"start-end"`; empty means all pages.
    pub native_page_ranges: Option<String>,
    pub pdf_format: Option<PdfFormat>,
    pub pdf_universal_access: Option<bool>,
}

impl TryFrom<PagePropertiesDocument> for PageProperties {
    type Error = GotenbergError;

    fn try_from(doc: PagePropertiesDocument) -> Result<Self, Self::Error> {
        let mut b = PageProperties::builder();

        if let Some(v) = doc.paper_width {
            b = b.paper_width(v)?;
        }
        if let Some(v) = doc.paper_height {
            b = b.paper_height(v)?;
        }
        if let Some(v) = doc.margin_top {
            b = b.margin_top(v)?;
        }
        if let Some(v) = doc.margin_bottom {
            b = b.margin_bottom(v)?;
        }
        if let Some(v) = doc.margin_left {
            b = b.margin_left(v)?;
        }
        if let Some(v) = doc.margin_right {
            b = b.margin_right(v)?;
        }
        if let Some(v) = doc.prefer_css_page_size {
            b = b.prefer_css_page_size(v);
        }
        if let Some(v) = doc.print_background {
            b = b.print_background(v);
        }
        if let Some(v) = doc.landscape {
            b = b.landscape(v);
        }
        if let Some(v) = doc.scale {
            b = b.scale(v);
        }
        if let Some(range) = doc.native_page_ranges.as_deref().filter(|r| !r.is_empty()) {
            let (start, end) = parse_page_range(range)?;
            b = b.native_page_ranges(start, end)?;
        }
        if let Some(v) = doc.pdf_format {
            b = b.pdf_format(v);
        }
        if let Some(v) = doc.pdf_universal_access {
            b = b.pdf_universal_access(v);
        }

        Ok(b.build())
    }
}

/// Parse `"start-end"` into its two page numbers without range-checking them.
pub fn parse_page_range(s: &str) -> Result<(u32, u32), GotenbergError> {
    let invalid = || GotenbergError::InvalidConfig(format!("invalid page range '{s}', expected start-end"));
    let (start, end) = s.split_once('-').ok_or_else(invalid)?;
    let start = start.trim().parse().map_err(|_| invalid())?;
    let end = end.trim().parse().map_err(|_| invalid())?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(fields: &'a [(&'static str, String)], name: &str) -> &'a str {
        fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing field {name}"))
    }

    #[test]
    fn paper_width_threshold() {
        for w in [-3.0, 0.0, f32::MIN_POSITIVE, 0.99, MIN_PAPER_WIDTH] {
            let err = PageProperties::builder().paper_width(w).unwrap_err();
            assert!(
                matches!(err, GotenbergError::InvalidDimension { minimum, .. } if minimum == MIN_PAPER_WIDTH),
                "width {w}: {err:?}"
            );
        }
        for w in [MIN_PAPER_WIDTH + 0.01, 8.5, 40.0] {
            assert!(PageProperties::builder().paper_width(w).is_ok(), "width {w}");
        }
    }

    #[test]
    fn paper_height_threshold() {
        for h in [0.0, 1.0, MIN_PAPER_HEIGHT] {
            assert!(matches!(
                PageProperties::builder().paper_height(h),
                Err(GotenbergError::InvalidDimension { .. })
            ));
        }
        assert!(PageProperties::builder().paper_height(MIN_PAPER_HEIGHT + 0.01).is_ok());
    }

    #[test]
    fn margins_reject_zero_and_negative() {
        type Setter = fn(PagePropertiesBuilder, f32) -> Result<PagePropertiesBuilder, GotenbergError>;
        let setters: [Setter; 5] = [
            PagePropertiesBuilder::margin_top,
            PagePropertiesBuilder::margin_bottom,
            PagePropertiesBuilder::margin_left,
            PagePropertiesBuilder::margin_right,
            PagePropertiesBuilder::margins,
        ];
        for set in setters {
            assert!(set(PageProperties::builder(), MIN_MARGIN).is_err());
            assert!(set(PageProperties::builder(), -0.5).is_err());
            assert!(set(PageProperties::builder(), MIN_MARGIN + 0.01).is_ok());
        }
    }

    #[test]
    fn nan_is_rejected() {
        assert!(PageProperties::builder().paper_width(f32::NAN).is_err());
        assert!(PageProperties::builder().margin_left(f32::NAN).is_err());
    }

    #[test]
    fn page_range_rules() {
        let props = PageProperties::builder()
            .native_page_ranges(1, 5)
            .unwrap()
            .build();
        assert_eq!(props.native_page_ranges(), "1-5");

        for (s, e) in [(5, 1), (0, 5), (3, 3), (0, 0)] {
            assert!(
                matches!(
                    PageProperties::builder().native_page_ranges(s, e),
                    Err(GotenbergError::InvalidRange { start, end }) if start == s && end == e
                ),
                "{s}-{e}"
            );
        }
    }

    #[test]
    fn failed_setter_does_not_touch_defaults() {
        let builder = PageProperties::builder().landscape(true);
        let kept = builder.clone();
        assert!(builder.paper_width(0.5).is_err());
        assert_eq!(kept.build().paper_width(), DEFAULT_PAPER_WIDTH);
        assert!(kept.build().landscape());
    }

    #[test]
    fn defaults_render_as_expected() {
        let fields = PageProperties::default().form_fields();
        assert_eq!(fields.len(), FORM_FIELD_COUNT);
        assert_eq!(field(&fields, "paperWidth"), "8.5");
        assert_eq!(field(&fields, "paperHeight"), "11.0");
        assert_eq!(field(&fields, "marginTop"), "0.39");
        assert_eq!(field(&fields, "marginRight"), "0.39");
        assert_eq!(field(&fields, "scale"), "1.0");
        assert_eq!(field(&fields, "landscape"), "false");
        assert_eq!(field(&fields, "nativePageRanges"), "");
        assert_eq!(field(&fields, "pdfFormat"), "");
        assert_eq!(field(&fields, "nativePdfFormat"), "PDF/A-1a");
        assert_eq!(field(&fields, "pdfua"), "false");
    }

    #[test]
    fn set_values_render_verbatim() {
        let props = PageProperties::builder()
            .paper_width(2.0)
            .unwrap()
            .scale(1.5)
            .print_background(true)
            .prefer_css_page_size(true)
            .pdf_format(PdfFormat::PdfA3b)
            .pdf_universal_access(true)
            .native_page_ranges(2, 9)
            .unwrap()
            .build();
        let fields = props.form_fields();
        assert_eq!(field(&fields, "paperWidth"), "2.0");
        assert_eq!(field(&fields, "scale"), "1.5");
        assert_eq!(field(&fields, "printBackground"), "true");
        assert_eq!(field(&fields, "preferCssPageSize"), "true");
        assert_eq!(field(&fields, "pdfFormat"), "PDF/A-3b");
        assert_eq!(field(&fields, "nativePageRanges"), "2-9");
        assert_eq!(field(&fields, "pdfua"), "true");
    }

    #[test]
    fn repeated_builds_are_identical_and_independent() {
        let builder = PageProperties::builder().margins(0.25).unwrap();
        let a = builder.build();
        let b = builder.build();
        assert_eq!(a, b);
        assert_eq!(a.form_fields(), b.form_fields());

        let c = builder.landscape(true).build();
        assert!(c.landscape());
        assert!(!a.landscape());
    }

    #[test]
    fn pdf_format_wire_strings() {
        assert_eq!(PdfFormat::Unset.as_str(), "");
        assert_eq!(PdfFormat::PdfA1a.as_str(), "PDF/A-1a");
        assert_eq!(PdfFormat::PdfA2b.as_str(), "PDF/A-2b");
        assert_eq!(PdfFormat::PdfA3b.as_str(), "PDF/A-3b");
        assert!(PdfFormat::PdfA1a.is_deprecated());
        assert!(!PdfFormat::PdfA2b.is_deprecated());
        for f in PdfFormat::ALL {
            assert_eq!(f.as_str().parse::<PdfFormat>().unwrap(), f);
        }
        assert!("PDF/A-4".parse::<PdfFormat>().is_err());
    }

    #[test]
    fn deserialize_applies_validation() {
        let props: PageProperties = serde_json::from_str(
            r#"{"paperWidth": 4.0, "landscape": true, "nativePageRanges": "1-3", "pdfFormat": "PDF/A-2b"}"#,
        )
        .unwrap();
        assert_eq!(props.paper_width(), 4.0);
        assert_eq!(props.paper_height(), DEFAULT_PAPER_HEIGHT);
        assert!(props.landscape());
        assert_eq!(props.native_page_ranges(), "1-3");
        assert_eq!(props.pdf_format(), PdfFormat::PdfA2b);

        let err = serde_json::from_str::<PageProperties>(r#"{"paperWidth": 0.5}"#).unwrap_err();
        assert!(err.to_string().contains("Paper width"), "got: {err}");

        assert!(serde_json::from_str::<PageProperties>(r#"{"nativePageRanges": "4-2"}"#).is_err());
        assert!(serde_json::from_str::<PageProperties>(r#"{"paperColour": "red"}"#).is_err());
    }

    #[test]
    fn serialize_then_deserialize_preserves_values() {
        let props = PageProperties::builder()
            .paper_height(5.5)
            .unwrap()
            .native_page_ranges(3, 4)
            .unwrap()
            .pdf_format(PdfFormat::PdfA2b)
            .build();
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains(r#""pdfFormat":"PDF/A-2b""#), "got: {json}");
        let back: PageProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }

    #[test]
    fn parse_page_range_accepts_spaces() {
        assert_eq!(parse_page_range("1 - 7").unwrap(), (1, 7));
        assert!(parse_page_range("7").is_err());
        assert!(parse_page_range("a-b").is_err());
    }
}
