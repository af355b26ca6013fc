//! # htmldocx
//!
//! HTML to DOCX conversion library for Rust.
//!
//! Takes HTML with inline CSS (the kind language models tend to produce) and
//! produces a Word document: paragraphs, headings, nested lists and tables
//! with their character and paragraph formatting.
//!
//! ## Quick Start
//!
//! ```no_run
//! use htmldocx::{convert, ConvertOptions};
//!
//! let html = r#"<h1>Report</h1><p style="color: navy">Hello <b>world</b></p>"#;
//! let bytes = convert(html, &ConvertOptions::default()).unwrap();
//! std::fs::write("report.docx", bytes).unwrap();
//! ```
//!
//! ## Pipeline
//!
//! - [`input`]: input cleanup (`<think>` blocks, escaped newlines, `<body>`)
//! - [`parser`]: tokenizing and tree construction with coercion of
//!   malformed markup (or rejection in strict mode)
//! - [`builder`]: style cascade and construction of the [`DocumentModel`]
//! - [`render`]: WordprocessingML trees, serialization and ZIP packaging

pub mod builder;
pub mod convert;
pub mod error;
pub mod input;
pub mod model;
pub mod parser;
pub mod render;
pub mod style;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use builder::{BuildOptions, ModelBuilder, ShortRowPolicy};
pub use convert::{
    convert, convert_to_model, convert_with_stats, ConversionResult, ConvertOptions, ConvertResult,
    DOCX_MIME_TYPE,
};
pub use error::{ConversionError, Error, Result, Stage};
pub use model::{
    ContentUnit, DocumentModel, DocumentStats, Heading, InlineContent, ListBlock, ListItem, ListKind,
    Metadata, Paragraph, Table, TableCell, TableRow, TextRun,
};
pub use parser::{ErrorMode, HtmlParser, Node, ParseOptions, UnsupportedTagPolicy};
pub use render::{DocxParts, JsonFormat, RenderOptions};
pub use style::{resolve_color, MeasurementUnit, Rgb, StyleRecord};

/// Convert HTML to a JSON dump of its document model.
///
/// # Example
///
/// ```
/// use htmldocx::{to_json, ConvertOptions, JsonFormat};
///
/// let json = to_json("<p>hi</p>", &ConvertOptions::default(), JsonFormat::Compact).unwrap();
/// assert!(json.contains("\"hi\""));
/// ```
pub fn to_json(
    html: &str,
    options: &ConvertOptions,
    format: JsonFormat,
) -> ConversionResult<String> {
    let model = convert_to_model(html, options)?;
    render::to_json(&model, format).map_err(|e| ConversionError::new(Stage::Emit, e))
}

/// Builder for converting HTML documents.
///
/// # Example
///
/// ```no_run
/// use htmldocx::HtmlDocx;
///
/// let bytes = HtmlDocx::new()
///     .strict()
///     .with_font_size(11.0)
///     .with_title("Minutes")
///     .parse("<h2>Agenda</h2><ol><li>Budget</li></ol>")?
///     .to_docx()?;
/// # Ok::<(), htmldocx::ConversionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlDocx {
    options: ConvertOptions,
}

impl HtmlDocx {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from complete options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Reject malformed markup instead of coercing it.
    pub fn strict(mut self) -> Self {
        self.options.strict_mode = true;
        self
    }

    /// Set the default font size in points.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.options.default_font_size = size;
        self
    }

    /// Set the unit of unit-less CSS numbers.
    pub fn with_unit(mut self, unit: MeasurementUnit) -> Self {
        self.options.default_measurement_unit = unit;
        self
    }

    /// Set the body font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.options.font_family = family.into();
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.options.author = Some(author.into());
        self
    }

    /// Drop unsupported tags with their content.
    pub fn strip_unsupported(mut self) -> Self {
        self.options.unsupported_tags = UnsupportedTagPolicy::Strip;
        self
    }

    /// Fail on short table rows instead of padding them.
    pub fn reject_short_rows(mut self) -> Self {
        self.options.short_rows = ShortRowPolicy::Reject;
        self
    }

    /// Current options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Parse HTML into a document model.
    pub fn parse(self, html: &str) -> ConversionResult<HtmlDocxResult> {
        let model = convert_to_model(html, &self.options)?;
        Ok(HtmlDocxResult {
            model,
            options: self.options,
        })
    }

    /// Convert HTML straight to DOCX bytes.
    pub fn convert(&self, html: &str) -> ConversionResult<Vec<u8>> {
        convert(html, &self.options)
    }
}

/// A parsed document ready for output.
#[derive(Debug, Clone)]
pub struct HtmlDocxResult {
    /// The document model
    pub model: DocumentModel,
    options: ConvertOptions,
}

impl HtmlDocxResult {
    /// Emit DOCX bytes.
    pub fn to_docx(&self) -> ConversionResult<Vec<u8>> {
        convert::emit(&self.model, &self.options)
    }

    /// Dump the model as JSON.
    pub fn to_json(&self, format: JsonFormat) -> ConversionResult<String> {
        render::to_json(&self.model, format).map_err(|e| ConversionError::new(Stage::Emit, e))
    }

    /// Plain text of the document.
    pub fn plain_text(&self) -> String {
        self.model.plain_text()
    }

    /// Content statistics.
    pub fn stats(&self) -> DocumentStats {
        self.model.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = HtmlDocx::new();
        assert!(!builder.options().strict_mode);
        assert_eq!(builder.options().default_font_size, 12.0);
    }

    #[test]
    fn test_builder_chain() {
        let builder = HtmlDocx::new()
            .strict()
            .with_font_size(10.0)
            .with_unit(MeasurementUnit::Pixels)
            .strip_unsupported()
            .reject_short_rows();
        let options = builder.options();
        assert!(options.strict_mode);
        assert_eq!(options.default_font_size, 10.0);
        assert_eq!(options.default_measurement_unit, MeasurementUnit::Pixels);
        assert_eq!(options.unsupported_tags, UnsupportedTagPolicy::Strip);
        assert_eq!(options.short_rows, ShortRowPolicy::Reject);
    }

    #[test]
    fn test_parse_then_render() {
        let result = HtmlDocx::new()
            .with_title("T")
            .parse("<h1>Head</h1><p>Body text</p>")
            .unwrap();
        assert_eq!(result.plain_text(), "Head\n\nBody text");
        assert_eq!(result.stats().headings, 1);
        assert_eq!(result.model.metadata.title.as_deref(), Some("T"));

        let bytes = result.to_docx().unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert!(result.to_json(JsonFormat::Compact).unwrap().contains("Body text"));
    }
}
