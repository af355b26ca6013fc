//! Conversion pipeline.
//!
//! Runs the four stages in order: input preparation, HTML parsing, model
//! building and DOCX emission. The first failing stage stops the pipeline
//! and its error is wrapped in a [`ConversionError`] naming the stage.
//!
//! # Example
//!
//! ```no_run
//! use htmldocx::convert::{convert, ConvertOptions};
//!
//! let options = ConvertOptions::new().with_default_font_size(11.0);
//! let bytes = convert("<h1>Title</h1><p>Body</p>", &options).unwrap();
//! std::fs::write("out.docx", bytes).unwrap();
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::builder::{BuildOptions, ModelBuilder, ShortRowPolicy, DEFAULT_FONT_SIZE};
use crate::error::{ConversionError, Error, Stage};
use crate::input::{prepare_input, InputOptions};
use crate::model::{DocumentModel, DocumentStats, Metadata};
use crate::parser::{ErrorMode, HtmlParser, ParseOptions, UnsupportedTagPolicy};
use crate::render::{xml_safe, DocxParts, RenderOptions, DEFAULT_EAST_ASIAN_FONT, DEFAULT_FONT_FAMILY};
use crate::style::MeasurementUnit;

/// MIME type of the produced documents.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Result type of the public pipeline.
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

/// Options for a conversion.
///
/// Deserializes from camelCase JSON; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Font size (pt) applied when no ancestor specifies one
    pub default_font_size: f32,

    /// Unit of unit-less numeric CSS values
    pub default_measurement_unit: MeasurementUnit,

    /// Abort on malformed markup instead of coercing it
    pub strict_mode: bool,

    /// Handling of tags outside the supported set
    pub unsupported_tags: UnsupportedTagPolicy,

    /// Handling of short table rows
    pub short_rows: ShortRowPolicy,

    /// Font family of body text
    pub font_family: String,

    /// East-Asian font family of body text
    pub east_asian_font: String,

    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Remove `<think>` blocks from the input
    pub strip_think_tags: bool,

    /// Turn literal `\n` sequences into newlines
    pub unescape_newlines: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_font_size: DEFAULT_FONT_SIZE,
            default_measurement_unit: MeasurementUnit::Points,
            strict_mode: false,
            unsupported_tags: UnsupportedTagPolicy::Transparent,
            short_rows: ShortRowPolicy::Pad,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            east_asian_font: DEFAULT_EAST_ASIAN_FONT.to_string(),
            title: None,
            author: None,
            strip_think_tags: true,
            unescape_newlines: true,
        }
    }
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the default font size in points.
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    /// Set the unit of unit-less CSS numbers.
    pub fn with_measurement_unit(mut self, unit: MeasurementUnit) -> Self {
        self.default_measurement_unit = unit;
        self
    }

    /// Enable or disable strict mode.
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Set the unsupported tag policy.
    pub fn with_unsupported_tags(mut self, policy: UnsupportedTagPolicy) -> Self {
        self.unsupported_tags = policy;
        self
    }

    /// Set the short row policy.
    pub fn with_short_rows(mut self, policy: ShortRowPolicy) -> Self {
        self.short_rows = policy;
        self
    }

    /// Set the body font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the East-Asian font family.
    pub fn with_east_asian_font(mut self, family: impl Into<String>) -> Self {
        self.east_asian_font = family.into();
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Enable or disable `<think>` block removal.
    pub fn with_strip_think_tags(mut self, strip: bool) -> Self {
        self.strip_think_tags = strip;
        self
    }

    /// Enable or disable `\n` unescaping.
    pub fn with_unescape_newlines(mut self, unescape: bool) -> Self {
        self.unescape_newlines = unescape;
        self
    }

    /// Check that the options are usable.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.default_font_size.is_finite() || self.default_font_size <= 0.0 {
            return Err(Error::InvalidOption(format!(
                "defaultFontSize must be a positive number, got {}",
                self.default_font_size
            )));
        }
        Ok(())
    }

    /// Input preparation options.
    pub fn input_options(&self) -> InputOptions {
        InputOptions::new()
            .with_strip_think_tags(self.strip_think_tags)
            .with_unescape_newlines(self.unescape_newlines)
    }

    /// Parser options.
    pub fn parse_options(&self) -> ParseOptions {
        let mode = if self.strict_mode {
            ErrorMode::Strict
        } else {
            ErrorMode::Lenient
        };
        ParseOptions::new()
            .with_error_mode(mode)
            .with_unsupported_tags(self.unsupported_tags)
    }

    /// Model builder options.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new()
            .with_default_font_size(self.default_font_size)
            .with_measurement_unit(self.default_measurement_unit)
            .with_short_rows(self.short_rows)
    }

    /// Emitter options.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_font_family(self.font_family.as_str())
            .with_east_asian_font(self.east_asian_font.as_str())
            .with_default_font_size(self.default_font_size)
    }

    fn metadata(&self) -> Metadata {
        let clean = |value: &Option<String>| value.as_deref().map(|v| xml_safe(v).into_owned());
        Metadata {
            title: clean(&self.title),
            author: clean(&self.author),
        }
    }
}

/// Output of [`convert_with_stats`].
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// DOCX archive bytes
    pub bytes: Vec<u8>,

    /// Counts of the converted content
    pub stats: DocumentStats,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(bytes: Vec<u8>, stats: DocumentStats) -> Self {
        Self {
            bytes,
            stats,
            mime_type: DOCX_MIME_TYPE,
        }
    }

    /// Size of the archive in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the archive is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn stage<T>(stage: Stage, result: crate::error::Result<T>) -> ConversionResult<T> {
    result.map_err(|e| ConversionError::new(stage, e))
}

/// Run the input, parse and build stages.
pub fn convert_to_model(html: &str, options: &ConvertOptions) -> ConversionResult<DocumentModel> {
    stage(Stage::Input, options.validate())?;
    let prepared = stage(Stage::Input, prepare_input(html, &options.input_options()))?;
    debug!("prepared {} bytes of html", prepared.len());

    let tree = stage(
        Stage::Parse,
        HtmlParser::with_options(options.parse_options()).parse(&prepared),
    )?;

    let mut model = stage(
        Stage::Build,
        ModelBuilder::with_options(options.build_options()).build(&tree),
    )?;
    model.metadata = options.metadata();
    debug!("built model with {} units", model.units.len());
    Ok(model)
}

/// Render an already built model.
pub fn emit(model: &DocumentModel, options: &ConvertOptions) -> ConversionResult<Vec<u8>> {
    stage(
        Stage::Emit,
        DocxParts::build(model, &options.render_options()).and_then(|parts| parts.to_package()),
    )
}

/// Convert HTML to DOCX bytes.
pub fn convert(html: &str, options: &ConvertOptions) -> ConversionResult<Vec<u8>> {
    let model = convert_to_model(html, options)?;
    emit(&model, options)
}

/// Convert HTML to DOCX, also returning content statistics.
pub fn convert_with_stats(html: &str, options: &ConvertOptions) -> ConversionResult<ConvertResult> {
    let model = convert_to_model(html, options)?;
    let bytes = emit(&model, options)?;
    Ok(ConvertResult::new(bytes, model.stats()))
}
