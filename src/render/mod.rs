//! DOCX emission.
//!
//! Emission runs in three steps, each testable on its own: the
//! [`DocumentModel`] is turned into XML trees ([`DocxParts`]), each tree is
//! serialized to bytes, and the bytes are compressed into the archive.

mod document;
mod json;
mod numbering;
mod options;
mod package;
mod styles;
mod xml;

pub use document::{DocumentWriter, CONTENT_WIDTH};
pub use json::{to_json, write_json, JsonFormat};
pub use numbering::{level_indent, Numbering, LIST_LEVELS};
pub use options::{RenderOptions, DEFAULT_EAST_ASIAN_FONT, DEFAULT_FONT_FAMILY};
pub use package::{DocxParts, PART_NAMES};
pub use styles::{heading_size, heading_style_id, styles_xml};
pub use xml::{is_xml_char, xml_safe, XmlElement, XmlNode};

use crate::error::Result;
use crate::model::DocumentModel;

pub(crate) const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Render a document model to DOCX bytes.
pub fn to_docx(model: &DocumentModel, options: &RenderOptions) -> Result<Vec<u8>> {
    DocxParts::build(model, options)?.to_package()
}

/// Largest spacing or indentation Word accepts, in twips (22 inches).
pub(crate) const MAX_TWIPS: u32 = 31_680;

/// Largest font size Word accepts, in half-points (1638pt).
pub(crate) const MAX_HALF_POINTS: u32 = 3_276;

/// Points to twentieths of a point, clamped to `0..=MAX_TWIPS`.
pub(crate) fn twips(points: f32) -> u32 {
    (points * 20.0).round().clamp(0.0, MAX_TWIPS as f32) as u32
}

/// Points to half-points, clamped to `1..=MAX_HALF_POINTS`.
pub(crate) fn half_points(points: f32) -> u32 {
    (points * 2.0).round().clamp(1.0, MAX_HALF_POINTS as f32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(twips(12.0), 240);
        assert_eq!(twips(4.0), 80);
        assert_eq!(twips(0.0), 0);
        assert_eq!(half_points(12.0), 24);
        assert_eq!(half_points(10.5), 21);
    }

    #[test]
    fn test_conversions_clamped_to_word_limits() {
        assert_eq!(twips(3000.0), MAX_TWIPS);
        assert_eq!(twips(-5.0), 0);
        assert_eq!(half_points(5000.0), MAX_HALF_POINTS);
        assert_eq!(half_points(0.1), 1);
    }

    #[test]
    fn test_to_docx_empty_model() {
        let bytes = to_docx(&DocumentModel::new(), &RenderOptions::default()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
