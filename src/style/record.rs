//! Style record and CSS value types.

use super::Rgb;
use serde::{Deserialize, Serialize};

/// Points per CSS pixel (96 dpi).
pub const POINTS_PER_PIXEL: f32 = 0.75;

/// Unit applied to unit-less numeric CSS values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementUnit {
    /// Typographic points (1/72 inch)
    #[default]
    #[serde(rename = "pt", alias = "points")]
    Points,
    /// CSS pixels (1/96 inch)
    #[serde(rename = "px", alias = "pixels")]
    Pixels,
}

impl MeasurementUnit {
    /// Build a length from a bare number in this unit.
    pub fn length(self, value: f32) -> Length {
        match self {
            MeasurementUnit::Points => Length::Pt(value),
            MeasurementUnit::Pixels => Length::Px(value),
        }
    }

    /// Parse a unit name ("pt", "px", "points", "pixels").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "points" => Some(MeasurementUnit::Points),
            "px" | "pixels" => Some(MeasurementUnit::Pixels),
            _ => None,
        }
    }
}

/// A CSS length. Absolute units other than px are folded into points at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    /// Points
    Pt(f32),
    /// CSS pixels
    Px(f32),
    /// Relative to the element's inherited font size
    Em(f32),
    /// Relative to the document default font size
    Rem(f32),
    /// Percentage of the inherited font size
    Percent(f32),
}

impl Length {
    /// Convert to points given the inherited and root font sizes (in points).
    pub fn to_points(self, font_size: f32, root_font_size: f32) -> f32 {
        match self {
            Length::Pt(pt) => pt,
            Length::Px(px) => px * POINTS_PER_PIXEL,
            Length::Em(em) => em * font_size,
            Length::Rem(rem) => rem * root_font_size,
            Length::Percent(pct) => font_size * pct / 100.0,
        }
    }

    /// Points value if this length is already resolved.
    pub fn as_points(self) -> Option<f32> {
        match self {
            Length::Pt(pt) => Some(pt),
            _ => None,
        }
    }
}

/// Font weight, collapsed to the two weights a word processor toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    Normal,
    /// Bold weight (CSS 600 and above)
    Bold,
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright
    Normal,
    /// Italic or oblique
    Italic,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left aligned
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
    /// Justified
    Justify,
}

/// Line height: a multiple of the font size or a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    /// Multiplier (1.0 = single spacing)
    Multiplier(f32),
    /// Fixed line height
    Length(Length),
}

/// Set of text decorations. The default value is `none`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDecoration {
    /// Underlined text
    pub underline: bool,
    /// Struck-through text
    pub line_through: bool,
}

impl TextDecoration {
    /// Decoration with only an underline.
    pub fn underline() -> Self {
        Self {
            underline: true,
            line_through: false,
        }
    }

    /// Check whether no decoration is set.
    pub fn is_none(&self) -> bool {
        !self.underline && !self.line_through
    }
}

/// Per-side margins. Unset sides are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Top margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Length>,
    /// Right margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Length>,
    /// Bottom margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Length>,
    /// Left margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Length>,
}

impl Margin {
    /// Same length on all four sides.
    pub fn uniform(length: Length) -> Self {
        Self {
            top: Some(length),
            right: Some(length),
            bottom: Some(length),
            left: Some(length),
        }
    }

    /// Check if no side is set.
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    /// Sides set in `self`, falling back to `other` for unset sides.
    pub fn or(self, other: Margin) -> Margin {
        Margin {
            top: self.top.or(other.top),
            right: self.right.or(other.right),
            bottom: self.bottom.or(other.bottom),
            left: self.left.or(other.left),
        }
    }

    fn resolve(self, font_size: f32, root_font_size: f32) -> Margin {
        let side = |l: Option<Length>| l.map(|l| Length::Pt(l.to_points(font_size, root_font_size)));
        Margin {
            top: side(self.top),
            right: side(self.right),
            bottom: side(self.bottom),
            left: side(self.left),
        }
    }
}

/// Formatting attributes declared on, or resolved for, a node.
///
/// A record produced by the style parser holds declared values, possibly in
/// relative units. [`StyleRecord::cascade`] turns it into a resolved record
/// whose lengths are all in points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    /// Font size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Length>,

    /// Font color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,

    /// Background color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgb>,

    /// Font weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,

    /// Font style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,

    /// Text alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,

    /// Block margins (never inherited)
    #[serde(default, skip_serializing_if = "Margin::is_empty")]
    pub margin: Margin,

    /// Line height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeight>,

    /// Text decoration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
}

impl StyleRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Root record carrying the document default font size.
    pub fn root(default_font_size: f32) -> Self {
        Self {
            font_size: Some(Length::Pt(default_font_size)),
            ..Self::default()
        }
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &StyleRecord::default()
    }

    /// Resolved font size in points, if known.
    pub fn font_size_pt(&self) -> Option<f32> {
        self.font_size.and_then(Length::as_points)
    }

    /// Check if the record asks for bold text.
    pub fn is_bold(&self) -> bool {
        self.font_weight == Some(FontWeight::Bold)
    }

    /// Check if the record asks for italic text.
    pub fn is_italic(&self) -> bool {
        self.font_style == Some(FontStyle::Italic)
    }

    /// Fields set in `self`, with unset fields taken from `fallback`.
    ///
    /// No unit resolution happens here; used to layer tag defaults under a
    /// declared style before cascading.
    pub fn or(&self, fallback: &StyleRecord) -> StyleRecord {
        StyleRecord {
            font_size: self.font_size.or(fallback.font_size),
            color: self.color.or(fallback.color),
            background_color: self.background_color.or(fallback.background_color),
            font_weight: self.font_weight.or(fallback.font_weight),
            font_style: self.font_style.or(fallback.font_style),
            text_align: self.text_align.or(fallback.text_align),
            margin: self.margin.or(fallback.margin),
            line_height: self.line_height.or(fallback.line_height),
            text_decoration: self.text_decoration.or(fallback.text_decoration),
        }
    }

    /// Only the character-level fields (size, color, background, weight,
    /// style, decoration).
    pub fn inline_only(&self) -> StyleRecord {
        StyleRecord {
            font_size: self.font_size,
            color: self.color,
            background_color: self.background_color,
            font_weight: self.font_weight,
            font_style: self.font_style,
            text_decoration: self.text_decoration,
            ..StyleRecord::default()
        }
    }

    /// Resolve a declared record against this (already resolved) parent.
    ///
    /// Declared fields override, unset fields inherit from the parent. Margins
    /// are taken from the declaration only. Relative lengths are converted to
    /// points: `em`/`%` font sizes against the parent size, other `em`
    /// lengths against the resolved size of the element itself.
    pub fn cascade(&self, declared: &StyleRecord, root_font_size: f32) -> StyleRecord {
        let parent_size = self.font_size_pt().unwrap_or(root_font_size);
        let font_size = declared
            .font_size
            .map(|l| l.to_points(parent_size, root_font_size))
            .unwrap_or(parent_size);

        let line_height = match declared.line_height {
            Some(LineHeight::Length(l)) => Some(LineHeight::Length(Length::Pt(
                l.to_points(font_size, root_font_size),
            ))),
            Some(multiplier) => Some(multiplier),
            None => self.line_height,
        };

        StyleRecord {
            font_size: Some(Length::Pt(font_size)),
            color: declared.color.or(self.color),
            background_color: declared.background_color.or(self.background_color),
            font_weight: declared.font_weight.or(self.font_weight),
            font_style: declared.font_style.or(self.font_style),
            text_align: declared.text_align.or(self.text_align),
            margin: declared.margin.resolve(font_size, root_font_size),
            line_height,
            text_decoration: declared.text_decoration.or(self.text_decoration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_to_points() {
        assert_eq!(Length::Pt(10.0).to_points(12.0, 12.0), 10.0);
        assert_eq!(Length::Px(16.0).to_points(12.0, 12.0), 12.0);
        assert_eq!(Length::Em(2.0).to_points(10.0, 12.0), 20.0);
        assert_eq!(Length::Rem(2.0).to_points(10.0, 12.0), 24.0);
        assert_eq!(Length::Percent(50.0).to_points(10.0, 12.0), 5.0);
    }

    #[test]
    fn test_cascade_inherits_unset_fields() {
        let parent = StyleRecord {
            color: Some(Rgb::new(255, 0, 0)),
            text_align: Some(TextAlign::Center),
            margin: Margin::uniform(Length::Pt(20.0)),
            ..StyleRecord::root(12.0)
        };
        let declared = StyleRecord {
            font_weight: Some(FontWeight::Bold),
            ..StyleRecord::default()
        };

        let resolved = parent.cascade(&declared, 12.0);
        assert_eq!(resolved.color, Some(Rgb::new(255, 0, 0)));
        assert_eq!(resolved.text_align, Some(TextAlign::Center));
        assert!(resolved.is_bold());
        assert_eq!(resolved.font_size_pt(), Some(12.0));
        // margins stay with the block that declared them
        assert!(resolved.margin.is_empty());
    }

    #[test]
    fn test_cascade_explicit_overrides() {
        let parent = StyleRecord {
            color: Some(Rgb::new(255, 0, 0)),
            ..StyleRecord::root(12.0)
        };
        let declared = StyleRecord {
            color: Some(Rgb::new(0, 0, 255)),
            font_size: Some(Length::Em(1.5)),
            margin: Margin {
                top: Some(Length::Em(1.0)),
                ..Margin::default()
            },
            ..StyleRecord::default()
        };

        let resolved = parent.cascade(&declared, 12.0);
        assert_eq!(resolved.color, Some(Rgb::new(0, 0, 255)));
        assert_eq!(resolved.font_size_pt(), Some(18.0));
        assert_eq!(resolved.margin.top, Some(Length::Pt(18.0)));
    }

    #[test]
    fn test_record_or_layers_defaults() {
        let declared = StyleRecord {
            font_weight: Some(FontWeight::Normal),
            ..StyleRecord::default()
        };
        let defaults = StyleRecord {
            font_weight: Some(FontWeight::Bold),
            font_size: Some(Length::Pt(16.0)),
            ..StyleRecord::default()
        };
        let layered = declared.or(&defaults);
        assert_eq!(layered.font_weight, Some(FontWeight::Normal));
        assert_eq!(layered.font_size, Some(Length::Pt(16.0)));
    }

    #[test]
    fn test_inline_only_drops_block_fields() {
        let record = StyleRecord {
            color: Some(Rgb::new(1, 2, 3)),
            text_align: Some(TextAlign::Right),
            margin: Margin::uniform(Length::Pt(4.0)),
            line_height: Some(LineHeight::Multiplier(2.0)),
            ..StyleRecord::root(12.0)
        };
        let inline = record.inline_only();
        assert_eq!(inline.color, Some(Rgb::new(1, 2, 3)));
        assert_eq!(inline.font_size_pt(), Some(12.0));
        assert_eq!(inline.text_align, None);
        assert!(inline.margin.is_empty());
        assert_eq!(inline.line_height, None);
    }

    #[test]
    fn test_measurement_unit_parse() {
        assert_eq!(MeasurementUnit::parse("PT"), Some(MeasurementUnit::Points));
        assert_eq!(MeasurementUnit::parse("pixels"), Some(MeasurementUnit::Pixels));
        assert_eq!(MeasurementUnit::parse("em"), None);
    }
}
