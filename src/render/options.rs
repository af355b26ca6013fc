//! DOCX rendering options.

use crate::builder::DEFAULT_FONT_SIZE;

/// Default Latin font family.
pub const DEFAULT_FONT_FAMILY: &str = "Times New Roman";

/// Default East-Asian font family.
pub const DEFAULT_EAST_ASIAN_FONT: &str = "SimSun";

/// Options for emitting the DOCX package.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Font family of the Normal style
    pub font_family: String,

    /// East-Asian font family of the Normal style
    pub east_asian_font: String,

    /// Normal style font size in points
    pub default_font_size: f32,

    /// Name written as the producing application in `docProps/app.xml`
    pub application: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the East-Asian font family.
    pub fn with_east_asian_font(mut self, family: impl Into<String>) -> Self {
        self.east_asian_font = family.into();
        self
    }

    /// Set the Normal style font size in points.
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            east_asian_font: DEFAULT_EAST_ASIAN_FONT.to_string(),
            default_font_size: DEFAULT_FONT_SIZE,
            application: "htmldocx".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.font_family, "Times New Roman");
        assert_eq!(options.east_asian_font, "SimSun");
        assert_eq!(options.default_font_size, 12.0);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .with_font_family("Arial")
            .with_east_asian_font("MS Mincho")
            .with_default_font_size(10.5);
        assert_eq!(options.font_family, "Arial");
        assert_eq!(options.east_asian_font, "MS Mincho");
        assert_eq!(options.default_font_size, 10.5);
    }
}
