//! Paragraph, heading and text-level types.

use crate::style::StyleRecord;
use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Resolved paragraph style
    pub style: StyleRecord,

    /// Text runs and line breaks
    pub content: Vec<InlineContent>,
}

impl Paragraph {
    /// Create an empty paragraph with the given resolved style.
    pub fn new(style: StyleRecord) -> Self {
        Self {
            style,
            content: Vec::new(),
        }
    }

    /// Create a paragraph holding one unstyled run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new(StyleRecord::default());
        p.add_run(TextRun::new(text));
        p
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Run(run));
    }

    /// Add a line break.
    pub fn add_line_break(&mut self) {
        self.content.push(InlineContent::LineBreak);
    }

    /// Text runs, skipping line breaks.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        runs(&self.content)
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        plain_text(&self.content)
    }

    /// Check if the paragraph has no text and no breaks.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A heading (level 1-6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1 to 6
    pub level: u8,

    /// Resolved heading style
    pub style: StyleRecord,

    /// Text runs and line breaks
    pub content: Vec<InlineContent>,
}

impl Heading {
    /// Create an empty heading. The level is clamped to 1-6.
    pub fn new(level: u8, style: StyleRecord) -> Self {
        Self {
            level: level.clamp(1, 6),
            style,
            content: Vec::new(),
        }
    }

    /// Text runs, skipping line breaks.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        runs(&self.content)
    }

    /// Get plain text content of the heading.
    pub fn plain_text(&self) -> String {
        plain_text(&self.content)
    }
}

/// Inline content within a paragraph or heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Run(TextRun),

    /// A hard line break
    LineBreak,
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Resolved character style (size, color, background, weight, style,
    /// decoration)
    pub style: StyleRecord,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self::styled(text, StyleRecord::default())
    }

    /// Create a run with a resolved style. Block-level fields are dropped.
    pub fn styled(text: impl Into<String>, style: StyleRecord) -> Self {
        Self {
            text: text.into(),
            style: style.inline_only(),
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

fn runs(content: &[InlineContent]) -> impl Iterator<Item = &TextRun> {
    content.iter().filter_map(|c| match c {
        InlineContent::Run(run) => Some(run),
        InlineContent::LineBreak => None,
    })
}

fn plain_text(content: &[InlineContent]) -> String {
    content
        .iter()
        .map(|c| match c {
            InlineContent::Run(run) => run.text.as_str(),
            InlineContent::LineBreak => "\n",
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontWeight, TextAlign};

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new(StyleRecord::default());
        p.add_run(TextRun::new("line1"));
        p.add_line_break();
        p.add_run(TextRun::new("line2"));

        assert_eq!(p.plain_text(), "line1\nline2");
        assert_eq!(p.runs().count(), 2);
    }

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(Heading::new(0, StyleRecord::default()).level, 1);
        assert_eq!(Heading::new(9, StyleRecord::default()).level, 6);
    }

    #[test]
    fn test_run_keeps_only_inline_fields() {
        let style = StyleRecord {
            font_weight: Some(FontWeight::Bold),
            text_align: Some(TextAlign::Center),
            ..StyleRecord::default()
        };
        let run = TextRun::styled("x", style);
        assert!(run.style.is_bold());
        assert_eq!(run.style.text_align, None);
    }
}
