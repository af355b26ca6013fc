//! Run accumulation with HTML whitespace handling.

use crate::model::{InlineContent, TextRun};
use crate::render::is_xml_char;
use crate::style::StyleRecord;

/// Collects the inline content of one paragraph.
///
/// Runs of ASCII whitespace collapse to a single space, whitespace at the
/// start and end of a line is dropped, and adjacent text with an identical
/// character style merges into one run. Control characters a document
/// cannot hold are dropped.
#[derive(Debug)]
pub struct RunCollector {
    content: Vec<InlineContent>,
    at_line_start: bool,
    last_was_space: bool,
}

impl Default for RunCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl RunCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            at_line_start: true,
            last_was_space: false,
        }
    }

    /// Append text in the given resolved style.
    pub fn push_text(&mut self, text: &str, style: &StyleRecord) {
        let mut collapsed = String::with_capacity(text.len());
        for c in text.chars().filter(|&c| is_xml_char(c)) {
            if c.is_ascii_whitespace() {
                if !self.at_line_start && !self.last_was_space {
                    collapsed.push(' ');
                    self.last_was_space = true;
                }
            } else {
                collapsed.push(c);
                self.at_line_start = false;
                self.last_was_space = false;
            }
        }
        if collapsed.is_empty() {
            return;
        }

        let style = style.inline_only();
        match self.content.last_mut() {
            Some(InlineContent::Run(run)) if run.style == style => run.text.push_str(&collapsed),
            _ => self.content.push(InlineContent::Run(TextRun {
                text: collapsed,
                style,
            })),
        }
    }

    /// Append a hard line break.
    pub fn push_break(&mut self) {
        self.trim_trailing_space();
        self.content.push(InlineContent::LineBreak);
        self.at_line_start = true;
        self.last_was_space = false;
    }

    /// Check whether nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Take the collected content and reset the collector.
    pub fn take(&mut self) -> Vec<InlineContent> {
        self.trim_trailing_space();
        self.at_line_start = true;
        self.last_was_space = false;
        std::mem::take(&mut self.content)
    }

    fn trim_trailing_space(&mut self) {
        while let Some(InlineContent::Run(run)) = self.content.last_mut() {
            let trimmed_len = run.text.trim_end_matches(' ').len();
            run.text.truncate(trimmed_len);
            if !run.text.is_empty() {
                break;
            }
            self.content.pop();
        }
    }
}
