//! Preparation of raw HTML text before parsing.
//!
//! HTML handed to the converter is often produced by a language model and
//! may carry reasoning blocks or escaped newlines. These are cleaned up
//! here, ahead of tokenizing.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());
static BODY_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body\b[^>]*>").unwrap());
static BODY_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</body\s*>").unwrap());

/// Options for input preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputOptions {
    /// Remove `<think>...</think>` blocks
    pub strip_think_tags: bool,

    /// Replace literal `\n` escape sequences with newlines
    pub unescape_newlines: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            strip_think_tags: true,
            unescape_newlines: true,
        }
    }
}

impl InputOptions {
    /// Create new input options with defaults.
    pub fn new() -> Self {
        Self::default()
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
}

/// Prepare raw HTML for parsing.
///
/// Fails with [`Error::EmptyInput`] when the text is empty or whitespace.
/// When the document has a `<body>` element only its content is kept.
pub fn prepare_input(html: &str, options: &InputOptions) -> Result<String> {
    let html = html.trim();
    if html.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut text = html.to_string();
    if options.strip_think_tags && text.contains("<think>") {
        text = THINK_BLOCK.replace_all(&text, "").into_owned();
        debug!("removed think blocks");
    }
    if options.unescape_newlines && text.contains("\\n") {
        text = text.replace("\\n", "\n");
    }

    Ok(body_content(&text).unwrap_or(&text).to_string())
}

/// Content of the `<body>` element, if the text has one.
fn body_content(text: &str) -> Option<&str> {
    let open = BODY_OPEN.find(text)?;
    let rest = &text[open.end()..];
    let end = BODY_CLOSE
        .find_iter(rest)
        .last()
        .map_or(rest.len(), |m| m.start());
    Some(&rest[..end])
}
