//! List types.

use super::ContentUnit;
use crate::style::StyleRecord;
use serde::{Deserialize, Serialize};

/// Kind of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Numbered list
    Ordered,
    /// Bulleted list
    Unordered,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    /// Ordered or unordered
    pub kind: ListKind,

    /// Resolved list style
    pub style: StyleRecord,

    /// Items in order
    pub items: Vec<ListItem>,
}

impl ListBlock {
    /// Create an empty list.
    pub fn new(kind: ListKind, style: StyleRecord) -> Self {
        Self {
            kind,
            style,
            items: Vec::new(),
        }
    }

    /// Check whether this is a numbered list.
    pub fn is_ordered(&self) -> bool {
        self.kind == ListKind::Ordered
    }

    /// Get plain text, one line per item.
    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(ListItem::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A list item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item content; nested lists appear here as list units
    pub content: Vec<ContentUnit>,
}

impl ListItem {
    /// Create an item from content units.
    pub fn new(content: Vec<ContentUnit>) -> Self {
        Self { content }
    }

    /// Get plain text content of the item.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(ContentUnit::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
