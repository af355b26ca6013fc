//! Document-level types.

use super::{Heading, ListBlock, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// Intermediate document: an ordered sequence of block-level content units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Document metadata (title, author)
    #[serde(default)]
    pub metadata: Metadata,

    /// Content units in document order
    pub units: Vec<ContentUnit>,
}

impl DocumentModel {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a content unit.
    pub fn push(&mut self, unit: ContentUnit) {
        self.units.push(unit);
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.units
            .iter()
            .map(ContentUnit::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Count the content of the document.
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats::default();
        self.units.iter().for_each(|u| stats.count(u));
        stats
    }
}

/// A block-level content unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentUnit {
    /// A paragraph of runs
    Paragraph(Paragraph),
    /// A heading of level 1-6
    Heading(Heading),
    /// An ordered or unordered list
    List(ListBlock),
    /// A table
    Table(Table),
}

impl ContentUnit {
    /// Get plain text content of the unit.
    pub fn plain_text(&self) -> String {
        match self {
            ContentUnit::Paragraph(p) => p.plain_text(),
            ContentUnit::Heading(h) => h.plain_text(),
            ContentUnit::List(l) => l.plain_text(),
            ContentUnit::Table(t) => t.plain_text(),
        }
    }

    /// The paragraph, if this unit is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            ContentUnit::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// The heading, if this unit is one.
    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            ContentUnit::Heading(h) => Some(h),
            _ => None,
        }
    }

    /// The list, if this unit is one.
    pub fn as_list(&self) -> Option<&ListBlock> {
        match self {
            ContentUnit::List(l) => Some(l),
            _ => None,
        }
    }

    /// The table, if this unit is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            ContentUnit::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Content counts, nested content included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    /// Paragraphs (headings excluded)
    pub paragraphs: usize,
    /// Headings
    pub headings: usize,
    /// Lists, nested lists included
    pub lists: usize,
    /// List items
    pub list_items: usize,
    /// Tables
    pub tables: usize,
    /// Text runs
    pub runs: usize,
    /// Characters of text
    pub characters: usize,
}

impl DocumentStats {
    fn count(&mut self, unit: &ContentUnit) {
        match unit {
            ContentUnit::Paragraph(p) => {
                self.paragraphs += 1;
                for run in p.runs() {
                    self.runs += 1;
                    self.characters += run.text.chars().count();
                }
            }
            ContentUnit::Heading(h) => {
                self.headings += 1;
                for run in h.runs() {
                    self.runs += 1;
                    self.characters += run.text.chars().count();
                }
            }
            ContentUnit::List(list) => {
                self.lists += 1;
                self.list_items += list.items.len();
                list.items
                    .iter()
                    .flat_map(|item| &item.content)
                    .for_each(|u| self.count(u));
            }
            ContentUnit::Table(table) => {
                self.tables += 1;
                table
                    .rows
                    .iter()
                    .flat_map(|row| &row.cells)
                    .flat_map(|cell| &cell.content)
                    .for_each(|u| self.count(u));
            }
        }
    }
}
