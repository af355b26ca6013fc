//! Document model types.
//!
//! This module defines the intermediate representation that bridges HTML
//! parsing and DOCX emission. Every style it carries is already resolved:
//! lengths are in points and inherited values are filled in.

mod document;
mod list;
mod paragraph;
mod table;

pub use document::{ContentUnit, DocumentModel, DocumentStats, Metadata};
pub use list::{ListBlock, ListItem, ListKind};
pub use paragraph::{Heading, InlineContent, Paragraph, TextRun};
pub use table::{Table, TableCell, TableRow};
