//! HTML parsing module.
//!
//! Turns the restricted HTML dialect into a typed [`Node`] tree. Parsing runs
//! in two passes: a stack-based tree builder that applies HTML's implied end
//! tags, then a coercion pass that enforces the nesting rules.

mod coerce;
mod entities;
mod html_parser;
mod options;
mod tokenizer;
mod tree;

pub use entities::decode_entities;
pub use html_parser::{parse_html, HtmlParser, MAX_DEPTH};
pub use options::{ErrorMode, ParseOptions, UnsupportedTagPolicy};
pub use tokenizer::{Attribute, Token, TokenKind, Tokenizer};
pub use tree::{classify_tag, BlockKind, InlineKind, ListKind, Node, NodeKind, TagClass};
