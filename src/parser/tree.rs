//! Node tree produced by the HTML parser.

/// Block-level element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `<div>`
    Div,
    /// `<p>`
    Paragraph,
    /// `<h1>` to `<h6>`
    Heading(u8),
    /// `<li>`
    ListItem,
    /// `<table>`
    Table,
    /// `<tr>`
    TableRow,
    /// `<td>` or `<th>`
    TableCell {
        /// `<th>`
        header: bool,
    },
}

/// Inline element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    /// `<span>`
    Span,
    /// `<b>`
    Bold,
    /// `<strong>`
    Strong,
    /// `<i>`
    Italic,
    /// `<u>`
    Underline,
    /// `<em>`
    Emphasis,
    /// `<small>`
    Small,
    /// `<mark>`
    Mark,
    /// `<br>`
    LineBreak,
}

/// List kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `<ol>`
    Ordered,
    /// `<ul>`
    Unordered,
}

/// Node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Root,
    /// Block element
    Block(BlockKind),
    /// Inline element
    Inline(InlineKind),
    /// List container
    List(ListKind),
    /// Character data
    Text(String),
}

impl NodeKind {
    /// Check whether nodes of this kind may only sit inside a block.
    pub fn is_phrasing(&self) -> bool {
        matches!(self, NodeKind::Inline(_) | NodeKind::Text(_))
    }

    /// Check whether this is a block or list element.
    pub fn is_flow_container(&self) -> bool {
        matches!(self, NodeKind::Block(_) | NodeKind::List(_))
    }

    /// Tag name used in diagnostics.
    pub fn tag_name(&self) -> &'static str {
        match self {
            NodeKind::Root => "#root",
            NodeKind::Text(_) => "#text",
            NodeKind::Block(block) => match block {
                BlockKind::Div => "div",
                BlockKind::Paragraph => "p",
                BlockKind::Heading(1) => "h1",
                BlockKind::Heading(2) => "h2",
                BlockKind::Heading(3) => "h3",
                BlockKind::Heading(4) => "h4",
                BlockKind::Heading(5) => "h5",
                BlockKind::Heading(_) => "h6",
                BlockKind::ListItem => "li",
                BlockKind::Table => "table",
                BlockKind::TableRow => "tr",
                BlockKind::TableCell { header: false } => "td",
                BlockKind::TableCell { header: true } => "th",
            },
            NodeKind::Inline(inline) => match inline {
                InlineKind::Span => "span",
                InlineKind::Bold => "b",
                InlineKind::Strong => "strong",
                InlineKind::Italic => "i",
                InlineKind::Underline => "u",
                InlineKind::Emphasis => "em",
                InlineKind::Small => "small",
                InlineKind::Mark => "mark",
                InlineKind::LineBreak => "br",
            },
            NodeKind::List(ListKind::Ordered) => "ol",
            NodeKind::List(ListKind::Unordered) => "ul",
        }
    }
}

/// A parsed HTML node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node variant
    pub kind: NodeKind,

    /// Raw `style` attribute, kept verbatim
    pub style: Option<String>,

    /// Child nodes in document order (empty for text and `<br>`)
    pub children: Vec<Node>,

    /// Byte offset of the start tag (or text) in the input
    pub offset: usize,
}

impl Node {
    /// Create an element node without children.
    pub fn new(kind: NodeKind, offset: usize) -> Self {
        Self {
            kind,
            style: None,
            children: Vec::new(),
            offset,
        }
    }

    /// Create the document root.
    pub fn root() -> Self {
        Self::new(NodeKind::Root, 0)
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>, offset: usize) -> Self {
        Self::new(NodeKind::Text(text.into()), offset)
    }

    /// Set the raw style attribute.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Check whether this is a text node holding only ASCII whitespace.
    pub fn is_blank_text(&self) -> bool {
        match &self.kind {
            NodeKind::Text(text) => text.chars().all(|c| c.is_ascii_whitespace()),
            _ => false,
        }
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) => out.push_str(text),
            _ => self.children.iter().for_each(|c| c.collect_text(out)),
        }
    }
}

/// How a tag name is treated by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagClass {
    /// A supported element
    Element(NodeKind),
    /// Document scaffolding and table sections, always transparent
    Structural,
    /// A void element other than `<br>`, dropped
    Void,
    /// Anything else, handled per [`UnsupportedTagPolicy`](super::UnsupportedTagPolicy)
    Unsupported,
}

/// Map a lowercased tag name to its class.
pub fn classify_tag(name: &str) -> TagClass {
    let kind = match name {
        "p" => NodeKind::Block(BlockKind::Paragraph),
        "div" => NodeKind::Block(BlockKind::Div),
        "h1" => NodeKind::Block(BlockKind::Heading(1)),
        "h2" => NodeKind::Block(BlockKind::Heading(2)),
        "h3" => NodeKind::Block(BlockKind::Heading(3)),
        "h4" => NodeKind::Block(BlockKind::Heading(4)),
        "h5" => NodeKind::Block(BlockKind::Heading(5)),
        "h6" => NodeKind::Block(BlockKind::Heading(6)),
        "li" => NodeKind::Block(BlockKind::ListItem),
        "table" => NodeKind::Block(BlockKind::Table),
        "tr" => NodeKind::Block(BlockKind::TableRow),
        "td" => NodeKind::Block(BlockKind::TableCell { header: false }),
        "th" => NodeKind::Block(BlockKind::TableCell { header: true }),
        "ul" => NodeKind::List(ListKind::Unordered),
        "ol" => NodeKind::List(ListKind::Ordered),
        "span" => NodeKind::Inline(InlineKind::Span),
        "b" => NodeKind::Inline(InlineKind::Bold),
        "strong" => NodeKind::Inline(InlineKind::Strong),
        "i" => NodeKind::Inline(InlineKind::Italic),
        "u" => NodeKind::Inline(InlineKind::Underline),
        "em" => NodeKind::Inline(InlineKind::Emphasis),
        "small" => NodeKind::Inline(InlineKind::Small),
        "mark" => NodeKind::Inline(InlineKind::Mark),
        "br" => NodeKind::Inline(InlineKind::LineBreak),
        "html" | "head" | "body" | "thead" | "tbody" | "tfoot" => return TagClass::Structural,
        "area" | "base" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "param"
        | "source" | "track" | "wbr" => return TagClass::Void,
        _ => return TagClass::Unsupported,
    };
    TagClass::Element(kind)
}

/// Elements whose end tag may be omitted.
pub fn has_optional_end_tag(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Block(
            BlockKind::Paragraph | BlockKind::ListItem | BlockKind::TableRow | BlockKind::TableCell { .. }
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_supported_tags() {
        assert_eq!(
            classify_tag("h3"),
            TagClass::Element(NodeKind::Block(BlockKind::Heading(3)))
        );
        assert_eq!(
            classify_tag("th"),
            TagClass::Element(NodeKind::Block(BlockKind::TableCell { header: true }))
        );
        assert_eq!(classify_tag("ol"), TagClass::Element(NodeKind::List(ListKind::Ordered)));
        assert_eq!(classify_tag("tbody"), TagClass::Structural);
        assert_eq!(classify_tag("img"), TagClass::Void);
        assert_eq!(classify_tag("section"), TagClass::Unsupported);
    }

    #[test]
    fn test_tag_names_round_trip() {
        for name in [
            "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "table", "tr", "td", "th", "ul",
            "ol", "span", "b", "strong", "i", "u", "em", "small", "mark", "br",
        ] {
            match classify_tag(name) {
                TagClass::Element(kind) => assert_eq!(kind.tag_name(), name),
                other => panic!("{name} classified as {other:?}"),
            }
        }
    }

    #[test]
    fn test_text_content() {
        let node = Node::new(NodeKind::Block(BlockKind::Paragraph), 0).with_children(vec![
            Node::text("a ", 3),
            Node::new(NodeKind::Inline(InlineKind::Bold), 5).with_children(vec![Node::text("b", 8)]),
        ]);
        assert_eq!(node.text_content(), "a b");
        assert!(Node::text(" \n", 0).is_blank_text());
        assert!(!Node::text("\u{a0}", 0).is_blank_text());
    }
}
