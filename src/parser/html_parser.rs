//! HTML tree construction.

use log::{debug, warn};

use crate::error::{Error, Result};

use super::coerce::coerce;
use super::options::{ParseOptions, UnsupportedTagPolicy};
use super::tokenizer::{Token, TokenKind, Tokenizer};
use super::tree::{classify_tag, has_optional_end_tag, BlockKind, InlineKind, Node, NodeKind, TagClass};

/// Deepest element nesting kept in the tree.
///
/// Elements opened below this depth are treated as transparent in lenient
/// mode (their content joins the innermost kept element) and rejected as
/// malformed markup in strict mode.
pub const MAX_DEPTH: usize = 128;

/// HTML parser producing a coerced [`Node`] tree.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a parser with default (lenient) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parser options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an HTML string into a node tree rooted at [`NodeKind::Root`].
    ///
    /// The returned tree satisfies the nesting rules: phrasing content sits
    /// inside a block, lists hold only items, tables only rows and rows only
    /// cells.
    pub fn parse(&self, html: &str) -> Result<Node> {
        let mut builder = TreeBuilder::new(&self.options);
        for token in Tokenizer::new(html, self.options.is_strict()) {
            builder.process(token?)?;
        }
        let root = builder.finish()?;
        coerce(root, &self.options)
    }
}

/// Parse HTML with the given options.
pub fn parse_html(html: &str, options: &ParseOptions) -> Result<Node> {
    HtmlParser::with_options(options.clone()).parse(html)
}

/// Stack-based tree builder with HTML's implied end tags.
struct TreeBuilder<'o> {
    options: &'o ParseOptions,
    /// Open elements; index 0 is the root
    stack: Vec<Node>,
    /// Name and nesting depth of a stripped element being skipped
    skipping: Option<(String, usize)>,
    /// Names of open elements dropped for exceeding [`MAX_DEPTH`]
    overflow: Vec<String>,
}

impl<'o> TreeBuilder<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            stack: vec![Node::root()],
            skipping: None,
            overflow: Vec::new(),
        }
    }

    fn process(&mut self, token: Token) -> Result<()> {
        if self.skip(&token) {
            return Ok(());
        }

        let offset = token.offset;
        match token.kind {
            TokenKind::Text(text) => {
                if !text.is_empty() {
                    self.append(Node::text(text, offset));
                }
            }
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => match classify_tag(&name) {
                TagClass::Element(kind) => {
                    self.close_implied(&kind, offset)?;
                    let void = self_closing || kind == NodeKind::Inline(InlineKind::LineBreak);
                    if !void && self.stack.len() > MAX_DEPTH {
                        return self.too_deep(name, offset);
                    }

                    let mut node = Node::new(kind, offset);
                    node.style = attributes.into_iter().find(|a| a.name == "style").map(|a| a.value);

                    if void {
                        self.append(node);
                    } else {
                        self.stack.push(node);
                    }
                }
                TagClass::Structural | TagClass::Void => {}
                TagClass::Unsupported => match self.options.unsupported_tags {
                    UnsupportedTagPolicy::Transparent => {
                        debug!("treating <{}> at byte {} as transparent", name, offset);
                    }
                    UnsupportedTagPolicy::Strip => {
                        debug!("stripping <{}> at byte {}", name, offset);
                        if !self_closing {
                            self.skipping = Some((name, 1));
                        }
                    }
                },
            },
            TokenKind::EndTag { name } => match classify_tag(&name) {
                TagClass::Element(NodeKind::Inline(InlineKind::LineBreak)) => {}
                TagClass::Element(_) => match self.overflow.iter().rposition(|n| *n == name) {
                    Some(index) => self.overflow.truncate(index),
                    None => self.close_element(&name, offset)?,
                },
                _ => {}
            },
        }
        Ok(())
    }

    /// Handle an element opened below [`MAX_DEPTH`].
    fn too_deep(&mut self, name: String, offset: usize) -> Result<()> {
        if self.options.is_strict() {
            return Err(Error::malformed(
                offset,
                format!("<{}> nested deeper than {} elements", name, MAX_DEPTH),
            ));
        }
        debug!("treating <{}> at byte {} as transparent, nesting too deep", name, offset);
        self.overflow.push(name);
        Ok(())
    }

    /// Track a stripped subtree. Returns `true` while the token is inside it.
    fn skip(&mut self, token: &Token) -> bool {
        let Some((skipped, depth)) = self.skipping.as_mut() else {
            return false;
        };
        match &token.kind {
            TokenKind::StartTag {
                name,
                self_closing: false,
                ..
            } if *name == *skipped => *depth += 1,
            TokenKind::EndTag { name } if *name == *skipped => {
                *depth -= 1;
                if *depth == 0 {
                    self.skipping = None;
                }
            }
            _ => {}
        }
        true
    }

    fn append(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    /// Close elements whose end tag is implied by an opening `kind` tag.
    fn close_implied(&mut self, kind: &NodeKind, offset: usize) -> Result<()> {
        let found = match kind {
            NodeKind::Block(BlockKind::Paragraph | BlockKind::Div | BlockKind::Heading(_) | BlockKind::Table)
            | NodeKind::List(_) => self.find_open(
                |k| *k == NodeKind::Block(BlockKind::Paragraph),
                |k| !matches!(k, NodeKind::Inline(_)),
            ),
            NodeKind::Block(BlockKind::ListItem) => self.find_open(
                |k| *k == NodeKind::Block(BlockKind::ListItem),
                |k| {
                    matches!(
                        k,
                        NodeKind::Root
                            | NodeKind::List(_)
                            | NodeKind::Block(BlockKind::Table | BlockKind::TableCell { .. })
                    )
                },
            ),
            NodeKind::Block(BlockKind::TableRow) => self.find_open(
                |k| *k == NodeKind::Block(BlockKind::TableRow),
                |k| matches!(k, NodeKind::Root | NodeKind::Block(BlockKind::Table)),
            ),
            NodeKind::Block(BlockKind::TableCell { .. }) => self.find_open(
                |k| matches!(k, NodeKind::Block(BlockKind::TableCell { .. })),
                |k| {
                    matches!(
                        k,
                        NodeKind::Root | NodeKind::Block(BlockKind::Table | BlockKind::TableRow)
                    )
                },
            ),
            _ => None,
        };

        match found {
            Some(index) => {
                debug!("<{}> at byte {} closes open <{}>", kind.tag_name(), offset, self.stack[index].kind.tag_name());
                self.pop_to(index, kind.tag_name())
            }
            None => Ok(()),
        }
    }

    /// Search open elements from the innermost outwards for one matching
    /// `target`, without crossing an element matching `stop`.
    fn find_open(&self, target: impl Fn(&NodeKind) -> bool, stop: impl Fn(&NodeKind) -> bool) -> Option<usize> {
        for (index, node) in self.stack.iter().enumerate().skip(1).rev() {
            if target(&node.kind) {
                return Some(index);
            }
            if stop(&node.kind) {
                return None;
            }
        }
        None
    }

    fn close_element(&mut self, name: &str, offset: usize) -> Result<()> {
        let found = self
            .stack
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find(|(_, node)| node.kind.tag_name() == name)
            .map(|(index, _)| index);

        match found {
            Some(index) => self.pop_to(index, &format!("/{}", name)),
            None if self.options.is_strict() => Err(Error::malformed(offset, format!("stray </{}>", name))),
            None => {
                warn!("ignoring stray </{}> at byte {}", name, offset);
                Ok(())
            }
        }
    }

    /// Pop open elements down to and including `index`, attaching each to
    /// its parent. Elements above `index` that need an explicit end tag are
    /// reported as unclosed.
    fn pop_to(&mut self, index: usize, closed_by: &str) -> Result<()> {
        while self.stack.len() > index {
            let Some(node) = self.stack.pop() else {
                break;
            };
            if self.stack.len() > index && !has_optional_end_tag(&node.kind) {
                self.unclosed(&node, &format!("before <{}>", closed_by))?;
            }
            self.append(node);
        }
        Ok(())
    }

    fn unclosed(&self, node: &Node, context: &str) -> Result<()> {
        let message = format!("unclosed <{}> {}", node.kind.tag_name(), context);
        if self.options.is_strict() {
            Err(Error::malformed(node.offset, message))
        } else {
            warn!("{} (byte {}), closing it", message, node.offset);
            Ok(())
        }
    }

    fn finish(mut self) -> Result<Node> {
        while self.stack.len() > 1 {
            let Some(node) = self.stack.pop() else {
                break;
            };
            if !has_optional_end_tag(&node.kind) {
                self.unclosed(&node, "at end of input")?;
            }
            self.append(node);
        }
        self.stack.pop().ok_or_else(|| Error::malformed(0, "empty document"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tree::ListKind;

    fn lenient(html: &str) -> Node {
        HtmlParser::new().parse(html).unwrap()
    }

    fn strict(html: &str) -> Result<Node> {
        HtmlParser::with_options(ParseOptions::new().strict()).parse(html)
    }

    fn kinds(node: &Node) -> Vec<NodeKind> {
        node.children.iter().map(|c| c.kind.clone()).collect()
    }

    #[test]
    fn test_parse_simple_paragraph() {
        let root = lenient(r#"<p style="color:red">Hello <b>world</b></p>"#);
        assert_eq!(root.kind, NodeKind::Root);
        assert_eq!(root.children.len(), 1);

        let p = &root.children[0];
        assert_eq!(p.kind, NodeKind::Block(BlockKind::Paragraph));
        assert_eq!(p.style.as_deref(), Some("color:red"));
        assert_eq!(
            kinds(p),
            vec![
                NodeKind::Text("Hello ".to_string()),
                NodeKind::Inline(InlineKind::Bold)
            ]
        );
        assert_eq!(p.text_content(), "Hello world");
    }

    fn depth(node: &Node) -> usize {
        1 + node.children.iter().map(depth).max().unwrap_or(0)
    }

    #[test]
    fn test_deep_nesting_capped_in_lenient_mode() {
        let html = format!("{}x{}<p>after</p>", "<div>".repeat(10_000), "</div>".repeat(10_000));
        let root = lenient(&html);
        // root + MAX_DEPTH divs + text
        assert_eq!(depth(&root), MAX_DEPTH + 2);
        assert_eq!(root.text_content(), "xafter");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[1].kind, NodeKind::Block(BlockKind::Paragraph));
    }

    #[test]
    fn test_deep_nesting_rejected_in_strict_mode() {
        let html = format!("{}x{}", "<div>".repeat(10_000), "</div>".repeat(10_000));
        let err = strict(&html).unwrap_err();
        assert!(err.is_malformed_markup());

        let html = format!("{}x{}", "<div>".repeat(MAX_DEPTH), "</div>".repeat(MAX_DEPTH));
        assert!(strict(&html).is_ok());
    }

    #[test]
    fn test_end_tags_past_depth_limit_stay_balanced() {
        let html = format!(
            "{}<span>a<b>b</b></span>c{}<p>d</p>",
            "<div>".repeat(MAX_DEPTH),
            "</div>".repeat(MAX_DEPTH)
        );
        let root = lenient(&html);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.text_content(), "abcd");
        assert!(strict(&html).is_err());
    }

    #[test]
    fn test_br_is_void() {
        let root = lenient("<p>line1<br/>line2<br>line3</p>");
        let p = &root.children[0];
        assert_eq!(p.children.len(), 5);
        assert_eq!(p.children[1].kind, NodeKind::Inline(InlineKind::LineBreak));
        assert!(p.children[1].children.is_empty());
        assert_eq!(p.children[3].kind, NodeKind::Inline(InlineKind::LineBreak));
    }

    #[test]
    fn test_implied_paragraph_end() {
        let root = lenient("<p>one<p>two<div>three</div>");
        assert_eq!(
            kinds(&root),
            vec![
                NodeKind::Block(BlockKind::Paragraph),
                NodeKind::Block(BlockKind::Paragraph),
                NodeKind::Block(BlockKind::Div)
            ]
        );
        assert!(strict("<p>one<p>two<div>three</div>").is_ok());
    }

    #[test]
    fn test_implied_list_item_end() {
        let root = lenient("<ul><li>a<li>b<li>c</ul>");
        let list = &root.children[0];
        assert_eq!(list.kind, NodeKind::List(ListKind::Unordered));
        assert_eq!(list.children.len(), 3);
        assert_eq!(list.children[2].text_content(), "c");
    }

    #[test]
    fn test_implied_table_ends() {
        let root = strict("<table><tr><th>A<th>B<tr><td>1<td>2</table>").unwrap();
        let table = &root.children[0];
        assert_eq!(table.children.len(), 2);
        assert!(table.children.iter().all(|row| row.children.len() == 2));
        assert_eq!(
            table.children[0].children[0].kind,
            NodeKind::Block(BlockKind::TableCell { header: true })
        );
    }

    #[test]
    fn test_table_sections_transparent() {
        let root = lenient("<table><thead><tr><th>H</th></tr></thead><tbody><tr><td>x</td></tr></tbody></table>");
        let table = &root.children[0];
        assert_eq!(table.children.len(), 2);
    }

    #[test]
    fn test_unsupported_tags_transparent() {
        let root = lenient("<section><article><p>kept</p></article></section>");
        assert_eq!(kinds(&root), vec![NodeKind::Block(BlockKind::Paragraph)]);
        assert_eq!(root.children[0].text_content(), "kept");
    }

    #[test]
    fn test_unsupported_tags_strip() {
        let options = ParseOptions::new().with_unsupported_tags(UnsupportedTagPolicy::Strip);
        let root = HtmlParser::with_options(options)
            .parse("<p>a</p><nav><nav><p>menu</p></nav><p>more</p></nav><p>b</p>")
            .unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.text_content(), "ab");
    }

    #[test]
    fn test_style_and_script_ignored() {
        let root = lenient("<style>p{color:red}</style><script>var x = '<p>';</script><p>x</p>");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.text_content(), "x");
    }

    #[test]
    fn test_unterminated_div() {
        let err = strict("<div>hello").unwrap_err();
        assert!(err.is_malformed_markup());
        assert!(err.to_string().contains("<div>"));

        let root = lenient("<div>hello");
        assert_eq!(root.children[0].kind, NodeKind::Block(BlockKind::Div));
        assert_eq!(root.children[0].text_content(), "hello");
    }

    #[test]
    fn test_mismatched_end_tag() {
        assert!(strict("<p><b>bold</p>").is_err());
        let root = lenient("<p><b>bold</p>after");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].text_content(), "bold");
    }

    #[test]
    fn test_stray_end_tag() {
        assert!(strict("<p>x</p></div>").is_err());
        assert_eq!(lenient("<p>x</p></div>").children.len(), 1);
    }

    #[test]
    fn test_self_closing_element() {
        let root = lenient("<div/><p>x</p>");
        assert_eq!(root.children.len(), 2);
        assert!(root.children[0].children.is_empty());
    }
}
