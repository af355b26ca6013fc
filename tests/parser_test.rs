//! Integration tests for HTML tree parsing.

use htmldocx::parser::{BlockKind, InlineKind, ListKind, NodeKind};
use htmldocx::{Error, HtmlParser, Node, ParseOptions, UnsupportedTagPolicy};

fn parse(html: &str) -> Node {
    HtmlParser::new().parse(html).unwrap()
}

fn strict(html: &str) -> htmldocx::Result<Node> {
    HtmlParser::with_options(ParseOptions::new().strict()).parse(html)
}

fn kinds(node: &Node) -> Vec<NodeKind> {
    node.children.iter().map(|c| c.kind.clone()).collect()
}

#[test]
fn test_well_formed_document() {
    let root = parse(
        r#"<!DOCTYPE html><html><head><title>ignored</title><style>p{}</style></head>
        <body><h1 style="color:red">T</h1><p>a <b>b</b></p></body></html>"#,
    );
    assert_eq!(
        kinds(&root),
        vec![
            NodeKind::Block(BlockKind::Heading(1)),
            NodeKind::Block(BlockKind::Paragraph)
        ]
    );
    assert_eq!(root.children[0].style.as_deref(), Some("color:red"));
    assert_eq!(root.children[1].children[1].kind, NodeKind::Inline(InlineKind::Bold));
    assert!(!root.text_content().contains("ignored"));
}

#[test]
fn test_strict_accepts_well_formed_input() {
    let root = strict("<div><p>x</p><ul><li>a</li><li>b</li></ul></div>").unwrap();
    let div = &root.children[0];
    assert_eq!(
        kinds(div),
        vec![
            NodeKind::Block(BlockKind::Paragraph),
            NodeKind::List(ListKind::Unordered)
        ]
    );
}

#[test]
fn test_optional_end_tags_in_strict_mode() {
    let root = strict("<ul><li>a<li>b</ul><table><tr><td>1<td>2<tr><td>3</table><p>x<p>y").unwrap();
    assert_eq!(root.children[0].children.len(), 2);
    let table = &root.children[1];
    assert_eq!(table.children.len(), 2);
    assert_eq!(table.children[0].children.len(), 2);
    assert_eq!(root.children.len(), 4);
}

#[test]
fn test_strict_rejections() {
    let cases = [
        "<div>open",
        "<p>a</span></p>",
        "<div>a</p></div>",
        "text at root",
        "<span><div>x</div></span>",
        "<ul><p>x</p></ul>",
        "<table><p>x</p></table>",
        "<p><li>x</li></p>",
        "<p class=\"x\"",
    ];
    for html in cases {
        match strict(html) {
            Err(Error::MalformedMarkup { .. }) => {}
            other => panic!("expected MalformedMarkup for {:?}, got {:?}", html, other),
        }
    }
}

#[test]
fn test_lenient_coerces_same_inputs() {
    let cases = [
        "<div>open",
        "<p>a</span></p>",
        "<div>a</p></div>",
        "text at root",
        "<span><div>x</div></span>",
        "<ul><p>x</p></ul>",
        "<table><p>x</p></table>",
        "<p><li>x</li></p>",
        "<p class=\"x\"",
    ];
    for html in cases {
        let root = parse(html);
        for child in &root.children {
            assert!(child.kind.is_flow_container(), "{:?} left {:?} at root", html, child.kind);
        }
    }
}

#[test]
fn test_list_holds_only_items() {
    let root = parse("<ol>loose<li>a</li><b>bold</b></ol>");
    let list = &root.children[0];
    for item in &list.children {
        assert_eq!(item.kind, NodeKind::Block(BlockKind::ListItem));
    }
}

#[test]
fn test_table_holds_rows_of_cells() {
    let root = parse("<table><td>a</td>text<tr>more<td>b</td></tr></table>");
    let table = &root.children[0];
    for row in &table.children {
        assert_eq!(row.kind, NodeKind::Block(BlockKind::TableRow));
        for cell in &row.children {
            assert!(matches!(cell.kind, NodeKind::Block(BlockKind::TableCell { .. })));
        }
    }
}

#[test]
fn test_strip_policy_drops_subtree() {
    let options = ParseOptions::new().with_unsupported_tags(UnsupportedTagPolicy::Strip);
    let root = HtmlParser::with_options(options)
        .parse("<p>keep <code>drop <b>this</b></code> end</p>")
        .unwrap();
    assert_eq!(root.text_content(), "keep  end");
}

#[test]
fn test_entities_in_text_and_attributes() {
    let root = parse(r#"<p style="font-family:&quot;x&quot;">a &lt; b &#38; c&nbsp;d &bogus;</p>"#);
    let p = &root.children[0];
    assert_eq!(p.style.as_deref(), Some("font-family:\"x\""));
    assert_eq!(p.text_content(), "a < b & c\u{a0}d &bogus;");
}
