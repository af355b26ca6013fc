//! Structural coercion of the raw node tree.
//!
//! Enforces the nesting rules the model builder relies on. In lenient mode
//! offending content is wrapped in implicit containers (or demoted to a
//! plain `div` when it is a list item, row or cell outside its container);
//! in strict mode the first violation is reported as malformed markup.

use log::debug;

use crate::error::{Error, Result};

use super::options::ParseOptions;
use super::tree::{BlockKind, Node, NodeKind};

/// Coerce a raw tree rooted at [`NodeKind::Root`].
pub fn coerce(root: Node, options: &ParseOptions) -> Result<Node> {
    Coercer {
        strict: options.is_strict(),
    }
    .node(root)
}

struct Coercer {
    strict: bool,
}

impl Coercer {
    fn violation(&self, node: &Node, message: String) -> Result<()> {
        if self.strict {
            Err(Error::malformed(node.offset, message))
        } else {
            debug!("coercing: {} (byte {})", message, node.offset);
            Ok(())
        }
    }

    fn node(&self, mut node: Node) -> Result<Node> {
        let children = std::mem::take(&mut node.children);
        let kind = node.kind.clone();

        let children = match &kind {
            NodeKind::Root => self.wrap_phrasing(children)?,
            NodeKind::List(_) => self.list_items(&kind, children)?,
            NodeKind::Block(BlockKind::Table) => self.table_rows(children)?,
            NodeKind::Block(BlockKind::TableRow) => self.row_cells(children)?,
            NodeKind::Inline(_) => {
                for child in children.iter().filter(|c| c.kind.is_flow_container()) {
                    self.violation(
                        child,
                        format!("block <{}> inside inline <{}>", child.kind.tag_name(), kind.tag_name()),
                    )?;
                }
                children
            }
            _ => children,
        };

        node.children = children
            .into_iter()
            .map(|child| self.place(&kind, child))
            .collect::<Result<_>>()?;
        Ok(node)
    }

    /// Demote list items, rows and cells found outside their container,
    /// then coerce the child itself.
    fn place(&self, parent: &NodeKind, mut child: Node) -> Result<Node> {
        let container = match child.kind {
            NodeKind::Block(BlockKind::ListItem) if !matches!(parent, NodeKind::List(_)) => Some("list"),
            NodeKind::Block(BlockKind::TableRow) if *parent != NodeKind::Block(BlockKind::Table) => Some("table"),
            NodeKind::Block(BlockKind::TableCell { .. }) if *parent != NodeKind::Block(BlockKind::TableRow) => {
                Some("table row")
            }
            _ => None,
        };

        if let Some(container) = container {
            self.violation(
                &child,
                format!("<{}> outside a {}", child.kind.tag_name(), container),
            )?;
            child.kind = NodeKind::Block(BlockKind::Div);
        }
        self.node(child)
    }

    /// Wrap runs of phrasing content at the root in implicit paragraphs.
    fn wrap_phrasing(&self, children: Vec<Node>) -> Result<Vec<Node>> {
        let mut out = Vec::with_capacity(children.len());
        let mut run: Vec<Node> = Vec::new();

        for child in children {
            if child.kind.is_phrasing() {
                run.push(child);
            } else {
                self.flush_phrasing(&mut run, &mut out)?;
                out.push(child);
            }
        }
        self.flush_phrasing(&mut run, &mut out)?;
        Ok(out)
    }

    fn flush_phrasing(&self, run: &mut Vec<Node>, out: &mut Vec<Node>) -> Result<()> {
        if run.is_empty() {
            return Ok(());
        }
        let nodes = std::mem::take(run);
        let Some(first) = nodes.iter().find(|n| !n.is_blank_text()) else {
            return Ok(());
        };

        self.violation(
            first,
            format!("inline content <{}> outside a block", first.kind.tag_name()),
        )?;
        let paragraph = Node::new(NodeKind::Block(BlockKind::Paragraph), first.offset).with_children(nodes);
        out.push(paragraph);
        Ok(())
    }

    /// Keep only list items inside a list.
    ///
    /// A list nested directly in a list joins the preceding item; any other
    /// content goes into an implicit item.
    fn list_items(&self, list: &NodeKind, children: Vec<Node>) -> Result<Vec<Node>> {
        let mut out: Vec<Node> = Vec::new();
        let mut implicit_open = false;

        for child in children {
            if child.is_blank_text() {
                continue;
            }
            if child.kind == NodeKind::Block(BlockKind::ListItem) {
                out.push(child);
                implicit_open = false;
                continue;
            }

            self.violation(
                &child,
                format!("<{}> directly inside <{}>", child.kind.tag_name(), list.tag_name()),
            )?;
            let joins_previous = implicit_open || matches!(child.kind, NodeKind::List(_));
            match out.last_mut() {
                Some(item) if joins_previous => item.children.push(child),
                _ => {
                    let item = Node::new(NodeKind::Block(BlockKind::ListItem), child.offset).with_children(vec![child]);
                    out.push(item);
                    implicit_open = true;
                }
            }
        }
        Ok(out)
    }

    /// Keep only rows inside a table. Loose cells are gathered into an
    /// implicit row, other content into an implicit cell of that row.
    fn table_rows(&self, children: Vec<Node>) -> Result<Vec<Node>> {
        let mut out: Vec<Node> = Vec::new();
        let mut implicit: Option<RowBuilder> = None;

        for child in children {
            if child.is_blank_text() {
                continue;
            }
            match child.kind {
                NodeKind::Block(BlockKind::TableRow) => {
                    if let Some(row) = implicit.take() {
                        out.push(row.row);
                    }
                    out.push(child);
                    continue;
                }
                NodeKind::Block(BlockKind::TableCell { .. }) => {
                    self.violation(&child, format!("<{}> outside a table row", child.kind.tag_name()))?;
                }
                _ => {
                    self.violation(
                        &child,
                        format!("<{}> directly inside <table>", child.kind.tag_name()),
                    )?;
                }
            }

            let offset = child.offset;
            implicit.get_or_insert_with(|| RowBuilder::new(offset)).push(child);
        }
        if let Some(row) = implicit {
            out.push(row.row);
        }
        Ok(out)
    }

    /// Keep only cells inside a row; other content goes into an implicit cell.
    fn row_cells(&self, children: Vec<Node>) -> Result<Vec<Node>> {
        let mut row = RowBuilder::new(0);
        for child in children {
            if child.is_blank_text() {
                continue;
            }
            if !matches!(child.kind, NodeKind::Block(BlockKind::TableCell { .. })) {
                self.violation(&child, format!("<{}> directly inside <tr>", child.kind.tag_name()))?;
            }
            row.push(child);
        }
        Ok(row.row.children)
    }
}

/// Row under construction during coercion.
struct RowBuilder {
    row: Node,
    /// The last cell was created here and still accepts loose content
    implicit_cell: bool,
}

impl RowBuilder {
    fn new(offset: usize) -> Self {
        Self {
            row: Node::new(NodeKind::Block(BlockKind::TableRow), offset),
            implicit_cell: false,
        }
    }

    fn push(&mut self, child: Node) {
        if matches!(child.kind, NodeKind::Block(BlockKind::TableCell { .. })) {
            self.row.children.push(child);
            self.implicit_cell = false;
            return;
        }

        match self.row.children.last_mut() {
            Some(cell) if self.implicit_cell => cell.children.push(child),
            _ => {
                let cell = Node::new(NodeKind::Block(BlockKind::TableCell { header: false }), child.offset)
                    .with_children(vec![child]);
                self.row.children.push(cell);
                self.implicit_cell = true;
            }
        }
    }
}
