//! Document model construction.
//!
//! A single recursive descent over the coerced node tree. Each element's
//! style attribute is parsed, layered over the element's built-in defaults
//! and cascaded from its parent, so every unit and run in the resulting
//! [`DocumentModel`] carries a fully resolved [`StyleRecord`].

mod options;
mod runs;

pub use options::{BuildOptions, ShortRowPolicy, DEFAULT_FONT_SIZE};
pub use runs::RunCollector;

use log::debug;

use crate::error::{Error, Result};
use crate::model::{
    ContentUnit, DocumentModel, Heading, ListBlock, ListItem, ListKind as ModelListKind, Paragraph, Table,
    TableCell, TableRow,
};
use crate::parser::{BlockKind, InlineKind, ListKind, Node, NodeKind};
use crate::style::{parse_style, FontStyle, FontWeight, Length, Margin, Rgb, StyleRecord, TextDecoration};

/// Space before and after `p`/`div` paragraphs, in points.
const PARAGRAPH_SPACING: f32 = 12.0;

/// Space before and after list item paragraphs, in points.
const LIST_ITEM_SPACING: f32 = 4.0;

/// Highlight color of `<mark>`.
const MARK_BACKGROUND: Rgb = Rgb::new(255, 255, 0);

/// Builds a [`DocumentModel`] from a parsed node tree.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    options: BuildOptions,
}

impl ModelBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom options.
    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Builder options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the model for a tree rooted at [`NodeKind::Root`].
    pub fn build(&self, root: &Node) -> Result<DocumentModel> {
        let root_style = StyleRecord::root(self.options.default_font_size);
        let template = Template::paragraph(root_style.cascade(&paragraph_defaults(), self.root_font_size()));

        let units = self.flow(&root.children, &root_style, template)?;
        debug!("built {} top-level content units", units.len());

        Ok(DocumentModel {
            units,
            ..DocumentModel::default()
        })
    }

    fn root_font_size(&self) -> f32 {
        self.options.default_font_size
    }

    /// Resolve `node`'s style: declared values over `defaults`, cascaded from
    /// the resolved `parent`.
    fn resolve(&self, node: &Node, parent: &StyleRecord, defaults: &StyleRecord) -> StyleRecord {
        let declared = node
            .style
            .as_deref()
            .map(|s| parse_style(s, self.options.measurement_unit))
            .unwrap_or_default();
        parent.cascade(&declared.or(defaults), self.root_font_size())
    }

    /// Convert flow content. Phrasing children accumulate into paragraphs
    /// shaped by `template`; block children become units of their own.
    fn flow(&self, nodes: &[Node], style: &StyleRecord, template: Template) -> Result<Vec<ContentUnit>> {
        let mut flow = Flow::new(template);
        self.flow_nodes(nodes, style, &mut flow)?;
        Ok(flow.finish())
    }

    fn flow_nodes(&self, nodes: &[Node], style: &StyleRecord, flow: &mut Flow) -> Result<()> {
        for node in nodes {
            match &node.kind {
                NodeKind::Text(text) => flow.runs.push_text(text, style),
                NodeKind::Inline(InlineKind::LineBreak) => flow.runs.push_break(),
                NodeKind::Inline(kind) => {
                    let resolved = self.resolve(node, style, &inline_defaults(*kind, style));
                    self.flow_nodes(&node.children, &resolved, flow)?;
                }
                NodeKind::Block(_) | NodeKind::List(_) => {
                    flow.flush();
                    let units = self.block(node, style)?;
                    flow.units.extend(units);
                }
                NodeKind::Root => self.flow_nodes(&node.children, style, flow)?,
            }
        }
        Ok(())
    }

    fn block(&self, node: &Node, parent: &StyleRecord) -> Result<Vec<ContentUnit>> {
        let units = match node.kind {
            NodeKind::List(kind) => vec![ContentUnit::List(self.list(node, parent, kind)?)],
            NodeKind::Block(BlockKind::Table) => self
                .table(node, parent)?
                .map(ContentUnit::Table)
                .into_iter()
                .collect(),
            NodeKind::Block(BlockKind::Heading(level)) => {
                let style = self.resolve(node, parent, &heading_defaults(level));
                let units = self.flow(&node.children, &style, Template::heading(level, style.clone()))?;
                if units.is_empty() {
                    vec![ContentUnit::Heading(Heading::new(level, style))]
                } else {
                    units
                }
            }
            _ => {
                let style = self.resolve(node, parent, &paragraph_defaults());
                let units = self.flow(&node.children, &style, Template::paragraph(style.clone()))?;
                if units.is_empty() {
                    vec![ContentUnit::Paragraph(Paragraph::new(style))]
                } else {
                    units
                }
            }
        };
        Ok(units)
    }

    fn list(&self, node: &Node, parent: &StyleRecord, kind: ListKind) -> Result<ListBlock> {
        let style = self.resolve(node, parent, &StyleRecord::default());
        let kind = match kind {
            ListKind::Ordered => ModelListKind::Ordered,
            ListKind::Unordered => ModelListKind::Unordered,
        };
        let mut list = ListBlock::new(kind, style);

        for item in &node.children {
            let item_style = self.resolve(item, &list.style, &block_spacing(LIST_ITEM_SPACING));
            let content = self.flow(&item.children, &item_style, Template::paragraph(item_style.clone()))?;
            list.items.push(ListItem::new(content));
        }
        Ok(list)
    }

    /// Build a table, padding or rejecting short rows. Tables without any
    /// cell produce nothing.
    fn table(&self, node: &Node, parent: &StyleRecord) -> Result<Option<Table>> {
        let style = self.resolve(node, parent, &StyleRecord::default());
        let mut table = Table::new(style);

        for row_node in &node.children {
            let row_style = self.resolve(row_node, &table.style, &StyleRecord::default());
            let mut cells = Vec::with_capacity(row_node.children.len());

            for cell_node in &row_node.children {
                let header = matches!(cell_node.kind, NodeKind::Block(BlockKind::TableCell { header: true }));
                let cell_style = self.resolve(cell_node, &row_style, &cell_defaults(header));
                let content = self.flow(&cell_node.children, &cell_style, Template::paragraph(cell_style.clone()))?;
                cells.push(TableCell { content, header });
            }
            table.add_row(TableRow::new(cells));
        }

        let columns = table.column_count();
        if columns == 0 {
            debug!("skipping table without cells at byte {}", node.offset);
            return Ok(None);
        }

        for (index, row) in table.rows.iter_mut().enumerate() {
            let cells = row.cells.len();
            if cells == columns {
                continue;
            }
            match self.options.short_rows {
                ShortRowPolicy::Pad => {
                    debug!("padding table row {} from {} to {} cells", index, cells, columns);
                    row.cells.resize_with(columns, TableCell::empty);
                }
                ShortRowPolicy::Reject => {
                    return Err(Error::RaggedTable {
                        row: index,
                        cells,
                        columns,
                    });
                }
            }
        }
        Ok(Some(table))
    }
}

/// Shape of the paragraphs created from loose phrasing content.
#[derive(Debug, Clone)]
struct Template {
    heading_level: Option<u8>,
    style: StyleRecord,
}

impl Template {
    fn paragraph(style: StyleRecord) -> Self {
        Self {
            heading_level: None,
            style,
        }
    }

    fn heading(level: u8, style: StyleRecord) -> Self {
        Self {
            heading_level: Some(level),
            style,
        }
    }
}

/// Units produced by one flow container.
struct Flow {
    template: Template,
    runs: RunCollector,
    units: Vec<ContentUnit>,
}

impl Flow {
    fn new(template: Template) -> Self {
        Self {
            template,
            runs: RunCollector::new(),
            units: Vec::new(),
        }
    }

    fn flush(&mut self) {
        let content = self.runs.take();
        if content.is_empty() {
            return;
        }
        let style = self.template.style.clone();
        let unit = match self.template.heading_level {
            Some(level) => ContentUnit::Heading(Heading {
                content,
                ..Heading::new(level, style)
            }),
            None => ContentUnit::Paragraph(Paragraph { style, content }),
        };
        self.units.push(unit);
    }

    fn finish(mut self) -> Vec<ContentUnit> {
        self.flush();
        self.units
    }
}

fn block_spacing(points: f32) -> StyleRecord {
    StyleRecord {
        margin: Margin {
            top: Some(Length::Pt(points)),
            bottom: Some(Length::Pt(points)),
            ..Margin::default()
        },
        ..StyleRecord::default()
    }
}

fn paragraph_defaults() -> StyleRecord {
    block_spacing(PARAGRAPH_SPACING)
}

/// Headings are bold at `18 - 2 * level` points.
fn heading_defaults(level: u8) -> StyleRecord {
    StyleRecord {
        font_weight: Some(FontWeight::Bold),
        font_size: Some(Length::Pt(18.0 - 2.0 * f32::from(level))),
        ..StyleRecord::default()
    }
}

fn cell_defaults(header: bool) -> StyleRecord {
    StyleRecord {
        font_weight: header.then_some(FontWeight::Bold),
        ..block_spacing(0.0)
    }
}

fn inline_defaults(kind: InlineKind, parent: &StyleRecord) -> StyleRecord {
    let mut defaults = StyleRecord::default();
    match kind {
        InlineKind::Bold | InlineKind::Strong => defaults.font_weight = Some(FontWeight::Bold),
        InlineKind::Italic | InlineKind::Emphasis => defaults.font_style = Some(FontStyle::Italic),
        InlineKind::Underline => {
            let inherited = parent.text_decoration.unwrap_or_default();
            defaults.text_decoration = Some(TextDecoration {
                underline: true,
                ..inherited
            });
        }
        InlineKind::Small => {
            let size = parent.font_size_pt().unwrap_or(DEFAULT_FONT_SIZE);
            defaults.font_size = Some(Length::Pt((size - 2.0).max(1.0)));
        }
        InlineKind::Mark => defaults.background_color = Some(MARK_BACKGROUND),
        InlineKind::Span | InlineKind::LineBreak => {}
    }
    defaults
}
