//! `word/document.xml`: the document body.
//!
//! Each [`ContentUnit`] becomes native WordprocessingML: paragraphs and
//! headings become `w:p`, lists become numbered `w:p` sequences and tables
//! become `w:tbl`. Style fields are translated into paragraph and run
//! properties (twips for spacing, half-points for sizes, hex colors).

use log::debug;

use super::numbering::{level_indent, Numbering, LIST_LEVELS};
use super::options::RenderOptions;
use super::styles::{heading_size, heading_style_id, LIST_PARAGRAPH_STYLE, TABLE_STYLE};
use super::xml::XmlElement;
use super::{half_points, twips, MAX_TWIPS, RELATIONSHIPS_NS, WORDML_NS};
use crate::error::{Error, Result};
use crate::model::{ContentUnit, DocumentModel, Heading, InlineContent, ListBlock, Paragraph, Table, TextRun};
use crate::style::{LineHeight, StyleRecord, TextAlign};

/// US Letter width in twips.
const PAGE_WIDTH: u32 = 12240;
/// US Letter height in twips.
const PAGE_HEIGHT: u32 = 15840;
/// Page margin on every side, in twips.
const PAGE_MARGIN: u32 = 1440;
/// Width available to body content, in twips.
pub const CONTENT_WIDTH: u32 = PAGE_WIDTH - 2 * PAGE_MARGIN;

/// Character formatting a run inherits from its paragraph style.
#[derive(Debug, Clone, Copy)]
struct RunBase {
    size: f32,
    bold: bool,
}

/// Paragraph-level properties not carried by the style record.
#[derive(Debug, Clone, Default)]
struct ParagraphProps {
    style_id: Option<String>,
    numbering: Option<(u32, u32)>,
    indent: Option<u32>,
}

/// Writes the document body, allocating list numbering as it goes.
#[derive(Debug)]
pub struct DocumentWriter<'a> {
    options: &'a RenderOptions,
    numbering: Numbering,
}

impl<'a> DocumentWriter<'a> {
    /// Create a writer.
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            numbering: Numbering::new(),
        }
    }

    /// Build the `w:document` tree and the numbering instances it uses.
    pub fn write(mut self, model: &DocumentModel) -> Result<(XmlElement, Numbering)> {
        let mut body = Vec::new();
        for unit in &model.units {
            self.unit(unit, &mut body)?;
        }
        body.push(section_properties());

        debug!(
            "emitted {} body elements, {} numbering instances",
            body.len(),
            self.numbering.len()
        );

        let document = XmlElement::w("document")
            .attr("xmlns:w", WORDML_NS)
            .attr("xmlns:r", RELATIONSHIPS_NS)
            .with_child(XmlElement::w("body").with_children(body));
        Ok((document, self.numbering))
    }

    fn unit(&mut self, unit: &ContentUnit, out: &mut Vec<XmlElement>) -> Result<()> {
        match unit {
            ContentUnit::Paragraph(p) => out.push(self.paragraph(p, ParagraphProps::default())),
            ContentUnit::Heading(h) => out.push(self.heading(h, ParagraphProps::default())),
            ContentUnit::List(list) => self.list(list, 0, out)?,
            ContentUnit::Table(table) => out.push(self.table(table)?),
        }
        Ok(())
    }

    fn paragraph_base(&self) -> RunBase {
        RunBase {
            size: self.options.default_font_size,
            bold: false,
        }
    }

    fn paragraph(&self, paragraph: &Paragraph, props: ParagraphProps) -> XmlElement {
        paragraph_element(&paragraph.style, &paragraph.content, &props, self.paragraph_base())
    }

    fn heading(&self, heading: &Heading, mut props: ParagraphProps) -> XmlElement {
        if props.style_id.is_none() {
            props.style_id = Some(heading_style_id(heading.level));
        }
        let base = RunBase {
            size: heading_size(heading.level),
            bold: true,
        };
        paragraph_element(&heading.style, &heading.content, &props, base)
    }

    fn list(&mut self, list: &ListBlock, depth: u32, out: &mut Vec<XmlElement>) -> Result<()> {
        let num_id = self.numbering.register(list.kind);
        let level = depth.min(LIST_LEVELS - 1);
        let numbered = || ParagraphProps {
            style_id: Some(LIST_PARAGRAPH_STYLE.to_string()),
            numbering: Some((num_id, level)),
            indent: None,
        };
        let continuation = || ParagraphProps {
            indent: Some(level_indent(level)),
            ..ParagraphProps::default()
        };

        for item in &list.items {
            let starts_with_text = matches!(
                item.content.first(),
                Some(ContentUnit::Paragraph(_)) | Some(ContentUnit::Heading(_))
            );
            if !starts_with_text {
                let marker = Paragraph::new(list.style.clone());
                out.push(self.paragraph(&marker, numbered()));
            }

            for (index, unit) in item.content.iter().enumerate() {
                let props = if index == 0 { numbered() } else { continuation() };
                match unit {
                    ContentUnit::Paragraph(p) => out.push(self.paragraph(p, props)),
                    ContentUnit::Heading(h) => {
                        let mut props = props;
                        props.style_id = Some(heading_style_id(h.level));
                        out.push(self.heading(h, props));
                    }
                    ContentUnit::List(nested) => self.list(nested, depth + 1, out)?,
                    ContentUnit::Table(table) => out.push(self.table(table)?),
                }
            }
        }
        Ok(())
    }

    fn table(&mut self, table: &Table) -> Result<XmlElement> {
        let columns = table.column_count();
        if columns == 0 {
            return Err(Error::Emit("table without cells".to_string()));
        }
        let column_width = CONTENT_WIDTH / columns as u32;

        let properties = XmlElement::w("tblPr")
            .with_child(XmlElement::w("tblStyle").val(TABLE_STYLE))
            .with_child(XmlElement::w("tblW").attr("w:w", 5000).attr("w:type", "pct"))
            .with_child(
                XmlElement::w("tblLook")
                    .val("04A0")
                    .attr("w:firstRow", 1)
                    .attr("w:lastRow", 0)
                    .attr("w:firstColumn", 1)
                    .attr("w:lastColumn", 0)
                    .attr("w:noHBand", 0)
                    .attr("w:noVBand", 1),
            );
        let grid = XmlElement::w("tblGrid").with_children(
            (0..columns).map(|_| XmlElement::w("gridCol").attr("w:w", column_width)),
        );

        let mut element = XmlElement::w("tbl").with_child(properties).with_child(grid);

        for (index, row) in table.rows.iter().enumerate() {
            if row.cells.len() != columns {
                return Err(Error::Emit(format!(
                    "table row {} has {} cells, expected {}",
                    index,
                    row.cells.len(),
                    columns
                )));
            }

            let mut tr = XmlElement::w("tr");
            if row.is_header && index < table.header_rows() {
                tr.push(XmlElement::w("trPr").with_child(XmlElement::w("tblHeader")));
            }

            for cell in &row.cells {
                let mut content = Vec::new();
                for unit in &cell.content {
                    self.unit(unit, &mut content)?;
                }
                if content.last().map_or(true, |e| e.name != "w:p") {
                    content.push(XmlElement::w("p"));
                }

                tr.push(
                    XmlElement::w("tc")
                        .with_child(
                            XmlElement::w("tcPr").with_child(
                                XmlElement::w("tcW")
                                    .attr("w:w", column_width)
                                    .attr("w:type", "dxa"),
                            ),
                        )
                        .with_children(content),
                );
            }
            element.push(tr);
        }

        Ok(element)
    }
}

fn paragraph_element(
    style: &StyleRecord,
    content: &[InlineContent],
    props: &ParagraphProps,
    base: RunBase,
) -> XmlElement {
    let mut paragraph = XmlElement::w("p");
    let ppr = paragraph_properties(style, props);
    if !ppr.is_empty() {
        paragraph.push(ppr);
    }

    for item in content {
        match item {
            InlineContent::Run(run) if !run.is_empty() => paragraph.push(run_element(run, base)),
            InlineContent::Run(_) => {}
            InlineContent::LineBreak => {
                paragraph.push(XmlElement::w("r").with_child(XmlElement::w("br")))
            }
        }
    }
    paragraph
}

fn paragraph_properties(style: &StyleRecord, props: &ParagraphProps) -> XmlElement {
    let mut ppr = XmlElement::w("pPr");

    if let Some(id) = &props.style_id {
        ppr.push(XmlElement::w("pStyle").val(id));
    }

    if let Some((num_id, level)) = props.numbering {
        ppr.push(
            XmlElement::w("numPr")
                .with_child(XmlElement::w("ilvl").val(level))
                .with_child(XmlElement::w("numId").val(num_id)),
        );
    }

    let mut spacing = XmlElement::w("spacing");
    if let Some(top) = style.margin.top.and_then(|l| l.as_points()) {
        spacing = spacing.attr("w:before", twips(top));
    }
    if let Some(bottom) = style.margin.bottom.and_then(|l| l.as_points()) {
        spacing = spacing.attr("w:after", twips(bottom));
    }
    match style.line_height {
        Some(LineHeight::Multiplier(m)) => {
            spacing = spacing
                .attr("w:line", (m * 240.0).round().clamp(1.0, MAX_TWIPS as f32) as u32)
                .attr("w:lineRule", "auto");
        }
        Some(LineHeight::Length(l)) => {
            if let Some(points) = l.as_points() {
                spacing = spacing
                    .attr("w:line", twips(points))
                    .attr("w:lineRule", "exact");
            }
        }
        None => {}
    }
    if !spacing.attributes.is_empty() {
        ppr.push(spacing);
    }

    let left = style
        .margin
        .left
        .and_then(|l| l.as_points())
        .map(twips)
        .or(props.indent);
    let right = style.margin.right.and_then(|l| l.as_points()).map(twips);
    if left.is_some() || right.is_some() {
        let mut ind = XmlElement::w("ind");
        if let Some(left) = left {
            ind = ind.attr("w:left", left);
        }
        if let Some(right) = right {
            ind = ind.attr("w:right", right);
        }
        ppr.push(ind);
    }

    if let Some(align) = style.text_align {
        let value = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "both",
        };
        ppr.push(XmlElement::w("jc").val(value));
    }

    ppr
}

fn run_element(run: &TextRun, base: RunBase) -> XmlElement {
    let style = &run.style;
    let mut rpr = XmlElement::w("rPr");

    if style.is_bold() != base.bold {
        rpr.push(if style.is_bold() {
            XmlElement::w("b")
        } else {
            XmlElement::w("b").val(0)
        });
    }
    if style.is_italic() {
        rpr.push(XmlElement::w("i"));
    }
    let decoration = style.text_decoration.unwrap_or_default();
    if decoration.line_through {
        rpr.push(XmlElement::w("strike"));
    }
    if let Some(color) = style.color {
        rpr.push(XmlElement::w("color").val(color.to_hex()));
    }
    if let Some(size) = style.font_size_pt() {
        let size = half_points(size);
        if size != half_points(base.size) {
            rpr.push(XmlElement::w("sz").val(size));
            rpr.push(XmlElement::w("szCs").val(size));
        }
    }
    if decoration.underline {
        rpr.push(XmlElement::w("u").val("single"));
    }
    if let Some(background) = style.background_color {
        rpr.push(
            XmlElement::w("shd")
                .val("clear")
                .attr("w:color", "auto")
                .attr("w:fill", background.to_hex()),
        );
    }

    let mut element = XmlElement::w("r");
    if !rpr.is_empty() {
        element.push(rpr);
    }
    element.with_child(
        XmlElement::w("t")
            .attr("xml:space", "preserve")
            .with_text(run.text.as_str()),
    )
}

fn section_properties() -> XmlElement {
    XmlElement::w("sectPr")
        .with_child(
            XmlElement::w("pgSz")
                .attr("w:w", PAGE_WIDTH)
                .attr("w:h", PAGE_HEIGHT),
        )
        .with_child(
            XmlElement::w("pgMar")
                .attr("w:top", PAGE_MARGIN)
                .attr("w:right", PAGE_MARGIN)
                .attr("w:bottom", PAGE_MARGIN)
                .attr("w:left", PAGE_MARGIN)
                .attr("w:header", 708)
                .attr("w:footer", 708)
                .attr("w:gutter", 0),
        )
        .with_child(XmlElement::w("cols").attr("w:space", 708))
        .with_child(XmlElement::w("docGrid").attr("w:linePitch", 360))
}
