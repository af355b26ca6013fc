//! `word/styles.xml`: document defaults and the named styles referenced by
//! the body.

use super::options::RenderOptions;
use super::xml::XmlElement;
use super::{half_points, WORDML_NS};

/// Space before and after Normal paragraphs, in twips (6pt).
const NORMAL_SPACING: u32 = 120;

/// Line spacing of Normal paragraphs in 240ths of a line (1.5 lines).
const NORMAL_LINE: u32 = 360;

/// Style id of the paragraph style for heading `level`.
pub fn heading_style_id(level: u8) -> String {
    format!("Heading{}", level.clamp(1, 6))
}

/// Default size of heading `level`, in points.
pub fn heading_size(level: u8) -> f32 {
    18.0 - 2.0 * f32::from(level.clamp(1, 6))
}

/// Style id used for numbered list paragraphs.
pub const LIST_PARAGRAPH_STYLE: &str = "ListParagraph";

/// Style id of the bordered table style.
pub const TABLE_STYLE: &str = "TableGrid";

/// Build the styles part.
pub fn styles_xml(options: &RenderOptions) -> XmlElement {
    let mut styles = XmlElement::w("styles").attr("xmlns:w", WORDML_NS);
    styles.push(doc_defaults(options));
    styles.push(normal_style());
    for level in 1..=6 {
        styles.push(heading_style(level));
    }
    styles.push(list_paragraph_style());
    styles.push(default_character_style());
    styles.push(table_normal_style());
    styles.push(table_grid_style());
    styles
}

fn doc_defaults(options: &RenderOptions) -> XmlElement {
    let size = half_points(options.default_font_size);
    let fonts = XmlElement::w("rFonts")
        .attr("w:ascii", &options.font_family)
        .attr("w:hAnsi", &options.font_family)
        .attr("w:eastAsia", &options.east_asian_font)
        .attr("w:cs", &options.font_family);

    XmlElement::w("docDefaults")
        .with_child(
            XmlElement::w("rPrDefault").with_child(
                XmlElement::w("rPr")
                    .with_child(fonts)
                    .with_child(XmlElement::w("sz").val(size))
                    .with_child(XmlElement::w("szCs").val(size)),
            ),
        )
        .with_child(
            XmlElement::w("pPrDefault").with_child(
                XmlElement::w("pPr").with_child(
                    XmlElement::w("spacing")
                        .attr("w:after", 0)
                        .attr("w:line", 240)
                        .attr("w:lineRule", "auto"),
                ),
            ),
        )
}

fn style(kind: &str, id: &str, name: &str) -> XmlElement {
    XmlElement::w("style")
        .attr("w:type", kind)
        .attr("w:styleId", id)
        .with_child(XmlElement::w("name").val(name))
}

fn normal_style() -> XmlElement {
    XmlElement::w("style")
        .attr("w:type", "paragraph")
        .attr("w:default", 1)
        .attr("w:styleId", "Normal")
        .with_child(XmlElement::w("name").val("Normal"))
        .with_child(XmlElement::w("qFormat"))
        .with_child(
            XmlElement::w("pPr").with_child(
                XmlElement::w("spacing")
                    .attr("w:before", NORMAL_SPACING)
                    .attr("w:after", NORMAL_SPACING)
                    .attr("w:line", NORMAL_LINE)
                    .attr("w:lineRule", "auto"),
            ),
        )
}

fn heading_style(level: u8) -> XmlElement {
    let size = half_points(heading_size(level));
    style("paragraph", &heading_style_id(level), &format!("heading {}", level))
        .with_child(XmlElement::w("basedOn").val("Normal"))
        .with_child(XmlElement::w("next").val("Normal"))
        .with_child(XmlElement::w("uiPriority").val(9))
        .with_child(XmlElement::w("qFormat"))
        .with_child(
            XmlElement::w("pPr")
                .with_child(XmlElement::w("keepNext"))
                .with_child(XmlElement::w("keepLines"))
                .with_child(
                    XmlElement::w("spacing")
                        .attr("w:before", 240)
                        .attr("w:after", 120),
                )
                .with_child(XmlElement::w("outlineLvl").val(level - 1)),
        )
        .with_child(
            XmlElement::w("rPr")
                .with_child(XmlElement::w("b"))
                .with_child(XmlElement::w("bCs"))
                .with_child(XmlElement::w("sz").val(size))
                .with_child(XmlElement::w("szCs").val(size)),
        )
}

fn list_paragraph_style() -> XmlElement {
    style("paragraph", LIST_PARAGRAPH_STYLE, "List Paragraph")
        .with_child(XmlElement::w("basedOn").val("Normal"))
        .with_child(XmlElement::w("uiPriority").val(34))
        .with_child(XmlElement::w("qFormat"))
        .with_child(
            XmlElement::w("pPr").with_child(XmlElement::w("ind").attr("w:left", 720)),
        )
}

fn default_character_style() -> XmlElement {
    XmlElement::w("style")
        .attr("w:type", "character")
        .attr("w:default", 1)
        .attr("w:styleId", "DefaultParagraphFont")
        .with_child(XmlElement::w("name").val("Default Paragraph Font"))
        .with_child(XmlElement::w("uiPriority").val(1))
        .with_child(XmlElement::w("semiHidden"))
}

fn table_normal_style() -> XmlElement {
    let margin = |side: &str, width: u32| {
        XmlElement::w(side).attr("w:w", width).attr("w:type", "dxa")
    };

    XmlElement::w("style")
        .attr("w:type", "table")
        .attr("w:default", 1)
        .attr("w:styleId", "TableNormal")
        .with_child(XmlElement::w("name").val("Normal Table"))
        .with_child(XmlElement::w("uiPriority").val(99))
        .with_child(XmlElement::w("semiHidden"))
        .with_child(
            XmlElement::w("tblPr")
                .with_child(XmlElement::w("tblInd").attr("w:w", 0).attr("w:type", "dxa"))
                .with_child(
                    XmlElement::w("tblCellMar")
                        .with_child(margin("top", 0))
                        .with_child(margin("left", 108))
                        .with_child(margin("bottom", 0))
                        .with_child(margin("right", 108)),
                ),
        )
}

fn table_grid_style() -> XmlElement {
    let border = |side: &str| {
        XmlElement::w(side)
            .val("single")
            .attr("w:sz", 4)
            .attr("w:space", 0)
            .attr("w:color", "auto")
    };

    style("table", TABLE_STYLE, "Table Grid")
        .with_child(XmlElement::w("basedOn").val("TableNormal"))
        .with_child(XmlElement::w("uiPriority").val(59))
        .with_child(
            XmlElement::w("pPr").with_child(
                XmlElement::w("spacing")
                    .attr("w:before", 0)
                    .attr("w:after", 0)
                    .attr("w:line", 240)
                    .attr("w:lineRule", "auto"),
            ),
        )
        .with_child(
            XmlElement::w("tblPr").with_child(
                XmlElement::w("tblBorders")
                    .with_child(border("top"))
                    .with_child(border("left"))
                    .with_child(border("bottom"))
                    .with_child(border("right"))
                    .with_child(border("insideH"))
                    .with_child(border("insideV")),
            ),
        )
}
