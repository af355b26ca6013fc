//! `word/numbering.xml`: list definitions.
//!
//! Two abstract definitions (bullet and ordered) with nine levels each. Every
//! list in the document gets its own numbering instance that restarts all
//! levels, so separate lists never continue each other's count.

use super::xml::XmlElement;
use super::WORDML_NS;
use crate::model::ListKind;

/// Number of levels in a list definition.
pub const LIST_LEVELS: u32 = 9;

/// Indentation step per list level, in twips.
pub const LEVEL_INDENT: u32 = 720;

/// Hanging indent of the marker, in twips.
const HANGING_INDENT: u32 = 360;

const BULLETS: [char; 3] = ['\u{2022}', '\u{25e6}', '\u{25aa}'];
const ORDERED_FORMATS: [&str; 3] = ["decimal", "lowerLetter", "lowerRoman"];

/// Numbering instances allocated while emitting the body.
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    instances: Vec<ListKind>,
}

impl Numbering {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh numbering instance and return its `numId`.
    pub fn register(&mut self, kind: ListKind) -> u32 {
        self.instances.push(kind);
        self.instances.len() as u32
    }

    /// Number of allocated instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check if no list was registered.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Build the numbering part.
    pub fn to_xml(&self) -> XmlElement {
        let mut numbering = XmlElement::w("numbering").attr("xmlns:w", WORDML_NS);
        numbering.push(abstract_num(ListKind::Unordered));
        numbering.push(abstract_num(ListKind::Ordered));

        for (index, kind) in self.instances.iter().enumerate() {
            let mut num = XmlElement::w("num")
                .attr("w:numId", index + 1)
                .with_child(XmlElement::w("abstractNumId").val(abstract_id(*kind)));
            for level in 0..LIST_LEVELS {
                num.push(
                    XmlElement::w("lvlOverride")
                        .attr("w:ilvl", level)
                        .with_child(XmlElement::w("startOverride").val(1)),
                );
            }
            numbering.push(num);
        }
        numbering
    }
}

/// Left indentation of list text at `level`, in twips.
pub fn level_indent(level: u32) -> u32 {
    LEVEL_INDENT * (level + 1)
}

fn abstract_id(kind: ListKind) -> u32 {
    match kind {
        ListKind::Unordered => 0,
        ListKind::Ordered => 1,
    }
}

fn abstract_num(kind: ListKind) -> XmlElement {
    let mut definition = XmlElement::w("abstractNum")
        .attr("w:abstractNumId", abstract_id(kind))
        .with_child(XmlElement::w("multiLevelType").val("hybridMultilevel"));

    for level in 0..LIST_LEVELS {
        let cycle = (level % 3) as usize;
        let (format, text) = match kind {
            ListKind::Unordered => ("bullet", BULLETS[cycle].to_string()),
            ListKind::Ordered => (ORDERED_FORMATS[cycle], format!("%{}.", level + 1)),
        };

        definition.push(
            XmlElement::w("lvl")
                .attr("w:ilvl", level)
                .with_child(XmlElement::w("start").val(1))
                .with_child(XmlElement::w("numFmt").val(format))
                .with_child(XmlElement::w("lvlText").val(text))
                .with_child(XmlElement::w("lvlJc").val("left"))
                .with_child(
                    XmlElement::w("pPr").with_child(
                        XmlElement::w("ind")
                            .attr("w:left", level_indent(level))
                            .attr("w:hanging", HANGING_INDENT),
                    ),
                ),
        );
    }
    definition
}
