//! Package parts and ZIP assembly.

use std::io::{Cursor, Write};

use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::document::DocumentWriter;
use super::options::RenderOptions;
use super::styles::styles_xml;
use super::xml::XmlElement;
use crate::error::Result;
use crate::model::{DocumentModel, Metadata};

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const PACKAGE_RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_RELATIONSHIP: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CORE_PROPERTIES_NS: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const EXTENDED_PROPERTIES_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";

/// Part names in archive order.
pub const PART_NAMES: [&str; 8] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "docProps/core.xml",
    "docProps/app.xml",
    "word/document.xml",
    "word/styles.xml",
    "word/numbering.xml",
    "word/_rels/document.xml.rels",
];

/// The XML trees of every package part, before serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxParts {
    /// `[Content_Types].xml`
    pub content_types: XmlElement,
    /// `_rels/.rels`
    pub relationships: XmlElement,
    /// `docProps/core.xml`
    pub core_properties: XmlElement,
    /// `docProps/app.xml`
    pub app_properties: XmlElement,
    /// `word/document.xml`
    pub document: XmlElement,
    /// `word/styles.xml`
    pub styles: XmlElement,
    /// `word/numbering.xml`
    pub numbering: XmlElement,
    /// `word/_rels/document.xml.rels`
    pub document_relationships: XmlElement,
}

impl DocxParts {
    /// Build all parts for a document model.
    pub fn build(model: &DocumentModel, options: &RenderOptions) -> Result<Self> {
        let (document, numbering) = DocumentWriter::new(options).write(model)?;

        Ok(Self {
            content_types: content_types(),
            relationships: package_relationships(),
            core_properties: core_properties(&model.metadata),
            app_properties: app_properties(options),
            document,
            styles: styles_xml(options),
            numbering: numbering.to_xml(),
            document_relationships: document_relationships(),
        })
    }

    /// Parts paired with their archive names, in archive order.
    pub fn parts(&self) -> [(&'static str, &XmlElement); 8] {
        [
            (PART_NAMES[0], &self.content_types),
            (PART_NAMES[1], &self.relationships),
            (PART_NAMES[2], &self.core_properties),
            (PART_NAMES[3], &self.app_properties),
            (PART_NAMES[4], &self.document),
            (PART_NAMES[5], &self.styles),
            (PART_NAMES[6], &self.numbering),
            (PART_NAMES[7], &self.document_relationships),
        ]
    }

    /// Serialize every part and compress them into a DOCX archive.
    ///
    /// Entries carry a fixed modification time so identical input always
    /// produces identical bytes.
    pub fn to_package(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        for (name, element) in self.parts() {
            let bytes = element.to_xml()?;
            zip.start_file(name, options)?;
            zip.write_all(&bytes)?;
        }

        let bytes = zip.finish()?.into_inner();
        debug!("packaged {} parts into {} bytes", PART_NAMES.len(), bytes.len());
        Ok(bytes)
    }
}

fn content_types() -> XmlElement {
    let default = |extension: &str, content_type: &str| {
        XmlElement::new("Default")
            .attr("Extension", extension)
            .attr("ContentType", content_type)
    };
    let override_part = |part: &str, content_type: &str| {
        XmlElement::new("Override")
            .attr("PartName", part)
            .attr("ContentType", content_type)
    };

    XmlElement::new("Types")
        .attr("xmlns", CONTENT_TYPES_NS)
        .with_child(default(
            "rels",
            "application/vnd.openxmlformats-package.relationships+xml",
        ))
        .with_child(default("xml", "application/xml"))
        .with_child(override_part(
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ))
        .with_child(override_part(
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ))
        .with_child(override_part(
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ))
        .with_child(override_part(
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ))
        .with_child(override_part(
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ))
}

fn relationship(id: &str, kind: &str, target: &str) -> XmlElement {
    XmlElement::new("Relationship")
        .attr("Id", id)
        .attr("Type", kind)
        .attr("Target", target)
}

fn package_relationships() -> XmlElement {
    XmlElement::new("Relationships")
        .attr("xmlns", PACKAGE_RELATIONSHIPS_NS)
        .with_child(relationship(
            "rId1",
            &format!("{}/officeDocument", OFFICE_RELATIONSHIP),
            "word/document.xml",
        ))
        .with_child(relationship(
            "rId2",
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            "docProps/core.xml",
        ))
        .with_child(relationship(
            "rId3",
            &format!("{}/extended-properties", OFFICE_RELATIONSHIP),
            "docProps/app.xml",
        ))
}

fn document_relationships() -> XmlElement {
    XmlElement::new("Relationships")
        .attr("xmlns", PACKAGE_RELATIONSHIPS_NS)
        .with_child(relationship(
            "rId1",
            &format!("{}/styles", OFFICE_RELATIONSHIP),
            "styles.xml",
        ))
        .with_child(relationship(
            "rId2",
            &format!("{}/numbering", OFFICE_RELATIONSHIP),
            "numbering.xml",
        ))
}

fn core_properties(metadata: &Metadata) -> XmlElement {
    let mut core = XmlElement::new("cp:coreProperties")
        .attr("xmlns:cp", CORE_PROPERTIES_NS)
        .attr("xmlns:dc", "http://purl.org/dc/elements/1.1/")
        .attr("xmlns:dcterms", "http://purl.org/dc/terms/")
        .attr("xmlns:dcmitype", "http://purl.org/dc/dcmitype/")
        .attr("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance");

    if let Some(title) = &metadata.title {
        core.push(XmlElement::new("dc:title").with_text(title.as_str()));
    }
    if let Some(author) = &metadata.author {
        core.push(XmlElement::new("dc:creator").with_text(author.as_str()));
    }
    core
}

fn app_properties(options: &RenderOptions) -> XmlElement {
    XmlElement::new("Properties")
        .attr("xmlns", EXTENDED_PROPERTIES_NS)
        .attr(
            "xmlns:vt",
            "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
        )
        .with_child(XmlElement::new("Application").with_text(options.application.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentUnit, Paragraph};
    use std::io::Read;

    fn sample() -> DocumentModel {
        let mut model = DocumentModel::new();
        model.metadata.title = Some("Report".to_string());
        model.push(ContentUnit::Paragraph(Paragraph::with_text("Hello")));
        model
    }

    #[test]
    fn test_parts_in_fixed_order() {
        let parts = DocxParts::build(&sample(), &RenderOptions::default()).unwrap();
        let names: Vec<_> = parts.parts().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, PART_NAMES);
    }

    #[test]
    fn test_content_types_cover_parts() {
        let types = content_types();
        let overrides: Vec<_> = types
            .children_named("Override")
            .filter_map(|o| o.attribute("PartName"))
            .collect();
        for part in ["/word/document.xml", "/word/styles.xml", "/word/numbering.xml"] {
            assert!(overrides.contains(&part));
        }
    }

    #[test]
    fn test_core_properties_metadata() {
        let core = core_properties(&Metadata {
            title: Some("T".to_string()),
            author: Some("A".to_string()),
        });
        assert_eq!(core.child("dc:title").unwrap().text(), "T");
        assert_eq!(core.child("dc:creator").unwrap().text(), "A");
        assert!(core_properties(&Metadata::default()).is_empty());
    }

    #[test]
    fn test_package_is_zip_with_all_parts() {
        let parts = DocxParts::build(&sample(), &RenderOptions::default()).unwrap();
        let bytes = parts.to_package().unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), PART_NAMES.len());
        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.contains("Hello"));
    }

    #[test]
    fn test_package_is_deterministic() {
        let parts = DocxParts::build(&sample(), &RenderOptions::default()).unwrap();
        assert_eq!(parts.to_package().unwrap(), parts.to_package().unwrap());
    }
}
