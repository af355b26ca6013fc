//! Integration tests for the produced DOCX package.

use std::io::{Cursor, Read};

use htmldocx::render::{DocxParts, RenderOptions, PART_NAMES};
use htmldocx::{convert, convert_to_model, ConvertOptions};

fn archive(html: &str, options: &ConvertOptions) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    let bytes = convert(html, options).unwrap();
    zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
}

fn part(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn test_archive_layout() {
    let mut zip = archive("<p>hello</p>", &ConvertOptions::default());
    let names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(names, PART_NAMES.map(String::from).to_vec());

    let content_types = part(&mut zip, "[Content_Types].xml");
    assert!(content_types.contains("wordprocessingml.document.main+xml"));

    let rels = part(&mut zip, "_rels/.rels");
    assert!(rels.contains(r#"Target="word/document.xml""#));
}

#[test]
fn test_document_xml_content() {
    let html = r#"<h2>Heading</h2>
        <p style="text-align: justify; color: #ff6347">Text &amp; more</p>
        <ul><li>item</li></ul>
        <table><tr><th>A</th></tr><tr><td>1</td></tr></table>"#;
    let mut zip = archive(html, &ConvertOptions::default());
    let document = part(&mut zip, "word/document.xml");

    assert!(document.contains(r#"<w:pStyle w:val="Heading2"/>"#));
    assert!(document.contains(r#"<w:jc w:val="both"/>"#));
    assert!(document.contains(r#"<w:color w:val="FF6347"/>"#));
    assert!(document.contains("Text &amp; more"));
    assert!(document.contains("<w:numPr>"));
    assert!(document.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
    assert!(document.contains("<w:tblHeader/>"));
    assert!(document.contains("<w:sectPr>"));
}

#[test]
fn test_styles_use_configured_font() {
    let options = ConvertOptions::new()
        .with_font_family("Georgia")
        .with_default_font_size(11.0);
    let mut zip = archive("<p>x</p>", &options);
    let styles = part(&mut zip, "word/styles.xml");

    assert!(styles.contains(r#"w:ascii="Georgia""#));
    assert!(styles.contains(r#"w:eastAsia="SimSun""#));
    assert!(styles.contains(r#"<w:sz w:val="22"/>"#));
    for level in 1..=6 {
        assert!(styles.contains(&format!(r#"w:styleId="Heading{}""#, level)));
    }
}

#[test]
fn test_each_list_gets_numbering_instance() {
    let mut zip = archive(
        "<ol><li>a</li></ol><p>between</p><ol><li>b</li></ol>",
        &ConvertOptions::default(),
    );
    let numbering = part(&mut zip, "word/numbering.xml");
    assert_eq!(numbering.matches("<w:num ").count(), 2);
    assert!(numbering.contains(r#"<w:numFmt w:val="decimal"/>"#));
}

#[test]
fn test_metadata_in_core_properties() {
    let options = ConvertOptions::new().with_title("Quarterly <Report>").with_author("Ops");
    let mut zip = archive("<p>x</p>", &options);
    let core = part(&mut zip, "docProps/core.xml");
    assert!(core.contains("<dc:title>Quarterly &lt;Report&gt;</dc:title>"));
    assert!(core.contains("<dc:creator>Ops</dc:creator>"));
}

#[test]
fn test_parts_inspectable_without_zip() {
    let model = convert_to_model(
        "<p>a</p><table><tr><td>1</td><td>2</td></tr><tr><td>3</td></tr></table>",
        &ConvertOptions::default(),
    )
    .unwrap();
    let parts = DocxParts::build(&model, &RenderOptions::default()).unwrap();

    let body = parts.document.child("w:body").unwrap();
    let table = body.child("w:tbl").unwrap();
    let rows: Vec<_> = table.children_named("w:tr").collect();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row.children_named("w:tc").count(), 2);
    }
}

fn assert_xml_legal(text: &str, part: &str) {
    let illegal: Vec<u32> = text
        .chars()
        .filter(|&c| !htmldocx::render::is_xml_char(c))
        .map(u32::from)
        .collect();
    assert!(illegal.is_empty(), "illegal XML 1.0 chars in {}: {:?}", part, illegal);
}

#[test]
fn test_control_characters_never_reach_parts() {
    let options = ConvertOptions::new()
        .with_title("Ti\u{1}tle")
        .with_author("A\u{FFFE}uthor");
    for html in ["<p>a&#1;b</p>", "<p>a\u{1}b\u{b}c</p>", "<p>&#xFFFF;<b>\u{1f}x</b></p>"] {
        let mut zip = archive(html, &options);
        let document = part(&mut zip, "word/document.xml");
        assert_xml_legal(&document, "document.xml");
        assert!(document.contains("<w:t"));

        let core = part(&mut zip, "docProps/core.xml");
        assert_xml_legal(&core, "core.xml");
        assert!(core.contains("<dc:title>Title</dc:title>"));
        assert!(core.contains("<dc:creator>Author</dc:creator>"));
    }
}
