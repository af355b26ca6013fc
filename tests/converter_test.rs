//! Integration tests for the conversion pipeline.

use htmldocx::{
    convert, convert_to_model, convert_with_stats, ContentUnit, ConvertOptions, Error,
    InlineContent, MeasurementUnit, Rgb, Stage, DOCX_MIME_TYPE,
};

fn model(html: &str) -> htmldocx::DocumentModel {
    convert_to_model(html, &ConvertOptions::default()).unwrap()
}

#[test]
fn test_inline_at_root_becomes_paragraph() {
    let doc = model("<b>hi</b>");
    assert_eq!(doc.units.len(), 1);

    let paragraph = doc.units[0].as_paragraph().expect("paragraph");
    let runs: Vec<_> = paragraph.runs().collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "hi");
    assert!(runs[0].style.is_bold());
}

#[test]
fn test_style_inheritance_and_override() {
    let doc = model(r#"<div style="color:red"><p>a</p><p style="color:blue">b</p></div>"#);
    assert_eq!(doc.units.len(), 2);

    let first = doc.units[0].as_paragraph().unwrap();
    let second = doc.units[1].as_paragraph().unwrap();
    assert_eq!(first.style.color, Some(Rgb::new(255, 0, 0)));
    assert_eq!(second.style.color, Some(Rgb::new(0, 0, 255)));
    assert_eq!(first.runs().next().unwrap().style.color, Some(Rgb::new(255, 0, 0)));
    assert_eq!(second.runs().next().unwrap().style.color, Some(Rgb::new(0, 0, 255)));
}

#[test]
fn test_line_break_stays_in_one_paragraph() {
    let doc = model("<p>line1<br/>line2</p>");
    assert_eq!(doc.units.len(), 1);

    let paragraph = doc.units[0].as_paragraph().unwrap();
    assert_eq!(paragraph.content.len(), 3);
    assert!(matches!(paragraph.content[1], InlineContent::LineBreak));

    let runs: Vec<_> = paragraph.runs().collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "line1");
    assert_eq!(runs[1].text, "line2");
    for run in runs {
        assert_eq!(run.style, paragraph.style.inline_only());
    }
}

#[test]
fn test_six_heading_levels() {
    let html: String = (1..=6).map(|l| format!("<h{0}>H{0}</h{0}>", l)).collect();
    let doc = model(&html);

    let levels: Vec<u8> = doc
        .units
        .iter()
        .map(|u| u.as_heading().expect("heading").level)
        .collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);

    let sizes: Vec<f32> = doc
        .units
        .iter()
        .map(|u| u.as_heading().unwrap().style.font_size_pt().unwrap())
        .collect();
    assert_eq!(sizes, vec![16.0, 14.0, 12.0, 10.0, 8.0, 6.0]);
}

#[test]
fn test_short_rows_padded() {
    let doc = model(
        "<table>\
         <tr><td>a</td><td>b</td><td>c</td></tr>\
         <tr><td>d</td></tr>\
         <tr><td>e</td><td>f</td></tr>\
         </table>",
    );
    let table = doc.units[0].as_table().expect("table");
    assert_eq!(table.row_count(), 3);
    for row in &table.rows {
        assert_eq!(row.cells.len(), 3);
    }
    assert!(table.rows[1].cells[1].is_empty());
    assert!(table.rows[2].cells[2].is_empty());
}

#[test]
fn test_unknown_color_drops_only_that_property() {
    let doc = model(r#"<p style="color: bluish; font-weight: bold; font-size: 14pt">x</p>"#);
    let paragraph = doc.units[0].as_paragraph().unwrap();
    let run = paragraph.runs().next().unwrap();
    assert_eq!(run.style.color, None);
    assert!(run.style.is_bold());
    assert_eq!(run.style.font_size_pt(), Some(14.0));
}

#[test]
fn test_conversion_is_deterministic() {
    let html = r#"<h1>Title</h1><p style="text-align:center">Hello <i>world</i></p>
        <ol><li>one<ul><li>nested</li></ul></li><li>two</li></ol>
        <table><tr><th>A</th><th>B</th></tr><tr><td>1</td></tr></table>"#;
    let options = ConvertOptions::default().with_title("Same");

    let first = convert(html, &options).unwrap();
    let second = convert(html, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_strict_mode_rejects_unterminated_div() {
    let html = "<div><p>text";

    let strict = ConvertOptions::new().with_strict_mode(true);
    let err = convert(html, &strict).unwrap_err();
    assert_eq!(err.stage, Stage::Parse);
    assert!(matches!(err.cause(), Error::MalformedMarkup { .. }));

    let bytes = convert(html, &ConvertOptions::default()).unwrap();
    assert_eq!(&bytes[..2], b"PK");
    let doc = model(html);
    assert_eq!(doc.plain_text(), "text");
}

#[test]
fn test_pixel_unit_for_bare_numbers() {
    let options = ConvertOptions::new().with_measurement_unit(MeasurementUnit::Pixels);
    let doc = convert_to_model(r#"<p style="font-size: 16">x</p>"#, &options).unwrap();
    let paragraph = doc.units[0].as_paragraph().unwrap();
    assert_eq!(paragraph.style.font_size_pt(), Some(12.0));
}

#[test]
fn test_default_font_size_applies() {
    let options = ConvertOptions::new().with_default_font_size(10.0);
    let doc = convert_to_model("<p>x <small>y</small></p>", &options).unwrap();
    let paragraph = doc.units[0].as_paragraph().unwrap();
    let sizes: Vec<_> = paragraph.runs().map(|r| r.style.font_size_pt()).collect();
    assert_eq!(sizes, vec![Some(10.0), Some(8.0)]);
}

#[test]
fn test_llm_wrapping_is_removed() {
    let html = r"<think>draft the page</think><html><body><p>a</p>\n<p>b</p></body></html>";
    let doc = model(html);
    assert_eq!(doc.plain_text(), "a\n\nb");
}

#[test]
fn test_stats_and_mime_type() {
    let result = convert_with_stats(
        "<p>one</p><p>two <b>three</b></p><table><tr><td>x</td></tr></table>",
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(result.mime_type, DOCX_MIME_TYPE);
    assert_eq!(result.stats.tables, 1);
    assert!(result.stats.paragraphs >= 2);
    assert!(result.stats.runs >= 3);
}

#[test]
fn test_list_items_and_nesting() {
    let doc = model("<ul><li>a</li><li>b<ol><li>c</li></ol></li></ul>");
    let list = doc.units[0].as_list().expect("list");
    assert!(!list.is_ordered());
    assert_eq!(list.items.len(), 2);

    let second = &list.items[1];
    assert_eq!(second.content.len(), 2);
    let nested = second.content[1].as_list().expect("nested list");
    assert!(nested.is_ordered());
    assert_eq!(nested.items[0].plain_text(), "c");
}

#[test]
fn test_unsupported_tags_are_transparent() {
    let doc = model("<p>a <font color=red>b</font> <code>c</code></p>");
    assert_eq!(doc.units.len(), 1);
    assert_eq!(doc.plain_text(), "a b c");
    assert!(matches!(doc.units[0], ContentUnit::Paragraph(_)));
}

#[test]
fn test_deeply_nested_input_converts() {
    let html = format!("{}deep{}", "<div>".repeat(10_000), "</div>".repeat(10_000));

    let doc = model(&html);
    assert_eq!(doc.plain_text(), "deep");
    let bytes = convert(&html, &ConvertOptions::default()).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let strict = ConvertOptions::new().with_strict_mode(true);
    let err = convert(&html, &strict).unwrap_err();
    assert_eq!(err.stage, Stage::Parse);
    assert!(matches!(err.cause(), Error::MalformedMarkup { .. }));
}
