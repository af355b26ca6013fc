//! Document model as JSON, for inspection and debugging.

use std::io::Write;

use crate::error::Result;
use crate::model::DocumentModel;

/// Layout of the JSON dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// Serialize a document model to a JSON string.
pub fn to_json(model: &DocumentModel, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(model)?,
        JsonFormat::Compact => serde_json::to_string(model)?,
    };
    Ok(json)
}

/// Serialize a document model as JSON into `writer`, followed by a newline.
pub fn write_json<W: Write>(model: &DocumentModel, format: JsonFormat, mut writer: W) -> Result<()> {
    match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(&mut writer, model)?,
        JsonFormat::Compact => serde_json::to_writer(&mut writer, model)?,
    }
    writer.write_all(b"\n")?;
    Ok(())
}
