use crate::domain::model::ReportOutput;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Packs rendered reports into one zip archive, one entry per filename.
pub fn bundle(outputs: &[ReportOutput]) -> Result<Vec<u8>> {
    tracing::debug!("Creating ZIP bundle with {} files", outputs.len());

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for output in outputs {
        zip.start_file::<_, ()>(output.filename.as_str(), FileOptions::default())?;
        zip.write_all(&output.body)?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
