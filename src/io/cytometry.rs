use std::fs::{create_dir_all, File};
use std::path::Path;

use anyhow::Context;
use log::{debug, warn};
use polars::prelude::*;

/// Reads one per-tile cytometry table.
///
/// The file must carry a header row. Column types are inferred from the
/// whole file so that sparse measurement columns are not truncated to the
/// type of their first few values.
pub fn read_tile_table<P: AsRef<Path>>(path: P) -> anyhow::Result<DataFrame> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .with_context(|| {
            format!("Failed to read cytometry table {}", path.display())
        })?;
    debug!("Read {} rows from {}", df.height(), path.display());
    Ok(df)
}

/// Writes `df` as a CSV file with header, creating parent directories as
/// needed.
pub fn write_table<P: AsRef<Path>>(
    df: &mut DataFrame,
    path: P,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        create_dir_all(parent).with_context(|| {
            format!("Could not create directory {}", parent.display())
        })?;
    }
    let mut file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| {
            warn!("Failed to write DataFrame: {}", e);
            e
        })?;
    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
