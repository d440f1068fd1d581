use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use csv::WriterBuilder;

use crate::{addons::AddonDictionary, error::AppError, models::Operator};

const BASE_HEADERS: [&str; 5] = ["id", "name", "avatar", "isWorking", "createdAt"];

/// Writes rows as CSV: the operator fields, then one column per addon field.
pub fn write_csv<W: Write>(
    writer: W,
    rows: &[Operator],
    addon_columns: &[String],
    dict: &AddonDictionary,
) -> Result<(), AppError> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header: Vec<&str> = BASE_HEADERS.to_vec();
    header.extend(addon_columns.iter().map(String::as_str));
    csv_writer.write_record(&header)?;

    for op in rows {
        let mut record: Vec<&str> = vec![
            op.id.as_str(),
            op.name.as_str(),
            op.avatar.as_str(),
            if op.is_working { "true" } else { "false" },
            op.created_at.as_str(),
        ];
        record.extend(
            addon_columns
                .iter()
                .map(|name| dict.get(name).map(String::as_str).unwrap_or("")),
        );
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv_file(
    destination: &Path,
    rows: &[Operator],
    addon_columns: &[String],
    dict: &AddonDictionary,
) -> Result<(), AppError> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export dir {:?}", parent))?;
    }
    let file = File::create(destination)
        .with_context(|| format!("failed to create export file {:?}", destination))?;
    write_csv(BufWriter::new(file), rows, addon_columns, dict)?;
    tracing::info!(rows = rows.len(), "exported table to {:?}", destination);
    Ok(())
}
