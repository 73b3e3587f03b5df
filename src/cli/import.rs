//! CSV import CLI command

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::services::{ImportService, ImportStatus};

use super::AppContext;

/// Handle `spendwise import <file>`
pub fn handle_import_command(ctx: &AppContext, file: &Path, dry_run: bool) -> SpendwiseResult<()> {
    let service = ImportService::new(ctx.store.as_ref());
    let open_err =
        |e| SpendwiseError::Import(format!("Could not open {}: {}", file.display(), e));

    // Sniff the delimiter from the raw first line, then the first record
    // for headers, before parsing the data rows
    let mut first_line = String::new();
    BufReader::new(File::open(file).map_err(open_err)?)
        .read_line(&mut first_line)
        .map_err(|e| {
            SpendwiseError::Import(format!("Could not read {}: {}", file.display(), e))
        })?;
    let delimiter = service.detect_delimiter(&first_line);

    let mut sniffer = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter as u8)
        .from_reader(File::open(file).map_err(open_err)?);
    let first = sniffer
        .headers()
        .map_err(|e| SpendwiseError::Import(format!("Could not read {}: {}", file.display(), e)))?
        .clone();
    let mapping = service
        .detect_mapping_from_headers(&first)
        .with_delimiter(delimiter);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(mapping.has_header)
        .delimiter(mapping.delimiter as u8)
        .flexible(true)
        .from_reader(File::open(file).map_err(open_err)?);

    let parsed = service.parse_csv_from_reader(&mut reader, &mapping)?;
    let preview = service.generate_preview(&parsed)?;

    let new_count = preview.iter().filter(|e| e.status == ImportStatus::New).count();
    let dup_count = preview
        .iter()
        .filter(|e| e.status == ImportStatus::Duplicate)
        .count();
    let error_entries: Vec<_> = preview
        .iter()
        .filter_map(|e| match &e.status {
            ImportStatus::Error(msg) => Some(msg.clone()),
            _ => None,
        })
        .collect();

    println!(
        "{}: {} new, {} duplicate, {} with errors",
        file.display(),
        new_count,
        dup_count,
        error_entries.len()
    );
    for msg in &error_entries {
        println!("  skipped: {}", msg);
    }

    if dry_run {
        println!("Dry run; nothing was imported.");
        return Ok(());
    }

    let result = service.import_from_preview(&preview)?;
    println!(
        "Imported {} expenses ({} duplicates skipped, {} errors).",
        result.imported, result.duplicates_skipped, result.errors
    );

    Ok(())
}
