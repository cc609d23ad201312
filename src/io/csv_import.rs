use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{ConstraintSeries, Sample};

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Time,
    Value,
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "name" | "constraint" | "pcf" | "label" => Some(Column::Name),
        "tjd" | "time" | "day" | "daycount" | "start" => Some(Column::Time),
        "value" | "priority" | "pri" | "level" => Some(Column::Value),
        _ => None,
    }
}

/// Import one constraint from a CSV file with `tjd` and `value` columns.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches headers loosely.
/// The constraint is named by a `name` column if present, otherwise by the
/// file stem. Returns `(series, skipped_rows)`.
pub fn import_constraint_csv(path: &Path, first_day: f64) -> Result<(ConstraintSeries, usize)> {
    let content = std::fs::read_to_string(path)?;
    let fallback_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported Constraint")
        .to_string();
    parse_constraint_csv(&content, &fallback_name, first_day)
}

fn parse_constraint_csv(
    content: &str,
    fallback_name: &str,
    first_day: f64,
) -> Result<(ConstraintSeries, usize)> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let columns: Vec<Option<Column>> = reader
        .headers()?
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let has = |col: Column| columns.iter().any(|c| *c == Some(col));
    if !has(Column::Time) || !has(Column::Value) {
        return Err(Error::EmptyImport(format!(
            "{}: missing 'tjd' or 'value' column",
            fallback_name
        )));
    }

    let mut name: Option<String> = None;
    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut day = None;
        let mut value = None;
        for (field, column) in record.iter().zip(columns.iter()) {
            match column {
                Some(Column::Name) if name.is_none() && !field.is_empty() => {
                    name = Some(field.to_string());
                }
                Some(Column::Time) => day = field.parse::<f64>().ok(),
                Some(Column::Value) => value = field.parse::<f64>().ok(),
                _ => {}
            }
        }

        match (day, value) {
            (Some(day), Some(value)) => samples.push(Sample::new(day, value)),
            _ => {
                log::warn!("Skipping CSV row {}: unreadable tjd or value", i + 2);
                skipped += 1;
            }
        }
    }

    if samples.is_empty() {
        return Err(Error::EmptyImport(format!(
            "{} ({} rows skipped)",
            fallback_name, skipped
        )));
    }

    let series = ConstraintSeries::new(
        name.unwrap_or_else(|| fallback_name.to_string()),
        samples,
        first_day,
    )?;
    Ok((series, skipped))
}
