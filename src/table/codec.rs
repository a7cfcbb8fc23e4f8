// src/table/codec.rs
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;
use thiserror::Error;

use super::ParsedTable;

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush delimited text: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoded table is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decodes delimited text into a table.
///
/// The first non-blank line is the header. Physical lines that are empty after
/// trimming produce no record. Records are repaired leniently: short rows are
/// padded with empty strings and long rows are truncated to the header width,
/// so a field-count mismatch never fails the decode.
pub fn decode(text: &str) -> Result<ParsedTable, CodecError> {
    let body = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut located: Vec<(usize, StringRecord)> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let start = record.position().map(|p| p.byte() as usize).unwrap_or(0);
        located.push((start, record));
    }

    let mut lines = Vec::with_capacity(located.len());
    for (i, (start, record)) in located.iter().enumerate() {
        let end = located.get(i + 1).map(|(next, _)| *next).unwrap_or(body.len());
        let raw = body.get(*start..end).unwrap_or_default();
        if raw.trim().is_empty() {
            continue;
        }
        lines.push(record);
    }

    let mut lines = lines.into_iter();
    let Some(header_record) = lines.next() else {
        return Ok(ParsedTable::default());
    };

    let headers = unique_headers(header_record.iter().map(str::to_string).collect());
    let width = headers.len();

    let mut repaired = 0usize;
    let rows: Vec<Vec<String>> = lines
        .map(|record| {
            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
            if fields.len() != width {
                repaired += 1;
                fields.resize(width, String::new());
            }
            fields
        })
        .collect();

    if repaired > 0 {
        debug!("Repaired {} of {} rows to match {} header fields", repaired, rows.len(), width);
    }

    Ok(ParsedTable { headers, rows })
}

/// Encodes a table as `\n`-terminated delimited text, quoting only the fields
/// that need it.
pub fn encode(table: &ParsedTable) -> Result<String, CodecError> {
    if table.headers.is_empty() {
        return Ok(String::new());
    }

    let mut out = encode_line(&table.headers)?;
    for row in &table.rows {
        out.push_str(&encode_line(row)?);
    }
    Ok(out)
}

fn encode_line(fields: &[String]) -> Result<String, CodecError> {
    // A lone blank field would read back as a blank line and be skipped.
    if let [only] = fields {
        if only.trim().is_empty() {
            return Ok(format!("\"{}\"\n", only));
        }
    }

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(fields)?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        if !headers.contains(&name) {
            headers.push(name);
            continue;
        }
        let mut suffix = 1;
        let mut candidate = format!("{}_{}", name, suffix);
        while headers.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}_{}", name, suffix);
        }
        debug!("Renamed duplicate header '{}' to '{}'", name, candidate);
        headers.push(candidate);
    }
    headers
}
