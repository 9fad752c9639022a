//! # Inventory Export Codec
//!
//! ## Format
//!
//! ```text
//! \u{feff}00000000000012;5
//! 00000000000034;1
//! ```
//!
//! 1. Entries are merged by normalized code in first-seen order.
//! 2. Each code is left-padded with `0` to 14 characters.
//! 3. Each row is `code + delimiter + quantity`; the quantity is
//!    left-padded with `0` to `quantity_padding` digits when that is > 0.
//! 4. Rows are joined by `\n` with no trailing newline, and the payload
//!    starts with the UTF-8 BOM.
//!
//! [`decode`] reads such a file back to normalized codes and quantities.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;

use stk_core::{normalize, pad_code, ScanEntry, ValidationError};

use crate::error::ExportError;

/// Byte-order mark prefixed to every export.
pub const BOM: char = '\u{feff}';

/// File flavour. Only the MIME type and extension differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Txt,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Txt => "text/plain;charset=utf-8",
            Self::Csv => "text/csv;charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How to render an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: String,
    pub format: ExportFormat,
    /// Minimum quantity width; 0 disables padding.
    pub quantity_padding: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            format: ExportFormat::Txt,
            quantity_padding: 0,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.delimiter.is_empty() {
            return Err(ValidationError::EmptyDelimiter);
        }
        Ok(())
    }
}

/// Encoded file contents, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
}

impl ExportFile {
    pub(crate) fn from_text(text: String, format: ExportFormat) -> Self {
        Self {
            bytes: text.into_bytes(),
            format,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Contents as text, BOM included.
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// One merged export row. `code` is normalized (unpadded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub code: String,
    pub quantity: u64,
}

/// Merge entries by normalized code, keeping first-seen order.
pub fn aggregate_normalized(entries: &[ScanEntry]) -> Vec<ExportRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<ExportRow> = Vec::new();

    for entry in entries {
        let code = entry.normalized_code();
        match index.get(&code).copied() {
            Some(i) => rows[i].quantity = rows[i].quantity.saturating_add(entry.quantity),
            None => {
                index.insert(code.clone(), rows.len());
                rows.push(ExportRow {
                    code,
                    quantity: entry.quantity,
                });
            }
        }
    }
    rows
}

/// Encode entries as an inventory export.
pub fn encode(entries: &[ScanEntry], options: &ExportOptions) -> Result<ExportFile, ValidationError> {
    options.validate()?;

    let rows = aggregate_normalized(entries);
    let body = rows
        .iter()
        .map(|row| {
            format!(
                "{}{}{:0>width$}",
                pad_code(&row.code),
                options.delimiter,
                row.quantity,
                width = options.quantity_padding
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    tracing::debug!(
        rows = rows.len(),
        format = %options.format,
        "inventory export encoded"
    );
    Ok(ExportFile::from_text(format!("{BOM}{body}"), options.format))
}

/// Read an inventory export back into normalized rows.
///
/// A leading BOM and blank lines are ignored. Each row is split at the
/// first occurrence of `delimiter`.
pub fn decode(bytes: &[u8], delimiter: &str) -> Result<Vec<ExportRow>, ExportError> {
    if delimiter.is_empty() {
        return Err(ValidationError::EmptyDelimiter.into());
    }
    let text = std::str::from_utf8(bytes).map_err(|e| ExportError::MalformedRow {
        line: 0,
        reason: format!("not UTF-8: {e}"),
    })?;
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut rows = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let (code, quantity) =
            line.split_once(delimiter)
                .ok_or_else(|| ExportError::MalformedRow {
                    line: i + 1,
                    reason: format!("missing delimiter {delimiter:?}"),
                })?;
        let quantity = quantity
            .trim()
            .parse::<u64>()
            .map_err(|e| ExportError::MalformedRow {
                line: i + 1,
                reason: format!("quantity {quantity:?}: {e}"),
            })?;
        rows.push(ExportRow {
            code: normalize(code),
            quantity,
        });
    }
    Ok(rows)
}

/// `<prefix>_<YYYYMMDD>_<HHMM>.<ext>` for a wall-clock time.
pub fn export_filename(prefix: &str, at: NaiveDateTime, format: ExportFormat) -> String {
    format!(
        "{prefix}_{}.{}",
        at.format("%Y%m%d_%H%M"),
        format.extension()
    )
}
