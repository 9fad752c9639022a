//! Divergence report export: BOM, a header row, then one row per item.

use stk_core::{DivergenceItem, ValidationError};

use crate::codec::{ExportFile, ExportFormat, BOM};

/// Header columns, joined with the chosen delimiter.
pub const REPORT_COLUMNS: [&str; 5] = ["Code", "Product", "Expected", "Scanned", "Difference"];

/// Encode a divergence list. The difference column is signed.
pub fn encode_divergences(
    items: &[DivergenceItem],
    delimiter: &str,
    format: ExportFormat,
) -> Result<ExportFile, ValidationError> {
    if delimiter.is_empty() {
        return Err(ValidationError::EmptyDelimiter);
    }

    let header = REPORT_COLUMNS.join(delimiter);
    let rows = items
        .iter()
        .map(|item| {
            [
                item.code.clone(),
                item.name.clone(),
                item.expected_quantity.to_string(),
                item.actual_quantity.to_string(),
                item.difference.to_string(),
            ]
            .join(delimiter)
        })
        .collect::<Vec<_>>()
        .join("\n");

    tracing::debug!(rows = items.len(), %format, "divergence report encoded");
    Ok(ExportFile::from_text(
        format!("{BOM}{header}\n{rows}"),
        format,
    ))
}
