//! # Reference List Import
//!
//! Parses the plain-text product file an operator loads before a count.
//! One product per line:
//!
//! ```text
//! code<delim>name[<delim>quantity]
//! ```
//!
//! The quantity column is read only when [`ImportOptions::include_quantity`]
//! is set; otherwise products carry no expected quantity.

use serde::{Deserialize, Serialize};

use crate::entry::ProductReference;
use crate::error::ValidationError;

/// Placeholder name for rows without a name column.
pub const MISSING_NAME: &str = "-";

/// How to split a reference file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Field separator.
    pub delimiter: String,
    /// Read the third column as the expected quantity.
    pub include_quantity: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            include_quantity: false,
        }
    }
}

/// Parse a reference file into products, in file order.
///
/// Fields are trimmed and blank lines skipped. A leading UTF-8 byte-order
/// mark is ignored. The quantity column reads its leading digits (`"5 un"`
/// is 5); a column with no leading digits reads as zero. Rows with an empty
/// code are skipped.
///
/// # Errors
///
/// - [`ValidationError::EmptyDelimiter`] if the delimiter is empty.
/// - [`ValidationError::EmptyImport`] if no product rows remain.
pub fn parse_reference_list(
    text: &str,
    options: &ImportOptions,
) -> Result<Vec<ProductReference>, ValidationError> {
    if options.delimiter.is_empty() {
        return Err(ValidationError::EmptyDelimiter);
    }

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut products = Vec::new();

    for (line_no, line) in text.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(options.delimiter.as_str()).map(str::trim).collect();

        let code = parts[0];
        if code.is_empty() {
            tracing::warn!(line = line_no + 1, "skipping reference row with empty code");
            continue;
        }

        let name = match parts.get(1) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => MISSING_NAME.to_string(),
        };

        let quantity = if options.include_quantity && parts.len() >= 3 {
            Some(leading_quantity(parts[2]))
        } else {
            None
        };

        products.push(ProductReference {
            code: code.to_string(),
            name,
            quantity,
        });
    }

    if products.is_empty() {
        return Err(ValidationError::EmptyImport);
    }
    Ok(products)
}

/// Leading decimal digits of `field`, after an optional `+`.
///
/// No digits reads as 0, including negative values. Saturates at `u64::MAX`.
fn leading_quantity(field: &str) -> u64 {
    let digits = field.strip_prefix('+').unwrap_or(field);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    digits[..end].parse().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(delimiter: &str, include_quantity: bool) -> ImportOptions {
        ImportOptions {
            delimiter: delimiter.to_string(),
            include_quantity,
        }
    }

    #[test]
    fn parses_code_and_name() {
        let text = "7891000315507;Coffee 500g\n0012;Soap\n";
        let products = parse_reference_list(text, &opts(";", false)).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].code, "7891000315507");
        assert_eq!(products[0].name, "Coffee 500g");
        assert_eq!(products[0].quantity, None);
        assert_eq!(products[1].code, "0012");
    }

    #[test]
    fn quantity_column_only_when_enabled() {
        let text = "1,A,5\n2,B,abc\n3,C";
        let with = parse_reference_list(text, &opts(",", true)).unwrap();
        assert_eq!(with[0].quantity, Some(5));
        assert_eq!(with[1].quantity, Some(0));
        assert_eq!(with[2].quantity, None);

        let without = parse_reference_list(text, &opts(",", false)).unwrap();
        assert!(without.iter().all(|p| p.quantity.is_none()));
    }

    #[test]
    fn quantity_reads_leading_digits() {
        let text = "1;A;5 un\n2;B;+7\n3;C;12.9\n4;D;-3\n5;E;x4\n6;F;99999999999999999999999";
        let q: Vec<Option<u64>> = parse_reference_list(text, &opts(";", true))
            .unwrap()
            .into_iter()
            .map(|p| p.quantity)
            .collect();
        assert_eq!(
            q,
            vec![Some(5), Some(7), Some(12), Some(0), Some(0), Some(u64::MAX)]
        );
    }

    #[test]
    fn trims_fields_and_handles_crlf_and_bom() {
        let text = "\u{feff} 12 ; Soap \r\n\r\n 34 \r\n";
        let products = parse_reference_list(text, &opts(";", false)).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].code, "12");
        assert_eq!(products[0].name, "Soap");
        assert_eq!(products[1].name, MISSING_NAME);
    }

    #[test]
    fn multi_character_delimiter() {
        let products = parse_reference_list("12||Soap||3", &opts("||", true)).unwrap();
        assert_eq!(products[0].name, "Soap");
        assert_eq!(products[0].quantity, Some(3));
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(
            parse_reference_list("\n  \n", &opts(";", false)),
            Err(ValidationError::EmptyImport)
        );
        assert_eq!(
            parse_reference_list("12;a", &opts("", false)),
            Err(ValidationError::EmptyDelimiter)
        );
        assert_eq!(
            parse_reference_list(";name only", &opts(";", false)),
            Err(ValidationError::EmptyImport)
        );
    }
}
