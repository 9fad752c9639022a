//! # Barcode Normalization
//!
//! The same physical barcode reaches the system with different zero padding:
//! a 13-digit EAN typed by hand, the 14-digit GTIN from a supplier file, a
//! camera decode with a stray trailing space. [`normalize()`] maps all of
//! them to one key; [`pad_code()`] turns a key back into the fixed-width form
//! used in export files.

/// Conventional GTIN-14 width used when re-padding normalized codes.
pub const CODE_WIDTH: usize = 14;

/// Trim surrounding whitespace and strip leading `'0'` characters.
///
/// Whitespace uncovered by stripping zeros is stripped too (`"0 12"` becomes
/// `"12"`), which keeps the function idempotent. An all-zero code normalizes
/// to the empty string, so every all-zero code lands in the same
/// equivalence class.
pub fn normalize(code: &str) -> String {
    code.trim_end()
        .trim_start_matches(|c: char| c == '0' || c.is_whitespace())
        .to_string()
}

/// Left-pad a normalized code with `'0'` to [`CODE_WIDTH`] characters.
///
/// Codes already at least that wide are returned unchanged.
pub fn pad_code(normalized: &str) -> String {
    format!("{normalized:0>width$}", width = CODE_WIDTH)
}
