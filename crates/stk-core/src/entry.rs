//! # Scan Entries and Reference Products
//!
//! A [`ScanEntry`] is one submission from the operator: a code and how many
//! units were counted. A [`ProductReference`] is one row of the imported
//! reference list that scanned quantities are reconciled against.

use serde::{Deserialize, Serialize};

use crate::code::normalize;
use crate::error::ValidationError;
use crate::identity::EntryId;

/// One scanned (or typed) barcode with its counted quantity.
///
/// `quantity` is at least 1 when created or edited directly. Redistributing
/// a small summary total over many entries may leave some at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    /// Opaque unique identifier.
    pub id: EntryId,
    /// The code exactly as submitted (after trimming).
    pub code: String,
    /// Units counted by this submission.
    pub quantity: u64,
}

impl ScanEntry {
    /// Create a new entry with a fresh id.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyCode`] if `code` is blank.
    /// - [`ValidationError::NonPositiveQuantity`] if `quantity` is zero.
    pub fn new(code: &str, quantity: u64) -> Result<Self, ValidationError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        validate_quantity(quantity)?;
        Ok(Self {
            id: EntryId::new(),
            code: code.to_string(),
            quantity,
        })
    }

    /// The normalized form of this entry's code.
    pub fn normalized_code(&self) -> String {
        normalize(&self.code)
    }
}

/// Reject zero as an operator-entered quantity.
pub fn validate_quantity(quantity: u64) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::NonPositiveQuantity(quantity));
    }
    Ok(())
}

/// A product from the imported reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReference {
    /// Product code as it appears in the reference file.
    pub code: String,
    /// Product description, `-` when the file had none.
    pub name: String,
    /// Expected on-hand quantity, present only when the file carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

impl ProductReference {
    /// Expected quantity, treating a missing column as zero.
    pub fn expected_quantity(&self) -> u64 {
        self.quantity.unwrap_or(0)
    }

    /// Whether `code` refers to this product once both are normalized.
    pub fn matches(&self, code: &str) -> bool {
        normalize(&self.code) == normalize(code)
    }
}

/// Find the first reference product whose normalized code equals `code`'s.
pub fn find_product<'a>(products: &'a [ProductReference], code: &str) -> Option<&'a ProductReference> {
    let key = normalize(code);
    products.iter().find(|p| normalize(&p.code) == key)
}
