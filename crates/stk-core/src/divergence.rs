//! # Divergence Computation
//!
//! Reconciles what was counted against what the reference list says should
//! be on hand. Scanned quantities are joined to reference rows on the
//! **normalized** code, so `0012` scanned against a reference `12` counts.
//!
//! The sign convention is `difference = actual - expected`: positive is a
//! surplus, negative a shortage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::code::normalize;
use crate::entry::{ProductReference, ScanEntry};

/// One reconciled reference row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivergenceItem {
    /// Reference code, as written in the reference file.
    pub code: String,
    /// Reference product name.
    pub name: String,
    /// Quantity the reference list expects.
    pub expected_quantity: u64,
    /// Quantity actually scanned.
    pub actual_quantity: u64,
    /// `actual - expected`.
    pub difference: i64,
}

/// Whether a row balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceStatus {
    /// Counted exactly what was expected.
    Match,
    /// Counted more than expected.
    Surplus,
    /// Counted less than expected.
    Shortage,
}

impl DivergenceItem {
    /// Classify the row by the sign of its difference.
    pub fn status(&self) -> DivergenceStatus {
        match self.difference {
            0 => DivergenceStatus::Match,
            d if d > 0 => DivergenceStatus::Surplus,
            _ => DivergenceStatus::Shortage,
        }
    }
}

/// Organization-wide figures over a divergence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivergenceTotals {
    /// Sum of expected quantities.
    pub total_expected: u64,
    /// Sum of scanned quantities.
    pub total_actual: u64,
    /// `total_actual - total_expected`.
    pub total_difference: i64,
}

/// Compare scanned quantities against every reference product.
///
/// The result follows the reference list's order. Rows where both the
/// expected and the scanned quantity are zero are dropped. Scanned codes that
/// match no reference row do not appear.
pub fn compute_divergences(
    entries: &[ScanEntry],
    references: &[ProductReference],
) -> Vec<DivergenceItem> {
    let mut actual: HashMap<String, u64> = HashMap::new();
    for entry in entries {
        let total = actual.entry(normalize(&entry.code)).or_insert(0);
        *total = total.saturating_add(entry.quantity);
    }

    let items: Vec<DivergenceItem> = references
        .iter()
        .map(|product| {
            let actual_quantity = actual.get(&normalize(&product.code)).copied().unwrap_or(0);
            let expected_quantity = product.expected_quantity();
            DivergenceItem {
                code: product.code.clone(),
                name: product.name.clone(),
                expected_quantity,
                actual_quantity,
                difference: signed(actual_quantity) - signed(expected_quantity),
            }
        })
        .filter(|item| item.expected_quantity > 0 || item.actual_quantity > 0)
        .collect();

    tracing::debug!(
        references = references.len(),
        rows = items.len(),
        "computed divergences"
    );
    items
}

/// Sum the expected and scanned columns of a divergence list.
pub fn totals(items: &[DivergenceItem]) -> DivergenceTotals {
    let total_expected = items
        .iter()
        .fold(0u64, |acc, i| acc.saturating_add(i.expected_quantity));
    let total_actual = items
        .iter()
        .fold(0u64, |acc, i| acc.saturating_add(i.actual_quantity));
    DivergenceTotals {
        total_expected,
        total_actual,
        total_difference: signed(total_actual) - signed(total_expected),
    }
}

fn signed(q: u64) -> i64 {
    i64::try_from(q).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, quantity: u64) -> ScanEntry {
        ScanEntry::new(code, quantity).unwrap()
    }

    fn product(code: &str, name: &str, quantity: Option<u64>) -> ProductReference {
        ProductReference {
            code: code.to_string(),
            name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn surplus_and_shortage_signs() {
        let entries = vec![entry("1", 7), entry("2", 3)];
        let refs = vec![product("1", "Surplus", Some(5)), product("2", "Short", Some(5))];
        let items = compute_divergences(&entries, &refs);
        assert_eq!(items[0].difference, 2);
        assert_eq!(items[0].status(), DivergenceStatus::Surplus);
        assert_eq!(items[1].difference, -2);
        assert_eq!(items[1].status(), DivergenceStatus::Shortage);
    }

    #[test]
    fn zero_zero_rows_are_dropped() {
        let refs = vec![product("1", "Nothing", None), product("2", "Expected", Some(4))];
        let items = compute_divergences(&[], &refs);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "2");
        assert_eq!(items[0].actual_quantity, 0);
        assert_eq!(items[0].difference, -4);
    }

    #[test]
    fn join_is_on_normalized_code() {
        let entries = vec![entry("0012", 3), entry("12", 2), entry(" 000012", 1)];
        let refs = vec![product("00000000000012", "Widget", Some(6))];
        let items = compute_divergences(&entries, &refs);
        assert_eq!(items[0].actual_quantity, 6);
        assert_eq!(items[0].status(), DivergenceStatus::Match);
        // The reference's own spelling is reported.
        assert_eq!(items[0].code, "00000000000012");
    }

    #[test]
    fn order_follows_reference_list() {
        let entries = vec![entry("3", 1), entry("1", 1), entry("2", 1)];
        let refs = vec![product("2", "b", None), product("3", "c", None), product("1", "a", None)];
        let codes: Vec<_> = compute_divergences(&entries, &refs)
            .into_iter()
            .map(|i| i.code)
            .collect();
        assert_eq!(codes, vec!["2", "3", "1"]);
    }

    #[test]
    fn unreferenced_scans_do_not_appear() {
        let entries = vec![entry("99", 10)];
        let refs = vec![product("1", "a", Some(1))];
        let items = compute_divergences(&entries, &refs);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].actual_quantity, 0);
    }

    #[test]
    fn totals_sum_columns() {
        let entries = vec![entry("1", 7), entry("2", 3)];
        let refs = vec![product("1", "a", Some(5)), product("2", "b", Some(5))];
        let t = totals(&compute_divergences(&entries, &refs));
        assert_eq!(t.total_expected, 10);
        assert_eq!(t.total_actual, 10);
        assert_eq!(t.total_difference, 0);
    }

    #[test]
    fn huge_counts_saturate() {
        let entries = vec![entry("1", u64::MAX), entry("001", 4)];
        let refs = vec![product("1", "a", Some(1)), product("2", "b", Some(u64::MAX))];
        let items = compute_divergences(&entries, &refs);
        assert_eq!(items[0].actual_quantity, u64::MAX);
        assert_eq!(items[0].difference, i64::MAX - 1);

        let t = totals(&items);
        assert_eq!(t.total_expected, u64::MAX);
        assert_eq!(t.total_actual, u64::MAX);
        assert_eq!(t.total_difference, 0);
    }

    #[test]
    fn item_serializes_camel_case() {
        let items = compute_divergences(&[entry("1", 1)], &[product("1", "a", None)]);
        let v = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(v["expectedQuantity"], 0);
        assert_eq!(v["actualQuantity"], 1);
    }
}
