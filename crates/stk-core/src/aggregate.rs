//! # Summary Aggregation
//!
//! Folds the raw entry list into one [`CodeSummary`] per distinct code and
//! implements the reverse edit: setting a summary's total spreads the new
//! value back over the entries it was built from.
//!
//! Summaries group by the **raw** code string. `0012` and `12` produce two
//! rows here even though reconciliation and export treat them as one code.
//!
//! ## Invariant
//!
//! For every summary `s`, `s.total_quantity` equals the sum of quantities of
//! the entries whose code is exactly `s.original_code`. Summaries are never
//! stored; callers recompute them after each mutation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entry::ScanEntry;
use crate::error::ValidationError;

/// Per-code aggregate of scan entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSummary {
    /// The code as first seen in the entry list.
    pub original_code: String,
    /// Sum of quantities across matching entries.
    pub total_quantity: u64,
    /// Number of matching entries.
    pub occurrences: usize,
}

/// Header figures for the summary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandTotal {
    /// Number of distinct raw codes.
    pub distinct_codes: usize,
    /// Sum of all quantities.
    pub total_quantity: u64,
}

/// Group entries by raw code, in order of first occurrence.
///
/// Totals saturate at `u64::MAX`.
pub fn summarize(entries: &[ScanEntry]) -> Vec<CodeSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CodeSummary> = Vec::new();

    for entry in entries {
        match index.get(entry.code.as_str()).copied() {
            Some(i) => {
                let s = &mut summaries[i];
                s.total_quantity = s.total_quantity.saturating_add(entry.quantity);
                s.occurrences += 1;
            }
            None => {
                index.insert(entry.code.as_str(), summaries.len());
                summaries.push(CodeSummary {
                    original_code: entry.code.clone(),
                    total_quantity: entry.quantity,
                    occurrences: 1,
                });
            }
        }
    }

    summaries
}

/// Look up the summary for an exact raw code.
pub fn find_summary(entries: &[ScanEntry], code: &str) -> Option<CodeSummary> {
    let code = code.trim();
    summarize(entries)
        .into_iter()
        .find(|s| s.original_code == code)
}

/// Distinct-code count and overall quantity of a summary list.
pub fn grand_total(summaries: &[CodeSummary]) -> GrandTotal {
    GrandTotal {
        distinct_codes: summaries.len(),
        total_quantity: summaries
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.total_quantity)),
    }
}

/// Spread `new_total` evenly over the entries whose raw code is `code`.
///
/// With `count` matching entries, each gets `new_total / count`, and the
/// first `new_total % count` of them (in list order) get one more. The
/// code's total afterwards is exactly `new_total`.
///
/// Returns the number of entries rewritten; zero means no entry matched and
/// nothing changed.
///
/// # Errors
///
/// [`ValidationError::ZeroTotal`] if `new_total` is zero. Nothing changes.
pub fn redistribute(
    entries: &mut [ScanEntry],
    code: &str,
    new_total: u64,
) -> Result<usize, ValidationError> {
    if new_total == 0 {
        return Err(ValidationError::ZeroTotal);
    }

    let count = entries.iter().filter(|e| e.code == code).count();
    if count == 0 {
        return Ok(0);
    }

    let base = new_total / count as u64;
    let remainder = (new_total % count as u64) as usize;

    for (rank, entry) in entries.iter_mut().filter(|e| e.code == code).enumerate() {
        entry.quantity = if rank < remainder { base + 1 } else { base };
    }

    tracing::debug!(code, new_total, count, base, remainder, "redistributed summary total");
    Ok(count)
}

/// Remove every entry whose raw code is `code`. Returns how many were removed.
pub fn remove_code(entries: &mut Vec<ScanEntry>, code: &str) -> usize {
    let before = entries.len();
    entries.retain(|e| e.code != code);
    before - entries.len()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn entries_strategy() -> impl Strategy<Value = Vec<ScanEntry>> {
        prop::collection::vec(("[0-3]{1,3}", 1u64..50), 0..40).prop_map(|rows| {
            rows.into_iter()
                .map(|(code, qty)| ScanEntry::new(&code, qty).unwrap())
                .collect()
        })
    }

    proptest! {
        /// Summaries conserve the total quantity of the entry list.
        #[test]
        fn summarize_conserves_quantity(entries in entries_strategy()) {
            let raw: u64 = entries.iter().map(|e| e.quantity).sum();
            let summarized: u64 = summarize(&entries).iter().map(|s| s.total_quantity).sum();
            prop_assert_eq!(raw, summarized);
        }

        /// Occurrence counts add up to the number of entries.
        #[test]
        fn summarize_counts_every_entry(entries in entries_strategy()) {
            let n: usize = summarize(&entries).iter().map(|s| s.occurrences).sum();
            prop_assert_eq!(n, entries.len());
        }

        /// Redistribution sets the code total exactly and spreads it within one unit.
        #[test]
        fn redistribute_preserves_total(
            mut entries in entries_strategy(),
            pick in 0usize..40,
            total in 1u64..500,
        ) {
            prop_assume!(!entries.is_empty());
            let code = entries[pick % entries.len()].code.clone();
            let before_other: u64 = entries.iter().filter(|e| e.code != code).map(|e| e.quantity).sum();

            redistribute(&mut entries, &code, total).unwrap();

            let matched: Vec<u64> = entries.iter().filter(|e| e.code == code).map(|e| e.quantity).collect();
            prop_assert_eq!(matched.iter().sum::<u64>(), total);
            let max = *matched.iter().max().unwrap();
            let min = *matched.iter().min().unwrap();
            prop_assert!(max - min <= 1);
            let after_other: u64 = entries.iter().filter(|e| e.code != code).map(|e| e.quantity).sum();
            prop_assert_eq!(before_other, after_other);
        }
    }
}
