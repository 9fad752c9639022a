//! # Inventory Session
//!
//! [`Inventory`] owns the mutable state of one counting session: scan
//! entries, the reference product list, check-mode progress, the issuer
//! registry and the active license key. It loads everything once from a
//! [`Store`] and persists the affected blob after every successful mutation.
//! A rejected operation changes nothing in memory or on disk. Each mutation
//! is staged on a copy and adopted only once the store accepted the write,
//! so a [`StoreError`] leaves memory as it was.
//!
//! ## Equality Keys
//!
//! Summary operations (`summaries`, `set_summary_total`, `delete_summary`)
//! use the raw code. Product lookup, check-mode progress and divergence use
//! the normalized code.

use stk_core::{
    compute_divergences, find_product, find_summary, grand_total, normalize,
    parse_reference_list, redistribute, remove_code, summarize, validate_quantity, CodeSummary,
    DivergenceItem, EntryId, GrandTotal, ImportOptions, LicenseId, ProductReference, ScanEntry,
    Timestamp,
};
use stk_license::{CheckReason, LicenseCheck, LicenseRegistry, LicenseService, SystemLicense};

use crate::backend::Store;
use crate::blob::{load, save};
use crate::error::{InventoryError, StoreError};
use crate::keys::StoreKey;

/// Result of a check-mode scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The code is on the reference list.
    Matched {
        entry: ScanEntry,
        product: ProductReference,
        remaining: usize,
    },
    /// The code is not on the list and was recorded on confirmation.
    Unlisted { entry: ScanEntry, remaining: usize },
}

impl CheckOutcome {
    pub fn entry(&self) -> &ScanEntry {
        match self {
            Self::Matched { entry, .. } | Self::Unlisted { entry, .. } => entry,
        }
    }

    pub fn remaining(&self) -> usize {
        match self {
            Self::Matched { remaining, .. } | Self::Unlisted { remaining, .. } => *remaining,
        }
    }
}

/// One counting session over a [`Store`].
#[derive(Debug)]
pub struct Inventory<S: Store> {
    store: S,
    entries: Vec<ScanEntry>,
    products: Vec<ProductReference>,
    scanned: Vec<String>,
    registry: LicenseRegistry,
    license_key: Option<String>,
}

impl<S: Store> Inventory<S> {
    /// Load every blob from `store`. Corrupted blobs load as empty.
    pub fn open(mut store: S) -> Result<Self, StoreError> {
        let entries: Vec<ScanEntry> = load(&mut store, StoreKey::Entries)?;
        let products: Vec<ProductReference> = load(&mut store, StoreKey::Products)?;
        let scanned: Vec<String> = load(&mut store, StoreKey::ScannedCodes)?;
        let registry: LicenseRegistry = load(&mut store, StoreKey::Registry)?;
        let license_key: Option<String> = load(&mut store, StoreKey::ActiveLicense)?;
        tracing::debug!(
            backend = store.backend_name(),
            entries = entries.len(),
            products = products.len(),
            licenses = registry.len(),
            "inventory loaded"
        );
        Ok(Self {
            store,
            entries,
            products,
            scanned,
            registry,
            license_key,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ─── Entries ────────────────────────────────────────────────────────

    /// Entries in submission order.
    pub fn entries(&self) -> &[ScanEntry] {
        &self.entries
    }

    /// Append a new entry.
    pub fn add_entry(&mut self, code: &str, quantity: u64) -> Result<ScanEntry, InventoryError> {
        let entry = ScanEntry::new(code, quantity)?;
        let mut next = self.entries.clone();
        next.push(entry.clone());
        self.commit_entries(next)?;
        tracing::info!(id = %entry.id, code = %entry.code, quantity, "entry added");
        Ok(entry)
    }

    /// Set one entry's quantity. `Ok(false)` if no entry has `id`.
    pub fn update_entry(&mut self, id: EntryId, quantity: u64) -> Result<bool, InventoryError> {
        validate_quantity(quantity)?;
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let mut next = self.entries.clone();
        next[pos].quantity = quantity;
        self.commit_entries(next)?;
        tracing::info!(%id, quantity, "entry updated");
        Ok(true)
    }

    /// Delete one entry. `Ok(false)` if no entry has `id`.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<bool, InventoryError> {
        let next: Vec<ScanEntry> = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        if next.len() == self.entries.len() {
            return Ok(false);
        }
        self.commit_entries(next)?;
        tracing::info!(%id, "entry deleted");
        Ok(true)
    }

    /// Drop every entry and the check-mode progress.
    pub fn reset_entries(&mut self) -> Result<usize, InventoryError> {
        let removed = self.entries.len();
        self.commit_entries(Vec::new())?;
        self.store.remove(StoreKey::ScannedCodes)?;
        self.scanned.clear();
        tracing::info!(removed, "entries reset");
        Ok(removed)
    }

    // ─── Summaries ──────────────────────────────────────────────────────

    /// Per raw code, first-seen order.
    pub fn summaries(&self) -> Vec<CodeSummary> {
        summarize(&self.entries)
    }

    pub fn find_summary(&self, code: &str) -> Option<CodeSummary> {
        find_summary(&self.entries, code)
    }

    pub fn grand_total(&self) -> GrandTotal {
        grand_total(&self.summaries())
    }

    /// Spread `total` over the entries with raw code `code`.
    ///
    /// Returns the number of entries touched; 0 leaves storage alone.
    pub fn set_summary_total(&mut self, code: &str, total: u64) -> Result<usize, InventoryError> {
        let mut next = self.entries.clone();
        let touched = redistribute(&mut next, code, total)?;
        if touched > 0 {
            self.commit_entries(next)?;
            tracing::info!(code, total, touched, "summary total set");
        }
        Ok(touched)
    }

    /// Delete every entry with raw code `code`.
    pub fn delete_summary(&mut self, code: &str) -> Result<usize, InventoryError> {
        let mut next = self.entries.clone();
        let removed = remove_code(&mut next, code);
        if removed > 0 {
            self.commit_entries(next)?;
            tracing::info!(code, removed, "summary deleted");
        }
        Ok(removed)
    }

    // ─── Reference products ─────────────────────────────────────────────

    pub fn products(&self) -> &[ProductReference] {
        &self.products
    }

    /// Replace the reference list from import text. Resets check progress.
    pub fn import_products(
        &mut self,
        text: &str,
        options: &ImportOptions,
    ) -> Result<usize, InventoryError> {
        let products = parse_reference_list(text, options)?;
        let count = products.len();
        save(&mut self.store, StoreKey::Products, &products)?;
        self.products = products;
        self.store.remove(StoreKey::ScannedCodes)?;
        self.scanned.clear();
        tracing::info!(count, delimiter = %options.delimiter, "products imported");
        Ok(count)
    }

    /// Drop the reference list and check progress.
    pub fn clear_products(&mut self) -> Result<(), InventoryError> {
        self.store.remove(StoreKey::Products)?;
        self.products.clear();
        self.store.remove(StoreKey::ScannedCodes)?;
        self.scanned.clear();
        tracing::info!("products cleared");
        Ok(())
    }

    pub fn find_product(&self, code: &str) -> Option<&ProductReference> {
        find_product(&self.products, code)
    }

    // ─── Check mode ─────────────────────────────────────────────────────

    /// Normalized codes seen in check mode, first-seen order.
    pub fn scanned_codes(&self) -> &[String] {
        &self.scanned
    }

    /// Products on the list minus distinct codes seen. Never negative.
    pub fn remaining(&self) -> usize {
        self.products.len().saturating_sub(self.scanned.len())
    }

    /// Record a scan against the reference list.
    ///
    /// A code missing from the list is refused with
    /// [`InventoryError::UnknownCode`] unless `accept_unlisted` is set.
    pub fn check_scan(
        &mut self,
        code: &str,
        quantity: u64,
        accept_unlisted: bool,
    ) -> Result<CheckOutcome, InventoryError> {
        let entry = ScanEntry::new(code, quantity)?;
        let product = self.find_product(&entry.code).cloned();
        if product.is_none() && !accept_unlisted {
            return Err(InventoryError::UnknownCode(entry.code));
        }

        let mut entries = self.entries.clone();
        entries.push(entry.clone());
        let mut scanned = self.scanned.clone();
        let normalized = entry.normalized_code();
        if !scanned.contains(&normalized) {
            scanned.push(normalized);
        }

        save(&mut self.store, StoreKey::Entries, &entries)?;
        if let Err(e) = save(&mut self.store, StoreKey::ScannedCodes, &scanned) {
            // Put the entries blob back so the two blobs stay in step.
            if let Err(restore) = save(&mut self.store, StoreKey::Entries, &self.entries) {
                tracing::warn!(error = %restore, "entries blob not restored after failed check scan");
            }
            return Err(e.into());
        }
        self.entries = entries;
        self.scanned = scanned;

        let remaining = self.remaining();
        tracing::info!(
            code = %entry.code,
            quantity,
            listed = product.is_some(),
            remaining,
            "check scan recorded"
        );
        Ok(match product {
            Some(product) => CheckOutcome::Matched {
                entry,
                product,
                remaining,
            },
            None => CheckOutcome::Unlisted { entry, remaining },
        })
    }

    /// Expected vs counted, over the reference list.
    pub fn divergences(&self) -> Vec<DivergenceItem> {
        compute_divergences(&self.entries, &self.products)
    }

    // ─── Licensing ──────────────────────────────────────────────────────

    pub fn registry(&self) -> &LicenseRegistry {
        &self.registry
    }

    /// Issue a new license and record it in the registry.
    pub fn issue_license(
        &mut self,
        service: &LicenseService,
        client_name: &str,
        duration_days: u32,
        now: Timestamp,
    ) -> Result<SystemLicense, InventoryError> {
        let mut registry = self.registry.clone();
        let record = service.issue(&mut registry, client_name, duration_days, now)?;
        save(&mut self.store, StoreKey::Registry, &registry)?;
        self.registry = registry;
        Ok(record)
    }

    /// Remove a license record. `Ok(None)` if no record has `id`.
    pub fn revoke_license(
        &mut self,
        id: LicenseId,
    ) -> Result<Option<SystemLicense>, InventoryError> {
        let mut registry = self.registry.clone();
        let removed = registry.revoke(id);
        if removed.is_some() {
            save(&mut self.store, StoreKey::Registry, &registry)?;
            self.registry = registry;
        }
        Ok(removed)
    }

    /// The stored active key, if any.
    pub fn license_key(&self) -> Option<&str> {
        self.license_key.as_deref()
    }

    /// Validate `key` and store it as the active key if valid.
    pub fn activate_license(
        &mut self,
        service: &LicenseService,
        key: &str,
        now: Timestamp,
    ) -> Result<LicenseCheck, InventoryError> {
        let key = key.trim();
        let check = service.validate(key, &self.registry, now);
        if !check.is_valid {
            tracing::warn!(reason = ?check.reason, "license activation refused");
            return Err(InventoryError::Rejected(check.reason));
        }
        let stored = Some(key.to_string());
        save(&mut self.store, StoreKey::ActiveLicense, &stored)?;
        self.license_key = stored;
        tracing::info!(admin = check.is_admin, "license activated");
        Ok(check)
    }

    /// Re-validate the stored key. [`CheckReason::Missing`] when none is stored.
    pub fn license_status(&self, service: &LicenseService, now: Timestamp) -> LicenseCheck {
        match &self.license_key {
            Some(key) => service.validate(key, &self.registry, now),
            None => LicenseCheck::rejected(CheckReason::Missing),
        }
    }

    /// Forget the active key.
    pub fn clear_license(&mut self) -> Result<(), InventoryError> {
        self.store.remove(StoreKey::ActiveLicense)?;
        self.license_key = None;
        tracing::info!("active license cleared");
        Ok(())
    }

    // ─── Whole session ──────────────────────────────────────────────────

    /// Wipe every blob, including the registry and active key.
    pub fn clear_all(&mut self) -> Result<(), InventoryError> {
        self.store.clear()?;
        self.entries.clear();
        self.products.clear();
        self.scanned.clear();
        self.registry = LicenseRegistry::new();
        self.license_key = None;
        tracing::info!("all stored data cleared");
        Ok(())
    }

    /// Persist `next` as the entry list, then adopt it.
    fn commit_entries(&mut self, next: Vec<ScanEntry>) -> Result<(), StoreError> {
        save(&mut self.store, StoreKey::Entries, &next)?;
        self.entries = next;
        Ok(())
    }
}
