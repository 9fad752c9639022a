//! # Export Gate
//!
//! The only path that produces an inventory export. Checks run in a fixed
//! order and the first failure ends the export:
//!
//! 1. export options are valid (non-empty delimiter);
//! 2. a license key is stored and validates;
//! 3. the [`ConnectivityProbe`] reports the machine online;
//! 4. the [`RegistryCheck`] confirms the key has a current record, admin
//!    override keys included;
//! 5. the entries are encoded.
//!
//! The gate holds no mutable state and never touches storage, so a failed
//! export leaves everything as it was.

use std::sync::Arc;

use async_trait::async_trait;

use stk_core::{ScanEntry, Timestamp};
use stk_license::{LicenseRegistry, LicenseService};

use crate::codec::{encode, ExportFile, ExportOptions};
use crate::error::{ExportError, ProbeError};

/// Decides whether the machine is online.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn probe(&self) -> Result<(), ProbeError>;

    /// Human-readable name for this probe (for logging).
    fn name(&self) -> &str;
}

/// Confirms a license key against the issuer's records at export time.
#[async_trait]
pub trait RegistryCheck: Send + Sync {
    /// `Ok(true)` iff the key has a record expiring after `now`.
    async fn confirm(&self, key: &str, now: Timestamp) -> Result<bool, ExportError>;
}

/// [`RegistryCheck`] over a registry snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct LocalRegistryCheck {
    registry: LicenseRegistry,
}

impl LocalRegistryCheck {
    pub fn new(registry: LicenseRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl RegistryCheck for LocalRegistryCheck {
    async fn confirm(&self, key: &str, now: Timestamp) -> Result<bool, ExportError> {
        Ok(self.registry.confirm(key, now))
    }
}

/// License-gated export.
#[derive(Clone)]
pub struct ExportGate {
    service: Arc<LicenseService>,
    probe: Arc<dyn ConnectivityProbe>,
    registry_check: Arc<dyn RegistryCheck>,
}

impl ExportGate {
    pub fn new(
        service: Arc<LicenseService>,
        probe: Arc<dyn ConnectivityProbe>,
        registry_check: Arc<dyn RegistryCheck>,
    ) -> Self {
        Self {
            service,
            probe,
            registry_check,
        }
    }

    /// Run every check, then encode `entries`.
    ///
    /// `license_key` is the stored active key and `registry` the local
    /// registry it is validated against.
    pub async fn export(
        &self,
        license_key: Option<&str>,
        registry: &LicenseRegistry,
        entries: &[ScanEntry],
        options: &ExportOptions,
        now: Timestamp,
    ) -> Result<ExportFile, ExportError> {
        options.validate()?;

        let key = license_key.ok_or(ExportError::NoLicense)?;
        let check = self.service.validate(key, registry, now);
        if !check.is_valid {
            tracing::warn!(reason = ?check.reason, "export refused: license invalid");
            return Err(ExportError::License(check.reason));
        }

        if let Err(e) = self.probe.probe().await {
            tracing::warn!(probe = self.probe.name(), error = %e, "export refused: offline");
            return Err(e.into());
        }

        if !self.registry_check.confirm(key, now).await? {
            tracing::warn!("export refused: registry did not confirm license");
            return Err(ExportError::NotConfirmed);
        }

        let file = encode(entries, options)?;
        tracing::info!(
            entries = entries.len(),
            bytes = file.bytes.len(),
            format = %file.format,
            "inventory exported"
        );
        Ok(file)
    }
}

impl std::fmt::Debug for ExportGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportGate")
            .field("service", &self.service)
            .field("probe", &self.probe.name())
            .finish_non_exhaustive()
    }
}
