//! # License Service
//!
//! Generation, validation and issuance of license keys.
//!
//! ## Key Format
//!
//! A key is the sealed JSON of a [`LicensePayload`]:
//!
//! ```json
//! {"expirationDate":"2026-04-01T12:00:00Z","uniqueId":"9f3c…(32 hex chars)"}
//! ```
//!
//! The random `uniqueId` makes every generated key distinct even for the
//! same expiration.
//!
//! ## Validation Order
//!
//! 1. Override literal → valid admin license, expiring in
//!    [`ADMIN_VALIDITY_YEARS`].
//! 2. Registry non-empty and key absent → invalid ([`CheckReason::NotInRegistry`]).
//! 3. Open and parse the payload; any failure → invalid
//!    ([`CheckReason::Undecryptable`]).
//! 4. Valid iff the expiration is strictly after `now`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stk_core::{LicenseId, Timestamp, ValidationError};

use crate::check::{CheckReason, LicenseCheck};
use crate::cipher::LicenseCipher;
use crate::error::LicenseError;
use crate::registry::{LicenseRegistry, SystemLicense};
use crate::secret::SecretProvider;

/// Years an admin override stays valid from the moment it is checked.
pub const ADMIN_VALIDITY_YEARS: u32 = 100;

/// Plaintext inside a license key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicensePayload {
    pub expiration_date: Timestamp,
    pub unique_id: String,
}

impl LicensePayload {
    /// A payload expiring at `expiration` with a fresh 128-bit unique id.
    pub fn new(expiration: Timestamp) -> Self {
        let bytes: [u8; 16] = rand::random();
        let unique_id = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Self {
            expiration_date: expiration,
            unique_id,
        }
    }
}

/// Issues and validates license keys under one [`SecretProvider`].
#[derive(Clone)]
pub struct LicenseService {
    secrets: Arc<dyn SecretProvider>,
    cipher: LicenseCipher,
}

impl LicenseService {
    pub fn new(secrets: Arc<dyn SecretProvider>) -> Result<Self, LicenseError> {
        let cipher = LicenseCipher::new(secrets.license_secret())?;
        tracing::debug!(provider = secrets.provider_name(), "license service ready");
        Ok(Self { secrets, cipher })
    }

    pub fn secrets(&self) -> &dyn SecretProvider {
        self.secrets.as_ref()
    }

    /// Generate a key valid for `duration_days` from `now`.
    pub fn generate(&self, duration_days: u32, now: Timestamp) -> Result<String, LicenseError> {
        if duration_days == 0 {
            return Err(ValidationError::ZeroDuration(duration_days).into());
        }
        let payload = LicensePayload::new(now.plus_days(i64::from(duration_days)));
        self.seal(&payload)
    }

    /// Seal an explicit payload.
    pub fn seal(&self, payload: &LicensePayload) -> Result<String, LicenseError> {
        let json = serde_json::to_vec(payload)?;
        Ok(self.cipher.seal(&json)?)
    }

    /// Open a key and parse its payload.
    pub fn open(&self, key: &str) -> Option<LicensePayload> {
        let plaintext = match self.cipher.open(key) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "license key did not open");
                return None;
            }
        };
        match serde_json::from_slice(&plaintext) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::debug!(error = %e, "license payload did not parse");
                None
            }
        }
    }

    /// Check `key` against the override literals, the registry and its own
    /// expiration. Never fails.
    pub fn validate(&self, key: &str, registry: &LicenseRegistry, now: Timestamp) -> LicenseCheck {
        if self.secrets.is_override_key(key) {
            return LicenseCheck::admin(now.plus_years(ADMIN_VALIDITY_YEARS));
        }
        if !registry.is_empty() && !registry.contains_key(key) {
            return LicenseCheck::rejected(CheckReason::NotInRegistry);
        }
        match self.open(key) {
            Some(payload) => LicenseCheck::from_expiration(payload.expiration_date, now),
            None => LicenseCheck::rejected(CheckReason::Undecryptable),
        }
    }

    /// Generate a key for `client_name`, record it in `registry` and return
    /// the record.
    pub fn issue(
        &self,
        registry: &mut LicenseRegistry,
        client_name: &str,
        duration_days: u32,
        now: Timestamp,
    ) -> Result<SystemLicense, LicenseError> {
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err(ValidationError::EmptyClientName.into());
        }
        let key = self.generate(duration_days, now)?;
        let record = SystemLicense {
            id: LicenseId::new(),
            key,
            client_name: client_name.to_string(),
            expiration_date: now.plus_days(i64::from(duration_days)),
            created_at: now,
        };
        registry.insert(record.clone());
        tracing::info!(
            id = %record.id,
            client = %record.client_name,
            expires = %record.expiration_date,
            "license issued"
        );
        Ok(record)
    }

    /// Gate for issuer operations.
    pub fn verify_admin_password(&self, password: &str) -> Result<(), ValidationError> {
        if password == self.secrets.admin_password() {
            Ok(())
        } else {
            tracing::warn!("admin password rejected");
            Err(ValidationError::AdminPassword)
        }
    }
}

impl std::fmt::Debug for LicenseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseService")
            .field("provider", &self.secrets.provider_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::StaticSecrets;

    fn service() -> LicenseService {
        LicenseService::new(Arc::new(StaticSecrets::new("s", "MASTER", "admin", "pw"))).unwrap()
    }

    #[test]
    fn payload_unique_id_is_32_hex_chars() {
        let p = LicensePayload::new(Timestamp::now());
        assert_eq!(p.unique_id.len(), 32);
        assert!(p.unique_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn payload_json_shape() {
        let p = LicensePayload::new(Timestamp::now());
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("expirationDate").is_some());
        assert!(json.get("uniqueId").is_some());
    }

    #[test]
    fn zero_duration_rejected() {
        let err = service().generate(0, Timestamp::now()).unwrap_err();
        assert!(matches!(
            err,
            LicenseError::Validation(ValidationError::ZeroDuration(0))
        ));
    }

    #[test]
    fn generated_keys_differ() {
        let s = service();
        let now = Timestamp::now();
        assert_ne!(s.generate(30, now).unwrap(), s.generate(30, now).unwrap());
    }

    #[test]
    fn generated_key_opens_to_expected_expiration() {
        let s = service();
        let now = Timestamp::now();
        let key = s.generate(7, now).unwrap();
        assert_eq!(s.open(&key).unwrap().expiration_date, now.plus_days(7));
    }

    #[test]
    fn override_wins_even_against_registry() {
        let s = service();
        let now = Timestamp::now();
        let mut reg = LicenseRegistry::new();
        s.issue(&mut reg, "Acme", 1, now).unwrap();

        let check = s.validate("MASTER", &reg, now);
        assert!(check.is_valid);
        assert!(check.is_admin);
        assert_eq!(check.expiration_date, Some(now.plus_years(ADMIN_VALIDITY_YEARS)));
    }

    #[test]
    fn empty_key_is_undecryptable() {
        let check = service().validate("", &LicenseRegistry::new(), Timestamp::now());
        assert_eq!(check.reason, CheckReason::Undecryptable);
        assert!(!check.is_valid);
    }

    #[test]
    fn blank_client_name_rejected() {
        let mut reg = LicenseRegistry::new();
        let err = service()
            .issue(&mut reg, "   ", 30, Timestamp::now())
            .unwrap_err();
        assert!(matches!(
            err,
            LicenseError::Validation(ValidationError::EmptyClientName)
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn admin_password() {
        let s = service();
        assert!(s.verify_admin_password("pw").is_ok());
        assert_eq!(
            s.verify_admin_password("PW"),
            Err(ValidationError::AdminPassword)
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn valid_until_exactly_the_duration(days in 1u32..3650, secs_before in 1i64..86_400) {
                let s = service();
                let reg = LicenseRegistry::new();
                let now = Timestamp::now();
                let key = s.generate(days, now).unwrap();
                let expiry = now.plus_days(i64::from(days));

                let just_before = Timestamp::from_utc(
                    *expiry.as_datetime() - chrono::Duration::seconds(secs_before),
                );
                prop_assert!(s.validate(&key, &reg, just_before).is_valid);
                prop_assert!(!s.validate(&key, &reg, expiry).is_valid);
            }
        }
    }
}
