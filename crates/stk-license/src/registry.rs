//! # Issuance Registry
//!
//! Every key the issuer generates is recorded as a [`SystemLicense`].
//! Deleting a record revokes the key: once the registry holds at least one
//! record, validation rejects keys it does not list.
//!
//! Serialized as a bare JSON array of camelCase records.

use serde::{Deserialize, Serialize};

use stk_core::{LicenseId, Timestamp};

/// One issued license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLicense {
    pub id: LicenseId,
    pub key: String,
    pub client_name: String,
    pub expiration_date: Timestamp,
    pub created_at: Timestamp,
}

impl SystemLicense {
    /// Whether the record is still within its validity window.
    pub fn is_current(&self, now: Timestamp) -> bool {
        self.expiration_date > now
    }
}

/// Ordered list of issued licenses, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseRegistry {
    records: Vec<SystemLicense>,
}

impl LicenseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SystemLicense>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SystemLicense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a newly issued record.
    pub fn insert(&mut self, record: SystemLicense) {
        self.records.push(record);
    }

    /// Find the record for an exact key.
    pub fn find_key(&self, key: &str) -> Option<&SystemLicense> {
        self.records.iter().find(|r| r.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_key(key).is_some()
    }

    /// Remove the record with `id`. Returns it, or `None` if absent.
    pub fn revoke(&mut self, id: LicenseId) -> Option<SystemLicense> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(pos);
        tracing::info!(id = %removed.id, client = %removed.client_name, "license revoked");
        Some(removed)
    }

    /// Whether the registry lists `key` with an expiration after `now`.
    ///
    /// This is the confirmation the export gate requires in addition to a
    /// key that decrypts.
    pub fn confirm(&self, key: &str, now: Timestamp) -> bool {
        self.find_key(key).is_some_and(|r| r.is_current(now))
    }

    /// Records that have not yet expired.
    pub fn active(&self, now: Timestamp) -> impl Iterator<Item = &SystemLicense> {
        self.records.iter().filter(move |r| r.is_current(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, now: Timestamp, days: i64) -> SystemLicense {
        SystemLicense {
            id: LicenseId::new(),
            key: key.to_string(),
            client_name: "Acme".to_string(),
            expiration_date: now.plus_days(days),
            created_at: now,
        }
    }

    #[test]
    fn revoke_removes_only_that_record() {
        let now = Timestamp::now();
        let a = record("a", now, 30);
        let b = record("b", now, 30);
        let mut reg = LicenseRegistry::from_records(vec![a.clone(), b.clone()]);

        assert_eq!(reg.revoke(a.id), Some(a));
        assert_eq!(reg.records(), &[b]);
    }

    #[test]
    fn revoke_unknown_is_none() {
        let mut reg = LicenseRegistry::new();
        assert!(reg.revoke(LicenseId::new()).is_none());
    }

    #[test]
    fn confirm_requires_current_record() {
        let now = Timestamp::now();
        let mut reg = LicenseRegistry::new();
        reg.insert(record("live", now, 1));
        reg.insert(record("old", now, -1));

        assert!(reg.confirm("live", now));
        assert!(!reg.confirm("old", now));
        assert!(!reg.confirm("absent", now));
        assert_eq!(reg.active(now).count(), 1);
    }

    #[test]
    fn serializes_as_camel_case_array() {
        let now = Timestamp::now();
        let reg = LicenseRegistry::from_records(vec![record("k", now, 1)]);
        let json = serde_json::to_value(&reg).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["clientName"], "Acme");
        assert!(json[0].get("expirationDate").is_some());

        let back: LicenseRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(back, reg);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let json = r#"[{"id":"5f0c5a64-3c1a-4b0e-9d7e-0a4d1f3e2b11","key":"k","clientName":"c",
            "expirationDate":"2030-01-01T00:00:00Z","createdAt":"2026-01-01T00:00:00Z","isValid":true}]"#;
        let reg: LicenseRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(reg.len(), 1);
    }
}
