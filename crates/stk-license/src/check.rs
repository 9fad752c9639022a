//! # License Check Result
//!
//! [`LicenseCheck`] is what validation returns. It always carries a
//! [`CheckReason`], so callers can tell an expired key from a revoked one
//! without inspecting error strings.

use serde::{Deserialize, Serialize};

use stk_core::Timestamp;

/// Why a key did or did not validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckReason {
    /// One of the two override literals.
    AdminOverride,
    /// Decrypted and not yet expired.
    Active,
    /// Decrypted, but the expiration has passed.
    Expired,
    /// The issuer registry is non-empty and has no record of this key.
    NotInRegistry,
    /// Not a key sealed under the configured secret.
    Undecryptable,
    /// No key has been stored.
    Missing,
}

impl CheckReason {
    /// Short human-readable explanation.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AdminOverride => "admin license",
            Self::Active => "license active",
            Self::Expired => "license expired",
            Self::NotInRegistry => "license revoked or unknown to the issuer",
            Self::Undecryptable => "not a valid license key",
            Self::Missing => "no license activated",
        }
    }
}

impl std::fmt::Display for CheckReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Outcome of validating one license key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseCheck {
    /// Whether the key unlocks export.
    pub is_valid: bool,
    /// Expiration carried by the key, if it could be read.
    pub expiration_date: Option<Timestamp>,
    /// Whether the key is an admin override.
    pub is_admin: bool,
    /// Why the check came out this way.
    pub reason: CheckReason,
}

impl LicenseCheck {
    /// A negative check with no readable expiration.
    pub fn rejected(reason: CheckReason) -> Self {
        Self {
            is_valid: false,
            expiration_date: None,
            is_admin: false,
            reason,
        }
    }

    /// A decrypted key, valid iff its expiration is after `now`.
    pub fn from_expiration(expiration: Timestamp, now: Timestamp) -> Self {
        let is_valid = expiration > now;
        Self {
            is_valid,
            expiration_date: Some(expiration),
            is_admin: false,
            reason: if is_valid {
                CheckReason::Active
            } else {
                CheckReason::Expired
            },
        }
    }

    /// An admin override expiring at `expiration`.
    pub fn admin(expiration: Timestamp) -> Self {
        Self {
            is_valid: true,
            expiration_date: Some(expiration),
            is_admin: true,
            reason: CheckReason::AdminOverride,
        }
    }

    /// Whole days left, rounded up. Zero when invalid or expired.
    pub fn days_remaining(&self, now: Timestamp) -> i64 {
        match (self.is_valid, self.expiration_date) {
            (true, Some(exp)) => exp.days_until(now).max(0),
            _ => 0,
        }
    }
}
