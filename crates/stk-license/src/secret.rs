//! # Secret Provider Abstraction
//!
//! The sealing secret, the two admin override keys and the admin password
//! are configuration, not code. [`SecretProvider`] hides where they come
//! from:
//!
//! - [`StaticSecrets`]: compiled-in defaults, or explicit values for tests.
//! - [`EnvSecrets`]: read once from environment variables, each falling back
//!   to the static default.
//!
//! ```bash
//! export STK_LICENSE_SECRET="..."
//! export STK_MASTER_KEY="..."
//! export STK_ADMIN_KEY="..."
//! export STK_ADMIN_PASSWORD="..."
//! ```

/// Default sealing secret.
pub const DEFAULT_LICENSE_SECRET: &str = "stocktake-license-secret";
/// Default master override key.
pub const DEFAULT_MASTER_KEY: &str = "STOCKTAKE-MASTER-OVERRIDE";
/// Default admin override key.
pub const DEFAULT_ADMIN_KEY: &str = "stocktake-admin";
/// Default admin panel password.
pub const DEFAULT_ADMIN_PASSWORD: &str = "stocktake-issuer";

/// Source of licensing secrets.
///
/// Implementations must be `Send + Sync` so a provider can sit behind an
/// `Arc` shared with async export tasks.
pub trait SecretProvider: Send + Sync {
    /// Passphrase the payload sealing key is derived from.
    fn license_secret(&self) -> &str;

    /// The two literal keys that validate as permanent admin licenses.
    fn override_keys(&self) -> [&str; 2];

    /// Password guarding issuer operations.
    fn admin_password(&self) -> &str;

    /// Human-readable name for this provider (for logging).
    fn provider_name(&self) -> &str;

    /// Whether `key` is one of the admin override literals.
    fn is_override_key(&self, key: &str) -> bool {
        self.override_keys().iter().any(|k| *k == key)
    }
}

// ─── StaticSecrets ──────────────────────────────────────────────────────

/// Secrets held directly in memory.
#[derive(Clone)]
pub struct StaticSecrets {
    license_secret: String,
    master_key: String,
    admin_key: String,
    admin_password: String,
}

impl StaticSecrets {
    /// Build from explicit values.
    pub fn new(
        license_secret: impl Into<String>,
        master_key: impl Into<String>,
        admin_key: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            license_secret: license_secret.into(),
            master_key: master_key.into(),
            admin_key: admin_key.into(),
            admin_password: admin_password.into(),
        }
    }
}

impl Default for StaticSecrets {
    fn default() -> Self {
        Self::new(
            DEFAULT_LICENSE_SECRET,
            DEFAULT_MASTER_KEY,
            DEFAULT_ADMIN_KEY,
            DEFAULT_ADMIN_PASSWORD,
        )
    }
}

impl std::fmt::Debug for StaticSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecrets")
            .field("license_secret", &"[REDACTED]")
            .field("master_key", &"[REDACTED]")
            .field("admin_key", &"[REDACTED]")
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

impl SecretProvider for StaticSecrets {
    fn license_secret(&self) -> &str {
        &self.license_secret
    }

    fn override_keys(&self) -> [&str; 2] {
        [&self.master_key, &self.admin_key]
    }

    fn admin_password(&self) -> &str {
        &self.admin_password
    }

    fn provider_name(&self) -> &str {
        "StaticSecrets"
    }
}

// ─── EnvSecrets ─────────────────────────────────────────────────────────

/// Secrets loaded from `STK_*` environment variables at construction.
#[derive(Debug, Clone)]
pub struct EnvSecrets {
    inner: StaticSecrets,
    overridden: usize,
}

impl EnvSecrets {
    /// Read the four `STK_*` variables, defaulting any that are unset or empty.
    pub fn from_env() -> Self {
        let mut overridden = 0;
        let mut read = |var: &str, default: &str| match std::env::var(var) {
            Ok(v) if !v.is_empty() => {
                overridden += 1;
                v
            }
            _ => default.to_string(),
        };

        let inner = StaticSecrets::new(
            read("STK_LICENSE_SECRET", DEFAULT_LICENSE_SECRET),
            read("STK_MASTER_KEY", DEFAULT_MASTER_KEY),
            read("STK_ADMIN_KEY", DEFAULT_ADMIN_KEY),
            read("STK_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
        );
        tracing::debug!(overridden, "loaded license secrets from environment");
        Self { inner, overridden }
    }

    /// How many of the four values came from the environment.
    pub fn overridden(&self) -> usize {
        self.overridden
    }
}

impl SecretProvider for EnvSecrets {
    fn license_secret(&self) -> &str {
        self.inner.license_secret()
    }

    fn override_keys(&self) -> [&str; 2] {
        self.inner.override_keys()
    }

    fn admin_password(&self) -> &str {
        self.inner.admin_password()
    }

    fn provider_name(&self) -> &str {
        "EnvSecrets"
    }
}
