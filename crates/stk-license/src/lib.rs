//! # stk-license — License Keys for Stocktake
//!
//! Export of count results is gated by a time-limited license key. This
//! crate issues and checks those keys.
//!
//! - [`secret`] — the [`SecretProvider`] seam that supplies the sealing
//!   secret, the two admin override keys and the admin password.
//! - [`cipher`] — AES-256-GCM sealing of the key payload.
//! - [`registry`] — the issuer's list of [`SystemLicense`] records. Removing
//!   a record revokes its key.
//! - [`service`] — [`LicenseService`]: generate, validate, issue.
//! - [`check`] — the [`LicenseCheck`] result with its reason code.
//!
//! ## Threat Model
//!
//! The secret lives with the client, so anyone holding the binary can mint
//! keys. The scheme deters casual copying; it is not a security boundary.
//!
//! ## Crate Policy
//!
//! - Validation never fails: every decode, decrypt or parse error becomes a
//!   negative [`LicenseCheck`].
//! - Callers pass `now` explicitly so expiry is testable to the second.

pub mod check;
pub mod cipher;
pub mod error;
pub mod registry;
pub mod secret;
pub mod service;

pub use check::{CheckReason, LicenseCheck};
pub use cipher::LicenseCipher;
pub use error::{CipherError, LicenseError};
pub use registry::{LicenseRegistry, SystemLicense};
pub use secret::{EnvSecrets, SecretProvider, StaticSecrets};
pub use service::{LicensePayload, LicenseService, ADMIN_VALIDITY_YEARS};
