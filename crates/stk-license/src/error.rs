//! # License Error Types
//!
//! Structured errors for key issuance. Validation has no error type: it
//! downgrades every failure to a negative [`crate::LicenseCheck`].

use thiserror::Error;

use stk_core::ValidationError;

/// Errors from sealing or opening a license payload.
#[derive(Error, Debug)]
pub enum CipherError {
    /// The sealing key could not be constructed.
    #[error("invalid sealing key: {0}")]
    Key(String),

    /// The key text is not valid base64.
    #[error("base64 decode error: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Ciphertext shorter than a nonce.
    #[error("sealed payload too short: {0} bytes")]
    Truncated(usize),

    /// Authenticated encryption or decryption failed.
    #[error("AEAD failure: {0}")]
    Aead(String),
}

/// Errors from generating or issuing a license.
#[derive(Error, Debug)]
pub enum LicenseError {
    /// Input rejected (zero duration, empty client name, wrong password).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Sealing failed.
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),

    /// Payload could not be serialized.
    #[error("payload serialization error: {0}")]
    Payload(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_display() {
        let err = CipherError::Truncated(4);
        assert!(err.to_string().contains("4 bytes"));
    }

    #[test]
    fn validation_is_transparent() {
        let err: LicenseError = ValidationError::ZeroDuration(0).into();
        assert_eq!(err.to_string(), "license duration must be at least 1 day, got 0");
    }

    #[test]
    fn cipher_converts() {
        let err: LicenseError = CipherError::Aead("tag mismatch".into()).into();
        assert!(format!("{err}").contains("tag mismatch"));
    }
}
