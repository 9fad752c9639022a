//! # Payload Sealing
//!
//! AES-256-GCM over the JSON license payload. The 256-bit key is the SHA-256
//! digest of the configured secret. Each seal draws a fresh random 12-byte
//! nonce, so two keys sealed from identical payloads still differ.
//!
//! ## Wire Layout
//!
//! ```text
//! base64( nonce[12] || ciphertext || tag[16] )
//! ```
//!
//! Standard alphabet with padding. The whole base64 string is the license key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::error::CipherError;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Seals and opens license payloads under a key derived from one secret.
#[derive(Clone)]
pub struct LicenseCipher {
    aead: Aes256Gcm,
}

impl LicenseCipher {
    /// Derive the sealing key from `secret`.
    pub fn new(secret: &str) -> Result<Self, CipherError> {
        let digest = Sha256::digest(secret.as_bytes());
        let aead =
            Aes256Gcm::new_from_slice(&digest).map_err(|e| CipherError::Key(e.to_string()))?;
        Ok(Self { aead })
    }

    /// Encrypt `plaintext` and return the base64 key text.
    pub fn seal(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let nonce_bytes: [u8; NONCE_LEN] = rand::random();
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .aead
            .encrypt(nonce, plaintext)
            .map_err(|e| CipherError::Aead(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    /// Decode and decrypt base64 key text.
    ///
    /// Fails on bad base64, on input too short to hold a nonce and tag, and
    /// on any authentication failure (wrong secret, tampered bytes).
    pub fn open(&self, sealed: &str) -> Result<Vec<u8>, CipherError> {
        let bytes = STANDARD.decode(sealed.trim())?;
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Truncated(bytes.len()));
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        self.aead
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| CipherError::Aead(e.to_string()))
    }
}

impl std::fmt::Debug for LicenseCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseCipher")
            .field("algorithm", &"AES-256-GCM")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_then_open() {
        let c = LicenseCipher::new("secret").unwrap();
        let sealed = c.seal(b"payload").unwrap();
        assert_eq!(c.open(&sealed).unwrap(), b"payload");
    }

    #[test]
    fn nonces_differ_between_seals() {
        let c = LicenseCipher::new("secret").unwrap();
        assert_ne!(c.seal(b"same").unwrap(), c.seal(b"same").unwrap());
    }

    #[test]
    fn wrong_secret_fails_authentication() {
        let sealed = LicenseCipher::new("a").unwrap().seal(b"x").unwrap();
        let err = LicenseCipher::new("b").unwrap().open(&sealed).unwrap_err();
        assert!(matches!(err, CipherError::Aead(_)));
    }

    #[test]
    fn tampered_byte_fails_authentication() {
        let c = LicenseCipher::new("secret").unwrap();
        let mut raw = STANDARD.decode(c.seal(b"payload").unwrap()).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let err = c.open(&STANDARD.encode(raw)).unwrap_err();
        assert!(matches!(err, CipherError::Aead(_)));
    }

    #[test]
    fn not_base64() {
        let c = LicenseCipher::new("secret").unwrap();
        assert!(matches!(c.open("not base64!"), Err(CipherError::Encoding(_))));
    }

    #[test]
    fn too_short() {
        let c = LicenseCipher::new("secret").unwrap();
        let short = STANDARD.encode([0u8; 8]);
        assert!(matches!(c.open(&short), Err(CipherError::Truncated(8))));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let c = LicenseCipher::new("secret").unwrap();
        let sealed = format!("  {}\n", c.seal(b"p").unwrap());
        assert_eq!(c.open(&sealed).unwrap(), b"p");
    }

    #[test]
    fn debug_hides_key() {
        let c = LicenseCipher::new("secret").unwrap();
        assert!(format!("{c:?}").contains("AES-256-GCM"));
    }
}
