//! Decryption of the encrypted columns stored alongside expenses.
//!
//! Vendor names and the JSON metadata attached to an expense are stored as
//! encrypted envelopes of the form `base64url(nonce):base64url(ciphertext)`.
//! The statistics code only ever needs to read them, so it depends on the
//! [Decrypt] trait rather than a concrete cipher.

use std::fmt::Debug;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chacha20poly1305::{
    ChaCha20Poly1305, Key, KeyInit, Nonce,
    aead::{Aead, AeadCore, OsRng},
};
use sha2::{Digest, Sha256};

/// The length of a ChaCha20-Poly1305 nonce in bytes.
const NONCE_LENGTH: usize = 12;

/// The errors that may occur while decrypting a stored value.
///
/// These errors never reach a client. Callers decide whether a value that
/// cannot be decrypted is skipped or treated as absent.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CryptoError {
    /// The value is not of the form `nonce:ciphertext`.
    #[error("the encrypted value is not a valid envelope")]
    MalformedEnvelope,

    /// One of the envelope parts is not valid base64.
    #[error("could not decode the encrypted value: {0}")]
    Decode(String),

    /// The ciphertext was not produced with this key, or has been tampered with.
    #[error("the encrypted value could not be authenticated")]
    Authentication,

    /// The decrypted bytes are not valid UTF-8.
    #[error("the decrypted value is not valid UTF-8")]
    InvalidUtf8,
}

/// Turns a stored ciphertext back into its plaintext.
///
/// Implementations must be pure: decrypting the same value twice gives the
/// same result and has no side effects.
pub trait Decrypt: Debug + Send + Sync {
    /// Decrypt `ciphertext` into a UTF-8 string.
    ///
    /// # Errors
    /// Returns a [CryptoError] if the value cannot be decrypted with this key.
    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError>;
}

/// A ChaCha20-Poly1305 cipher for encrypted expense fields.
#[derive(Clone)]
pub struct FieldCipher {
    key: Key,
}

impl FieldCipher {
    /// Create a cipher whose key is derived from `secret`.
    pub fn from_secret(secret: &str) -> Self {
        let hash = Sha256::digest(secret.as_bytes());

        Self { key: hash }
    }

    /// Encrypt `plaintext` into an envelope that [FieldCipher::decrypt] accepts.
    ///
    /// A fresh random nonce is used for each call, so encrypting the same
    /// plaintext twice gives two different envelopes.
    ///
    /// # Errors
    /// Returns [CryptoError::Authentication] if the underlying cipher fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let cipher = ChaCha20Poly1305::new(&self.key);
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Authentication)?;

        Ok(format!(
            "{}:{}",
            URL_SAFE_NO_PAD.encode(nonce),
            URL_SAFE_NO_PAD.encode(ciphertext)
        ))
    }
}

impl Decrypt for FieldCipher {
    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let (nonce, payload) = ciphertext
            .trim()
            .split_once(':')
            .ok_or(CryptoError::MalformedEnvelope)?;

        let nonce = URL_SAFE_NO_PAD
            .decode(nonce)
            .map_err(|error| CryptoError::Decode(error.to_string()))?;
        if nonce.len() != NONCE_LENGTH {
            return Err(CryptoError::MalformedEnvelope);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|error| CryptoError::Decode(error.to_string()))?;

        let plaintext = ChaCha20Poly1305::new(&self.key)
            .decrypt(Nonce::from_slice(&nonce), payload.as_ref())
            .map_err(|_| CryptoError::Authentication)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }
}

impl Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher")
            .field("key", &"********")
            .finish()
    }
}
