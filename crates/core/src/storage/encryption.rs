use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

/// Argon2id cost parameters. These are pinned per file-format version
/// (see `format::CURRENT_VERSION`) rather than stored in the header;
/// bumping them means bumping the format version.
pub const KDF_MEMORY_COST_KIB: u32 = 19_456; // 19 MiB
pub const KDF_TIME_COST: u32 = 2;
pub const KDF_PARALLELISM: u32 = 1;

/// Derive a 256-bit encryption key from a password using Argon2id with
/// the version-pinned cost parameters. The salt must be fresh and
/// unique for every save.
pub fn derive_key(password: &str, salt: &[u8; 16]) -> Result<[u8; 32], CoreError> {
    let params = Params::new(KDF_MEMORY_COST_KIB, KDF_TIME_COST, KDF_PARALLELISM, Some(32))
        .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; 32];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| CoreError::Encryption(format!("Argon2 key derivation failed: {e}")))?;

    Ok(key)
}

/// Encrypt plaintext with AES-256-GCM. The returned ciphertext carries
/// the 16-byte authentication tag, so integrity comes for free.
pub fn encrypt(plaintext: &[u8], key: &[u8; 32], nonce: &[u8; 12]) -> Result<Vec<u8>, CoreError> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))?;

    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))
}

/// Decrypt ciphertext with AES-256-GCM. Tag verification happens
/// automatically; a wrong password or tampered data yields
/// `CoreError::Decryption`.
pub fn decrypt(ciphertext: &[u8], key: &[u8; 32], nonce: &[u8; 12]) -> Result<Vec<u8>, CoreError> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CoreError::Decryption)
}

/// Fill an array with cryptographically secure random bytes.
/// Used for salts (16 bytes) and nonces (12 bytes).
pub fn random_array<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut bytes = [0u8; N];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| CoreError::Encryption(format!("Failed to generate random bytes: {e}")))?;
    Ok(bytes)
}
