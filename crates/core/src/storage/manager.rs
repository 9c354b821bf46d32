use crate::errors::CoreError;
use crate::models::account::Account;

use super::encryption;
use super::format;

/// High-level storage operations: save/load an account snapshot to/from
/// encrypted bytes or files. Persistence itself is the caller's job;
/// this only defines the portable snapshot encoding.
pub struct StorageManager;

impl StorageManager {
    /// Encrypt and serialize an account to raw bytes.
    ///
    /// Flow: Account -> bincode -> AES-256-GCM(Argon2id(password)) -> YWLT bytes
    pub fn save_to_bytes(account: &Account, password: &str) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(account)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize account: {e}")))?;

        let salt = encryption::random_array::<16>()?;
        let nonce = encryption::random_array::<12>()?;
        let key = encryption::derive_key(password, &salt)?;
        let ciphertext = encryption::encrypt(&plaintext, &key, &nonce)?;

        Ok(format::write_snapshot(
            format::CURRENT_VERSION,
            &salt,
            &nonce,
            &ciphertext,
        ))
    }

    /// Decrypt and deserialize an account from raw bytes.
    ///
    /// Flow: YWLT bytes -> parse header -> Argon2id(password, salt) -> decrypt -> bincode -> Account
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Account, CoreError> {
        let (header, ciphertext) = format::read_snapshot(data)?;
        let key = encryption::derive_key(password, &header.salt)?;
        let plaintext = encryption::decrypt(ciphertext, &key, &header.nonce)?;

        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize account: {e}")))
    }

    /// Save an account to an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(account: &Account, path: &str, password: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(account, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load an account from an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Account, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
