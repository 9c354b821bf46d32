// ═══════════════════════════════════════════════════════════════════
// Storage Tests — encryption, snapshot format, StorageManager
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use yield_wallet_core::errors::CoreError;
use yield_wallet_core::models::account::Account;
use yield_wallet_core::models::plan::PlanTemplate;
use yield_wallet_core::services::ledger_service::LedgerService;
use yield_wallet_core::storage::encryption::{decrypt, derive_key, encrypt, random_array};
use yield_wallet_core::storage::format::{self, CURRENT_VERSION, HEADER_SIZE, MAGIC};
use yield_wallet_core::storage::manager::StorageManager;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Account with a deposit, a plan and one accrual day of history.
fn sample_account() -> Account {
    let mut account = Account::new(d(2025, 6, 1));
    let service = LedgerService::new();
    service.deposit(&mut account, 50_000.0).unwrap();
    service
        .purchase_plan(
            &mut account,
            PlanTemplate::new("Plan Básico", "Antminer S9", 30_000.0, 1_050.0, 15_000.0),
            d(2025, 6, 1),
        )
        .unwrap();
    service.accrue_daily_earnings(&mut account, d(2025, 6, 2));
    account
}

// ═══════════════════════════════════════════════════════════════════
// Key derivation
// ═══════════════════════════════════════════════════════════════════

mod key_derivation {
    use super::*;

    #[test]
    fn same_inputs_same_key() {
        let salt = [7u8; 16];
        let a = derive_key("password", &salt).unwrap();
        let b = derive_key("password", &salt).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_password_different_key() {
        let salt = [7u8; 16];
        let a = derive_key("password", &salt).unwrap();
        let b = derive_key("Password", &salt).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_salt_different_key() {
        let a = derive_key("password", &[1u8; 16]).unwrap();
        let b = derive_key("password", &[2u8; 16]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_password_still_derives() {
        let key = derive_key("", &[0u8; 16]).unwrap();
        assert_eq!(key.len(), 32);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Encrypt / decrypt
// ═══════════════════════════════════════════════════════════════════

mod cipher {
    use super::*;

    #[test]
    fn roundtrip() {
        let key = [9u8; 32];
        let nonce = [3u8; 12];
        let plaintext = b"the wallet snapshot";

        let ciphertext = encrypt(plaintext, &key, &nonce).unwrap();
        let back = decrypt(&ciphertext, &key, &nonce).unwrap();

        assert_eq!(back, plaintext);
    }

    #[test]
    fn ciphertext_differs_from_plaintext_and_carries_tag() {
        let ciphertext = encrypt(b"data", &[9u8; 32], &[3u8; 12]).unwrap();
        assert_ne!(&ciphertext[..4.min(ciphertext.len())], b"data");
        assert_eq!(ciphertext.len(), 4 + 16); // payload + auth tag
    }

    #[test]
    fn wrong_key_fails() {
        let ciphertext = encrypt(b"data", &[9u8; 32], &[3u8; 12]).unwrap();
        let err = decrypt(&ciphertext, &[8u8; 32], &[3u8; 12]).unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let mut ciphertext = encrypt(b"data", &[9u8; 32], &[3u8; 12]).unwrap();
        ciphertext[0] ^= 0xFF;
        let err = decrypt(&ciphertext, &[9u8; 32], &[3u8; 12]).unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn random_array_varies() {
        let a = random_array::<16>().unwrap();
        let b = random_array::<16>().unwrap();
        // 2^-128 collision odds; a failure here means the RNG is broken
        assert_ne!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Snapshot format
// ═══════════════════════════════════════════════════════════════════

mod snapshot_format {
    use super::*;

    #[test]
    fn write_then_read_roundtrip() {
        let salt = [5u8; 16];
        let nonce = [6u8; 12];
        let ciphertext = vec![0xAB; 40];

        let bytes = format::write_snapshot(CURRENT_VERSION, &salt, &nonce, &ciphertext);
        let (header, ct) = format::read_snapshot(&bytes).unwrap();

        assert_eq!(header.version, CURRENT_VERSION);
        assert_eq!(header.salt, salt);
        assert_eq!(header.nonce, nonce);
        assert_eq!(ct, &ciphertext[..]);
    }

    #[test]
    fn starts_with_magic() {
        let bytes = format::write_snapshot(CURRENT_VERSION, &[0u8; 16], &[0u8; 12], &[0u8; 16]);
        assert_eq!(&bytes[0..4], MAGIC);
        assert_eq!(bytes.len(), HEADER_SIZE + 16);
    }

    #[test]
    fn rejects_too_small() {
        let err = format::read_snapshot(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn rejects_header_without_ciphertext() {
        // A header alone cannot hold the 16-byte auth tag
        let bytes = format::write_snapshot(CURRENT_VERSION, &[0u8; 16], &[0u8; 12], &[]);
        let err = format::read_snapshot(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = format::write_snapshot(CURRENT_VERSION, &[0u8; 16], &[0u8; 12], &[0u8; 16]);
        bytes[0] = b'X';
        let err = format::read_snapshot(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn rejects_version_zero() {
        let bytes = format::write_snapshot(0, &[0u8; 16], &[0u8; 12], &[0u8; 16]);
        let err = format::read_snapshot(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(0)));
    }

    #[test]
    fn rejects_future_version() {
        let bytes =
            format::write_snapshot(CURRENT_VERSION + 1, &[0u8; 16], &[0u8; 12], &[0u8; 16]);
        let err = format::read_snapshot(&bytes).unwrap_err();
        match err {
            CoreError::UnsupportedVersion(v) => assert_eq!(v, CURRENT_VERSION + 1),
            other => panic!("Expected UnsupportedVersion, got {:?}", other),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    #[test]
    fn save_and_load_bytes_roundtrip() {
        let account = sample_account();

        let bytes = StorageManager::save_to_bytes(&account, "hunter2").unwrap();
        let loaded = StorageManager::load_from_bytes(&bytes, "hunter2").unwrap();

        assert_eq!(loaded, account);
    }

    #[test]
    fn wrong_password_fails() {
        let bytes = StorageManager::save_to_bytes(&sample_account(), "hunter2").unwrap();
        let err = StorageManager::load_from_bytes(&bytes, "hunter3").unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn fresh_salt_every_save() {
        let account = sample_account();
        let a = StorageManager::save_to_bytes(&account, "pw").unwrap();
        let b = StorageManager::save_to_bytes(&account, "pw").unwrap();
        // Same state, same password, different bytes
        assert_ne!(a, b);
    }

    #[test]
    fn tampered_snapshot_fails() {
        let mut bytes = StorageManager::save_to_bytes(&sample_account(), "pw").unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let err = StorageManager::load_from_bytes(&bytes, "pw").unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.ywlt");
        let path_str = path.to_str().unwrap();

        let account = sample_account();
        StorageManager::save_to_file(&account, path_str, "file-pw").unwrap();
        let loaded = StorageManager::load_from_file(path_str, "file-pw").unwrap();

        assert_eq!(loaded, account);
    }

    #[test]
    fn load_missing_file_fails_with_io_error() {
        let err = StorageManager::load_from_file("/nonexistent/wallet.ywlt", "pw").unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }

    #[test]
    fn empty_account_roundtrip() {
        let account = Account::new(d(2025, 6, 1));
        let bytes = StorageManager::save_to_bytes(&account, "pw").unwrap();
        let loaded = StorageManager::load_from_bytes(&bytes, "pw").unwrap();
        assert_eq!(loaded, account);
    }
}
