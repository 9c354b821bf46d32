use crate::errors::CoreError;

/// Magic bytes identifying a YWLT (Yield Wallet) snapshot.
pub const MAGIC: &[u8; 4] = b"YWLT";

/// Current snapshot format version. KDF cost parameters are pinned to
/// this version (see `encryption`), so bumping them bumps this number.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes: magic(4) + version(2) + salt(16) + nonce(12).
pub const HEADER_SIZE: usize = 34;

/// AES-GCM authentication tag length; the ciphertext is never shorter.
const TAG_SIZE: usize = 16;

/// Header parsed from raw snapshot bytes.
#[derive(Debug)]
pub struct SnapshotHeader {
    pub version: u16,
    pub salt: [u8; 16],
    pub nonce: [u8; 12],
}

/// Assemble a complete snapshot from its parts.
///
/// Layout:
/// ```text
/// [YWLT: 4B] [version: 2B LE] [salt: 16B] [nonce: 12B] [ciphertext: rest]
/// ```
/// The ciphertext runs to the end of the buffer; its length is implied.
pub fn write_snapshot(
    version: u16,
    salt: &[u8; 16],
    nonce: &[u8; 12],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(ciphertext);
    buf
}

/// Parse the header from raw snapshot bytes.
/// Returns the header and the ciphertext slice.
pub fn read_snapshot(data: &[u8]) -> Result<(SnapshotHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE + TAG_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a valid YWLT snapshot".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes, not a YWLT snapshot".into(),
        ));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let mut salt = [0u8; 16];
    salt.copy_from_slice(&data[6..22]);

    let mut nonce = [0u8; 12];
    nonce.copy_from_slice(&data[22..34]);

    let header = SnapshotHeader {
        version,
        salt,
        nonce,
    };

    Ok((header, &data[HEADER_SIZE..]))
}
