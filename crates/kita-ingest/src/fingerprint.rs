use sha2::{Digest, Sha256};

/// Hex SHA-256 of uploaded bytes.
///
/// Identifies an upload in logs without writing any of its content.
pub fn file_fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
