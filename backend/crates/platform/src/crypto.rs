//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random lowercase hex string of `2 * byte_len` characters
///
/// Used for object-store keys, which must not collide without a
/// central sequence.
pub fn random_hex(byte_len: usize) -> String {
    hex::encode(random_bytes(byte_len))
}
