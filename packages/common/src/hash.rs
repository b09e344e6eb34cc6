//! Hash computation for packet identity
//!
//! # GUID Byte Layout (80 bytes, packed)
//! - Bytes 0-7:   nonce (u64, big-endian)
//! - Bytes 8-11:  src_eid (u32, big-endian)
//! - Bytes 12-43: sender (32 bytes)
//! - Bytes 44-47: dst_eid (u32, big-endian)
//! - Bytes 48-79: receiver (32 bytes)
//!
//! Matches `keccak256(abi.encodePacked(nonce, srcEid, sender, dstEid, receiver))`.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Derive the globally unique id of a packet on the path
/// `(src_eid, sender) -> (dst_eid, receiver)` with the given outbound nonce.
pub fn compute_guid(
    nonce: u64,
    src_eid: u32,
    sender: &[u8; 32],
    dst_eid: u32,
    receiver: &[u8; 32],
) -> [u8; 32] {
    let mut data = [0u8; 80];
    data[0..8].copy_from_slice(&nonce.to_be_bytes());
    data[8..12].copy_from_slice(&src_eid.to_be_bytes());
    data[12..44].copy_from_slice(sender);
    data[44..48].copy_from_slice(&dst_eid.to_be_bytes());
    data[48..80].copy_from_slice(receiver);
    keccak256(&data)
}

/// Convert bytes32 to 0x-prefixed hex string
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
