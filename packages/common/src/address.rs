//! Peer Address Encoding
//!
//! Messengers identify each other by a canonical 32-byte value so that peers
//! on chains with different address formats can be compared byte-for-byte.
//!
//! ## Encoding Rules
//!
//! - EVM (`0x` + 40 hex chars): the 20 raw bytes, left zero-padded to 32
//!   (same as `ethers.utils.zeroPad(address, 32)`)
//! - `0x` + 64 hex chars: taken as-is
//! - Anything else (bech32 and other string addresses): `keccak256(utf8(address))`

use cosmwasm_std::{Binary, StdError, StdResult};

use crate::hash::keccak256;

/// Encode an address string into its canonical 32-byte peer form.
pub fn address_to_bytes32(addr: &str) -> [u8; 32] {
    if let Some(hex_str) = addr.strip_prefix("0x") {
        if hex_str.len() == 40 {
            if let Ok(raw) = parse_evm_address(addr) {
                let mut out = [0u8; 32];
                out[12..32].copy_from_slice(&raw);
                return out;
            }
        }
        if hex_str.len() == 64 {
            if let Ok(bytes) = hex::decode(hex_str) {
                let mut out = [0u8; 32];
                out.copy_from_slice(&bytes);
                return out;
            }
        }
    }
    keccak256(addr.as_bytes())
}

/// Parse a 0x-prefixed (or bare) 40-char hex EVM address into 20 bytes.
pub fn parse_evm_address(addr: &str) -> StdResult<[u8; 20]> {
    let hex_str = addr.strip_prefix("0x").unwrap_or(addr);

    if hex_str.len() != 40 {
        return Err(StdError::generic_err(format!(
            "Invalid EVM address length: expected 40 hex chars, got {}",
            hex_str.len()
        )));
    }

    let bytes =
        hex::decode(hex_str).map_err(|e| StdError::generic_err(format!("Invalid hex: {}", e)))?;

    let mut result = [0u8; 20];
    result.copy_from_slice(&bytes);
    Ok(result)
}

/// Convert a `Binary` to a 32-byte array, rejecting any other length.
pub fn bytes32_from_binary(value: &Binary) -> StdResult<[u8; 32]> {
    value.as_slice().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid bytes32 length: expected 32 bytes, got {}",
            value.len()
        ))
    })
}
