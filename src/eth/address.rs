use alloy_primitives::Address;

use crate::{ecc::ecdsa::PublicKey, error::AddressError};

/// The last 20 bytes of `keccak256(X || Y)` over the uncompressed point.
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    let sec = public_key.serialize_uncompressed();
    Address::from_raw_public_key(&sec[1..])
}

/// Accepts 40 hex digits in any letter case, with or without `0x`. The
/// checksum of mixed-case input is not enforced.
pub fn parse_hex_address(input: &str) -> Result<Address, AddressError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(AddressError::MissingDigits);
    }

    digits.parse::<Address>().map_err(|_| match hex::decode(digits) {
        Ok(bytes) => AddressError::InvalidLength(bytes.len()),
        Err(_) => AddressError::InvalidHex,
    })
}
