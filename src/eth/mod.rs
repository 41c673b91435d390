//! Ethereum conventions layered over the raw curve: account addresses and the
//! 65-byte `r || s || v` signature.

pub mod address;
pub mod signature;

pub use address::{address_from_public_key, parse_hex_address};
pub use alloy_primitives::Address;
pub use signature::Signature;
