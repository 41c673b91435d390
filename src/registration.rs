//! The registration payload: validated parameters, their ABI encoding and the
//! Keccak-256 payload hash.

use alloy_primitives::{Address, U256, keccak256};
use alloy_sol_types::{SolType, sol};
use tracing::debug;

use crate::{
    error::{Error, Result},
    eth::parse_hex_address,
};

/// Encoded as bare parameters, the way Solidity's `abi.encode` lays them out.
pub type RegistrationTuple = sol! {
    tuple(address, address, uint256, string)
};

/// `(address owner, address referrer, uint256 duration, string name)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationParams {
    owner: Address,
    referrer: Address,
    duration: U256,
    name: String,
}

impl RegistrationParams {
    pub fn new(owner: Address, referrer: Address, duration: U256, name: String) -> Self {
        Self {
            owner,
            referrer,
            duration,
            name,
        }
    }

    /// Validates every field from its textual form. Errors name the field.
    pub fn parse(owner: &str, referrer: &str, duration: &str, name: &str) -> Result<Self> {
        Ok(Self::new(
            parse_address("owner", owner)?,
            parse_address("referrer", referrer)?,
            parse_uint256("duration", duration)?,
            name.to_owned(),
        ))
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn referrer(&self) -> Address {
        self.referrer
    }

    pub fn duration(&self) -> U256 {
        self.duration
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi_encode(&self) -> Vec<u8> {
        RegistrationTuple::abi_encode_params(&(
            self.owner,
            self.referrer,
            self.duration,
            self.name.as_str(),
        ))
    }

    pub fn payload_hash(&self) -> [u8; 32] {
        let encoded = self.abi_encode();
        let hash = keccak256(&encoded);
        debug!(
            bytes = encoded.len(),
            encoded = %hex::encode(&encoded),
            hash = %hash,
            "encoded registration payload"
        );
        hash.0
    }
}

pub fn parse_address(field: &'static str, value: &str) -> Result<Address> {
    parse_hex_address(value).map_err(|source| Error::InvalidAddress { field, source })
}

/// Decimal, or hex with a `0x` prefix. Negative numbers other than zero and
/// values wider than 256 bits are overflows; anything else that is not a
/// number is invalid.
pub fn parse_uint256(field: &'static str, value: &str) -> Result<U256> {
    let trimmed = value.trim();
    let invalid = || Error::InvalidInteger {
        field,
        value: value.to_owned(),
    };
    let overflow = || Error::IntegerOverflow {
        field,
        value: value.to_owned(),
    };

    if let Some(magnitude) = trimmed.strip_prefix('-') {
        if magnitude.is_empty() || !magnitude.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        return if magnitude.trim_start_matches('0').is_empty() {
            Ok(U256::ZERO)
        } else {
            Err(overflow())
        };
    }

    let (digits, radix) = match trimmed.strip_prefix("0x") {
        Some(digits) if digits.chars().all(|c| c.is_ascii_hexdigit()) => (digits, 16),
        Some(_) => return Err(invalid()),
        None if trimmed.chars().all(|c| c.is_ascii_digit()) => (trimmed, 10),
        None => return Err(invalid()),
    };
    if digits.is_empty() {
        return Err(invalid());
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(significant, radix).map_err(|_| overflow())
}
