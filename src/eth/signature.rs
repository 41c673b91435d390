use std::fmt::Display;

use crate::{
    ecc::ecdsa::RecoverableSignature,
    error::{Error, Result},
};

use super::{Address, address_from_public_key};

pub const SIGNATURE_SIZE: usize = 65;

/// Offset added to a `{0, 1}` recovery id to obtain Ethereum's `v`.
const V_OFFSET: u8 = 27;

/// A 65-byte `r || s || v` signature with `v` in `{27, 28}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
    v: u8,
}

impl Signature {
    /// Splits `r` (bytes 0..32), `s` (32..64) and the raw `v` (byte 64),
    /// lifting a raw recovery id below 27 into `{27, 28}`.
    pub fn from_raw_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Result<Self> {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);

        let v = normalize_v(bytes[64]);
        if v != V_OFFSET && v != V_OFFSET + 1 {
            return Err(Error::InvalidSignature(format!("v must be 27 or 28, got {v}")));
        }
        Ok(Self { r, s, v })
    }

    pub fn from_recoverable(signature: &RecoverableSignature) -> Result<Self> {
        let mut raw = [0u8; SIGNATURE_SIZE];
        raw[0..32].copy_from_slice(&signature.r().to_be_bytes());
        raw[32..64].copy_from_slice(&signature.s().to_be_bytes());
        raw[64] = signature.recovery_id();
        Self::from_raw_bytes(&raw)
    }

    pub fn v(&self) -> u8 {
        self.v
    }

    /// Lowercase `r || s || v` hex without a prefix, always 130 characters.
    pub fn to_hex(&self) -> String {
        format!("{}{}{:02x}", hex::encode(self.r), hex::encode(self.s), self.v)
    }

    /// Recovers the address that signed `digest` (the exact 32 bytes that were
    /// passed to ECDSA, i.e. after any personal-message prefixing).
    pub fn recover_address(&self, digest: &[u8; 32]) -> Result<Address> {
        let recoverable = RecoverableSignature::from_bytes(&self.r, &self.s, self.v - V_OFFSET)?;
        let public_key = recoverable.recover(digest)?;
        Ok(address_from_public_key(&public_key))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// `v_raw < 27` is a bare recovery id and gets 27 added; anything else is
/// taken as already offset.
pub fn normalize_v(v_raw: u8) -> u8 {
    if v_raw < V_OFFSET {
        v_raw + V_OFFSET
    } else {
        v_raw
    }
}
