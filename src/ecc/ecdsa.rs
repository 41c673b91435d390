use std::fmt::Debug;

use hmac::{Hmac, Mac};
use primitive_types::U256;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

use super::{
    field_element::FiniteField,
    point::G1Point,
    secp256k1::{F256K1, G1AffinityPoint, Scalar},
};

const SECRET_KEY_SIZE: usize = 32;

/// floor(n / 2). A normalized signature never has `s` above this.
const HALF_ORDER: U256 = U256([
    0xDFE92F46681B20A0,
    0x5D576E7357A4501D,
    0xFFFFFFFFFFFFFFFF,
    0x7FFFFFFFFFFFFFFF,
]);

type HmacSha256 = Hmac<Sha256>;

/// An ECDSA signature `(r, s)` plus the recovery id selecting which curve point
/// `R` produced `r`. Bit 0 of the id is the parity of `R.y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    r: Scalar,
    s: Scalar,
    recovery_id: u8,
}

impl RecoverableSignature {
    /// Parses big-endian `r` and `s`. Both must lie in `[1, n)` and the
    /// recovery id must be 0 or 1.
    pub fn from_bytes(r: &[u8; 32], s: &[u8; 32], recovery_id: u8) -> Result<Self> {
        let r = Scalar::from_be_bytes(r)
            .filter(|r| !r.is_zero())
            .ok_or_else(|| Error::InvalidSignature("r is outside [1, n)".into()))?;
        let s = Scalar::from_be_bytes(s)
            .filter(|s| !s.is_zero())
            .ok_or_else(|| Error::InvalidSignature("s is outside [1, n)".into()))?;
        if recovery_id > 1 {
            return Err(Error::InvalidSignature(format!(
                "unsupported recovery id {recovery_id}"
            )));
        }
        Ok(Self { r, s, recovery_id })
    }

    pub fn r(&self) -> Scalar {
        self.r
    }

    pub fn s(&self) -> Scalar {
        self.s
    }

    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// Recovers the public key that produced this signature over `message_hash`:
    /// `Q = r⁻¹ (sR − zG)`.
    pub fn recover(&self, message_hash: &[u8; 32]) -> Result<PublicKey> {
        // r < n < p, so r is always a valid abscissa candidate
        let x = F256K1::new(self.r.as_u256());
        let big_r = G1AffinityPoint::lift_x(x, self.recovery_id & 1 == 1).map_err(|_| {
            Error::InvalidSignature("r is not the abscissa of a curve point".into())
        })?;

        let z = Scalar::reduce(U256::from_big_endian(message_hash));
        let r_inv = self
            .r
            .inverse()
            .ok_or_else(|| Error::InvalidSignature("r is zero".into()))?;
        let u1 = -(z * r_inv);
        let u2 = self.s * r_inv;

        let point = G1AffinityPoint::g() * u1 + big_r * u2;
        if point.is_identity() {
            return Err(Error::InvalidSignature(
                "recovered the point at infinity".into(),
            ));
        }
        Ok(PublicKey { point })
    }
}

/// Represents a secp256k1 private key.
/// It's a scalar value within the order of the generator point.
///
/// The scalar is wiped when the key is dropped and never shows up in `Debug` output.
pub struct PrivateKey {
    secret: Scalar,
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl PrivateKey {
    /// Parses a hex-encoded 32-byte key, with or without a `0x` prefix.
    /// Error messages never echo the input.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(
            hex::decode(digits)
                .map_err(|_| Error::InvalidKeyFormat("not a hex string".into()))?,
        );
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_KEY_SIZE {
            return Err(Error::InvalidKeyFormat(format!(
                "expected {SECRET_KEY_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let mut value = U256::from_big_endian(bytes);
        let secret = Scalar::checked(value).filter(|s| !s.is_zero());
        value.0.zeroize();
        secret
            .map(|secret| Self { secret })
            .ok_or_else(|| Error::InvalidKeyFormat("scalar must be in [1, n)".into()))
    }

    /// Derives the public key corresponding to this private key.
    /// pubKey = privateKey * G (where G is the generator point)
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            point: G1AffinityPoint::g() * self.secret,
        }
    }

    /// Signs a 32-byte message hash with a deterministic nonce (RFC 6979).
    ///
    /// The hash is reduced modulo `n` first, `s` is normalized to the lower
    /// half of the order and the recovery id is adjusted to match.
    pub fn sign_recoverable(&self, message_hash: &[u8; 32]) -> Result<RecoverableSignature> {
        let z = Scalar::reduce(U256::from_big_endian(message_hash));
        let mut nonces = Rfc6979::new(&self.secret, &z);

        loop {
            let k = nonces.next_k();
            let Some((rx, ry)) = (G1AffinityPoint::g() * k).coordinates() else {
                continue;
            };
            if rx.as_u256() >= G1AffinityPoint::N {
                return Err(Error::SigningError(
                    "nonce point abscissa exceeds the group order".into(),
                ));
            }

            let r = Scalar::new(rx.as_u256());
            let Some(k_inv) = k.inverse() else {
                continue;
            };
            let s = (z + r * self.secret) * k_inv;
            if r.is_zero() || s.is_zero() {
                continue;
            }

            let mut recovery_id = u8::from(ry.is_odd());
            let s = if s.as_u256() > HALF_ORDER {
                recovery_id ^= 1;
                -s
            } else {
                s
            };

            return Ok(RecoverableSignature { r, s, recovery_id });
        }
    }
}

/// HMAC-DRBG state from RFC 6979 section 3.2, instantiated with HMAC-SHA256.
struct Rfc6979 {
    k: [u8; 32],
    v: [u8; 32],
    primed: bool,
}

impl Rfc6979 {
    fn new(secret: &Scalar, z: &Scalar) -> Self {
        let x = Zeroizing::new(secret.to_be_bytes());
        let h = z.to_be_bytes();

        // Step b, c
        let v = [0x01u8; 32];
        let k = [0x00u8; 32];

        // Step d: K = HMAC_K(V || 0x00 || int2octets(x) || bits2octets(h))
        let k = hmac_sha256(
            &k,
            &[v.as_slice(), [0x00].as_slice(), x.as_slice(), h.as_slice()],
        );
        // Step e
        let v = hmac_sha256(&k, &[v.as_slice()]);
        // Step f: K = HMAC_K(V || 0x01 || int2octets(x) || bits2octets(h))
        let k = hmac_sha256(
            &k,
            &[v.as_slice(), [0x01].as_slice(), x.as_slice(), h.as_slice()],
        );
        // Step g
        let v = hmac_sha256(&k, &[v.as_slice()]);

        Self { k, v, primed: false }
    }

    /// Step h. Each call after the first also reseeds as if the previous
    /// candidate had been rejected.
    fn next_k(&mut self) -> Scalar {
        loop {
            if self.primed {
                self.k = hmac_sha256(&self.k, &[self.v.as_slice(), [0x00].as_slice()]);
                self.v = hmac_sha256(&self.k, &[self.v.as_slice()]);
            }
            self.primed = true;

            self.v = hmac_sha256(&self.k, &[self.v.as_slice()]);
            if let Some(k) = Scalar::from_be_bytes(&self.v).filter(|k| !k.is_zero()) {
                return k;
            }
        }
    }
}

impl Drop for Rfc6979 {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take a key of any size");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    point: G1AffinityPoint,
}

impl PublicKey {
    /// SEC1 uncompressed encoding: `0x04 || X || Y`.
    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        let mut result = [0u8; 65];
        result[0] = 0x04;
        if let Some((x, y)) = self.point.coordinates() {
            result[1..33].copy_from_slice(&x.to_be_bytes());
            result[33..65].copy_from_slice(&y.to_be_bytes());
        }
        result
    }
}
