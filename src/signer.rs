use std::fmt::{Debug, Display};

use alloy_primitives::{Address, utils::eip191_hash_message};
use clap::ValueEnum;
use tracing::debug;

use crate::{
    ecc::ecdsa::PrivateKey,
    error::{Error, Result},
    eth::{Signature, address_from_public_key},
};

/// What the ECDSA step actually signs. The verifier must use the same scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SigningScheme {
    /// EIP-191 `personal_sign`: the 32-byte hash is wrapped in the
    /// "\x19Ethereum Signed Message:\n32" prefix and hashed again.
    #[default]
    Personal,
    /// The payload hash is signed as-is, for `ecrecover(hash, v, r, s)`.
    Raw,
}

impl SigningScheme {
    pub fn digest(&self, payload_hash: &[u8; 32]) -> [u8; 32] {
        match self {
            SigningScheme::Personal => eip191_hash_message(payload_hash).0,
            SigningScheme::Raw => *payload_hash,
        }
    }
}

impl Display for SigningScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningScheme::Personal => f.write_str("personal"),
            SigningScheme::Raw => f.write_str("raw"),
        }
    }
}

/// Signs payload hashes under a fixed scheme. The signer address is derived
/// once at construction.
pub struct PayloadSigner {
    key: PrivateKey,
    address: Address,
    scheme: SigningScheme,
}

impl Debug for PayloadSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadSigner")
            .field("address", &self.address)
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

impl PayloadSigner {
    pub fn new(key: PrivateKey, scheme: SigningScheme) -> Self {
        let address = address_from_public_key(&key.public_key());
        Self {
            key,
            address,
            scheme,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn scheme(&self) -> SigningScheme {
        self.scheme
    }

    /// Signs a 32-byte payload hash and returns the `v`-normalized signature.
    ///
    /// The signature is checked by recovering the signer from it before it is
    /// returned.
    pub fn sign(&self, payload_hash: &[u8]) -> Result<Signature> {
        let payload_hash: &[u8; 32] = payload_hash.try_into().map_err(|_| {
            Error::SigningError(format!(
                "payload hash must be 32 bytes, got {}",
                payload_hash.len()
            ))
        })?;

        let digest = self.scheme.digest(payload_hash);
        let recoverable = self.key.sign_recoverable(&digest)?;
        let signature = Signature::from_recoverable(&recoverable)
            .map_err(|e| Error::SigningError(e.to_string()))?;

        let recovered = signature
            .recover_address(&digest)
            .map_err(|e| Error::SigningError(e.to_string()))?;
        if recovered != self.address {
            return Err(Error::SigningError(format!(
                "recovered {recovered} instead of {}",
                self.address
            )));
        }

        debug!(
            scheme = %self.scheme,
            signer = %self.address.to_checksum(None),
            digest = %hex::encode(digest),
            v = signature.v(),
            "signed payload"
        );
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::RegistrationParams;

    const ANVIL_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    const PAYLOAD_HASH: &str = "a4eba280da49c0dc2d35d2239a265b83e0acaa50f1b830c4f194fa59c6caece2";

    fn signer(scheme: SigningScheme) -> PayloadSigner {
        PayloadSigner::new(PrivateKey::from_hex(ANVIL_PRIVATE_KEY).unwrap(), scheme)
    }

    fn payload_hash() -> [u8; 32] {
        hex::decode(PAYLOAD_HASH).unwrap().try_into().unwrap()
    }

    #[test]
    fn signer_address_is_cached() {
        assert_eq!(
            signer(SigningScheme::Personal).address().to_checksum(None),
            ANVIL_ADDRESS
        );
    }

    #[test]
    fn personal_digest_of_golden_hash() {
        assert_eq!(
            hex::encode(SigningScheme::Personal.digest(&payload_hash())),
            "183a035058a59a16ba1dd97ba2d4fcbed2c7d25eac9681f549f074f066eae8e0"
        );
        assert_eq!(SigningScheme::Raw.digest(&payload_hash()), payload_hash());
    }

    #[test]
    fn golden_personal_signature() {
        let signature = signer(SigningScheme::Personal).sign(&payload_hash()).unwrap();
        assert_eq!(
            signature.to_hex(),
            "8dc36bc8b0a8e3a5eaccd11185045d28b6abeffaaca77e032fd27c5ce91e5bdc\
             4a7cb1875a53ce68afd5e782bf64e2f157dbbd7417116f88113adcc7ef1eb6d0\
             1c"
        );
    }

    #[test]
    fn golden_raw_signature() {
        let signature = signer(SigningScheme::Raw).sign(&payload_hash()).unwrap();
        assert_eq!(
            signature.to_hex(),
            "b1616eeb81bd206621f7440218569ca62de9b4a3bf8a9427816f956df12c413a\
             49eafe9cdbf8719e24b9c6c3fb66003c30ffb533ce02a4af478b3d5fe045e5d4\
             1b"
        );
    }

    #[test]
    fn output_is_deterministic_and_well_formed() {
        let signer = signer(SigningScheme::Personal);
        let first = signer.sign(&payload_hash()).unwrap();
        let second = signer.sign(&payload_hash()).unwrap();
        assert_eq!(first, second);
        assert!(first.v() == 27 || first.v() == 28);
        assert_eq!(first.to_hex().len(), 130);
    }

    #[test]
    fn signature_recovers_to_signer() {
        let signer = signer(SigningScheme::Personal);
        let signature = signer.sign(&payload_hash()).unwrap();

        let digest = SigningScheme::Personal.digest(&payload_hash());
        assert_eq!(signature.recover_address(&digest).unwrap(), signer.address());
    }

    #[test]
    fn schemes_are_not_interchangeable() {
        let personal = signer(SigningScheme::Personal);
        let signature = personal.sign(&payload_hash()).unwrap();
        let raw_digest = SigningScheme::Raw.digest(&payload_hash());
        assert_ne!(
            signature.recover_address(&raw_digest).ok(),
            Some(personal.address())
        );
    }

    #[test]
    fn v_is_27_or_28_across_payloads() {
        let signer = signer(SigningScheme::Personal);
        for duration in 0..8u64 {
            let params = RegistrationParams::parse(
                ANVIL_ADDRESS,
                "0x0000000000000000000000000000000000000000",
                &duration.to_string(),
                "whitelisted",
            )
            .unwrap();
            let signature = signer.sign(&params.payload_hash()).unwrap();
            assert!(signature.v() == 27 || signature.v() == 28);
            let digest = SigningScheme::Personal.digest(&params.payload_hash());
            assert_eq!(signature.recover_address(&digest).unwrap(), signer.address());
        }
    }

    #[test]
    fn wrong_hash_length_is_a_signing_error() {
        let signer = signer(SigningScheme::Personal);
        for len in [0, 31, 33] {
            assert!(matches!(
                signer.sign(&vec![0u8; len]),
                Err(Error::SigningError(_))
            ));
        }
    }

    #[test]
    fn debug_does_not_leak_key() {
        let shown = format!("{:?}", signer(SigningScheme::Raw));
        assert!(!shown.contains(&ANVIL_PRIVATE_KEY[..16]));
        assert!(shown.contains("PayloadSigner"));
    }
}
