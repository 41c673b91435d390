use std::{ffi::OsString, fmt::Debug};

use clap::Parser;
use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    ecc::ecdsa::PrivateKey,
    error::{Error, Result},
    eth::Signature,
    registration::RegistrationParams,
    signer::{PayloadSigner, SigningScheme},
};

/// Anvil's first development account.
const DEFAULT_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const DEFAULT_OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const DEFAULT_REFERRER: &str = "0x0000000000000000000000000000000000000000";
/// 365 days in seconds.
const DEFAULT_DURATION: &str = "31536000";
const DEFAULT_NAME: &str = "whitelisted";

/// Hex-encoded private key as given on the command line. Wiped on drop and
/// never printed.
#[derive(Clone)]
pub struct SecretHex(Zeroizing<String>);

impl From<String> for SecretHex {
    fn from(value: String) -> Self {
        Self(Zeroizing::new(value))
    }
}

impl Debug for SecretHex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretHex(<redacted>)")
    }
}

/// Sign a registration payload `(owner, referrer, duration, name)` and print
/// the `r||s||v` signature.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Hex-encoded secp256k1 private key, with or without `0x`.
    #[arg(
        long,
        env = "SIGNER_PRIVATE_KEY",
        default_value = DEFAULT_PRIVATE_KEY,
        hide_default_value = true,
        hide_env_values = true
    )]
    pub private_key: SecretHex,

    /// Account being registered.
    #[arg(long, env = "SIGNER_OWNER", default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Referring account, the zero address for none.
    #[arg(long, env = "SIGNER_REFERRER", default_value = DEFAULT_REFERRER)]
    pub referrer: String,

    /// Registration length in seconds, decimal or `0x` hex.
    #[arg(long, env = "SIGNER_DURATION", default_value = DEFAULT_DURATION)]
    pub duration: String,

    /// Name being registered.
    #[arg(long, env = "SIGNER_NAME", default_value = DEFAULT_NAME)]
    pub name: OsString,

    /// What gets signed: the EIP-191 wrapped hash or the bare payload hash.
    #[arg(long, env = "SIGNER_SCHEME", value_enum, default_value_t = SigningScheme::Personal)]
    pub scheme: SigningScheme,
}

impl Cli {
    /// Validates every input. Nothing is encoded or signed until all of them
    /// have been accepted.
    pub fn into_request(self) -> Result<SigningRequest> {
        let key = PrivateKey::from_hex(&self.private_key.0)?;
        let name = self.name.into_string().map_err(|raw| {
            Error::EncodingError(format!("`name` is not valid UTF-8: {}", raw.to_string_lossy()))
        })?;
        let params = RegistrationParams::parse(&self.owner, &self.referrer, &self.duration, &name)?;
        let signer = PayloadSigner::new(key, self.scheme);

        debug!(
            signer = %signer.address(),
            scheme = %signer.scheme(),
            owner = %params.owner(),
            referrer = %params.referrer(),
            duration = %params.duration(),
            name = params.name(),
            "validated inputs"
        );
        Ok(SigningRequest { signer, params })
    }
}

/// Fully validated inputs, ready to be encoded, hashed and signed.
#[derive(Debug)]
pub struct SigningRequest {
    pub signer: PayloadSigner,
    pub params: RegistrationParams,
}

impl SigningRequest {
    pub fn sign(&self) -> Result<Signature> {
        self.signer.sign(&self.params.payload_hash())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::error::AddressError;

    const FLAGS: [(&str, &str); 6] = [
        ("private-key", DEFAULT_PRIVATE_KEY),
        ("owner", DEFAULT_OWNER),
        ("referrer", DEFAULT_REFERRER),
        ("duration", DEFAULT_DURATION),
        ("name", DEFAULT_NAME),
        ("scheme", "personal"),
    ];

    /// Passes every flag explicitly so `SIGNER_*` variables in the test
    /// environment cannot leak into the result.
    fn parse(overrides: &[(&str, &str)]) -> Cli {
        let mut args = vec!["registration-signer".to_owned()];
        for (flag, default) in FLAGS {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == flag)
                .map_or(default, |(_, value)| *value);
            args.push(format!("--{flag}"));
            args.push(value.to_owned());
        }
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn compiled_in_defaults() {
        let command = Cli::command();
        for (flag, expected) in FLAGS {
            let arg = command
                .get_arguments()
                .find(|arg| arg.get_long() == Some(flag))
                .unwrap();
            let defaults: Vec<_> = arg
                .get_default_values()
                .iter()
                .map(|value| value.to_str().unwrap())
                .collect();
            assert_eq!(defaults, [expected], "--{flag}");
        }
    }

    #[test]
    fn defaults_produce_golden_signature() {
        let request = parse(&[]).into_request().unwrap();
        assert_eq!(
            request.signer.address().to_checksum(None),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
        assert_eq!(request.params.name(), "whitelisted");
        assert_eq!(
            request.sign().unwrap().to_hex(),
            "8dc36bc8b0a8e3a5eaccd11185045d28b6abeffaaca77e032fd27c5ce91e5bdc\
             4a7cb1875a53ce68afd5e782bf64e2f157dbbd7417116f88113adcc7ef1eb6d01c"
        );
    }

    #[test]
    fn scheme_flag_selects_raw() {
        let cli = parse(&[("scheme", "raw")]);
        assert_eq!(cli.scheme, SigningScheme::Raw);
        assert_eq!(
            cli.into_request().unwrap().sign().unwrap().to_hex(),
            "b1616eeb81bd206621f7440218569ca62de9b4a3bf8a9427816f956df12c413a\
             49eafe9cdbf8719e24b9c6c3fb66003c30ffb533ce02a4af478b3d5fe045e5d41b"
        );
    }

    #[test]
    fn unknown_scheme_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["registration-signer", "--scheme", "eip712"]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_private_key_fails_validation() {
        let result = parse(&[("private-key", "0xnothex")]).into_request();
        assert!(matches!(result, Err(Error::InvalidKeyFormat(_))));
    }

    #[test]
    fn short_owner_fails_validation() {
        let short = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb922";
        let result = parse(&[("owner", short)]).into_request();
        assert_eq!(
            result.unwrap_err(),
            Error::InvalidAddress {
                field: "owner",
                source: AddressError::InvalidLength(19),
            }
        );
    }

    #[test]
    fn oversized_duration_fails_validation() {
        let too_big = format!("0x1{}", "0".repeat(64));
        let result = parse(&[("duration", too_big.as_str())]).into_request();
        assert!(matches!(
            result,
            Err(Error::IntegerOverflow {
                field: "duration",
                ..
            })
        ));
    }

    #[test]
    fn overrides_change_the_signature() {
        let default = parse(&[]).into_request().unwrap().sign().unwrap();
        let renamed = parse(&[("name", "blacklisted")])
            .into_request()
            .unwrap()
            .sign()
            .unwrap();
        assert_ne!(default, renamed);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_is_an_encoding_error() {
        use std::os::unix::ffi::OsStringExt;

        let mut cli = parse(&[]);
        cli.name = OsString::from_vec(vec![0x77, 0xff, 0x6c]);
        assert!(matches!(cli.into_request(), Err(Error::EncodingError(_))));
    }

    #[test]
    fn debug_hides_private_key() {
        let shown = format!("{:?}", parse(&[]));
        assert!(!shown.contains("ac0974bec39a17e3"));
        assert!(shown.contains("<redacted>"));
    }
}
