use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid private key: {0}")]
    InvalidKeyFormat(String),
    #[error("Invalid address for `{field}`: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: AddressError,
    },
    #[error("`{field}` does not fit in uint256: {value}")]
    IntegerOverflow { field: &'static str, value: String },
    #[error("`{field}` is not an unsigned integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },
    #[error("Encoding error: {0}")]
    EncodingError(String),
    #[error("Signing error: {0}")]
    SigningError(String),
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    #[error("Coordinate not in curve")]
    CoordinateNotInCurve,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("no hex digits")]
    MissingDigits,
    #[error("expected 20 bytes, got {0}")]
    InvalidLength(usize),
    #[error("not a hex string")]
    InvalidHex,
}
