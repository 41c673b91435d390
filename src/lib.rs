pub mod cli;
pub mod ecc;
pub mod error;
pub mod eth;
pub mod logger;
pub mod registration;
pub mod signer;
