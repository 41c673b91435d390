//! Hand-rolled secp256k1: field arithmetic, the affine group law and
//! recoverable ECDSA with RFC 6979 nonces.

pub mod ecdsa;
pub mod field_element;
pub mod point;
pub mod secp256k1;
