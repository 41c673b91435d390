//! Implementation of the secp256k1 elliptic curve
// • a = 0, b = 7, making the equation y2 = x3 + 7
// • p = 2^256 – 2^32 – 977
// • Gx =
// 0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798
// • Gy =
// 0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8
// • n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141

use std::{
    fmt::Display,
    ops::{Add, Mul, Neg, Sub},
};

use primitive_types::U256;

use crate::error::Error;

use super::{
    field_element::{FieldElement, FieldParameter, FiniteField},
    point::G1Point,
};

// Limbs are little-endian 64-bit words.
const SECP256K1_PRIME: U256 = U256([
    0xFFFFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
]);

const SECP256K1_ORDER: U256 = U256([
    0xBFD25E8CD0364141,
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
]);

const GENERATOR_X: U256 = U256([
    0x59F2815B16F81798,
    0x029BFCDB2DCE28D9,
    0x55A06295CE870B07,
    0x79BE667EF9DCBBAC,
]);

const GENERATOR_Y: U256 = U256([
    0x9C47D08FFB10D4B8,
    0xFD17B448A6855419,
    0x5DA4FBFC0E1108A8,
    0x483ADA7726A3C465,
]);

/// (p + 1) / 4, valid as a square-root exponent because p ≡ 3 (mod 4).
const SQRT_EXPONENT: U256 = U256([
    0xFFFFFFFFBFFFFF0C,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0x3FFFFFFFFFFFFFFF,
]);

/// Curve coefficient `b`.
pub const B: U256 = U256([7, 0, 0, 0]);

/// Base field modulus `p`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord)]
pub struct Mod {}

impl FieldParameter for Mod {
    const MODULUS: U256 = SECP256K1_PRIME;
}

/// Group order `n`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord)]
pub struct Order {}

impl FieldParameter for Order {
    const MODULUS: U256 = SECP256K1_ORDER;
}

pub type F256K1 = FieldElement<Mod>;
pub type Scalar = FieldElement<Order>;

impl F256K1 {
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow(SQRT_EXPONENT);
        (root * root == *self).then_some(root)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum G1AffinityPoint {
    Coordinate { x: F256K1, y: F256K1 },
    Infinity,
}

impl G1AffinityPoint {
    pub const N: U256 = SECP256K1_ORDER;

    pub fn g() -> Self {
        Self::Coordinate {
            x: F256K1::new(GENERATOR_X),
            y: F256K1::new(GENERATOR_Y),
        }
    }

    /// Recovers the point with abscissa `x` whose ordinate has the requested parity.
    pub fn lift_x(x: F256K1, y_is_odd: bool) -> Result<Self, Error> {
        let alpha = x.pow(U256::from(3u64)) + F256K1::from(B);
        let beta = alpha.sqrt().ok_or(Error::CoordinateNotInCurve)?;
        let y = if beta.is_odd() == y_is_odd { beta } else { -beta };
        Ok(Self::Coordinate { x, y })
    }
}

impl G1Point for G1AffinityPoint {
    type Field = F256K1;
    type SubField = Scalar;

    fn is_identity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    fn coordinates(&self) -> Option<(F256K1, F256K1)> {
        match *self {
            Self::Coordinate { x, y } => Some((x, y)),
            Self::Infinity => None,
        }
    }
}

impl Display for G1AffinityPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coordinate { x, y } => write!(f, "Point({x}, {y})"),
            Self::Infinity => write!(f, "Point(infinity)"),
        }
    }
}

impl Add for G1AffinityPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let (x1, y1, x2, y2) = match (self, rhs) {
            (Self::Infinity, p) | (p, Self::Infinity) => return p,
            (Self::Coordinate { x: x1, y: y1 }, Self::Coordinate { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };

        let slope = if x1 == x2 {
            // P + (-P), including the vertical tangent at y = 0
            if y1 != y2 || y1.is_zero() {
                return Self::Infinity;
            }
            let three = F256K1::from(U256::from(3u64));
            let two = F256K1::from(U256::from(2u64));
            three * x1 * x1 / (two * y1)
        } else {
            (y2 - y1) / (x2 - x1)
        };
        let Some(slope) = slope else {
            return Self::Infinity;
        };

        let x3 = slope * slope - x1 - x2;
        let y3 = slope * (x1 - x3) - y1;
        Self::Coordinate { x: x3, y: y3 }
    }
}

impl Neg for G1AffinityPoint {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Coordinate { x, y } => Self::Coordinate { x, y: -y },
            Self::Infinity => Self::Infinity,
        }
    }
}

impl Sub for G1AffinityPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Mul<Scalar> for G1AffinityPoint {
    type Output = Self;

    /// Double-and-add, most significant bit first.
    fn mul(self, scalar: Scalar) -> Self::Output {
        let k = scalar.as_u256();
        let mut acc = Self::Infinity;
        for i in (0..k.bits()).rev() {
            acc = acc + acc;
            if k.bit(i) {
                acc = acc + self;
            }
        }
        acc
    }
}
