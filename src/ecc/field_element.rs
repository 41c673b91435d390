use std::{
    fmt::{Debug, Display},
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign},
};

use num_bigint::BigUint;
use primitive_types::U256;
use zeroize::Zeroize;

pub trait FiniteField:
    Sized               // Size known at compile time
    + From<U256>        // Can create an element from u256
    + Debug + Display   // For debugging and printing
    + Copy              // Easy to copy during assignment
    + PartialEq
    // Mathemetical Operations ----
    + Neg<Output=Self>
    + Add<Self, Output=Self> + AddAssign<Self> // For + and +=
    + Sub<Self, Output=Self> + SubAssign<Self> // For - and -=
    + Mul<Self, Output=Self> + MulAssign<Self> // For * and *=
    + Div<Self, Output=Option<Self>>
    // Mathemetical Operations ----
{
    /// The multiplicative and additive identities
    fn one() -> Self;
    fn zero() -> Self;

    fn is_zero(&self) -> bool;

    /// Inverse of a non-zero element. Returns `None` for zero.
    fn inverse(&self) -> Option<Self>;

    /// Raise element to some power
    fn pow(&self, exp: U256) -> Self;

    /// Export to u256
    fn as_u256(&self) -> U256;
}

/// A prime modulus. Every modulus used here is below 2^256.
pub trait FieldParameter: Copy + Debug + PartialEq + Eq + PartialOrd + Ord {
    const MODULUS: U256;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldElement<P: FieldParameter> {
    value: U256,
    _phantom: std::marker::PhantomData<P>,
}

impl<P: FieldParameter> FieldElement<P> {
    /// Panics when `value` is not already reduced; use [`Self::reduce`] or
    /// [`Self::checked`] for untrusted input.
    pub fn new(value: U256) -> Self {
        assert!(
            value < P::MODULUS,
            "FieldElement value must be less than the modulus"
        );

        Self {
            value,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns `None` unless `value < modulus`.
    pub fn checked(value: U256) -> Option<Self> {
        (value < P::MODULUS).then(|| Self::new(value))
    }

    /// Takes `value mod modulus`.
    pub fn reduce(value: U256) -> Self {
        Self::new(value % P::MODULUS)
    }

    pub fn from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::checked(U256::from_big_endian(bytes))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.value.to_big_endian()
    }

    pub fn is_odd(&self) -> bool {
        self.value.bit(0)
    }
}

fn to_biguint(u: U256) -> BigUint {
    BigUint::from_bytes_be(&u.to_big_endian())
}

/// The caller guarantees `b` fits in 256 bits.
fn from_biguint(b: &BigUint) -> U256 {
    U256::from_big_endian(&b.to_bytes_be())
}

impl<P: FieldParameter> Display for FieldElement<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl<P: FieldParameter> From<U256> for FieldElement<P> {
    fn from(value: U256) -> Self {
        Self::new(value)
    }
}

impl<P: FieldParameter> Zeroize for FieldElement<P> {
    fn zeroize(&mut self) {
        self.value.0.zeroize();
    }
}

impl<P: FieldParameter> FiniteField for FieldElement<P> {
    fn one() -> Self {
        Self::new(U256::one())
    }

    fn zero() -> Self {
        Self::new(U256::zero())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        // Fermat's Little Theorem: a^(p-2) ≡ a^(-1) (mod p) for prime p
        Some(self.pow(P::MODULUS - U256::from(2u64)))
    }

    fn pow(&self, exp: U256) -> Self {
        let result = to_biguint(self.value).modpow(&to_biguint(exp), &to_biguint(P::MODULUS));
        Self::new(from_biguint(&result))
    }

    fn as_u256(&self) -> U256 {
        self.value
    }
}

// Arithmetic Operations
impl<P: FieldParameter> Add for FieldElement<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        // Both operands are below the modulus, so a carry out of 256 bits
        // still leaves `sum - modulus` representable.
        let (sum, carry) = self.value.overflowing_add(rhs.value);
        if carry || sum >= P::MODULUS {
            Self::new(sum.overflowing_sub(P::MODULUS).0)
        } else {
            Self::new(sum)
        }
    }
}

impl<P: FieldParameter> AddAssign for FieldElement<P> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FieldParameter> Sub for FieldElement<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.value >= rhs.value {
            Self::new(self.value - rhs.value)
        } else {
            Self::new(P::MODULUS - (rhs.value - self.value))
        }
    }
}

impl<P: FieldParameter> SubAssign for FieldElement<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FieldParameter> Mul for FieldElement<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let product = to_biguint(self.value) * to_biguint(rhs.value) % to_biguint(P::MODULUS);
        Self::new(from_biguint(&product))
    }
}

impl<P: FieldParameter> MulAssign for FieldElement<P> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: FieldParameter> Div for FieldElement<P> {
    type Output = Option<Self>;

    fn div(self, rhs: Self) -> Self::Output {
        rhs.inverse().map(|inv| self * inv)
    }
}

impl<P: FieldParameter> Neg for FieldElement<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.is_zero() {
            self
        } else {
            Self::new(P::MODULUS - self.value)
        }
    }
}
