use std::{
    fmt::{Debug, Display},
    ops::{Add, Mul, Neg, Sub},
};

use super::field_element::FiniteField;

/// A point of a prime-order elliptic curve group written additively.
pub trait G1Point:
    Copy                // Representation small enough for efficient copy
    + Debug + Display   // For debugging and printing
    + PartialEq
    // Mathemetical Operations ----
    + Neg<Output=Self>
    + Sub<Output=Self>
    + Add<Output=Self>
    + Mul<Self::SubField, Output = Self>
    // Mathemetical Operations ----
{
    type Field: FiniteField; // The field containg x,y coordinates
    type SubField: FiniteField; // The scalar field for multiplication

    /// Check wheter current point is an identity point
    fn is_identity(&self) -> bool;

    /// Affine coordinates, `None` for the identity.
    fn coordinates(&self) -> Option<(Self::Field, Self::Field)>;
}
