//! Curve448 (Goldilocks) primitives for Ed448.
//!
//! Provides field arithmetic over GF(2^448 − 2^224 − 1), scalar arithmetic
//! modulo the group order, and Edwards curve point operations for the
//! untwisted Edwards curve used by Ed448 (a = 1).

pub mod edwards;
pub mod field;
pub mod scalar;

pub use edwards::{Ed448Group, EdwardsPoint};
pub use field::Fe448;
pub use scalar::Scalar;
