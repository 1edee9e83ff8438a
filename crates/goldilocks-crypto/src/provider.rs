//! Trait-based seams between the EdDSA protocol and its collaborators.
//!
//! The protocol layer in [`crate::ed448`] is written against these traits
//! only; [`crate::sha3::Shake256`] and [`crate::curve448::edwards::Ed448Group`]
//! are the implementations shipped with the crate. Dispatch is static.

use goldilocks_types::{CryptoError, HashAlgId};
use zeroize::Zeroize;

/// Encoded point size used by the 448-bit EdDSA wire format.
pub const POINT_BYTES: usize = 57;

/// Encoded scalar size used by the 448-bit EdDSA wire format.
pub const SCALAR_ENCODED_BYTES: usize = 57;

/// An extendable-output function (XOF).
pub trait Xof: Sized + Send + Sync {
    /// Algorithm identifier, for logging.
    const ALG_ID: HashAlgId;

    /// Create a fresh absorbing state.
    fn new() -> Self;

    /// Absorb more input. Fails once output has been squeezed.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Switch to squeezing (if not already) and fill `out`.
    ///
    /// Successive calls continue the output stream.
    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), CryptoError>;

    /// One-shot: absorb every part in order and squeeze `out.len()` bytes.
    fn hash(out: &mut [u8], parts: &[&[u8]]) -> Result<(), CryptoError> {
        let mut ctx = Self::new();
        for part in parts {
            ctx.update(part)?;
        }
        ctx.finalize_into(out)
    }
}

/// The prime-order group used by EdDSA over a 448-bit Edwards curve.
///
/// Points handed out by `decode_like_eddsa_and_mul_by_ratio` and consumed by
/// `encode_like_eddsa_mul_by_ratio` live in the group's internal
/// representation; the ratio between the two is `ENCODE_RATIO`, which callers
/// compensate for by halving secret scalars before multiplying.
pub trait CurveGroup {
    type Point: Copy;
    type Scalar: Clone + Zeroize;

    /// Cofactor of the curve.
    const COFACTOR: u32;
    /// Factor applied to a point by `encode_like_eddsa_mul_by_ratio`.
    const ENCODE_RATIO: u32;
    /// Group order, little-endian, at the encoded scalar width.
    const ORDER_LE: [u8; SCALAR_ENCODED_BYTES];

    /// Decode an EdDSA point encoding. `None` if it is not a valid point.
    fn decode_like_eddsa_and_mul_by_ratio(enc: &[u8; POINT_BYTES]) -> Option<Self::Point>;

    /// Multiply by `ENCODE_RATIO` and write the EdDSA encoding.
    fn encode_like_eddsa_mul_by_ratio(p: &Self::Point) -> [u8; POINT_BYTES];

    /// Constant-time s·P.
    fn scalarmul(p: &Self::Point, s: &Self::Scalar) -> Self::Point;

    /// Constant-time s·B for the group's base point B, using a base point
    /// table the group builds once.
    fn precomputed_base_scalarmul(s: &Self::Scalar) -> Self::Point;

    /// s1·B + s2·P2. Variable time: public inputs only.
    fn base_double_scalarmul_non_secret(
        s1: &Self::Scalar,
        s2: &Self::Scalar,
        p2: &Self::Point,
    ) -> Self::Point;

    /// s1·P1 + s2·P2. Variable time: public inputs only.
    fn double_scalarmul_non_secret(
        s1: &Self::Scalar,
        p1: &Self::Point,
        s2: &Self::Scalar,
        p2: &Self::Point,
    ) -> Self::Point;

    /// Equality of points modulo the small-order torsion.
    fn point_eq(p: &Self::Point, q: &Self::Point) -> bool;

    /// Reduce an arbitrary-length little-endian string to a scalar.
    fn scalar_decode_long(bytes: &[u8]) -> Self::Scalar;
    fn scalar_encode(s: &Self::Scalar) -> [u8; SCALAR_ENCODED_BYTES];
    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;
    fn scalar_halve(a: &Self::Scalar) -> Self::Scalar;
    fn scalar_zero() -> Self::Scalar;
}
