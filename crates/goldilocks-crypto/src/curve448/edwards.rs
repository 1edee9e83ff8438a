//! Edwards curve point operations for Ed448 (Goldilocks).
//!
//! Uses extended coordinates (X, Y, Z, T) where T = XY/Z on the
//! Edwards curve: x² + y² = 1 + d·x²·y² with **a = 1** (NOT a = −1 like Ed25519).
//!
//! d = −39081 mod p.

use std::sync::OnceLock;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

use super::field::{Fe448, SER_BYTES};
use super::scalar::{Scalar, SCALAR_SER_BYTES};
use crate::provider::{CurveGroup, POINT_BYTES};

/// d = −39081 mod p = p − 39081.
const EDWARDS_D: Fe448 = Fe448::from_limbs([
    0xffffffffff6756,
    0xffffffffffffff,
    0xffffffffffffff,
    0xffffffffffffff,
    0xfffffffffffffe,
    0xffffffffffffff,
    0xffffffffffffff,
    0xffffffffffffff,
]);

/// Base point Y coordinate for Ed448 (from RFC 8032 §5.2.5), little-endian.
const BASE_Y: Fe448 = Fe448::from_canonical_bytes(&[
    0x14, 0xFA, 0x30, 0xF2, 0x5B, 0x79, 0x08, 0x98, 0xAD, 0xC8, 0xD7, 0x4E, 0x2C, 0x13, 0xBD, 0xFD,
    0xC4, 0x39, 0x7C, 0xE6, 0x1C, 0xFF, 0xD3, 0x3A, 0xD7, 0xC2, 0xA0, 0x05, 0x1E, 0x9C, 0x78, 0x87,
    0x40, 0x98, 0xA3, 0x6C, 0x73, 0x73, 0xEA, 0x4B, 0x62, 0xC7, 0xC9, 0x56, 0x37, 0x20, 0x76, 0x88,
    0x24, 0xBC, 0xB6, 0x6E, 0x71, 0x46, 0x3F, 0x69,
]);

/// Base point X coordinate for Ed448 (the even square root), little-endian.
const BASE_X: Fe448 = Fe448::from_canonical_bytes(&[
    0x5E, 0xC0, 0x0C, 0xC7, 0x2B, 0xA8, 0x26, 0x26, 0x8E, 0x93, 0x00, 0x8B, 0xE1, 0x80, 0x3B, 0x43,
    0x11, 0x65, 0xB6, 0x2A, 0xF7, 0x1A, 0xAE, 0x12, 0x64, 0xA4, 0xD3, 0xA3, 0x24, 0xE3, 0x6D, 0xEA,
    0x67, 0x17, 0x0F, 0x47, 0x70, 0x65, 0x14, 0x9E, 0xDA, 0x36, 0xBF, 0x22, 0xA6, 0x15, 0x1D, 0x22,
    0xED, 0x0D, 0xED, 0x6B, 0xC6, 0x70, 0x19, 0x4F,
]);

/// Group order L for Ed448, little-endian, padded to the 57-byte wire width.
pub const L_BYTES_LE: [u8; SCALAR_SER_BYTES] = [
    0xF3, 0x44, 0x58, 0xAB, 0x92, 0xC2, 0x78, 0x23, // bytes 0-7
    0x55, 0x8F, 0xC5, 0x8D, 0x72, 0xC2, 0x6C, 0x21, // bytes 8-15
    0x90, 0x36, 0xD6, 0xAE, 0x49, 0xDB, 0x4E, 0xC4, // bytes 16-23
    0xE9, 0x23, 0xCA, 0x7C, 0xFF, 0xFF, 0xFF, 0xFF, // bytes 24-31
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // bytes 32-39
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // bytes 40-47
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x3F, // bytes 48-55
    0x00, // byte 56
];

/// Window width for the constant-time scalar multiplication.
const WINDOW_BITS: usize = 4;
const WINDOW_SIZE: usize = 1 << WINDOW_BITS;

/// A point on the Edwards curve in extended coordinates.
/// Represents the affine point (X/Z, Y/Z) with T = XY/Z.
#[derive(Clone, Copy, Debug)]
pub struct EdwardsPoint {
    pub(crate) x: Fe448,
    pub(crate) y: Fe448,
    pub(crate) z: Fe448,
    pub(crate) t: Fe448,
}

impl EdwardsPoint {
    /// The identity point (neutral element): (0, 1, 1, 0).
    pub const IDENTITY: EdwardsPoint = EdwardsPoint {
        x: Fe448::ZERO,
        y: Fe448::ONE,
        z: Fe448::ONE,
        t: Fe448::ZERO,
    };

    /// The base point B for Ed448 (RFC 8032 §5.2.5).
    pub fn basepoint() -> Self {
        EdwardsPoint {
            x: BASE_X,
            y: BASE_Y,
            z: Fe448::ONE,
            t: BASE_X.mul(&BASE_Y),
        }
    }

    /// Extended point addition: R = A + B.
    ///
    /// Complete addition for a = 1. X1·X2 and Y1·Y2 are computed separately
    /// so that H = Y1Y2 − X1X2 (the a = −1 shortcut does not apply).
    pub fn add(&self, b: &EdwardsPoint) -> EdwardsPoint {
        let p1 = self.x.mul(&b.x); // X1·X2
        let p2 = self.y.mul(&b.y); // Y1·Y2
        let cc = EDWARDS_D.mul(&self.t).mul(&b.t); // C = d·T1·T2
        let dd = self.z.mul(&b.z); // D = Z1·Z2

        // E = (X1+Y1)·(X2+Y2) − X1X2 − Y1Y2 = X1Y2 + X2Y1
        let e = self.x.add(&self.y).mul(&b.x.add(&b.y)).sub(&p1).sub(&p2);
        let f = dd.sub(&cc); // F = D − C
        let g = dd.add(&cc); // G = D + C
        let h = p2.sub(&p1); // H = Y1Y2 − X1X2

        EdwardsPoint {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    /// Extended point doubling: R = 2A, with D = a·A = A.
    pub fn double(&self) -> EdwardsPoint {
        let aa = self.x.sqr(); // A = X1²
        let bb = self.y.sqr(); // B = Y1²
        let z2 = self.z.sqr();
        let cc = z2.add(&z2); // C = 2·Z1²
        let e = self.x.add(&self.y).sqr().sub(&aa).sub(&bb); // E = (X1+Y1)² − A − B
        let g = aa.add(&bb); // G = A + B
        let f = g.sub(&cc); // F = G − C
        let h = aa.sub(&bb); // H = A − B

        EdwardsPoint {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    pub fn neg(&self) -> EdwardsPoint {
        EdwardsPoint {
            x: self.x.neg(),
            y: self.y,
            z: self.z,
            t: self.t.neg(),
        }
    }

    /// Projective identity test: X = 0 and Y = Z.
    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.ct_eq(&self.z)
    }

    /// Encode to 57 bytes: y with the low bit of x in bit 7 of byte 56.
    pub fn to_bytes(&self) -> [u8; POINT_BYTES] {
        let z_inv = self.z.invert();
        let x = self.x.mul(&z_inv);
        let y = self.y.mul(&z_inv);

        let mut out = y.serialize_with_hibit();
        out[SER_BYTES] |= x.lobit().unwrap_u8() << 7;
        out
    }

    /// Decode a 57-byte encoding.
    ///
    /// Recovers x from y using x² = (y² − 1) / (d·y² − 1), computed as
    /// x = u·isr(u·v). Rejects non-canonical y, non-squares, and x = 0 with
    /// the sign bit set.
    pub fn from_bytes(bytes: &[u8; POINT_BYTES]) -> Option<Self> {
        let y_opt = Fe448::deserialize_with_hibit(bytes, 0x80);
        let y = y_opt.unwrap_or(Fe448::ZERO);
        let x_sign = Choice::from(bytes[SER_BYTES] >> 7);

        let y2 = y.sqr();
        let u = y2.sub(&Fe448::ONE); // u = y² − 1
        let v = y2.mul(&EDWARDS_D).sub(&Fe448::ONE); // v = d·y² − 1

        let (r, isr_ok) = u.mul(&v).isr();
        let x = u.mul(&r);
        // u = 0 means x = 0, a valid (identity or order-2) point.
        let u_zero = u.is_zero();

        let x = x.conditional_negate(x.lobit() ^ x_sign);
        let bad_zero = x.is_zero() & x_sign;

        let ok = y_opt.is_some() & (isr_ok | u_zero) & !bad_zero;
        if !bool::from(ok) {
            return None;
        }

        Some(EdwardsPoint {
            x,
            y,
            z: Fe448::ONE,
            t: x.mul(&y),
        })
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        EdwardsPoint {
            x: Fe448::conditional_select(&a.x, &b.x, choice),
            y: Fe448::conditional_select(&a.y, &b.y, choice),
            z: Fe448::conditional_select(&a.z, &b.z, choice),
            t: Fe448::conditional_select(&a.t, &b.t, choice),
        }
    }
}

/// Multiples 0·P .. 15·P for the fixed-window scalar multiplication.
type WindowTable = [EdwardsPoint; WINDOW_SIZE];

fn window_table(point: &EdwardsPoint) -> WindowTable {
    let mut table = [EdwardsPoint::IDENTITY; WINDOW_SIZE];
    for i in 1..WINDOW_SIZE {
        table[i] = table[i - 1].add(point);
    }
    table
}

/// Window table of the base point, built on first use.
static BASE_TABLE: OnceLock<WindowTable> = OnceLock::new();

fn base_table() -> &'static WindowTable {
    BASE_TABLE.get_or_init(|| window_table(&EdwardsPoint::basepoint()))
}

/// Constant-time scalar multiplication with fixed 4-bit windows.
pub(crate) fn scalar_mul(scalar: &Scalar, point: &EdwardsPoint) -> EdwardsPoint {
    scalar_mul_with_table(scalar, &window_table(point))
}

/// Constant-time s·B using the cached base point table.
pub(crate) fn base_scalar_mul(scalar: &Scalar) -> EdwardsPoint {
    scalar_mul_with_table(scalar, base_table())
}

/// The table is scanned in full for every window so the memory access
/// pattern is independent of the scalar.
fn scalar_mul_with_table(scalar: &Scalar, table: &WindowTable) -> EdwardsPoint {
    let mut bytes = scalar.encode();
    let mut result = EdwardsPoint::IDENTITY;

    for i in (0..SER_BYTES * 2).rev() {
        for _ in 0..WINDOW_BITS {
            result = result.double();
        }
        let nibble = (bytes[i / 2] >> ((i % 2) * WINDOW_BITS)) & 0x0F;

        let mut selected = EdwardsPoint::IDENTITY;
        for (j, entry) in table.iter().enumerate() {
            selected.conditional_assign(entry, (j as u8).ct_eq(&nibble));
        }
        result = result.add(&selected);
    }

    bytes.zeroize();
    result
}

/// Bit `i` of a little-endian byte string.
fn bit(bytes: &[u8], i: usize) -> bool {
    (bytes[i / 8] >> (i % 8)) & 1 == 1
}

/// s1·P1 + s2·P2, interleaved double-and-add. Branches on scalar bits.
pub(crate) fn double_scalar_mul_vartime(
    s1: &Scalar,
    p1: &EdwardsPoint,
    s2: &Scalar,
    p2: &EdwardsPoint,
) -> EdwardsPoint {
    let b1 = s1.encode();
    let b2 = s2.encode();
    let both = p1.add(p2);

    let mut result = EdwardsPoint::IDENTITY;
    for i in (0..SER_BYTES * 8).rev() {
        result = result.double();
        match (bit(&b1, i), bit(&b2, i)) {
            (true, true) => result = result.add(&both),
            (true, false) => result = result.add(p1),
            (false, true) => result = result.add(p2),
            (false, false) => {}
        }
    }
    result
}

/// The Ed448 group: untwisted Edwards curve with cofactor 4.
///
/// Encoding multiplies by 4 and decoding by 1, so the pair multiplies by the
/// cofactor. Equality is tested after clearing the 4-torsion, which makes
/// verification cofactored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed448Group;

impl CurveGroup for Ed448Group {
    type Point = EdwardsPoint;
    type Scalar = Scalar;

    const COFACTOR: u32 = 4;
    const ENCODE_RATIO: u32 = 4;
    const ORDER_LE: [u8; SCALAR_SER_BYTES] = L_BYTES_LE;

    fn decode_like_eddsa_and_mul_by_ratio(enc: &[u8; POINT_BYTES]) -> Option<EdwardsPoint> {
        let mut p = EdwardsPoint::from_bytes(enc)?;
        let mut ratio = Self::COFACTOR / Self::ENCODE_RATIO;
        while ratio > 1 {
            p = p.double();
            ratio >>= 1;
        }
        Some(p)
    }

    fn encode_like_eddsa_mul_by_ratio(p: &EdwardsPoint) -> [u8; POINT_BYTES] {
        let mut q = *p;
        let mut ratio = Self::ENCODE_RATIO;
        while ratio > 1 {
            q = q.double();
            ratio >>= 1;
        }
        q.to_bytes()
    }

    fn scalarmul(p: &EdwardsPoint, s: &Scalar) -> EdwardsPoint {
        scalar_mul(s, p)
    }

    fn precomputed_base_scalarmul(s: &Scalar) -> EdwardsPoint {
        base_scalar_mul(s)
    }

    fn base_double_scalarmul_non_secret(
        s1: &Scalar,
        s2: &Scalar,
        p2: &EdwardsPoint,
    ) -> EdwardsPoint {
        double_scalar_mul_vartime(s1, &base_table()[1], s2, p2)
    }

    fn double_scalarmul_non_secret(
        s1: &Scalar,
        p1: &EdwardsPoint,
        s2: &Scalar,
        p2: &EdwardsPoint,
    ) -> EdwardsPoint {
        double_scalar_mul_vartime(s1, p1, s2, p2)
    }

    fn point_eq(p: &EdwardsPoint, q: &EdwardsPoint) -> bool {
        let mut diff = p.add(&q.neg());
        let mut cofactor = Self::COFACTOR;
        while cofactor > 1 {
            diff = diff.double();
            cofactor >>= 1;
        }
        diff.is_identity().into()
    }

    fn scalar_decode_long(bytes: &[u8]) -> Scalar {
        Scalar::decode_long(bytes)
    }

    fn scalar_encode(s: &Scalar) -> [u8; SCALAR_SER_BYTES] {
        s.encode()
    }

    fn scalar_add(a: &Scalar, b: &Scalar) -> Scalar {
        a.add(b)
    }

    fn scalar_sub(a: &Scalar, b: &Scalar) -> Scalar {
        a.sub(b)
    }

    fn scalar_mul(a: &Scalar, b: &Scalar) -> Scalar {
        a.mul(b)
    }

    fn scalar_halve(a: &Scalar) -> Scalar {
        a.halve()
    }

    fn scalar_zero() -> Scalar {
        Scalar::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(n: u8) -> Scalar {
        Scalar::decode_long(&[n])
    }

    fn random_scalar() -> Scalar {
        let mut buf = [0u8; 64];
        getrandom::getrandom(&mut buf).unwrap();
        Scalar::decode_long(&buf)
    }

    #[test]
    fn test_identity() {
        let encoded = EdwardsPoint::IDENTITY.to_bytes();
        // Identity point encodes as y=1, x=0 → [1, 0, ..., 0, 0] (57 bytes)
        assert_eq!(encoded[0], 1);
        for &b in &encoded[1..] {
            assert_eq!(b, 0);
        }
        let decoded = EdwardsPoint::from_bytes(&encoded).unwrap();
        assert!(bool::from(decoded.is_identity()));
    }

    #[test]
    fn test_basepoint_on_curve() {
        // x² + y² = 1 + d·x²·y²
        let x2 = BASE_X.sqr();
        let y2 = BASE_Y.sqr();
        let lhs = x2.add(&y2);
        let rhs = Fe448::ONE.add(&EDWARDS_D.mul(&x2).mul(&y2));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_basepoint_encode_decode_roundtrip() {
        let bp = EdwardsPoint::basepoint();
        let encoded = bp.to_bytes();
        // RFC 8032 encoding of B: sign bit clear.
        assert_eq!(encoded[56], 0x00);
        let decoded = EdwardsPoint::from_bytes(&encoded).unwrap();
        assert_eq!(bp.to_bytes(), decoded.to_bytes());
        assert!(bool::from(decoded.x.ct_eq(&BASE_X)));
    }

    #[test]
    fn test_decode_rejects_bad_encodings() {
        // y = p is not canonical.
        let mut enc = [0xFFu8; POINT_BYTES];
        enc[28] = 0xFE;
        enc[56] = 0x00;
        assert!(EdwardsPoint::from_bytes(&enc).is_none());

        // Identity with the sign bit set (x = 0, negative).
        let mut enc = EdwardsPoint::IDENTITY.to_bytes();
        enc[56] = 0x80;
        assert!(EdwardsPoint::from_bytes(&enc).is_none());

        // Stray bits in the final byte.
        let mut enc = EdwardsPoint::basepoint().to_bytes();
        enc[56] |= 0x01;
        assert!(EdwardsPoint::from_bytes(&enc).is_none());
    }

    #[test]
    fn test_decode_rejects_non_square() {
        // Roughly half of all y values have no matching x.
        let mut rejected = 0;
        for y in 2u8..40 {
            let mut enc = [0u8; POINT_BYTES];
            enc[0] = y;
            if EdwardsPoint::from_bytes(&enc).is_none() {
                rejected += 1;
            } else {
                let p = EdwardsPoint::from_bytes(&enc).unwrap();
                assert_eq!(p.to_bytes(), enc);
            }
        }
        assert!(rejected > 0);
    }

    #[test]
    fn test_double_equals_add() {
        let bp = EdwardsPoint::basepoint();
        assert_eq!(bp.double().to_bytes(), bp.add(&bp).to_bytes());
    }

    #[test]
    fn test_add_neg_is_identity() {
        let bp = EdwardsPoint::basepoint();
        assert!(bool::from(bp.add(&bp.neg()).is_identity()));
    }

    #[test]
    fn test_scalar_mul_small() {
        let bp = EdwardsPoint::basepoint();
        assert_eq!(scalar_mul(&small(1), &bp).to_bytes(), bp.to_bytes());
        assert_eq!(scalar_mul(&small(2), &bp).to_bytes(), bp.double().to_bytes());
        let three = bp.double().add(&bp);
        assert_eq!(scalar_mul(&small(3), &bp).to_bytes(), three.to_bytes());
        assert!(bool::from(scalar_mul(&Scalar::ZERO, &bp).is_identity()));
    }

    #[test]
    fn test_order() {
        // (L − 1)·B = −B, so L·B is the identity.
        let lm1 = Scalar::ZERO.sub(&Scalar::ONE);
        let bp = EdwardsPoint::basepoint();
        let p = scalar_mul(&lm1, &bp);
        assert_eq!(p.to_bytes(), bp.neg().to_bytes());
        assert!(bool::from(p.add(&bp).is_identity()));
    }

    #[test]
    fn test_base_scalar_mul_matches_generic() {
        let bp = EdwardsPoint::basepoint();
        for _ in 0..4 {
            let k = random_scalar();
            assert_eq!(base_scalar_mul(&k).to_bytes(), scalar_mul(&k, &bp).to_bytes());
        }
        assert_eq!(base_table()[1].to_bytes(), bp.to_bytes());
        assert!(std::ptr::eq(base_table(), base_table()));
    }

    #[test]
    fn test_scalar_mul_linear() {
        let a = random_scalar();
        let b = random_scalar();
        let bp = EdwardsPoint::basepoint();
        let lhs = scalar_mul(&a.add(&b), &bp);
        let rhs = scalar_mul(&a, &bp).add(&scalar_mul(&b, &bp));
        assert_eq!(lhs.to_bytes(), rhs.to_bytes());
    }

    #[test]
    fn test_double_scalar_mul_matches_separate() {
        let a = random_scalar();
        let b = random_scalar();
        let bp = EdwardsPoint::basepoint();
        let q = scalar_mul(&random_scalar(), &bp);
        let expected = scalar_mul(&a, &bp).add(&scalar_mul(&b, &q));
        let got = Ed448Group::base_double_scalarmul_non_secret(&a, &b, &q);
        assert_eq!(got.to_bytes(), expected.to_bytes());
        let got = Ed448Group::double_scalarmul_non_secret(&a, &bp, &b, &q);
        assert_eq!(got.to_bytes(), expected.to_bytes());
    }

    #[test]
    fn test_encode_ratio_compensated_by_halving() {
        let s = random_scalar();
        let quarter = s.halve().halve();
        let p = Ed448Group::precomputed_base_scalarmul(&quarter);
        let enc = Ed448Group::encode_like_eddsa_mul_by_ratio(&p);
        let direct = scalar_mul(&s, &EdwardsPoint::basepoint()).to_bytes();
        assert_eq!(enc, direct);
    }

    #[test]
    fn test_point_eq_ignores_torsion() {
        // (0, −1) has order 2.
        let t2 = EdwardsPoint {
            x: Fe448::ZERO,
            y: Fe448::ONE.neg(),
            z: Fe448::ONE,
            t: Fe448::ZERO,
        };
        let bp = EdwardsPoint::basepoint();
        assert!(Ed448Group::point_eq(&bp, &bp));
        assert!(Ed448Group::point_eq(&bp, &bp.add(&t2)));
        assert!(!Ed448Group::point_eq(&bp, &bp.double()));
    }

    #[test]
    fn test_conditional_select() {
        let bp = EdwardsPoint::basepoint();
        let id = EdwardsPoint::IDENTITY;
        let sel = EdwardsPoint::conditional_select(&id, &bp, Choice::from(1));
        assert_eq!(sel.to_bytes(), bp.to_bytes());
        let sel = EdwardsPoint::conditional_select(&id, &bp, Choice::from(0));
        assert_eq!(sel.to_bytes(), id.to_bytes());
    }
}
