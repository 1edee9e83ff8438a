//! Field arithmetic over GF(2^448 − 2^224 − 1) using 8×56-bit limbs.
//!
//! The prime p = 2^448 − 2^224 − 1 is the "Goldilocks" prime. Splitting an
//! element into a low and a high half of four limbs each, the identity
//! 2^448 ≡ 2^224 + 1 (mod p) lets multiplication fold the high products back
//! into the low half with one extra subtraction instead of a second pass.
//!
//! Elements are kept *weakly reduced* between operations: every limb fits its
//! 56-bit slot apart from a small carry left in limb 0 / limb 4. Only
//! [`Fe448::strong_reduce`] produces the canonical representative in [0, p).

use std::num::Wrapping;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Number of limbs in a field element.
pub const NLIMBS: usize = 8;

/// Serialized size of a field element.
pub const SER_BYTES: usize = 56;

/// Serialized size of a field element with room for a sign bit.
pub const X_SER_BYTES: usize = 57;

const LIMB_BITS: u32 = 56;
const MASK56: u64 = (1u64 << 56) - 1;

/// A field element in GF(p) where p = 2^448 − 2^224 − 1.
///
/// Stored in radix-2^56 representation: value = Σ l[i] × 2^(56i), i=0..7.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fe448(pub(crate) [u64; NLIMBS]);

/// p in limb form: every limb is 2^56 − 1 except limb 4, which carries the
/// −2^224 term.
const MODULUS: Fe448 = Fe448([
    MASK56,
    MASK56,
    MASK56,
    MASK56,
    MASK56 - 1,
    MASK56,
    MASK56,
    MASK56,
]);

#[inline(always)]
fn widemul(a: u64, b: u64) -> u128 {
    (a as u128) * (b as u128)
}

impl Fe448 {
    /// The zero element.
    pub const ZERO: Fe448 = Fe448([0; NLIMBS]);

    /// The one element.
    pub const ONE: Fe448 = Fe448([1, 0, 0, 0, 0, 0, 0, 0]);

    /// Builds an element from raw 56-bit limbs (little-endian limb order).
    pub const fn from_limbs(limbs: [u64; NLIMBS]) -> Self {
        Fe448(limbs)
    }

    /// Packs 56 little-endian bytes into limbs without any range check.
    ///
    /// Intended for compile-time constants that are known to be canonical.
    pub(crate) const fn from_canonical_bytes(bytes: &[u8; SER_BYTES]) -> Self {
        let mut limbs = [0u64; NLIMBS];
        let mut i = 0;
        while i < SER_BYTES {
            limbs[i / 7] |= (bytes[i] as u64) << (8 * (i % 7));
            i += 1;
        }
        Fe448(limbs)
    }

    /// Builds an element from a small unsigned integer.
    pub const fn from_u32(w: u32) -> Self {
        Fe448([w as u64, 0, 0, 0, 0, 0, 0, 0])
    }

    fn add_raw(&self, rhs: &Fe448) -> Fe448 {
        let mut r = [0u64; NLIMBS];
        for (i, ri) in r.iter_mut().enumerate() {
            *ri = self.0[i].wrapping_add(rhs.0[i]);
        }
        Fe448(r)
    }

    fn sub_raw(&self, rhs: &Fe448) -> Fe448 {
        let mut r = [0u64; NLIMBS];
        for (i, ri) in r.iter_mut().enumerate() {
            *ri = self.0[i].wrapping_sub(rhs.0[i]);
        }
        Fe448(r)
    }

    /// Adds `amt`·p limb-wise so a raw difference stays non-negative.
    fn bias(&mut self, amt: u64) {
        let co1 = MASK56 * amt;
        let co2 = co1 - amt;
        for (i, limb) in self.0.iter_mut().enumerate() {
            *limb = limb.wrapping_add(if i == 4 { co2 } else { co1 });
        }
    }

    /// Partial reduction: pushes every limb back under 2^56 plus a bounded
    /// carry, folding the top overflow into limbs 0 and 4.
    pub fn weak_reduce(&mut self) {
        let a = &mut self.0;
        let tmp = a[7] >> LIMB_BITS;
        a[4] += tmp;
        for i in (1..NLIMBS).rev() {
            a[i] = (a[i] & MASK56) + (a[i - 1] >> LIMB_BITS);
        }
        a[0] = (a[0] & MASK56) + tmp;
    }

    /// Full reduction to the unique representative in [0, p).
    pub fn strong_reduce(&mut self) {
        self.weak_reduce();

        // The value is now below 2p: subtract p once.
        let mut scarry: i128 = 0;
        for i in 0..NLIMBS {
            scarry = scarry + self.0[i] as i128 - MODULUS.0[i] as i128;
            self.0[i] = (scarry as u64) & MASK56;
            scarry >>= LIMB_BITS;
        }

        // scarry is 0 if the value was >= p, -1 if it went negative.
        debug_assert!(scarry == 0 || scarry == -1);
        let scarry_0 = scarry as u64;

        let mut carry: u128 = 0;
        for i in 0..NLIMBS {
            carry = carry + self.0[i] as u128 + (scarry_0 & MODULUS.0[i]) as u128;
            self.0[i] = (carry as u64) & MASK56;
            carry >>= LIMB_BITS;
        }

        debug_assert!(carry < 2 && (carry as u64).wrapping_add(scarry_0) == 0);
    }

    /// Returns a strongly reduced copy.
    pub fn strong_reduced(&self) -> Fe448 {
        let mut r = *self;
        r.strong_reduce();
        r
    }

    /// Addition: d = a + b.
    pub fn add(&self, rhs: &Fe448) -> Fe448 {
        let mut r = self.add_raw(rhs);
        r.weak_reduce();
        r
    }

    /// Subtraction: d = a − b, biased by 2p before the weak reduction.
    pub fn sub(&self, rhs: &Fe448) -> Fe448 {
        let mut r = self.sub_raw(rhs);
        r.bias(2);
        r.weak_reduce();
        r
    }

    /// Negation: −a mod p.
    pub fn neg(&self) -> Fe448 {
        Fe448::ZERO.sub(self)
    }

    /// Multiplication: c = a · b.
    ///
    /// With a = a_lo + a_hi·2^224, the high-degree partial products carry a
    /// factor 2^448 ≡ 2^224 + 1. Three accumulators per output coefficient
    /// collect the pure-low products (`accum2`), the cross sums
    /// aa·bb / aa·bbb (`accum1`) and the pure-high products (`accum0`);
    /// `accum1 -= accum2; accum0 += accum2` then splits them into the low
    /// and high output limbs.
    pub fn mul(&self, rhs: &Fe448) -> Fe448 {
        let a = &self.0;
        let b = &rhs.0;
        let wm = |x: u64, y: u64| Wrapping(widemul(x, y));

        let mut c = [0u64; NLIMBS];
        let mut accum0 = Wrapping(0u128);
        let mut accum1 = Wrapping(0u128);

        let mut aa = [0u64; 4];
        let mut bb = [0u64; 4];
        let mut bbb = [0u64; 4];
        for i in 0..4 {
            aa[i] = a[i] + a[i + 4];
            bb[i] = b[i] + b[i + 4];
            bbb[i] = bb[i] + b[i + 4];
        }

        for i in 0..4 {
            let mut accum2 = Wrapping(0u128);

            for j in 0..=i {
                accum2 += wm(a[j], b[i - j]);
                accum1 += wm(aa[j], bb[i - j]);
                accum0 += wm(a[j + 4], b[i - j + 4]);
            }
            for j in (i + 1)..4 {
                accum2 += wm(a[j], b[i + 8 - j]);
                accum1 += wm(aa[j], bbb[i + 4 - j]);
                accum0 += wm(a[j + 4], bb[i + 4 - j]);
            }

            accum1 -= accum2;
            accum0 += accum2;

            c[i] = (accum0.0 as u64) & MASK56;
            c[i + 4] = (accum1.0 as u64) & MASK56;

            accum0 >>= LIMB_BITS as usize;
            accum1 >>= LIMB_BITS as usize;
        }

        accum0 += accum1;
        accum0 += Wrapping(c[4] as u128);
        accum1 += Wrapping(c[0] as u128);
        c[4] = (accum0.0 as u64) & MASK56;
        c[0] = (accum1.0 as u64) & MASK56;

        accum0 >>= LIMB_BITS as usize;
        accum1 >>= LIMB_BITS as usize;

        c[5] += accum0.0 as u64;
        c[1] += accum1.0 as u64;

        Fe448(c)
    }

    /// Squaring: c = a², using a_i·a_j = a_j·a_i to halve the products.
    pub fn sqr(&self) -> Fe448 {
        let a = &self.0;
        let wm = |x: u64, y: u64| Wrapping(widemul(x, y));

        let mut c = [0u64; NLIMBS];
        let mut aa = [0u64; 4];
        for i in 0..4 {
            aa[i] = a[i] + a[i + 4];
        }

        let mut accum2 = wm(a[0], a[3]);
        let mut accum0 = wm(aa[0], aa[3]);
        let mut accum1 = wm(a[4], a[7]);

        accum2 += wm(a[1], a[2]);
        accum0 += wm(aa[1], aa[2]);
        accum1 += wm(a[5], a[6]);

        accum0 -= accum2;
        accum1 += accum2;

        c[3] = ((accum1.0 as u64) << 1) & MASK56;
        c[7] = ((accum0.0 as u64) << 1) & MASK56;

        accum0 >>= 55;
        accum1 >>= 55;

        accum0 += wm(2 * aa[1], aa[3]);
        accum1 += wm(2 * a[5], a[7]);
        accum0 += wm(aa[2], aa[2]);
        accum1 += accum0;

        accum0 -= wm(2 * a[1], a[3]);
        accum1 += wm(a[6], a[6]);

        accum2 = wm(a[0], a[0]);
        accum1 -= accum2;
        accum0 += accum2;

        accum0 -= wm(a[2], a[2]);
        accum1 += wm(aa[0], aa[0]);
        accum0 += wm(a[4], a[4]);

        c[0] = (accum0.0 as u64) & MASK56;
        c[4] = (accum1.0 as u64) & MASK56;

        accum0 >>= 56;
        accum1 >>= 56;

        accum2 = wm(2 * aa[2], aa[3]);
        accum0 -= wm(2 * a[2], a[3]);
        accum1 += wm(2 * a[6], a[7]);

        accum1 += accum2;
        accum0 += accum2;

        accum2 = wm(2 * a[0], a[1]);
        accum1 += wm(2 * aa[0], aa[1]);
        accum0 += wm(2 * a[4], a[5]);

        accum1 -= accum2;
        accum0 += accum2;

        c[1] = (accum0.0 as u64) & MASK56;
        c[5] = (accum1.0 as u64) & MASK56;

        accum0 >>= 56;
        accum1 >>= 56;

        accum2 = wm(aa[3], aa[3]);
        accum0 -= wm(a[3], a[3]);
        accum1 += wm(a[7], a[7]);

        accum1 += accum2;
        accum0 += accum2;

        accum2 = wm(2 * a[0], a[2]);
        accum1 += wm(2 * aa[0], aa[2]);
        accum0 += wm(2 * a[4], a[6]);

        accum2 += wm(a[1], a[1]);
        accum1 += wm(aa[1], aa[1]);
        accum0 += wm(a[5], a[5]);

        accum1 -= accum2;
        accum0 += accum2;

        c[2] = (accum0.0 as u64) & MASK56;
        c[6] = (accum1.0 as u64) & MASK56;

        accum0 >>= 56;
        accum1 >>= 56;

        accum0 += Wrapping(c[3] as u128);
        accum1 += Wrapping(c[7] as u128);
        c[3] = (accum0.0 as u64) & MASK56;
        c[7] = (accum1.0 as u64) & MASK56;

        // One more carry keeps the output inside the weak-reduction bound.
        accum0 >>= 56;
        accum1 >>= 56;
        c[4] += (accum0.0 as u64) + (accum1.0 as u64);
        c[0] += accum1.0 as u64;

        Fe448(c)
    }

    /// n-fold squaring: a^(2^n), n >= 1.
    pub fn sqrn(&self, n: u32) -> Fe448 {
        debug_assert!(n >= 1);
        let mut r = self.sqr();
        for _ in 1..n {
            r = r.sqr();
        }
        r
    }

    /// Multiplication by a small unsigned word.
    pub fn mulw(&self, w: u32) -> Fe448 {
        let a = &self.0;
        let b = w as u64;
        let mut c = [0u64; NLIMBS];
        let mut accum0: u128 = 0;
        let mut accum4: u128 = 0;

        for i in 0..4 {
            accum0 += widemul(b, a[i]);
            accum4 += widemul(b, a[i + 4]);
            c[i] = (accum0 as u64) & MASK56;
            accum0 >>= LIMB_BITS;
            c[i + 4] = (accum4 as u64) & MASK56;
            accum4 >>= LIMB_BITS;
        }

        accum0 += accum4 + c[4] as u128;
        c[4] = (accum0 as u64) & MASK56;
        c[5] += (accum0 >> LIMB_BITS) as u64;

        accum4 += c[0] as u128;
        c[0] = (accum4 as u64) & MASK56;
        c[1] += (accum4 >> LIMB_BITS) as u64;

        Fe448(c)
    }

    /// Inverse square root: returns x^((p−3)/4) and whether it squares to 1/x.
    ///
    /// The returned `Choice` is clear when x is zero or a quadratic
    /// non-residue; the candidate is meaningless in that case.
    pub fn isr(&self) -> (Fe448, Choice) {
        let x = self;

        let l1 = x.sqr();
        let l2 = x.mul(&l1);
        let l1 = l2.sqr();
        let l2 = x.mul(&l1);
        let l1 = l2.sqrn(3);
        let l0 = l2.mul(&l1);
        let l1 = l0.sqrn(3);
        let l0 = l2.mul(&l1);
        let l2 = l0.sqrn(9);
        let l1 = l0.mul(&l2);
        let l0 = l1.sqr();
        let l2 = x.mul(&l0);
        let l0 = l2.sqrn(18);
        let l2 = l1.mul(&l0);
        let l0 = l2.sqrn(37);
        let l1 = l2.mul(&l0);
        let l0 = l1.sqrn(37);
        let l1 = l2.mul(&l0);
        let l0 = l1.sqrn(111);
        let l2 = l1.mul(&l0);
        let l0 = l2.sqr();
        let l1 = x.mul(&l0);
        let l0 = l1.sqrn(223);
        let l1 = l2.mul(&l0);
        let l2 = l1.sqr();
        let l0 = l2.mul(x);

        (l1, l0.ct_eq(&Fe448::ONE))
    }

    /// Modular inversion: 1/x = isr(x²)² · x. Maps zero to zero.
    pub fn invert(&self) -> Fe448 {
        let (t, _) = self.sqr().isr();
        t.sqr().mul(self)
    }

    /// High bit of x, i.e. the low bit of 2x mod p.
    pub fn hibit(&self) -> Choice {
        let mut y = self.add(self);
        y.strong_reduce();
        Choice::from((y.0[0] & 1) as u8)
    }

    /// Low bit of the canonical representative (the EdDSA sign bit).
    pub fn lobit(&self) -> Choice {
        let y = self.strong_reduced();
        Choice::from((y.0[0] & 1) as u8)
    }

    /// Check if the element is zero mod p.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Fe448::ZERO)
    }

    /// Negate in constant time when `choice` is set.
    pub fn conditional_negate(&self, choice: Choice) -> Fe448 {
        Fe448::conditional_select(self, &self.neg(), choice)
    }

    /// Serialize to 56 little-endian bytes. The element must have its high
    /// bit clear.
    pub fn serialize(&self) -> [u8; SER_BYTES] {
        let red = self.strong_reduced();
        debug_assert!(!bool::from(red.hibit()));
        let mut out = [0u8; SER_BYTES];
        red.pack(&mut out);
        out
    }

    /// Serialize to 57 little-endian bytes; the final byte is left zero for
    /// the caller's flag bit.
    pub fn serialize_with_hibit(&self) -> [u8; X_SER_BYTES] {
        let mut out = [0u8; X_SER_BYTES];
        self.strong_reduced().pack(&mut out);
        out
    }

    /// Packs a strongly reduced element into `out.len()` bytes.
    fn pack(&self, out: &mut [u8]) {
        let mut j = 0;
        let mut fill: u32 = 0;
        let mut buffer: u128 = 0;
        for byte in out.iter_mut() {
            if fill < 8 && j < NLIMBS {
                buffer |= (self.0[j] as u128) << fill;
                fill += LIMB_BITS;
                j += 1;
            }
            *byte = buffer as u8;
            fill = fill.saturating_sub(8);
            buffer >>= 8;
        }
    }

    /// Deserialize 56 little-endian bytes.
    ///
    /// `None` when the value is not below p or its high bit is set.
    pub fn deserialize(serial: &[u8; SER_BYTES]) -> CtOption<Fe448> {
        let (x, ok) = Fe448::unpack(serial, 0);
        CtOption::new(x, ok & !x.hibit())
    }

    /// Deserialize 57 little-endian bytes.
    ///
    /// `hi_nmask` is cleared from the final byte before decoding. The result
    /// is `None` when bits remain above 448 or when the value is not below p.
    pub fn deserialize_with_hibit(serial: &[u8; X_SER_BYTES], hi_nmask: u8) -> CtOption<Fe448> {
        let (x, ok) = Fe448::unpack(serial, hi_nmask);
        CtOption::new(x, ok)
    }

    /// Deserialize a slice of either width: 56 bytes as [`Fe448::deserialize`],
    /// 57 bytes as [`Fe448::deserialize_with_hibit`] with no mask. Any other
    /// length is `None`.
    pub fn from_slice(serial: &[u8]) -> CtOption<Fe448> {
        if let Ok(bytes) = <&[u8; SER_BYTES]>::try_from(serial) {
            Fe448::deserialize(bytes)
        } else if let Ok(bytes) = <&[u8; X_SER_BYTES]>::try_from(serial) {
            Fe448::deserialize_with_hibit(bytes, 0)
        } else {
            CtOption::new(Fe448::ZERO, Choice::from(0))
        }
    }

    /// Unpacks `serial` into limbs, rejecting leftover bits above 448 and
    /// values not below p.
    fn unpack(serial: &[u8], hi_nmask: u8) -> (Fe448, Choice) {
        let nbytes = serial.len();
        let byte_at = |j: usize| -> u8 {
            if j == nbytes - 1 {
                serial[j] & !hi_nmask
            } else {
                serial[j]
            }
        };

        let mut x = Fe448::ZERO;
        let mut j = 0;
        let mut fill: u32 = 0;
        let mut buffer: u128 = 0;
        let mut scarry: i128 = 0;

        for i in 0..NLIMBS {
            while fill < LIMB_BITS && j < nbytes {
                buffer |= (byte_at(j) as u128) << fill;
                fill += 8;
                j += 1;
            }
            x.0[i] = if i < NLIMBS - 1 {
                (buffer as u64) & MASK56
            } else {
                buffer as u64
            };
            fill -= LIMB_BITS.min(fill);
            buffer >>= LIMB_BITS;
            scarry = (scarry + x.0[i] as i128 - MODULUS.0[i] as i128) >> 64;
        }

        // Anything past the 448 limb bits must be zero.
        let mut leftover = buffer as u64;
        for k in j..nbytes {
            leftover |= byte_at(k) as u64;
        }
        let in_range = !(scarry as u64).ct_eq(&0);

        (x, leftover.ct_eq(&0) & in_range)
    }
}

impl ConstantTimeEq for Fe448 {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut c = self.sub(other);
        c.strong_reduce();

        let mut ret = 0u64;
        for limb in c.0 {
            ret |= limb;
        }
        ret.ct_eq(&0)
    }
}

impl ConditionallySelectable for Fe448 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut r = [0u64; NLIMBS];
        for (i, ri) in r.iter_mut().enumerate() {
            *ri = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Fe448(r)
    }
}

impl PartialEq for Fe448 {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fe448 {}
