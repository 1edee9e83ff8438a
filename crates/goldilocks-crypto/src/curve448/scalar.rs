//! Scalar arithmetic modulo the Ed448 group order L.
//!
//! L = 2^446 − 13818066809895115352007386748515426880336692474882178609894547503885.
//! Scalars are held as seven little-endian 64-bit words. Multiplication goes
//! through Montgomery form with R = 2^448.

use subtle::{Choice, ConstantTimeEq, CtOption};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of 64-bit words in a scalar.
pub const SCALAR_LIMBS: usize = 7;

/// Size of a scalar chunk as consumed by [`Scalar::decode`].
pub const SCALAR_BYTES: usize = 56;

/// Size of an encoded scalar in an EdDSA signature (top byte always zero).
pub const SCALAR_SER_BYTES: usize = 57;

/// The group order L, little-endian words.
const L: [u64; SCALAR_LIMBS] = [
    0x2378c292ab5844f3,
    0x216cc2728dc58f55,
    0xc44edb49aed63690,
    0xffffffff7cca23e9,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x3fffffffffffffff,
];

/// −L⁻¹ mod 2^64.
const MONTGOMERY_FACTOR: u64 = montgomery_factor();

/// R² mod L with R = 2^448.
const R2: Scalar = Scalar(r2_mod_l());

const fn montgomery_factor() -> u64 {
    // Newton iteration doubles the number of correct low bits each step.
    let mut inv: u64 = 1;
    let mut i = 0;
    while i < 6 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(L[0].wrapping_mul(inv)));
        i += 1;
    }
    inv.wrapping_neg()
}

const fn r2_mod_l() -> [u64; SCALAR_LIMBS] {
    let mut x = [0u64; SCALAR_LIMBS];
    x[0] = 1;
    let mut n = 0;
    while n < 2 * 448 {
        let mut carry = 0u64;
        let mut i = 0;
        while i < SCALAR_LIMBS {
            let hi = x[i] >> 63;
            x[i] = (x[i] << 1) | carry;
            carry = hi;
            i += 1;
        }

        let mut diff = [0u64; SCALAR_LIMBS];
        let mut borrow = 0u64;
        i = 0;
        while i < SCALAR_LIMBS {
            let (d1, b1) = x[i].overflowing_sub(L[i]);
            let (d2, b2) = d1.overflowing_sub(borrow);
            diff[i] = d2;
            borrow = (b1 | b2) as u64;
            i += 1;
        }
        if borrow == 0 {
            x = diff;
        }
        n += 1;
    }
    x
}

/// An integer modulo L.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct Scalar(pub(crate) [u64; SCALAR_LIMBS]);

/// out = accum − sub, then add `p` back when the combined borrow (with
/// `extra` as a 65th word of `accum`) goes negative.
fn sc_subx(
    accum: &[u64; SCALAR_LIMBS],
    sub: &[u64; SCALAR_LIMBS],
    p: &[u64; SCALAR_LIMBS],
    extra: u64,
) -> Scalar {
    let mut out = [0u64; SCALAR_LIMBS];
    let mut chain: i128 = 0;
    for i in 0..SCALAR_LIMBS {
        chain = chain + accum[i] as i128 - sub[i] as i128;
        out[i] = chain as u64;
        chain >>= 64;
    }
    // chain + extra is 0 or −1
    let borrow = (chain + extra as i128) as u64;

    let mut chain: u128 = 0;
    for i in 0..SCALAR_LIMBS {
        chain = chain + out[i] as u128 + (p[i] & borrow) as u128;
        out[i] = chain as u64;
        chain >>= 64;
    }
    Scalar(out)
}

fn sc_montmul(a: &Scalar, b: &Scalar) -> Scalar {
    let mut accum = [0u64; SCALAR_LIMBS + 1];
    let mut hi_carry: u64 = 0;

    for &mand in a.0.iter() {
        let mut chain: u128 = 0;
        for j in 0..SCALAR_LIMBS {
            chain += (mand as u128) * (b.0[j] as u128) + accum[j] as u128;
            accum[j] = chain as u64;
            chain >>= 64;
        }
        accum[SCALAR_LIMBS] = chain as u64;

        let mand = accum[0].wrapping_mul(MONTGOMERY_FACTOR);
        let mut chain: u128 = 0;
        for j in 0..SCALAR_LIMBS {
            chain += (mand as u128) * (L[j] as u128) + accum[j] as u128;
            if j > 0 {
                accum[j - 1] = chain as u64;
            }
            chain >>= 64;
        }
        chain += accum[SCALAR_LIMBS] as u128;
        chain += hi_carry as u128;
        accum[SCALAR_LIMBS - 1] = chain as u64;
        hi_carry = (chain >> 64) as u64;
    }

    let mut low = [0u64; SCALAR_LIMBS];
    low.copy_from_slice(&accum[..SCALAR_LIMBS]);
    let out = sc_subx(&low, &L, &L, hi_carry);
    low.zeroize();
    accum.zeroize();
    out
}

impl Scalar {
    pub const ZERO: Scalar = Scalar([0; SCALAR_LIMBS]);
    pub const ONE: Scalar = Scalar([1, 0, 0, 0, 0, 0, 0]);

    /// a + b mod L.
    pub fn add(&self, rhs: &Scalar) -> Scalar {
        let mut out = [0u64; SCALAR_LIMBS];
        let mut chain: u128 = 0;
        for (i, o) in out.iter_mut().enumerate() {
            chain = chain + self.0[i] as u128 + rhs.0[i] as u128;
            *o = chain as u64;
            chain >>= 64;
        }
        let r = sc_subx(&out, &L, &L, chain as u64);
        out.zeroize();
        r
    }

    /// a − b mod L.
    pub fn sub(&self, rhs: &Scalar) -> Scalar {
        sc_subx(&self.0, &rhs.0, &L, 0)
    }

    /// −a mod L.
    pub fn neg(&self) -> Scalar {
        Scalar::ZERO.sub(self)
    }

    /// a · b mod L.
    pub fn mul(&self, rhs: &Scalar) -> Scalar {
        let t = sc_montmul(self, rhs);
        sc_montmul(&t, &R2)
    }

    /// a / 2 mod L: add L when odd, then shift right by one.
    pub fn halve(&self) -> Scalar {
        let mask = 0u64.wrapping_sub(self.0[0] & 1);
        let mut out = [0u64; SCALAR_LIMBS];
        let mut chain: u128 = 0;
        for (i, o) in out.iter_mut().enumerate() {
            chain = chain + self.0[i] as u128 + (L[i] & mask) as u128;
            *o = chain as u64;
            chain >>= 64;
        }
        for i in 0..SCALAR_LIMBS - 1 {
            out[i] = (out[i] >> 1) | (out[i + 1] << 63);
        }
        out[SCALAR_LIMBS - 1] = (out[SCALAR_LIMBS - 1] >> 1) | ((chain as u64) << 63);
        Scalar(out)
    }

    /// Packs up to 56 little-endian bytes into words, unreduced.
    fn decode_short(bytes: &[u8]) -> Scalar {
        debug_assert!(bytes.len() <= SCALAR_BYTES);
        let mut out = [0u64; SCALAR_LIMBS];
        for (k, &b) in bytes.iter().enumerate() {
            out[k / 8] |= (b as u64) << (8 * (k % 8));
        }
        Scalar(out)
    }

    /// Canonical decode of a 56-byte little-endian string.
    ///
    /// `None` when the value is not below L. The contained value is reduced
    /// either way, so callers that only need a residue may unwrap it freely.
    pub fn decode(bytes: &[u8; SCALAR_BYTES]) -> CtOption<Scalar> {
        let s = Scalar::decode_short(bytes);

        let mut accum: i128 = 0;
        for i in 0..SCALAR_LIMBS {
            accum = (accum + s.0[i] as i128 - L[i] as i128) >> 64;
        }
        let in_range = !(accum as u64).ct_eq(&0);

        CtOption::new(s.mul(&Scalar::ONE), in_range)
    }

    fn decode_reduced(bytes: &[u8]) -> Scalar {
        Scalar::decode_short(bytes).mul(&Scalar::ONE)
    }

    /// Reduces an arbitrary-length little-endian string mod L.
    ///
    /// Works from the most significant 56-byte chunk down, multiplying the
    /// running value by 2^448 (Montgomery multiply by R²) before adding the
    /// next chunk.
    pub fn decode_long(bytes: &[u8]) -> Scalar {
        if bytes.is_empty() {
            return Scalar::ZERO;
        }

        let len = bytes.len();
        let mut i = len - len % SCALAR_BYTES;
        if i == len {
            i -= SCALAR_BYTES;
        }

        let mut t1 = Scalar::decode_short(&bytes[i..]);
        if len == SCALAR_BYTES {
            return t1.mul(&Scalar::ONE);
        }

        while i > 0 {
            i -= SCALAR_BYTES;
            t1 = sc_montmul(&t1, &R2);
            let t2 = Scalar::decode_reduced(&bytes[i..i + SCALAR_BYTES]);
            t1 = t1.add(&t2);
        }
        t1
    }

    /// 57-byte little-endian encoding; the final byte is always zero.
    pub fn encode(&self) -> [u8; SCALAR_SER_BYTES] {
        let mut out = [0u8; SCALAR_SER_BYTES];
        for (i, limb) in self.0.iter().enumerate() {
            out[8 * i..8 * i + 8].copy_from_slice(&limb.to_le_bytes());
        }
        out
    }

    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Scalar::ZERO)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}
