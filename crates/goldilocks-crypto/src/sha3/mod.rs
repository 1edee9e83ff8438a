//! SHAKE256 extendable-output function (FIPS 202).
//!
//! SHAKE256 is the Keccak sponge with a 136-byte rate and the 0x1F domain
//! suffix. Ed448 uses it for key expansion, nonce and challenge derivation,
//! and the Ed448ph prehash.

use goldilocks_types::{CryptoError, HashAlgId};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::provider::Xof;

// ---------------------------------------------------------------------------
// Keccak-f[1600] permutation
// ---------------------------------------------------------------------------

/// 24 round constants for Keccak-f[1600].
const RC: [u64; 24] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808A,
    0x8000000080008000,
    0x000000000000808B,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008A,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000A,
    0x000000008000808B,
    0x800000000000008B,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800A,
    0x800000008000000A,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// Rotation offsets for the ρ step, indexed as ROTATIONS[x + 5*y].
const ROTATIONS: [u32; 25] = [
    0, 1, 62, 28, 27, 36, 44, 6, 55, 20, 3, 10, 43, 25, 39, 41, 45, 15, 21, 8, 18, 2, 61, 56, 14,
];

fn keccak_f1600(state: &mut [u64; 25]) {
    for &rc in &RC {
        // θ
        let mut c = [0u64; 5];
        for (x, cx) in c.iter_mut().enumerate() {
            *cx = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }

        // ρ and π
        let mut b = [0u64; 25];
        for x in 0..5 {
            for y in 0..5 {
                let src = x + 5 * y;
                b[y + 5 * ((2 * x + 3 * y) % 5)] = state[src].rotate_left(ROTATIONS[src]);
            }
        }

        // χ
        for y in 0..5 {
            for x in 0..5 {
                state[x + 5 * y] =
                    b[x + 5 * y] ^ (!b[(x + 1) % 5 + 5 * y] & b[(x + 2) % 5 + 5 * y]);
            }
        }

        // ι
        state[0] ^= rc;
    }
}

// ---------------------------------------------------------------------------
// Sponge
// ---------------------------------------------------------------------------

/// Keccak sponge that absorbs and squeezes byte-wise against the lanes.
///
/// `pos` is the byte offset inside the current rate block, both while
/// absorbing and while squeezing.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct KeccakSponge {
    state: [u64; 25],
    rate: usize,
    suffix: u8,
    pos: usize,
    squeezing: bool,
}

impl KeccakSponge {
    fn new(rate: usize, suffix: u8) -> Self {
        KeccakSponge {
            state: [0u64; 25],
            rate,
            suffix,
            pos: 0,
            squeezing: false,
        }
    }

    #[inline]
    fn xor_byte(&mut self, pos: usize, byte: u8) {
        self.state[pos / 8] ^= (byte as u64) << (8 * (pos % 8));
    }

    #[inline]
    fn get_byte(&self, pos: usize) -> u8 {
        (self.state[pos / 8] >> (8 * (pos % 8))) as u8
    }

    fn absorb(&mut self, data: &[u8]) {
        for &byte in data {
            self.xor_byte(self.pos, byte);
            self.pos += 1;
            if self.pos == self.rate {
                keccak_f1600(&mut self.state);
                self.pos = 0;
            }
        }
    }

    /// Domain suffix, pad10*1, and switch to the squeeze phase.
    fn pad(&mut self) {
        self.xor_byte(self.pos, self.suffix);
        self.xor_byte(self.rate - 1, 0x80);
        keccak_f1600(&mut self.state);
        self.pos = 0;
        self.squeezing = true;
    }

    fn squeeze(&mut self, out: &mut [u8]) {
        if !self.squeezing {
            self.pad();
        }
        for byte in out.iter_mut() {
            if self.pos == self.rate {
                keccak_f1600(&mut self.state);
                self.pos = 0;
            }
            *byte = self.get_byte(self.pos);
            self.pos += 1;
        }
    }

    fn reset(&mut self) {
        self.state = [0u64; 25];
        self.pos = 0;
        self.squeezing = false;
    }
}

// ---------------------------------------------------------------------------
// SHAKE256
// ---------------------------------------------------------------------------

/// SHAKE256 rate in bytes.
pub const SHAKE256_RATE: usize = 136;

/// SHAKE256 extendable-output function (XOF) context.
#[derive(Clone)]
pub struct Shake256 {
    inner: KeccakSponge,
}

impl Default for Shake256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Shake256 {
    pub fn new() -> Self {
        Shake256 {
            inner: KeccakSponge::new(SHAKE256_RATE, 0x1F),
        }
    }

    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.inner.squeezing {
            return Err(CryptoError::XofAlreadySqueezed);
        }
        self.inner.absorb(data);
        Ok(())
    }

    /// Squeeze the next `output_len` bytes of the output stream.
    pub fn squeeze(&mut self, output_len: usize) -> Result<Vec<u8>, CryptoError> {
        let mut output = vec![0u8; output_len];
        self.inner.squeeze(&mut output);
        Ok(output)
    }

    /// Squeeze into a caller buffer.
    pub fn squeeze_into(&mut self, out: &mut [u8]) {
        self.inner.squeeze(out);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// One-shot SHAKE256 of `data`, filling `out`.
    pub fn digest(data: &[u8], out: &mut [u8]) {
        let mut ctx = Self::new();
        ctx.inner.absorb(data);
        ctx.inner.squeeze(out);
    }
}

impl Xof for Shake256 {
    const ALG_ID: HashAlgId = HashAlgId::Shake256;

    fn new() -> Self {
        Shake256::new()
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        Shake256::update(self, data)
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        self.squeeze_into(out);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_shake256_empty() {
        let mut xof = Shake256::new();
        xof.update(b"").unwrap();
        let out32 = xof.squeeze(32).unwrap();

        // Known SHAKE256("") first 32 bytes
        assert_eq!(
            hex(&out32),
            "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"
        );
    }

    #[test]
    fn test_digest_matches_xof_hash() {
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        Shake256::digest(b"abc", &mut a);
        <Shake256 as Xof>::hash(&mut b, &[b"abc".as_slice()]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_alg_id() {
        assert_eq!(<Shake256 as Xof>::ALG_ID, HashAlgId::Shake256);
    }

    #[test]
    fn test_shake256_abc() {
        let mut out = [0u8; 32];
        <Shake256 as Xof>::hash(&mut out, &[b"abc".as_slice()]).unwrap();
        assert_eq!(
            hex(&out),
            "483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739"
        );
    }

    #[test]
    fn test_shake256_streaming_matches_one_shot() {
        // Absorb across a block boundary in uneven pieces.
        let data: Vec<u8> = (0..400u32).map(|i| i as u8).collect();
        let mut one_shot = [0u8; 300];
        <Shake256 as Xof>::hash(&mut one_shot, &[&data[..]]).unwrap();

        let mut ctx = Shake256::new();
        ctx.update(&data[..1]).unwrap();
        ctx.update(&data[1..136]).unwrap();
        ctx.update(&data[136..137]).unwrap();
        ctx.update(&data[137..]).unwrap();
        let mut streamed = Vec::new();
        for len in [1usize, 135, 1, 57, 106] {
            streamed.extend_from_slice(&ctx.squeeze(len).unwrap());
        }
        assert_eq!(streamed, one_shot.to_vec());
    }

    #[test]
    fn test_shake256_multi_part_hash() {
        let mut a = [0u8; 114];
        let mut b = [0u8; 114];
        <Shake256 as Xof>::hash(&mut a, &[b"Sig".as_slice(), b"Ed448", b""]).unwrap();
        <Shake256 as Xof>::hash(&mut b, &[b"SigEd448".as_slice()]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_update_after_squeeze_rejected() {
        let mut ctx = Shake256::new();
        ctx.update(b"abc").unwrap();
        let _ = ctx.squeeze(8).unwrap();
        assert!(matches!(
            ctx.update(b"more"),
            Err(CryptoError::XofAlreadySqueezed)
        ));
        ctx.reset();
        assert!(ctx.update(b"more").is_ok());
    }
}
