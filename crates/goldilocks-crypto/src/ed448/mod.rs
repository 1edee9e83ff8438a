//! Ed448 digital signature algorithm (RFC 8032 §5.2).
//!
//! Ed448 (Goldilocks) is an EdDSA signature scheme using SHAKE256 and Curve448,
//! providing ~224-bit security. Every hash is prefixed with
//! dom4(phflag, context), so Ed448 and Ed448ph signatures and different
//! contexts never collide.
//!
//! The protocol is written once in [`Eddsa448`] against the [`CurveGroup`]
//! and [`Xof`] seams; [`Ed448`] binds it to the crate's own group and
//! SHAKE256, and the free functions below use that binding.

use std::marker::PhantomData;

use goldilocks_types::{
    CryptoError, Ed448Variant, ED448_MAX_CONTEXT_LEN, ED448_PREHASH_LEN, ED448_PUBLIC_KEY_LEN,
    ED448_SEED_LEN, ED448_SIGNATURE_LEN, X448_PRIVATE_KEY_LEN,
};
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::curve448::edwards::Ed448Group;
use crate::provider::{CurveGroup, Xof, POINT_BYTES, SCALAR_ENCODED_BYTES};
use crate::sha3::Shake256;

/// Length of the expanded private key and of the nonce / challenge hashes.
const EXPANDED_LEN: usize = 2 * ED448_SEED_LEN;

/// EdDSA over a 448-bit Edwards group `G` with hash `X`.
///
/// Stateless: every operation is an associated function over caller-owned
/// buffers.
pub struct Eddsa448<G, X> {
    _marker: PhantomData<(G, X)>,
}

/// Ed448 as specified by RFC 8032: the Ed448 group with SHAKE256.
pub type Ed448 = Eddsa448<Ed448Group, Shake256>;

/// dom4 prefix: "SigEd448" || octet(phflag) || octet(len(ctx)) || ctx
fn dom4(variant: Ed448Variant, context: &[u8]) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(10 + context.len());
    prefix.extend_from_slice(b"SigEd448");
    prefix.push(variant.phflag());
    prefix.push(context.len() as u8);
    prefix.extend_from_slice(context);
    prefix
}

impl<G: CurveGroup, X: Xof> Eddsa448<G, X> {
    /// Clamp a 57-byte scalar (RFC 8032 §5.2.5): clear the cofactor bits,
    /// clear the top byte, set bit 447.
    fn clamp(a: &mut [u8; ED448_SEED_LEN]) {
        a[0] &= !((G::COFACTOR as u8) - 1);
        a[ED448_SEED_LEN - 1] = 0;
        a[ED448_SEED_LEN - 2] |= 0x80;
    }

    /// Divide by `ENCODE_RATIO` so that the ratio-multiplying encode lands
    /// on the intended point.
    fn undo_encode_ratio(s: &G::Scalar) -> Zeroizing<G::Scalar> {
        let mut out = Zeroizing::new(s.clone());
        let mut ratio = G::ENCODE_RATIO;
        while ratio > 1 {
            *out = G::scalar_halve(&out);
            ratio >>= 1;
        }
        out
    }

    /// Expand a seed and derive the clamped secret scalar.
    /// Returns the scalar and the full 114-byte expansion.
    fn expand_secret(
        privkey: &[u8; ED448_SEED_LEN],
    ) -> Result<(Zeroizing<G::Scalar>, Zeroizing<[u8; EXPANDED_LEN]>), CryptoError> {
        let mut expanded = Zeroizing::new([0u8; EXPANDED_LEN]);
        X::hash(&mut expanded[..], &[&privkey[..]])?;

        let mut a = Zeroizing::new([0u8; ED448_SEED_LEN]);
        a.copy_from_slice(&expanded[..ED448_SEED_LEN]);
        Self::clamp(&mut a);
        let secret = Zeroizing::new(G::scalar_decode_long(&a[..]));
        Ok((secret, expanded))
    }

    /// k = XOF(dom4 || R || A || M, 114) mod L
    fn challenge(
        dom: &[u8],
        r: &[u8; POINT_BYTES],
        pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
        message: &[u8],
    ) -> Result<Zeroizing<G::Scalar>, CryptoError> {
        let mut hash = Zeroizing::new([0u8; EXPANDED_LEN]);
        X::hash(&mut hash[..], &[dom, &r[..], &pubkey[..], message])?;
        Ok(Zeroizing::new(G::scalar_decode_long(&hash[..])))
    }

    /// s < L, compared from the most significant byte down.
    fn scalar_in_range(s: &[u8; SCALAR_ENCODED_BYTES]) -> bool {
        for i in (0..SCALAR_ENCODED_BYTES).rev() {
            if s[i] < G::ORDER_LE[i] {
                return true;
            }
            if s[i] > G::ORDER_LE[i] {
                return false;
            }
        }
        // s == L
        false
    }

    /// Derive the 57-byte public key from a 57-byte private seed.
    pub fn derive_public_key(
        privkey: &[u8; ED448_SEED_LEN],
    ) -> Result<[u8; ED448_PUBLIC_KEY_LEN], CryptoError> {
        let (secret, _expanded) = Self::expand_secret(privkey)?;
        let scaled = Self::undo_encode_ratio(&secret);
        let point = G::precomputed_base_scalarmul(&scaled);
        Ok(G::encode_like_eddsa_mul_by_ratio(&point))
    }

    /// Sign `message` (or, with `prehashed`, a 64-byte Ed448ph digest).
    ///
    /// `pubkey` must be the key derived from `privkey`; it is hashed into the
    /// challenge as given.
    pub fn sign(
        privkey: &[u8; ED448_SEED_LEN],
        pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
        message: &[u8],
        context: &[u8],
        prehashed: bool,
    ) -> Result<[u8; ED448_SIGNATURE_LEN], CryptoError> {
        if context.len() > ED448_MAX_CONTEXT_LEN {
            return Err(CryptoError::ContextTooLong(context.len()));
        }
        let variant = Ed448Variant::from_prehashed(prehashed);
        let dom = dom4(variant, context);

        // Step 1: h = XOF(seed, 114); a = clamp(h[0..57]); prefix = h[57..114]
        let (secret, expanded) = Self::expand_secret(privkey)?;

        // Step 2: r = XOF(dom4 || prefix || M, 114) mod L
        let nonce = {
            let mut hash = Zeroizing::new([0u8; EXPANDED_LEN]);
            X::hash(
                &mut hash[..],
                &[&dom[..], &expanded[ED448_SEED_LEN..], message],
            )?;
            Zeroizing::new(G::scalar_decode_long(&hash[..]))
        };

        // Step 3: R = r·B
        let scaled_nonce = Self::undo_encode_ratio(&nonce);
        let nonce_point = G::precomputed_base_scalarmul(&scaled_nonce);
        let r = G::encode_like_eddsa_mul_by_ratio(&nonce_point);

        // Step 4: k = XOF(dom4 || R || A || M, 114) mod L
        let challenge = Self::challenge(&dom, &r, pubkey, message)?;

        // Step 5: S = (r + k·a) mod L
        let product = Zeroizing::new(G::scalar_mul(&challenge, &secret));
        let s = Zeroizing::new(G::scalar_add(&product, &nonce));

        // Step 6: signature = R(57) || S(57)
        let mut sig = [0u8; ED448_SIGNATURE_LEN];
        sig[..POINT_BYTES].copy_from_slice(&r);
        sig[POINT_BYTES..].copy_from_slice(&G::scalar_encode(&s));

        debug!(
            variant = variant.name(),
            xof = X::ALG_ID.name(),
            context_len = context.len(),
            message_len = message.len(),
            "eddsa448 signature created"
        );
        Ok(sig)
    }

    /// Ed448ph signing over a precomputed SHAKE256 digest.
    pub fn sign_prehash(
        privkey: &[u8; ED448_SEED_LEN],
        pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
        digest: &[u8; ED448_PREHASH_LEN],
        context: &[u8],
    ) -> Result<[u8; ED448_SIGNATURE_LEN], CryptoError> {
        Self::sign(privkey, pubkey, digest, context, true)
    }

    /// Verify a signature. Every failure is a plain `false`.
    pub fn verify(
        signature: &[u8; ED448_SIGNATURE_LEN],
        pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
        message: &[u8],
        context: &[u8],
        prehashed: bool,
    ) -> bool {
        let variant = Ed448Variant::from_prehashed(prehashed);
        if context.len() > ED448_MAX_CONTEXT_LEN {
            trace!(context_len = context.len(), "eddsa448 verify: context too long");
            return false;
        }

        let mut r_bytes = [0u8; POINT_BYTES];
        r_bytes.copy_from_slice(&signature[..POINT_BYTES]);
        let mut s_bytes = [0u8; SCALAR_ENCODED_BYTES];
        s_bytes.copy_from_slice(&signature[POINT_BYTES..]);

        // Check S < L
        if !Self::scalar_in_range(&s_bytes) {
            trace!(variant = variant.name(), "eddsa448 verify: s out of range");
            return false;
        }

        let pk_point = match G::decode_like_eddsa_and_mul_by_ratio(pubkey) {
            Some(p) => p,
            None => {
                trace!(variant = variant.name(), "eddsa448 verify: bad public key");
                return false;
            }
        };
        let r_point = match G::decode_like_eddsa_and_mul_by_ratio(&r_bytes) {
            Some(p) => p,
            None => {
                trace!(variant = variant.name(), "eddsa448 verify: bad R");
                return false;
            }
        };

        let dom = dom4(variant, context);
        let challenge = match Self::challenge(&dom, &r_bytes, pubkey, message) {
            Ok(k) => k,
            Err(e) => {
                trace!(error = %e, "eddsa448 verify: challenge hash failed");
                return false;
            }
        };
        let neg_challenge = G::scalar_sub(&G::scalar_zero(), &challenge);
        let s = G::scalar_decode_long(&s_bytes);

        // [S]B − [k]A must equal R up to torsion.
        let p = G::base_double_scalarmul_non_secret(&s, &neg_challenge, &pk_point);
        let ok = G::point_eq(&p, &r_point);
        trace!(
            variant = variant.name(),
            xof = X::ALG_ID.name(),
            ok,
            "eddsa448 verify"
        );
        ok
    }

    /// Ed448ph verification over a precomputed SHAKE256 digest.
    pub fn verify_prehash(
        signature: &[u8; ED448_SIGNATURE_LEN],
        pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
        digest: &[u8; ED448_PREHASH_LEN],
        context: &[u8],
    ) -> bool {
        Self::verify(signature, pubkey, digest, context, true)
    }

    /// Whether `pubkey` decodes to a curve point. Says nothing about its order.
    pub fn pubkey_structural_check(pubkey: &[u8; ED448_PUBLIC_KEY_LEN]) -> bool {
        G::decode_like_eddsa_and_mul_by_ratio(pubkey).is_some()
    }
}

/// Derive an Ed448 public key from a 57-byte seed.
pub fn derive_public_key(
    privkey: &[u8; ED448_SEED_LEN],
) -> Result<[u8; ED448_PUBLIC_KEY_LEN], CryptoError> {
    Ed448::derive_public_key(privkey)
}

/// Ed448 (or, with `prehashed`, Ed448ph over a 64-byte digest) signing.
pub fn sign(
    privkey: &[u8; ED448_SEED_LEN],
    pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
    message: &[u8],
    context: &[u8],
    prehashed: bool,
) -> Result<[u8; ED448_SIGNATURE_LEN], CryptoError> {
    Ed448::sign(privkey, pubkey, message, context, prehashed)
}

/// Ed448ph signing of a digest produced by [`prehash`].
pub fn sign_prehash(
    privkey: &[u8; ED448_SEED_LEN],
    pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
    digest: &[u8; ED448_PREHASH_LEN],
    context: &[u8],
) -> Result<[u8; ED448_SIGNATURE_LEN], CryptoError> {
    Ed448::sign_prehash(privkey, pubkey, digest, context)
}

/// Ed448 signature verification.
pub fn verify(
    signature: &[u8; ED448_SIGNATURE_LEN],
    pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
    message: &[u8],
    context: &[u8],
    prehashed: bool,
) -> bool {
    Ed448::verify(signature, pubkey, message, context, prehashed)
}

/// Ed448ph verification of a digest produced by [`prehash`].
pub fn verify_prehash(
    signature: &[u8; ED448_SIGNATURE_LEN],
    pubkey: &[u8; ED448_PUBLIC_KEY_LEN],
    digest: &[u8; ED448_PREHASH_LEN],
    context: &[u8],
) -> bool {
    Ed448::verify_prehash(signature, pubkey, digest, context)
}

/// Whether a public key encoding decodes to a point.
pub fn pubkey_structural_check(pubkey: &[u8; ED448_PUBLIC_KEY_LEN]) -> bool {
    Ed448::pubkey_structural_check(pubkey)
}

/// Prehash for Ed448ph: SHAKE256(msg, 64).
pub fn prehash(message: &[u8]) -> [u8; ED448_PREHASH_LEN] {
    let mut out = [0u8; ED448_PREHASH_LEN];
    Shake256::digest(message, &mut out);
    out
}

/// Derive the X448 private key that shares this Ed448 seed:
/// the first 56 bytes of SHAKE256(seed).
pub fn convert_private_key_to_x448(privkey: &[u8; ED448_SEED_LEN]) -> [u8; X448_PRIVATE_KEY_LEN] {
    let mut out = [0u8; X448_PRIVATE_KEY_LEN];
    Shake256::digest(privkey, &mut out);
    out
}

fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], CryptoError> {
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            expected: N,
            got: bytes.len(),
        })
}

/// An Ed448 key pair for signing and verification.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ed448KeyPair {
    /// The 57-byte private seed; `None` for a verify-only key.
    private_key: Option<[u8; ED448_SEED_LEN]>,
    /// The 57-byte public key.
    public_key: [u8; ED448_PUBLIC_KEY_LEN],
}

impl Ed448KeyPair {
    /// Generate a new random Ed448 key pair.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut seed = Zeroizing::new([0u8; ED448_SEED_LEN]);
        getrandom::getrandom(&mut seed[..]).map_err(|_| CryptoError::RandGenFail)?;
        Self::from_seed(&seed[..])
    }

    /// Return a reference to the 57-byte private seed, if present.
    pub fn seed(&self) -> Option<&[u8; ED448_SEED_LEN]> {
        self.private_key.as_ref()
    }

    /// Create an Ed448 key pair from a 57-byte private seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self, CryptoError> {
        let private_key: [u8; ED448_SEED_LEN] = to_array(seed)?;
        let public_key = derive_public_key(&private_key)?;
        Ok(Ed448KeyPair {
            private_key: Some(private_key),
            public_key,
        })
    }

    /// Create an Ed448 verifier from a 57-byte public key (verify-only).
    pub fn from_public_key(public_key: &[u8]) -> Result<Self, CryptoError> {
        let public_key: [u8; ED448_PUBLIC_KEY_LEN] = to_array(public_key)?;
        if !pubkey_structural_check(&public_key) {
            return Err(CryptoError::EccPointNotOnCurve);
        }
        Ok(Ed448KeyPair {
            private_key: None,
            public_key,
        })
    }

    /// Return the 57-byte public key.
    pub fn public_key(&self) -> &[u8; ED448_PUBLIC_KEY_LEN] {
        &self.public_key
    }

    fn private_key(&self) -> Result<&[u8; ED448_SEED_LEN], CryptoError> {
        self.private_key
            .as_ref()
            .ok_or(CryptoError::EccInvalidPrivateKey)
    }

    /// Sign a message, returning the 114-byte signature.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; ED448_SIGNATURE_LEN], CryptoError> {
        self.sign_with_context(message, &[])
    }

    /// Sign a message with an explicit context string (0..255 bytes).
    pub fn sign_with_context(
        &self,
        message: &[u8],
        context: &[u8],
    ) -> Result<[u8; ED448_SIGNATURE_LEN], CryptoError> {
        sign(self.private_key()?, &self.public_key, message, context, false)
    }

    /// Sign a message using Ed448ph: the message is first hashed with
    /// SHAKE256(msg, 64).
    pub fn sign_ph(&self, message: &[u8]) -> Result<[u8; ED448_SIGNATURE_LEN], CryptoError> {
        self.sign_ph_with_context(message, &[])
    }

    /// Ed448ph signing with an explicit context string.
    pub fn sign_ph_with_context(
        &self,
        message: &[u8],
        context: &[u8],
    ) -> Result<[u8; ED448_SIGNATURE_LEN], CryptoError> {
        let ph = prehash(message);
        sign_prehash(self.private_key()?, &self.public_key, &ph, context)
    }

    /// Verify a signature against a message.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        self.verify_with_context(message, signature, &[])
    }

    /// Verify a signature with an explicit context string.
    pub fn verify_with_context(
        &self,
        message: &[u8],
        signature: &[u8],
        context: &[u8],
    ) -> Result<bool, CryptoError> {
        let sig: [u8; ED448_SIGNATURE_LEN] = match signature.try_into() {
            Ok(s) => s,
            Err(_) => return Ok(false),
        };
        Ok(verify(&sig, &self.public_key, message, context, false))
    }

    /// Verify using Ed448ph (prehashed variant).
    pub fn verify_ph(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        self.verify_ph_with_context(message, signature, &[])
    }

    /// Ed448ph verification with an explicit context string.
    pub fn verify_ph_with_context(
        &self,
        message: &[u8],
        signature: &[u8],
        context: &[u8],
    ) -> Result<bool, CryptoError> {
        let sig: [u8; ED448_SIGNATURE_LEN] = match signature.try_into() {
            Ok(s) => s,
            Err(_) => return Ok(false),
        };
        let ph = prehash(message);
        Ok(verify_prehash(&sig, &self.public_key, &ph, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn seed_pair() -> ([u8; ED448_SEED_LEN], [u8; ED448_PUBLIC_KEY_LEN]) {
        let mut seed = [0u8; ED448_SEED_LEN];
        getrandom::getrandom(&mut seed).unwrap();
        let public = derive_public_key(&seed).unwrap();
        (seed, public)
    }

    /// RFC 8032 §7.4 Test Vector: Ed448, blank message.
    #[test]
    fn test_ed448_rfc8032_blank() {
        let seed = hex("6c82a562cb808d10d632be89c8513ebf\
             6c929f34ddfa8c9f63c9960ef6e348a3\
             528c8a3fcc2f044e39a3fc5b94492f8f\
             032e7549a20098f95b");
        let expected_pub = hex("5fd7449b59b461fd2ce787ec616ad46a\
             1da1342485a70e1f8a0ea75d80e96778\
             edf124769b46c7061bd6783df1e50f6c\
             d1fa1abeafe8256180");
        let expected_sig = hex("533a37f6bbe457251f023c0d88f976ae\
             2dfb504a843e34d2074fd823d41a591f\
             2b233f034f628281f2fd7a22ddd47d78\
             28c59bd0a21bfd3980ff0d2028d4b18a\
             9df63e006c5d1c2d345b925d8dc00b41\
             04852db99ac5c7cdda8530a113a0f4db\
             b61149f05a7363268c71d95808ff2e65\
             2600");

        let key = Ed448KeyPair::from_seed(&seed).unwrap();
        assert_eq!(key.public_key().as_slice(), &expected_pub);

        let sig = key.sign(b"").unwrap();
        assert_eq!(sig.as_slice(), &expected_sig);

        let valid = key.verify(b"", &sig).unwrap();
        assert!(valid);
    }

    /// RFC 8032 §7.4 Test Vector: Ed448, 1 byte message (0x03).
    #[test]
    fn test_ed448_rfc8032_1byte() {
        let seed = hex("c4eab05d357007c632f3dbb48489924d\
             552b08fe0c353a0d4a1f00acda2c463a\
             fbea67c5e8d2877c5e3bc397a659949e\
             f8021e954e0a12274e");
        let expected_pub = hex("43ba28f430cdff456ae531545f7ecd0a\
             c834a55d9358c0372bfa0c6c6798c086\
             6aea01eb00742802b8438ea4cb82169c\
             235160627b4c3a9480");
        let expected_sig = hex("26b8f91727bd62897af15e41eb43c377\
             efb9c610d48f2335cb0bd0087810f435\
             2541b143c4b981b7e18f62de8ccdf633\
             fc1bf037ab7cd779805e0dbcc0aae1cb\
             cee1afb2e027df36bc04dcecbf154336\
             c19f0af7e0a6472905e799f1953d2a0f\
             f3348ab21aa4adafd1d234441cf807c0\
             3a00");

        let key = Ed448KeyPair::from_seed(&seed).unwrap();
        assert_eq!(key.public_key().as_slice(), &expected_pub);

        let sig = key.sign(&[0x03]).unwrap();
        assert_eq!(sig.as_slice(), &expected_sig);

        assert!(key.verify(&[0x03], &sig).unwrap());
    }

    /// RFC 8032 §7.4 Test Vector: Ed448, 1 byte message (0x03), context "foo".
    #[test]
    fn test_ed448_rfc8032_context() {
        let seed = hex("c4eab05d357007c632f3dbb48489924d\
             552b08fe0c353a0d4a1f00acda2c463a\
             fbea67c5e8d2877c5e3bc397a659949e\
             f8021e954e0a12274e");
        let expected_sig = hex("d4f8f6131770dd46f40867d6fd5d5055\
             de43541f8c5e35abbcd001b32a89f7d2\
             151f7647f11d8ca2ae279fb842d60721\
             7fce6e042f6815ea000c85741de5c8da\
             1144a6a1aba7f96de42505d7a7298524\
             fda538fccbbb754f578c1cad10d54d0d\
             5428407e85dcbc98a49155c13764e66c\
             3c00");

        let key = Ed448KeyPair::from_seed(&seed).unwrap();
        let sig = key.sign_with_context(b"\x03", b"foo").unwrap();
        assert_eq!(sig.as_slice(), &expected_sig);

        assert!(key.verify_with_context(b"\x03", &sig, b"foo").unwrap());
    }

    /// RFC 8032 §7.5: Ed448ph, "abc".
    #[test]
    fn test_ed448ph_rfc8032() {
        let seed = hex("833fe62409237b9d62ec77587520911e\
             9a759cec1d19755b7da901b96dca3d42\
             ef7822e0d5104127dc05d6dbefde69e3\
             ab2cec7c867c6e2c49");
        let expected_pub = hex("259b71c19f83ef77a7abd26524cbdb31\
             61b590a48f7d17de3ee0ba9c52beb743\
             c09428a131d6b1b57303d90d8132c276\
             d5ed3d5d01c0f53880");
        let msg = hex("616263"); // "abc"

        let expected_sig = hex("822f6901f7480f3d5f562c592994d969\
             3602875614483256505600bbc281ae38\
             1f54d6bce2ea911574932f52a4e6cadd\
             78769375ec3ffd1b801a0d9b3f4030cd\
             433964b6457ea39476511214f97469b5\
             7dd32dbc560a9a94d00bff07620464a3\
             ad203df7dc7ce360c3cd3696d9d9fab9\
             0f00");

        let key = Ed448KeyPair::from_seed(&seed).unwrap();
        assert_eq!(key.public_key().as_slice(), &expected_pub);

        let sig = key.sign_ph(&msg).unwrap();
        assert_eq!(sig.as_slice(), &expected_sig);

        assert!(key.verify_ph(&msg, &sig).unwrap());

        // The same signature through the digest-level API.
        let seed_arr: [u8; ED448_SEED_LEN] = seed.as_slice().try_into().unwrap();
        let ph = prehash(&msg);
        let sig2 = sign_prehash(&seed_arr, key.public_key(), &ph, &[]).unwrap();
        assert_eq!(sig, sig2);
        assert!(verify_prehash(&sig2, key.public_key(), &ph, &[]));
        // Not valid as a pure Ed448 signature over the digest.
        assert!(!verify(&sig2, key.public_key(), &ph, &[], false));
    }

    #[test]
    fn test_ed448_sign_verify_roundtrip() {
        let key = Ed448KeyPair::generate().unwrap();
        let msg = b"Hello, Ed448!";
        let sig = key.sign(msg).unwrap();
        assert!(key.verify(msg, &sig).unwrap());
    }

    #[test]
    fn test_ed448_tamper_detection() {
        let key = Ed448KeyPair::generate().unwrap();
        let msg = b"original message";
        let sig = key.sign(msg).unwrap();
        assert!(!key.verify(b"tampered message", &sig).unwrap());
    }

    #[test]
    fn test_ed448_invalid_signature() {
        let key = Ed448KeyPair::generate().unwrap();
        let msg = b"test message";
        let mut sig = key.sign(msg).unwrap();
        sig[0] ^= 0x01; // tamper with R
        assert!(!key.verify(msg, &sig).unwrap());
        assert!(!key.verify(msg, &sig[..100]).unwrap());
    }

    #[test]
    fn test_ed448_context_mismatch() {
        let key = Ed448KeyPair::generate().unwrap();
        let msg = b"context test";
        let sig = key.sign_with_context(msg, b"ctx1").unwrap();
        // Same context should verify
        assert!(key.verify_with_context(msg, &sig, b"ctx1").unwrap());
        // Different context should fail
        assert!(!key.verify_with_context(msg, &sig, b"ctx2").unwrap());
        // Empty context should fail
        assert!(!key.verify(msg, &sig).unwrap());
        // Prehash variant with the same context should fail
        assert!(!key.verify_ph_with_context(msg, &sig, b"ctx1").unwrap());
    }

    #[test]
    fn test_context_too_long() {
        let (seed, public) = seed_pair();
        let ctx = [0x55u8; 256];
        assert!(matches!(
            sign(&seed, &public, b"msg", &ctx, false),
            Err(CryptoError::ContextTooLong(256))
        ));

        // 255 bytes is the limit and still works.
        let sig = sign(&seed, &public, b"msg", &ctx[..255], false).unwrap();
        assert!(verify(&sig, &public, b"msg", &ctx[..255], false));
        assert!(!verify(&sig, &public, b"msg", &ctx, false));
    }

    #[test]
    fn test_verify_only_key() {
        let key = Ed448KeyPair::generate().unwrap();
        let sig = key.sign(b"hello").unwrap();

        let verifier = Ed448KeyPair::from_public_key(key.public_key()).unwrap();
        assert!(verifier.seed().is_none());
        assert!(verifier.verify(b"hello", &sig).unwrap());
        assert!(matches!(
            verifier.sign(b"hello"),
            Err(CryptoError::EccInvalidPrivateKey)
        ));
    }

    #[test]
    fn test_key_length_errors() {
        assert!(matches!(
            Ed448KeyPair::from_seed(&[0u8; 32]),
            Err(CryptoError::InvalidKeyLength {
                expected: 57,
                got: 32
            })
        ));
        assert!(Ed448KeyPair::from_public_key(&[0u8; 56]).is_err());
    }

    #[test]
    fn test_pubkey_structural_check() {
        let (_, public) = seed_pair();
        assert!(pubkey_structural_check(&public));

        // y = p is not a canonical field element.
        let mut bad = [0xFFu8; ED448_PUBLIC_KEY_LEN];
        bad[28] = 0xFE;
        bad[56] = 0;
        assert!(!pubkey_structural_check(&bad));
        assert!(Ed448KeyPair::from_public_key(&bad).is_err());
    }

    #[test]
    fn test_deterministic_signatures() {
        let (seed, public) = seed_pair();
        let a = sign(&seed, &public, b"same", &[], false).unwrap();
        let b = sign(&seed, &public, b"same", &[], false).unwrap();
        let c = sign(&seed, &public, b"other", &[], false).unwrap();
        assert_eq!(a, b);
        // Nonce depends on the message, so R differs.
        assert_ne!(a[..57], c[..57]);
    }

    #[test]
    fn test_convert_private_key_to_x448() {
        let (seed, _) = seed_pair();
        let x = convert_private_key_to_x448(&seed);
        let mut full = [0u8; 114];
        Shake256::digest(&seed, &mut full);
        assert_eq!(x[..], full[..56]);
        assert_eq!(x, convert_private_key_to_x448(&seed));
    }

    #[test]
    fn test_clamp() {
        let mut a = [0xFFu8; ED448_SEED_LEN];
        Ed448::clamp(&mut a);
        assert_eq!(a[0], 0xFC);
        assert_eq!(a[55], 0xFF);
        assert_eq!(a[56], 0x00);

        let mut b = [0u8; ED448_SEED_LEN];
        Ed448::clamp(&mut b);
        assert_eq!(b[55], 0x80);
    }

    #[test]
    fn test_scalar_range_check() {
        let l = <Ed448Group as CurveGroup>::ORDER_LE;
        assert!(!Ed448::scalar_in_range(&l));
        let mut below = l;
        below[0] -= 1;
        assert!(Ed448::scalar_in_range(&below));
        let mut above = l;
        above[55] = 0x40;
        assert!(!Ed448::scalar_in_range(&above));
        assert!(Ed448::scalar_in_range(&[0u8; 57]));
    }
}
