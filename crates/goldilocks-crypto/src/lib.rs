#![forbid(unsafe_code)]
#![doc = "Goldilocks field arithmetic and the Ed448 signature scheme."]

// Core traits
pub mod provider;

// Hash algorithms
#[cfg(feature = "sha3")]
pub mod sha3;

// Field, scalar and curve group
pub mod curve448;

// Signatures
#[cfg(feature = "ed448")]
pub mod ed448;

#[cfg(feature = "ed448")]
pub use ed448::{
    convert_private_key_to_x448, derive_public_key, prehash, pubkey_structural_check, sign,
    sign_prehash, verify, verify_prehash, Ed448, Ed448KeyPair, Eddsa448,
};
pub use provider::{CurveGroup, Xof};
#[cfg(feature = "sha3")]
pub use sha3::Shake256;
