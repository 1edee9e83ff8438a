//! Structural public key check.

use goldilocks_crypto::pubkey_structural_check;
use goldilocks_types::{CryptoError, ED448_PUBLIC_KEY_LEN};

use crate::hexutil;

pub fn run(pubkey_hex: &str) -> Result<(), Box<dyn std::error::Error>> {
    let public = hexutil::decode_array::<ED448_PUBLIC_KEY_LEN>(pubkey_hex)?;
    if pubkey_structural_check(&public) {
        println!("Public key OK");
        Ok(())
    } else {
        Err(CryptoError::EccInvalidPublicKey.into())
    }
}
