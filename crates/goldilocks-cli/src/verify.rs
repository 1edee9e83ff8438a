//! Ed448 / Ed448ph signature verification command.

use goldilocks_crypto::{prehash as shake_prehash, verify as ed448_verify, verify_prehash};
use goldilocks_types::{Ed448Variant, ED448_PUBLIC_KEY_LEN, ED448_SIGNATURE_LEN};
use tracing::info;

use crate::hexutil;

pub fn run(
    pubkey: &str,
    sig: &str,
    context: &str,
    prehash: bool,
    input: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let public = hexutil::hex_or_file::<ED448_PUBLIC_KEY_LEN>(pubkey)?;
    let signature = hexutil::decode_array::<ED448_SIGNATURE_LEN>(sig)?;
    let data = hexutil::read_input(input)?;

    let valid = if prehash {
        let digest = shake_prehash(&data);
        verify_prehash(&signature, &public, &digest, context.as_bytes())
    } else {
        ed448_verify(&signature, &public, &data, context.as_bytes(), false)
    };
    info!(
        variant = Ed448Variant::from_prehashed(prehash).name(),
        input,
        valid,
        "verified input"
    );

    if valid {
        println!("Signature Verified Successfully");
        Ok(())
    } else {
        Err("Verification Failure".into())
    }
}
