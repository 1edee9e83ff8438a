//! Ed448 / Ed448ph signing command.

use goldilocks_crypto::Ed448KeyPair;
use goldilocks_types::{Ed448Variant, ED448_SEED_LEN};
use tracing::info;

use crate::hexutil;

pub fn run(
    key_path: &str,
    context: &str,
    prehash: bool,
    input: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let seed = hexutil::read_seed::<ED448_SEED_LEN>(key_path)?;
    let kp = Ed448KeyPair::from_seed(&seed[..])?;
    let data = hexutil::read_input(input)?;

    let sig = if prehash {
        kp.sign_ph_with_context(&data, context.as_bytes())?
    } else {
        kp.sign_with_context(&data, context.as_bytes())?
    };
    info!(
        variant = Ed448Variant::from_prehashed(prehash).name(),
        input,
        bytes = data.len(),
        "signed input"
    );
    println!("{}", hexutil::encode(&sig));
    Ok(())
}
