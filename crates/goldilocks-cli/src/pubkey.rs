//! Print the public key belonging to a private seed.

use goldilocks_crypto::derive_public_key;
use goldilocks_types::ED448_SEED_LEN;

use crate::hexutil;

pub fn run(key_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let seed = hexutil::read_seed::<ED448_SEED_LEN>(key_path)?;
    let public = derive_public_key(&seed)?;
    println!("{}", hexutil::encode(&public));
    Ok(())
}
