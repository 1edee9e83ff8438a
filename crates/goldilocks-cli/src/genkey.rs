//! Key generation command implementation.

use std::fs;

use goldilocks_crypto::Ed448KeyPair;
use zeroize::Zeroizing;

use crate::hexutil;

pub fn run(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Generating Ed448 key...");
    let kp = Ed448KeyPair::generate()?;
    let seed = kp.seed().ok_or("generated key has no seed")?;
    let seed_hex = Zeroizing::new(hexutil::encode(seed));

    if let Some(path) = output {
        fs::write(path, format!("{}\n", seed_hex.as_str()))?;
        eprintln!("Key written to {path}");
    } else {
        println!("{}", seed_hex.as_str());
    }
    eprintln!("Public key: {}", hexutil::encode(kp.public_key()));
    Ok(())
}
