//! Hex encoding and key file helpers shared by the subcommands.

use std::fs;
use std::io::Read;
use std::path::Path;

use goldilocks_types::CryptoError;
use zeroize::Zeroizing;

pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    let s = s.trim();
    if s.len() % 2 != 0 {
        return Err(CryptoError::DecodeHexFail);
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            s.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or(CryptoError::DecodeHexFail)
        })
        .collect()
}

/// Decode hex into a fixed-size array, checking the length.
pub fn decode_array<const N: usize>(s: &str) -> Result<[u8; N], CryptoError> {
    let bytes = Zeroizing::new(decode(s)?);
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            expected: N,
            got: bytes.len(),
        })
}

/// Read a hex-encoded private seed from a file.
pub fn read_seed<const N: usize>(path: &str) -> Result<Zeroizing<[u8; N]>, Box<dyn std::error::Error>> {
    let text = Zeroizing::new(fs::read_to_string(path)?);
    Ok(Zeroizing::new(decode_array(&text)?))
}

/// Accept either a hex string or the path of a file that holds one.
pub fn hex_or_file<const N: usize>(arg: &str) -> Result<[u8; N], Box<dyn std::error::Error>> {
    if Path::new(arg).is_file() {
        let text = fs::read_to_string(arg)?;
        Ok(decode_array(&text)?)
    } else {
        Ok(decode_array(arg)?)
    }
}

/// Read the message input; `-` means stdin.
pub fn read_input(path: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read(path)?)
    }
}
