/// Cryptographic operation errors.
///
/// Signature verification never surfaces one of these: a bad signature is a
/// plain `false`. Errors are reserved for API misuse and environment failures.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("context too long: {0} bytes (max 255)")]
    ContextTooLong(usize),

    // Randomness
    #[error("random generation failed")]
    RandGenFail,

    // XOF errors
    #[error("xof: update after squeeze")]
    XofAlreadySqueezed,

    // ECC errors
    #[error("ecc: point not on curve")]
    EccPointNotOnCurve,
    #[error("ecc: invalid private key")]
    EccInvalidPrivateKey,
    #[error("ecc: invalid public key")]
    EccInvalidPublicKey,

    // Encoding errors
    #[error("decode: invalid hex input")]
    DecodeHexFail,
}
