/// Ed448 private key seed length in bytes.
pub const ED448_SEED_LEN: usize = 57;
/// Ed448 encoded public key length in bytes.
pub const ED448_PUBLIC_KEY_LEN: usize = 57;
/// Ed448 signature length in bytes (R ‖ s).
pub const ED448_SIGNATURE_LEN: usize = 114;
/// Length of the SHAKE256 digest signed by Ed448ph.
pub const ED448_PREHASH_LEN: usize = 64;
/// Maximum context string length accepted by Ed448.
pub const ED448_MAX_CONTEXT_LEN: usize = 255;
/// X448 private key length in bytes.
pub const X448_PRIVATE_KEY_LEN: usize = 56;

/// Hash / XOF algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgId {
    Shake256,
}

impl HashAlgId {
    pub fn name(self) -> &'static str {
        match self {
            HashAlgId::Shake256 => "SHAKE256",
        }
    }
}

/// EdDSA over Curve448 variants (RFC 8032 §5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ed448Variant {
    /// Ed448: the message is signed directly.
    #[default]
    Pure,
    /// Ed448ph: a 64-byte SHAKE256 digest of the message is signed.
    Prehash,
}

impl Ed448Variant {
    /// The phflag octet placed in the dom4 prefix.
    pub fn phflag(self) -> u8 {
        match self {
            Ed448Variant::Pure => 0,
            Ed448Variant::Prehash => 1,
        }
    }

    pub fn from_prehashed(prehashed: bool) -> Self {
        if prehashed {
            Ed448Variant::Prehash
        } else {
            Ed448Variant::Pure
        }
    }

    /// Name used by the CLI and in log events.
    pub fn name(self) -> &'static str {
        match self {
            Ed448Variant::Pure => "Ed448",
            Ed448Variant::Prehash => "Ed448ph",
        }
    }
}
