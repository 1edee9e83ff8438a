#![no_main]
use libfuzzer_sys::fuzz_target;

// Layout: 57-byte public key, 114-byte signature, 1-byte context length,
// then context and message.
fuzz_target!(|data: &[u8]| {
    if data.len() < 57 + 114 + 1 {
        return;
    }
    let (pubkey, rest) = data.split_at(57);
    let (sig, rest) = rest.split_at(114);
    let ctx_len = (rest[0] as usize).min(rest.len() - 1);
    let (ctx, msg) = rest[1..].split_at(ctx_len);

    let pubkey: [u8; 57] = pubkey.try_into().unwrap();
    let sig: [u8; 114] = sig.try_into().unwrap();
    let _ = goldilocks_crypto::verify(&sig, &pubkey, msg, ctx, false);
    let _ = goldilocks_crypto::verify(&sig, &pubkey, msg, ctx, true);
});
