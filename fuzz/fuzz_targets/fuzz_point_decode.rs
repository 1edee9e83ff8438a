#![no_main]
use goldilocks_crypto::curve448::EdwardsPoint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(enc) = <[u8; 57]>::try_from(data) else {
        return;
    };
    if let Some(p) = EdwardsPoint::from_bytes(&enc) {
        // Every accepted encoding is canonical.
        assert_eq!(p.to_bytes(), enc);
    }
});
