#![no_main]
use goldilocks_crypto::curve448::Fe448;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoded = Fe448::from_slice(data);
    if bool::from(decoded.is_some()) {
        let x = decoded.unwrap();
        // Accepted input is canonical at its own width.
        if data.len() == 56 {
            assert_eq!(&x.serialize()[..], data);
        } else {
            assert_eq!(&x.serialize_with_hibit()[..], data);
        }
        let expected = if bool::from(x.is_zero()) { Fe448::ZERO } else { Fe448::ONE };
        assert_eq!(x.mul(&x.invert()), expected);
    }
});
