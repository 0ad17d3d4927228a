#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate real48;

use real48::Real48;

fuzz_target!(|data: &[u8]| {
    let mut it = data.iter().copied();
    while let Ok(value) = Real48::read(&mut it) {
        let again = Real48::from_f64(value.to_f64()).expect("every Real48 survives a trip through f64");
        assert_eq!(again, value);
        if value.is_zero() {
            continue;
        }
        assert_eq!(again.to_bytes(), value.to_bytes());
        if let Ok(single) = value.to_f32() {
            let narrowed = Real48::from_f32(single).expect("decoded singles re-encode");
            assert_eq!(narrowed.sign(), value.sign());
            assert_eq!(narrowed.exponent(), value.exponent());
        }
    }
});
