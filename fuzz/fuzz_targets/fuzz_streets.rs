#![no_main]
use addrgen::streets::StreetNames;
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes through the street-name splitter. Names must never be
// blank or carry line terminators.
fuzz_target!(|data: &[u8]| {
    let Ok(names) = StreetNames::from_bytes(data.to_vec()) else {
        return;
    };
    for name in names.as_slice() {
        assert!(!name.trim().is_empty());
        assert!(!name.contains('\n') && !name.contains('\r'));
    }
});
