#![no_main]
use addrgen::reference::ReferenceData;
use libfuzzer_sys::fuzz_target;

// Feed arbitrary bytes to the reference CSV loader. Any input must either
// load or return an error; a loaded table must have every listed zip in its
// map and fit five digits.
fuzz_target!(|data: &[u8]| {
    let Ok(reference) = ReferenceData::from_reader(data) else {
        return;
    };
    for &zip in reference.zips() {
        assert!(zip <= 99_999);
        assert!(reference.lookup(zip).is_some());
    }
});
