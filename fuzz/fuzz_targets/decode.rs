#![no_main]
use libfuzzer_sys::fuzz_target;
use typeid_rs::{Prefix, Random, Sortable};

struct TestPrefix;
impl Prefix for TestPrefix {
    fn prefix() -> &'static str {
        "test"
    }
}

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    if let Ok(id) = Random::<TestPrefix>::parse(&input) {
        assert_eq!(id.to_string(), input);
    }
    if let Ok(id) = Sortable::<TestPrefix>::parse(&input) {
        assert_eq!(id.to_string(), input);
    }
});
