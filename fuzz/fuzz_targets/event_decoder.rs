#![no_main]

use higgsml::decoder::Decoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes after a valid header must decode or fail, never panic
    let mut input = higgsml::schema::header_line().into_bytes();
    input.push(b'\n');
    input.extend_from_slice(data);
    for event in Decoder::new(input.as_slice()) {
        if event.is_err() {
            break;
        }
    }
});
