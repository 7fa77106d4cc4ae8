#![no_main]

use higgsml::evaluate::read_submission;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed submissions are errors, not panics
    let _ = read_submission(data);
});
