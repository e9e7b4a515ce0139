#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        let _ = perlenbilanz::input::parse_amount(s);
        let _ = perlenbilanz::input::parse_rate(s);
        let _ = perlenbilanz::input::RawAmount::from_text(s);
        let _ = perlenbilanz::input::RawAmount::from_rate_text(s);
    }
});
