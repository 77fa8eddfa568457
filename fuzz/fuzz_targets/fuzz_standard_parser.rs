//! Fuzz target for standard catalog parsing.
//!
//! Goal: The parser should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_standard_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only test valid UTF-8 strings (catalog files must be UTF-8)
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = complymap_catalog::fuzz::parse_standard(text);
    }
});
