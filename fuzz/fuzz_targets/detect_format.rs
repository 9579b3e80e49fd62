//! Fuzz target for format detection.
//!
//! Detection must be total: any byte sequence classifies as some format
//! (or Unknown) without panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use panconv::detect_format;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = detect_format(data);
});
