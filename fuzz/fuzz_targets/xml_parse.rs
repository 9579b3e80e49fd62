//! Fuzz target for XML parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the XML reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use panconv::document::io_xml::from_xml_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_xml_slice(data);
});
