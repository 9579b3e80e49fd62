//! Fuzz target for CSV parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the CSV reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use panconv::document::io_csv::{from_csv_slice, CsvReadOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_csv_slice(data, &CsvReadOptions::default());
});
