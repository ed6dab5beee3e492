#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use xsc::{assemble, AssembleOptions, XscReader};

fuzz_target!(|data: &[u8]| {
    // Reader must return errors, never panic, on arbitrary text.
    let Ok(records) = XscReader::new(Cursor::new(data)).collect::<Result<Vec<_>, _>>() else {
        return;
    };
    if !records.is_empty() {
        let _ = assemble(vec![records], &AssembleOptions::default());
    }
});
