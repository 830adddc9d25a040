#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use dedupstat::{ScanConfig, ScanSession};

fuzz_target!(|files: Vec<Vec<u8>>| {
    let config = ScanConfig::new(8, u64::MAX).unwrap();
    let mut session = ScanSession::new(config).unwrap();

    for (i, data) in files.iter().enumerate() {
        session
            .scan_reader(format!("f{i}"), Cursor::new(data.as_slice()))
            .unwrap();
    }

    let expected: u64 = files.iter().map(|f| f.len().div_ceil(8) as u64).sum();
    assert_eq!(session.index().total_chunks(), expected);

    // Verify: every chunk lands in exactly one histogram bucket
    let report = session.finish().unwrap();
    assert_eq!(report.histogram().accounted_chunks(), report.total_chunks());
    if report.total_chunks() == 0 {
        assert!(report.ratio().value().is_none());
    }
});
