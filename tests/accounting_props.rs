// Property tests for chunk accounting
// Small alphabets and a tiny chunk size force plenty of duplicate chunks

use std::io::Cursor;

use dedupstat::{ScanConfig, ScanSession};
use proptest::prelude::*;

const CHUNK: usize = 4;

fn files() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..3, 0..64), 0..12)
}

proptest! {
    #[test]
    fn total_chunks_matches_file_sizes(files in files()) {
        let mut session = ScanSession::new(ScanConfig::new(CHUNK, u64::MAX).unwrap()).unwrap();
        for (i, data) in files.iter().enumerate() {
            session.scan_reader(format!("f{i}"), Cursor::new(data.clone())).unwrap();
        }

        let expected: u64 = files.iter().map(|f| f.len().div_ceil(CHUNK) as u64).sum();
        prop_assert_eq!(session.index().total_chunks(), expected);
    }

    #[test]
    fn histogram_accounts_for_every_chunk(files in files()) {
        let mut session = ScanSession::new(ScanConfig::new(CHUNK, u64::MAX).unwrap()).unwrap();
        for (i, data) in files.iter().enumerate() {
            session.scan_reader(format!("f{i}"), Cursor::new(data.clone())).unwrap();
        }
        let distinct = session.index().len() as u64;

        let report = session.finish().unwrap();
        prop_assert_eq!(report.histogram().accounted_chunks(), report.total_chunks());
        prop_assert_eq!(report.distinct_chunks(), distinct);
        prop_assert_eq!(report.histogram().get(0), 0);

        match report.ratio().value() {
            None => prop_assert_eq!(report.total_chunks(), 0),
            Some(ratio) => prop_assert!((0.0..=1.0).contains(&ratio)),
        }
    }

    #[test]
    fn scanning_a_file_twice_doubles_every_count(data in prop::collection::vec(any::<u8>(), 1..256)) {
        let mut once = ScanSession::new(ScanConfig::new(CHUNK, u64::MAX).unwrap()).unwrap();
        once.scan_reader("a", Cursor::new(data.clone())).unwrap();

        let mut twice = ScanSession::new(ScanConfig::new(CHUNK, u64::MAX).unwrap()).unwrap();
        twice.scan_reader("a", Cursor::new(data.clone())).unwrap();
        twice.scan_reader("b", Cursor::new(data.clone())).unwrap();

        prop_assert_eq!(once.index().len(), twice.index().len());
        for record in once.index().records() {
            let doubled = twice.index().get(record.digest()).unwrap();
            prop_assert_eq!(doubled.ref_count(), record.ref_count() * 2);
        }
    }
}
