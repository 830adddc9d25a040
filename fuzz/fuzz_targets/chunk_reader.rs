#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use dedupstat::ChunkReader;

/// Serves `data` in reads whose sizes are driven by `steps`.
struct Jittery<'a> {
    data: &'a [u8],
    steps: &'a [u8],
    pos: usize,
    step: usize,
}

impl Read for Jittery<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = match self.steps.get(self.step % self.steps.len().max(1)) {
            Some(&s) => s as usize % 97 + 1,
            None => buf.len(),
        };
        self.step += 1;
        let n = want.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fuzz_target!(|input: (Vec<u8>, Vec<u8>, u8)| {
    let (data, steps, size) = input;
    let chunk_size = size as usize % 64 + 1;

    let reader = Jittery {
        data: &data,
        steps: &steps,
        pos: 0,
        step: 0,
    };
    let chunks: Vec<_> = ChunkReader::new(reader, chunk_size)
        .collect::<Result<_, _>>()
        .unwrap();

    // Verify: boundaries depend only on offsets, never on read sizes
    let expected: Vec<&[u8]> = data.chunks(chunk_size).collect();
    assert_eq!(chunks.len(), expected.len());
    for (chunk, want) in chunks.iter().zip(expected) {
        assert!(!chunk.is_empty());
        assert_eq!(&chunk[..], want);
    }
});
