#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::sync::Arc;

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use packet_compression::compression::{Compression, FlateCompression};

    const THREADS: usize = 8;
    const ROUNDS: usize = 50;

    /// Mix of compressible and random bytes so each payload is distinct.
    fn payload(rng: &mut StdRng) -> Vec<u8> {
        let len = rng.gen_range(0..8192);
        let mut data = Vec::with_capacity(len);
        while data.len() < len {
            if rng.gen_bool(0.5) {
                let byte: u8 = rng.gen();
                let run = rng.gen_range(1..64);
                data.extend(std::iter::repeat(byte).take(run));
            } else {
                data.push(rng.gen());
            }
        }
        data.truncate(len);
        data
    }

    fn reference_compress(data: &[u8]) -> Vec<u8> {
        let mut enc = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::new(6));
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn reference_decompress(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        flate2::read::DeflateDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_concurrent_calls_do_not_leak_between_each_other() {
        let flate = Arc::new(FlateCompression::new());

        std::thread::scope(|s| {
            for t in 0..THREADS {
                let flate = flate.clone();
                s.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(0x5eed + t as u64);
                    for _ in 0..ROUNDS {
                        let data = payload(&mut rng);

                        let compressed = flate.compress(&data).unwrap();
                        assert_eq!(reference_decompress(&compressed), data);

                        let reference = reference_compress(&data);
                        let decompressed = flate.decompress(&reference).unwrap();
                        assert_eq!(decompressed.as_ref(), data.as_slice());
                    }
                });
            }
        });

        let writers = flate.writer_stats();
        let readers = flate.reader_stats();
        assert_eq!(writers.acquired(), (THREADS * ROUNDS) as u64);
        assert_eq!(readers.acquired(), (THREADS * ROUNDS) as u64);
        assert!(writers.created <= THREADS as u64, "at most one writer per concurrent caller");
        assert!(readers.created <= THREADS as u64, "at most one reader per concurrent caller");
        assert_eq!(writers.in_flight(), 0);
        assert_eq!(readers.in_flight(), 0);
        assert_eq!(writers.discarded, 0);
    }

    #[test]
    fn test_failed_calls_do_not_poison_later_ones() {
        let flate = FlateCompression::new();
        let data = b"after a failure the pool must still decode correctly".repeat(20);
        let good = flate.compress(&data).unwrap().into_owned();

        for _ in 0..3 {
            assert!(flate.decompress(&[0xFF, 0x00, 0x13]).is_err());
            assert_eq!(flate.decompress(&good).unwrap().as_ref(), data.as_slice());
        }

        let readers = flate.reader_stats();
        assert_eq!(readers.created, 1, "bad input must not cost a new decoder");
        assert_eq!(readers.discarded, 0);
        assert_eq!(readers.in_flight(), 0);
    }

    #[test]
    fn test_recycled_writer_produces_identical_output() {
        let flate = FlateCompression::new();
        let big = vec![0xAB; 32 * 1024];
        let small = b"small packet after a large one".to_vec();

        let first = flate.compress(&small).unwrap().into_owned();
        flate.compress(&big).unwrap();
        let again = flate.compress(&small).unwrap().into_owned();

        assert_eq!(first, again);
        assert_eq!(flate.writer_stats().created, 1);
    }
}
