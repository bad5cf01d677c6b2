//! Integration tests exercising every backend through the BloomFilter contract

use bloomstore::filter::redis_key;
use bloomstore::{
    BloomFilter, Error, FileBloomFilter, ListStore, MemoryBloomFilter, MemoryListStore,
    RemoteBloomFilter,
};
use proptest::prelude::*;
use rand::Rng;
use tempfile::TempDir;

/// Insert `count` records, then probe them and `count` never-inserted records.
///
/// Returns the false-positive rate over the never-inserted probes.
fn insert_and_probe(filter: &mut dyn BloomFilter, count: usize) -> f64 {
    for i in 0..count {
        filter.put_str(&format!("r{}", i)).unwrap();
    }

    let mut false_positives = 0;
    for i in 0..count {
        let existing = format!("r{}", i);
        assert!(filter.has_str(&existing).unwrap(), "False negative for {}", existing);

        if filter.has_str(&format!("rr{}", i)).unwrap() {
            false_positives += 1;
        }
    }

    let fp_rate = false_positives as f64 / count as f64;
    println!("False positives: {}/{} ({:.4})", false_positives, count, fp_rate);
    fp_rate
}

#[test]
fn test_memory_filter_fp_rate() {
    let mut filter = MemoryBloomFilter::new(64 << 20, 5).unwrap();
    let fp_rate = insert_and_probe(&mut filter, 50000);
    assert!(fp_rate < 0.1, "False positive rate too high: {:.4}", fp_rate);
}

#[test]
fn test_file_filter_fp_rate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bl.bloom");

    let mut filter = FileBloomFilter::new(&path, 64 << 20, 5).unwrap();
    let fp_rate = insert_and_probe(&mut filter, 50000);
    assert!(fp_rate < 0.1, "False positive rate too high: {:.4}", fp_rate);

    filter.put_str("test hello").unwrap();
    filter.store().unwrap();
    assert!(path.exists());
}

#[test]
fn test_remote_filter_fp_rate() {
    let mut filter = RemoteBloomFilter::new(MemoryListStore::new(), 1 << 20, 5).unwrap();
    let fp_rate = insert_and_probe(&mut filter, 50000);
    assert!(fp_rate < 0.1, "False positive rate too high: {:.4}", fp_rate);
}

#[test]
fn test_fp_rate_tracks_estimate() {
    // Small enough that false positives actually show up
    let num_bits = 20_000;
    let num_hashes = 4;
    let items = 2_000;

    let mut filter = MemoryBloomFilter::new(num_bits, num_hashes).unwrap();
    let fp_rate = insert_and_probe(&mut filter, items);
    let estimated = filter.estimated_false_positive_rate(items as u64);

    println!("Estimated FP rate: {:.4}, actual: {:.4}", estimated, fp_rate);
    assert!(fp_rate < estimated * 3.0 + 0.01);
}

#[test]
fn test_persistence_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.bloom");

    let keys: Vec<String> = (0..5000).map(|i| format!("user:{:06}", i)).collect();

    let mut filter = FileBloomFilter::new(&path, 1 << 18, 6).unwrap();
    for key in &keys {
        filter.put_str(key).unwrap();
    }
    filter.store().unwrap();

    let reloaded = FileBloomFilter::reload(&path).unwrap();
    assert_eq!(reloaded.num_hashes(), 6);
    assert_eq!(reloaded.num_bits(), 1 << 18);
    for key in &keys {
        assert!(reloaded.has_str(key).unwrap(), "Lost {} across reload", key);
    }

    // Identical answers for probes that were never inserted
    for i in 0..5000 {
        let probe = format!("probe:{}", i);
        assert_eq!(filter.has_str(&probe).unwrap(), reloaded.has_str(&probe).unwrap());
    }
}

#[test]
fn test_close_then_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("closed.bloom");

    let mut filter = FileBloomFilter::new(&path, 1 << 16, 3).unwrap();
    filter.put(b"before close").unwrap();
    filter.close().unwrap();
    assert!(matches!(filter.put(b"after close"), Err(Error::Closed)));

    let mut reloaded = FileBloomFilter::reload(&path).unwrap();
    assert!(reloaded.has(b"before close").unwrap());

    // Resumed filter keeps accumulating and overwrites the snapshot
    reloaded.put(b"after reload").unwrap();
    reloaded.close().unwrap();

    let again = FileBloomFilter::reload(&path).unwrap();
    assert!(again.has(b"before close").unwrap());
    assert!(again.has(b"after reload").unwrap());
}

#[test]
fn test_remote_shared_state() {
    let store = MemoryListStore::new();
    let mut a = RemoteBloomFilter::new(store.clone(), 8192, 4).unwrap();
    let mut b = RemoteBloomFilter::new(store.clone(), 8192, 4).unwrap();

    a.put_str("from a").unwrap();
    b.put_str("from b").unwrap();

    assert!(b.has_str("from a").unwrap());
    assert!(a.has_str("from b").unwrap());
}

#[test]
fn test_remote_distinct_params_do_not_collide() {
    let store = MemoryListStore::new();
    let mut a = RemoteBloomFilter::new(store.clone(), 8192, 4).unwrap();
    let b = RemoteBloomFilter::new(store.clone(), 8192, 5).unwrap();

    a.put_str("only in a").unwrap();
    assert_ne!(a.key(), b.key());
    assert!(!b.has_str("only in a").unwrap());
}

#[test]
fn test_remote_reset_on_length_mismatch() {
    let store = MemoryListStore::new();
    let key = redis_key(4096, 3);

    let mut filter = RemoteBloomFilter::new(store.clone(), 4096, 3).unwrap();
    filter.put_str("doomed").unwrap();
    assert!(filter.has_str("doomed").unwrap());
    filter.close().unwrap();

    // Something else grew the list under the same key
    store.push_unset(&key, 10).unwrap();
    assert_eq!(store.len(&key).unwrap(), 4106);

    let filter = RemoteBloomFilter::new(store.clone(), 4096, 3).unwrap();
    assert_eq!(store.len(&key).unwrap(), 4096);
    assert_eq!(store.count_set(&key), 0);
    assert!(!filter.has_str("doomed").unwrap());
}

#[test]
fn test_remote_different_n_starts_empty() {
    let store = MemoryListStore::new();

    let mut old = RemoteBloomFilter::new(store.clone(), 4096, 3).unwrap();
    old.put_str("old").unwrap();

    let new = RemoteBloomFilter::new(store.clone(), 2048, 3).unwrap();
    assert_eq!(store.count_set(new.key()), 0);
    assert!(!new.has_str("old").unwrap());
}

#[test]
fn test_backends_as_trait_objects() {
    let dir = TempDir::new().unwrap();

    let mut filters: Vec<Box<dyn BloomFilter>> = vec![
        Box::new(MemoryBloomFilter::new(1 << 14, 3).unwrap()),
        Box::new(FileBloomFilter::new(dir.path().join("boxed.bloom"), 1 << 14, 3).unwrap()),
        Box::new(RemoteBloomFilter::new(MemoryListStore::new(), 1 << 14, 3).unwrap()),
    ];

    for filter in filters.iter_mut() {
        filter.put_str("shared key").unwrap();
        assert!(filter.has_str("shared key").unwrap());
        assert_eq!(filter.num_bits(), 1 << 14);
        assert_eq!(filter.num_hashes(), 3);

        filter.close().unwrap();
        assert!(matches!(filter.has_str("shared key"), Err(Error::Closed)));
    }

    assert!(dir.path().join("boxed.bloom").exists());
}

#[test]
fn test_memory_and_remote_agree() {
    // Same hash family, so both backends set the same bit positions
    let store = MemoryListStore::new();
    let mut memory = MemoryBloomFilter::new(2048, 3).unwrap();
    let mut remote = RemoteBloomFilter::new(store.clone(), 2048, 3).unwrap();

    let mut rng = rand::rng();
    for _ in 0..100 {
        let key: [u8; 8] = rng.random();
        memory.put(&key).unwrap();
        remote.put(&key).unwrap();
    }

    assert_eq!(memory.bits_set().unwrap(), store.count_set(remote.key()));
    for i in 0..1000 {
        let probe = format!("probe{}", i);
        assert_eq!(memory.has_str(&probe).unwrap(), remote.has_str(&probe).unwrap());
    }
}

proptest! {
    #[test]
    fn prop_no_false_negatives(
        num_bits in 1u64..4096,
        num_hashes in 1u32..8,
        items in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..50),
    ) {
        let mut memory = MemoryBloomFilter::new(num_bits, num_hashes).unwrap();
        let mut remote = RemoteBloomFilter::new(MemoryListStore::new(), num_bits, num_hashes).unwrap();

        for item in &items {
            memory.put(item).unwrap();
            remote.put(item).unwrap();
        }

        for item in &items {
            prop_assert!(memory.has(item).unwrap());
            prop_assert!(remote.has(item).unwrap());
        }
    }
}
