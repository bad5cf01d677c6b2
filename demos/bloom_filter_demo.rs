//! Demo of the three BloomStore backends
//!
//! Run with `RUST_LOG=debug cargo run --example bloom_filter_demo` to see
//! snapshot and remote-list logging.

use anyhow::Context;
use bloomstore::{
    BloomFilter, FileBloomFilter, MemoryBloomFilter, MemoryListStore, Options, RemoteBloomFilter,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== BloomStore Demo ===\n");

    demo_memory_filter()?;
    demo_file_filter()?;
    demo_remote_filter()?;

    Ok(())
}

/// Demo 1: sizing and using an in-memory filter
fn demo_memory_filter() -> anyhow::Result<()> {
    println!("--- Demo 1: Memory Bloom Filter ---");

    // Size for 1000 keys at a 1% false positive rate
    let options = Options::for_capacity(1000, 0.01);
    let mut filter = MemoryBloomFilter::with_options(&options)?;

    let keys = ["user:1001", "user:1002", "user:1003", "user:1004", "user:1005"];
    for key in &keys {
        filter.put_str(key)?;
    }

    println!("Bits: {}, hash functions: {}", filter.num_bits(), filter.num_hashes());
    println!("Bits set after {} inserts: {}", keys.len(), filter.bits_set()?);

    for key in &keys {
        println!("  {} exists? {}", key, filter.has_str(key)?);
    }
    for key in &["user:9001", "user:9002"] {
        println!("  {} exists? {} (should be false)", key, filter.has_str(key)?);
    }

    filter.close()?;
    println!();
    Ok(())
}

/// Demo 2: snapshot to disk and reload
fn demo_file_filter() -> anyhow::Result<()> {
    println!("--- Demo 2: File Bloom Filter ---");

    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("demo.bloom");

    let mut filter = FileBloomFilter::new(&path, 64 << 20, 5)?;
    for i in 0..50_000 {
        filter.put_str(&format!("r{}", i))?;
    }
    filter.close().context("storing snapshot")?;

    let size = std::fs::metadata(&path)?.len();
    println!("Snapshot of {} raw bytes stored in {} bytes", (64u64 << 20) / 8, size);

    let reloaded = FileBloomFilter::reload(&path).context("reloading snapshot")?;
    println!("Reloaded k = {}", reloaded.num_hashes());
    println!("  r42 exists? {}", reloaded.has_str("r42")?);
    println!("  rr42 exists? {} (should be false)", reloaded.has_str("rr42")?);

    println!();
    Ok(())
}

/// Demo 3: two filters sharing one remote list
fn demo_remote_filter() -> anyhow::Result<()> {
    println!("--- Demo 3: Remote Bloom Filter ---");

    let store = MemoryListStore::new();
    let mut writer = RemoteBloomFilter::new(store.clone(), 1 << 16, 5)?;
    let reader = RemoteBloomFilter::new(store, 1 << 16, 5)?;

    writer.put_str("shared:item")?;
    println!("List key: {}", reader.key());
    println!("  shared:item seen by second filter? {}", reader.has_str("shared:item")?);

    println!();
    Ok(())
}
