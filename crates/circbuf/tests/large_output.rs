// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Large output tests: integrity, wrap-around, and externally synchronized use.

use std::sync::{Arc, Mutex};
use std::thread;

use circbuf::RingBuffer;

fn collect_from(ring: &RingBuffer, offset: u64) -> anyhow::Result<Vec<u8>> {
    let (a, b) =
        ring.read_from(offset).ok_or_else(|| anyhow::anyhow!("no data at offset {offset}"))?;
    let mut data = a.to_vec();
    data.extend_from_slice(b);
    Ok(data)
}

#[test]
fn large_output_integrity() -> anyhow::Result<()> {
    let capacity = 1_048_576; // 1MB
    let mut ring = RingBuffer::new(capacity)?;

    // Write 128KB of known-pattern data
    let pattern: Vec<u8> = (0..128 * 1024).map(|i| (i % 256) as u8).collect();
    ring.write(&pattern);

    assert_eq!(ring.total_written(), pattern.len() as u64);
    assert_eq!(collect_from(&ring, 0)?, pattern);
    assert_eq!(ring.snapshot(), pattern);
    Ok(())
}

#[test]
fn wrap_preserves_recent() -> anyhow::Result<()> {
    let capacity = 1_048_576; // 1MB
    let mut ring = RingBuffer::new(capacity)?;

    // Write 2MB; the oldest 1MB is overwritten
    ring.write(&vec![0xAA; capacity]);
    ring.write(&vec![0xBB; capacity]);

    assert_eq!(ring.total_written(), 2 * capacity as u64);
    assert!(ring.read_from(0).is_none(), "offset 0 should be overwritten");

    let data = collect_from(&ring, capacity as u64)?;
    assert_eq!(data.len(), capacity);
    assert!(data.iter().all(|&b| b == 0xBB), "expected only block2 bytes");
    Ok(())
}

#[test]
fn unaligned_chunks_keep_last_capacity_bytes() -> anyhow::Result<()> {
    let capacity = 4099;
    let mut ring = RingBuffer::new(capacity)?;
    let mut all = Vec::new();

    for i in 0..200u32 {
        let chunk: Vec<u8> = (0..(i * 37) % 1500).map(|j| (i ^ j) as u8).collect();
        ring.write(&chunk);
        all.extend_from_slice(&chunk);
    }

    assert_eq!(ring.total_written(), all.len() as u64);
    assert_eq!(ring.snapshot(), &all[all.len() - capacity..]);
    for i in (0..capacity).step_by(97) {
        assert_eq!(ring.get(i)?, all[all.len() - capacity + i]);
    }
    Ok(())
}

#[test]
fn mutex_serialized_writers_and_readers() -> anyhow::Result<()> {
    let ring = Arc::new(Mutex::new(RingBuffer::new(64 * 1024)?));

    let writer = {
        let ring = Arc::clone(&ring);
        thread::spawn(move || {
            let chunk = vec![0x42u8; 1024];
            for _ in 0..100 {
                if let Ok(mut ring) = ring.lock() {
                    ring.write(&chunk);
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let ring = Arc::clone(&ring);
            thread::spawn(move || {
                for _ in 0..50 {
                    if let Ok(ring) = ring.lock() {
                        let total = ring.total_written();
                        let tail = ring.read_from(total.saturating_sub(1024));
                        assert!(tail.is_some() || total == 0);
                    }
                }
            })
        })
        .collect();

    writer.join().map_err(|_| anyhow::anyhow!("writer panicked"))?;
    for reader in readers {
        reader.join().map_err(|_| anyhow::anyhow!("reader panicked"))?;
    }

    let ring = ring.lock().map_err(|_| anyhow::anyhow!("poisoned"))?;
    assert_eq!(ring.total_written(), 100 * 1024);
    assert_eq!(ring.len(), 64 * 1024);
    Ok(())
}
