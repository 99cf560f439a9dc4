//! Concurrent access tests.
//!
//! Readers run concurrently with each other; writers are exclusive. The
//! assertions here are about consistency, not timing: no panic, no torn
//! record, every committed write visible afterwards.

use latticedb::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

const WRITERS: usize = 4;
const READERS: usize = 4;
const OPS_PER_WRITER: usize = 50;

#[test]
fn test_concurrent_writers_and_searchers() {
    let db = Lattice::new();
    let barrier = Arc::new(Barrier::new(WRITERS + READERS));
    let mut handles = Vec::new();

    for w in 0..WRITERS {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..OPS_PER_WRITER {
                let id = format!("w{}-{}", w, i);
                db.add_vector(&id, vec![w as f32, i as f32], None).unwrap();
                if i % 5 == 0 {
                    // Overwrite an earlier record and delete another
                    db.add_vector(&format!("w{}-0", w), vec![w as f32, -1.0], None)
                        .unwrap();
                    db.delete_vector(&format!("w{}-{}", w, i / 2)).unwrap();
                }
            }
        }));
    }

    for _ in 0..READERS {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..OPS_PER_WRITER {
                let matches = db.search(&[1.0, 1.0], 5).unwrap();
                // A search result is a consistent snapshot: at most k,
                // sorted ascending, and every match has a full record.
                assert!(matches.len() <= 5);
                for pair in matches.windows(2) {
                    assert!(pair[0].score <= pair[1].score);
                }
                let _ = db.list_vectors().unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    // Every writer's last record was committed and is now visible.
    for w in 0..WRITERS {
        let id = format!("w{}-{}", w, OPS_PER_WRITER - 1);
        let record = db.get_vector(&id).unwrap();
        assert_eq!(record.vector, vec![w as f32, (OPS_PER_WRITER - 1) as f32]);
    }
}

#[test]
fn test_concurrent_upserts_to_same_id() {
    let db = Lattice::new();
    let barrier = Arc::new(Barrier::new(WRITERS));
    let mut handles = Vec::new();

    for w in 0..WRITERS {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..OPS_PER_WRITER {
                db.add_vector("contested", vec![w as f32, w as f32], None)
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    // Upserts are atomic per id: one record, both elements from the same
    // writer, never a blend.
    let records = db.list_vectors().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.vector[0], record.vector[1]);
}

#[test]
fn test_concurrent_collection_churn() {
    let db = Lattice::new();
    let barrier = Arc::new(Barrier::new(3));
    let mut handles = Vec::new();

    {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..OPS_PER_WRITER {
                db.router()
                    .add_vector(Some("churn"), &format!("r{}", i), vec![i as f32], None)
                    .unwrap();
            }
        }));
    }
    {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..OPS_PER_WRITER {
                // Dropping while another thread inserts must never tear;
                // either outcome is fine.
                let _ = db.drop_collection("churn").unwrap();
            }
        }));
    }
    {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..OPS_PER_WRITER {
                let _ = db
                    .router()
                    .search_vectors(Some("churn"), &[1.0], 3)
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}
