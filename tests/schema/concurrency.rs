//! Shared schemas under concurrency
//!
//! One schema instance serves many concurrent decode and validation calls
//! and is built exactly once.

use crate::common::*;
use plugframe::SchemaCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

static FIREWALL: SchemaCell = SchemaCell::new();
static BUILDS: AtomicUsize = AtomicUsize::new(0);

fn shared_schema() -> Arc<Schema> {
    FIREWALL
        .get_or_try_init(|| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            Ok(firewall_schema())
        })
        .unwrap()
}

#[test]
fn concurrent_requests_share_one_schema() {
    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let schema = shared_schema();
                let wire = firewall(
                    WireValue::string(format!("fw-{}", t)),
                    vec![],
                    vec![rule(num(&t.to_string()), num(&format!("{}.5", t)))],
                );
                let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
                assert!(decoded.diagnostics.is_empty());
                assert_eq!(decoded.value.to_wire(), wire);
                assert!(validate(&schema, &wire, &DecodeConfig::default()).is_empty());
                schema
            })
        })
        .collect();

    let schemas: Vec<Arc<Schema>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    assert!(schemas.iter().all(|s| Arc::ptr_eq(s, &schemas[0])));
}

#[test]
fn diagnostics_do_not_leak_between_calls() {
    let schema = shared_schema();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let schema = schema.clone();
            thread::spawn(move || {
                let port = if t % 2 == 0 { num("1") } else { num("1.5") };
                let wire = firewall(WireValue::string("fw"), vec![], vec![rule(port, null_num())]);
                validate(&schema, &wire, &DecodeConfig::default()).len()
            })
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![0, 1, 0, 1]);
}
