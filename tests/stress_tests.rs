//! Stress tests for concurrent use of a single logger
//!
//! These tests verify:
//! - Concurrent emission never produces torn or interleaved lines
//! - Level changes racing with emission are observed atomically
//! - MDC mutation racing with emission yields consistent snapshots
//! - The config watcher can update the level while other threads log

use mdc_logger::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 500;

fn shared_logger(level: Level) -> (Arc<Logger>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Arc::new(
        Logger::builder()
            .name("stress")
            .level(level)
            .sink(sink.clone())
            .build(),
    );
    (logger, sink)
}

/// Every line written concurrently is a complete record
#[test]
fn test_concurrent_emission_lines_are_whole() {
    let (logger, sink) = shared_logger(Level::Debug);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.info(format!("thread {} message {} \"quoted\"\n", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);
    for line in &lines {
        LogRecord::from_json(line).expect("torn or invalid line");
    }
    assert_eq!(
        logger.metrics().total_written(),
        (THREADS * MESSAGES_PER_THREAD) as u64
    );
}

/// A record is either filtered or written with the level it was logged at
#[test]
fn test_level_changes_during_emission() {
    let (logger, sink) = shared_logger(Level::Error);
    let running = Arc::new(AtomicBool::new(true));

    let toggler = {
        let logger = Arc::clone(&logger);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut i = 0usize;
            while running.load(Ordering::Relaxed) {
                logger.set_level(Level::ALL[i % Level::ALL.len()]);
                i += 1;
            }
        })
    };

    let emitters: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.log(Level::ALL[i % Level::ALL.len()], "racing");
                }
            })
        })
        .collect();

    for handle in emitters {
        handle.join().expect("logging thread panicked");
    }
    running.store(false, Ordering::Relaxed);
    toggler.join().expect("toggler panicked");

    let written = sink.len() as u64;
    let filtered = logger.metrics().filtered_count();
    assert_eq!(written + filtered, (THREADS * MESSAGES_PER_THREAD) as u64);
    for record in sink.records() {
        assert_eq!(record.msg, "racing");
    }
}

/// Snapshots reflect a state the MDC actually had
#[test]
fn test_mdc_mutation_during_emission() {
    let (logger, sink) = shared_logger(Level::Debug);
    let running = Arc::new(AtomicBool::new(true));

    // The mutator keeps "a" and "b" equal except between its two adds;
    // a snapshot therefore holds (n, n) or (n+1, n), never anything else.
    let mutator = {
        let logger = Arc::clone(&logger);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut n = 0u64;
            while running.load(Ordering::Relaxed) {
                n += 1;
                logger.add_mdc("a", n.to_string());
                logger.add_mdc("b", n.to_string());
                if n % 100 == 0 {
                    logger.clean_mdc();
                }
            }
        })
    };

    let emitters: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..MESSAGES_PER_THREAD {
                    logger.debug("snapshot");
                }
            })
        })
        .collect();

    for handle in emitters {
        handle.join().expect("logging thread panicked");
    }
    running.store(false, Ordering::Relaxed);
    mutator.join().expect("mutator panicked");

    for record in sink.records() {
        let a: Option<u64> = record.mdc.get("a").map(|v| v.parse().unwrap());
        let b: Option<u64> = record.mdc.get("b").map(|v| v.parse().unwrap());
        match (a, b) {
            (Some(a), Some(b)) => assert!(a == b || a == b + 1, "torn snapshot {} {}", a, b),
            (Some(_), None) | (None, None) => {}
            (None, Some(b)) => panic!("b={} present without a", b),
        }
    }
}

/// The watcher reloads while other threads keep logging
#[test]
fn test_watcher_updates_while_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("log");
    fs::write(&config_file, "log-level: error\n").expect("Failed to write config");

    let sink = Arc::new(MemorySink::new());
    let logger = Arc::new(
        Logger::builder()
            .name("watched")
            .sink(sink.clone())
            .watch_file(&config_file)
            .build(),
    );
    logger
        .register_config_watch()
        .expect("Failed to start config watch");

    let running = Arc::new(AtomicBool::new(true));
    let emitters: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                while running.load(Ordering::Relaxed) {
                    logger.debug("debug while watching");
                    thread::sleep(Duration::from_millis(1));
                }
            })
        })
        .collect();

    fs::write(&config_file, "log-level: debug\n").expect("Failed to write config");

    let mut reloaded = false;
    for _ in 0..250 {
        if logger.get_level() == Level::Debug {
            reloaded = true;
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }

    // Give emitters a moment at the new level
    thread::sleep(Duration::from_millis(50));
    running.store(false, Ordering::Relaxed);
    for handle in emitters {
        handle.join().expect("logging thread panicked");
    }

    assert!(reloaded, "watcher did not apply the new level");
    assert!(!sink.is_empty());
    assert!(logger.metrics().config_reloads() >= 2);
}
