//! File logging example
//!
//! Demonstrates writing newline-delimited JSON records to a file.
//!
//! Run with: cargo run --example file_logging

use mdc_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== MDC Logger - File Logging Example ===\n");

    let logger = Logger::builder()
        .name("file-logging")
        .level(Level::Info)
        .sink(Arc::new(FileSink::new("application.jsonl")?))
        .build();

    logger.add_mdc("SERVICE_NAME", "demo");
    logger.info("Application started");
    logger.debug("Loading configuration... (filtered)");
    logger.warning("Using default settings for some options");

    for i in 1..=5 {
        logger.add_mdc("item", i.to_string());
        logger.info(format!("Processing item {}/5", i));
    }
    logger.remove_mdc("item");

    logger.error("Failed to load optional plugin");

    println!("Records written: {}", logger.metrics().total_written());
    println!("Records filtered: {}", logger.metrics().filtered_count());
    println!("\nCheck 'application.jsonl' for the output");

    Ok(())
}
