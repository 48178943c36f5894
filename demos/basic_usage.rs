//! Basic logger usage example
//!
//! Demonstrates levels, the MDC and the root logger, writing JSON to stdout.
//!
//! Run with: cargo run --example basic_usage

use mdc_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== MDC Logger - Basic Usage Example ===\n");

    // New loggers start at ERROR
    let logger = Logger::named("basic-usage");

    println!("1. Default level (ERROR) - only the error line shows:");
    logger.debug("This is a debug message (hidden)");
    logger.info("This is an info message (hidden)");
    logger.warning("This is a warning message (hidden)");
    logger.error("This is an error message");

    println!("\n2. Level lowered to DEBUG, with context:");
    logger.set_level(Level::Debug);
    logger.init_context(false);
    logger.add_mdc("request_id", "abc-123");
    logger.debug("This is a debug message");
    logger.info("Message with \"quotes\", a \\ and a\nnewline");

    println!("\n3. Root logger:");
    mdc_logger::set_level(Level::Info);
    mdc_logger::add_mdc("component", "root");
    mdc_logger::info("Logged through the module-level API");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
