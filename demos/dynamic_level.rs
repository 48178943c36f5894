//! Dynamic log level example
//!
//! Watches a config file and follows `log-level:` changes without a restart.
//!
//! Run with: cargo run --example dynamic_level

use mdc_logger::prelude::*;
use std::fs;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== MDC Logger - Dynamic Level Example ===\n");

    let config_dir = std::env::temp_dir().join("mdc-logger-demo");
    fs::create_dir_all(&config_dir)?;
    let config_file = config_dir.join("log-level");
    fs::write(&config_file, "log-level: error\n")?;

    let logger = Logger::builder()
        .name("dynamic-level")
        .watch_file(&config_file)
        .build();
    logger.register_config_watch()?;

    println!("1. Level from file: {}", logger.get_level());
    logger.info("Hidden at ERROR");

    fs::write(&config_file, "log-level: info\n")?;
    for _ in 0..50 {
        if logger.get_level() == Level::Info {
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }

    println!("2. Level after editing the file: {}", logger.get_level());
    logger.info("Visible at INFO");

    logger.stop_config_watch();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
