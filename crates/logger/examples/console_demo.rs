//! Prints accepted events and info-level messages to the console.
//!
//! Run with `cargo run -p logger --example console_demo`. Set `LOG_LEVEL` to
//! change which events reach the global console handler.

use logger::{LogEvent, Logger, Severity};

fn main() {
    let logger = match Logger::from_env() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("console_demo: {err}");
            std::process::exit(1);
        }
    };

    logger.subscribe(|event: &LogEvent| println!("{}", event.message()));
    logger.add_level_handler(Severity::Info, |message| println!("INFO: {message}"));

    logger.log(Severity::Debug, "Hello from DEBUG!");
    logger.log(Severity::Info, "Hello from INFO!");
    logger.log(Severity::Trace, "Hello from TRACE!");
}
