//! Basic logger usage example
//!
//! Demonstrates the standard layout, per-module loggers, error keyvals and
//! JSON output.
//!
//! Run with: cargo run --example basic_usage

use structlog::prelude::*;
use structlog::{info, warn};

fn open_config(path: &str) -> std::result::Result<String, WrappedError> {
    std::fs::read_to_string(path).with_keyvals(keyvals!["path", path])
}

fn main() -> Result<()> {
    // Configure the application logger before deriving module loggers
    let app = Logger::standard(vec![]).set_output(ConsoleAppender::new());
    let level = app.parse_level(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".into()));
    app.set_log_level(level);

    let db = app.derive(keyvals!["_u", "db"]);
    let http = app.derive(keyvals!["_u", "http"]);

    println!("1. Logging at different levels:");
    db.debug("connecting", keyvals!["host", "localhost", "port", 5432]);
    db.info("connected", vec![]);
    http.warn("slow request", keyvals!["path", "/api/users", "took_ms", 950]);
    info!(http, "request served", "status", 200);

    println!("\n2. Errors carry their own keyvals:");
    if let Err(err) = open_config("/nonexistent/app.toml") {
        app.print_err("failed to load config", keyvals!["err", err]);
    }

    println!("\n3. Misuse is reported, not fatal:");
    warn!(app, "odd keyvals", "dangling");

    println!("\n4. JSON output:");
    let json = Logger::zero(vec![])
        .set_log_format(OutputFormat::Json)
        .set_output(ConsoleAppender::plain().with_target(structlog::ConsoleTarget::Stdout))
        .set_default_keyvals(keyvals!["service", "billing"])
        .set_prefix_keys(["service"]);
    json.info("invoice sent", keyvals!["id", 1042, "amount", 19.99]);

    app.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
