//! Log setup. Logs go to stderr; stdout carries only bot replies.
//!
//! `RUST_LOG` controls the filter (default `info`). Set
//! `COOKBOT_LOG_FORMAT=json` for one JSON object per line.

use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_ENV: &str = "COOKBOT_LOG_FORMAT";

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // a second init (e.g. in tests) keeps the first subscriber
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("warning: logging already initialized: {e}");
    }
}
