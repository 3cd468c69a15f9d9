//! Env-gated tracing subscriber: `ARKGEN_LOG` (falling back to `RUST_LOG`)
//! picks the filter, `ARKGEN_LOG_FORMAT=json` switches to JSON events.
//! Everything goes to stderr.

use std::env;
use std::io;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs nothing unless one of the log variables is set.
pub fn init_tracing() {
    let filter = match (env::var("ARKGEN_LOG"), env::var("RUST_LOG")) {
        (Ok(directives), _) => EnvFilter::builder().parse_lossy(directives),
        (Err(_), Ok(_)) => EnvFilter::from_default_env(),
        _ => return,
    };
    let json = env::var("ARKGEN_LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let layer = fmt::layer().with_writer(io::stderr);
    if json {
        tracing_subscriber::registry().with(filter).with(layer.json()).init();
    } else {
        tracing_subscriber::registry().with(filter).with(layer).init();
    }
}
