//! Minimal `log` backend writing to stderr.
//!
//! The level comes from `LOG_LEVEL` (`error`, `warn`, `info`, `debug`,
//! `trace`), `info` when unset or unreadable.

use std::env;
use std::io::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record};

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|value| value.trim().parse::<Level>().ok())
        .map(|level| level.to_level_filter())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the logger. Calling it again is a no-op.
pub fn init() {
    let level = parse_level(env::var(LOG_LEVEL_ENV).ok().as_deref());

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_falls_back_to_info() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
        assert_eq!(parse_level(Some("DEBUG")), LevelFilter::Debug);
    }
}
