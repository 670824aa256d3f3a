use chrono::{DateTime, Utc};
use log::{Level, LevelFilter};
use std::fmt;
use std::io::Write;

/// Install the `env_logger` backend on stderr. Later calls only adjust the
/// level.
pub fn init_logger(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .format(|buf, record| {
            let line = log_line(Utc::now(), record.level(), record.target(), record.args());
            writeln!(buf, "{}", line)
        })
        .target(env_logger::Target::Stderr)
        .filter_level(level)
        .try_init();

    log::set_max_level(level);
}

/// `12:04:31.207 WARN  db::operations: message`, with the crate name dropped
/// from the target.
fn log_line(at: DateTime<Utc>, level: Level, target: &str, args: impl fmt::Display) -> String {
    let target = target.strip_prefix("setbook::").unwrap_or(target);
    format!("{} {:<5} {}: {}", at.format("%H:%M:%S%.3f"), level, target, args)
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    let lvl = match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => return None,
    };
    Some(lvl)
}

/// Initialise logging from a level name. Returns `false` for unknown names.
pub fn set_log_level(level: &str) -> bool {
    match parse_level(level) {
        Some(lvl) => {
            init_logger(lvl);
            true
        }
        None => false,
    }
}
