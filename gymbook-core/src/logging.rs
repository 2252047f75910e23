use log::{LevelFilter, Record};
use std::io::{self, Write};

/// One line per record: `LEVEL: target - message`.
fn write_record(out: &mut impl Write, record: &Record) -> io::Result<()> {
    writeln!(out, "{}: {} - {}", record.level(), record.target(), record.args())
}

pub fn init_logger(level: LevelFilter) {
    let installed = env_logger::Builder::new()
        .format(|buf, record| write_record(buf, record))
        .target(env_logger::Target::Stdout)
        .filter_level(level)
        .try_init()
        .is_ok();

    // A second call only moves the global ceiling.
    if !installed {
        log::set_max_level(level);
    }
}

/// Parses a level name ("off", "error", "warn", "info", "debug", "trace").
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

pub fn set_log_level(level: &str) -> bool {
    parse_level(level).map(init_logger).is_some()
}
