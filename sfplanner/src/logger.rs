// sfplanner/src/logger.rs
//! Logger setup for the `sfplanner` binary.
//!
//! Logs go to stderr through `env_logger`. `RUST_LOG` is honoured unless an
//! explicit level is passed, in which case that level applies to every
//! target.

use log::LevelFilter;
use std::io::Write;

/// Initializes the global logger. Safe to call more than once; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    let _ = builder.try_init();
}

/// Maps the `--quiet` and `--debug` flags to a level override.
pub fn level_for_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(level_for_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_for_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_for_flags(false, false), None);
    }
}
