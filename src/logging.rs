// Logging setup
//
// The library logs through the `log` facade; the binary installs
// `env_logger` as the backend. `RUST_LOG` overrides the configured level.

use log::LevelFilter;

/// Install the global logger
///
/// # Returns
/// `false` if a logger was already installed; the existing one is kept
pub fn init(level: LevelFilter) -> bool {
    builder(level).try_init().is_ok()
}

fn builder(level: LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp_millis()
        .parse_default_env();
    builder
}
