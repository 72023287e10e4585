//! Logging configuration read from `FORMWORK_*` environment variables.

use crate::{Format, Level};
use std::env;

/// Environment variable that switches debug output on.
pub const ENV_DEBUG: &str = "FORMWORK_DEBUG";
/// Environment variable holding the minimum level.
pub const ENV_LEVEL: &str = "FORMWORK_LOG_LEVEL";
/// Environment variable holding the output format.
pub const ENV_FORMAT: &str = "FORMWORK_LOG_FORMAT";
pub const ENV_COLOR: &str = "FORMWORK_LOG_COLOR";
pub const ENV_TIMESTAMPS: &str = "FORMWORK_LOG_TIMESTAMPS";
pub const ENV_MODULE: &str = "FORMWORK_LOG_MODULE";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum level written
    pub level: Level,
    pub format: Format,
    /// Colors in pretty output
    pub color: bool,
    pub timestamps: bool,
    /// Whether the record target (module path) is printed
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Compact,
            color: false,
            timestamps: true,
            module_path: true,
        }
    }
}

impl LogConfig {
    /// Build the configuration from the process environment.
    ///
    /// Unset or unparseable variables keep their defaults. `FORMWORK_DEBUG`
    /// without a level lowers the level to `debug`; with a level, debug
    /// records are still written.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let debug = flag(ENV_DEBUG, false);
        let level = lookup(ENV_LEVEL)
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });
        let format = lookup(ENV_FORMAT)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);
        let color_default = lookup("NO_COLOR").is_none() && lookup("TERM").is_some();

        Self {
            debug,
            level,
            format,
            color: flag(ENV_COLOR, color_default),
            timestamps: flag(ENV_TIMESTAMPS, defaults.timestamps),
            module_path: flag(ENV_MODULE, defaults.module_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert!(!config.debug);
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.format, Format::Compact);
        assert!(!config.color);
    }

    #[test]
    fn test_debug_flag_lowers_level() {
        let config = LogConfig::from_lookup(lookup(&[(ENV_DEBUG, "true")]));
        assert!(config.debug);
        assert_eq!(config.level, Level::Debug);
    }

    #[test]
    fn test_explicit_level_wins_over_debug() {
        let config = LogConfig::from_lookup(lookup(&[(ENV_DEBUG, "1"), (ENV_LEVEL, "trace")]));
        assert_eq!(config.level, Level::Trace);
    }

    #[test]
    fn test_debug_flag_kept_with_higher_level() {
        let config = LogConfig::from_lookup(lookup(&[(ENV_DEBUG, "1"), (ENV_LEVEL, "info")]));
        assert!(config.debug);
        assert_eq!(config.level, Level::Info);
    }

    #[test]
    fn test_format_and_flags() {
        let config = LogConfig::from_lookup(lookup(&[
            (ENV_FORMAT, "json"),
            (ENV_TIMESTAMPS, "0"),
            (ENV_MODULE, "false"),
            ("TERM", "xterm"),
        ]));
        assert_eq!(config.format, Format::Json);
        assert!(!config.timestamps);
        assert!(!config.module_path);
        assert!(config.color);
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let config = LogConfig::from_lookup(lookup(&[(ENV_LEVEL, "loud"), (ENV_FORMAT, "xml")]));
        assert_eq!(config, LogConfig::default());
    }
}
