//! Logging for the formwork crates
//!
//! A small stderr logger controlled by `FORMWORK_*` environment variables.
//! The validation crates use it to report schema activation, run outcomes
//! and configuration loading without forcing a logging backend on the host
//! application.
//!
//! # Usage
//!
//! ```rust
//! use formwork_log::{debug, info, trace};
//!
//! debug!("schema created with {} rules", 3);
//! trace!(target: "formwork::runner", "field {} is inactive", "email");
//! info!("locale switched");
//! ```
//!
//! # Environment Variables
//!
//! - `FORMWORK_DEBUG=1` - Enable debug logging
//! - `FORMWORK_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level (default `warn`)
//! - `FORMWORK_LOG_FORMAT=pretty|compact|json` - Output format (default `compact`)
//! - `FORMWORK_LOG_COLOR=1|0` - Colors in pretty output
//! - `FORMWORK_LOG_TIMESTAMPS=1|0`, `FORMWORK_LOG_MODULE=1|0`

mod config;
mod level;
mod output;

pub use config::{
    ENV_COLOR, ENV_DEBUG, ENV_FORMAT, ENV_LEVEL, ENV_MODULE, ENV_TIMESTAMPS, LogConfig,
};
pub use level::{Format, Level};

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);
static LOG_FORMAT: AtomicU8 = AtomicU8::new(Format::Compact as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    LOG_FORMAT.store(config.format as u8, Ordering::SeqCst);
    config
});

/// Read the environment now instead of on the first record.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

#[inline]
pub fn is_debug_enabled() -> bool {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Check if records at `level` are written.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    Lazy::force(&CONFIG);
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    Lazy::force(&CONFIG);
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Override the minimum level at runtime.
pub fn set_level(level: Level) {
    Lazy::force(&CONFIG);
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode at runtime. Enabling it lowers the level to `Debug` if needed.
pub fn set_debug(enabled: bool) {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

/// Override the output format at runtime.
pub fn set_format(format: Format) {
    Lazy::force(&CONFIG);
    LOG_FORMAT.store(format as u8, Ordering::SeqCst);
}

pub fn current_format() -> Format {
    Lazy::force(&CONFIG);
    Format::from_u8(LOG_FORMAT.load(Ordering::Relaxed))
}

/// Check if a record at `level` is written.
///
/// Same as [`is_level_enabled`], except that debug records also pass while
/// debug mode is on, whatever the minimum level.
#[inline]
pub fn is_record_enabled(level: Level) -> bool {
    is_level_enabled(level) || (level == Level::Debug && is_debug_enabled())
}

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_record_enabled(level) {
        return;
    }
    output::write_record(level, target, message, config(), current_format());
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a debug message.
///
/// Written when `FORMWORK_DEBUG=1` or the level is `debug` or lower.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_record_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_record_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, module_path!(), &format!($($arg)+));
        }
    };
}

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber honoring the `FORMWORK_*` level.

    use super::*;

    /// Subscriber filtered at the configured level unless `RUST_LOG` says otherwise.
    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let level = match current_level() {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }
}
