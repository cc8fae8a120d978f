// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging setup shared by the AMR collector crates.
//!
//! The level comes from the `AMR_LOG` environment variable:
//! - `off` (default) - nothing is emitted
//! - `error`, `warn`, `info`, `debug` - minimum level written to stderr
//!
//! Crates log through the re-exported macros (`info!`, `debug!`, `warn!`,
//! `error!`) so that they only depend on this crate and `emit`. Values named
//! in a template are passed as properties after it, as in
//! `info!("Loaded {rows} rows", rows)`.

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable selecting the log level
pub const LOG_ENV: &str = "AMR_LOG";

static INIT: Once = Once::new();

/// Result of interpreting an `AMR_LOG` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSetting {
    Off,
    Level(emit::Level),
    /// Unrecognized value, logging falls back to info
    Unknown,
}

/// Interpret an `AMR_LOG` value (case-insensitive)
pub fn parse_setting(value: &str) -> LogSetting {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "off" => LogSetting::Off,
        "debug" => LogSetting::Level(emit::Level::Debug),
        "info" => LogSetting::Level(emit::Level::Info),
        "warn" => LogSetting::Level(emit::Level::Warn),
        "error" => LogSetting::Level(emit::Level::Error),
        _ => LogSetting::Unknown,
    }
}

/// Initialize logging from `AMR_LOG`.
///
/// Call once at startup; later calls are ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let level = match parse_setting(&value) {
            LogSetting::Off => return,
            LogSetting::Level(level) => level,
            LogSetting::Unknown => {
                // Emitter is not running yet, so this one goes straight to stderr
                eprintln!("Warning: Unknown {LOG_ENV} value '{value}', using 'info'");
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // Keep the emitter alive for the rest of the process
        std::mem::forget(rt);
    });
}

/// Log routine operations (syncs, saves, exports)
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (remote calls, row numbers, ranges)
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable problems (fallbacks, stale state, rejected input)
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failed operations
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;
