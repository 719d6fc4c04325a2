// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Logging configuration ([AMBIENT], SPEC_FULL.md §2), grounded on
//! `conductor-core::logging`'s `LoggingConfig` shape but wired to
//! `tracing-subscriber`'s `EnvFilter` directly instead of a hand-rolled
//! level parser.

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingConfig {
    /// `RUST_LOG`-style filter directive, e.g. `"midiflux_core=debug,info"`.
    pub level: String,
    /// Directory to roll daily log files into; `None` logs to stderr only.
    pub log_dir: Option<String>,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: "info".to_string(), log_dir: None, json: false }
    }
}

/// Installs the global `tracing` subscriber. The returned [`WorkerGuard`]
/// must be held for the process lifetime when `log_dir` is set — dropping
/// it flushes the non-blocking file appender and stops further writes.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "midiflux.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_writer(non_blocking);
            if config.json {
                subscriber.json().init();
            } else {
                subscriber.init();
            }
            Some(guard)
        }
        None => {
            let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
            if config.json {
                subscriber.json().init();
            } else {
                subscriber.init();
            }
            None
        }
    }
}
