//! Structured logging for hep-core.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for scripted pipelines
//!
//! # Usage
//!
//! ```ignore
//! use hep_core::logging::{init_logging, LogConfig, LogContext, Stage, event_names};
//!
//! let config = LogConfig::from_env(None, None);
//! init_logging(&config);
//!
//! let ctx = LogContext::default().with_seed(Some(42));
//! hep_core::log_event!(ctx, INFO, event_names::RUN_STARTED, Stage::Init, "Starting run");
//! ```
//!
//! stdout is reserved for command payloads (event text, JSON results);
//! all log output goes to stderr.

pub mod config;
pub mod events;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use events::{event_names, LogContext, Stage};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging subsystem.
///
/// Call once at startup. A second call leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    // Event names are used as targets, so the filter is a bare level.
    let filter = EnvFilter::new(config.level.to_string());

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = config.color && std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(false)
                .flatten_event(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    if let Err(err) = result {
        tracing::debug!("logging already initialized: {}", err);
    }
}

/// Emit a structured event through `tracing` with the run context attached.
///
/// ```ignore
/// log_event!(ctx, INFO, event_names::GENERATE_STARTED, Stage::Generate, "Generating",
///     events = 1000u64);
/// ```
#[macro_export]
macro_rules! log_event {
    ($ctx:expr, INFO, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::info!(
            target: $event,
            run_id = %$ctx.run_id,
            seed = ?$ctx.seed,
            stage = %$stage,
            message = %$msg,
            $($key = $val,)*
        )
    };
    ($ctx:expr, DEBUG, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::debug!(
            target: $event,
            run_id = %$ctx.run_id,
            seed = ?$ctx.seed,
            stage = %$stage,
            message = %$msg,
            $($key = $val,)*
        )
    };
    ($ctx:expr, WARN, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::warn!(
            target: $event,
            run_id = %$ctx.run_id,
            seed = ?$ctx.seed,
            stage = %$stage,
            message = %$msg,
            $($key = $val,)*
        )
    };
    ($ctx:expr, ERROR, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::error!(
            target: $event,
            run_id = %$ctx.run_id,
            seed = ?$ctx.seed,
            stage = %$stage,
            message = %$msg,
            $($key = $val,)*
        )
    };
}
