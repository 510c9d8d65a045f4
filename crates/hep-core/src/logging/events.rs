//! Structured event vocabulary for logging.
//!
//! Every event emitted through [`log_event!`](crate::log_event) carries the
//! run id, the seed and the pipeline stage.

use hep_common::RunId;
use serde::Serialize;

/// Pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration.
    Init,
    /// Monte Carlo event generation.
    Generate,
    /// Track reconstruction.
    Reconstruct,
    /// Statistical comparison against a reference.
    Compare,
    /// Result output.
    Report,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Generate => "generate",
            Stage::Reconstruct => "reconstruct",
            Stage::Compare => "compare",
            Stage::Report => "report",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    // Generate stage
    pub const GENERATE_STARTED: &str = "generate.started";
    pub const GENERATE_EVENT: &str = "generate.event";
    pub const GENERATE_FINISHED: &str = "generate.finished";
    pub const SAMPLING_EXHAUSTED: &str = "sampling.exhausted";

    // Reconstruct stage
    pub const TRACKS_BUILT: &str = "tracks.built";

    // Compare stage
    pub const COMPARE_STARTED: &str = "compare.started";
    pub const COMPARE_RESULT: &str = "compare.result";

    // Config/init events
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";
    pub const CONFIG_ERROR: &str = "config.error";
}

/// Correlation data shared by all events of one run.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
    pub seed: Option<u64>,
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(RunId::new().to_string())
    }
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_seed() {
        let ctx = LogContext::new("run-abc").with_seed(Some(42));
        assert_eq!(ctx.run_id, "run-abc");
        assert_eq!(ctx.seed, Some(42));

        let reseeded = ctx.clone().with_seed(Some(7));
        assert_eq!(reseeded.run_id, ctx.run_id);
        assert_eq!(reseeded.seed, Some(7));
    }

    #[test]
    fn test_default_context_has_run_id() {
        let ctx = LogContext::default();
        assert!(RunId::parse(&ctx.run_id).is_some());
        assert_eq!(ctx.seed, None);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Generate.to_string(), "generate");
        assert_eq!(Stage::Reconstruct.to_string(), "reconstruct");
        assert_eq!(
            serde_json::to_string(&Stage::Compare).unwrap(),
            "\"compare\""
        );
    }

    #[test]
    fn test_event_names() {
        assert_eq!(event_names::RUN_STARTED, "run.started");
        assert_eq!(event_names::CONFIG_DEFAULT_USED, "config.default_used");
        assert_eq!(event_names::TRACKS_BUILT, "tracks.built");
        assert_eq!(event_names::COMPARE_RESULT, "compare.result");
    }
}
