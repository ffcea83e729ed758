/// Pavlov version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Suffix naming the previous-step copy of a variable in the lagged causal schema.
pub const PREVIOUS_STEP_SUFFIX: &str = "@t-1";

/// Suffix naming the current-step copy of a sensory variable in the lagged causal schema.
pub const CURRENT_STEP_SUFFIX: &str = "@t";

/// Merit values closer than this are treated as tied.
pub const MERIT_TIE_EPSILON: f64 = 1e-9;

/// Upper bound on events retained by an in-memory event log.
pub const MAX_EVENT_LOG_ENTRIES: usize = 100_000;
