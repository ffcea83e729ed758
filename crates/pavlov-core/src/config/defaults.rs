// Single source of truth for all default values.

// --- Causal ---
pub const DEFAULT_INDEPENDENCE_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_ORIENT_UNCONDITIONED_PAIRS: bool = false;
pub const DEFAULT_TEMPORAL_TIERS: bool = true;
pub const DEFAULT_DENSE_TABLES: bool = false;
pub const DEFAULT_EXPLORE_STEPS: usize = 40;
pub const DEFAULT_REBUILD_INTERVAL: usize = 100;

// --- Operant ---
pub const DEFAULT_MEMORY_DEPTH: usize = 8;
pub const DEFAULT_MAX_CONJUNCTION_TERMS: usize = 3;
pub const DEFAULT_MAX_CONJUNCTIONS: usize = 2_000;
pub const DEFAULT_DEMERIT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_SUBSUMPTION_TOLERANCE: f64 = 0.05;
pub const DEFAULT_SUBSUMPTION_MIN_TRIALS: u64 = 20;
pub const DEFAULT_FUTURE_TERMS: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
