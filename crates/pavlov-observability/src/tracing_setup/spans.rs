//! Span definitions per operation: agent timestep, PC structure learning.

/// Create a span covering one `act()` call.
#[macro_export]
macro_rules! step_span {
    ($time:expr, $learner:expr) => {
        tracing::info_span!("pavlov.step", time = $time, learner = %$learner)
    };
}

/// Create a span covering one PC run over a table of `$variables` variables.
#[macro_export]
macro_rules! pc_span {
    ($variables:expr) => {
        tracing::debug_span!("pavlov.pc", variables = $variables)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const STEP: &str = "pavlov.step";
    pub const PC: &str = "pavlov.pc";
}
