//! Probability tables and the independence tests built on them.

mod independence;
mod table;

pub use independence::{are_conditionally_independent, are_independent};
pub use table::{cross_product, ProbabilityTable};
