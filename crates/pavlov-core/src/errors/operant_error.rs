/// Operant engine errors.
#[derive(Debug, thiserror::Error)]
pub enum OperantError {
    #[error("no reinforcer acquired for {predicate}")]
    NoReinforcerFound { predicate: String },

    #[error("memory age {age} exceeds maximum age {max_age}")]
    AgeOutOfRange { age: usize, max_age: usize },
}
