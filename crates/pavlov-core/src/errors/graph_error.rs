/// Dependency graph errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("no such node: {name}")]
    NoSuchNode { name: String },

    #[error("no edge between {from} and {to}")]
    NoSuchEdge { from: String, to: String },

    #[error("node already present: {name}")]
    DuplicateNode { name: String },
}
