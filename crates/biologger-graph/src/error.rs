/// Errors raised for invalid graph configuration.
///
/// Data conditions (missing values, empty viewports, degenerate domains) are
/// never errors; they degrade to empty or neutral output instead.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Viewport name not present in the viewport table.
    UnknownViewport(String),

    /// A variable definition violates its invariants.
    InvalidVariable { id: String, reason: String },

    /// Two variables with the same id were added to a library.
    DuplicateVariable(String),

    /// Serialized library or history could not be parsed.
    Parse(String),
}

impl GraphError {
    pub(crate) fn invalid_variable(id: &str, reason: impl Into<String>) -> Self {
        GraphError::InvalidVariable {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::UnknownViewport(name) => write!(f, "Unknown viewport: {}", name),
            GraphError::InvalidVariable { id, reason } => {
                write!(f, "Invalid variable '{}': {}", id, reason)
            }
            GraphError::DuplicateVariable(id) => write!(f, "Duplicate variable id: {}", id),
            GraphError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for GraphError {}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Parse(err.to_string())
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
