#[derive(Debug, thiserror::Error)]
pub enum FakeFsError {
    #[error("failed to parse glob pattern '{pattern}'")]
    PatternSyntax { pattern: String },

    #[error("not a directory: {0}")]
    NotADirectory(String),
}

impl FakeFsError {
    /// Builds a pattern syntax error carrying the offending substring.
    pub fn pattern_syntax(pattern: impl Into<String>) -> Self {
        Self::PatternSyntax {
            pattern: pattern.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FakeFsError>;
