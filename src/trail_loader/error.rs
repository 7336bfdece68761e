use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for loading trail descriptions.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Error when reading a file.
    #[error("Failed to read file '{0}': {1}")]
    ReadFile(String, std::io::Error),

    /// Error when a line of the description cannot be understood.
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error when the description holds no mountains at all.
    #[error("No mountains found in trail description '{0}'")]
    EmptyTrail(String),
}

impl LoaderError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        LoaderError::Parse {
            line,
            message: message.into(),
        }
    }
}
