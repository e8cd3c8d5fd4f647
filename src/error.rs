use thiserror::Error;

/// Unified error type for semvertag operations
#[derive(Error, Debug)]
pub enum SemvertagError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Unsupported tag target '{kind}'")]
    UnsupportedTarget { kind: String },

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Command `{command}` failed: {output}")]
    Command { command: String, output: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semvertag
pub type Result<T> = std::result::Result<T, SemvertagError>;

impl SemvertagError {
    /// Create a usage error; raised before the repository is touched
    pub fn usage(msg: impl Into<String>) -> Self {
        SemvertagError::Usage(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemvertagError::Config(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        SemvertagError::Repository(msg.into())
    }

    /// Create a version computation error
    pub fn version(msg: impl Into<String>) -> Self {
        SemvertagError::Version(msg.into())
    }

    /// Create an error naming the object kind a tag points at
    pub fn unsupported_target(kind: impl Into<String>) -> Self {
        SemvertagError::UnsupportedTarget { kind: kind.into() }
    }

    /// Create an identity error with context
    pub fn identity(msg: impl Into<String>) -> Self {
        SemvertagError::Identity(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        SemvertagError::Prompt(msg.into())
    }

    /// Create a command error carrying the command line and its output
    pub fn command(command: impl Into<String>, output: impl Into<String>) -> Self {
        SemvertagError::Command {
            command: command.into(),
            output: output.into(),
        }
    }

    /// True for errors that come from bad flag combinations
    pub fn is_usage(&self) -> bool {
        matches!(self, SemvertagError::Usage(_))
    }
}
