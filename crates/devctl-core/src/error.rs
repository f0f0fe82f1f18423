use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevError {
    #[error("container engine '{0}' not found on PATH")]
    EngineNotFound(String),

    #[error("container engine '{engine}' is not reachable: {detail}")]
    EngineUnreachable { engine: String, detail: String },

    #[error("command failed{}: {command}", .code.map(|c| format!(" (exit {c})")).unwrap_or_default())]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("auth service request failed: {0}")]
    AuthRequest(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl DevError {
    /// Exit code of the external tool behind a `CommandFailed`, if it reported one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            DevError::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DevError>;
