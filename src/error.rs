use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid thread count: {threads} (must be a power of two and at least 1)")]
    InvalidThreadCount { threads: usize },

    #[error("Invalid participant count: {count} (a barrier needs at least one participant)")]
    InvalidParticipantCount { count: usize },

    #[error("Invalid permit count: {count} (a semaphore needs at least one permit)")]
    InvalidPermitCount { count: usize },

    #[error("Parse error at token {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("Failed to spawn thread '{name}': {source}")]
    ThreadSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Sum overflows i64 at value {position}")]
    Overflow { position: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn error_code(&self) -> i32 {
        match self {
            Error::Io(_) => -1,
            Error::Config(_) => -2,
            Error::InvalidThreadCount { .. } => -3,
            Error::InvalidParticipantCount { .. } => -4,
            Error::InvalidPermitCount { .. } => -5,
            Error::Parse { .. } => -6,
            Error::WorkerPanicked { .. } => -7,
            Error::ThreadSpawn { .. } => -8,
            Error::Serialization(_) => -9,
            Error::Overflow { .. } => -10,
        }
    }
}
