use thiserror::Error;
use tonic::Status;

#[derive(Debug, Error)]
pub enum ExerciserError {
    #[error("Invalid config file. Error: {0}")]
    InvalidConfigFile(String),

    #[error("Invalid CA file")]
    InvalidCaFile,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Syslog error: {0}")]
    Syslog(#[from] syslog::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Connection unusable: {0}")]
    Connection(Status),
}
