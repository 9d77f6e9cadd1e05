use consult_core::{ChatError, StoreError};
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Http: {}", .0)]
    Http(#[from] reqwest::Error),

    #[error("Url: {}", .0)]
    Url(#[from] url::ParseError),

    #[error("Api ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{}", .0)]
    Chat(#[from] ChatError),
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Chat(ChatError::Store(e))
    }
}
