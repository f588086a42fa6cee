use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Json::{}", .0)]
    Json(#[from] serde_json::Error),

    #[error("{}", .0)]
    Query(#[from] medai_core::QueryError),

    #[error("Dictionary::{}", .0)]
    Dictionary(#[from] medai_core::responder::DictionaryError),

    #[error("{}", .0)]
    Equivalent(#[from] medai_core::equivalents::EquivalentError),

    #[error("{}", .0)]
    Responder(#[from] medai_core::responder::ResponderError),
}
