use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP {status} fetching {url}")]
    Http { status: u16, url: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no <table> with class {class:?} found")]
    TableNotFound { class: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;
