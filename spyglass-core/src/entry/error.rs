use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("line does not match the common log format: {line}")]
    Tokenize { line: String },

    #[error("invalid request format: {request}")]
    RequestFormat { request: String },
}
