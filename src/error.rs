#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("comment template error: {0}")]
    Template(String),

    #[error("comments provider error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;
