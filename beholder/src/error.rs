use thiserror::Error;

/// Failures surfaced by [`Subject::notify`](crate::Subject::notify).
///
/// The subject never raises these itself; they originate in an observer's
/// `update` and are handed back to the caller of `notify` untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// An observer was handed a subject or payload of the wrong kind
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Any other failure raised while an observer handled an update
    #[error("observer failed: {0}")]
    Observer(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self { Error::InvalidArgument(message.into()) }

    /// Wrap a domain-specific observer failure
    pub fn observer<E>(error: E) -> Self
    where E: Into<Box<dyn std::error::Error + Send + Sync + 'static>> {
        Error::Observer(error.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self { Error::Observer(Box::new(e)) }
}
