use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("server returned HTTP {status}")]
    Http { status: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("malformed recording body: {0}")]
    MalformedBody(String),
    #[error("failed to render snapshot: {0}")]
    Snapshot(String),
}

impl From<ureq::Error> for SignalError {
    fn from(value: ureq::Error) -> Self {
        match value {
            ureq::Error::Status(status, _) => SignalError::Http { status },
            ureq::Error::Transport(transport) => SignalError::Transport(transport.to_string()),
        }
    }
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for SignalError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        SignalError::Snapshot(format!("{value:?}"))
    }
}

impl From<image::ImageError> for SignalError {
    fn from(value: image::ImageError) -> Self {
        SignalError::Snapshot(value.to_string())
    }
}
