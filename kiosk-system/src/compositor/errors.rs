// Error types of the kiosk compositor, built with `thiserror`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] calloop::Error),

    #[error("Failed to register event source: {0}")]
    SourceRegistration(String),

    #[error("View type {0} does not support surface enumeration")]
    UnsupportedViewType(String),
}

pub type Result<T, E = CompositorError> = std::result::Result<T, E>;

impl<Data> From<calloop::InsertError<Data>> for CompositorError {
    fn from(err: calloop::InsertError<Data>) -> Self {
        CompositorError::SourceRegistration(err.error.to_string())
    }
}
