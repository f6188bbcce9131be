use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BannerError {
    #[error("Banner not found: {0}")]
    NotFound(String),
    #[error("Banner validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(BannerError);
