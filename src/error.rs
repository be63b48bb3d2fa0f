//! Error type for description generation.
//!
//! Every failure that can happen while resolving a media link is funnelled
//! into [`Error`]. The `Display` output carries diagnostic detail intended
//! for logs, while [`Error::user_message`] yields the generic message that is
//! safe to hand back to callers.

/// Failure modes of the aggregation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The media link does not contain a `/movie/<id>` or `/tv/<id>` segment.
    #[error("Invalid media link: {0}")]
    InvalidLink(String),

    /// The provider could not be reached at the transport level.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// The provider reported the title as missing or returned an empty payload.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Anything else (undecodable payloads, client construction, ...).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Message shown to the caller. Never contains provider payloads.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::InvalidLink(_) => "无法从链接中提取 TMDB ID,请检查链接格式是否填写完整。",
            Error::Connectivity(_) => "无法连接到TMDB，请检查网络连接或代理设置。",
            Error::NotFound(_) => "无法获取对应媒体详情，请检查 TMDB链接是否正确。",
            Error::Internal(_) => "获取TMDB媒体信息发生异常",
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidLink(_) => "invalid_link",
            Error::Connectivity(_) => "connectivity_error",
            Error::NotFound(_) => "not_found",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(format!("failed to decode TMDB payload: {e}"))
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
