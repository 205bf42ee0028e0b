// Error types shared by the client, the reducer and the UI

/// A failed search. Terminal for the submission that caused it.
///
/// `message` is the most specific text the client could find (backend detail,
/// backend error field, transport message). When it is `None` the caller
/// shows its localized fallback instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{}", .message.as_deref().unwrap_or("request failed"))]
    RequestFailed {
        status: Option<u16>,
        message: Option<String>,
    },
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::RequestFailed {
            status: None,
            message: Some(message.into()),
        }
    }

    /// HTTP status of the failed response, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => *status,
        }
    }

    /// Text to display, falling back to `fallback` when nothing specific is known
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ApiError::RequestFailed { message, .. } => message.as_deref().unwrap_or(fallback),
        }
    }
}

/// Local validation failures raised before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Keyword must not be empty")]
    BlankKeyword,

    #[error("Article count must be between {min} and {max}")]
    ArticleCountOutOfRange { min: u32, max: u32 },

    #[error("Year range must be a whole number: {0}")]
    YearsNotANumber(String),

    #[error("Year range must be between {min} and {max}")]
    YearsOutOfRange { min: u32, max: u32 },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
