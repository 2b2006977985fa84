use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("HTML parse error: {0}")]
    HtmlParse(String),
    #[error("text node parse error: {0}")]
    TextNodeParse(String),
    #[error("update timestamp not rendered yet: {0}")]
    TimestampPending(String),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub fn html_parse_error(msg: &str) -> Self {
        Self::HtmlParse(msg.to_string())
    }

    pub fn text_node_parse_error(msg: &str) -> Self {
        Self::TextNodeParse(msg.to_string())
    }

    pub fn timestamp_pending(msg: &str) -> Self {
        Self::TimestampPending(msg.to_string())
    }

    /// True when the failure only means the page's client-side content has
    /// not populated yet, so reading the rendered source again may succeed.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::TimestampPending(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
