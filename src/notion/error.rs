//! Errors raised at the remote service boundary

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotionError {
    /// No credential configured. Raised on first use, not at startup.
    #[error("NOTION_TOKEN is not set; configure it in the environment or config.yaml")]
    MissingToken,

    #[error("Notion API error ({status}, {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response from Notion: {0}")]
    InvalidResponse(String),
}
