use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelcheckError {
    #[error("Please select a video file")]
    NoFileSelected,

    #[error("{} is not a video file", path.display())]
    NotAVideo { path: PathBuf },

    #[error("Could not read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Please drop a video file")]
    DroppedNotAVideo { path: PathBuf },

    #[error("An analysis is already in progress")]
    AlreadyLoading,

    #[error("Analysis service returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Invalid thumbnail image: {reason}")]
    InvalidImage { reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

impl ReelcheckError {
    /// Shown inline when a request fails without a server-provided detail.
    pub const FALLBACK_MESSAGE: &'static str = "Analysis failed. Please try again.";

    /// Client-side failures that never reach the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoFileSelected
                | Self::NotAVideo { .. }
                | Self::FileUnreadable { .. }
                | Self::DroppedNotAVideo { .. }
                | Self::AlreadyLoading
        )
    }

    /// Text for the inline error banner of the upload form.
    pub fn user_message(&self) -> String {
        match self {
            e if e.is_validation() => e.to_string(),
            Self::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => Self::FALLBACK_MESSAGE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReelcheckError>;
