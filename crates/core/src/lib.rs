pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod loading;
pub mod media;
pub mod present;
pub mod session;
pub mod thumbnails;
pub mod types;

pub use client::{AnalysisClient, Analyzer};
pub use config::ApiConfig;
pub use error::{ReelcheckError, Result};
pub use format::format_results_readable;
pub use loading::StatusRotator;
pub use media::VideoFile;
pub use present::ScoreTier;
pub use session::{Session, View};
pub use types::{
    AnalysisResult, CategoryReport, ContentReport, HealthStatus, MusicRecommendation, Platform,
    QualityMetrics, ThumbnailSuggestion, UploadRequest,
};
