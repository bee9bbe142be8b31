use std::fmt;

use serde::{Deserialize, Serialize};

use crate::media::VideoFile;

/// Short-form network the user is optimizing for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Instagram,
    YoutubeShorts,
    Other,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::YoutubeShorts, Platform::Other];

    /// Value sent in the `platform` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::YoutubeShorts => "youtube_shorts",
            Platform::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::YoutubeShorts => "YouTube Shorts",
            Platform::Other => "Other",
        }
    }

    pub fn duration_hint(&self) -> &'static str {
        match self {
            Platform::Instagram => "15-30s",
            Platform::YoutubeShorts => "30-60s",
            Platform::Other => "15-60s",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One upload: lives only for the duration of a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub video: VideoFile,
    pub platform: Platform,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub top_3_priorities: Option<Vec<String>>,
    #[serde(default)]
    pub video: CategoryReport,
    #[serde(default)]
    pub audio: CategoryReport,
    #[serde(default)]
    pub content: ContentReport,
    #[serde(default)]
    pub music_recommendation: Option<MusicRecommendation>,
    #[serde(default)]
    pub hashtag_suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub title_suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub thumbnail_suggestions: Option<Vec<ThumbnailSuggestion>>,
}

impl AnalysisResult {
    pub fn priorities(&self) -> Option<&[String]> {
        non_empty(&self.top_3_priorities)
    }

    pub fn hashtags(&self) -> Option<&[String]> {
        non_empty(&self.hashtag_suggestions)
    }

    pub fn titles(&self) -> Option<&[String]> {
        non_empty(&self.title_suggestions)
    }

    pub fn thumbnails(&self) -> Option<&[ThumbnailSuggestion]> {
        non_empty(&self.thumbnail_suggestions)
    }
}

fn non_empty<T>(items: &Option<Vec<T>>) -> Option<&[T]> {
    items.as_deref().filter(|items| !items.is_empty())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentReport {
    #[serde(flatten)]
    pub report: CategoryReport,
    #[serde(default)]
    pub hook_score: Option<f64>,
    #[serde(default)]
    pub has_cta: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicRecommendation {
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub bpm_range: String,
    #[serde(default)]
    pub vocals_preference: String,
    #[serde(default)]
    pub energy_level: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub search_keywords: Vec<String>,
    #[serde(default)]
    pub best_for: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailSuggestion {
    pub timestamp: f64,
    /// 0-100, unlike the 0-10 category scores.
    pub score: f64,
    pub preview_image: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default)]
    pub quality_metrics: QualityMetrics,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    #[serde(default)]
    pub sharpness: f64,
    #[serde(default)]
    pub brightness: f64,
    #[serde(default)]
    pub contrast: f64,
    #[serde(default)]
    pub face_detected: bool,
    #[serde(default)]
    pub face_count: Option<u32>,
    #[serde(default)]
    pub composition_score: f64,
    #[serde(default)]
    pub color_vibrancy: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub llm_provider: Option<String>,
}
