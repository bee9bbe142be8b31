//! Cosmetic presentation rules shared by the terminal and desktop views.

use crate::types::QualityMetrics;

pub const MUSIC_UNAVAILABLE: &str = "Music recommendation unavailable";
pub const HASHTAGS_UNAVAILABLE: &str = "Hashtag suggestions unavailable";
pub const TITLES_UNAVAILABLE: &str = "Title suggestions unavailable";
pub const THUMBNAILS_UNAVAILABLE: &str = "Thumbnail suggestions unavailable";

const YOUTUBE_SEARCH: &str = "https://www.youtube.com/results?search_query=";

/// Visual tier of a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreTier {
    Good,
    Medium,
    NeedsWork,
}

impl ScoreTier {
    /// Tier for a 0-10 score.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreTier::Good
        } else if score >= 6.0 {
            ScoreTier::Medium
        } else {
            ScoreTier::NeedsWork
        }
    }

    /// Tier for a 0-100 thumbnail score.
    pub fn from_thumbnail_score(score: f64) -> Self {
        Self::from_score(score / 10.0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Good => "good",
            ScoreTier::Medium => "medium",
            ScoreTier::NeedsWork => "needs work",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

impl EnergyLevel {
    /// Anything that isn't "high" or "medium" is shown as low.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => EnergyLevel::High,
            "medium" => EnergyLevel::Medium,
            _ => EnergyLevel::Low,
        }
    }
}

/// Format seconds as M:SS.
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", mins, secs)
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

pub fn cta_label(has_cta: bool) -> &'static str {
    if has_cta { "✓ Present" } else { "✗ Missing" }
}

/// All hashtags on one line, ready to paste.
pub fn hashtags_line(hashtags: &[String]) -> String {
    hashtags.join(" ")
}

pub fn music_search_url(keyword: &str) -> String {
    let query: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
    format!("{YOUTUBE_SEARCH}{query}")
}

pub fn faces_label(metrics: &QualityMetrics) -> Option<String> {
    if !metrics.face_detected {
        return None;
    }
    let count = metrics.face_count.unwrap_or(1).max(1);
    let plural = if count > 1 { "s" } else { "" };
    Some(format!("{count} face{plural} detected"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tiers() {
        assert_eq!(ScoreTier::from_score(8.5), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(8.0), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(7.0), ScoreTier::Medium);
        assert_eq!(ScoreTier::from_score(6.0), ScoreTier::Medium);
        assert_eq!(ScoreTier::from_score(4.0), ScoreTier::NeedsWork);
        assert_eq!(ScoreTier::NeedsWork.label(), "needs work");
    }

    #[test]
    fn thumbnail_tiers_use_hundred_point_scale() {
        assert_eq!(ScoreTier::from_thumbnail_score(85.0), ScoreTier::Good);
        assert_eq!(ScoreTier::from_thumbnail_score(60.0), ScoreTier::Medium);
        assert_eq!(ScoreTier::from_thumbnail_score(59.0), ScoreTier::NeedsWork);
    }

    #[test]
    fn energy_levels() {
        assert_eq!(EnergyLevel::from_label("High"), EnergyLevel::High);
        assert_eq!(EnergyLevel::from_label(" medium "), EnergyLevel::Medium);
        assert_eq!(EnergyLevel::from_label("chill"), EnergyLevel::Low);
    }

    #[test]
    fn time_formatting() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(7.9), "0:07");
        assert_eq!(format_time(75.2), "1:15");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn search_urls_are_encoded() {
        assert_eq!(
            music_search_url("lo-fi beats & chill"),
            "https://www.youtube.com/results?search_query=lo-fi+beats+%26+chill"
        );
    }

    #[test]
    fn hashtags_and_faces() {
        let tags = vec!["#reels".to_string(), "#fyp".to_string()];
        assert_eq!(hashtags_line(&tags), "#reels #fyp");

        let mut metrics = QualityMetrics::default();
        assert_eq!(faces_label(&metrics), None);
        metrics.face_detected = true;
        assert_eq!(faces_label(&metrics).as_deref(), Some("1 face detected"));
        metrics.face_count = Some(3);
        assert_eq!(faces_label(&metrics).as_deref(), Some("3 faces detected"));
    }
}
