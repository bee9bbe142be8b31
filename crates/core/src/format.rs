use crate::{
    present::{
        self, HASHTAGS_UNAVAILABLE, MUSIC_UNAVAILABLE, ScoreTier, THUMBNAILS_UNAVAILABLE,
        TITLES_UNAVAILABLE,
    },
    types::{AnalysisResult, CategoryReport, MusicRecommendation, ThumbnailSuggestion},
};

/// Render a full analysis as readable markdown-ish text. `selected` picks the
/// featured thumbnail and is clamped to the available candidates.
pub fn format_results_readable(result: &AnalysisResult, selected: usize) -> String {
    let mut output = String::new();
    let tier = ScoreTier::from_score(result.overall_score);

    output.push_str(&format!(
        "# Overall score: {} / 10 ({})\n\n",
        present::format_score(result.overall_score),
        tier.label()
    ));
    output.push_str(&format!("**Platform:** {}\n\n", result.platform));

    if let Some(priorities) = result.priorities() {
        output.push_str("## Top priorities\n\n");
        for (i, priority) in priorities.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, priority));
        }
        output.push('\n');
    }

    push_category(&mut output, "Video Quality", &result.video);
    push_category(&mut output, "Audio Quality", &result.audio);
    push_category(&mut output, "Content", &result.content.report);
    if let Some(hook) = result.content.hook_score {
        output.push_str(&format!("Hook score: {}/10\n", hook));
        output.push_str(&format!(
            "CTA: {}\n",
            present::cta_label(result.content.has_cta.unwrap_or(false))
        ));
        output.push('\n');
    }

    output.push_str(&format_music(result.music_recommendation.as_ref()));
    output.push_str(&format_hashtags(result.hashtags()));
    output.push_str(&format_titles(result.titles()));
    output.push_str(&format_thumbnails(result.thumbnails(), selected));

    output
}

fn push_category(output: &mut String, title: &str, report: &CategoryReport) {
    output.push_str(&format!(
        "## {}: {} ({})\n\n",
        title,
        present::format_score(report.score),
        ScoreTier::from_score(report.score).label()
    ));

    if !report.issues.is_empty() {
        output.push_str("Issues:\n");
        for issue in &report.issues {
            output.push_str(&format!("• {}\n", issue));
        }
    }
    if !report.suggestions.is_empty() {
        output.push_str("Suggestions:\n");
        for suggestion in &report.suggestions {
            output.push_str(&format!("• {}\n", suggestion));
        }
    }
    output.push('\n');
}

pub fn format_music(music: Option<&MusicRecommendation>) -> String {
    let mut output = String::from("## Background music\n\n");
    let Some(music) = music else {
        output.push_str(&format!("{}\n\n", MUSIC_UNAVAILABLE));
        return output;
    };

    if let Some(best_for) = &music.best_for {
        output.push_str(&format!("Best for: {}\n", best_for));
    }
    output.push_str(&format!("Genre: {}\n", music.genre));
    output.push_str(&format!("Mood: {}\n", music.mood));
    output.push_str(&format!("BPM range: {}\n", music.bpm_range));
    output.push_str(&format!("Energy level: {}\n", music.energy_level));
    output.push_str(&format!("Vocals: {}\n", music.vocals_preference));
    if !music.reasoning.is_empty() {
        output.push_str(&format!("\nWhy this music? {}\n", music.reasoning));
    }
    if !music.search_keywords.is_empty() {
        output.push_str("\nSearch keywords:\n");
        for keyword in &music.search_keywords {
            output.push_str(&format!(
                "• {} <{}>\n",
                keyword,
                present::music_search_url(keyword)
            ));
        }
    }
    output.push('\n');
    output
}

pub fn format_hashtags(hashtags: Option<&[String]>) -> String {
    let mut output = String::from("## Hashtags\n\n");
    match hashtags {
        Some(tags) => output.push_str(&format!("{}\n\n", present::hashtags_line(tags))),
        None => output.push_str(&format!("{}\n\n", HASHTAGS_UNAVAILABLE)),
    }
    output
}

pub fn format_titles(titles: Option<&[String]>) -> String {
    let mut output = String::from("## Title options\n\n");
    match titles {
        Some(titles) => {
            for (i, title) in titles.iter().enumerate() {
                output.push_str(&format!("Option {}: {}\n", i + 1, title));
            }
            output.push('\n');
        }
        None => output.push_str(&format!("{}\n\n", TITLES_UNAVAILABLE)),
    }
    output
}

pub fn format_thumbnails(thumbnails: Option<&[ThumbnailSuggestion]>, selected: usize) -> String {
    let mut output = String::from("## Thumbnails\n\n");
    let Some(thumbnails) = thumbnails else {
        output.push_str(&format!("{}\n\n", THUMBNAILS_UNAVAILABLE));
        return output;
    };

    output.push_str(&format!(
        "{} eye-catching frames selected from your video\n\n",
        thumbnails.len()
    ));

    let selected = selected.min(thumbnails.len() - 1);
    for (i, thumbnail) in thumbnails.iter().enumerate() {
        let marker = if i == selected { ">" } else { " " };
        let star = if thumbnail.is_recommended { " ★ recommended" } else { "" };
        output.push_str(&format!(
            "{} {}. {}  {:.0}/100 ({}){}\n",
            marker,
            i + 1,
            present::format_time(thumbnail.timestamp),
            thumbnail.score,
            ScoreTier::from_thumbnail_score(thumbnail.score).label(),
            star
        ));
    }

    let featured = &thumbnails[selected];
    let metrics = &featured.quality_metrics;
    output.push('\n');
    if !featured.reasoning.is_empty() {
        output.push_str(&format!("{}\n", featured.reasoning));
    }
    output.push_str(&format!(
        "Sharpness {:.0} | Brightness {:.0} | Composition {:.0} | Vibrancy {:.0}\n",
        metrics.sharpness, metrics.brightness, metrics.composition_score, metrics.color_vibrancy
    ));
    if let Some(faces) = present::faces_label(metrics) {
        output.push_str(&format!("{}\n", faces));
    }
    output.push('\n');
    output
}
