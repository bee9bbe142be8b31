use console::{StyledObject, style};
use reelcheck_core::{AnalysisResult, ScoreTier, format_results_readable, present};

fn tier_style(tier: ScoreTier, text: String) -> StyledObject<String> {
    match tier {
        ScoreTier::Good => style(text).green().bold(),
        ScoreTier::Medium => style(text).yellow().bold(),
        ScoreTier::NeedsWork => style(text).red().bold(),
    }
}

/// Print the results dashboard: a styled score banner followed by the
/// readable report.
pub fn print_results(result: &AnalysisResult, featured: usize) {
    let tier = ScoreTier::from_score(result.overall_score);

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "\n{}  {} {}  {}\n",
        style("Overall score").bold(),
        tier_style(tier, present::format_score(result.overall_score)),
        style("out of 10").dim(),
        style(format!("Platform: {}", result.platform)).dim()
    );

    for (title, score) in [
        ("Video", result.video.score),
        ("Audio", result.audio.score),
        ("Content", result.content.report.score),
    ] {
        println!(
            "  {:<8} {}",
            title,
            tier_style(ScoreTier::from_score(score), present::format_score(score))
        );
    }
    println!("{}", style("─".repeat(60)).dim());

    println!("{}", format_results_readable(result, featured));
}
