use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use reelcheck_core::{
    AnalysisClient, ApiConfig, Platform, ReelcheckError, Session, StatusRotator,
    loading::ROTATION_INTERVAL, media, thumbnails,
};
use tracing_subscriber::EnvFilter;

mod render;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for Platform enum (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliPlatform {
    #[default]
    Instagram,
    #[value(name = "youtube_shorts", alias = "youtube-shorts", alias = "shorts")]
    YoutubeShorts,
    Other,
}

impl From<CliPlatform> for Platform {
    fn from(cli: CliPlatform) -> Self {
        match cli {
            CliPlatform::Instagram => Platform::Instagram,
            CliPlatform::YoutubeShorts => Platform::YoutubeShorts,
            CliPlatform::Other => Platform::Other,
        }
    }
}

#[derive(Parser)]
#[command(name = "reelcheck")]
#[command(about = "Upload a short-form video for AI analysis and get actionable feedback")]
struct Cli {
    /// Analysis API base URL. Overrides REELCHECK_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds. Overrides REELCHECK_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a video and print the analysis
    Analyze {
        /// Video file (MP4, MOV, AVI, max 100MB, ideally ≤60s)
        video: PathBuf,

        /// Platform to optimize for
        #[arg(short, long, default_value = "instagram")]
        platform: CliPlatform,

        /// Print the parsed analysis as JSON instead of the dashboard
        #[arg(long)]
        json: bool,

        /// Save thumbnail suggestions. Defaults to the downloads directory.
        #[arg(long, value_name = "DIR", num_args = 0..=1)]
        thumbnails: Option<Option<PathBuf>>,

        /// Thumbnail to feature in the dashboard (1-based)
        #[arg(long, default_value_t = 1)]
        featured: usize,
    },
    /// Check that the analysis API is reachable
    Health,
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli) -> Result<ApiConfig> {
    let mut config = ApiConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.as_str());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs))?;
    }
    Ok(config)
}

fn exit_with(message: &str) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(&e.to_string()),
    };
    let client = AnalysisClient::new(config)?;

    println!(
        "\n{}  {}\n",
        style("reelcheck").cyan().bold(),
        style("Reel Optimizer").dim()
    );

    match cli.command {
        Command::Analyze {
            video,
            platform,
            json,
            thumbnails,
            featured,
        } => {
            analyze(
                &client,
                video,
                platform.into(),
                json,
                thumbnails,
                featured.saturating_sub(1),
            )
            .await
        }
        Command::Health => health(&client).await,
    }
}

async fn analyze(
    client: &AnalysisClient,
    video: PathBuf,
    platform: Platform,
    json: bool,
    thumbnails_dir: Option<Option<PathBuf>>,
    featured: usize,
) -> Result<()> {
    let mut session = Session::new();
    session.set_platform(platform);

    if session.select_file(&video).is_err() {
        eprintln!(
            "{}",
            style(format!(
                "Accepted: {} · {}",
                media::FORMATS_HINT,
                media::DURATION_HINT
            ))
            .dim()
        );
        exit_with(session.error().unwrap_or("Please select a video file"));
    }

    if let Some(file) = session.selected_file() {
        println!(
            "{} Selected: {} {} → {} {}",
            style("✓").green().bold(),
            file.file_name(),
            style(format!("({})", file.size_label())).dim(),
            style(platform.label()).yellow(),
            style(format!("(best at {})", platform.duration_hint())).dim()
        );
    }
    println!("{}", style("─".repeat(60)).dim());

    let mut rotator = StatusRotator::default();
    let spinner = create_spinner(rotator.current())?;
    let ticker = {
        let spinner = spinner.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ROTATION_INTERVAL);
            interval.tick().await;
            loop {
                interval.tick().await;
                spinner.set_message(rotator.advance().to_string());
            }
        })
    };

    let started = Instant::now();
    let outcome = session.submit(client).await;
    ticker.abort();

    if let Err(err) = outcome {
        spinner.finish_and_clear();
        tracing::debug!(error = %err, "analysis failed");
        exit_with(
            session
                .error()
                .unwrap_or(ReelcheckError::FALLBACK_MESSAGE),
        );
    }

    spinner.finish_with_message(format!(
        "{} Analysis complete {}",
        style("✓").green().bold(),
        style(format!("[{}]", format_duration(started.elapsed()))).dim()
    ));

    let result = session
        .result()
        .context("analysis finished without a result")?;

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        render::print_results(result, featured);
    }

    if let Some(dir) = thumbnails_dir {
        let dir = dir.unwrap_or_else(thumbnails::default_export_dir);
        match result.thumbnails() {
            Some(candidates) => {
                let spinner = create_spinner("Saving thumbnails...")?;
                let saved = thumbnails::export_all(client, candidates, &dir).await?;
                spinner.finish_with_message(format!(
                    "{} Saved {} thumbnails to {}",
                    style("✓").green().bold(),
                    saved.len(),
                    style(dir.display()).cyan()
                ));
            }
            None => println!(
                "{} {}",
                style("!").yellow().bold(),
                reelcheck_core::present::THUMBNAILS_UNAVAILABLE
            ),
        }
    }

    Ok(())
}

async fn health(client: &AnalysisClient) -> Result<()> {
    let url = client.config().api_url.clone();
    let spinner = create_spinner(&format!("Checking {}...", url))?;

    match client.health().await {
        Ok(health) => {
            spinner.finish_with_message(format!(
                "{} {} is {} {}",
                style("✓").green().bold(),
                style(&url).cyan(),
                style(&health.status).green(),
                style(
                    health
                        .llm_provider
                        .map(|p| format!("(LLM provider: {})", p))
                        .unwrap_or_default()
                )
                .dim()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            exit_with(&format!("{} is unreachable: {}", url, e));
        }
    }
}
