use std::{path::PathBuf, sync::Arc, time::Duration};

use iced::widget::{
    Column, button, column, container, horizontal_rule, horizontal_space, radio, row, scrollable,
    text,
};
use iced::{Alignment, Color, Element, Event, Length, Subscription, Task, event, time, window};
use reelcheck_core::{
    AnalysisClient, AnalysisResult, ApiConfig, CategoryReport, MusicRecommendation, Platform,
    ReelcheckError, ScoreTier, Session, StatusRotator, ThumbnailSuggestion, View,
    loading::ROTATION_INTERVAL, media, present, thumbnails,
};
use tracing_subscriber::EnvFilter;

const SPINNER_FRAMES: [&str; 8] = ["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (config, notice) = match ApiConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (ApiConfig::default(), Some(e.to_string())),
    };
    let client = AnalysisClient::new(config)?;

    iced::application("Reelcheck", App::update, App::view)
        .subscription(App::subscription)
        .run_with(move || App::new(client.clone(), notice.clone()))?;
    Ok(())
}

struct App {
    session: Session,
    client: AnalysisClient,
    rotator: StatusRotator,
    spinner_frame: usize,
    selected_thumbnail: usize,
    notice: Option<String>,
}

#[derive(Debug, Clone)]
enum Message {
    PickFile,
    FilePicked(Option<PathBuf>),
    FileDropped(PathBuf),
    ClearFile,
    PlatformSelected(Platform),
    Analyze,
    AnalysisFinished(Result<AnalysisResult, Arc<ReelcheckError>>),
    RotateStatus,
    SpinnerTick,
    ThumbnailSelected(usize),
    SaveThumbnail(usize),
    SaveAllThumbnails,
    ThumbnailsSaved(Result<Vec<PathBuf>, Arc<ReelcheckError>>),
    CopyText(String),
    Reset,
}

async fn pick_video() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Choose a video")
        .add_filter("Video", media::VIDEO_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

fn tier_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::Good => Color::from_rgb(0.09, 0.64, 0.29),
        ScoreTier::Medium => Color::from_rgb(0.85, 0.6, 0.05),
        ScoreTier::NeedsWork => Color::from_rgb(0.86, 0.15, 0.15),
    }
}

fn error_color() -> Color {
    Color::from_rgb(0.8, 0.1, 0.1)
}

fn muted_color() -> Color {
    Color::from_rgb(0.45, 0.5, 0.6)
}

impl App {
    fn new(client: AnalysisClient, notice: Option<String>) -> (Self, Task<Message>) {
        (
            Self {
                session: Session::new(),
                client,
                rotator: StatusRotator::default(),
                spinner_frame: 0,
                selected_thumbnail: 0,
                notice,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                if matches!(self.session.view(), View::Idle) {
                    return Task::perform(pick_video(), Message::FilePicked);
                }
            }
            Message::FilePicked(Some(path)) => {
                let _ = self.session.select_file(path);
            }
            Message::FilePicked(None) => {}
            Message::FileDropped(path) => {
                // the form only exists on the idle screen
                if matches!(self.session.view(), View::Idle) {
                    let _ = self.session.drop_file(path);
                }
            }
            Message::ClearFile => self.session.clear_file(),
            Message::PlatformSelected(platform) => self.session.set_platform(platform),
            Message::Analyze => {
                if let Ok(request) = self.session.begin_submit() {
                    self.rotator = StatusRotator::default();
                    self.notice = None;
                    let client = self.client.clone();
                    return Task::perform(
                        async move { client.analyze(&request).await.map_err(Arc::new) },
                        Message::AnalysisFinished,
                    );
                }
            }
            Message::AnalysisFinished(Ok(result)) => {
                self.selected_thumbnail = 0;
                self.session.complete(result);
            }
            Message::AnalysisFinished(Err(err)) => {
                tracing::warn!(error = %err, "analysis failed");
                self.session.fail(&err);
            }
            Message::RotateStatus => {
                self.rotator.advance();
            }
            Message::SpinnerTick => {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            }
            Message::ThumbnailSelected(index) => self.selected_thumbnail = index,
            Message::SaveThumbnail(index) => {
                let thumbnail = self
                    .session
                    .result()
                    .and_then(AnalysisResult::thumbnails)
                    .and_then(|candidates| candidates.get(index))
                    .cloned();
                if let Some(thumbnail) = thumbnail {
                    let client = self.client.clone();
                    let dir = thumbnails::default_export_dir();
                    return Task::perform(
                        async move {
                            thumbnails::export_thumbnail(&client, index, &thumbnail, &dir)
                                .await
                                .map(|path| vec![path])
                                .map_err(Arc::new)
                        },
                        Message::ThumbnailsSaved,
                    );
                }
            }
            Message::SaveAllThumbnails => {
                let candidates = self
                    .session
                    .result()
                    .and_then(AnalysisResult::thumbnails)
                    .map(<[ThumbnailSuggestion]>::to_vec);
                if let Some(candidates) = candidates {
                    let client = self.client.clone();
                    let dir = thumbnails::default_export_dir();
                    return Task::perform(
                        async move {
                            thumbnails::export_all(&client, &candidates, &dir)
                                .await
                                .map_err(Arc::new)
                        },
                        Message::ThumbnailsSaved,
                    );
                }
            }
            Message::ThumbnailsSaved(Ok(paths)) => {
                let dir = paths
                    .first()
                    .and_then(|path| path.parent())
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_default();
                self.notice = Some(format!("Saved {} thumbnail(s) to {}", paths.len(), dir));
            }
            Message::ThumbnailsSaved(Err(err)) => {
                self.notice = Some(err.to_string());
            }
            Message::CopyText(contents) => return iced::clipboard::write(contents),
            Message::Reset => {
                self.session.reset();
                self.selected_thumbnail = 0;
                self.notice = None;
            }
        }
        Task::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        let drops = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        });

        if self.session.is_loading() {
            Subscription::batch([
                drops,
                time::every(ROTATION_INTERVAL).map(|_| Message::RotateStatus),
                time::every(Duration::from_millis(100)).map(|_| Message::SpinnerTick),
            ])
        } else {
            drops
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let body = match self.session.view() {
            View::Idle => self.upload_form(),
            View::Loading => self.loading_view(),
            View::Results(result) => self.results_dashboard(result),
        };

        let mut page = column![
            text("Reel Optimizer").size(36),
            text("Transform your short-form videos with AI-powered insights")
                .size(16)
                .color(muted_color()),
        ]
        .spacing(8);

        if let Some(notice) = &self.notice {
            page = page.push(text(notice.as_str()).size(14));
        }

        scrollable(
            container(page.push(horizontal_rule(1)).push(body).spacing(20))
                .padding(32)
                .width(Length::Fill),
        )
        .into()
    }

    fn upload_form(&self) -> Element<'_, Message> {
        let file_label = match self.session.selected_file() {
            Some(file) => format!("{} ({})", file.file_name(), file.size_label()),
            None => "Click to choose or drag and drop a video".to_string(),
        };

        let mut picker = column![
            text(format!("Upload Video ({})", media::DURATION_HINT)).size(14),
            button(text(file_label))
                .on_press(Message::PickFile)
                .padding(24)
                .width(Length::Fill),
            text(media::FORMATS_HINT).size(12).color(muted_color()),
        ]
        .spacing(6);

        if self.session.selected_file().is_some() {
            picker = picker.push(button(text("Remove file").size(12)).on_press(Message::ClearFile));
        }

        let platforms = Platform::ALL
            .iter()
            .fold(row![].spacing(20), |acc, platform| {
                acc.push(radio(
                    format!("{} ({})", platform.label(), platform.duration_hint()),
                    *platform,
                    Some(self.session.platform()),
                    Message::PlatformSelected,
                ))
            });

        let mut form = column![
            picker,
            column![text("Target Platform").size(14), platforms].spacing(8),
        ]
        .spacing(20);

        if let Some(error) = self.session.error() {
            form = form.push(text(error).color(error_color()));
        }

        form.push(
            button(text("Analyze Video").size(18))
                .on_press(Message::Analyze)
                .padding(12)
                .width(Length::Fill),
        )
        .into()
    }

    fn loading_view(&self) -> Element<'_, Message> {
        column![
            text(SPINNER_FRAMES[self.spinner_frame]).size(56),
            text("Analyzing Your Video").size(22),
            text(self.rotator.current()).size(16).color(muted_color()),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
    }

    fn results_dashboard<'a>(&'a self, result: &'a AnalysisResult) -> Element<'a, Message> {
        let tier = ScoreTier::from_score(result.overall_score);

        let header = row![
            button(text("← Analyze Another Video")).on_press(Message::Reset),
            horizontal_space(),
            text(format!("Platform: {}", result.platform)).color(muted_color()),
        ]
        .align_y(Alignment::Center);

        let overall = column![
            text("Overall Score").size(18),
            text(present::format_score(result.overall_score))
                .size(64)
                .color(tier_color(tier)),
            text("out of 10").size(14).color(muted_color()),
        ]
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let mut dashboard = column![header, overall].spacing(24);

        if let Some(priorities) = result.priorities() {
            let list = priorities
                .iter()
                .enumerate()
                .fold(Column::new().spacing(4), |acc, (i, priority)| {
                    acc.push(text(format!("{}. {}", i + 1, priority)))
                });
            dashboard = dashboard.push(panel(column![text("Top 3 Priorities").size(18), list]));
        }

        let content_extra = result.content.hook_score.map(|hook| {
            column![
                text(format!("Hook Score: {}/10", hook)).size(13),
                text(format!(
                    "CTA: {}",
                    present::cta_label(result.content.has_cta.unwrap_or(false))
                ))
                .size(13),
            ]
            .spacing(2)
            .into()
        });

        dashboard = dashboard
            .push(
                row![
                    score_card("Video Quality", &result.video, None),
                    score_card("Audio Quality", &result.audio, None),
                    score_card("Content", &result.content.report, content_extra),
                ]
                .spacing(16),
            )
            .push(music_panel(result.music_recommendation.as_ref()))
            .push(
                row![
                    hashtag_panel(result.hashtags()),
                    title_panel(result.titles()),
                ]
                .spacing(16),
            )
            .push(self.thumbnail_panel(result.thumbnails()));

        dashboard.into()
    }

    fn thumbnail_panel<'a>(
        &'a self,
        candidates: Option<&'a [ThumbnailSuggestion]>,
    ) -> Element<'a, Message> {
        let Some(candidates) = candidates else {
            return unavailable("Thumbnail Suggestions", present::THUMBNAILS_UNAVAILABLE);
        };

        let selected = self.selected_thumbnail.min(candidates.len() - 1);
        let featured = &candidates[selected];
        let metrics = &featured.quality_metrics;

        let picker = candidates
            .iter()
            .enumerate()
            .fold(row![].spacing(8), |acc, (i, candidate)| {
                let star = if candidate.is_recommended { "★ " } else { "" };
                let label = format!(
                    "{}{}  {:.0}",
                    star,
                    present::format_time(candidate.timestamp),
                    candidate.score
                );
                let style = if i == selected {
                    button::primary
                } else {
                    button::secondary
                };
                acc.push(
                    button(text(label).size(13))
                        .style(style)
                        .on_press(Message::ThumbnailSelected(i)),
                )
            });

        let mut details = column![
            row![
                text(format!(
                    "Frame at {}",
                    present::format_time(featured.timestamp)
                ))
                .size(16),
                horizontal_space(),
                text(format!("{:.0}/100", featured.score))
                    .size(16)
                    .color(tier_color(ScoreTier::from_thumbnail_score(featured.score))),
            ],
            text(featured.reasoning.as_str()).size(13),
            text(format!(
                "Sharpness {:.0} · Brightness {:.0} · Composition {:.0} · Vibrancy {:.0}",
                metrics.sharpness,
                metrics.brightness,
                metrics.composition_score,
                metrics.color_vibrancy
            ))
            .size(12)
            .color(muted_color()),
        ]
        .spacing(6);

        if featured.is_recommended {
            details = details.push(text("★ Recommended").size(13));
        }
        if let Some(faces) = present::faces_label(metrics) {
            details = details.push(text(faces).size(12));
        }

        panel(column![
            text("Thumbnail Suggestions").size(18),
            text(format!(
                "{} eye-catching frames selected from your video",
                candidates.len()
            ))
            .size(13)
            .color(muted_color()),
            picker,
            details,
            row![
                button(text("Save")).on_press(Message::SaveThumbnail(selected)),
                button(text("Save All")).on_press(Message::SaveAllThumbnails),
            ]
            .spacing(8),
        ])
    }
}

fn panel<'a>(content: Column<'a, Message>) -> Element<'a, Message> {
    container(content.spacing(8))
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn unavailable<'a>(title: &'a str, notice: &'a str) -> Element<'a, Message> {
    panel(column![
        text(title).size(18),
        text(notice).size(13).color(muted_color()),
    ])
}

fn score_card<'a>(
    title: &'a str,
    report: &'a CategoryReport,
    extra: Option<Element<'a, Message>>,
) -> Element<'a, Message> {
    let mut card = column![
        row![
            text(title).size(18),
            horizontal_space(),
            text(present::format_score(report.score))
                .size(24)
                .color(tier_color(ScoreTier::from_score(report.score))),
        ]
        .align_y(Alignment::Center)
    ]
    .spacing(6);

    if !report.issues.is_empty() {
        card = card.push(text("Issues:").size(14));
        for issue in &report.issues {
            card = card.push(text(format!("• {}", issue)).size(13).color(error_color()));
        }
    }
    if !report.suggestions.is_empty() {
        card = card.push(text("Suggestions:").size(14));
        for suggestion in &report.suggestions {
            card = card.push(text(format!("• {}", suggestion)).size(13));
        }
    }
    if let Some(extra) = extra {
        card = card.push(horizontal_rule(1)).push(extra);
    }

    container(card)
        .padding(16)
        .width(Length::FillPortion(1))
        .style(container::rounded_box)
        .into()
}

fn music_panel(music: Option<&MusicRecommendation>) -> Element<'_, Message> {
    let Some(music) = music else {
        return unavailable("Background Music", present::MUSIC_UNAVAILABLE);
    };

    let energy = match present::EnergyLevel::from_label(&music.energy_level) {
        present::EnergyLevel::High => ScoreTier::NeedsWork,
        present::EnergyLevel::Medium => ScoreTier::Medium,
        present::EnergyLevel::Low => ScoreTier::Good,
    };

    let mut content = column![
        row![
            text("Background Music Recommendation").size(18),
            horizontal_space(),
            text(
                music
                    .best_for
                    .as_deref()
                    .map(|best_for| format!("Best for: {}", best_for))
                    .unwrap_or_default()
            )
            .size(12),
        ],
        text(format!("Genre: {}", music.genre)),
        text(format!("Mood: {}", music.mood)),
        text(format!("BPM Range: {}", music.bpm_range)),
        text(format!("Energy Level: {}", music.energy_level)).color(tier_color(energy)),
        text(format!("Vocals: {}", music.vocals_preference)),
        text(format!("Why this music? {}", music.reasoning)).size(13),
    ];

    if !music.search_keywords.is_empty() {
        let keywords = music
            .search_keywords
            .iter()
            .fold(row![].spacing(8), |acc, keyword| {
                acc.push(
                    button(text(keyword.as_str()).size(13))
                        .style(button::secondary)
                        .on_press(Message::CopyText(present::music_search_url(keyword))),
                )
            });
        content = content
            .push(text("Quick Search Keywords").size(14))
            .push(keywords)
            .push(
                text("Click a keyword to copy a YouTube search link for royalty-free music")
                    .size(12)
                    .color(muted_color()),
            );
    }

    panel(content)
}

fn hashtag_panel(hashtags: Option<&[String]>) -> Element<'_, Message> {
    let Some(hashtags) = hashtags else {
        return unavailable("Hashtag Suggestions", present::HASHTAGS_UNAVAILABLE);
    };

    let tags = hashtags.iter().fold(row![].spacing(6), |acc, tag| {
        acc.push(
            button(text(tag.as_str()).size(13))
                .style(button::secondary)
                .on_press(Message::CopyText(tag.clone())),
        )
    });

    panel(column![
        row![
            text("Hashtag Suggestions").size(18),
            horizontal_space(),
            button(text("Copy All").size(13))
                .on_press(Message::CopyText(present::hashtags_line(hashtags))),
        ],
        tags,
    ])
}

fn title_panel(titles: Option<&[String]>) -> Element<'_, Message> {
    let Some(titles) = titles else {
        return unavailable("Title Suggestions", present::TITLES_UNAVAILABLE);
    };

    let options = titles
        .iter()
        .enumerate()
        .fold(Column::new().spacing(6), |acc, (i, title)| {
            acc.push(
                row![
                    text(format!("Option {}: {}", i + 1, title)).width(Length::Fill),
                    button(text("Copy").size(12)).on_press(Message::CopyText(title.clone())),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            )
        });

    panel(column![text("Title Suggestions").size(18), options])
}
