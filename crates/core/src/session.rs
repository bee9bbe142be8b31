use std::path::Path;

use tracing::{debug, info};

use crate::{
    client::Analyzer,
    error::{ReelcheckError, Result},
    media::VideoFile,
    types::{AnalysisResult, Platform, UploadRequest},
};

/// Which screen the client is on.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum View {
    #[default]
    Idle,
    Loading,
    Results(Box<AnalysisResult>),
}

/// View state owned by the top-level view: the upload form fields plus the
/// current screen.
///
/// Idle -> Loading -> (Results | Idle with error), and Results -> Idle on
/// [`Session::reset`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    view: View,
    platform: Platform,
    selected: Option<VideoFile>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, View::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.view {
            View::Results(result) => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn selected_file(&self) -> Option<&VideoFile> {
        self.selected.as_ref()
    }

    /// Inline error shown on the upload form.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pick a file through a dialog or command line.
    pub fn select_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_not_loading()?;
        self.selected = None;
        match VideoFile::open(path) {
            Ok(video) => {
                debug!(file_name = video.file_name(), "video selected");
                self.selected = Some(video);
                self.error = None;
                Ok(())
            }
            Err(err) => self.record(err),
        }
    }

    /// Accept a drag-and-drop. Non-video drops leave nothing selected.
    pub fn drop_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match self.select_file(path) {
            Err(ReelcheckError::NotAVideo { .. }) => self.record(ReelcheckError::DroppedNotAVideo {
                path: path.to_path_buf(),
            }),
            other => other,
        }
    }

    pub fn clear_file(&mut self) {
        if !self.is_loading() {
            self.selected = None;
        }
    }

    pub fn set_platform(&mut self, platform: Platform) {
        if !self.is_loading() {
            self.platform = platform;
        }
    }

    /// Validate the form and move to Loading. The returned request is what
    /// must be sent; nothing is sent when this fails.
    pub fn begin_submit(&mut self) -> Result<UploadRequest> {
        self.ensure_not_loading()?;
        let Some(video) = self.selected.clone() else {
            return self.record(ReelcheckError::NoFileSelected);
        };

        info!(
            file_name = video.file_name(),
            platform = self.platform.as_str(),
            "submitting video"
        );
        self.error = None;
        self.view = View::Loading;
        Ok(UploadRequest {
            video,
            platform: self.platform,
        })
    }

    /// Land a successful analysis. Ignored unless a submission is pending.
    pub fn complete(&mut self, result: AnalysisResult) {
        if self.is_loading() {
            self.view = View::Results(Box::new(result));
        }
    }

    /// Return to the form with the failure shown inline. The selected file is
    /// kept so the user can retry.
    pub fn fail(&mut self, error: &ReelcheckError) {
        if self.is_loading() {
            self.view = View::Idle;
            self.error = Some(error.user_message());
        }
    }

    pub fn finish_submit(&mut self, outcome: Result<AnalysisResult>) -> Result<()> {
        match outcome {
            Ok(result) => {
                self.complete(result);
                Ok(())
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Run one full submission against `analyzer`.
    pub async fn submit<A: Analyzer + ?Sized>(&mut self, analyzer: &A) -> Result<()> {
        let request = self.begin_submit()?;
        let outcome = analyzer.analyze(&request).await;
        self.finish_submit(outcome)
    }

    /// Discard the result and return to a blank upload form.
    pub fn reset(&mut self) {
        if !self.is_loading() {
            *self = Self::default();
        }
    }

    fn ensure_not_loading(&self) -> Result<()> {
        if self.is_loading() {
            Err(ReelcheckError::AlreadyLoading)
        } else {
            Ok(())
        }
    }

    fn record<T>(&mut self, err: ReelcheckError) -> Result<T> {
        self.error = Some(err.user_message());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::PathBuf,
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::present::ScoreTier;

    type Outcome = Box<dyn Fn() -> Result<AnalysisResult> + Send + Sync>;

    struct FakeAnalyzer {
        calls: AtomicUsize,
        outcome: Outcome,
    }

    impl FakeAnalyzer {
        fn new(outcome: impl Fn() -> Result<AnalysisResult> + Send + Sync + 'static) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Box::new(outcome),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Analyzer for FakeAnalyzer {
        async fn analyze(&self, _request: &UploadRequest) -> Result<AnalysisResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn scored(score: f64) -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            overall_score: score,
            platform: "instagram".into(),
            ..Default::default()
        })
    }

    fn fixture(name: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, b"data").unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn submit_without_file_never_calls_the_service() {
        let analyzer = FakeAnalyzer::new(|| scored(8.0));
        let mut session = Session::new();

        let err = session.submit(&analyzer).await.unwrap_err();

        assert!(matches!(err, ReelcheckError::NoFileSelected));
        assert_eq!(analyzer.calls(), 0);
        assert_eq!(session.error(), Some("Please select a video file"));
        assert_eq!(session.view(), &View::Idle);
    }

    #[tokio::test]
    async fn missing_file_is_reported_inline_without_a_request() {
        let analyzer = FakeAnalyzer::new(|| scored(8.0));
        let mut session = Session::new();

        let err = session
            .select_file("/definitely/missing/reel.mp4")
            .unwrap_err();
        assert!(matches!(err, ReelcheckError::FileUnreadable { .. }));
        let inline = session.error().unwrap();
        assert!(inline.contains("reel.mp4"), "{inline}");
        assert_ne!(inline, ReelcheckError::FALLBACK_MESSAGE);

        assert!(session.submit(&analyzer).await.is_err());
        assert_eq!(analyzer.calls(), 0);
    }

    #[test]
    fn dropping_non_video_is_rejected() {
        let (_dir, path) = fixture("notes.txt");
        let mut session = Session::new();

        assert!(session.drop_file(&path).is_err());
        assert!(session.selected_file().is_none());
        assert_eq!(session.error(), Some("Please drop a video file"));
    }

    #[test]
    fn rejected_drop_clears_previous_selection() {
        let (_dir, video) = fixture("reel.mp4");
        let (_other, text) = fixture("notes.txt");
        let mut session = Session::new();

        session.drop_file(&video).unwrap();
        assert_eq!(session.selected_file().map(VideoFile::file_name), Some("reel.mp4"));

        session.drop_file(&text).unwrap_err();
        assert!(session.selected_file().is_none());
    }

    #[tokio::test]
    async fn success_moves_to_results_in_the_right_tier() {
        let (_dir, path) = fixture("reel.mp4");
        for (score, tier) in [
            (8.5, ScoreTier::Good),
            (7.0, ScoreTier::Medium),
            (4.0, ScoreTier::NeedsWork),
        ] {
            let analyzer = FakeAnalyzer::new(move || scored(score));
            let mut session = Session::new();
            session.select_file(&path).unwrap();

            session.submit(&analyzer).await.unwrap();

            let result = session.result().unwrap();
            assert_eq!(ScoreTier::from_score(result.overall_score), tier);
            assert_eq!(analyzer.calls(), 1);
        }
    }

    #[tokio::test]
    async fn reset_returns_to_a_blank_form() {
        let (_dir, path) = fixture("reel.mp4");
        let analyzer = FakeAnalyzer::new(|| scored(9.0));
        let mut session = Session::new();
        session.set_platform(Platform::YoutubeShorts);
        session.select_file(&path).unwrap();
        session.submit(&analyzer).await.unwrap();
        assert!(session.result().is_some());

        session.reset();

        assert_eq!(session, Session::new());
        assert!(session.selected_file().is_none());
        assert_eq!(session.platform(), Platform::Instagram);
    }

    #[tokio::test]
    async fn failure_returns_to_idle_with_message_and_keeps_file() {
        let (_dir, path) = fixture("reel.mp4");
        let analyzer = FakeAnalyzer::new(|| Err(ReelcheckError::Timeout(Duration::from_secs(120))));
        let mut session = Session::new();
        session.select_file(&path).unwrap();

        let err = session.submit(&analyzer).await.unwrap_err();

        assert!(matches!(err, ReelcheckError::Timeout(_)));
        assert_eq!(session.view(), &View::Idle);
        assert_eq!(session.error(), Some(ReelcheckError::FALLBACK_MESSAGE));
        assert!(session.selected_file().is_some());
    }

    #[test]
    fn loading_blocks_the_form() {
        let (_dir, path) = fixture("reel.mp4");
        let mut session = Session::new();
        session.select_file(&path).unwrap();

        let request = session.begin_submit().unwrap();
        assert_eq!(request.platform, Platform::Instagram);
        assert!(session.is_loading());

        assert!(matches!(
            session.begin_submit(),
            Err(ReelcheckError::AlreadyLoading)
        ));
        session.set_platform(Platform::Other);
        assert_eq!(session.platform(), Platform::Instagram);
        assert!(session.select_file(&path).is_err());

        session.fail(&ReelcheckError::Api {
            status: 400,
            detail: Some("Invalid platform".into()),
        });
        assert_eq!(session.error(), Some("Invalid platform"));
        assert!(!session.is_loading());
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut session = Session::new();
        session.complete(AnalysisResult::default());
        assert_eq!(session.view(), &View::Idle);
    }
}
