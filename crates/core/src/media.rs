use std::path::{Path, PathBuf};

use mime_guess::mime;

use crate::error::{ReelcheckError, Result};

/// Extensions offered by file pickers. Detection itself accepts any
/// extension that maps to a `video/*` type.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "avi", "mkv", "webm", "mpeg", "mpg", "3gp", "wmv", "flv", "ogv",
];

pub const FORMATS_HINT: &str = "MP4, MOV, AVI (max 100MB)";
pub const DURATION_HINT: &str = "≤60s";

/// The `video/*` media type guessed from the path's extension.
pub fn video_media_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .iter()
        .find(|guess| guess.type_() == mime::VIDEO)
        .map(|guess| guess.essence_str().to_string())
}

/// A file that passed the upload form's video check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFile {
    path: PathBuf,
    file_name: String,
    media_type: String,
    size: u64,
}

impl VideoFile {
    /// Validate `path` as a video and read its size. The media type is
    /// checked before the filesystem is touched.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let not_a_video = || ReelcheckError::NotAVideo {
            path: path.to_path_buf(),
        };

        let media_type = video_media_type(path).ok_or_else(not_a_video)?;
        let metadata =
            std::fs::metadata(path).map_err(|source| ReelcheckError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        if !metadata.is_file() {
            return Err(not_a_video());
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(not_a_video)?;

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            media_type,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn size_label(&self) -> String {
        format_size(self.size)
    }
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes = bytes as f64;
    if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn every_offered_extension_has_a_media_type() {
        for ext in VIDEO_EXTENSIONS {
            let path = PathBuf::from(format!("clip.{ext}"));
            let media_type = video_media_type(&path).unwrap();
            assert!(media_type.starts_with("video/"), "{ext} -> {media_type}");
        }
    }

    #[test]
    fn accepts_video_types_outside_the_picker_list() {
        assert_eq!(
            video_media_type(Path::new("clip.qt")).as_deref(),
            Some("video/quicktime")
        );
        assert_eq!(
            video_media_type(Path::new("clip.3g2")).as_deref(),
            Some("video/3gpp2")
        );
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(
            video_media_type(Path::new("clip.MOV")).as_deref(),
            Some("video/quicktime")
        );
        assert_eq!(video_media_type(Path::new("cover.jpg")), None);
        assert_eq!(video_media_type(Path::new("notes.txt")), None);
        assert_eq!(video_media_type(Path::new("no_extension")), None);
    }

    #[test]
    fn opens_existing_video() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reel.mp4");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0u8; 2048])
            .unwrap();

        let video = VideoFile::open(&path).unwrap();
        assert_eq!(video.file_name(), "reel.mp4");
        assert_eq!(video.media_type(), "video/mp4");
        assert_eq!(video.size(), 2048);
        assert_eq!(video.size_label(), "2.0 KB");
    }

    #[test]
    fn rejects_non_video_without_touching_disk() {
        let err = VideoFile::open("/definitely/missing/notes.pdf").unwrap_err();
        assert!(matches!(err, ReelcheckError::NotAVideo { .. }));
    }

    #[test]
    fn rejects_directories_named_like_videos() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("folder.mp4");
        std::fs::create_dir(&fake).unwrap();

        assert!(matches!(
            VideoFile::open(&fake),
            Err(ReelcheckError::NotAVideo { .. })
        ));
    }

    #[test]
    fn missing_video_is_unreadable() {
        let err = VideoFile::open("/definitely/missing/reel.mp4").unwrap_err();
        assert!(matches!(err, ReelcheckError::FileUnreadable { .. }));
        assert!(err.is_validation());
    }
}
