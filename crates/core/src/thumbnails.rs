use std::path::{Path, PathBuf};

use base64::Engine;
use tokio::fs;
use tracing::info;

use crate::{
    client::AnalysisClient,
    error::{ReelcheckError, Result},
    types::ThumbnailSuggestion,
};

/// Where thumbnails go when no directory is given.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reelcheck")
}

/// `thumbnail-{n}-{timestamp}s.jpg`, with `n` counted from one.
pub fn export_file_name(index: usize, thumbnail: &ThumbnailSuggestion) -> String {
    format!("thumbnail-{}-{:.1}s.jpg", index + 1, thumbnail.timestamp)
}

/// Decode a base64 `data:` URI into raw bytes.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let invalid = |reason: &str| ReelcheckError::InvalidImage {
        reason: reason.to_string(),
    };

    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| invalid("not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("data URI has no payload"))?;
    if !header.ends_with(";base64") {
        return Err(invalid("only base64 data URIs are supported"));
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| invalid(&e.to_string()))
}

/// Image bytes for a preview, either inline or fetched over HTTP.
pub async fn load_preview(client: &AnalysisClient, preview: &str) -> Result<Vec<u8>> {
    if preview.starts_with("data:") {
        decode_data_uri(preview)
    } else if preview.starts_with("http://") || preview.starts_with("https://") {
        client.fetch_bytes(preview).await
    } else {
        Err(ReelcheckError::InvalidImage {
            reason: "preview is neither a data URI nor an http(s) URL".to_string(),
        })
    }
}

pub async fn export_thumbnail(
    client: &AnalysisClient,
    index: usize,
    thumbnail: &ThumbnailSuggestion,
    dir: &Path,
) -> Result<PathBuf> {
    let bytes = load_preview(client, &thumbnail.preview_image).await?;
    fs::create_dir_all(dir).await?;

    let path = dir.join(export_file_name(index, thumbnail));
    fs::write(&path, bytes).await?;
    info!(path = %path.display(), "thumbnail saved");
    Ok(path)
}

pub async fn export_all(
    client: &AnalysisClient,
    thumbnails: &[ThumbnailSuggestion],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut saved = Vec::with_capacity(thumbnails.len());
    for (index, thumbnail) in thumbnails.iter().enumerate() {
        saved.push(export_thumbnail(client, index, thumbnail, dir).await?);
    }
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use mockito::Server;

    use super::*;
    use crate::config::ApiConfig;

    fn thumbnail(timestamp: f64, preview_image: &str) -> ThumbnailSuggestion {
        ThumbnailSuggestion {
            timestamp,
            score: 82.0,
            preview_image: preview_image.to_string(),
            ..Default::default()
        }
    }

    fn client() -> AnalysisClient {
        AnalysisClient::new(ApiConfig::default()).unwrap()
    }

    #[test]
    fn file_names_count_from_one() {
        assert_eq!(
            export_file_name(0, &thumbnail(3.26, "")),
            "thumbnail-1-3.3s.jpg"
        );
        assert_eq!(
            export_file_name(2, &thumbnail(12.0, "")),
            "thumbnail-3-12.0s.jpg"
        );
    }

    #[test]
    fn decodes_base64_data_uris() {
        assert_eq!(
            decode_data_uri("data:image/jpeg;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
        assert!(decode_data_uri("data:image/jpeg,hello").is_err());
        assert!(decode_data_uri("data:image/jpeg;base64").is_err());
        assert!(decode_data_uri("https://example.com/a.jpg").is_err());
        assert!(decode_data_uri("data:image/jpeg;base64,@@@").is_err());
    }

    #[tokio::test]
    async fn exports_inline_previews() {
        let dir = tempfile::tempdir().unwrap();
        let thumbs = vec![
            thumbnail(1.5, "data:image/jpeg;base64,aGVsbG8="),
            thumbnail(9.0, "data:image/jpeg;base64,d29ybGQ="),
        ];

        let saved = export_all(&client(), &thumbs, dir.path()).await.unwrap();

        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0], dir.path().join("thumbnail-1-1.5s.jpg"));
        assert_eq!(std::fs::read(&saved[1]).unwrap(), b"world");
    }

    #[tokio::test]
    async fn fetches_remote_previews() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/frames/1.jpg")
            .with_status(200)
            .with_body("jpegbytes")
            .create_async()
            .await;

        let bytes = load_preview(&client(), &format!("{}/frames/1.jpg", server.url()))
            .await
            .unwrap();
        assert_eq!(bytes, b"jpegbytes");
    }

    #[tokio::test]
    async fn rejects_unknown_preview_sources() {
        let err = load_preview(&client(), "ftp://frames/1.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, ReelcheckError::InvalidImage { .. }));
    }
}
