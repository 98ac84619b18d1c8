use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{error, info};

use super::{Track, TrackResolver};
use crate::error::ResolveError;

/// Tiempo máximo de espera por una extracción de yt-dlp
const EXTRACT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolver de metadata basado en yt-dlp (solo info, sin descargar)
pub struct YtDlpResolver;

impl YtDlpResolver {
    pub fn new() -> Self {
        Self
    }

    /// Ejecuta yt-dlp y parsea su salida JSON
    async fn extract_info(&self, query: &str) -> Result<VideoInfo, ResolveError> {
        let mut cmd = Command::new("yt-dlp");
        cmd.args([
            "--dump-single-json",
            "--default-search",
            "ytsearch",
            "--no-playlist",
            "--skip-download",
            "--quiet",
            "--no-warnings",
        ]);
        cmd.arg(query);
        cmd.kill_on_drop(true);

        let output = timeout(EXTRACT_TIMEOUT, cmd.output())
            .await
            .map_err(|_| ResolveError::Timeout)??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResolveError::Extraction(stderr.trim().to_string()));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl Default for YtDlpResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrackResolver for YtDlpResolver {
    async fn resolve(&self, query: &str, requester: &str) -> Result<Track, ResolveError> {
        info!("🔍 Resolviendo: {}", query);

        let mut info = match self.extract_info(query).await {
            Ok(info) => info,
            Err(e) => {
                error!("❌ Error al obtener info: {}", e);
                return Err(e);
            }
        };

        // Las búsquedas devuelven una lista de entradas; tomar la primera
        let video = match info.entries.take() {
            Some(entries) => entries.into_iter().next().ok_or(ResolveError::NoResults)?,
            None => info,
        };

        let track = video.into_track(query, requester);
        info!("✅ Resuelto: {} [{}]", track.title(), track.format_duration());
        Ok(track)
    }
}

/// Subconjunto de la salida `--dump-single-json` de yt-dlp
#[derive(Debug, Deserialize)]
struct VideoInfo {
    title: Option<String>,
    duration: Option<f64>,
    uploader: Option<String>,
    webpage_url: Option<String>,
    thumbnail: Option<String>,
    entries: Option<Vec<VideoInfo>>,
}

impl VideoInfo {
    /// Normaliza la salida de yt-dlp: cada campo ausente recibe un default
    /// explícito en lugar de propagarse como nulo
    fn into_track(self, query: &str, requester: &str) -> Track {
        let mut track = Track::new(
            self.title.unwrap_or_else(|| "Unknown".to_string()),
            self.webpage_url.unwrap_or_else(|| query.to_string()),
            requester.to_string(),
        );

        if let Some(duration) = self.duration.filter(|d| d.is_finite() && *d > 0.0) {
            track = track.with_duration(Duration::from_secs_f64(duration));
        }
        if let Some(uploader) = self.uploader {
            track = track.with_uploader(uploader);
        }
        if let Some(thumbnail) = self.thumbnail {
            track = track.with_thumbnail(thumbnail);
        }

        track
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_video() {
        let raw = r#"{
            "title": "Never Gonna Give You Up",
            "duration": 213.0,
            "uploader": "Rick Astley",
            "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg"
        }"#;

        let info: VideoInfo = serde_json::from_str(raw).unwrap();
        let track = info.into_track("rick astley", "ana");

        assert_eq!(track.title(), "Never Gonna Give You Up");
        assert_eq!(track.uploader(), "Rick Astley");
        assert_eq!(track.url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(track.format_duration(), "3:33");
        assert_eq!(track.requester(), "ana");
    }

    #[test]
    fn test_parse_search_entries() {
        let raw = r#"{
            "title": "rick astley",
            "entries": [
                {"title": "Primera", "duration": 60, "webpage_url": "https://youtu.be/a"},
                {"title": "Segunda", "duration": 90, "webpage_url": "https://youtu.be/b"}
            ]
        }"#;

        let mut info: VideoInfo = serde_json::from_str(raw).unwrap();
        let first = info.entries.take().unwrap().into_iter().next().unwrap();
        let track = first.into_track("rick astley", "ben");

        assert_eq!(track.title(), "Primera");
        assert_eq!(track.url(), "https://youtu.be/a");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let raw = r#"{"duration": 0}"#;

        let info: VideoInfo = serde_json::from_str(raw).unwrap();
        let track = info.into_track("consulta original", "carla");

        assert_eq!(track.title(), "Unknown");
        assert_eq!(track.uploader(), "Unknown");
        assert_eq!(track.url(), "consulta original");
        assert_eq!(track.thumbnail(), "");
        // Duración 0 cuenta como desconocida
        assert_eq!(track.format_duration(), "?:??");
    }
}
