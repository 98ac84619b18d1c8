pub mod ytdlp;

use async_trait::async_trait;
use std::time::Duration;

pub use ytdlp::YtDlpResolver;

use crate::error::ResolveError;

/// Trait común para los resolvers de metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackResolver: Send + Sync {
    /// Resuelve una búsqueda libre o URL en metadata de un track reproducible
    async fn resolve(&self, query: &str, requester: &str) -> Result<Track, ResolveError>;
}

/// Representa un track de música listo para encolar.
///
/// Inmutable una vez creado; vive en un solo contenedor a la vez
/// (slot actual o cola).
#[derive(Debug, Clone)]
pub struct Track {
    title: String,
    duration: Option<Duration>,
    uploader: String,
    url: String,
    thumbnail: String,
    requester: String,
}

impl Track {
    pub fn new(title: String, url: String, requester: String) -> Self {
        Self {
            title,
            duration: None,
            uploader: "Unknown".to_string(),
            url,
            thumbnail: String::new(),
            requester,
        }
    }

    // Getters
    pub fn title(&self) -> String {
        self.title.clone()
    }
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
    pub fn uploader(&self) -> String {
        self.uploader.clone()
    }
    pub fn url(&self) -> String {
        self.url.clone()
    }
    pub fn thumbnail(&self) -> String {
        self.thumbnail.clone()
    }
    pub fn requester(&self) -> String {
        self.requester.clone()
    }

    // Setters
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_uploader(mut self, uploader: String) -> Self {
        self.uploader = uploader;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: String) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    /// Formatea la duración en formato M:SS, o `?:??` si es desconocida
    pub fn format_duration(&self) -> String {
        match self.duration {
            Some(duration) => {
                let total = duration.as_secs();
                format!("{}:{:02}", total / 60, total % 60)
            }
            None => "?:??".to_string(),
        }
    }
}
