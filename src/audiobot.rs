//! Cliente para la API HTTP de TS3AudioBot.
//!
//! Todas las llamadas son RPC síncronas con timeout acotado; cualquier
//! fallo de transporte o status no exitoso se devuelve como
//! [`BackendError`] recuperable.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

use crate::error::BackendError;

/// Estado reportado por `GET /api/bot/status`.
///
/// El backend devuelve más campos de los que consumimos; serde ignora el
/// resto y los ausentes toman su default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotStatus {
    #[serde(default)]
    pub playing: bool,
    #[serde(default)]
    pub volume: Option<u32>,
    #[serde(default)]
    pub position: Option<f64>,
}

/// Operaciones remotas del backend de reproducción
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Reproduce una URL (YouTube, SoundCloud, etc.)
    async fn play(&self, url: &str) -> Result<(), BackendError>;

    /// Detiene la reproducción
    async fn stop(&self) -> Result<(), BackendError>;

    /// Pausa o reanuda la reproducción
    async fn pause(&self) -> Result<(), BackendError>;

    /// Ajusta el volumen (0-100)
    async fn set_volume(&self, level: u32) -> Result<(), BackendError>;

    /// Salta a la siguiente canción
    async fn skip(&self) -> Result<(), BackendError>;

    /// Obtiene el estado actual del backend
    async fn status(&self) -> Result<BotStatus, BackendError>;

    /// Envía un mensaje al canal
    async fn send_message(&self, message: &str) -> Result<(), BackendError>;
}

/// Cliente HTTP para TS3AudioBot
pub struct AudioBotClient {
    client: reqwest::Client,
    base_url: String,
}

impl AudioBotClient {
    pub fn new(base_url: &str, api_key: Option<&str>, request_timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            match HeaderValue::from_str(&format!("Bearer {}", key)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("🔑 Credencial con caracteres inválidos, continuando sin ella"),
            }
        }

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST sin cuerpo; solo interesa el status de la respuesta
    async fn post(&self, endpoint: &str) -> Result<(), BackendError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.post(&url).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }
        Ok(())
    }

    /// POST con cuerpo JSON
    async fn post_json(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<(), BackendError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl AudioBackend for AudioBotClient {
    async fn play(&self, url: &str) -> Result<(), BackendError> {
        self.post_json("/api/bot/play", json!({ "url": url })).await
    }

    async fn stop(&self) -> Result<(), BackendError> {
        self.post("/api/bot/stop").await
    }

    async fn pause(&self) -> Result<(), BackendError> {
        self.post("/api/bot/pause").await
    }

    async fn set_volume(&self, level: u32) -> Result<(), BackendError> {
        self.post(&format!("/api/bot/volume/{}", level)).await
    }

    async fn skip(&self) -> Result<(), BackendError> {
        self.post("/api/bot/next").await
    }

    async fn status(&self) -> Result<BotStatus, BackendError> {
        let url = format!("{}/api/bot/status", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }

        // Algunos endpoints responden cuerpo vacío
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(BotStatus::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_message(&self, message: &str) -> Result<(), BackendError> {
        self.post_json("/api/bot/message", json!({ "message": message }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_ignores_unknown_fields() {
        let raw = r#"{"playing": true, "volume": 70, "uptime": 1234, "track": "algo"}"#;
        let status: BotStatus = serde_json::from_str(raw).unwrap();

        assert!(status.playing);
        assert_eq!(status.volume, Some(70));
        assert_eq!(status.position, None);
    }

    #[test]
    fn test_status_defaults_on_empty_object() {
        let status: BotStatus = serde_json::from_str("{}").unwrap();

        assert!(!status.playing);
        assert_eq!(status.volume, None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = AudioBotClient::new(
            "http://localhost:58913/",
            None,
            Duration::from_secs(10),
        );
        assert_eq!(client.base_url, "http://localhost:58913");
    }
}
