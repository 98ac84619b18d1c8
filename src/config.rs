use anyhow::Result;
use std::time::Duration;
use url::Url;

/// Configuración del bot, cargada de variables de entorno
#[derive(Debug, Clone)]
pub struct Config {
    /// URL base de la API de TS3AudioBot
    pub audiobot_api_url: String,
    /// Credencial bearer opcional para la API
    pub audiobot_api_key: Option<String>,
    /// Intervalo del monitor de reproducción
    pub poll_interval: Duration,
    /// Intervalo de espera tras un fallo de transporte
    pub backoff_interval: Duration,
    /// Timeout de cada petición HTTP al backend
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            audiobot_api_url: std::env::var("TS3AUDIOBOT_API")
                .unwrap_or_else(|_| "http://localhost:58913".to_string()),
            // Credencial vacía cuenta como ausente
            audiobot_api_key: std::env::var("TS3AUDIOBOT_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            poll_interval: Duration::from_secs(
                std::env::var("POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()?,
            ),
            backoff_interval: Duration::from_secs(
                std::env::var("BACKOFF_INTERVAL_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
            ),
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Chequeos de sanidad sobre los valores cargados
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.audiobot_api_url)
            .map_err(|e| anyhow::anyhow!("TS3AUDIOBOT_API inválida: {}", e))?;

        if self.poll_interval.is_zero() {
            anyhow::bail!("POLL_INTERVAL_SECS debe ser mayor que 0");
        }
        if self.backoff_interval < self.poll_interval {
            anyhow::bail!("BACKOFF_INTERVAL_SECS no puede ser menor que POLL_INTERVAL_SECS");
        }
        if self.request_timeout.is_zero() {
            anyhow::bail!("REQUEST_TIMEOUT_SECS debe ser mayor que 0");
        }

        Ok(())
    }

    /// Resumen apto para logs, sin credenciales
    pub fn summary(&self) -> String {
        format!(
            "Config: API {} (credencial: {}), poll {}s, backoff {}s, timeout {}s",
            self.audiobot_api_url,
            if self.audiobot_api_key.is_some() {
                "sí"
            } else {
                "no"
            },
            self.poll_interval.as_secs(),
            self.backoff_interval.as_secs(),
            self.request_timeout.as_secs()
        )
    }
}

/// Defaults usados cuando las variables de entorno no están definidas
impl Default for Config {
    fn default() -> Self {
        Self {
            audiobot_api_url: "http://localhost:58913".to_string(),
            audiobot_api_key: None,
            poll_interval: Duration::from_secs(2),
            backoff_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}
