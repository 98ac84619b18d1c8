//! Monitor de reproducción: reconcilia el estado local contra el backend.
//!
//! El backend es la autoridad sobre "hay algo sonando"; la cola local es la
//! autoridad sobre "qué sigue". El monitor es el único componente que
//! sondea: cada tick consulta el estado y, si el backend está idle, avanza
//! la cola y despacha el siguiente track.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::audiobot::AudioBackend;
use crate::config::Config;
use crate::queue::QueueEngine;
use crate::sources::Track;

/// Estado del ciclo de sondeo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonitorState {
    /// Backend sonando o nada pendiente; esperar el intervalo normal
    Idle,
    /// Se acaba de despachar un track; esperar el intervalo normal
    Polling,
    /// El último sondeo falló; esperar el intervalo de backoff
    Backoff,
}

/// Tarea de fondo que sondea TS3AudioBot y reproduce el siguiente de la cola
pub struct PlaybackMonitor {
    engine: Arc<Mutex<QueueEngine>>,
    backend: Arc<dyn AudioBackend>,
    poll_interval: Duration,
    backoff_interval: Duration,
    shutdown: CancellationToken,
}

impl PlaybackMonitor {
    pub fn new(
        engine: Arc<Mutex<QueueEngine>>,
        backend: Arc<dyn AudioBackend>,
        config: &Config,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            engine,
            backend,
            poll_interval: config.poll_interval,
            backoff_interval: config.backoff_interval,
            shutdown,
        }
    }

    /// Ciclo perpetuo de sondeo; retorna cuando se cancela el token
    pub async fn run(self) {
        info!("👀 Iniciando monitor de reproducción");
        let mut state = MonitorState::Idle;

        loop {
            let delay = match state {
                MonitorState::Backoff => self.backoff_interval,
                MonitorState::Idle | MonitorState::Polling => self.poll_interval,
            };

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }

            state = self.tick().await;
        }

        info!("👋 Monitor de reproducción detenido");
    }

    /// Una pasada de reconciliación contra el backend
    async fn tick(&self) -> MonitorState {
        let status = match self.backend.status().await {
            Ok(status) => status,
            Err(e) => {
                warn!("⚠️ Error al consultar estado del backend: {}", e);
                return MonitorState::Backoff;
            }
        };

        if status.playing {
            // El backend sigue sonando; el estado local ya es correcto
            return MonitorState::Idle;
        }

        // Backend idle: promover la cabeza de la cola, o converger a idle
        let next = self.engine.lock().advance_from_idle();

        match next {
            Some(track) => {
                info!("🎶 Reproduciendo siguiente de la cola: {}", track.title());
                self.dispatch(&track).await;
                MonitorState::Polling
            }
            None => MonitorState::Idle,
        }
    }

    /// Lanza la reproducción del track y difunde el aviso al canal
    async fn dispatch(&self, track: &Track) {
        if let Err(e) = self.backend.play(&track.url()).await {
            // El track ya quedó como actual sin cola de respaldo; el
            // próximo tick verá el backend idle y seguirá con la cola
            error!("❌ Error al reproducir con TS3AudioBot: {}", e);
            return;
        }

        let message = format!(
            "🎵 Reproduciendo: {} [{}] - Pedido por {}",
            track.title(),
            track.format_duration(),
            track.requester()
        );
        if let Err(e) = self.backend.send_message(&message).await {
            warn!("⚠️ No se pudo enviar el aviso de reproducción: {}", e);
        }
    }
}
