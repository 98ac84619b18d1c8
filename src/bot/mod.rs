//! Núcleo del bot: wiring de componentes y entrada de comandos de texto.
//!
//! [`MusicBot`] enlaza el resolver de metadata, el backend de reproducción
//! y la cola compartida. El transporte de chat queda a cargo de quien
//! integra el bot: cada comando recibido se pasa a
//! [`MusicBot::handle_text_command`].

pub mod commands;

use parking_lot::Mutex;
use std::sync::Arc;

use crate::audiobot::AudioBackend;
use crate::queue::QueueEngine;
use crate::sources::TrackResolver;

/// Bot de música completo: comandos, cola y backend
pub struct MusicBot {
    engine: Arc<Mutex<QueueEngine>>,
    backend: Arc<dyn AudioBackend>,
    resolver: Arc<dyn TrackResolver>,
}

impl MusicBot {
    pub fn new(backend: Arc<dyn AudioBackend>, resolver: Arc<dyn TrackResolver>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(QueueEngine::new())),
            backend,
            resolver,
        }
    }

    /// Cola compartida, para construir el monitor de reproducción
    pub fn engine(&self) -> Arc<Mutex<QueueEngine>> {
        Arc::clone(&self.engine)
    }

    /// Despacha un comando de texto y devuelve la respuesta para el canal.
    ///
    /// `None` significa que el texto no es un comando reconocido y el
    /// transporte no debe responder nada.
    pub async fn handle_text_command(
        &self,
        command: &str,
        args: &str,
        sender: &str,
    ) -> Option<String> {
        commands::handle_text_command(self, command, args, sender).await
    }
}
