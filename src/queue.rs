//! Cola de reproducción y estado local del player.
//!
//! Invariantes: hay a lo sumo un track actual, la cola nunca contiene el
//! track actual, y `is_playing` implica que hay track actual. El estado
//! local puede divergir transitoriamente del backend; el monitor es quien
//! resuelve la divergencia.

use std::collections::VecDeque;
use tracing::{debug, info};

use crate::sources::Track;

/// Resultado de encolar un track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnqueueResult {
    /// `true` si el track pasó directo al slot actual
    pub playing_now: bool,
    /// Posición en la cola (0 cuando `playing_now`)
    pub position: usize,
}

/// Una fila del listado de la cola
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub position: usize,
    pub is_current: bool,
    pub track: Track,
}

/// Cola FIFO más el slot del track actual
#[derive(Debug, Default)]
pub struct QueueEngine {
    items: VecDeque<Track>,
    current: Option<Track>,
    is_playing: bool,
}

impl QueueEngine {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            current: None,
            is_playing: false,
        }
    }

    /// Encola un track. Si no hay nada sonando y la cola está vacía, el
    /// track pasa directo al slot actual. Nunca falla.
    pub fn enqueue(&mut self, track: Track) -> EnqueueResult {
        if !self.is_playing && self.items.is_empty() {
            info!("▶️ Reproduciendo de inmediato: {}", track.title());
            self.current = Some(track);
            self.is_playing = true;
            return EnqueueResult {
                playing_now: true,
                position: 0,
            };
        }

        info!("➕ Agregado a la cola: {}", track.title());
        self.items.push_back(track);
        EnqueueResult {
            playing_now: false,
            position: self.items.len(),
        }
    }

    /// Avanza al siguiente track de la cola. Llamar solo con el backend
    /// confirmado idle: promueve la cabeza a actual, o converge a idle si
    /// la cola está vacía. Idempotente mientras la cola siga vacía.
    pub fn advance_from_idle(&mut self) -> Option<Track> {
        match self.items.pop_front() {
            Some(next) => {
                info!("➡️ Siguiente en cola (FIFO): {}", next.title());
                self.current = Some(next.clone());
                self.is_playing = true;
                Some(next)
            }
            None => {
                if self.current.is_some() {
                    debug!("📭 Cola vacía, pasando a idle");
                }
                self.current = None;
                self.is_playing = false;
                None
            }
        }
    }

    /// Registra una solicitud de salto. No limpia el slot actual: la
    /// transición real la hace el próximo `advance_from_idle`.
    pub fn skip_requested(&mut self) -> bool {
        if self.is_playing {
            self.is_playing = false;
            true
        } else {
            false
        }
    }

    /// Limpia la cola y el slot actual. Incondicional.
    pub fn stop_and_clear(&mut self) {
        self.items.clear();
        self.current = None;
        self.is_playing = false;
        info!("🗑️ Cola limpiada y reproducción detenida");
    }

    /// Listado ordenado: posición 0 para el track actual si existe,
    /// 1..N para la cola en orden de reproducción
    pub fn snapshot(&self) -> Vec<QueueEntry> {
        let mut entries = Vec::with_capacity(self.items.len() + 1);

        if let Some(current) = &self.current {
            entries.push(QueueEntry {
                position: 0,
                is_current: true,
                track: current.clone(),
            });
        }

        for (i, track) in self.items.iter().enumerate() {
            entries.push(QueueEntry {
                position: i + 1,
                is_current: false,
                track: track.clone(),
            });
        }

        entries
    }

    /// Track actualmente en el slot de reproducción
    pub fn now_playing(&self) -> Option<Track> {
        self.current.clone()
    }

    /// Si el estado local cree que hay algo sonando
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Cantidad de tracks pendientes (sin contar el actual)
    pub fn pending(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn track(title: &str) -> Track {
        Track::new(
            title.to_string(),
            format!("https://youtu.be/{}", title),
            "tester".to_string(),
        )
    }

    #[test]
    fn test_enqueue_on_idle_plays_immediately() {
        let mut engine = QueueEngine::new();

        let result = engine.enqueue(track("a"));

        assert!(result.playing_now);
        assert_eq!(result.position, 0);
        assert!(engine.is_playing());
        assert_eq!(engine.now_playing().unwrap().title(), "a");
        assert_eq!(engine.pending(), 0);
    }

    #[test]
    fn test_enqueue_while_playing_appends_in_order() {
        let mut engine = QueueEngine::new();
        engine.enqueue(track("a"));

        let second = engine.enqueue(track("b"));
        let third = engine.enqueue(track("c"));

        assert!(!second.playing_now);
        assert_eq!(second.position, 1);
        assert!(!third.playing_now);
        assert_eq!(third.position, 2);
        assert_eq!(engine.now_playing().unwrap().title(), "a");
        assert_eq!(engine.pending(), 2);
    }

    #[test]
    fn test_advance_returns_fifo_order() {
        let mut engine = QueueEngine::new();
        engine.enqueue(track("a"));
        for title in ["b", "c", "d"] {
            engine.enqueue(track(title));
        }

        for expected in ["b", "c", "d"] {
            let next = engine.advance_from_idle().unwrap();
            assert_eq!(next.title(), expected);
            assert_eq!(engine.now_playing().unwrap().title(), expected);
        }
        assert!(engine.advance_from_idle().is_none());
    }

    #[test]
    fn test_at_most_one_current_track() {
        let mut engine = QueueEngine::new();
        engine.enqueue(track("a"));
        engine.enqueue(track("b"));
        engine.enqueue(track("c"));

        loop {
            let snapshot = engine.snapshot();
            let currents = snapshot.iter().filter(|e| e.is_current).count();
            assert!(currents <= 1);
            // La cola nunca contiene el track actual
            if let Some(current) = engine.now_playing() {
                assert!(snapshot
                    .iter()
                    .filter(|e| !e.is_current)
                    .all(|e| e.track.title() != current.title()));
            }
            if engine.advance_from_idle().is_none() {
                break;
            }
        }
    }

    #[test]
    fn test_advance_on_empty_queue_converges_to_idle() {
        let mut engine = QueueEngine::new();
        engine.enqueue(track("a"));

        assert!(engine.advance_from_idle().is_none());
        assert!(!engine.is_playing());
        assert!(engine.now_playing().is_none());

        // Idempotente mientras la cola siga vacía
        assert!(engine.advance_from_idle().is_none());
        assert!(!engine.is_playing());
    }

    #[test]
    fn test_skip_requested_only_while_playing() {
        let mut engine = QueueEngine::new();
        assert!(!engine.skip_requested());

        engine.enqueue(track("a"));
        engine.enqueue(track("b"));

        assert!(engine.skip_requested());
        assert!(!engine.is_playing());
        // El slot actual queda hasta el próximo advance
        assert_eq!(engine.now_playing().unwrap().title(), "a");

        let next = engine.advance_from_idle().unwrap();
        assert_eq!(next.title(), "b");
        assert!(engine.is_playing());
    }

    #[test]
    fn test_stop_and_clear_resets_everything() {
        let mut engine = QueueEngine::new();
        engine.enqueue(track("a"));
        engine.enqueue(track("b"));

        engine.stop_and_clear();

        assert!(engine.now_playing().is_none());
        assert!(!engine.is_playing());
        assert_eq!(engine.pending(), 0);
        assert!(engine.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_positions() {
        let mut engine = QueueEngine::new();
        engine.enqueue(track("a"));
        engine.enqueue(track("b"));
        engine.enqueue(track("c"));

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].position, 0);
        assert!(snapshot[0].is_current);
        assert_eq!(snapshot[0].track.title(), "a");
        assert_eq!(snapshot[1].position, 1);
        assert!(!snapshot[1].is_current);
        assert_eq!(snapshot[1].track.title(), "b");
        assert_eq!(snapshot[2].position, 2);
        assert_eq!(snapshot[2].track.title(), "c");
    }
}
