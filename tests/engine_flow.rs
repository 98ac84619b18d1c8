//! Flujos completos de la cola sobre la API pública del crate.

use pretty_assertions::assert_eq;
use std::time::Duration;
use ts_music_bot::queue::QueueEngine;
use ts_music_bot::sources::Track;

fn track(title: &str) -> Track {
    Track::new(
        title.to_string(),
        format!("https://youtu.be/{}", title),
        "tester".to_string(),
    )
    .with_duration(Duration::from_secs(180))
}

#[test]
fn test_full_playback_cycle_preserves_fifo_order() {
    let mut engine = QueueEngine::new();

    // Primer track pasa directo a reproducción
    let first = engine.enqueue(track("uno"));
    assert!(first.playing_now);

    // El resto se encola en orden
    for (i, title) in ["dos", "tres", "cuatro"].iter().enumerate() {
        let result = engine.enqueue(track(title));
        assert!(!result.playing_now);
        assert_eq!(result.position, i + 1);
    }

    // El backend va quedando idle entre tracks; la cola avanza en FIFO
    let mut played = vec![engine.now_playing().unwrap().title()];
    while let Some(next) = engine.advance_from_idle() {
        played.push(next.title());
    }

    assert_eq!(played, vec!["uno", "dos", "tres", "cuatro"]);
    assert!(!engine.is_playing());
    assert!(engine.now_playing().is_none());
}

#[test]
fn test_skip_marks_idle_and_next_advance_promotes_head() {
    let mut engine = QueueEngine::new();
    engine.enqueue(track("uno"));
    engine.enqueue(track("dos"));

    assert!(engine.skip_requested());
    assert!(!engine.is_playing());

    // El monitor confirma el backend idle y promueve la cabeza
    let next = engine.advance_from_idle().unwrap();
    assert_eq!(next.title(), "dos");
    assert_eq!(engine.now_playing().unwrap().title(), "dos");
    assert!(engine.is_playing());

    // Un segundo skip sobre el nuevo track también procede
    assert!(engine.skip_requested());
}

#[test]
fn test_stop_then_enqueue_starts_fresh() {
    let mut engine = QueueEngine::new();
    engine.enqueue(track("uno"));
    engine.enqueue(track("dos"));
    engine.enqueue(track("tres"));

    engine.stop_and_clear();
    assert!(engine.snapshot().is_empty());

    // Tras detener, el próximo enqueue vuelve a reproducir de inmediato
    let result = engine.enqueue(track("cuatro"));
    assert!(result.playing_now);
    assert_eq!(engine.now_playing().unwrap().title(), "cuatro");
    assert_eq!(engine.pending(), 0);
}

#[test]
fn test_snapshot_reflects_engine_state_at_every_step() {
    let mut engine = QueueEngine::new();
    assert!(engine.snapshot().is_empty());

    engine.enqueue(track("uno"));
    engine.enqueue(track("dos"));

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot[0].is_current);
    assert_eq!(snapshot[0].track.title(), "uno");
    assert_eq!(snapshot[1].position, 1);
    assert_eq!(snapshot[1].track.title(), "dos");

    engine.advance_from_idle();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot[0].is_current);
    assert_eq!(snapshot[0].track.title(), "dos");
}
