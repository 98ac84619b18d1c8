//! Despacho de comandos de texto y formato de respuestas.
//!
//! La validación de argumentos ocurre antes de cualquier efecto: volumen
//! fuera de rango o no numérico nunca llega al backend, y `!play` sin
//! argumento nunca invoca el resolver.

use tracing::{error, info, warn};

use super::MusicBot;
use crate::sources::Track;

const HELP_TEXT: &str = "🎵 Comandos del Bot de Música:
!play <url/búsqueda> - Reproducir canción
!skip - Saltar canción actual
!stop - Detener y limpiar cola
!pause - Pausar/Reanudar
!queue - Ver cola de reproducción
!np - Canción actual
!volume <0-100> - Ajustar volumen
!help - Mostrar esta ayuda";

/// Mapea un token de comando (insensible a mayúsculas) a su handler
pub(super) async fn handle_text_command(
    bot: &MusicBot,
    command: &str,
    args: &str,
    sender: &str,
) -> Option<String> {
    match command.to_lowercase().as_str() {
        "!play" | "!p" => Some(handle_play(bot, args, sender).await),
        "!skip" | "!s" => Some(handle_skip(bot).await),
        "!stop" => Some(handle_stop(bot).await),
        "!pause" => Some(handle_pause(bot).await),
        "!queue" | "!q" => Some(handle_queue(bot)),
        "!np" | "!now" => Some(handle_now_playing(bot)),
        "!volume" | "!vol" => Some(handle_volume(bot, args).await),
        "!help" | "!h" => Some(HELP_TEXT.to_string()),
        _ => None,
    }
}

async fn handle_play(bot: &MusicBot, args: &str, sender: &str) -> String {
    let query = args.trim();
    if query.is_empty() {
        return "❌ Uso: !play <url o búsqueda>".to_string();
    }

    info!("📝 !play de {}: {}", sender, query);

    let track = match bot.resolver.resolve(query, sender).await {
        Ok(track) => track,
        Err(e) => {
            error!("❌ No se pudo obtener información del video: {}", e);
            return "❌ Error al procesar la canción".to_string();
        }
    };

    let result = bot.engine.lock().enqueue(track.clone());

    if result.playing_now {
        play_now(bot, &track).await
    } else {
        format!(
            "✅ Agregado a la cola (#{}): {} [{}]",
            result.position,
            track.title(),
            track.format_duration()
        )
    }
}

/// Lanza la reproducción inmediata y difunde el aviso al canal
async fn play_now(bot: &MusicBot, track: &Track) -> String {
    if let Err(e) = bot.backend.play(&track.url()).await {
        // El track ya quedó como actual; el monitor verá el backend idle
        // en el próximo tick y seguirá con la cola
        error!("❌ Error al reproducir con TS3AudioBot: {}", e);
        return "❌ Error al reproducir la canción".to_string();
    }

    let message = format!(
        "🎵 Reproduciendo: {} [{}] - Pedido por {}",
        track.title(),
        track.format_duration(),
        track.requester()
    );
    if let Err(e) = bot.backend.send_message(&message).await {
        warn!("⚠️ No se pudo enviar el aviso de reproducción: {}", e);
    }

    format!(
        "▶️ Reproduciendo: {} [{}]",
        track.title(),
        track.format_duration()
    )
}

async fn handle_skip(bot: &MusicBot) -> String {
    let skipped = bot.engine.lock().skip_requested();
    if !skipped {
        return "❌ No hay nada reproduciéndose".to_string();
    }

    info!("⏭️ Saltando canción actual");
    if let Err(e) = bot.backend.skip().await {
        warn!("⚠️ Error al saltar en el backend: {}", e);
    }
    "⏭️ Canción saltada".to_string()
}

async fn handle_stop(bot: &MusicBot) -> String {
    bot.engine.lock().stop_and_clear();
    if let Err(e) = bot.backend.stop().await {
        warn!("⚠️ Error al detener el backend: {}", e);
    }
    "⏹️ Reproducción detenida y cola limpiada".to_string()
}

async fn handle_pause(bot: &MusicBot) -> String {
    if let Err(e) = bot.backend.pause().await {
        warn!("⚠️ Error al pausar el backend: {}", e);
    }
    "⏸️ Reproducción pausada/reanudada".to_string()
}

fn handle_queue(bot: &MusicBot) -> String {
    let entries = bot.engine.lock().snapshot();
    if entries.is_empty() {
        return "📭 La cola está vacía".to_string();
    }

    let mut msg = String::from("📋 Cola de reproducción:\n");
    for entry in entries {
        let prefix = if entry.is_current {
            "▶️".to_string()
        } else {
            format!("{}.", entry.position)
        };
        msg.push_str(&format!(
            "{} {} [{}] - {}\n",
            prefix,
            entry.track.title(),
            entry.track.format_duration(),
            entry.track.requester()
        ));
    }
    msg
}

fn handle_now_playing(bot: &MusicBot) -> String {
    match bot.engine.lock().now_playing() {
        Some(track) => format!(
            "🎵 Reproduciendo: {} [{}]",
            track.title(),
            track.format_duration()
        ),
        None => "❌ No hay nada reproduciéndose".to_string(),
    }
}

async fn handle_volume(bot: &MusicBot, args: &str) -> String {
    let level: u32 = match args.trim().parse() {
        Ok(level) => level,
        Err(_) => return "❌ Uso: !volume <0-100>".to_string(),
    };

    if level > 100 {
        return "❌ El volumen debe estar entre 0 y 100".to_string();
    }

    if let Err(e) = bot.backend.set_volume(level).await {
        warn!("⚠️ Error al ajustar volumen en el backend: {}", e);
    }
    format!("🔊 Volumen ajustado a {}%", level)
}
