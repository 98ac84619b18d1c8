use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use ts_music_bot::audiobot::{AudioBackend, AudioBotClient};
use ts_music_bot::bot::MusicBot;
use ts_music_bot::config::Config;
use ts_music_bot::monitor::PlaybackMonitor;
use ts_music_bot::sources::YtDlpResolver;

#[tokio::main]
async fn main() -> Result<()> {
    // Inicializar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ts_music_bot=debug".parse()?),
        )
        .init();

    info!("🎵 Iniciando TS Music Bot v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("{}", config.summary());

    if std::env::args().any(|arg| arg == "--health-check") {
        return health_check().await;
    }

    let backend: Arc<dyn AudioBackend> = Arc::new(AudioBotClient::new(
        &config.audiobot_api_url,
        config.audiobot_api_key.as_deref(),
        config.request_timeout,
    ));

    // Verificar conexión con TS3AudioBot antes de servir
    if let Err(e) = backend.status().await {
        error!("❌ No se pudo conectar con TS3AudioBot: {}", e);
        error!("API URL: {}", config.audiobot_api_url);
        error!("Asegúrate de que TS3AudioBot esté ejecutándose");
        anyhow::bail!("TS3AudioBot inalcanzable al iniciar");
    }
    info!("✅ Conectado con TS3AudioBot");

    let bot = MusicBot::new(Arc::clone(&backend), Arc::new(YtDlpResolver::new()));

    // Iniciar monitor de reproducción
    let shutdown = CancellationToken::new();
    let monitor = PlaybackMonitor::new(
        bot.engine(),
        Arc::clone(&backend),
        &config,
        shutdown.clone(),
    );
    let monitor_task = tokio::spawn(monitor.run());

    info!("✅ Bot iniciado correctamente");
    info!("Esperando comandos...");

    if let Err(e) = backend
        .send_message("🎵 MusicBot está listo! Usa !help para ver los comandos")
        .await
    {
        warn!("⚠️ No se pudo enviar el mensaje de inicio: {}", e);
    }

    tokio::signal::ctrl_c().await?;
    info!("⚠️ Señal de shutdown recibida, cerrando...");

    shutdown.cancel();

    // Despedida de mejor esfuerzo antes de salir
    if let Err(e) = backend
        .send_message("👋 MusicBot se está desconectando...")
        .await
    {
        warn!("⚠️ No se pudo enviar el mensaje de despedida: {}", e);
    }

    let _ = monitor_task.await;
    info!("👋 Bot detenido");

    Ok(())
}

/// Verifica dependencias críticas para orquestación de contenedores
async fn health_check() -> Result<()> {
    let yt_dlp = async_process::Command::new("yt-dlp")
        .arg("--version")
        .output()
        .await?;

    if yt_dlp.status.success() {
        println!("OK");
        Ok(())
    } else {
        anyhow::bail!("yt-dlp no disponible");
    }
}
