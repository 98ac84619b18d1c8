use thiserror::Error;

/// Fallos al hablar con la API de TS3AudioBot.
///
/// Todos son recuperables: los handlers de comandos responden un mensaje
/// genérico y el monitor reintenta en el próximo tick.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("error de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("respuesta HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("respuesta inválida del backend: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Fallos al resolver una búsqueda o URL en metadata de track.
///
/// Para el router de comandos todas las variantes colapsan en la misma
/// respuesta de "no se pudo procesar".
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no se pudo ejecutar yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("yt-dlp falló: {0}")]
    Extraction(String),

    #[error("salida de yt-dlp inválida: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sin resultados para la búsqueda")]
    NoResults,

    #[error("timeout al resolver la búsqueda")]
    Timeout,
}
