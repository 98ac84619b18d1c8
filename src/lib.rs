//! # TS Music Bot
//!
//! Bot de música para TeamSpeak 3 integrado con TS3AudioBot.
//!
//! El crate se organiza en tres capas:
//!
//! - Fronteras de I/O: [`audiobot`] (API HTTP de TS3AudioBot) y
//!   [`sources`] (resolución de metadata con yt-dlp).
//! - Núcleo: [`queue`] (cola y estado local de reproducción),
//!   [`monitor`] (reconciliación periódica contra el backend) y
//!   [`bot`] (despacho de comandos de texto).
//! - Soporte: [`config`] y [`error`].
//!
//! El transporte de chat no vive acá: quien integre el bot llama a
//! [`bot::MusicBot::handle_text_command`] con cada comando recibido.

pub mod audiobot;
pub mod bot;
pub mod config;
pub mod error;
pub mod monitor;
pub mod queue;
pub mod sources;
