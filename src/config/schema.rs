use serde::Deserialize;

use crate::api::RecKind;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/recital/config.toml` or
/// `~/.config/recital/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RECITAL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub search: SearchSettings,
    pub player: PlayerSettings,
    pub notifications: NotificationSettings,
    pub ui: UiSettings,
    pub startup: StartupSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            search: SearchSettings::default(),
            player: PlayerSettings::default(),
            notifications: NotificationSettings::default(),
            ui: UiSettings::default(),
            startup: StartupSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Where the recommendation backend lives. No trailing slash needed.
    pub base_url: String,
    /// Anti-forgery token handed out by the backend, if any. Read once at
    /// startup.
    pub csrf_token: Option<String>,
    /// Per-request timeout (milliseconds).
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            csrf_token: None,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Quiet period before a typed query is sent (milliseconds).
    pub debounce_ms: u64,
    /// Queries shorter than this never fire.
    pub min_query_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Volume fraction the player starts with.
    pub default_volume: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self { default_volume: 0.8 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// How long a toast stays on screen (milliseconds).
    pub lifetime_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { lifetime_ms: 3000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Recommendation strategy selected at startup.
    pub default_recommendations: RecKind,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ What shall we listen to today? ~ ".to_string(),
            default_recommendations: RecKind::Hybrid,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StartupSettings {
    /// Delay before the service/storage health probes run (milliseconds).
    pub health_check_delay_ms: u64,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            health_check_delay_ms: 1000,
        }
    }
}
