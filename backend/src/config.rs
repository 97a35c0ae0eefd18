//! Application configuration
//!
//! Sources are merged with the following priority (lowest to highest):
//! 1. built-in defaults
//! 2. `config/default.toml`
//! 3. `config/user.toml` (optional local overrides)
//! 4. Environment variables (`LEARNGL_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "LEARNGL_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub gl: GlConfig,
    #[serde(default)]
    pub shaders: ShaderConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory next to the working
    /// directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // LEARNGL_WINDOW__WIDTH=1024 -> window.width = 1024
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    /// Initial width in pixels
    pub width: u32,
    /// Initial height in pixels
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            vsync: true,
        }
    }
}

/// Requested OpenGL context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlConfig {
    pub major: u8,
    pub minor: u8,
    /// Required for core profiles on macOS.
    pub forward_compat: bool,
}

impl Default for GlConfig {
    fn default() -> Self {
        Self {
            major: 3,
            minor: 3,
            forward_compat: cfg!(target_os = "macos"),
        }
    }
}

/// Shader source files, relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderConfig {
    pub vertex: String,
    pub fragment: String,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex: "resources/shaders/shader.vs".to_string(),
            fragment: "resources/shaders/shader.fs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `env_logger` filter, e.g. "info" or "backend=debug"
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
