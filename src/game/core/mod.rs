// ============================================
// Core Module - Основные компоненты и ресурсы
// ============================================

pub mod app;
mod config;
mod session;

pub use app::App;
pub use config::{
    ConfigError, EntityConfig, GameConfig, TargetingConfig, ViewerConfig, WorldConfig, CONFIG_ENV, CONFIG_FILE,
    MAX_WORLD_SIZE,
};
pub use session::{GameEvent, GameSession, GameState};
