// ============================================
// Config - Настройки игры из JSON
// ============================================
// Все поля имеют значения по умолчанию: в файле можно указать только то,
// что нужно поменять.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::blocks::{DEFAULT_MAX_STEPS, DEFAULT_STEP_SIZE};
use crate::game::player::{COLLISION_PADDING, EYE_HEIGHT};
use crate::game::terrain::{MazeLayout, MAP_SIZE, WALL_HEIGHT};

/// Файл настроек по умолчанию
pub const CONFIG_FILE: &str = "maze.json";

/// Переменная окружения с путём к файлу настроек
pub const CONFIG_ENV: &str = "MAZE_CONFIG";

/// Наибольшая допустимая сторона карты
pub const MAX_WORLD_SIZE: usize = 1024;

/// Ошибки загрузки настроек
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Раскладка лабиринта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub size: usize,
    pub wall_height: u32,
    pub pillar_spacing: usize,
    pub pillar_height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: MAP_SIZE,
            wall_height: WALL_HEIGHT,
            pillar_spacing: 4,
            pillar_height: 2,
        }
    }
}

impl WorldConfig {
    pub fn layout(&self) -> MazeLayout {
        MazeLayout {
            size: self.size,
            wall_height: self.wall_height,
            pillar_spacing: self.pillar_spacing,
            pillar_height: self.pillar_height,
        }
    }
}

/// Камера и управление
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub start: [f32; 3],
    /// Градусы
    pub yaw: f32,
    pub pitch: f32,
    pub eye_height: f32,
    /// Шаг за одно нажатие клавиши
    pub move_speed: f32,
    /// Поворот Q/E (градусы)
    pub pan_angle: f32,
    pub mouse_sensitivity: f32,
    pub collision_padding: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            start: [0.0, EYE_HEIGHT, 3.0],
            yaw: -90.0,
            pitch: 0.0,
            eye_height: EYE_HEIGHT,
            move_speed: 0.13,
            pan_angle: 3.0,
            mouse_sensitivity: 0.2,
            collision_padding: COLLISION_PADDING,
        }
    }
}

/// Луч ломания/установки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    pub max_steps: u32,
    pub step_size: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

/// Предметы и враги. Скорости в единицах/сек, интервалы в секундах.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    pub collectible_count: usize,
    pub pickup_radius: f32,
    pub enemy_speed: f32,
    pub catch_radius: f32,
    pub enemy_separation: f32,
    pub enemy_spawn_interval: f32,
    pub restart_delay_won: f32,
    pub restart_delay_lost: f32,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            collectible_count: 8,
            pickup_radius: 0.5,
            enemy_speed: 0.48,
            catch_radius: 0.5,
            enemy_separation: 0.6,
            enemy_spawn_interval: 5.0,
            restart_delay_won: 3.0,
            restart_delay_lost: 2.0,
        }
    }
}

/// Полные настройки игры
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub viewer: ViewerConfig,
    pub targeting: TargetingConfig,
    pub entities: EntityConfig,
    /// Сид генератора случайных чисел (None — случайный)
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Разобрать и проверить JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить из файла
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Загрузить из файла, при любой проблеме — значения по умолчанию
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Путь к файлу: MAZE_CONFIG или maze.json
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.world.size < 3 {
            return invalid("world.size must be at least 3");
        }
        if self.world.size > MAX_WORLD_SIZE {
            return invalid("world.size must not exceed 1024");
        }
        if self.world.wall_height == 0 {
            return invalid("world.wall_height must be positive");
        }
        if self.targeting.max_steps == 0 {
            return invalid("targeting.max_steps must be positive");
        }
        if !(self.targeting.step_size > 0.0) {
            return invalid("targeting.step_size must be positive");
        }
        if !(self.viewer.move_speed > 0.0) || !(self.viewer.mouse_sensitivity > 0.0) {
            return invalid("viewer speeds must be positive");
        }
        if self.viewer.collision_padding < 0.0 {
            return invalid("viewer.collision_padding must not be negative");
        }

        let e = &self.entities;
        let positive = [
            e.pickup_radius,
            e.enemy_speed,
            e.catch_radius,
            e.enemy_separation,
            e.enemy_spawn_interval,
        ];
        if positive.iter().any(|v| !(*v > 0.0)) {
            return invalid("entity radii, speeds and intervals must be positive");
        }
        if e.restart_delay_won < 0.0 || e.restart_delay_lost < 0.0 {
            return invalid("restart delays must not be negative");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.world.size, 32);
        assert_eq!(config.targeting.max_steps, 10);
        assert_eq!(config.entities.collectible_count, 8);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let json = r#"{ "seed": 7, "targeting": { "max_steps": 40 }, "viewer": { "pan_angle": 5.0 } }"#;
        let config = GameConfig::from_json(json).unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.targeting.max_steps, 40);
        assert_eq!(config.targeting.step_size, DEFAULT_STEP_SIZE);
        assert_eq!(config.viewer.pan_angle, 5.0);
        assert_eq!(config.viewer.move_speed, 0.13);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::from_json(r#"{ "targeting": { "step_size": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_json(r#"{ "world": { "size": 2 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_oversized_world_rejected() {
        let err = GameConfig::from_json(r#"{ "world": { "size": 100000 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let json = format!(r#"{{ "world": {{ "size": {} }} }}"#, MAX_WORLD_SIZE);
        assert_eq!(GameConfig::from_json(&json).unwrap().world.size, MAX_WORLD_SIZE);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ world: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse config"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("definitely_missing_maze_config.json");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("maze_config_test_malformed.json");
        fs::write(&path, "{ world: ").unwrap();

        assert!(matches!(GameConfig::load(&path), Err(ConfigError::Parse(_))));
        assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("maze_config_test_invalid.json");
        fs::write(&path, r#"{ "seed": 5, "targeting": { "step_size": 0.0 } }"#).unwrap();

        assert!(matches!(GameConfig::load(&path), Err(ConfigError::Invalid(_))));
        assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("maze_config_test_load.json");
        fs::write(&path, r#"{ "world": { "pillar_spacing": 6 } }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.world.layout().pillar_spacing, 6);

        fs::remove_file(&path).ok();
    }
}
