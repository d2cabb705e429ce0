// ============================================
// Session - Все ресурсы одной партии
// ============================================
// Один поток: сессией владеет обработчик событий окна,
// все изменения идут синхронно из колбэков.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::GameConfig;
use crate::game::entities::{Collectibles, Enemies};
use crate::game::systems::{InputController, Intent, IntentOutcome};
use crate::game::terrain::{BlockHandle, VoxelWorld};

/// Состояние партии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// События игрового цикла (для логов и заголовка окна)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Collected { id: usize, collected: usize, total: usize },
    Won,
    Caught,
    EnemySpawned(u64),
    EnemiesSeparated(usize),
    /// Изменённые колонны за кадр и версия мира после них
    WorldChanged { columns: usize, version: u64 },
    Restarted,
}

/// Ресурсы партии
pub struct GameSession {
    pub config: GameConfig,

    // World data
    pub world: VoxelWorld,

    // Input + camera
    pub controller: InputController,

    // Entities
    pub collectibles: Collectibles,
    pub enemies: Enemies,

    pub state: GameState,
    pub rng: StdRng,

    /// Секунды с начала партии
    pub elapsed: f32,

    /// Секунды до перезапуска после победы/поражения
    pub restart_timer: Option<f32>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut session = Self {
            world: VoxelWorld::generate(&config.world.layout()),
            controller: InputController::from_config(&config),
            collectibles: Collectibles::default(),
            enemies: Enemies::new(),
            state: GameState::Playing,
            rng,
            elapsed: 0.0,
            restart_timer: None,
            config,
        };
        session.populate();
        session
    }

    /// Новая партия с теми же настройками (RNG продолжает последовательность)
    pub fn restart(&mut self) {
        let grabbed = self.controller.cursor_grabbed();

        self.world = VoxelWorld::generate(&self.config.world.layout());
        self.controller = InputController::from_config(&self.config);
        self.controller.set_cursor_grabbed(grabbed);
        self.state = GameState::Playing;
        self.elapsed = 0.0;
        self.restart_timer = None;
        self.populate();

        log::info!("Session restarted");
    }

    /// Предметы и первый враг
    fn populate(&mut self) {
        let entities = &self.config.entities;

        self.collectibles = Collectibles::scatter(entities.collectible_count, self.world.map(), &mut self.rng);

        self.enemies = Enemies::new();
        let half_extent = self.half_extent();
        self.enemies.spawn(&mut self.rng, half_extent);
        self.enemies.reset_spawn_timer(entities.enemy_spawn_interval);
    }

    /// Половина стороны карты в мировых единицах
    pub fn half_extent(&self) -> f32 {
        self.world.map().offset() as f32
    }

    /// Применить намерение игрока. После конца партии ввод игнорируется.
    pub fn handle_intent(&mut self, intent: Intent) -> Option<IntentOutcome> {
        if self.state != GameState::Playing {
            return None;
        }

        let outcome = self.controller.apply(intent, &mut self.world);
        match outcome {
            IntentOutcome::Removed(Some(edit)) => log::info!(
                "Removed block {:?} at {:?}",
                edit.handle.map(BlockHandle::id),
                edit.pos.to_array()
            ),
            IntentOutcome::Placed(Some(edit)) => log::info!(
                "Placed block {:?} at {:?}",
                edit.handle.map(BlockHandle::id),
                edit.pos.to_array()
            ),
            _ => {}
        }
        Some(outcome)
    }

    /// Строка состояния для заголовка окна
    pub fn status_line(&self) -> String {
        let state = match self.state {
            GameState::Playing => "playing",
            GameState::Won => "you win!",
            GameState::Lost => "game over",
        };
        format!(
            "Block Maze - collected {}/{} - enemies {} - {}",
            self.collectibles.collected_count(),
            self.collectibles.total(),
            self.enemies.len(),
            state
        )
    }
}
