// ============================================
// Update System - Обновление игровой логики
// ============================================

use crate::game::core::{GameEvent, GameSession, GameState};

/// Система обновления игровой логики
pub struct UpdateSystem;

impl UpdateSystem {
    /// Основной цикл обновления (раз в кадр)
    pub fn update(session: &mut GameSession, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        // Правки мира за кадр (ломание/установка из обработчиков ввода)
        Self::drain_world_changes(session, &mut events);

        if session.state != GameState::Playing {
            Self::update_restart(session, dt, &mut events);
            return events;
        }

        session.elapsed += dt;

        // 1. Враги: появление, движение, поимка
        Self::update_enemies(session, dt, &mut events);
        if session.state != GameState::Playing {
            return events;
        }

        // 2. Предметы
        Self::update_collectibles(session, &mut events);

        // 3. Разводим слипшихся врагов
        let half_extent = session.half_extent();
        let separation = session.config.entities.enemy_separation;
        let replaced = session.enemies.separate(separation, &mut session.rng, half_extent);
        if replaced > 0 {
            events.push(GameEvent::EnemiesSeparated(replaced));
        }

        events
    }

    fn drain_world_changes(session: &mut GameSession, events: &mut Vec<GameEvent>) {
        if !session.world.has_dirty_columns() {
            return;
        }
        let columns = session.world.take_dirty_columns().len();
        events.push(GameEvent::WorldChanged {
            columns,
            version: session.world.version(),
        });
    }

    fn update_enemies(session: &mut GameSession, dt: f32, events: &mut Vec<GameEvent>) {
        let entities = session.config.entities.clone();
        let half_extent = session.half_extent();

        if session.enemies.tick_spawn_timer(dt, entities.enemy_spawn_interval) {
            let id = session.enemies.spawn(&mut session.rng, half_extent);
            events.push(GameEvent::EnemySpawned(id));
        }

        let eye = session.controller.viewer().eye;
        session.enemies.advance(eye, entities.enemy_speed, dt);

        if session.enemies.any_within(eye, entities.catch_radius) {
            log::info!("Caught by an enemy after {:.1}s", session.elapsed);
            session.state = GameState::Lost;
            session.restart_timer = Some(entities.restart_delay_lost);
            events.push(GameEvent::Caught);
        }
    }

    fn update_collectibles(session: &mut GameSession, events: &mut Vec<GameEvent>) {
        let eye = session.controller.viewer().eye;
        let radius = session.config.entities.pickup_radius;
        let total = session.collectibles.total();

        for id in session.collectibles.collect_near(eye, radius) {
            let collected = session.collectibles.collected_count();
            log::info!("Collected item {} ({}/{})", id, collected, total);
            events.push(GameEvent::Collected { id, collected, total });
        }

        if session.collectibles.all_collected() {
            log::info!("All items collected in {:.1}s", session.elapsed);
            session.state = GameState::Won;
            session.restart_timer = Some(session.config.entities.restart_delay_won);
            events.push(GameEvent::Won);
        }
    }

    fn update_restart(session: &mut GameSession, dt: f32, events: &mut Vec<GameEvent>) {
        let Some(timer) = session.restart_timer.as_mut() else { return };
        *timer -= dt;
        if *timer <= 0.0 {
            session.restart();
            events.push(GameEvent::Restarted);
        }
    }
}
