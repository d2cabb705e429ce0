// ============================================
// Enemies - Враги, идущие к игроку
// ============================================
// Появляются в случайной точке карты и двигаются прямо к глазам игрока.
// Догнал — поражение.

use rand::Rng;
use ultraviolet::Vec3;

use super::horizontal_distance_sq;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub id: u64,
    pub position: Vec3,
}

/// Все враги уровня + таймер появления
#[derive(Debug, Clone, Default)]
pub struct Enemies {
    enemies: Vec<Enemy>,
    next_id: u64,
    /// Секунды до следующего появления
    spawn_timer: f32,
}

impl Enemies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Добавить врага в заданной точке
    pub fn push(&mut self, position: Vec3) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.enemies.push(Enemy { id, position });
        id
    }

    /// Новый враг в случайной точке [-half_extent, half_extent)^2 на полу
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, half_extent: f32) -> u64 {
        let x = rng.gen_range(-half_extent..half_extent);
        let z = rng.gen_range(-half_extent..half_extent);
        let id = self.push(Vec3::new(x, 0.0, z));
        log::debug!("Enemy {} spawned at ({:.2}, {:.2})", id, x, z);
        id
    }

    /// Отсчитать таймер; true — пора выпускать нового врага
    pub fn tick_spawn_timer(&mut self, dt: f32, interval: f32) -> bool {
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_timer += interval;
            // Не копим пропущенные появления после долгого кадра
            if self.spawn_timer <= 0.0 {
                self.spawn_timer = interval;
            }
            return true;
        }
        false
    }

    pub fn reset_spawn_timer(&mut self, interval: f32) {
        self.spawn_timer = interval;
    }

    /// Сдвинуть всех к цели на `speed * dt`
    pub fn advance(&mut self, target: Vec3, speed: f32, dt: f32) {
        let step = speed * dt;
        for enemy in &mut self.enemies {
            let to_target = target - enemy.position;
            let dist = to_target.mag();
            if dist <= f32::EPSILON {
                continue;
            }
            enemy.position += to_target * (step.min(dist) / dist);
        }
    }

    /// Кто-то ближе `radius` к цели по горизонтали
    pub fn any_within(&self, target: Vec3, radius: f32) -> bool {
        let radius_sq = radius * radius;
        self.enemies
            .iter()
            .any(|enemy| horizontal_distance_sq(enemy.position, target) < radius_sq)
    }

    /// Слипшиеся враги: более поздний удаляется, взамен появляется новый.
    /// Возвращает число замен.
    pub fn separate<R: Rng + ?Sized>(&mut self, separation: f32, rng: &mut R, half_extent: f32) -> usize {
        let separation_sq = separation * separation;
        let mut replaced = 0;

        let mut i = self.enemies.len();
        while i > 0 {
            i -= 1;
            let current = self.enemies[i].position;
            let overlaps = self.enemies[..i]
                .iter()
                .any(|other| horizontal_distance_sq(current, other.position) < separation_sq);

            if overlaps {
                self.enemies.remove(i);
                self.spawn(rng, half_extent);
                replaced += 1;
            }
        }

        replaced
    }
}
