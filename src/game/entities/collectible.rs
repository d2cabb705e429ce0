// ============================================
// Collectibles - Предметы для сбора
// ============================================
// Собраны все — победа.

use rand::seq::SliceRandom;
use rand::Rng;
use ultraviolet::Vec3;

use super::horizontal_distance_sq;
use crate::game::terrain::HeightMap;

/// Высота предмета над полом
pub const COLLECTIBLE_HEIGHT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub id: usize,
    pub position: Vec3,
    pub collected: bool,
}

/// Набор предметов уровня
#[derive(Debug, Clone, Default)]
pub struct Collectibles {
    items: Vec<Collectible>,
}

impl Collectibles {
    pub fn new(items: Vec<Collectible>) -> Self {
        Self { items }
    }

    /// Разбросать `count` предметов по свободным внутренним колоннам.
    /// Клетки у стен и колонны с блоками пропускаются, позиции не повторяются.
    pub fn scatter<R: Rng + ?Sized>(count: usize, map: &HeightMap, rng: &mut R) -> Self {
        let limit = map.offset() - 1;
        let free: Vec<(i32, i32)> = map
            .iter_columns()
            .filter(|&(_, _, h)| h == 0)
            .map(|(gx, gz, _)| map.world_of(gx, gz))
            .filter(|&(x, z)| x > -limit && x < limit && z > -limit && z < limit)
            .collect();

        if free.len() < count {
            log::warn!("Only {} free cells for {} collectibles", free.len(), count);
        }

        let items = free
            .choose_multiple(rng, count)
            .enumerate()
            .map(|(id, &(x, z))| Collectible {
                id,
                position: Vec3::new(x as f32, COLLECTIBLE_HEIGHT, z as f32),
                collected: false,
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[Collectible] {
        &self.items
    }

    /// Собрать всё, что ближе `radius` по горизонтали. Возвращает id собранных.
    pub fn collect_near(&mut self, eye: Vec3, radius: f32) -> Vec<usize> {
        let radius_sq = radius * radius;
        let mut picked = Vec::new();

        for item in self.items.iter_mut().filter(|item| !item.collected) {
            if horizontal_distance_sq(item.position, eye) < radius_sq {
                item.collected = true;
                picked.push(item.id);
            }
        }

        picked
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn collected_count(&self) -> usize {
        self.items.iter().filter(|item| item.collected).count()
    }

    pub fn all_collected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.collected)
    }
}
