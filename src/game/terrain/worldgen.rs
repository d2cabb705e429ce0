// ============================================
// World Generation - Генерация лабиринта
// ============================================
// Стены по периметру + редкая сетка колонн внутри

use super::heightmap::{HeightMap, MAP_SIZE, WALL_HEIGHT};

/// Параметры раскладки лабиринта
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeLayout {
    pub size: usize,
    pub wall_height: u32,
    /// Шаг сетки колонн (колонна там, где gx % spacing == 0 && gz % spacing == 0)
    pub pillar_spacing: usize,
    pub pillar_height: u32,
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self {
            size: MAP_SIZE,
            wall_height: WALL_HEIGHT,
            pillar_spacing: 4,
            pillar_height: 2,
        }
    }
}

/// Построить карту высот по раскладке
pub fn generate_heightmap(layout: &MazeLayout) -> HeightMap {
    let mut map = HeightMap::new(layout.size, layout.wall_height);

    if layout.pillar_spacing == 0 || layout.pillar_height == 0 {
        return map;
    }

    let mut pillars = 0;
    for gx in 0..layout.size {
        for gz in 0..layout.size {
            if gx % layout.pillar_spacing == 0 && gz % layout.pillar_spacing == 0 {
                // На стенах set_height ничего не делает
                if map.set_height(gx as i32, gz as i32, layout.pillar_height) {
                    pillars += 1;
                }
            }
        }
    }

    log::debug!(
        "Generated {}x{} maze: {} pillars, {} blocks",
        layout.size,
        layout.size,
        pillars,
        map.total_blocks()
    );

    map
}
