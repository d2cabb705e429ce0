// ============================================
// Entities Module - Предметы и враги лабиринта
// ============================================

mod collectible;
mod enemy;

pub use collectible::*;
pub use enemy::*;

use ultraviolet::Vec3;

/// Квадрат расстояния в плоскости XZ
pub fn horizontal_distance_sq(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}
