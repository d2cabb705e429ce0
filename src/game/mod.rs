// ============================================
// Game Module - Воксельный лабиринт
// ============================================
// Карта высот, луч выбора блока, камера от первого лица,
// предметы и враги. Рендеринг сюда не входит.

pub mod terrain;
pub mod blocks;
pub mod player;
pub mod entities;

pub mod core;
pub mod systems;

pub use self::core::app::run;
