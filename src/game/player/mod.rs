// ============================================
// Player Module - Наблюдатель (камера от первого лица)
// ============================================

mod viewer;

pub use viewer::*;
