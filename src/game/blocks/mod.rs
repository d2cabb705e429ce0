// ============================================
// Blocks Module - Цель под прицелом
// ============================================

mod target;

pub use target::*;
