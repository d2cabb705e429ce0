// ============================================
// Terrain Module - Карта высот и мир лабиринта
// ============================================

pub mod heightmap;
pub mod worldgen;
pub mod voxel_world;

// Re-exports
pub use heightmap::{HeightMap, MAP_SIZE, WALL_HEIGHT};
pub use worldgen::{generate_heightmap, MazeLayout};
pub use voxel_world::{BlockEdit, BlockHandle, BlockPos, VoxelWorld};
