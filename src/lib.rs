pub mod game;

pub use game::blocks::{resolve, TargetResult, VoxelTargetResolver};
pub use game::terrain::{HeightMap, VoxelWorld};
