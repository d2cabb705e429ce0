// ============================================
// Block Interaction System - Ломание и установка блоков
// ============================================

use crate::game::blocks::{TargetResult, VoxelTargetResolver};
use crate::game::player::Viewer;
use crate::game::terrain::{BlockEdit, VoxelWorld};

/// Система взаимодействия с блоками
pub struct BlockInteractionSystem;

impl BlockInteractionSystem {
    /// Колонна под прицелом (для подсветки)
    pub fn target(viewer: &Viewer, resolver: &VoxelTargetResolver, world: &VoxelWorld) -> TargetResult {
        resolver.resolve_viewer(viewer, world.map())
    }

    /// Левая кнопка мыши — сломать верхний блок
    pub fn handle_remove(
        viewer: &Viewer,
        resolver: &VoxelTargetResolver,
        world: &mut VoxelWorld,
    ) -> Option<BlockEdit> {
        let target = Self::target(viewer, resolver, world);
        let edit = world.remove_block(&target);
        if edit.is_none() {
            log::debug!("Nothing to remove within {:.1} at {:?}", resolver.reach(), target);
        }
        edit
    }

    /// Правая кнопка мыши — поставить блок на колонну
    pub fn handle_place(
        viewer: &Viewer,
        resolver: &VoxelTargetResolver,
        world: &mut VoxelWorld,
    ) -> Option<BlockEdit> {
        let target = Self::target(viewer, resolver, world);
        let edit = world.place_block(&target);
        if edit.is_none() {
            log::debug!("Cannot place within {:.1} at {:?}", resolver.reach(), target);
        }
        edit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::terrain::{BlockPos, HeightMap};
    use ultraviolet::Vec3;

    fn scenario() -> (Viewer, VoxelWorld) {
        let mut map = HeightMap::new(32, 3);
        map.set_height(4, 4, 2);
        // Над колонной (4, 4), взгляд почти вертикально вниз
        let viewer = Viewer::new(Vec3::new(-11.5, 0.5, -11.5), -90.0, -89.0);
        (viewer, VoxelWorld::new(map))
    }

    #[test]
    fn test_remove_then_place_round_trip() {
        let (viewer, mut world) = scenario();
        let resolver = VoxelTargetResolver::default();

        let removed = BlockInteractionSystem::handle_remove(&viewer, &resolver, &mut world).unwrap();
        assert_eq!(removed.pos, BlockPos::new(-12, 1, -12));
        assert_eq!(world.map().height(4, 4), 1);

        let placed = BlockInteractionSystem::handle_place(&viewer, &resolver, &mut world).unwrap();
        assert_eq!(placed.pos, BlockPos::new(-12, 1, -12));
        assert_eq!(world.map().height(4, 4), 2);
    }

    #[test]
    fn test_remove_until_empty_then_noop() {
        let (viewer, mut world) = scenario();
        let resolver = VoxelTargetResolver::default();

        assert!(BlockInteractionSystem::handle_remove(&viewer, &resolver, &mut world).is_some());
        assert!(BlockInteractionSystem::handle_remove(&viewer, &resolver, &mut world).is_some());
        assert_eq!(world.map().height(4, 4), 0);

        // Луч упирается в пол (gy = -1), но ломать нечего
        assert!(BlockInteractionSystem::handle_remove(&viewer, &resolver, &mut world).is_none());
        assert_eq!(world.map().height(4, 4), 0);
    }
}
