// ============================================
// Voxel World - Карта высот + индекс блоков
// ============================================
// Единый владелец сетки и рендер-блоков: ломание и установка
// обновляют карту высот и индекс ячейка -> блок за один вызов.

use std::collections::{BTreeMap, HashMap};

use super::heightmap::HeightMap;
use super::worldgen::{generate_heightmap, MazeLayout};
use crate::game::blocks::TargetResult;

/// Позиция блока в мировых целых координатах
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Идентификатор рендер-блока. Порядок handle = порядок отрисовки (вставки).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockHandle(u64);

impl BlockHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Результат изменения мира
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEdit {
    /// Позиция добавленного/удалённого блока
    pub pos: BlockPos,
    /// Рендер-блок (None, если индекс не знал этой ячейки)
    pub handle: Option<BlockHandle>,
    /// Высота колонны после изменения
    pub column_height: u32,
}

/// Воксельный мир лабиринта
pub struct VoxelWorld {
    map: HeightMap,

    /// Ячейка -> рендер-блок
    blocks: HashMap<BlockPos, BlockHandle>,

    /// Рендер-блоки в порядке вставки
    render_order: BTreeMap<BlockHandle, BlockPos>,

    next_handle: u64,

    /// Колонны (gx, gz), изменённые с последнего take_dirty_columns
    dirty_columns: Vec<(i32, i32)>,

    /// Версия мира (инкрементируется при каждом изменении)
    version: u64,
}

impl VoxelWorld {
    /// Мир по готовой карте: на каждую единицу высоты — рендер-блок
    pub fn new(map: HeightMap) -> Self {
        let mut world = Self {
            map,
            blocks: HashMap::new(),
            render_order: BTreeMap::new(),
            next_handle: 0,
            dirty_columns: Vec::new(),
            version: 0,
        };

        let columns: Vec<(i32, i32, u32)> = world.map.iter_columns().collect();
        for (gx, gz, height) in columns {
            let (wx, wz) = world.map.world_of(gx, gz);
            for y in 0..height as i32 {
                world.insert_block(BlockPos::new(wx, y, wz));
            }
        }

        world
    }

    /// Сгенерировать мир по раскладке лабиринта
    pub fn generate(layout: &MazeLayout) -> Self {
        let world = Self::new(generate_heightmap(layout));
        log::info!(
            "World ready: {}x{} columns, {} blocks",
            world.map.size(),
            world.map.size(),
            world.block_count()
        );
        world
    }

    pub fn map(&self) -> &HeightMap {
        &self.map
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Рендер-блок в ячейке (мировые координаты)
    pub fn block_at(&self, pos: BlockPos) -> Option<BlockHandle> {
        self.blocks.get(&pos).copied()
    }

    /// Рендер-блоки в порядке отрисовки
    pub fn iter_blocks(&self) -> impl Iterator<Item = (BlockHandle, BlockPos)> + '_ {
        self.render_order.iter().map(|(&handle, &pos)| (handle, pos))
    }

    /// Сломать верхний блок колонны под прицелом.
    ///
    /// Только при попадании, в пределах карты, не стена и колонна не пуста.
    pub fn remove_block(&mut self, target: &TargetResult) -> Option<BlockEdit> {
        if !target.hit || !self.is_mutable_column(target.gx, target.gz) {
            return None;
        }

        let height = self.map.height(target.gx, target.gz);
        if height == 0 {
            return None;
        }

        // Сначала карта, потом индекс
        let column_height = height - 1;
        self.map.set_height(target.gx, target.gz, column_height);

        let (wx, wz) = self.map.world_of(target.gx, target.gz);
        let pos = BlockPos::new(wx, target.gy, wz);
        let handle = self.blocks.remove(&pos);
        match handle {
            Some(handle) => {
                self.render_order.remove(&handle);
            }
            None => log::warn!("No render block at {:?} while removing", pos),
        }

        self.mark_dirty(target.gx, target.gz);
        log::debug!("Removed block at {:?}, column height {}", pos, column_height);

        Some(BlockEdit { pos, handle, column_height })
    }

    /// Поставить блок над колонной под прицелом.
    ///
    /// Работает и без попадания (колонна под концом луча).
    /// Высота колонны не ограничена сверху.
    pub fn place_block(&mut self, target: &TargetResult) -> Option<BlockEdit> {
        if !self.is_mutable_column(target.gx, target.gz) {
            return None;
        }

        let column_height = self.map.height(target.gx, target.gz).saturating_add(1);
        self.map.set_height(target.gx, target.gz, column_height);

        let (wx, wz) = self.map.world_of(target.gx, target.gz);
        let pos = BlockPos::new(wx, target.place_above, wz);
        let handle = self.insert_block(pos);

        self.mark_dirty(target.gx, target.gz);
        log::debug!("Placed block at {:?}, column height {}", pos, column_height);

        Some(BlockEdit { pos, handle: Some(handle), column_height })
    }

    /// Получить и очистить список изменённых колонн
    pub fn take_dirty_columns(&mut self) -> Vec<(i32, i32)> {
        std::mem::take(&mut self.dirty_columns)
    }

    pub fn has_dirty_columns(&self) -> bool {
        !self.dirty_columns.is_empty()
    }

    fn is_mutable_column(&self, gx: i32, gz: i32) -> bool {
        self.map.in_bounds(gx, gz) && !self.map.is_border(gx, gz)
    }

    fn insert_block(&mut self, pos: BlockPos) -> BlockHandle {
        let handle = BlockHandle(self.next_handle);
        self.next_handle += 1;

        if let Some(previous) = self.blocks.insert(pos, handle) {
            self.render_order.remove(&previous);
        }
        self.render_order.insert(handle, pos);
        handle
    }

    fn mark_dirty(&mut self, gx: i32, gz: i32) {
        self.version += 1;
        if !self.dirty_columns.contains(&(gx, gz)) {
            self.dirty_columns.push((gx, gz));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_world() -> VoxelWorld {
        let mut map = HeightMap::new(32, 3);
        map.set_height(4, 4, 2);
        VoxelWorld::new(map)
    }

    fn hit_at(gx: i32, gz: i32, height: i32) -> TargetResult {
        TargetResult { gx, gz, gy: height - 1, place_above: height, hit: true }
    }

    #[test]
    fn test_blocks_mirror_heightmap() {
        let world = VoxelWorld::generate(&MazeLayout::default());
        assert_eq!(world.block_count() as u64, world.map().total_blocks());
        assert!(world.block_at(BlockPos::new(-12, 1, -12)).is_some());
        assert!(world.block_at(BlockPos::new(-12, 2, -12)).is_none());
        assert!(world.block_at(BlockPos::new(-16, 2, 0)).is_some());
    }

    #[test]
    fn test_remove_then_place_restores_height() {
        let mut world = scenario_world();
        let before = world.block_count();

        let removed = world.remove_block(&hit_at(4, 4, 2)).expect("block removed");
        assert_eq!(removed.pos, BlockPos::new(-12, 1, -12));
        assert!(removed.handle.is_some());
        assert_eq!(world.map().height(4, 4), 1);
        assert!(world.block_at(removed.pos).is_none());

        let placed = world.place_block(&hit_at(4, 4, 1)).expect("block placed");
        assert_eq!(placed.pos, BlockPos::new(-12, 1, -12));
        assert_eq!(placed.column_height, 2);
        assert_eq!(world.map().height(4, 4), 2);
        assert_eq!(world.block_count(), before);
        assert_eq!(world.block_at(placed.pos), placed.handle);
    }

    #[test]
    fn test_remove_requires_hit() {
        let mut world = scenario_world();
        let miss = TargetResult { hit: false, ..hit_at(4, 4, 2) };
        assert!(world.remove_block(&miss).is_none());
        assert_eq!(world.map().height(4, 4), 2);
        assert_eq!(world.version(), 0);
    }

    #[test]
    fn test_remove_from_empty_column_is_noop() {
        let mut world = scenario_world();
        assert!(world.remove_block(&hit_at(5, 5, 0)).is_none());
        assert_eq!(world.map().height(5, 5), 0);
    }

    #[test]
    fn test_out_of_bounds_and_walls_are_noops() {
        let mut world = scenario_world();
        let count = world.block_count();

        assert!(world.remove_block(&hit_at(-1, 4, 1)).is_none());
        assert!(world.place_block(&hit_at(40, 4, 0)).is_none());
        assert!(world.remove_block(&hit_at(0, 4, 3)).is_none());
        assert!(world.place_block(&hit_at(31, 9, 3)).is_none());

        assert_eq!(world.block_count(), count);
        assert_eq!(world.map().height(0, 4), 3);
        assert!(!world.has_dirty_columns());
    }

    #[test]
    fn test_place_without_hit_stacks_on_end_column() {
        let mut world = scenario_world();
        let miss = TargetResult { gx: 10, gz: 12, gy: 0, place_above: 0, hit: false };

        let edit = world.place_block(&miss).expect("placed on floor");
        assert_eq!(edit.pos, BlockPos::new(-6, 0, -4));
        assert_eq!(world.map().height(10, 12), 1);
    }

    #[test]
    fn test_place_is_unbounded() {
        let mut world = scenario_world();
        for h in 2..40 {
            let edit = world.place_block(&hit_at(4, 4, h)).expect("placed");
            assert_eq!(edit.column_height, h as u32 + 1);
        }
        assert_eq!(world.map().height(4, 4), 40);
    }

    #[test]
    fn test_render_order_follows_insertion() {
        let mut world = scenario_world();
        let first = world.place_block(&hit_at(7, 7, 0)).and_then(|e| e.handle);
        let second = world.place_block(&hit_at(8, 7, 0)).and_then(|e| e.handle);

        let handles: Vec<BlockHandle> = world.iter_blocks().map(|(h, _)| h).collect();
        assert_eq!(&handles[handles.len() - 2..], &[first.unwrap(), second.unwrap()]);
    }

    #[test]
    fn test_dirty_columns_and_version() {
        let mut world = scenario_world();
        world.place_block(&hit_at(7, 7, 0));
        world.place_block(&hit_at(7, 7, 1));
        world.remove_block(&hit_at(4, 4, 2));

        assert_eq!(world.version(), 3);
        assert_eq!(world.take_dirty_columns(), vec![(7, 7), (4, 4)]);
        assert!(!world.has_dirty_columns());
    }
}
