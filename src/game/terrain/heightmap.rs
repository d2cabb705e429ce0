// ============================================
// Height Map - Карта высот колонн лабиринта
// ============================================
// Квадратная сетка size x size, в каждой ячейке — число блоков в колонне.
// Мировые координаты = координаты сетки - offset (карта центрирована в нуле).
// Граничные колонны — постоянные стены фиксированной высоты.

/// Размер карты по умолчанию
pub const MAP_SIZE: usize = 32;

/// Высота граничных стен по умолчанию
pub const WALL_HEIGHT: u32 = 3;

/// Карта высот
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    size: usize,
    offset: i32,
    wall_height: u32,
    /// Высоты колонн, индекс = gx * size + gz
    columns: Vec<u32>,
}

impl HeightMap {
    /// Пустая карта с уже выставленными граничными стенами
    pub fn new(size: usize, wall_height: u32) -> Self {
        let mut map = Self {
            size,
            offset: (size / 2) as i32,
            wall_height,
            columns: vec![0; size * size],
        };

        for gx in 0..size as i32 {
            for gz in 0..size as i32 {
                if map.is_border(gx, gz) {
                    let idx = map.index(gx, gz);
                    map.columns[idx] = wall_height;
                }
            }
        }

        map
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Смещение мир -> сетка
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn wall_height(&self) -> u32 {
        self.wall_height
    }

    pub fn in_bounds(&self, gx: i32, gz: i32) -> bool {
        gx >= 0 && gz >= 0 && (gx as usize) < self.size && (gz as usize) < self.size
    }

    /// Граничная колонна (стена, не изменяется)
    pub fn is_border(&self, gx: i32, gz: i32) -> bool {
        let last = self.size as i32 - 1;
        self.in_bounds(gx, gz) && (gx == 0 || gz == 0 || gx == last || gz == last)
    }

    /// Высота колонны. Вне карты — 0 (нет блока)
    pub fn height(&self, gx: i32, gz: i32) -> u32 {
        if self.in_bounds(gx, gz) {
            self.columns[self.index(gx, gz)]
        } else {
            0
        }
    }

    /// Установить высоту внутренней колонны.
    /// Возвращает false для стен и координат вне карты.
    pub fn set_height(&mut self, gx: i32, gz: i32, height: u32) -> bool {
        if !self.in_bounds(gx, gz) || self.is_border(gx, gz) {
            return false;
        }
        let idx = self.index(gx, gz);
        self.columns[idx] = height;
        true
    }

    /// Колонна сетки под мировой точкой (x, z)
    pub fn grid_of(&self, x: f32, z: f32) -> (i32, i32) {
        (
            (x + self.offset as f32).floor() as i32,
            (z + self.offset as f32).floor() as i32,
        )
    }

    /// Мировые целые координаты колонны сетки
    pub fn world_of(&self, gx: i32, gz: i32) -> (i32, i32) {
        (gx - self.offset, gz - self.offset)
    }

    /// Высота колонны под мировой точкой
    pub fn height_at_world(&self, x: f32, z: f32) -> u32 {
        let (gx, gz) = self.grid_of(x, z);
        self.height(gx, gz)
    }

    /// Все колонны (gx, gz, height) в порядке обхода сетки
    pub fn iter_columns(&self) -> impl Iterator<Item = (i32, i32, u32)> + '_ {
        let size = self.size;
        self.columns
            .iter()
            .enumerate()
            .map(move |(i, &h)| ((i / size) as i32, (i % size) as i32, h))
    }

    /// Суммарное число блоков на карте
    pub fn total_blocks(&self) -> u64 {
        self.columns.iter().map(|&h| h as u64).sum()
    }

    fn index(&self, gx: i32, gz: i32) -> usize {
        gx as usize * self.size + gz as usize
    }
}

impl Default for HeightMap {
    fn default() -> Self {
        Self::new(MAP_SIZE, WALL_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_walls_seeded() {
        let map = HeightMap::default();
        assert_eq!(map.height(0, 0), WALL_HEIGHT);
        assert_eq!(map.height(0, 17), WALL_HEIGHT);
        assert_eq!(map.height(31, 5), WALL_HEIGHT);
        assert_eq!(map.height(12, 31), WALL_HEIGHT);
        assert_eq!(map.height(1, 1), 0);
        assert_eq!(map.height(16, 16), 0);
    }

    #[test]
    fn test_out_of_bounds_reads_as_empty() {
        let map = HeightMap::default();
        assert_eq!(map.height(-1, 4), 0);
        assert_eq!(map.height(4, 32), 0);
        assert_eq!(map.height(i32::MAX, i32::MIN), 0);
    }

    #[test]
    fn test_walls_are_immutable() {
        let mut map = HeightMap::default();
        assert!(!map.set_height(0, 4, 0));
        assert!(!map.set_height(-3, 4, 7));
        assert_eq!(map.height(0, 4), WALL_HEIGHT);

        assert!(map.set_height(4, 4, 2));
        assert_eq!(map.height(4, 4), 2);
    }

    #[test]
    fn test_grid_world_conversion() {
        let map = HeightMap::default();
        assert_eq!(map.offset(), 16);
        assert_eq!(map.grid_of(-12.0, -12.0), (4, 4));
        assert_eq!(map.grid_of(-16.0, 15.99), (0, 31));
        assert_eq!(map.grid_of(-16.01, 0.0), (-1, 16));
        assert_eq!(map.world_of(4, 4), (-12, -12));
    }

    #[test]
    fn test_iter_columns_matches_height() {
        let mut map = HeightMap::new(6, 1);
        map.set_height(2, 3, 4);
        for (gx, gz, h) in map.iter_columns() {
            assert_eq!(map.height(gx, gz), h);
        }
        // 20 граничных колонн по 1 + колонна высотой 4
        assert_eq!(map.total_blocks(), 24);
    }
}
