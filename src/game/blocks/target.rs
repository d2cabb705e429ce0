// ============================================
// Target Resolver - Поиск колонны под прицелом
// ============================================
// Луч из глаз сэмплируется с фиксированным шагом (raymarch).
// Первая точка, лежащая внутри колонны, — цель.

use ultraviolet::Vec3;

use crate::game::player::Viewer;
use crate::game::terrain::HeightMap;

/// Число сэмплов луча по умолчанию
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Шаг луча по умолчанию (мировые единицы)
pub const DEFAULT_STEP_SIZE: f32 = 0.1;

/// Результат поиска цели
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetResult {
    /// Колонна сетки (может быть вне карты, если попадания нет)
    pub gx: i32,
    pub gz: i32,
    /// Индекс верхнего занятого блока колонны
    pub gy: i32,
    /// Индекс первой свободной ячейки над колонной
    pub place_above: i32,
    /// Найдена ли твёрдая колонна на дистанции луча
    pub hit: bool,
}

/// Raymarch по карте высот.
///
/// `direction` должен быть единичным — нормализация на вызывающей стороне.
/// Колонны вне карты считаются пустыми.
pub fn resolve(
    position: Vec3,
    direction: Vec3,
    map: &HeightMap,
    max_steps: u32,
    step_size: f32,
) -> TargetResult {
    for i in 0..max_steps {
        let point = position + direction * (i as f32 * step_size);
        let (gx, gz) = map.grid_of(point.x, point.z);
        let gy = point.y.floor() as i64;
        let height = map.height(gx, gz);

        if height as i64 > gy {
            let place_above = column_top(height);
            return TargetResult {
                gx,
                gz,
                gy: place_above - 1,
                place_above,
                hit: true,
            };
        }
    }

    // Попаданий нет: колонна под концом отрезка луча
    let end = position + direction * (max_steps as f32 * step_size);
    let (gx, gz) = map.grid_of(end.x, end.z);
    let height = column_top(map.height(gx, gz));

    TargetResult {
        gx,
        gz,
        gy: height,
        place_above: height,
        hit: false,
    }
}

/// Высота колонны в координатах блоков (колонны выше i32::MAX упираются в предел)
fn column_top(height: u32) -> i32 {
    i32::try_from(height).unwrap_or(i32::MAX)
}

/// Параметры луча для взаимодействия с блоками
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelTargetResolver {
    pub max_steps: u32,
    pub step_size: f32,
}

impl VoxelTargetResolver {
    pub fn new(max_steps: u32, step_size: f32) -> Self {
        Self { max_steps, step_size }
    }

    /// Дистанция луча
    pub fn reach(&self) -> f32 {
        self.max_steps as f32 * self.step_size
    }

    /// Цель для произвольного луча
    pub fn resolve(&self, position: Vec3, direction: Vec3, map: &HeightMap) -> TargetResult {
        resolve(position, direction, map, self.max_steps, self.step_size)
    }

    /// Цель по взгляду наблюдателя
    pub fn resolve_viewer(&self, viewer: &Viewer, map: &HeightMap) -> TargetResult {
        self.resolve(viewer.eye, viewer.forward(), map)
    }
}

impl Default for VoxelTargetResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS, DEFAULT_STEP_SIZE)
    }
}
