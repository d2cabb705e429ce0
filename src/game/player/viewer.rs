// ============================================
// Viewer - Глаза игрока (камера от первого лица)
// ============================================
// Позиция глаз + углы yaw/pitch в градусах.
// Движение только по горизонтали, с проверкой коллизий по карте высот.

use ultraviolet::Vec3;

use crate::game::terrain::HeightMap;

/// Высота глаз над полом
pub const EYE_HEIGHT: f32 = 0.5;

/// Ограничение pitch (не даём перевернуться)
pub const PITCH_LIMIT: f32 = 89.0;

/// Отступ хитбокса при проверке коллизий
pub const COLLISION_PADDING: f32 = 0.25;

/// Наблюдатель — позиция и направление взгляда
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    /// Позиция глаз
    pub eye: Vec3,

    /// Горизонтальный угол (градусы)
    pub yaw: f32,

    /// Вертикальный угол (градусы)
    pub pitch: f32,

    /// Высота, к которой глаза возвращаются после шага
    pub eye_height: f32,

    pub collision_padding: f32,
}

impl Viewer {
    pub fn new(eye: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            eye,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            eye_height: EYE_HEIGHT,
            collision_padding: COLLISION_PADDING,
        }
    }

    /// Направление взгляда (единичный вектор)
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalized()
    }

    /// Горизонтальное направление движения (без pitch)
    pub fn forward_horizontal(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.cos(), 0.0, yaw.sin()).normalized()
    }

    /// Горизонтальный вектор вправо
    pub fn right_horizontal(&self) -> Vec3 {
        self.forward_horizontal().cross(Vec3::unit_y()).normalized()
    }

    /// Поворот от мыши
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw += dx * sensitivity;
        self.pitch -= dy * sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn pan_left(&mut self, angle: f32) {
        self.yaw -= angle;
    }

    pub fn pan_right(&mut self, angle: f32) {
        self.yaw += angle;
    }

    pub fn move_forward(&mut self, speed: f32, map: &HeightMap) -> bool {
        let delta = self.forward_horizontal() * speed;
        self.try_move(delta, map)
    }

    pub fn move_backward(&mut self, speed: f32, map: &HeightMap) -> bool {
        let delta = -self.forward_horizontal() * speed;
        self.try_move(delta, map)
    }

    pub fn move_left(&mut self, speed: f32, map: &HeightMap) -> bool {
        let delta = -self.right_horizontal() * speed;
        self.try_move(delta, map)
    }

    pub fn move_right(&mut self, speed: f32, map: &HeightMap) -> bool {
        let delta = self.right_horizontal() * speed;
        self.try_move(delta, map)
    }

    /// Сдвинуть глаза, если новая позиция не задевает занятые колонны.
    /// Возвращает false, если шаг отклонён.
    pub fn try_move(&mut self, delta: Vec3, map: &HeightMap) -> bool {
        let proposed = self.eye + delta;
        if self.is_blocked(proposed, map) {
            return false;
        }

        self.eye = Vec3::new(proposed.x, self.eye_height, proposed.z);
        true
    }

    /// Проверка хитбокса: 3x3 точки вокруг позиции
    pub fn is_blocked(&self, pos: Vec3, map: &HeightMap) -> bool {
        let p = self.collision_padding;
        for dx in [-p, 0.0, p] {
            for dz in [-p, 0.0, p] {
                if map.height_at_world(pos.x + dx, pos.z + dz) > 0 {
                    return true;
                }
            }
        }
        false
    }
}
