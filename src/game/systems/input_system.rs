// ============================================
// Input System - Обработка ввода
// ============================================
// InputController владеет наблюдателем и превращает клавиши/мышь в намерения.
// Намерения применяются к миру синхронно, в обработчике события.

use ultraviolet::Vec3;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use super::block_interaction_system::BlockInteractionSystem;
use crate::game::blocks::VoxelTargetResolver;
use crate::game::core::GameConfig;
use crate::game::player::Viewer;
use crate::game::terrain::{BlockEdit, VoxelWorld};

/// Намерения игрока
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    PanLeft,
    PanRight,
    Look { dx: f32, dy: f32 },
    RemoveBlock,
    PlaceBlock,
}

/// Результат применения намерения
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntentOutcome {
    /// Шаг сделан (false — упёрлись в колонну)
    Moved(bool),
    Turned,
    Removed(Option<BlockEdit>),
    Placed(Option<BlockEdit>),
}

/// Контроллер ввода — наблюдатель + настройки управления
pub struct InputController {
    viewer: Viewer,
    resolver: VoxelTargetResolver,

    pub move_speed: f32,
    pub pan_angle: f32,
    pub sensitivity: f32,

    /// Захвачен ли курсор (иначе мышь не вращает камеру)
    cursor_grabbed: bool,
}

impl InputController {
    pub fn new(viewer: Viewer, resolver: VoxelTargetResolver) -> Self {
        Self {
            viewer,
            resolver,
            move_speed: 0.13,
            pan_angle: 3.0,
            sensitivity: 0.2,
            cursor_grabbed: false,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let v = &config.viewer;
        let mut viewer = Viewer::new(Vec3::new(v.start[0], v.start[1], v.start[2]), v.yaw, v.pitch);
        viewer.eye_height = v.eye_height;
        viewer.collision_padding = v.collision_padding;

        let resolver = VoxelTargetResolver::new(config.targeting.max_steps, config.targeting.step_size);

        let mut controller = Self::new(viewer, resolver);
        controller.move_speed = v.move_speed;
        controller.pan_angle = v.pan_angle;
        controller.sensitivity = v.mouse_sensitivity;
        controller
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn resolver(&self) -> &VoxelTargetResolver {
        &self.resolver
    }

    pub fn cursor_grabbed(&self) -> bool {
        self.cursor_grabbed
    }

    pub fn set_cursor_grabbed(&mut self, grabbed: bool) {
        self.cursor_grabbed = grabbed;
    }

    /// Клавиша -> намерение (только нажатия, повторы тоже двигают)
    pub fn process_keyboard(&self, keycode: KeyCode, pressed: bool) -> Option<Intent> {
        if !pressed {
            return None;
        }
        match keycode {
            KeyCode::KeyW => Some(Intent::MoveForward),
            KeyCode::KeyS => Some(Intent::MoveBackward),
            KeyCode::KeyA => Some(Intent::StrafeLeft),
            KeyCode::KeyD => Some(Intent::StrafeRight),
            KeyCode::KeyQ => Some(Intent::PanLeft),
            KeyCode::KeyE => Some(Intent::PanRight),
            _ => None,
        }
    }

    /// Кнопка мыши -> намерение
    pub fn process_mouse_button(&self, button: MouseButton, pressed: bool) -> Option<Intent> {
        if !pressed || !self.cursor_grabbed {
            return None;
        }
        match button {
            MouseButton::Left => Some(Intent::RemoveBlock),
            MouseButton::Right => Some(Intent::PlaceBlock),
            _ => None,
        }
    }

    /// Движение мыши -> поворот (только при захваченном курсоре)
    pub fn process_mouse_motion(&self, delta: (f64, f64)) -> Option<Intent> {
        if !self.cursor_grabbed {
            return None;
        }
        Some(Intent::Look {
            dx: delta.0 as f32,
            dy: delta.1 as f32,
        })
    }

    /// Применить намерение к наблюдателю/миру
    pub fn apply(&mut self, intent: Intent, world: &mut VoxelWorld) -> IntentOutcome {
        let speed = self.move_speed;
        match intent {
            Intent::MoveForward => IntentOutcome::Moved(self.viewer.move_forward(speed, world.map())),
            Intent::MoveBackward => IntentOutcome::Moved(self.viewer.move_backward(speed, world.map())),
            Intent::StrafeLeft => IntentOutcome::Moved(self.viewer.move_left(speed, world.map())),
            Intent::StrafeRight => IntentOutcome::Moved(self.viewer.move_right(speed, world.map())),
            Intent::PanLeft => {
                self.viewer.pan_left(self.pan_angle);
                IntentOutcome::Turned
            }
            Intent::PanRight => {
                self.viewer.pan_right(self.pan_angle);
                IntentOutcome::Turned
            }
            Intent::Look { dx, dy } => {
                self.viewer.look(dx, dy, self.sensitivity);
                IntentOutcome::Turned
            }
            Intent::RemoveBlock => IntentOutcome::Removed(BlockInteractionSystem::handle_remove(
                &self.viewer,
                &self.resolver,
                world,
            )),
            Intent::PlaceBlock => IntentOutcome::Placed(BlockInteractionSystem::handle_place(
                &self.viewer,
                &self.resolver,
                world,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::terrain::MazeLayout;
    use approx::assert_relative_eq;

    fn controller() -> InputController {
        InputController::from_config(&GameConfig::default())
    }

    #[test]
    fn test_key_mapping() {
        let c = controller();
        assert_eq!(c.process_keyboard(KeyCode::KeyW, true), Some(Intent::MoveForward));
        assert_eq!(c.process_keyboard(KeyCode::KeyD, true), Some(Intent::StrafeRight));
        assert_eq!(c.process_keyboard(KeyCode::KeyQ, true), Some(Intent::PanLeft));
        assert_eq!(c.process_keyboard(KeyCode::KeyW, false), None);
        assert_eq!(c.process_keyboard(KeyCode::F5, true), None);
    }

    #[test]
    fn test_mouse_requires_grabbed_cursor() {
        let mut c = controller();
        assert_eq!(c.process_mouse_button(MouseButton::Left, true), None);
        assert_eq!(c.process_mouse_motion((4.0, 2.0)), None);

        c.set_cursor_grabbed(true);
        assert_eq!(c.process_mouse_button(MouseButton::Left, true), Some(Intent::RemoveBlock));
        assert_eq!(c.process_mouse_button(MouseButton::Right, true), Some(Intent::PlaceBlock));
        assert_eq!(c.process_mouse_button(MouseButton::Middle, true), None);
        assert_eq!(
            c.process_mouse_motion((4.0, 2.0)),
            Some(Intent::Look { dx: 4.0, dy: 2.0 })
        );
    }

    #[test]
    fn test_apply_movement_and_look() {
        let mut world = VoxelWorld::generate(&MazeLayout::default());
        let mut c = controller();
        let start = c.viewer().eye;

        // Старт (0, 0.5, 3), взгляд в -z, впереди свободно
        assert_eq!(c.apply(Intent::MoveForward, &mut world), IntentOutcome::Moved(true));
        assert_relative_eq!(c.viewer().eye.z, start.z - 0.13, epsilon = 1e-5);

        c.apply(Intent::Look { dx: 10.0, dy: 5.0 }, &mut world);
        assert_relative_eq!(c.viewer().yaw, -88.0, epsilon = 1e-5);
        assert_relative_eq!(c.viewer().pitch, -1.0, epsilon = 1e-5);

        c.apply(Intent::PanLeft, &mut world);
        assert_relative_eq!(c.viewer().yaw, -91.0, epsilon = 1e-5);
    }

    #[test]
    fn test_apply_place_in_front() {
        let mut world = VoxelWorld::generate(&MazeLayout::default());
        let mut config = GameConfig::default();
        config.viewer.start = [0.5, 0.5, 3.5];
        let mut c = InputController::from_config(&config);
        let before = world.block_count();

        // Луч длиной 1 в -z заканчивается в пустой клетке (16, 18)
        match c.apply(Intent::PlaceBlock, &mut world) {
            IntentOutcome::Placed(Some(edit)) => assert_eq!(edit.column_height, 1),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(world.map().height(16, 18), 1);
        assert_eq!(world.block_count(), before + 1);
    }
}
