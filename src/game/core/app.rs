// ============================================
// App - Главный обработчик приложения
// ============================================
// Окно нужно только для ввода: состояние партии выводится в заголовок и в лог.

use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    error::EventLoopError,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use super::{GameConfig, GameEvent, GameSession};
use crate::game::systems::{Intent, UpdateSystem};

/// Главное приложение
pub struct App {
    session: GameSession,
    window: Option<Arc<Window>>,
    last_frame: Instant,
    title: String,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: GameSession::new(config),
            window: None,
            last_frame: Instant::now(),
            title: String::new(),
        }
    }

    /// Захват/освобождение курсора
    fn grab_cursor(&mut self, grab: bool) {
        let Some(window) = &self.window else { return };

        let result = if grab {
            window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };

        match result {
            Ok(()) => {
                window.set_cursor_visible(!grab);
                self.session.controller.set_cursor_grabbed(grab);
            }
            Err(e) => log::warn!("Cursor grab failed: {}", e),
        }
    }

    fn handle_intent(&mut self, intent: Option<Intent>) {
        if let Some(intent) = intent {
            self.session.handle_intent(intent);
        }
    }

    fn log_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Won => log::info!("You win!"),
                GameEvent::Caught => log::info!("Game over!"),
                GameEvent::EnemySpawned(id) => log::debug!("Enemy {} spawned", id),
                GameEvent::EnemiesSeparated(n) => log::debug!("{} enemies respawned", n),
                GameEvent::WorldChanged { columns, version } => {
                    log::debug!("{} columns changed, world version {}", columns, version)
                }
                GameEvent::Collected { .. } | GameEvent::Restarted => {}
            }
        }
    }

    fn refresh_title(&mut self) {
        let title = self.session.status_line();
        if title == self.title {
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(&title);
        }
        self.title = title;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Block Maze - click to capture the mouse")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                self.window = Some(Arc::new(window));
                self.last_frame = Instant::now();
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                self.grab_cursor(false);
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(keycode),
                    state,
                    ..
                },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if keycode == KeyCode::Escape && pressed {
                    self.grab_cursor(false);
                    return;
                }
                let intent = self.session.controller.process_keyboard(keycode, pressed);
                self.handle_intent(intent);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;

                // Первый клик только захватывает курсор
                if pressed && !self.session.controller.cursor_grabbed() {
                    self.grab_cursor(true);
                    return;
                }

                let intent = self.session.controller.process_mouse_button(button, pressed);
                self.handle_intent(intent);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                let events = UpdateSystem::update(&mut self.session, dt);
                self.log_events(&events);
                self.refresh_title();
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let intent = self.session.controller.process_mouse_motion(delta);
            self.handle_intent(intent);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Запуск игры
pub fn run() -> Result<(), EventLoopError> {
    env_logger::init();

    println!("=== Controls ===");
    println!("WASD - Move");
    println!("Q / E - Turn left / right");
    println!("Mouse - Look around (click to capture)");
    println!("LMB - Remove block");
    println!("RMB - Place block");
    println!("Escape - Release mouse");
    println!("================");

    let config = GameConfig::load_or_default(GameConfig::default_path());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)
}
