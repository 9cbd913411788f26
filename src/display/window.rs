// Window management and frame presentation
//
// Creates the winit window, owns the pixels surface, and drives the
// emulator from the redraw loop: each redraw advances emulation by the
// elapsed wall time and uploads the front frame buffer.

use crate::emulator::Emulator;
use crate::input::{KeyboardController, KeyboardHandler, Player};
use crate::ppu::frame::{SCREEN_HEIGHT, SCREEN_WIDTH};
use pixels::{Pixels, SurfaceTexture};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Integer scale factor (1x-8x)
    pub scale: u32,
    /// Enable VSync (Wait control flow)
    pub vsync: bool,
}

impl WindowConfig {
    /// Default: 3x scale with VSync
    pub fn new() -> Self {
        Self {
            scale: 3,
            vsync: true,
        }
    }

    /// Set the scale factor, clamped to 1x-8x
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    /// Window width in pixels
    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    /// Window height in pixels
    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The running application: window, surface, emulator and input state
struct DisplayWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    emulator: Emulator,
    keyboard: Rc<RefCell<KeyboardHandler>>,
    last_step: Instant,
}

impl DisplayWindow {
    fn new(config: WindowConfig, mut emulator: Emulator) -> Self {
        let keyboard = Rc::new(RefCell::new(KeyboardHandler::new()));
        emulator.set_controller1(Box::new(KeyboardController::new(
            keyboard.clone(),
            Player::One,
        )));
        emulator.set_controller2(Box::new(KeyboardController::new(
            keyboard.clone(),
            Player::Two,
        )));

        Self {
            window: None,
            pixels: None,
            config,
            emulator,
            keyboard,
            last_step: Instant::now(),
        }
    }

    /// Advance the emulator by the elapsed wall time and present a frame
    fn render(&mut self) -> Result<(), pixels::Error> {
        let elapsed = self.last_step.elapsed();
        self.last_step = Instant::now();

        // Cap the catch-up after pauses or long event-loop stalls
        let dt = elapsed.min(Duration::from_millis(100)).as_secs_f64();
        self.emulator.step_seconds(dt);

        if let Some(pixels) = &mut self.pixels {
            pixels
                .frame_mut()
                .copy_from_slice(self.emulator.frame_buffer().data());
            pixels.render()?;
        }
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: PhysicalKey, state: ElementState) {
        if state == ElementState::Pressed {
            match key {
                PhysicalKey::Code(KeyCode::Escape) => {
                    event_loop.exit();
                    return;
                }
                PhysicalKey::Code(KeyCode::KeyP) => {
                    self.emulator.toggle_pause();
                    return;
                }
                PhysicalKey::Code(KeyCode::F9) => {
                    match self.emulator.screenshot() {
                        Ok(path) => println!("Screenshot saved to {}", path.display()),
                        Err(err) => eprintln!("Screenshot failed: {}", err),
                    }
                    return;
                }
                _ => {}
            }
            self.keyboard.borrow_mut().key_pressed(key);
        } else {
            self.keyboard.borrow_mut().key_released(key);
        }
    }
}

impl ApplicationHandler for DisplayWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let title = match self.emulator.rom_path().and_then(|p| p.file_stem()) {
            Some(stem) => format!("nescore - {}", stem.to_string_lossy()),
            None => "nescore".to_string(),
        };

        let attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("failed to create window"),
        );
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface)
            .expect("failed to create pixel surface");

        self.window = Some(window);
        self.pixels = Some(pixels);
        self.last_step = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, physical_key, state),
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    eprintln!("Render error: {}", err);
                    event_loop.exit();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open the window and run the emulator until it is closed
pub fn run_display(
    config: WindowConfig,
    emulator: Emulator,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(if config.vsync {
        ControlFlow::Wait
    } else {
        ControlFlow::Poll
    });

    let mut display = DisplayWindow::new(config, emulator);
    event_loop.run_app(&mut display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_config_dimensions() {
        let config = WindowConfig::new().with_scale(2);
        assert_eq!(config.window_width(), 512);
        assert_eq!(config.window_height(), 480);
    }

    #[test]
    fn test_scale_clamping() {
        assert_eq!(WindowConfig::new().with_scale(100).scale, 8);
        assert_eq!(WindowConfig::new().with_scale(0).scale, 1);
    }
}
