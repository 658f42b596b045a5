//! Winit graphical driver for astarviz.
//!
//! Renders the screen buffer as coloured squares in a native window using:
//! - [`winit`] for window creation and input events
//! - [`softbuffer`] for CPU-based pixel presentation
//!
//! # Usage
//!
//! ```rust,no_run
//! use astarviz_core::app::{AppRunner, EventLoopDriver};
//! use astarviz_winit::{WinitConfig, WinitDriver};
//!
//! let driver = WinitDriver::new(WinitConfig::default());
//! // let runner = AppRunner::new(Box::new(my_model), 100, 68);
//! // driver.run(runner)?;
//! ```

mod input;
mod renderer;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use astarviz_core::{
    Point,
    app::{AppRunner, EventLoopDriver},
    messages::{MouseAction, Msg},
    style::Color,
};

use renderer::CellRenderer;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the winit driver.
pub struct WinitConfig {
    /// Window title.
    pub title: String,
    /// Side of one screen cell in pixels.
    pub cell_px: usize,
    /// Number of screen columns.
    pub grid_width: i32,
    /// Number of screen rows.
    pub grid_height: i32,
    /// Colour used for `Color::DEFAULT` backgrounds and padding.
    pub background: Color,
    /// How often queued subscription messages are delivered.
    pub tick: Duration,
}

impl Default for WinitConfig {
    fn default() -> Self {
        Self {
            title: "A* Path Finder".into(),
            cell_px: 10,
            grid_width: 100,
            grid_height: 68,
            background: Color::from_rgb(255, 255, 255),
            tick: Duration::from_millis(16),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitDriver
// ---------------------------------------------------------------------------

/// Winit-based graphical driver.
///
/// Implements [`EventLoopDriver`]: it owns the main-thread event loop and
/// drives an [`AppRunner`].
pub struct WinitDriver {
    config: WinitConfig,
}

impl WinitDriver {
    pub fn new(config: WinitConfig) -> Self {
        Self { config }
    }
}

impl EventLoopDriver for WinitDriver {
    fn run(self, runner: AppRunner) -> Result<(), Box<dyn std::error::Error>> {
        let event_loop = EventLoop::new()?;
        let mut app = WinitApp::new(self.config, runner);
        event_loop.run_app(&mut app)?;
        app.runner.stop();
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitApp: ApplicationHandler
// ---------------------------------------------------------------------------

struct WinitApp {
    config: WinitConfig,
    runner: AppRunner,
    state: Option<WinitState>,
    error: Option<Box<dyn std::error::Error>>,
}

struct WinitState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    renderer: CellRenderer,
    pixel_width: u32,
    pixel_height: u32,
    cursor: Point,
}

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}

impl WinitApp {
    fn new(config: WinitConfig, runner: AppRunner) -> Self {
        Self {
            config,
            runner,
            state: None,
            error: None,
        }
    }

    fn create_state(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<WinitState, Box<dyn std::error::Error>> {
        let renderer = CellRenderer::new(
            self.config.cell_px,
            self.config.grid_width.max(0) as usize,
            self.config.grid_height.max(0) as usize,
            self.config.background,
        );
        let pixel_w = renderer.pixel_width() as u32;
        let pixel_h = renderer.pixel_height() as u32;

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(pixel_w, pixel_h))
            .with_resizable(true);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let context = softbuffer::Context::new(window.clone())?;
        let mut surface = softbuffer::Surface::new(&context, window.clone())?;
        surface.resize(non_zero(pixel_w), non_zero(pixel_h))?;

        Ok(WinitState {
            window,
            surface,
            renderer,
            pixel_width: pixel_w,
            pixel_height: pixel_h,
            cursor: Point::new(-1, -1),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: Box<dyn std::error::Error>) {
        log::error!("window driver failed: {e}");
        self.error = Some(e);
        event_loop.exit();
    }

    fn render(&mut self) {
        if self.runner.should_quit() {
            return;
        }
        let Some(frame) = self.runner.draw_frame() else {
            return;
        };
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.renderer.apply_frame(&frame);
        state.window.request_redraw();
    }

    fn present(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let (width, height) = (state.pixel_width, state.pixel_height);
        if width == 0 || height == 0 {
            return;
        }
        let mut buf = match state.surface.buffer_mut() {
            Ok(b) => b,
            Err(e) => {
                log::warn!("surface buffer unavailable: {e}");
                return;
            }
        };
        state
            .renderer
            .blit_to_buffer(&mut buf, width as usize, height as usize);
        if let Err(e) = buf.present() {
            log::warn!("present failed: {e}");
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, msg: Msg) {
        self.runner.handle_msg(msg);
        if self.runner.should_quit() {
            event_loop.exit();
            return;
        }
        self.render();
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.create_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => return self.fail(event_loop, e),
        }
        self.runner.init();
        self.render();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.runner.handle_msg(Msg::Quit);
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(state) = self.state.as_mut() {
                    state.pixel_width = width;
                    state.pixel_height = height;
                    if let Err(e) = state.surface.resize(non_zero(width), non_zero(height)) {
                        log::warn!("surface resize failed: {e}");
                    }
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.present(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(msg) = input::translate_keyboard(&event) {
                    self.dispatch(event_loop, msg);
                }
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                let Some(state) = self.state.as_ref() else {
                    return;
                };
                if let Some(msg) = input::translate_mouse_button(btn_state, button, state.cursor) {
                    self.dispatch(event_loop, msg);
                }
            }

            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                let Some(state) = self.state.as_mut() else {
                    return;
                };
                let cell = input::pixel_to_cell(x, y, state.renderer.cell_px());
                if cell == state.cursor {
                    return;
                }
                state.cursor = cell;
                let msg = Msg::Mouse {
                    action: MouseAction::Move,
                    pos: cell,
                    time: Instant::now(),
                };
                self.dispatch(event_loop, msg);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let Some(state) = self.state.as_ref() else {
                    return;
                };
                if let Some(msg) = input::translate_mouse_wheel(delta, state.cursor) {
                    self.dispatch(event_loop, msg);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.runner.pump() {
            if self.runner.should_quit() {
                event_loop.exit();
                return;
            }
            self.render();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + self.config.tick));
    }
}
