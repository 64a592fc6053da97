// Window module - Hosts the render surface in a winit window
//
// The 64×32 surface is uploaded into a `pixels` frame, which handles the
// nearest-neighbour upscale to the window size. The event loop carries
// backend notifications as user events, so every clear/draw is handled on
// the same thread as keyboard input.

use super::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
use super::palette::{Color, Palette, RenderingMode};
use crate::backend::{command_channel, BackendLink, NotificationSender};
use crate::config::FrontendConfig;
use crate::events::Notification;
use crate::frontend::Frontend;
use crate::input::{raw_key_event, KeyCommand};
use crossbeam_channel::Sender;
use log::{debug, error, info, warn};
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Errors that stop the display from running
#[derive(Debug, Error)]
pub enum RunError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("failed to start backend thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Largest supported window scale factor
pub const MAX_SCALE: u32 = 16;

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Scale factor (1x-16x)
    pub scale: u32,
    /// Whether to enable VSync
    pub vsync: bool,
    /// Window title
    pub title: String,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 10x scale, VSync enabled
    pub fn new() -> Self {
        Self {
            scale: 10,
            vsync: true,
            title: "CHIP-8".to_string(),
        }
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, MAX_SCALE);
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Get the window width in pixels
    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    /// Get the window height in pixels
    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn to_wgpu_color(color: Color) -> pixels::wgpu::Color {
    pixels::wgpu::Color {
        r: f64::from(color.r) / 255.0,
        g: f64::from(color.g) / 255.0,
        b: f64::from(color.b) / 255.0,
        a: 1.0,
    }
}

/// Display window for the CHIP-8 screen
pub struct DisplayWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    frontend: Frontend<Sender<KeyCommand>>,
}

impl DisplayWindow {
    /// Create a new display window (window will be created when event loop starts)
    pub fn new(config: WindowConfig, palette: Palette, commands: Sender<KeyCommand>) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            frontend: Frontend::new(palette, commands),
        }
    }

    pub fn frontend(&self) -> &Frontend<Sender<KeyCommand>> {
        &self.frontend
    }

    /// Replace the palette; the letterbox follows on the next redraw
    pub fn set_palette(&mut self, palette: Palette) {
        self.frontend.set_palette(palette);
        self.request_redraw();
    }

    fn letterbox_color(&self) -> pixels::wgpu::Color {
        to_wgpu_color(self.frontend.renderer().palette().background_color)
    }

    fn create_pixels(&self, window: Arc<Window>) -> Result<Pixels<'static>, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let rendering_mode = self.frontend.renderer().palette().rendering_mode;

        // Pixels scales by whole multiples with nearest sampling, which is
        // the only supported mode.
        match rendering_mode {
            RenderingMode::Pixelated => {
                PixelsBuilder::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface_texture)
                    .enable_vsync(self.config.vsync)
                    .clear_color(self.letterbox_color())
                    .build()
            }
        }
    }

    /// Upload the render surface and present it
    fn render(&mut self) -> Result<(), pixels::Error> {
        let letterbox = self.letterbox_color();
        let Some(pixels) = &mut self.pixels else {
            return Ok(());
        };

        pixels.clear_color(letterbox);
        if let Some(surface) = self.frontend.renderer().surface() {
            surface.to_rgba(pixels.frame_mut());
        }

        pixels.render()
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler<Notification> for DisplayWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        let pixels = match self.create_pixels(window.clone()) {
            Ok(pixels) => pixels,
            Err(err) => {
                error!("failed to create pixel surface: {}", err);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.pixels = Some(pixels);

        // Surface first, then subscriptions: notifications queued before
        // this point were dropped by the hub.
        self.frontend.start();
        self.request_redraw();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, notification: Notification) {
        if self.frontend.notify(&notification) > 0 {
            self.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested, exiting");
                self.frontend.shutdown();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let (phase, raw) = raw_key_event(&event);
                self.frontend.key_event(phase, &raw);
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        warn!("failed to resize surface: {}", err);
                    }
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    error!("render error: {}", err);
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

/// Create the display window and run it with a backend
///
/// `backend` runs on its own thread with a [`BackendLink`]. The call returns
/// once the window is closed and the backend thread has finished.
pub fn run_display<F>(config: &FrontendConfig, backend: F) -> Result<(), RunError>
where
    F: FnOnce(BackendLink) + Send + 'static,
{
    let event_loop = EventLoop::<Notification>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let (command_tx, command_rx) = command_channel(config.input.command_buffer);
    let link = BackendLink {
        notifications: NotificationSender::new(event_loop.create_proxy()),
        commands: command_rx,
    };

    let mut display =
        DisplayWindow::new(config.window.clone(), config.display.clone(), command_tx);

    info!(
        "starting display: {}x{} at {}x ({}x{} window), vsync {}",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        config.window.scale,
        config.window.window_width(),
        config.window.window_height(),
        config.window.vsync
    );

    let backend_thread = thread::Builder::new()
        .name("backend".to_string())
        .spawn(move || backend(link))?;

    let result = event_loop.run_app(&mut display);

    // Dropping the window closes the command channel, which tells the
    // backend to stop.
    drop(display);
    if backend_thread.join().is_err() {
        error!("backend thread panicked");
    }
    debug!("display window closed");

    result.map_err(RunError::from)
}
