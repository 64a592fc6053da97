// Display module - Renders the CHIP-8 framebuffer
//
// This module provides:
// - Frame buffer (64×32 on/off pixels)
// - Palette (foreground/background colors, scaling mode)
// - Render surface and its manager (clear / draw)
// - Window hosting the surface using winit + pixels

pub mod framebuffer;
pub mod palette;
pub mod surface;
pub mod window;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use palette::{Color, ColorParseError, Palette, RenderingMode};
pub use surface::{DisplayError, RenderSurface, RenderSurfaceManager};
pub use window::{run_display, DisplayWindow, RunError, WindowConfig, MAX_SCALE};
