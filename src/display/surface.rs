// Render surface - The 64×32 paint target and the manager that owns it
//
// Every draw is a full repaint: all 2048 cells are reassigned from the
// frame buffer, so the surface never holds pixels from an older frame.

use super::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
use super::palette::{Color, Palette, RenderingMode};
use crate::events::Notification;
use log::{debug, warn};
use thiserror::Error;

/// Errors reported by the render surface manager
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayError {
    /// A clear or draw arrived before the surface was created
    #[error("render surface is not initialized")]
    NotInitialized,

    /// A draw payload did not cover the screen exactly
    #[error("invalid frame buffer: expected {expected} pixels, got {actual}")]
    InvalidFrameBuffer { expected: usize, actual: usize },
}

/// Fixed-size paint target, one cell per logical CHIP-8 pixel
///
/// Magnification is left to the presenter; the surface itself never changes
/// resolution.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    cells: [Color; SCREEN_SIZE],
    rendering_mode: RenderingMode,
}

impl RenderSurface {
    /// Create a surface with every cell set to `fill`
    pub fn new(fill: Color, rendering_mode: RenderingMode) -> Self {
        Self {
            cells: [fill; SCREEN_SIZE],
            rendering_mode,
        }
    }

    /// Scaling filter the presenter must use
    pub fn rendering_mode(&self) -> RenderingMode {
        self.rendering_mode
    }

    /// Paint every cell
    pub fn fill(&mut self, color: Color) {
        self.cells.fill(color);
    }

    /// Paint a rectangle of cells, clipped to the surface bounds
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Color) {
        let x_end = x.saturating_add(width).min(SCREEN_WIDTH);
        let y_end = y.saturating_add(height).min(SCREEN_HEIGHT);

        for row in y.min(SCREEN_HEIGHT)..y_end {
            let start = row * SCREEN_WIDTH;
            self.cells[start + x.min(x_end)..start + x_end].fill(color);
        }
    }

    /// Color of the cell at (`x`, `y`)
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.cells[y * SCREEN_WIDTH + x]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Write the surface as RGBA bytes
    ///
    /// # Panics
    /// Panics if `output` is smaller than `SCREEN_SIZE * 4` bytes
    pub fn to_rgba(&self, output: &mut [u8]) {
        assert!(
            output.len() >= SCREEN_SIZE * 4,
            "Output buffer too small for RGBA conversion"
        );

        for (cell, chunk) in self.cells.iter().zip(output.chunks_exact_mut(4)) {
            chunk.copy_from_slice(&cell.to_rgba());
        }
    }
}

/// Owner of the render surface
///
/// The surface only exists between [`initialize`](Self::initialize) and
/// [`teardown`](Self::teardown); clear and draw fail with
/// [`DisplayError::NotInitialized`] outside that window.
#[derive(Debug, Clone)]
pub struct RenderSurfaceManager {
    surface: Option<RenderSurface>,
    palette: Palette,
}

impl RenderSurfaceManager {
    pub fn new(palette: Palette) -> Self {
        Self {
            surface: None,
            palette,
        }
    }

    /// Allocate the surface
    ///
    /// The scaling filter is fixed from the palette at this point. Calling
    /// this again while a surface exists keeps the current one.
    pub fn initialize(&mut self) {
        if self.surface.is_some() {
            debug!("render surface already initialized");
            return;
        }

        if !self.palette.has_distinct_colors() {
            warn!(
                "foreground and background are both {}; pixels will be invisible",
                self.palette.foreground_color
            );
        }

        self.surface = Some(RenderSurface::new(
            self.palette.background_color,
            self.palette.rendering_mode,
        ));
        debug!(
            "render surface initialized: {}x{} ({:?})",
            SCREEN_WIDTH, SCREEN_HEIGHT, self.palette.rendering_mode
        );
    }

    /// Release the surface
    pub fn teardown(&mut self) {
        if self.surface.take().is_some() {
            debug!("render surface torn down");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the palette used by subsequent clears and draws
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Fill every cell with the background color
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        let background = self.palette.background_color;
        let surface = self.surface.as_mut().ok_or(DisplayError::NotInitialized)?;

        surface.fill(background);
        Ok(())
    }

    /// Repaint every cell from a raw pixel payload
    ///
    /// The payload is validated before any cell is written, so a rejected
    /// draw leaves the previous frame on screen.
    pub fn draw(&mut self, pixels: &[bool]) -> Result<(), DisplayError> {
        if self.surface.is_none() {
            return Err(DisplayError::NotInitialized);
        }

        let frame = FrameBuffer::from_slice(pixels)?;
        self.draw_frame(&frame)
    }

    /// Repaint every cell from a frame buffer
    pub fn draw_frame(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let palette = &self.palette;
        let surface = self.surface.as_mut().ok_or(DisplayError::NotInitialized)?;

        for (i, &on) in frame.as_slice().iter().enumerate() {
            let (x, y) = FrameBuffer::coords_of(i);
            surface.fill_rect(x, y, 1, 1, palette.color_for(on));
        }

        Ok(())
    }

    /// Apply a backend notification
    ///
    /// Failures are logged and returned; the surface keeps its previous
    /// contents.
    pub fn apply(&mut self, notification: &Notification) -> Result<(), DisplayError> {
        let result = match notification {
            Notification::Clear => self.clear(),
            Notification::Draw(payload) => self.draw(&payload.pixels),
        };

        if let Err(err) = &result {
            warn!("dropping {:?} notification: {}", notification.kind(), err);
        }

        result
    }
}

impl Default for RenderSurfaceManager {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}
