// Frame Buffer - Monochrome pixel matrix produced by the CHIP-8 engine
//
// The CHIP-8 display is 64×32 pixels. Each pixel is either on or off and
// the buffer is laid out row-major: index = row * 64 + column.

use super::surface::DisplayError;

/// CHIP-8 screen width in pixels
pub const SCREEN_WIDTH: usize = 64;

/// CHIP-8 screen height in pixels
pub const SCREEN_HEIGHT: usize = 32;

/// Total number of pixels in the frame buffer
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Frame buffer holding one on/off flag per logical pixel
///
/// A `FrameBuffer` always covers the whole screen. Payloads of any other
/// length are rejected when converted, never clipped or padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [bool; SCREEN_SIZE],
}

impl FrameBuffer {
    /// Create a new frame buffer with every pixel off
    pub fn new() -> Self {
        Self {
            pixels: [false; SCREEN_SIZE],
        }
    }

    /// Build a frame buffer from a raw pixel slice
    ///
    /// # Errors
    /// Returns [`DisplayError::InvalidFrameBuffer`] if `pixels` does not hold
    /// exactly [`SCREEN_SIZE`] entries.
    pub fn from_slice(pixels: &[bool]) -> Result<Self, DisplayError> {
        let pixels: [bool; SCREEN_SIZE] =
            pixels
                .try_into()
                .map_err(|_| DisplayError::InvalidFrameBuffer {
                    expected: SCREEN_SIZE,
                    actual: pixels.len(),
                })?;

        Ok(Self { pixels })
    }

    /// Row-major index of the pixel at (`x`, `y`)
    #[inline]
    pub fn index_of(x: usize, y: usize) -> usize {
        y * SCREEN_WIDTH + x
    }

    /// Screen coordinates (column, row) of the pixel at `index`
    #[inline]
    pub fn coords_of(index: usize) -> (usize, usize) {
        (index % SCREEN_WIDTH, index / SCREEN_WIDTH)
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[Self::index_of(x, y)]
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[Self::index_of(x, y)] = on;
    }

    /// Raw pixel flags in row-major order
    pub fn as_slice(&self) -> &[bool] {
        &self.pixels
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.pixels.to_vec()
    }

    /// Number of pixels that are on
    pub fn count_on(&self) -> usize {
        self.pixels.iter().filter(|&&on| on).count()
    }

    /// Fill the buffer with a 4×4 checkerboard
    ///
    /// Used by the demonstration backend when no engine is attached.
    pub fn test_pattern(&mut self) {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                self.set(x, y, (x / 4 + y / 4) % 2 == 0);
            }
        }
    }

    /// Invert every pixel
    pub fn invert(&mut self) {
        for pixel in self.pixels.iter_mut() {
            *pixel = !*pixel;
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<bool>> for FrameBuffer {
    type Error = DisplayError;

    fn try_from(pixels: Vec<bool>) -> Result<Self, Self::Error> {
        Self::from_slice(&pixels)
    }
}

impl TryFrom<&[bool]> for FrameBuffer {
    type Error = DisplayError;

    fn try_from(pixels: &[bool]) -> Result<Self, Self::Error> {
        Self::from_slice(pixels)
    }
}
