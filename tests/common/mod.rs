// Common test utilities for front-end integration tests
//
// Frame builders and surface inspection shared by the display and
// end-to-end test suites.

#![allow(dead_code)]

use chip8_frontend::{Color, Palette, RenderSurface, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};

/// Foreground used by the test palette
pub const FG: Color = Color::rgb(0xFF, 0xB0, 0x00);

/// Background used by the test palette
pub const BG: Color = Color::rgb(0x10, 0x10, 0x10);

/// Amber on near-black, easy to tell apart from the defaults
pub fn test_palette() -> Palette {
    Palette::with_colors(FG, BG)
}

/// Payload with only the listed indices on
pub fn pixels_with(on: &[usize]) -> Vec<bool> {
    let mut pixels = vec![false; SCREEN_SIZE];
    for &i in on {
        pixels[i] = true;
    }
    pixels
}

/// Deterministic pseudo-random payload
pub fn noise_pixels(seed: u32) -> Vec<bool> {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    (0..SCREEN_SIZE)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state & 1 == 1
        })
        .collect()
}

/// Snapshot of every cell color, row-major
pub fn snapshot(surface: &RenderSurface) -> Vec<Color> {
    let mut cells = Vec::with_capacity(SCREEN_SIZE);
    for y in 0..SCREEN_HEIGHT {
        for x in 0..SCREEN_WIDTH {
            cells.push(surface.pixel(x, y));
        }
    }
    cells
}

/// Assert that each cell shows FG when on and BG when off
pub fn assert_rendered(surface: &RenderSurface, pixels: &[bool]) {
    for (i, &on) in pixels.iter().enumerate() {
        let (x, y) = (i % SCREEN_WIDTH, i / SCREEN_WIDTH);
        let expected = if on { FG } else { BG };
        assert_eq!(
            surface.pixel(x, y),
            expected,
            "cell ({}, {}) should be {}",
            x,
            y,
            expected
        );
    }
}
