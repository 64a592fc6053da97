// Render surface manager tests
// Verify clear/draw semantics against the palette for whole frames

mod common;

use chip8_frontend::*;
use common::*;

fn manager() -> RenderSurfaceManager {
    let mut manager = RenderSurfaceManager::new(test_palette());
    manager.initialize();
    manager
}

#[test]
fn test_draw_matches_buffer_for_every_cell() {
    for seed in 0..8 {
        let pixels = noise_pixels(seed);
        let mut manager = manager();
        manager.draw(&pixels).unwrap();

        assert_rendered(manager.surface().unwrap(), &pixels);
    }
}

#[test]
fn test_clear_yields_background_regardless_of_prior_state() {
    let mut manager = manager();
    manager.draw(&noise_pixels(42)).unwrap();
    manager.clear().unwrap();

    let cells = snapshot(manager.surface().unwrap());
    assert_eq!(cells.len(), SCREEN_SIZE);
    assert!(cells.iter().all(|&c| c == BG));
}

#[test]
fn test_clear_is_idempotent() {
    let mut manager = manager();
    manager.draw(&noise_pixels(3)).unwrap();

    manager.clear().unwrap();
    let once = snapshot(manager.surface().unwrap());
    manager.clear().unwrap();
    let twice = snapshot(manager.surface().unwrap());

    assert_eq!(once, twice);
}

#[test]
fn test_draw_twice_is_identical() {
    let pixels = noise_pixels(7);
    let mut manager = manager();

    manager.draw(&pixels).unwrap();
    let first = snapshot(manager.surface().unwrap());
    manager.draw(&pixels).unwrap();
    let second = snapshot(manager.surface().unwrap());

    assert_eq!(first, second);
}

#[test]
fn test_draw_is_full_repaint() {
    let mut manager = manager();
    manager.draw(&vec![true; SCREEN_SIZE]).unwrap();
    manager.draw(&pixels_with(&[100])).unwrap();

    assert_rendered(manager.surface().unwrap(), &pixels_with(&[100]));
}

#[test]
fn test_only_first_pixel_on() {
    let mut manager = manager();
    manager.draw(&pixels_with(&[0])).unwrap();

    let surface = manager.surface().unwrap();
    assert_eq!(surface.pixel(0, 0), FG);
    let background = snapshot(surface).iter().filter(|&&c| c == BG).count();
    assert_eq!(background, SCREEN_SIZE - 1);
}

#[test]
fn test_index_maps_to_column_and_row() {
    let mut manager = manager();
    // index 130 = row 2, column 2; index 2047 = row 31, column 63
    manager.draw(&pixels_with(&[130, 2047])).unwrap();

    let surface = manager.surface().unwrap();
    assert_eq!(surface.pixel(2, 2), FG);
    assert_eq!(surface.pixel(63, 31), FG);
    assert_eq!(surface.pixel(2, 1), BG);
}

#[test]
fn test_wrong_length_rejected_and_surface_unchanged() {
    let mut manager = manager();
    manager.draw(&noise_pixels(11)).unwrap();
    let before = snapshot(manager.surface().unwrap());

    for len in [SCREEN_SIZE - 1, SCREEN_SIZE + 1, 0] {
        let result = manager.draw(&vec![true; len]);
        assert_eq!(
            result,
            Err(DisplayError::InvalidFrameBuffer {
                expected: SCREEN_SIZE,
                actual: len
            })
        );
        assert_eq!(snapshot(manager.surface().unwrap()), before);
    }
}

#[test]
fn test_clear_then_blank_draw_equals_clear() {
    let mut cleared = manager();
    cleared.draw(&noise_pixels(5)).unwrap();
    cleared.clear().unwrap();

    let mut drawn = manager();
    drawn.draw(&noise_pixels(5)).unwrap();
    drawn.clear().unwrap();
    drawn.draw(&vec![false; SCREEN_SIZE]).unwrap();

    assert_eq!(
        snapshot(cleared.surface().unwrap()),
        snapshot(drawn.surface().unwrap())
    );
}

#[test]
fn test_uninitialized_manager_rejects_calls() {
    let mut manager = RenderSurfaceManager::new(test_palette());

    assert_eq!(manager.clear(), Err(DisplayError::NotInitialized));
    assert_eq!(
        manager.draw(&vec![false; SCREEN_SIZE]),
        Err(DisplayError::NotInitialized)
    );
    assert!(manager.surface().is_none());
}

#[test]
fn test_rgba_upload_uses_palette_colors() {
    let mut manager = manager();
    manager.draw(&pixels_with(&[1])).unwrap();

    let mut rgba = vec![0u8; SCREEN_SIZE * 4];
    manager.surface().unwrap().to_rgba(&mut rgba);

    assert_eq!(&rgba[0..4], &BG.to_rgba());
    assert_eq!(&rgba[4..8], &FG.to_rgba());
}
