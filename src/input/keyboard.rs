// Keyboard event conversion from winit
//
// Keys are identified by their logical (layout-aware) name, not their scan
// code, and passed through in winit's own naming.

use super::{KeyPhase, RawKeyEvent};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::Key;

/// Symbolic name of a logical key
///
/// Character keys yield the produced text (`"a"`, `"A"`, `"1"`); named keys
/// yield their winit name (`"Enter"`, `"ArrowUp"`, `"Space"`).
pub fn key_name(key: &Key) -> String {
    match key {
        Key::Character(text) => text.to_string(),
        Key::Named(named) => format!("{:?}", named),
        Key::Unidentified(_) => "Unidentified".to_string(),
        Key::Dead(_) => "Dead".to_string(),
    }
}

/// Convert a winit keyboard event into a phase and raw key event
pub fn raw_key_event(event: &KeyEvent) -> (KeyPhase, RawKeyEvent) {
    let phase = match event.state {
        ElementState::Pressed => KeyPhase::Pressed,
        ElementState::Released => KeyPhase::Released,
    };

    let raw = RawKeyEvent {
        key: key_name(&event.logical_key),
        repeat: event.repeat,
    };

    (phase, raw)
}
