// Input module - Keyboard events going from the window to the engine
//
// Raw key events come from the windowing layer, the bridge filters OS key
// repeat, and key commands go out to the backend.

pub mod bridge;
pub mod keyboard;

pub use bridge::{CommandSink, InputBridge};
pub use keyboard::{key_name, raw_key_event};

use serde::{Deserialize, Serialize};

/// Key event as delivered by the windowing layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    /// Symbolic key name, e.g. `"a"`, `"Enter"`, `"ArrowUp"`
    pub key: String,
    /// Set when the OS generated this press because the key is held down
    pub repeat: bool,
}

impl RawKeyEvent {
    /// A first-time (non-repeated) key event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            repeat: false,
        }
    }

    /// An auto-repeat key event
    pub fn repeated(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            repeat: true,
        }
    }
}

/// Whether a key went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Pressed,
    Released,
}

/// Normalized key transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub phase: KeyPhase,
}

impl KeyEvent {
    pub fn pressed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            phase: KeyPhase::Pressed,
        }
    }

    pub fn released(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            phase: KeyPhase::Released,
        }
    }
}

/// Command sent to the backend engine
///
/// Wire form: `{"command":"key_down","key":"a"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum KeyCommand {
    KeyDown { key: String },
    KeyUp { key: String },
}

impl KeyCommand {
    pub fn key(&self) -> &str {
        match self {
            KeyCommand::KeyDown { key } | KeyCommand::KeyUp { key } => key,
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, KeyCommand::KeyDown { .. })
    }
}

impl From<KeyEvent> for KeyCommand {
    fn from(event: KeyEvent) -> Self {
        match event.phase {
            KeyPhase::Pressed => KeyCommand::KeyDown { key: event.key },
            KeyPhase::Released => KeyCommand::KeyUp { key: event.key },
        }
    }
}
