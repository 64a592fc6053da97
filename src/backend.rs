// Backend link - Channels between the engine thread and the display window
//
// Notifications travel to the window through the winit event loop proxy and
// are handled on the event-loop thread. Key commands travel back through a
// bounded crossbeam channel that the window never blocks on.

use crate::display::FrameBuffer;
use crate::events::Notification;
use crate::input::KeyCommand;
use crossbeam_channel::{Receiver, Sender};
use std::collections::HashMap;
use thiserror::Error;
use winit::event_loop::EventLoopProxy;

/// Default capacity of the key command channel
pub const DEFAULT_COMMAND_BUFFER: usize = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The display event loop has exited
    #[error("display event loop is closed")]
    Closed,
}

/// Create the bounded channel carrying key commands to the backend
pub fn command_channel(capacity: usize) -> (Sender<KeyCommand>, Receiver<KeyCommand>) {
    crossbeam_channel::bounded(capacity)
}

/// Engine-side handle for pushing notifications to the window
#[derive(Clone)]
pub struct NotificationSender {
    proxy: EventLoopProxy<Notification>,
}

impl NotificationSender {
    pub fn new(proxy: EventLoopProxy<Notification>) -> Self {
        Self { proxy }
    }

    pub fn send(&self, notification: Notification) -> Result<(), BackendError> {
        self.proxy
            .send_event(notification)
            .map_err(|_| BackendError::Closed)
    }

    pub fn clear(&self) -> Result<(), BackendError> {
        self.send(Notification::Clear)
    }

    pub fn draw(&self, frame: &FrameBuffer) -> Result<(), BackendError> {
        self.send(Notification::draw(frame))
    }
}

/// Everything an engine thread needs to talk to the front-end
pub struct BackendLink {
    pub notifications: NotificationSender,
    pub commands: Receiver<KeyCommand>,
}

/// Host key name to CHIP-8 keypad value (0x0-0xF)
///
/// The front-end forwards every key name it sees; engines resolve them here
/// and ignore keys with no keypad binding. The default layout puts the hex
/// keypad on the left-hand 4×4 block of a QWERTY keyboard:
///
/// ```text
/// 1 2 3 4        1 2 3 C
/// Q W E R   ->   4 5 6 D
/// A S D F        7 8 9 E
/// Z X C V        A 0 B F
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardMap {
    bindings: HashMap<String, u8>,
}

impl KeyboardMap {
    const QWERTY: [(&'static str, u8); 16] = [
        ("1", 0x1),
        ("2", 0x2),
        ("3", 0x3),
        ("4", 0xC),
        ("q", 0x4),
        ("w", 0x5),
        ("e", 0x6),
        ("r", 0xD),
        ("a", 0x7),
        ("s", 0x8),
        ("d", 0x9),
        ("f", 0xE),
        ("z", 0xA),
        ("x", 0x0),
        ("c", 0xB),
        ("v", 0xF),
    ];

    pub fn new() -> Self {
        Self {
            bindings: Self::QWERTY
                .iter()
                .map(|&(name, key)| (name.to_string(), key))
                .collect(),
        }
    }

    /// Map with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `name` to keypad value `key`, replacing any earlier binding
    ///
    /// Values above 0xF are ignored.
    pub fn bind(&mut self, name: &str, key: u8) {
        if key <= 0xF {
            self.bindings.insert(Self::normalize(name), key);
        }
    }

    /// Keypad value bound to a key name, if any
    pub fn key(&self, name: &str) -> Option<u8> {
        self.bindings.get(&Self::normalize(name)).copied()
    }

    // Single characters are matched regardless of shift state.
    fn normalize(name: &str) -> String {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_lowercase().collect(),
            _ => name.to_string(),
        }
    }
}

impl Default for KeyboardMap {
    fn default() -> Self {
        Self::new()
    }
}
