// CHIP-8 Front-end Library
// Display rendering and keyboard bridge for a CHIP-8 virtual machine

// Public modules
pub mod backend;
pub mod config;
pub mod display;
pub mod events;
pub mod frontend;
pub mod input;
pub mod logging;

// Re-export main types for convenience
pub use backend::{command_channel, BackendError, BackendLink, KeyboardMap, NotificationSender};
pub use config::{ConfigError, FrontendConfig};
pub use display::{
    run_display, Color, DisplayError, FrameBuffer, Palette, RenderSurface, RenderSurfaceManager,
    RenderingMode, WindowConfig, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH,
};
pub use events::{DrawPayload, EventHub, Notification, NotificationKind, SubscriptionId};
pub use frontend::Frontend;
pub use input::{CommandSink, InputBridge, KeyCommand, KeyEvent, KeyPhase, RawKeyEvent};
