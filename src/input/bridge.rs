// Input bridge - Repeat-filtered key commands for the backend
//
// The CHIP-8 keypad is edge triggered: one key-down per physical press and
// one key-up per release. The window keeps firing presses while a key is
// held, so repeated presses are dropped here. Releases are never filtered and
// the bridge keeps no per-key state.

use super::{KeyCommand, KeyEvent, KeyPhase, RawKeyEvent};
use crossbeam_channel::{Sender, TrySendError};
use log::{trace, warn};

/// Destination for outbound key commands
///
/// Sending is fire-and-forget: a sink that cannot deliver drops the command.
pub trait CommandSink {
    fn send(&mut self, command: KeyCommand);
}

impl CommandSink for Sender<KeyCommand> {
    fn send(&mut self, command: KeyCommand) {
        match self.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!("command channel full, dropping {:?}", command);
            }
            Err(TrySendError::Disconnected(command)) => {
                warn!("backend disconnected, dropping {:?}", command);
            }
        }
    }
}

/// Records commands in order
impl CommandSink for Vec<KeyCommand> {
    fn send(&mut self, command: KeyCommand) {
        self.push(command);
    }
}

/// Translates raw key events into backend commands
pub struct InputBridge<S: CommandSink> {
    sink: S,
}

impl<S: CommandSink> InputBridge<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Handle a key press
    ///
    /// # Returns
    /// `true` if a `key_down` command was issued, `false` if the press was an
    /// OS auto-repeat and got suppressed
    pub fn on_key_down(&mut self, event: &RawKeyEvent) -> bool {
        if event.repeat {
            trace!("suppressing repeated press of {:?}", event.key);
            return false;
        }

        self.sink
            .send(KeyCommand::from(KeyEvent::pressed(event.key.clone())));
        true
    }

    /// Handle a key release; always issues exactly one `key_up` command
    pub fn on_key_up(&mut self, event: &RawKeyEvent) {
        self.sink
            .send(KeyCommand::from(KeyEvent::released(event.key.clone())));
    }

    /// Dispatch on the event phase
    ///
    /// # Returns
    /// `true` if a command was issued
    pub fn on_key_event(&mut self, phase: KeyPhase, event: &RawKeyEvent) -> bool {
        match phase {
            KeyPhase::Pressed => self.on_key_down(event),
            KeyPhase::Released => {
                self.on_key_up(event);
                true
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
