// Frontend - The render surface manager and input bridge wired together
//
// Owns every piece of front-end state. The surface is created before the
// clear/draw handlers are subscribed, so a notification can never reach an
// uninitialized surface through the hub.

use crate::display::{Palette, RenderSurfaceManager};
use crate::events::{EventHub, Notification, NotificationKind, SubscriptionId};
use crate::input::{CommandSink, InputBridge, KeyPhase, RawKeyEvent};
use log::debug;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

pub struct Frontend<S: CommandSink> {
    renderer: Rc<RefCell<RenderSurfaceManager>>,
    input: InputBridge<S>,
    events: EventHub,
    subscriptions: Vec<SubscriptionId>,
}

impl<S: CommandSink> Frontend<S> {
    pub fn new(palette: Palette, sink: S) -> Self {
        Self {
            renderer: Rc::new(RefCell::new(RenderSurfaceManager::new(palette))),
            input: InputBridge::new(sink),
            events: EventHub::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Create the surface and subscribe the render handlers
    ///
    /// Does nothing if already started.
    pub fn start(&mut self) {
        if !self.subscriptions.is_empty() {
            return;
        }

        self.renderer.borrow_mut().initialize();

        for kind in [NotificationKind::Clear, NotificationKind::Draw] {
            let renderer = Rc::clone(&self.renderer);
            let id = self.events.subscribe(kind, move |notification| {
                // Errors are already logged by the manager.
                let _ = renderer.borrow_mut().apply(notification);
            });
            self.subscriptions.push(id);
        }
    }

    /// Unsubscribe the render handlers and release the surface
    pub fn shutdown(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.events.unsubscribe(id);
        }
        self.renderer.borrow_mut().teardown();
    }

    pub fn is_started(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Deliver a backend notification
    ///
    /// # Returns
    /// Number of handlers that received it
    pub fn notify(&mut self, notification: &Notification) -> usize {
        let delivered = self.events.emit(notification);
        if delivered == 0 {
            debug!("no subscriber for {:?} notification", notification.kind());
        }
        delivered
    }

    /// Forward a key press; returns `false` if it was suppressed as a repeat
    pub fn key_pressed(&mut self, event: &RawKeyEvent) -> bool {
        self.input.on_key_down(event)
    }

    pub fn key_released(&mut self, event: &RawKeyEvent) {
        self.input.on_key_up(event);
    }

    pub fn key_event(&mut self, phase: KeyPhase, event: &RawKeyEvent) -> bool {
        self.input.on_key_event(phase, event)
    }

    pub fn renderer(&self) -> Ref<'_, RenderSurfaceManager> {
        self.renderer.borrow()
    }

    /// Replace the palette; visible from the next clear or draw
    pub fn set_palette(&mut self, palette: Palette) {
        self.renderer.borrow_mut().set_palette(palette);
    }

    /// Hub for additional notification subscribers
    pub fn events_mut(&mut self) -> &mut EventHub {
        &mut self.events
    }

    pub fn input(&self) -> &InputBridge<S> {
        &self.input
    }
}
