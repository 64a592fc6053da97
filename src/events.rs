// Backend notifications and the subscription hub that delivers them
//
// The engine pushes two notifications to the front-end: `clear` (no payload)
// and `draw` (`{ pixels: [bool; 2048] }`). Handlers subscribe per kind and
// are invoked synchronously, in subscription order, on the event-loop thread.

use crate::display::FrameBuffer;
use serde::{Deserialize, Serialize};

/// Payload of a `draw` notification
///
/// The pixel list is kept as sent; its length is checked by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPayload {
    pub pixels: Vec<bool>,
}

/// Notification emitted by the backend engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum Notification {
    /// Fill the screen with the background color
    Clear,
    /// Repaint the screen from a frame buffer
    Draw(DrawPayload),
}

impl Notification {
    /// Build a `draw` notification from a frame buffer
    pub fn draw(frame: &FrameBuffer) -> Self {
        Notification::Draw(DrawPayload {
            pixels: frame.to_vec(),
        })
    }

    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::Clear => NotificationKind::Clear,
            Notification::Draw(_) => NotificationKind::Draw,
        }
    }

    /// Decode a notification from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Encode the notification in its JSON wire form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Kind of notification a handler subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Clear,
    Draw,
}

/// Handle returned by [`EventHub::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&Notification)>;

struct Subscription {
    id: SubscriptionId,
    kind: NotificationKind,
    handler: Handler,
}

/// Subscription registry for backend notifications
///
/// There is no queue: `emit` runs every matching handler before returning.
pub struct EventHub {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `handler` for notifications of `kind`
    pub fn subscribe<F>(&mut self, kind: NotificationKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Box::new(handler),
        });

        id
    }

    /// Remove a subscription
    ///
    /// # Returns
    /// `true` if the subscription existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver a notification to every handler subscribed to its kind
    ///
    /// # Returns
    /// Number of handlers invoked
    pub fn emit(&mut self, notification: &Notification) -> usize {
        let kind = notification.kind();
        let mut delivered = 0;

        for subscription in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            (subscription.handler)(notification);
            delivered += 1;
        }

        delivered
    }

    pub fn subscriber_count(&self, kind: NotificationKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
