//! In-process publish/subscribe for clock events.
//!
//! The shell publishes an event after each handled change. Subscribers are
//! isolated from each other: a handler that fails is logged and the rest
//! still run.

#[cfg(test)]
mod tests;

use std::error::Error;

use tracing::{debug, warn};

use crate::config_store::ConfigChange;

/// Something that happened in the running clock.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockEvent {
    /// A different theme is now displayed
    ThemeChanged {
        /// Name of the new theme
        name: String,
    },
    /// A settings key changed through the shell
    SettingChanged {
        /// The change as recorded by the configuration
        change: ConfigChange,
    },
    /// The user asked the clock to close
    CloseRequested,
}

impl ClockEvent {
    /// The kind subscribers filter on.
    pub fn kind(&self) -> EventKind {
        match self {
            ClockEvent::ThemeChanged { .. } => EventKind::ThemeChanged,
            ClockEvent::SettingChanged { .. } => EventKind::SettingChanged,
            ClockEvent::CloseRequested => EventKind::CloseRequested,
        }
    }
}

/// Discriminant of [`ClockEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`ClockEvent::ThemeChanged`]
    ThemeChanged,
    /// [`ClockEvent::SettingChanged`]
    SettingChanged,
    /// [`ClockEvent::CloseRequested`]
    CloseRequested,
}

/// Error a handler may return.
pub type HandlerError = Box<dyn Error>;

type Handler = Box<dyn FnMut(&ClockEvent) -> Result<(), HandlerError>>;

/// Identifies a subscription for [`EventBus::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

/// Synchronous event bus owned by the shell.
///
/// Handlers run on the publishing thread, in subscription order.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: usize,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every event of `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&ClockEvent) -> Result<(), HandlerError> + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);

        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Box::new(handler),
        });
        debug!(?kind, "Added event subscription");

        id
    }

    /// Removes a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        before != self.subscriptions.len()
    }

    /// Delivers `event` to every subscriber of its kind.
    ///
    /// Returns the number of handlers that failed.
    pub fn publish(&mut self, event: &ClockEvent) -> usize {
        let kind = event.kind();
        let mut failures = 0;

        for subscription in self
            .subscriptions
            .iter_mut()
            .filter(|subscription| subscription.kind == kind)
        {
            if let Err(e) = (subscription.handler)(event) {
                failures += 1;
                warn!(?kind, error = %e, "Event handler failed");
            }
        }

        failures
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
