//! Environment change notifications.
//!
//! The host world exposes a registry the lighting subsystem subscribes to;
//! the subsystem reacts to exactly two change kinds (sun color, shadow
//! color) and releases its subscription on teardown so no dangling observer
//! survives a dispose.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::lighting::color::LightColor;

/// Environment variables the lighting subsystem reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvVar {
    SunColor,
    ShadowColor,
}

/// Notification that one environment variable changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvChange {
    pub var: EnvVar,
    pub color: LightColor,
}

type Handler = Box<dyn FnMut(&EnvChange) + Send>;

/// Synchronous observer registry for environment changes. `subscribe`
/// returns an id that `unsubscribe` takes back when the observer is torn
/// down.
pub struct EnvEventBus {
    handlers: Mutex<Vec<(u64, Handler)>>,
    next_id: AtomicU64,
}

impl EnvEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self, handler: impl FnMut(&EnvChange) + Send + 'static) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.handlers.lock().push((id, Box::new(handler)));
        id
    }

    /// Remove a subscription; returns whether it was still registered
    pub fn unsubscribe(&self, id: u64) -> bool {
        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Deliver `change` to every subscriber, in subscription order
    pub fn publish(&self, change: EnvChange) {
        for (_, handler) in self.handlers.lock().iter_mut() {
            handler(&change);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().len()
    }
}

impl Default for EnvEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_subscribe_publish_unsubscribe() {
        let bus = EnvEventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_by_handler = seen.clone();
        let id = bus.subscribe(move |change| {
            assert_eq!(change.var, EnvVar::SunColor);
            seen_by_handler.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(EnvChange {
            var: EnvVar::SunColor,
            color: LightColor::default_sun(),
        });
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);

        bus.publish(EnvChange {
            var: EnvVar::SunColor,
            color: LightColor::default_sun(),
        });
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
