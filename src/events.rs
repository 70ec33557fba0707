//! Module implementing the event bus used to signal captioning milestones.

#![allow(missing_docs)]  // Because IterVariants! produces undocumented methods.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use antidote::Mutex;


macro_attr! {
    /// Lifecycle events emitted by the `Captioner`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IterVariants!(Events))]
    pub enum Event {
        /// Surface & image dimensions have been negotiated
        /// and the image can be rendered.
        ImageLoad,
        /// A complete pass of rendering the image & its captions has finished.
        AfterRender,
    }
}

impl Event {
    /// Key under which the event's listeners are registered.
    #[inline]
    pub fn key(&self) -> &'static str {
        match *self {
            Event::ImageLoad => "onImageLoad",
            Event::AfterRender => "afterRender",
        }
    }
}

impl AsRef<str> for Event {
    fn as_ref(&self) -> &str {
        self.key()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.key())
    }
}


/// Opaque identifier of a listener registered with the `EventBus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "sub-{:08x}", self.0)
    }
}

/// Handle to a registered listener, needed to unregister it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[must_use = "listeners can only be unsubscribed with their Subscription"]
pub struct Subscription {
    pub id: SubscriptionId,
    pub event_key: String,
}


type Callback = Arc<Fn() + Send + Sync>;

struct Listener {
    id: SubscriptionId,
    callback: Callback,
}


/// Registry of event listeners, keyed by event name.
///
/// Listeners are invoked synchronously, in the order they were registered.
/// The bus is thread-safe, but the lock is never held while calling listeners,
/// so they are free to (un)subscribe from within the callback.
pub struct EventBus {
    listeners: Mutex<HashMap<String, Vec<Listener>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    #[inline]
    pub fn new() -> Self {
        EventBus{
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Register a callback for given event.
    pub fn subscribe<K, F>(&self, event_key: K, callback: F) -> Subscription
        where K: AsRef<str>, F: Fn() + Send + Sync + 'static
    {
        let event_key = event_key.as_ref().to_owned();
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        trace!("Subscribing {} to `{}` event", id, event_key);

        self.listeners.lock()
            .entry(event_key.clone()).or_insert_with(Vec::new)
            .push(Listener{id, callback: Arc::new(callback)});
        Subscription{id, event_key}
    }

    /// Register a callback for given event that receives a context value
    /// each time the event is emitted.
    pub fn subscribe_with<K, C, F>(&self, event_key: K, context: C, callback: F) -> Subscription
        where K: AsRef<str>, C: Send + Sync + 'static, F: Fn(&C) + Send + Sync + 'static
    {
        self.subscribe(event_key, move || callback(&context))
    }

    /// Unregister the listener identified by given subscription.
    ///
    /// Returns whether the listener was found (and removed).
    /// Unknown subscriptions are ignored.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut listeners = self.listeners.lock();
        let removed = listeners.get_mut(&subscription.event_key).and_then(|list| {
            list.iter().position(|l| l.id == subscription.id).map(|i| list.remove(i))
        });
        if removed.is_none() {
            debug!("No listener {} found for `{}` event",
                subscription.id, subscription.event_key);
        }
        removed.is_some()
    }

    /// Invoke all the listeners of given event.
    ///
    /// Listeners (un)subscribed during the emission
    /// will only be affected in subsequent emissions.
    /// A panicking listener prevents the following ones from being called.
    pub fn emit<K: AsRef<str>>(&self, event_key: K) {
        let event_key = event_key.as_ref();
        let callbacks: Vec<Callback> = match self.listeners.lock().get(event_key) {
            Some(list) => list.iter().map(|l| l.callback.clone()).collect(),
            None => return,
        };
        trace!("Emitting `{}` event to {} listener(s)", event_key, callbacks.len());
        for callback in callbacks {
            callback();
        }
    }
}

impl EventBus {
    /// Number of listeners currently registered for given event.
    pub fn listener_count<K: AsRef<str>>(&self, event_key: K) -> usize {
        self.listeners.lock().get(event_key.as_ref()).map(|l| l.len()).unwrap_or(0)
    }

    /// Unregister all listeners of all events.
    pub fn clear(&self) {
        self.listeners.lock().clear();
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("EventBus");
        if let Ok(listeners) = self.listeners.try_lock() {
            for (key, list) in listeners.iter() {
                ds.field(key, &list.len());
            }
        }
        ds.finish()
    }
}


#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::{Arc, Mutex};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use spectral::prelude::*;

    use super::{Event, EventBus, Subscription, SubscriptionId};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let callback = {
            let count = count.clone();
            move || { count.fetch_add(1, Ordering::SeqCst); }
        };
        (count, callback)
    }

    #[test]
    fn thread_safe() {
        fn assert_sync<T: Sync>() {}
        fn assert_send<T: Send>() {}

        assert_sync::<EventBus>();
        assert_send::<EventBus>();
    }

    #[test]
    fn event_keys() {
        assert_eq!("onImageLoad", Event::ImageLoad.key());
        assert_eq!("afterRender", Event::AfterRender.key());
        assert_eq!(2, Event::iter_variants().count());
    }

    #[test]
    fn unique_ids() {
        let bus = EventBus::new();
        let a = bus.subscribe("x", || {});
        let b = bus.subscribe("x", || {});
        let c = bus.subscribe("y", || {});
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn emit_unsubscribe_emit() {
        let bus = EventBus::new();
        let (count, callback) = counter();

        let sub = bus.subscribe(Event::AfterRender, callback);
        bus.emit(Event::AfterRender);
        assert!(bus.unsubscribe(&sub));
        bus.emit(Event::AfterRender);

        assert_that!(count.load(Ordering::SeqCst)).is_equal_to(1);
    }

    #[test]
    fn registration_order() {
        let bus = EventBus::new();
        let calls = Arc::new(Mutex::new(vec![]));
        for i in 0..3 {
            let calls = calls.clone();
            let _ = bus.subscribe("order", move || calls.lock().unwrap().push(i));
        }
        bus.emit("order");
        assert_that!(*calls.lock().unwrap()).is_equal_to(vec![0, 1, 2]);
    }

    #[test]
    fn emit_without_listeners() {
        let bus = EventBus::new();
        bus.emit("nothing");
        assert_eq!(0, bus.listener_count("nothing"));
    }

    #[test]
    fn unsubscribe_unknown_id() {
        let bus = EventBus::new();
        let (count, callback) = counter();
        let _ = bus.subscribe("x", callback);

        let bogus = Subscription{id: SubscriptionId(9999), event_key: "x".into()};
        assert!(!bus.unsubscribe(&bogus));
        bus.emit("x");
        assert_eq!(1, count.load(Ordering::SeqCst));
    }

    #[test]
    fn unsubscribe_unknown_key() {
        let bus = EventBus::new();
        let bogus = Subscription{id: SubscriptionId(1), event_key: "never".into()};
        assert!(!bus.unsubscribe(&bogus));
    }

    #[test]
    fn subscribe_with_context() {
        let bus = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let _ = bus.subscribe_with("ctx", (seen.clone(), 42usize), |&(ref seen, value)| {
            seen.store(value, Ordering::SeqCst);
        });
        bus.emit("ctx");
        assert_eq!(42, seen.load(Ordering::SeqCst));
    }

    #[test]
    fn unsubscribe_self_during_emit() {
        let bus = Arc::new(EventBus::new());
        let (count, callback) = counter();

        let own_sub: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let sub = bus.subscribe("tick", {
            let bus = bus.clone();
            let own_sub = own_sub.clone();
            move || {
                if let Some(sub) = own_sub.lock().unwrap().take() {
                    bus.unsubscribe(&sub);
                }
            }
        });
        *own_sub.lock().unwrap() = Some(sub);
        let _ = bus.subscribe("tick", callback);

        bus.emit("tick");
        assert_eq!(1, count.load(Ordering::SeqCst));
        assert_eq!(1, bus.listener_count("tick"));

        bus.emit("tick");
        assert_eq!(2, count.load(Ordering::SeqCst));
    }

    #[test]
    fn clear() {
        let bus = EventBus::new();
        let _ = bus.subscribe(Event::ImageLoad, || {});
        bus.clear();
        assert_eq!(0, bus.listener_count(Event::ImageLoad));
    }

    #[test]
    fn panicking_listener_aborts_emit() {
        let bus = EventBus::new();
        let (count, callback) = counter();
        let _ = bus.subscribe(Event::AfterRender, || panic!("listener failed"));
        let _ = bus.subscribe(Event::AfterRender, callback);

        let result = panic::catch_unwind(AssertUnwindSafe(|| bus.emit(Event::AfterRender)));
        assert!(result.is_err());
        assert_that!(count.load(Ordering::SeqCst)).is_equal_to(0);
        assert_that!(bus.listener_count(Event::AfterRender)).is_equal_to(2);
    }
}
