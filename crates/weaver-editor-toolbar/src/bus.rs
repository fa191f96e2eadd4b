//! Publish/subscribe bus between the toolbar and the editing engine.
//!
//! Provides:
//! - `Bus` trait, the seam to whatever event channel the host uses
//! - `EventBus` - in-process implementation with synchronous fan-out

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::BusError;
use crate::message::{BusEvent, EventName};

/// Callback invoked for every event emitted under the subscribed name.
pub type Listener = Arc<dyn Fn(&BusEvent) + Send + Sync>;

/// Identifies one registration on a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Subscription token returned by [`Bus::subscribe`].
///
/// Not `Clone`: giving it back to [`Bus::unsubscribe`] consumes it, so a
/// registration can only be released once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a handle leaks the listener until the bus is dropped"]
pub struct ListenerHandle {
    id: ListenerId,
    name: EventName,
}

impl ListenerHandle {
    /// For `Bus` implementations handing out their own ids.
    pub fn new(id: ListenerId, name: EventName) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn name(&self) -> EventName {
        self.name
    }
}

/// An event channel shared by the toolbar and the editing engine.
///
/// Implementations must deliver events synchronously to every listener
/// registered under the event's name at the time of emission.
pub trait Bus {
    /// Register `listener` for events named `name`.
    fn subscribe(&self, name: EventName, listener: Listener) -> Result<ListenerHandle, BusError>;

    /// Remove a registration. Returns false if it was already gone.
    fn unsubscribe(&self, handle: ListenerHandle) -> bool;

    /// Deliver `event` to its listeners. Never fails and never blocks on
    /// the receivers.
    fn emit(&self, event: BusEvent);
}

impl<B: Bus + ?Sized> Bus for Arc<B> {
    fn subscribe(&self, name: EventName, listener: Listener) -> Result<ListenerHandle, BusError> {
        (**self).subscribe(name, listener)
    }

    fn unsubscribe(&self, handle: ListenerHandle) -> bool {
        (**self).unsubscribe(handle)
    }

    fn emit(&self, event: BusEvent) {
        (**self).emit(event)
    }
}

#[derive(Default)]
struct BusInner {
    listeners: BTreeMap<EventName, Vec<(ListenerId, Listener)>>,
    next_id: u64,
    closed: bool,
    listener_limit: Option<usize>,
}

/// In-process event bus.
///
/// Cloning yields another handle to the same bus. Listeners run outside the
/// internal lock, so they may emit or unsubscribe from inside a callback.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<BusInner>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("EventBus")
            .field("listeners", &inner.listeners.values().map(Vec::len).sum::<usize>())
            .field("closed", &inner.closed)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus that refuses more than `limit` listeners per event name.
    pub fn with_listener_limit(limit: usize) -> Self {
        let bus = Self::default();
        bus.lock().listener_limit = Some(limit);
        bus
    }

    fn lock(&self) -> MutexGuard<'_, BusInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stop accepting new listeners. Existing listeners keep receiving
    /// events until they unsubscribe.
    pub fn close(&self) {
        self.lock().closed = true;
        tracing::debug!("event bus closed");
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Number of live listeners for `name`.
    pub fn listener_count(&self, name: EventName) -> usize {
        self.lock().listeners.get(&name).map_or(0, Vec::len)
    }

    /// Number of live listeners across all names.
    pub fn total_listeners(&self) -> usize {
        self.lock().listeners.values().map(Vec::len).sum()
    }
}

impl Bus for EventBus {
    fn subscribe(&self, name: EventName, listener: Listener) -> Result<ListenerHandle, BusError> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(BusError::Closed);
        }

        if let Some(limit) = inner.listener_limit {
            let held = inner.listeners.get(&name).map_or(0, Vec::len);
            if held >= limit {
                return Err(BusError::ListenerLimit { name, limit });
            }
        }
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.entry(name).or_default().push((id, listener));

        tracing::trace!(%name, id = id.0, "listener registered");
        Ok(ListenerHandle { id, name })
    }

    fn unsubscribe(&self, handle: ListenerHandle) -> bool {
        let mut inner = self.lock();
        let Some(slot) = inner.listeners.get_mut(&handle.name) else {
            return false;
        };
        let before = slot.len();
        slot.retain(|(id, _)| *id != handle.id);
        let removed = slot.len() != before;
        if slot.is_empty() {
            inner.listeners.remove(&handle.name);
        }

        tracing::trace!(name = %handle.name, id = handle.id.0, removed, "listener released");
        removed
    }

    fn emit(&self, event: BusEvent) {
        let name = event.name();
        // Snapshot so callbacks can re-enter the bus.
        let listeners: Vec<Listener> = self
            .lock()
            .listeners
            .get(&name)
            .map(|slot| slot.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();

        tracing::trace!(%name, listeners = listeners.len(), "emit");
        for listener in listeners {
            listener(&event);
        }
    }
}
