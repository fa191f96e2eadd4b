//! The toolbar component: bus lifecycle, mode changes and press dispatch.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::bus::{Bus, EventBus, Listener, ListenerHandle};
use crate::color::{ColorToken, resolve_color};
use crate::config::ToolbarConfig;
use crate::deferred::InteractionQueue;
use crate::error::ToolbarError;
use crate::message::{BusEvent, EventName, Intent};
use crate::render::{ControlAction, ControlDescriptor, Presenter, Projector, ToolbarLayout};
use crate::state::{ToolbarMode, ToolbarState};

/// Notifications every mounted toolbar listens to.
pub const SUBSCRIPTIONS: [EventName; 2] = [EventName::ActiveStyleChanged, EventName::RowTypeChanged];

/// Called with the new revision after the toolbar state changes.
pub type ChangeCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Live bus registrations of one toolbar, at most one per event name.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    handles: BTreeMap<EventName, ListenerHandle>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handle`, returning any handle it displaced. The caller owns
    /// releasing the displaced one.
    #[must_use]
    pub fn insert(&mut self, handle: ListenerHandle) -> Option<ListenerHandle> {
        self.handles.insert(handle.name(), handle)
    }

    pub fn contains(&self, name: EventName) -> bool {
        self.handles.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Release every stored handle on `bus` and empty the registry.
    ///
    /// Works on any subset of handles, including none. Returns how many
    /// handles were handed back.
    pub fn release_all<B: Bus + ?Sized>(&mut self, bus: &B) -> usize {
        let handles = std::mem::take(&mut self.handles);
        let count = handles.len();
        for (name, handle) in handles {
            if !bus.unsubscribe(handle) {
                tracing::debug!(%name, "listener was already gone from the bus");
            }
        }
        count
    }
}

fn lock(state: &Mutex<ToolbarState>) -> MutexGuard<'_, ToolbarState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Contextual formatting toolbar.
///
/// Mirrors editing state the engine publishes on the bus and turns presses
/// into intents. Owns its bus registrations: [`mount`](Self::mount) takes
/// them, [`unmount`](Self::unmount) (or dropping the toolbar) gives them
/// back.
pub struct Toolbar<B: Bus = EventBus> {
    bus: B,
    queue: InteractionQueue,
    projector: Projector,
    state: Arc<Mutex<ToolbarState>>,
    listeners: ListenerRegistry,
    on_change: Option<ChangeCallback>,
    /// Dropped on unmount; deferred work holds a weak reference to it.
    life: Option<Arc<()>>,
}

impl<B: Bus> std::fmt::Debug for Toolbar<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolbar")
            .field("state", &*lock(&self.state))
            .field("listeners", &self.listeners)
            .field("alive", &self.life.is_some())
            .finish_non_exhaustive()
    }
}

impl<B: Bus> Toolbar<B> {
    /// Release every bus registration and stop pending deferred work.
    ///
    /// Safe to call any number of times, mounted or not.
    pub fn unmount(&mut self) {
        let released = self.listeners.release_all(&self.bus);
        let was_alive = self.life.take().is_some();
        if released > 0 || was_alive {
            tracing::debug!(released, "toolbar unmounted");
        }
    }

    /// Whether the toolbar currently receives engine notifications.
    pub fn is_synchronized(&self) -> bool {
        SUBSCRIPTIONS.iter().all(|name| self.listeners.contains(*name))
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
}

impl<B: Bus> Drop for Toolbar<B> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<B> Toolbar<B>
where
    B: Bus + Clone + Send + 'static,
{
    pub fn new(bus: B, queue: InteractionQueue, config: &ToolbarConfig) -> Self {
        Self {
            bus,
            queue,
            projector: Projector::from_config(config),
            state: Arc::new(Mutex::new(ToolbarState::new())),
            listeners: ListenerRegistry::new(),
            on_change: None,
            life: Some(Arc::new(())),
        }
    }

    /// Get notified whenever the toolbar needs re-rendering. Applies to
    /// listeners registered by later [`mount`](Self::mount) calls.
    pub fn with_change_callback(mut self, callback: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Subscribe to engine notifications.
    ///
    /// Already-held registrations are kept, so mounting twice is a no-op.
    /// If the bus refuses a registration, whatever this call registered is
    /// released again and the error is returned; the toolbar keeps
    /// rendering from its cached state, unsynchronized, and a later `mount`
    /// may succeed.
    pub fn mount(&mut self) -> Result<(), ToolbarError> {
        if self.is_synchronized() {
            return Ok(());
        }
        self.life.get_or_insert_with(|| Arc::new(()));

        for name in SUBSCRIPTIONS {
            if self.listeners.contains(name) {
                continue;
            }
            match self.bus.subscribe(name, self.listener()) {
                Ok(handle) => {
                    if let Some(stale) = self.listeners.insert(handle) {
                        self.bus.unsubscribe(stale);
                    }
                }
                Err(err) => {
                    let released = self.listeners.release_all(&self.bus);
                    tracing::warn!(
                        %name,
                        error = %err,
                        released,
                        "toolbar could not subscribe, rendering unsynchronized"
                    );
                    return Err(err.into());
                }
            }
        }

        tracing::debug!(listeners = self.listeners.len(), "toolbar mounted");
        Ok(())
    }

    fn listener(&self) -> Listener {
        let state = Arc::downgrade(&self.state);
        let on_change = self.on_change.clone();
        Arc::new(move |event: &BusEvent| {
            let BusEvent::Notification(notification) = event else {
                return;
            };
            let Some(state) = state.upgrade() else {
                return;
            };
            let revision = {
                let mut state = lock(&state);
                state.apply(notification);
                state.revision()
            };
            tracing::trace!(name = %notification.name(), revision, "toolbar state updated");
            if let Some(on_change) = &on_change {
                on_change(revision);
            }
        })
    }

    pub fn mode(&self) -> ToolbarMode {
        lock(&self.state).mode()
    }

    /// Copy of the current mode and cached engine state.
    pub fn state(&self) -> ToolbarState {
        lock(&self.state).clone()
    }

    pub fn revision(&self) -> u64 {
        lock(&self.state).revision()
    }

    /// Controls to show right now.
    pub fn layout(&self) -> ToolbarLayout {
        self.projector.project(&lock(&self.state))
    }

    pub fn present(&self, presenter: &mut impl Presenter) {
        presenter.present(&self.layout());
    }

    /// Handle a press on a control from the current layout.
    pub fn press(&mut self, control: &ControlDescriptor) -> Result<(), ToolbarError> {
        if control.disabled {
            tracing::warn!(feature = ?control.feature, "press on disabled control ignored");
            return Err(ToolbarError::ControlDisabled);
        }
        self.dispatch(&control.action)
    }

    /// Carry out a control action.
    pub fn dispatch(&mut self, action: &ControlAction) -> Result<(), ToolbarError> {
        match action {
            ControlAction::Emit(intent) => {
                self.emit(intent.clone());
                Ok(())
            }
            ControlAction::Open(mode) => self.transition(*mode),
            ControlAction::Close => self.transition(ToolbarMode::Default),
            ControlAction::SelectColor(token) => self.select_color(token),
        }
    }

    fn emit(&self, intent: Intent) {
        tracing::trace!(name = %intent.name(), "toolbar intent");
        self.bus.emit(intent.into());
    }

    fn transition(&mut self, to: ToolbarMode) -> Result<(), ToolbarError> {
        let revision = {
            let mut state = lock(&self.state);
            let from = state.mode();
            if !state.transition(to) {
                tracing::warn!(%from, %to, "rejected toolbar mode change");
                return Err(ToolbarError::InvalidTransition { from, to });
            }
            tracing::debug!(%from, %to, "toolbar mode changed");
            state.revision()
        };
        if let Some(on_change) = &self.on_change {
            on_change(revision);
        }
        Ok(())
    }

    /// Resolve a swatch against the open picker and queue the color change
    /// until interactions settle. The picker stays open.
    ///
    /// An unmounted toolbar queues nothing and returns
    /// [`ToolbarError::Unmounted`].
    fn select_color(&mut self, token: &ColorToken) -> Result<(), ToolbarError> {
        let mode = self.mode();
        let kind = mode.color_kind().ok_or(ToolbarError::NotAColorMode(mode))?;
        let Some(life) = &self.life else {
            tracing::debug!(%kind, "color selection on unmounted toolbar ignored");
            return Err(ToolbarError::Unmounted);
        };
        let change = resolve_color(kind, token);
        tracing::trace!(color = %change.color, %kind, "color change queued");

        let bus = self.bus.clone();
        self.queue.run_while_alive(life, move || {
            bus.emit(Intent::ChangeColorStyle(change).into());
        });
        Ok(())
    }
}
