//! weaver-editor-toolbar: headless contextual formatting toolbar.
//!
//! This crate provides:
//! - `Toolbar<B>` - mirrors engine state from a `Bus` and turns presses into `Intent`s
//! - `Projector` - pure projection of toolbar state into a `ToolbarLayout`
//! - `FeatureSet` - gating of controls by a host allow-list
//! - `EventBus` - in-process publish/subscribe channel
//! - `InteractionQueue` - work deferred until UI interactions settle

pub mod bus;
pub mod color;
pub mod config;
pub mod deferred;
pub mod error;
pub mod feature;
pub mod message;
pub mod render;
pub mod state;
pub mod toolbar;

pub use bus::{Bus, EventBus, Listener, ListenerHandle, ListenerId};
pub use color::{
    ColorChange, ColorKind, ColorToken, DEFAULT_PALETTE, SwatchHighlight, resolve_color,
};
pub use config::ToolbarConfig;
pub use deferred::InteractionQueue;
pub use error::{BusError, ToolbarError};
pub use feature::{FULL_FEATURES, Feature, FeatureSet, UnknownFeature};
pub use message::{
    Alignment, BusEvent, EventName, HistoryStep, IndentDirection, IndexDirection, InlineStyle,
    Intent, Notification,
};
pub use render::{ControlAction, ControlDescriptor, Presenter, Projector, ToolbarLayout};
pub use smol_str::SmolStr;
pub use state::{ToolbarMode, ToolbarState};
pub use toolbar::{ChangeCallback, ListenerRegistry, SUBSCRIPTIONS, Toolbar};
