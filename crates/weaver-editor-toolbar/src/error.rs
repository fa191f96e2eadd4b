//! Error types for the toolbar and its bus integration.

use miette::Diagnostic;

use crate::message::EventName;
use crate::state::ToolbarMode;

/// Failure to register a listener on the bus.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum BusError {
    /// The bus has been shut down and accepts no new listeners.
    #[error("event bus is closed")]
    #[diagnostic(code(weaver_toolbar::bus::closed))]
    Closed,

    /// Too many listeners are already registered for this event.
    #[error("listener limit of {limit} reached for {name}")]
    #[diagnostic(
        code(weaver_toolbar::bus::listener_limit),
        help("some component is probably not releasing its listeners on unmount")
    )]
    ListenerLimit { name: EventName, limit: usize },
}

/// Main error type for toolbar operations.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ToolbarError {
    /// Listener registration failed; the toolbar is not synchronized.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Bus(#[from] BusError),

    /// A mode change that the state machine does not allow.
    #[error("cannot switch toolbar from {from} to {to}")]
    #[diagnostic(code(weaver_toolbar::invalid_transition))]
    InvalidTransition { from: ToolbarMode, to: ToolbarMode },

    /// A swatch was pressed while no color picker is open.
    #[error("color selection requires the color or fill view, toolbar is in {0}")]
    #[diagnostic(code(weaver_toolbar::not_a_color_mode))]
    NotAColorMode(ToolbarMode),

    /// The toolbar was unmounted and no longer emits deferred work.
    #[error("toolbar is unmounted")]
    #[diagnostic(
        code(weaver_toolbar::unmounted),
        help("call mount() again before selecting a color")
    )]
    Unmounted,

    /// A disabled control was pressed.
    #[error("control is disabled")]
    #[diagnostic(code(weaver_toolbar::control_disabled))]
    ControlDisabled,

    /// Configuration could not be parsed.
    #[error("invalid toolbar configuration: {0}")]
    #[diagnostic(code(weaver_toolbar::config))]
    Config(#[from] serde_json::Error),
}
