//! Messages exchanged with the editing engine over the bus.
//!
//! [`Notification`]s flow from the engine to the toolbar, [`Intent`]s flow
//! from the toolbar to the engine. Both serialize as
//! `{"event": "<Name>", "params": {...}}` so a host can bridge the bus to an
//! engine living on the other side of an FFI or worker boundary.

use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;

use crate::color::ColorChange;

/// Name of an event on the bus. Listeners subscribe by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventName {
    // === Notifications ===
    ActiveStyleChanged,
    RowTypeChanged,

    // === Intents ===
    ShowInsertBlock,
    ChangeBlockType,
    ShowUploadFile,
    ToggleStyle,
    AlignRow,
    ChangeColorStyle,
    ClearStyles,
    DuplicateRow,
    ChangeBlockIndent,
    ChangeBlockIndex,
    BrowseHistory,
    DeleteBlock,
    ToggleFullScreen,
    HideKeyboard,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActiveStyleChanged => "ActiveStyleChanged",
            Self::RowTypeChanged => "RowTypeChanged",
            Self::ShowInsertBlock => "ShowInsertBlock",
            Self::ChangeBlockType => "ChangeBlockType",
            Self::ShowUploadFile => "ShowUploadFile",
            Self::ToggleStyle => "ToggleStyle",
            Self::AlignRow => "AlignRow",
            Self::ChangeColorStyle => "ChangeColorStyle",
            Self::ClearStyles => "ClearStyles",
            Self::DuplicateRow => "DuplicateRow",
            Self::ChangeBlockIndent => "ChangeBlockIndent",
            Self::ChangeBlockIndex => "ChangeBlockIndex",
            Self::BrowseHistory => "BrowseHistory",
            Self::DeleteBlock => "DeleteBlock",
            Self::ToggleFullScreen => "ToggleFullScreen",
            Self::HideKeyboard => "HideKeyboard",
        }
    }

    /// Whether the engine publishes this event (as opposed to consuming it).
    pub fn is_notification(self) -> bool {
        matches!(self, Self::ActiveStyleChanged | Self::RowTypeChanged)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State published by the editing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "params")]
pub enum Notification {
    /// Styles applied at the caret or selection.
    ActiveStyleChanged {
        #[serde(rename = "activeStyles")]
        active_styles: Vec<SmolStr>,
    },
    /// Type of the block holding the caret, e.g. `heading-1` or `code`.
    RowTypeChanged {
        #[serde(rename = "type")]
        row_type: SmolStr,
    },
}

impl Notification {
    pub fn active_styles<I, S>(styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self::ActiveStyleChanged {
            active_styles: styles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn row_type(row_type: impl Into<SmolStr>) -> Self {
        Self::RowTypeChanged {
            row_type: row_type.into(),
        }
    }

    pub fn name(&self) -> EventName {
        match self {
            Self::ActiveStyleChanged { .. } => EventName::ActiveStyleChanged,
            Self::RowTypeChanged { .. } => EventName::RowTypeChanged,
        }
    }
}

/// Inline styles the toolbar can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

impl InlineStyle {
    /// Identifier used both in intents and in the active style set.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Center,
    Justify,
    Left,
    Right,
}

impl Alignment {
    /// Picker order.
    pub const ALL: [Alignment; 4] = [Self::Center, Self::Justify, Self::Left, Self::Right];

    pub fn icon(self) -> &'static str {
        match self {
            Self::Center => "format-align-center",
            Self::Justify => "format-align-justify",
            Self::Left => "format-align-left",
            Self::Right => "format-align-right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentDirection {
    Increase,
    Decrease,
}

/// Direction to move a block within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexDirection {
    Up,
    Down,
}

/// History navigation request. Serializes as `{"undo": true}` or
/// `{"redo": true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryStep {
    Undo,
    Redo,
}

impl HistoryStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

impl Serialize for HistoryStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.as_str(), &true)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for HistoryStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr {
            #[serde(default)]
            undo: bool,
            #[serde(default)]
            redo: bool,
        }

        let repr = Repr::deserialize(deserializer)?;
        match (repr.undo, repr.redo) {
            (true, false) => Ok(Self::Undo),
            (false, true) => Ok(Self::Redo),
            _ => Err(D::Error::custom(
                "expected exactly one of `undo` or `redo` to be true",
            )),
        }
    }
}

/// A user action the editing engine should carry out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "params")]
pub enum Intent {
    ShowInsertBlock,
    ChangeBlockType,
    ShowUploadFile,
    ToggleStyle {
        style: InlineStyle,
    },
    AlignRow {
        #[serde(rename = "type")]
        alignment: Alignment,
    },
    ChangeColorStyle(ColorChange),
    ClearStyles,
    DuplicateRow,
    ChangeBlockIndent {
        direction: IndentDirection,
    },
    ChangeBlockIndex {
        direction: IndexDirection,
    },
    BrowseHistory(HistoryStep),
    DeleteBlock,
    ToggleFullScreen,
    HideKeyboard,
}

impl Intent {
    pub fn name(&self) -> EventName {
        match self {
            Self::ShowInsertBlock => EventName::ShowInsertBlock,
            Self::ChangeBlockType => EventName::ChangeBlockType,
            Self::ShowUploadFile => EventName::ShowUploadFile,
            Self::ToggleStyle { .. } => EventName::ToggleStyle,
            Self::AlignRow { .. } => EventName::AlignRow,
            Self::ChangeColorStyle(_) => EventName::ChangeColorStyle,
            Self::ClearStyles => EventName::ClearStyles,
            Self::DuplicateRow => EventName::DuplicateRow,
            Self::ChangeBlockIndent { .. } => EventName::ChangeBlockIndent,
            Self::ChangeBlockIndex { .. } => EventName::ChangeBlockIndex,
            Self::BrowseHistory(_) => EventName::BrowseHistory,
            Self::DeleteBlock => EventName::DeleteBlock,
            Self::ToggleFullScreen => EventName::ToggleFullScreen,
            Self::HideKeyboard => EventName::HideKeyboard,
        }
    }
}

/// Anything that travels over the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BusEvent {
    Notification(Notification),
    Intent(Intent),
}

impl BusEvent {
    pub fn name(&self) -> EventName {
        match self {
            Self::Notification(n) => n.name(),
            Self::Intent(i) => i.name(),
        }
    }
}

impl From<Notification> for BusEvent {
    fn from(n: Notification) -> Self {
        Self::Notification(n)
    }
}

impl From<Intent> for BusEvent {
    fn from(i: Intent) -> Self {
        Self::Intent(i)
    }
}
