//! Toolbar view mode and the cached editing state it projects.

use std::collections::BTreeSet;
use std::fmt;

use smol_str::SmolStr;

use crate::color::ColorKind;
use crate::message::{InlineStyle, Notification};

/// Which set of controls the toolbar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolbarMode {
    /// Formatting and block controls.
    #[default]
    Default,
    /// Row alignment picker.
    Align,
    /// Background fill picker.
    Fill,
    /// Text color picker.
    Color,
}

impl ToolbarMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Align => "align",
            Self::Fill => "fill",
            Self::Color => "color",
        }
    }

    /// Whether the toolbar may switch from `self` to `to`.
    ///
    /// Pickers open only from the default view and only close back to it.
    pub fn can_transition(self, to: ToolbarMode) -> bool {
        matches!(
            (self, to),
            (Self::Default, Self::Align | Self::Fill | Self::Color)
                | (Self::Align | Self::Fill | Self::Color, Self::Default)
        )
    }

    /// The color property a picker mode edits, if any.
    pub fn color_kind(self) -> Option<ColorKind> {
        match self {
            Self::Color => Some(ColorKind::Color),
            Self::Fill => Some(ColorKind::Fill),
            Self::Default | Self::Align => None,
        }
    }
}

impl fmt::Display for ToolbarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode plus a read-only mirror of what the engine last published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarState {
    mode: ToolbarMode,
    active_styles: BTreeSet<SmolStr>,
    row_type: SmolStr,
    revision: u64,
}

impl ToolbarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ToolbarMode {
        self.mode
    }

    pub fn active_styles(&self) -> &BTreeSet<SmolStr> {
        &self.active_styles
    }

    pub fn row_type(&self) -> &str {
        &self.row_type
    }

    /// Bumped on every change; hosts compare it to skip redundant renders.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the cached engine state from a notification.
    ///
    /// Each notification overwrites its field wholesale. The mode is never
    /// touched.
    pub fn apply(&mut self, notification: &Notification) {
        match notification {
            Notification::ActiveStyleChanged { active_styles } => {
                self.active_styles = active_styles.iter().cloned().collect();
            }
            Notification::RowTypeChanged { row_type } => {
                self.row_type = row_type.clone();
            }
        }
        self.revision += 1;
    }

    /// Move to `to` if the state machine allows it. Returns false otherwise.
    pub fn transition(&mut self, to: ToolbarMode) -> bool {
        if !self.mode.can_transition(to) {
            return false;
        }
        self.mode = to;
        self.revision += 1;
        true
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.active_styles.contains(style)
    }

    pub fn is_style_active(&self, style: InlineStyle) -> bool {
        self.has_style(style.as_str())
    }

    pub fn is_heading_row(&self) -> bool {
        self.row_type.contains("heading")
    }

    pub fn is_code_row(&self) -> bool {
        self.row_type.contains("code")
    }

    /// Whether toggling `style` makes no sense in the current row.
    pub fn is_style_disabled(&self, style: InlineStyle) -> bool {
        match style {
            InlineStyle::Bold
            | InlineStyle::Italic
            | InlineStyle::Underline
            | InlineStyle::Strikethrough => self.is_heading_row(),
            InlineStyle::Code => self.is_code_row(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [ToolbarMode; 4] = [
        ToolbarMode::Default,
        ToolbarMode::Align,
        ToolbarMode::Fill,
        ToolbarMode::Color,
    ];

    #[test]
    fn test_allowed_transitions() {
        let allowed: Vec<_> = ALL_MODES
            .iter()
            .flat_map(|from| ALL_MODES.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| from.can_transition(*to))
            .collect();

        assert_eq!(
            allowed,
            vec![
                (ToolbarMode::Default, ToolbarMode::Align),
                (ToolbarMode::Default, ToolbarMode::Fill),
                (ToolbarMode::Default, ToolbarMode::Color),
                (ToolbarMode::Align, ToolbarMode::Default),
                (ToolbarMode::Fill, ToolbarMode::Default),
                (ToolbarMode::Color, ToolbarMode::Default),
            ]
        );
    }

    #[test]
    fn test_rejected_transition_leaves_state() {
        let mut state = ToolbarState::new();
        assert!(state.transition(ToolbarMode::Align));
        let before = state.clone();

        assert!(!state.transition(ToolbarMode::Fill));
        assert_eq!(state, before);
    }

    #[test]
    fn test_active_styles_are_replaced() {
        let mut state = ToolbarState::new();
        state.apply(&Notification::active_styles(["bold", "code"]));
        state.apply(&Notification::active_styles(["italic"]));

        let styles: Vec<_> = state.active_styles().iter().map(SmolStr::as_str).collect();
        assert_eq!(styles, vec!["italic"]);
    }

    #[test]
    fn test_notifications_do_not_change_mode() {
        let mut state = ToolbarState::new();
        state.transition(ToolbarMode::Color);
        state.apply(&Notification::row_type("paragraph"));
        state.apply(&Notification::active_styles(["color-red"]));
        assert_eq!(state.mode(), ToolbarMode::Color);
        assert_eq!(state.revision(), 3);
    }

    #[test]
    fn test_heading_row_disables_inline_styles() {
        let mut state = ToolbarState::new();
        state.apply(&Notification::row_type("heading-1"));

        assert!(state.is_style_disabled(InlineStyle::Bold));
        assert!(state.is_style_disabled(InlineStyle::Italic));
        assert!(state.is_style_disabled(InlineStyle::Underline));
        assert!(state.is_style_disabled(InlineStyle::Strikethrough));
        assert!(!state.is_style_disabled(InlineStyle::Code));
    }

    #[test]
    fn test_code_row_disables_only_code() {
        let mut state = ToolbarState::new();
        state.apply(&Notification::row_type("code"));

        assert!(state.is_style_disabled(InlineStyle::Code));
        assert!(!state.is_style_disabled(InlineStyle::Bold));
        assert!(!state.is_style_disabled(InlineStyle::Italic));
        assert!(!state.is_style_disabled(InlineStyle::Underline));
        assert!(!state.is_style_disabled(InlineStyle::Strikethrough));
    }

    #[test]
    fn test_color_kind_only_for_pickers() {
        assert_eq!(ToolbarMode::Color.color_kind(), Some(ColorKind::Color));
        assert_eq!(ToolbarMode::Fill.color_kind(), Some(ColorKind::Fill));
        assert_eq!(ToolbarMode::Align.color_kind(), None);
        assert_eq!(ToolbarMode::Default.color_kind(), None);
    }
}
