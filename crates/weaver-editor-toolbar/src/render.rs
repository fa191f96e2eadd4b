//! Pure projection from toolbar state to a declarative control layout.
//!
//! Nothing here draws. A [`Presenter`] supplied by the host turns the
//! [`ToolbarLayout`] into widgets, DOM nodes or whatever the platform uses.

use smol_str::SmolStr;

use crate::color::{ColorKind, ColorToken, SwatchHighlight};
use crate::config::ToolbarConfig;
use crate::feature::{Feature, FeatureSet};
use crate::message::{
    Alignment, HistoryStep, IndentDirection, IndexDirection, InlineStyle, Intent,
};
use crate::state::{ToolbarMode, ToolbarState};

/// What pressing a control does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    /// Send an intent to the editing engine.
    Emit(Intent),
    /// Open a picker view.
    Open(ToolbarMode),
    /// Close the picker and return to the default view.
    Close,
    /// Pick a swatch in the open color or fill picker.
    SelectColor(ColorToken),
}

/// One rendered control. Rebuilt on every render, carries no identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDescriptor {
    /// Feature gating this control, if any.
    pub feature: Option<Feature>,
    pub icon: Option<&'static str>,
    pub label: Option<&'static str>,
    /// Color to paint a swatch with.
    pub swatch: Option<SmolStr>,
    /// Show a dropdown chevron.
    pub arrow: bool,
    pub active: bool,
    pub disabled: bool,
    pub action: ControlAction,
}

impl ControlDescriptor {
    pub fn button(icon: &'static str, action: ControlAction) -> Self {
        Self {
            feature: None,
            icon: Some(icon),
            label: None,
            swatch: None,
            arrow: false,
            active: false,
            disabled: false,
            action,
        }
    }

    pub fn text(label: &'static str, action: ControlAction) -> Self {
        Self {
            icon: None,
            label: Some(label),
            ..Self::button("", action)
        }
    }

    pub fn swatch(color: SmolStr, active: bool) -> Self {
        Self {
            icon: None,
            active,
            action: ControlAction::SelectColor(ColorToken::Named(color.clone())),
            swatch: Some(color),
            ..Self::button("", ControlAction::Close)
        }
    }

    fn gated(mut self, feature: Feature) -> Self {
        self.feature = Some(feature);
        self
    }

    fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn with_arrow(mut self) -> Self {
        self.arrow = true;
        self
    }

    fn toggled(mut self, active: bool, disabled: bool) -> Self {
        self.active = active;
        self.disabled = disabled;
        self
    }
}

/// Controls for one render, grouped by where they sit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarLayout {
    pub mode: ToolbarMode,
    /// Fixed controls before the scrolling strip.
    pub leading: Vec<ControlDescriptor>,
    /// Horizontally scrolling strip.
    pub scroll: Vec<ControlDescriptor>,
    /// Fixed controls after the scrolling strip.
    pub trailing: Vec<ControlDescriptor>,
}

impl ToolbarLayout {
    /// All controls, left to right.
    pub fn controls(&self) -> impl Iterator<Item = &ControlDescriptor> {
        self.leading
            .iter()
            .chain(self.scroll.iter())
            .chain(self.trailing.iter())
    }

    /// Gated features present in this layout, left to right.
    pub fn features(&self) -> Vec<Feature> {
        self.controls().filter_map(|c| c.feature).collect()
    }

    pub fn find(&self, feature: Feature) -> Option<&ControlDescriptor> {
        self.controls().find(|c| c.feature == Some(feature))
    }
}

/// Host-side presentation of a layout.
pub trait Presenter {
    fn present(&mut self, layout: &ToolbarLayout);
}

/// Builds layouts from state using a fixed configuration.
#[derive(Debug, Clone)]
pub struct Projector {
    features: FeatureSet,
    palette: Vec<SmolStr>,
    highlight: SwatchHighlight,
}

impl Default for Projector {
    fn default() -> Self {
        Self::from_config(&ToolbarConfig::default())
    }
}

impl Projector {
    pub fn from_config(config: &ToolbarConfig) -> Self {
        Self {
            features: config.feature_set(),
            palette: config.palette(),
            highlight: config.swatch_highlight,
        }
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn project(&self, state: &ToolbarState) -> ToolbarLayout {
        match state.mode() {
            ToolbarMode::Default => self.default_view(state),
            ToolbarMode::Align => align_view(),
            ToolbarMode::Fill => self.color_view(state, ColorKind::Fill),
            ToolbarMode::Color => self.color_view(state, ColorKind::Color),
        }
    }

    fn default_view(&self, state: &ToolbarState) -> ToolbarLayout {
        let mut scroll = Vec::new();
        let mut trailing = Vec::new();
        for feature in self.features.iter() {
            let control = default_control(feature, state);
            match feature {
                Feature::Fullscreen | Feature::KeyboardClose => trailing.push(control),
                _ => scroll.push(control),
            }
        }
        ToolbarLayout {
            mode: ToolbarMode::Default,
            leading: Vec::new(),
            scroll,
            trailing,
        }
    }

    fn color_view(&self, state: &ToolbarState, kind: ColorKind) -> ToolbarLayout {
        let prefix = self.highlight.highlight_kind(kind);
        let scroll = self
            .palette
            .iter()
            .map(|color| {
                let active = state.has_style(&prefix.style_id(color));
                ControlDescriptor::swatch(color.clone(), active)
            })
            .collect();

        ToolbarLayout {
            mode: state.mode(),
            leading: vec![ControlDescriptor::button(
                "water-off",
                ControlAction::SelectColor(ColorToken::Default),
            )],
            scroll,
            trailing: picker_trailing(),
        }
    }
}

fn align_view() -> ToolbarLayout {
    ToolbarLayout {
        mode: ToolbarMode::Align,
        leading: Vec::new(),
        scroll: Alignment::ALL
            .into_iter()
            .map(|alignment| {
                ControlDescriptor::button(
                    alignment.icon(),
                    ControlAction::Emit(Intent::AlignRow { alignment }),
                )
            })
            .collect(),
        trailing: picker_trailing(),
    }
}

fn picker_trailing() -> Vec<ControlDescriptor> {
    vec![
        ControlDescriptor::button("close", ControlAction::Close),
        ControlDescriptor::button("keyboard-close", ControlAction::Emit(Intent::HideKeyboard)),
    ]
}

fn style_toggle(icon: &'static str, style: InlineStyle, state: &ToolbarState) -> ControlDescriptor {
    ControlDescriptor::button(icon, ControlAction::Emit(Intent::ToggleStyle { style }))
        .toggled(state.is_style_active(style), state.is_style_disabled(style))
}

/// The default-view control for `feature`.
fn default_control(feature: Feature, state: &ToolbarState) -> ControlDescriptor {
    use ControlAction::Emit;

    let control = match feature {
        Feature::Add => ControlDescriptor::button("plus-circle-outline", Emit(Intent::ShowInsertBlock)),
        Feature::TurnInto => {
            ControlDescriptor::text("Turn Into", Emit(Intent::ChangeBlockType)).with_arrow()
        }
        Feature::Image => ControlDescriptor::button("image", Emit(Intent::ShowUploadFile)),
        Feature::Bold => style_toggle("format-bold", InlineStyle::Bold, state),
        Feature::Italic => style_toggle("format-italic", InlineStyle::Italic, state),
        Feature::Underline => style_toggle("format-underline", InlineStyle::Underline, state),
        Feature::Strikethrough => {
            style_toggle("format-strikethrough-variant", InlineStyle::Strikethrough, state)
        }
        Feature::Align => {
            ControlDescriptor::button("format-align-center", ControlAction::Open(ToolbarMode::Align))
        }
        Feature::Fill => {
            ControlDescriptor::button("format-color-fill", ControlAction::Open(ToolbarMode::Fill))
        }
        Feature::TextColor => {
            ControlDescriptor::button("format-color-text", ControlAction::Open(ToolbarMode::Color))
        }
        Feature::ClearFormat => ControlDescriptor::button("format-clear", Emit(Intent::ClearStyles)),
        Feature::Code => style_toggle("code-json", InlineStyle::Code, state).labelled("Code"),
        Feature::Duplicate => ControlDescriptor::text("Duplicate", Emit(Intent::DuplicateRow)),
        Feature::IndentIncrease => ControlDescriptor::button(
            "format-indent-increase",
            Emit(Intent::ChangeBlockIndent {
                direction: IndentDirection::Increase,
            }),
        ),
        Feature::IndentDecrease => ControlDescriptor::button(
            "format-indent-decrease",
            Emit(Intent::ChangeBlockIndent {
                direction: IndentDirection::Decrease,
            }),
        ),
        Feature::MoveUp => ControlDescriptor::button(
            "format-vertical-align-top",
            Emit(Intent::ChangeBlockIndex {
                direction: IndexDirection::Up,
            }),
        ),
        Feature::MoveDown => ControlDescriptor::button(
            "format-vertical-align-bottom",
            Emit(Intent::ChangeBlockIndex {
                direction: IndexDirection::Down,
            }),
        ),
        Feature::Undo => ControlDescriptor::button("undo", Emit(Intent::BrowseHistory(HistoryStep::Undo))),
        Feature::Redo => ControlDescriptor::button("redo", Emit(Intent::BrowseHistory(HistoryStep::Redo))),
        Feature::Delete => ControlDescriptor::button("delete", Emit(Intent::DeleteBlock)),
        Feature::Fullscreen => ControlDescriptor::button("fullscreen", Emit(Intent::ToggleFullScreen)),
        Feature::KeyboardClose => {
            ControlDescriptor::button("keyboard-close", Emit(Intent::HideKeyboard))
        }
    };
    control.gated(feature)
}
