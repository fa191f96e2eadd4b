//! Text color and fill resolution.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};

/// Named colors offered by the picker, in display order.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "gray", "brown", "red", "orange", "yellow", "green", "teal", "blue", "purple", "pink",
];

/// Which color property a color change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKind {
    /// Text color.
    Color,
    /// Background fill.
    Fill,
}

impl ColorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Fill => "fill",
        }
    }

    /// What the "clear" swatch resolves to for this kind.
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Color => "black",
            Self::Fill => "transparent",
        }
    }

    /// Style identifier the engine reports for this kind and color,
    /// e.g. `fill-yellow`.
    pub fn style_id(self, color: &str) -> SmolStr {
        format_smolstr!("{}-{}", self.as_str(), color)
    }
}

impl fmt::Display for ColorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A swatch the user picked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorToken {
    /// The "clear" swatch.
    Default,
    Named(SmolStr),
}

impl ColorToken {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self::Named(name.into())
    }
}

impl From<&str> for ColorToken {
    fn from(s: &str) -> Self {
        if s == "default" {
            Self::Default
        } else {
            Self::Named(s.into())
        }
    }
}

/// Payload of a `ChangeColorStyle` intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorChange {
    pub color: SmolStr,
    #[serde(rename = "type")]
    pub kind: ColorKind,
}

/// Map a picked swatch to the concrete color change for `kind`.
pub fn resolve_color(kind: ColorKind, token: &ColorToken) -> ColorChange {
    let color = match token {
        ColorToken::Default => SmolStr::new_static(kind.default_color()),
        ColorToken::Named(name) => name.clone(),
    };
    ColorChange { color, kind }
}

/// How swatch highlighting picks the style prefix to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwatchHighlight {
    /// Use the picker that is open: `color-*` in the color view, `fill-*`
    /// in the fill view.
    #[default]
    LiveMode,
    /// Always look for `color-*`, even in the fill view. Matches toolbars
    /// shipped before fill highlighting worked.
    ColorOnly,
}

impl SwatchHighlight {
    /// The prefix kind used when highlighting swatches in `open` view.
    pub fn highlight_kind(self, open: ColorKind) -> ColorKind {
        match self {
            Self::LiveMode => open,
            Self::ColorOnly => ColorKind::Color,
        }
    }
}
