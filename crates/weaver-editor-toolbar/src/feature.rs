//! Feature catalog and feature gating.
//!
//! Every control in the default toolbar view belongs to exactly one
//! [`Feature`]. Hosts restrict the toolbar by passing a subset of feature
//! identifiers; the layout order always follows [`FULL_FEATURES`], never the
//! order the host listed them in.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A toolbar feature.
///
/// Variant order is the catalog order, so the derived `Ord` sorts features
/// the way they are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Add,
    TurnInto,
    Image,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Align,
    Fill,
    TextColor,
    ClearFormat,
    Code,
    Duplicate,
    IndentIncrease,
    IndentDecrease,
    MoveUp,
    MoveDown,
    Undo,
    Redo,
    Delete,
    Fullscreen,
    KeyboardClose,
}

/// The full feature catalog, in layout order.
pub const FULL_FEATURES: [Feature; 22] = [
    Feature::Add,
    Feature::TurnInto,
    Feature::Image,
    Feature::Bold,
    Feature::Italic,
    Feature::Underline,
    Feature::Strikethrough,
    Feature::Align,
    Feature::Fill,
    Feature::TextColor,
    Feature::ClearFormat,
    Feature::Code,
    Feature::Duplicate,
    Feature::IndentIncrease,
    Feature::IndentDecrease,
    Feature::MoveUp,
    Feature::MoveDown,
    Feature::Undo,
    Feature::Redo,
    Feature::Delete,
    Feature::Fullscreen,
    Feature::KeyboardClose,
];

impl Feature {
    /// The stable identifier hosts use in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::TurnInto => "turn into",
            Self::Image => "image",
            Self::Bold => "format-bold",
            Self::Italic => "format-italic",
            Self::Underline => "format-underline",
            Self::Strikethrough => "format-strikethrough-variant",
            Self::Align => "format-align-center",
            Self::Fill => "format-color-fill",
            Self::TextColor => "format-color-text",
            Self::ClearFormat => "format-clear",
            Self::Code => "code",
            Self::Duplicate => "duplicate",
            Self::IndentIncrease => "format-indent-increase",
            Self::IndentDecrease => "format-indent-decrease",
            Self::MoveUp => "format-vertical-align-top",
            Self::MoveDown => "format-vertical-align-bottom",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Delete => "delete",
            Self::Fullscreen => "fullscreen",
            Self::KeyboardClose => "keyboard-close",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an identifier is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFeature(pub String);

impl fmt::Display for UnknownFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown toolbar feature: {:?}", self.0)
    }
}

impl std::error::Error for UnknownFeature {}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FULL_FEATURES
            .iter()
            .copied()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_owned()))
    }
}

/// The set of features a toolbar offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    enabled: BTreeSet<Feature>,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FeatureSet {
    /// Every feature in the catalog.
    pub fn all() -> Self {
        Self {
            enabled: FULL_FEATURES.into_iter().collect(),
        }
    }

    /// No features at all.
    pub fn none() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }

    /// Build a set from host-supplied identifiers.
    ///
    /// Unknown identifiers are skipped and duplicates collapse.
    pub fn from_identifiers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut enabled = BTreeSet::new();
        for id in ids {
            match id.as_ref().parse::<Feature>() {
                Ok(feature) => {
                    enabled.insert(feature);
                }
                Err(unknown) => {
                    tracing::trace!(id = %unknown.0, "ignoring unknown toolbar feature");
                }
            }
        }
        Self { enabled }
    }

    /// Resolve the effective set from an optional allow-list.
    ///
    /// `None` enables the whole catalog. `Some` of an empty list hides
    /// every feature.
    pub fn from_config<S: AsRef<str>>(ids: Option<&[S]>) -> Self {
        match ids {
            None => Self::all(),
            Some(ids) => Self::from_identifiers(ids),
        }
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    /// Enabled features in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.enabled.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}
