//! Host-facing toolbar configuration loaded from JSON.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::color::{DEFAULT_PALETTE, SwatchHighlight};
use crate::error::ToolbarError;
use crate::feature::FeatureSet;

/// Host-facing toolbar configuration.
///
/// ```json
/// { "features": ["format-bold", "undo", "redo"], "swatchHighlight": "live-mode" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolbarConfig {
    /// Feature identifiers to offer. `None` offers all of them, an empty
    /// list offers none.
    pub features: Option<Vec<String>>,
    pub swatch_highlight: SwatchHighlight,
    /// Named colors for the color and fill pickers, in display order.
    pub palette: Option<Vec<SmolStr>>,
}

impl ToolbarConfig {
    /// Parse a JSON configuration.
    pub fn from_json(raw: &str) -> Result<Self, ToolbarError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_swatch_highlight(mut self, highlight: SwatchHighlight) -> Self {
        self.swatch_highlight = highlight;
        self
    }

    pub fn feature_set(&self) -> FeatureSet {
        FeatureSet::from_config(self.features.as_deref())
    }

    pub fn palette(&self) -> Vec<SmolStr> {
        match &self.palette {
            Some(palette) => palette.clone(),
            None => DEFAULT_PALETTE.into_iter().map(SmolStr::new_static).collect(),
        }
    }
}
