use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::lab::Lab;
use crate::core::types::CombinationId;

/// A named color as it appears inside a combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub hex: String,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// A named color from the dictionary, with its precomputed Lab coordinates
/// and the combinations it appears in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceColor {
    pub name: String,

    /// 6-digit sRGB hex as written in the catalog (case-insensitive)
    pub hex: String,

    /// Precomputed CIELAB (D50)
    pub lab: Lab,

    /// IDs of the combinations containing this color
    #[serde(rename = "combinations", alias = "combination_ids")]
    pub combination_ids: BTreeSet<CombinationId>,
}

impl ReferenceColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>, lab: Lab) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            lab,
            combination_ids: BTreeSet::new(),
        }
    }

    /// Builder method to tag the combinations this color appears in
    #[must_use]
    pub fn with_combinations(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.combination_ids = ids.into_iter().map(CombinationId).collect();
        self
    }
}

/// A curated, ordered set of colors meant to be used together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub id: CombinationId,

    /// Curatorial order; never re-sorted
    pub colors: Vec<NamedColor>,

    /// Source page number. Equal to the id in the shipped data, so the
    /// catalog file may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

impl Combination {
    #[must_use]
    pub fn new(id: u32, colors: Vec<NamedColor>) -> Self {
        Self {
            id: CombinationId(id),
            colors,
            page: None,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Page in the source book (falls back to the id)
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(self.id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
