//! Advanced-mode filter facets.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which facet a filter chip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Category,
    Context,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Category => "category",
            FilterKind::Context => "context",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(FilterKind::Category),
            "context" => Ok(FilterKind::Context),
            other => Err(format!("unknown filter kind '{other}'")),
        }
    }
}

/// Selected drug-category and usage-context chips.
///
/// Both facets are sets: selection order does not matter and duplicates
/// collapse. Iteration is lexicographic, which keeps serialized queries stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub category: BTreeSet<String>,
    #[serde(default)]
    pub context: BTreeSet<String>,
}

impl FilterSelection {
    /// Toggle a chip. Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, kind: FilterKind, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let facet = self.facet_mut(kind);
        if facet.remove(value) {
            false
        } else {
            facet.insert(value.to_string());
            true
        }
    }

    /// Select a chip without toggling.
    pub fn select(&mut self, kind: FilterKind, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.facet_mut(kind).insert(value.to_string());
        }
    }

    pub fn values(&self, kind: FilterKind) -> &BTreeSet<String> {
        match kind {
            FilterKind::Category => &self.category,
            FilterKind::Context => &self.context,
        }
    }

    /// Comma-joined facet values, `None` when nothing is selected.
    pub fn joined(&self, kind: FilterKind, separator: &str) -> Option<String> {
        let values = self.values(kind);
        (!values.is_empty()).then(|| {
            values
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(separator)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.context.is_empty()
    }

    pub fn clear(&mut self) {
        self.category.clear();
        self.context.clear();
    }

    fn facet_mut(&mut self, kind: FilterKind) -> &mut BTreeSet<String> {
        match kind {
            FilterKind::Category => &mut self.category,
            FilterKind::Context => &mut self.context,
        }
    }
}
