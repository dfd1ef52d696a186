//! Filter configuration applied to the board projection.
//!
//! `None` in the selector fields means "all", matching the wire shape
//! where the selectors carry the literal string `all` when inactive.

use serde::{Deserialize, Serialize};

/// Active filter set for the board view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardFilters {
    /// Restrict the `sent` bucket to overdue orders
    #[serde(default)]
    pub delayed_only: bool,
    /// Blank out the `pending` and `sent` buckets, keeping only the
    /// downstream stages
    #[serde(default)]
    pub returned_only: bool,
    /// Keep only orders assigned to this professional
    #[serde(default)]
    pub professional: Option<i64>,
    /// Keep only orders at this laboratory (exact name match)
    #[serde(default)]
    pub laboratory: Option<String>,
    /// Keep only orders carrying this label id
    #[serde(default)]
    pub label: Option<String>,
}

impl BoardFilters {
    /// True when every filter is at its inactive default
    pub fn is_empty(&self) -> bool {
        !self.delayed_only
            && !self.returned_only
            && self.professional.is_none()
            && self.laboratory.is_none()
            && self.label.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_are_empty() {
        assert!(BoardFilters::default().is_empty());
    }

    #[test]
    fn test_any_active_filter_is_not_empty() {
        let filters = BoardFilters {
            delayed_only: true,
            ..Default::default()
        };
        assert!(!filters.is_empty());

        let filters = BoardFilters {
            laboratory: Some("Lab Sorriso".to_string()),
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }
}
