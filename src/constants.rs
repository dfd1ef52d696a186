//! # System Constants
//!
//! Fixed vocabularies of the prosthesis pipeline: the seeded label set and
//! the curated prosthesis type suggestions surfaced by order forms.

// Re-export the lifecycle status for convenience
pub use crate::state_machine::OrderStatus;

/// Default label catalog seeded for every tenant.
///
/// Tuples of (id, display name, hex color). Ids are the historical slugs;
/// `restore_defaults` always rewrites the catalog to exactly this set.
pub const DEFAULT_LABELS: [(&str, &str, &str); 6] = [
    ("urgente", "Urgente", "#dc2626"),
    ("prioridade", "Prioridade", "#ea580c"),
    ("premium", "Premium", "#9333ea"),
    ("retrabalho", "Retrabalho", "#eab308"),
    ("provisorio", "Provisório", "#2563eb"),
    ("definitivo", "Definitivo", "#16a34a"),
];

/// Suggested prosthesis types for order forms.
///
/// The `type` field stays an open string; this list is surfaced as input
/// suggestions only and never used to reject free-text entries.
pub const PROSTHESIS_TYPES: [&str; 10] = [
    "Coroa",
    "Ponte",
    "Protocolo",
    "Prótese Parcial Removível",
    "Prótese Total",
    "Faceta",
    "Laminado",
    "Inlay/Onlay",
    "Implante",
    "Outro",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_have_unique_ids() {
        let mut ids: Vec<&str> = DEFAULT_LABELS.iter().map(|(id, _, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DEFAULT_LABELS.len());
    }

    #[test]
    fn test_default_label_colors_are_hex() {
        for (_, _, color) in DEFAULT_LABELS {
            assert!(color.starts_with('#') && color.len() == 7);
        }
    }
}
