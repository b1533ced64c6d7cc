//! Status taxonomy for the grade tracker.
//!
//! Assignment lifecycle states are configuration, not code: the document
//! may define custom statuses, and each status carries a `counts_in_grade`
//! flag that drives both grade computation and workload pooling. This
//! module resolves status ids against the built-in defaults overlaid with
//! the document's custom definitions.

use shared::{default_status_definitions, StatusDefinition, TrackerDocument};
use std::collections::HashMap;

/// Lookup table from status id to its definition.
#[derive(Debug, Clone)]
pub struct StatusRegistry {
    definitions: Vec<StatusDefinition>,
    index: HashMap<String, usize>,
}

impl StatusRegistry {
    /// Build a registry from the built-in defaults overlaid with custom
    /// definitions. A custom definition reusing a default id replaces the
    /// default in place; new ids are appended in their given order.
    pub fn new(custom: &[StatusDefinition]) -> Self {
        let mut definitions: Vec<StatusDefinition> = default_status_definitions().to_vec();

        for definition in custom {
            if definition.id.is_empty() {
                continue;
            }
            match definitions.iter_mut().find(|d| d.id == definition.id) {
                Some(existing) => *existing = definition.clone(),
                None => definitions.push(definition.clone()),
            }
        }

        let index = definitions
            .iter()
            .enumerate()
            .map(|(position, definition)| (definition.id.clone(), position))
            .collect();

        Self { definitions, index }
    }

    /// Registry for a loaded document.
    pub fn from_document(document: &TrackerDocument) -> Self {
        Self::new(&document.custom_statuses)
    }

    /// Whether assignments in this status are included in grade
    /// computation. Unknown status ids do not count.
    pub fn counts_in_grade(&self, status_id: &str) -> bool {
        self.get(status_id).is_some_and(|d| d.counts_in_grade)
    }

    /// Look up a status definition by id.
    pub fn get(&self, status_id: &str) -> Option<&StatusDefinition> {
        self.index
            .get(status_id)
            .map(|&position| &self.definitions[position])
    }

    /// Display label for a status id; falls back to the id itself.
    pub fn label<'a>(&'a self, status_id: &'a str) -> &'a str {
        self.get(status_id)
            .map(|d| d.label.as_str())
            .unwrap_or(status_id)
    }

    /// All definitions in display order (defaults first, then appended
    /// custom statuses).
    pub fn definitions(&self) -> &[StatusDefinition] {
        &self.definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_custom_statuses() {
        let registry = StatusRegistry::new(&[]);

        assert!(!registry.counts_in_grade("TODO"));
        assert!(!registry.counts_in_grade("IN_PROGRESS"));
        assert!(registry.counts_in_grade("TURNED_IN"));
        assert!(registry.counts_in_grade("GRADED"));
    }

    #[test]
    fn custom_status_overrides_default() {
        let registry = StatusRegistry::new(&[StatusDefinition::new(
            "TURNED_IN",
            "Submitted",
            false,
        )]);

        assert!(!registry.counts_in_grade("TURNED_IN"));
        assert_eq!(registry.label("TURNED_IN"), "Submitted");
        // Overriding replaces in place rather than appending.
        assert_eq!(registry.definitions().len(), 4);
    }

    #[test]
    fn custom_status_extends_taxonomy() {
        let registry = StatusRegistry::new(&[StatusDefinition::new("WAIVED", "Waived", true)]);

        assert!(registry.counts_in_grade("WAIVED"));
        assert_eq!(registry.definitions().len(), 5);
        assert_eq!(registry.definitions().last().unwrap().id, "WAIVED");
    }

    #[test]
    fn unknown_status_does_not_count() {
        let registry = StatusRegistry::new(&[]);

        assert!(!registry.counts_in_grade("NO_SUCH_STATUS"));
        assert_eq!(registry.label("NO_SUCH_STATUS"), "NO_SUCH_STATUS");
    }
}
