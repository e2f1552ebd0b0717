//! Insight texts keyed by section id.

use std::collections::HashMap;

use crate::Section;

/// Shown when no insight exists for the active section.
pub const FALLBACK_INSIGHT: &str =
    "No insight is available for this period yet. Scroll to another milestone and try again.";

/// Source of insight texts. The built-in [`InsightTable`] answers from a fixed
/// table; the caller is responsible for any latency it wants to simulate.
pub trait InsightProvider {
    fn insight_for(&self, section: &Section) -> String;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsightTable {
    entries: HashMap<String, String>,
    fallback: Option<String>,
}

impl InsightTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, text)| (id.into(), text.into()))
                .collect(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn get(&self, section_id: &str) -> Option<&str> {
        self.entries.get(section_id).map(String::as_str)
    }

    pub fn fallback(&self) -> &str {
        self.fallback.as_deref().unwrap_or(FALLBACK_INSIGHT)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl InsightProvider for InsightTable {
    fn insight_for(&self, section: &Section) -> String {
        match self.get(&section.id) {
            Some(text) => text.to_string(),
            None => {
                log::warn!("no insight registered for section `{}`", section.id);
                self.fallback().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::section;

    #[test]
    fn looks_up_by_section_id() {
        let table = InsightTable::new([("dawn", "Dawn insight"), ("winter", "Winter insight")]);
        assert_eq!(table.insight_for(&section("winter", 0.0, Vec::new())), "Winter insight");
    }

    #[test]
    fn unknown_section_gets_fallback() {
        let table = InsightTable::new([("dawn", "Dawn insight")]);
        assert_eq!(table.insight_for(&section("future", 0.0, Vec::new())), FALLBACK_INSIGHT);

        let table = table.with_fallback("Nothing yet.");
        assert_eq!(table.insight_for(&section("future", 0.0, Vec::new())), "Nothing yet.");
    }
}
