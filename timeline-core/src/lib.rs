//! Core logic for the scroll-driven AI evolution timeline.
//!
//! Everything in this crate is platform-agnostic: the browser shell in
//! `timeline-ui` feeds it visibility events and frame timestamps, and renders
//! whatever [`TimelineView`] it hands back.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod chart;
pub mod config;
pub mod controller;
pub mod format;
pub mod insight;
pub mod interpolate;
pub mod visibility;

pub use config::{TimelineConfig, TimelineConfigOverrides};
pub use controller::{
    FrameStep, InsightState, InsightTicket, TimelineController, TimelineView, UiState,
};
pub use format::{format_stat_value, parse_stat_number, stat_unit, StatFormat};
pub use insight::{InsightProvider, InsightTable, FALLBACK_INSIGHT};
pub use interpolate::{lerp, progress, AnimationFrameState, Transition};
pub use visibility::{VisibilityEntry, VisibilityTracker};

/// One stat cell as stored in the dataset, e.g. `{"label": "Approval", "value": "78%"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

/// A named series plotted on the agent chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GraphSeries {
    pub label: String,
    #[serde(default)]
    pub data: Vec<f64>,
}

/// One chronological milestone on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Stable identifier, used to key insight texts.
    pub id: String,
    pub date: String,
    pub main_text: String,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub graph_data: Vec<GraphSeries>,
    /// Share of compute, 0–100.
    #[serde(default)]
    pub compute_value: f64,
    #[serde(default)]
    pub timeline_icons: Vec<String>,
}

/// The ordered, immutable list of sections loaded at startup.
///
/// Cloning is cheap; every clone shares the same sections. A dataset is never
/// empty, so index 0 is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineDataset {
    sections: Arc<[Section]>,
}

impl TimelineDataset {
    /// Builds a dataset, rejecting empty lists and duplicate ids.
    pub fn new(sections: Vec<Section>) -> Result<Self, TimelineError> {
        if sections.is_empty() {
            return Err(TimelineError::EmptyDataset);
        }

        for (idx, section) in sections.iter().enumerate() {
            if sections[..idx].iter().any(|prev| prev.id == section.id) {
                return Err(TimelineError::DuplicateSection(section.id.clone()));
            }
        }

        Ok(Self {
            sections: sections.into(),
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Clamps an arbitrary index into `[0, len - 1]`.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.sections.len() - 1)
    }

    /// Index of the section the transition into `index` animates from.
    pub fn predecessor(&self, index: usize) -> usize {
        self.clamp_index(index).saturating_sub(1)
    }
}

impl Deref for TimelineDataset {
    type Target = [Section];

    fn deref(&self) -> &Self::Target {
        &self.sections
    }
}

/// Errors raised while loading or validating timeline data.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("timeline dataset contains no sections")]
    EmptyDataset,
    #[error("duplicate section id `{0}`")]
    DuplicateSection(String),
    #[error("could not read timeline data: {0}")]
    Parse(String),
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(
            TimelineDataset::new(Vec::new()),
            Err(TimelineError::EmptyDataset)
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = TimelineDataset::new(vec![
            section("same", 1.0, Vec::new()),
            section("same", 2.0, Vec::new()),
        ])
        .unwrap_err();
        assert!(matches!(err, TimelineError::DuplicateSection(id) if id == "same"));
    }

    #[test]
    fn predecessor_stays_in_range() {
        let dataset = mixed_sections();
        assert_eq!(dataset.predecessor(0), 0);
        assert_eq!(dataset.predecessor(2), 1);
        assert_eq!(dataset.predecessor(99), 1);
        assert_eq!(dataset.clamp_index(99), 2);
    }

    #[test]
    fn section_uses_camel_case_fields() {
        let json = serde_json::json!({
            "id": "dawn",
            "date": "1950s",
            "mainText": "hello",
            "computeValue": 12.5,
            "timelineIcons": ["🧮"],
            "graphData": [{"label": "Reliable", "data": [1.0, 2.0]}],
            "stats": [{"label": "Approval", "value": "10%"}]
        });
        let section: Section = serde_json::from_value(json).expect("section");
        assert_eq!(section.main_text, "hello");
        assert_eq!(section.compute_value, 12.5);
        assert_eq!(section.graph_data[0].data, vec![1.0, 2.0]);
    }
}
