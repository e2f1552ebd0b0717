//! JSON loaders for timeline sections and insight texts, plus the built-in
//! AI evolution dataset.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use timeline_core::{GraphSeries, InsightTable, Section, Stat, TimelineDataset, TimelineError};

const BUILTIN_TIMELINE: &str = include_str!("../data/timeline.json");
const BUILTIN_INSIGHTS: &str = include_str!("../data/insights.json");

/// Section as written in JSON. `id` may be omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(default)]
    id: Option<String>,
    date: String,
    #[serde(default)]
    main_text: String,
    #[serde(default)]
    stats: Vec<Stat>,
    #[serde(default)]
    graph_data: Vec<GraphSeries>,
    #[serde(default)]
    compute_value: f64,
    #[serde(default)]
    timeline_icons: Vec<String>,
}

impl RawSection {
    fn into_section(self, position: usize) -> Section {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => format!("section-{position}"),
        };

        let compute_value = normalize_compute(&id, self.compute_value);

        Section {
            id,
            date: self.date,
            main_text: self.main_text,
            stats: self.stats,
            graph_data: self.graph_data,
            compute_value,
            timeline_icons: self.timeline_icons,
        }
    }
}

fn normalize_compute(id: &str, value: f64) -> f64 {
    if value.is_nan() {
        log::warn!("section `{id}` has a non-numeric computeValue, using 0");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&value) {
        log::warn!("section `{id}` computeValue {value} is outside 0-100, clamping");
    }
    value.clamp(0.0, 100.0)
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    #[serde(default)]
    fallback: Option<String>,
    insights: BTreeMap<String, String>,
}

/// Load a dataset from a JSON string.
pub fn load_timeline_str(json: &str) -> Result<TimelineDataset, TimelineError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| TimelineError::Parse(err.to_string()))?;
    load_timeline_value(&value)
}

/// Load a dataset from a `serde_json::Value`.
///
/// Accepts either `{"sections": [...]}` or a bare array of sections.
pub fn load_timeline_value(value: &Value) -> Result<TimelineDataset, TimelineError> {
    let sections = match value {
        Value::Array(_) => value,
        Value::Object(map) => map.get("sections").ok_or(TimelineError::EmptyDataset)?,
        other => {
            return Err(TimelineError::Parse(format!(
                "expected an object or array, received {}",
                json_kind(other)
            )))
        }
    };

    let raw: Vec<RawSection> = serde_json::from_value(sections.clone())
        .map_err(|err| TimelineError::Parse(err.to_string()))?;

    let sections = raw
        .into_iter()
        .enumerate()
        .map(|(position, section)| section.into_section(position))
        .collect::<Vec<_>>();

    for section in &sections {
        for series in &section.graph_data {
            if series.data.len() != timeline_core::chart::YEAR_LABELS.len() {
                log::warn!(
                    "section `{}` series `{}` has {} points, expected {}",
                    section.id,
                    series.label,
                    series.data.len(),
                    timeline_core::chart::YEAR_LABELS.len()
                );
            }
        }
    }

    TimelineDataset::new(sections)
}

/// Load an insight table from a JSON string of the form
/// `{"fallback": "...", "insights": {"<section id>": "..."}}`.
pub fn load_insights_str(json: &str) -> Result<InsightTable, TimelineError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| TimelineError::Parse(err.to_string()))?;
    load_insights_value(&value)
}

pub fn load_insights_value(value: &Value) -> Result<InsightTable, TimelineError> {
    let raw: RawInsights =
        serde_json::from_value(value.clone()).map_err(|err| TimelineError::Parse(err.to_string()))?;

    let table = InsightTable::new(raw.insights);
    Ok(match raw.fallback {
        Some(fallback) => table.with_fallback(fallback),
        None => table,
    })
}

/// The five-section AI evolution dataset shipped with the crate.
pub fn builtin_timeline() -> Result<TimelineDataset, TimelineError> {
    load_timeline_str(BUILTIN_TIMELINE)
}

/// Insight texts for [`builtin_timeline`], keyed by section id.
pub fn builtin_insights() -> Result<InsightTable, TimelineError> {
    load_insights_str(BUILTIN_INSIGHTS)
}

/// Section ids in `dataset` that have no entry in `insights`.
pub fn sections_without_insight<'a>(
    dataset: &'a TimelineDataset,
    insights: &InsightTable,
) -> Vec<&'a str> {
    dataset
        .iter()
        .filter(|section| insights.get(&section.id).is_none())
        .map(|section| section.id.as_str())
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_bare_array() {
        let dataset = load_timeline_value(&json!([
            {"id": "a", "date": "1950s", "mainText": "first"},
            {"date": "1960s"}
        ]))
        .expect("dataset");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[1].id, "section-1");
        assert!(dataset[1].stats.is_empty());
    }

    #[test]
    fn compute_value_is_clamped() {
        let dataset = load_timeline_value(&json!({
            "sections": [{"id": "a", "date": "x", "computeValue": 180}]
        }))
        .expect("dataset");
        assert_eq!(dataset[0].compute_value, 100.0);
    }

    #[test]
    fn rejects_scalars_and_missing_sections() {
        assert!(matches!(
            load_timeline_value(&json!(42)),
            Err(TimelineError::Parse(_))
        ));
        assert!(matches!(
            load_timeline_value(&json!({"title": "x"})),
            Err(TimelineError::EmptyDataset)
        ));
        assert!(matches!(
            load_timeline_str("{not json"),
            Err(TimelineError::Parse(_))
        ));
    }

    #[test]
    fn insights_without_fallback_use_default() {
        let table = load_insights_value(&json!({"insights": {"a": "text"}})).expect("table");
        assert_eq!(table.get("a"), Some("text"));
        assert_eq!(table.fallback(), timeline_core::FALLBACK_INSIGHT);
    }
}
