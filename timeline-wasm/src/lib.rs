//! Framework-neutral WASM <-> JavaScript bridge for the timeline core.

use serde_wasm_bindgen::{from_value, to_value};
use timeline_core::{
    InsightProvider, TimelineConfig, TimelineConfigOverrides, TimelineDataset, TimelineError,
    Transition,
};
use wasm_bindgen::prelude::*;

fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn read_config(config: Option<JsValue>) -> Result<TimelineConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let overrides: TimelineConfigOverrides = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            Ok(TimelineConfig::from(overrides))
        }
        _ => Ok(TimelineConfig::default()),
    }
}

fn read_dataset(dataset: Option<JsValue>) -> Result<TimelineDataset, JsValue> {
    match dataset {
        Some(js_data) if !js_data.is_undefined() && !js_data.is_null() => {
            let value = from_value::<serde_json::Value>(js_data)
                .map_err(|err| JsValue::from_str(&format!("Could not read dataset JSON: {err}")))?;
            timeline_data::load_timeline_value(&value).map_err(to_js_error)
        }
        _ => timeline_data::builtin_timeline().map_err(to_js_error),
    }
}

fn sections_to_js(dataset: &TimelineDataset) -> Result<JsValue, JsValue> {
    to_value(dataset.sections())
        .map_err(|err| JsValue::from_str(&format!("Could not serialize sections: {err}")))
}

/// The built-in sections as plain JS objects.
#[wasm_bindgen]
pub fn builtin_timeline() -> Result<JsValue, JsValue> {
    init();
    sections_to_js(&read_dataset(None)?)
}

/// Validates a dataset (`{sections: [...]}` or `[...]`) and returns the
/// normalised sections.
#[wasm_bindgen]
pub fn load_timeline(dataset: JsValue) -> Result<JsValue, JsValue> {
    init();
    sections_to_js(&read_dataset(Some(dataset))?)
}

/// Frame shown `elapsed_ms` into the transition from section `from` to `to`.
#[wasm_bindgen]
pub fn frame_between(
    from: usize,
    to: usize,
    elapsed_ms: f64,
    dataset: Option<JsValue>,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init();
    let dataset = read_dataset(dataset)?;
    let cfg = read_config(config)?;

    let frame = Transition::between(&dataset, from, to, cfg.animation_duration_ms).frame_at(elapsed_ms);
    to_value(&frame).map_err(|err| JsValue::from_str(&format!("Could not serialize frame: {err}")))
}

/// Formats `value` the way the stat grid shows the stat `label` / `template`.
#[wasm_bindgen]
pub fn format_stat(label: &str, template: &str, value: f64) -> String {
    timeline_core::format_stat_value(label, template, value)
}

/// Insight text for the section at `index` of the built-in or supplied dataset.
#[wasm_bindgen]
pub fn insight_for_section(index: usize, dataset: Option<JsValue>) -> Result<String, JsValue> {
    init();
    let dataset = read_dataset(dataset)?;
    let insights = timeline_data::builtin_insights().map_err(to_js_error)?;

    Ok(match dataset.get(index) {
        Some(section) => insights.insight_for(section),
        None => insights.fallback().to_string(),
    })
}

fn to_js_error(err: TimelineError) -> JsValue {
    JsValue::from_str(&format_timeline_error(err))
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}

#[cfg(test)]
mod tests {
    use timeline_core::FALLBACK_INSIGHT;

    use super::*;

    #[test]
    fn insight_follows_builtin_section_order() {
        let text = insight_for_section(2, None).expect("insight");
        assert!(text.starts_with("The 1980s witnessed the rise of expert systems"));
    }

    #[test]
    fn out_of_range_section_gets_fallback() {
        assert_eq!(insight_for_section(99, None).expect("insight"), FALLBACK_INSIGHT);
    }

    #[test]
    fn format_stat_uses_all_three_branches() {
        assert_eq!(format_stat("Approval", "78%", 49.5), "50%");
        assert_eq!(format_stat("Funding", "1.4B", 2.25), "2.3B");
        assert_eq!(format_stat("Papers", "4.60K", 0.125), "0.13K");
    }

    #[test]
    fn timeline_errors_are_prefixed() {
        assert_eq!(
            format_timeline_error(TimelineError::EmptyDataset),
            "Timeline error: timeline dataset contains no sections"
        );
    }
}
