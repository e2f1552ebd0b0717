//! Scroll-driven timeline view for WebAssembly.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod charts;
#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod observer;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::rc::Rc;

    use serde_wasm_bindgen::from_value;
    use timeline_core::{TimelineConfig, TimelineConfigOverrides, TimelineDataset};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Window};

    use crate::app::{TimelineApp, TimelineAppProps};
    use crate::logging;

    fn read_config(config: Option<JsValue>) -> Result<TimelineConfig, JsValue> {
        match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
                let overrides: TimelineConfigOverrides = from_value(js_cfg)?;
                Ok(TimelineConfig::from(overrides))
            }
            _ => Ok(TimelineConfig::default()),
        }
    }

    fn read_dataset(dataset: Option<JsValue>) -> Result<TimelineDataset, JsValue> {
        let loaded = match dataset {
            Some(js_data) if !js_data.is_undefined() && !js_data.is_null() => {
                let value: serde_json::Value = from_value(js_data)?;
                timeline_data::load_timeline_value(&value)
            }
            _ => timeline_data::builtin_timeline(),
        };
        loaded.map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))
    }

    /// Mounts the timeline into the element matched by `selector`.
    ///
    /// `dataset` defaults to the built-in AI evolution timeline and `config`
    /// to [`TimelineConfig::default`]; both accept partial JS objects.
    #[wasm_bindgen]
    pub fn mount_timeline_app(
        selector: &str,
        dataset: Option<JsValue>,
        config: Option<JsValue>,
    ) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = read_config(config)?;
        logging::init(config.log_level_filter());

        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Document is not accessible"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches the selector"))?;

        let dataset = read_dataset(dataset)?;
        let insights = timeline_data::builtin_insights()
            .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?;

        let missing = timeline_data::sections_without_insight(&dataset, &insights);
        if !missing.is_empty() {
            log::warn!("sections without insight text: {}", missing.join(", "));
        }
        log::info!("mounting timeline with {} sections", dataset.len());

        yew::Renderer::<TimelineApp>::with_root_and_props(
            target,
            TimelineAppProps {
                dataset,
                insights: Rc::new(insights),
                config,
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_timeline_app;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_timeline_app(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "timeline-ui only supports the wasm32 target",
    ))
}
