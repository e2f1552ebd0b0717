#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-timeline-ui]";

/// Default CSS for the timeline along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --timeline-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --timeline-mono-family: 'JetBrains Mono', 'SFMono-Regular', Menlo, Consolas, monospace;
  --timeline-bg: #f7f7f7;
  --timeline-text: #1a1a1a;
  --timeline-muted: #4b5563;
  --timeline-faint: #6b7280;
  --timeline-grid: rgba(0, 0, 0, 0.1);
  --timeline-accent: #6366f1;
  --timeline-accent-hover: #4f46e5;
  --timeline-disabled: #9ca3af;
  --timeline-insight-bg: #eef2ff;
  --timeline-insight-border: rgba(99, 102, 241, 0.35);
  --timeline-radius: 12px;
  --timeline-ease: cubic-bezier(0.65, 0, 0.35, 1);
}

.timeline-root {
  font-family: var(--timeline-font-family);
  background: var(--timeline-bg);
  color: var(--timeline-text);
  min-height: 100vh;
  width: 100%;
  display: flex;
  flex-direction: row;
  overflow-x: hidden;
}

.mono {
  font-family: var(--timeline-mono-family);
}

.timeline-scroll {
  width: 50%;
  height: 100vh;
  overflow-y: scroll;
  padding: 48px;
  box-sizing: border-box;
  display: flex;
  flex-direction: column;
  gap: 100vh;
}

.scroll-section {
  opacity: 0.35;
  transition: opacity 300ms ease;
}

.scroll-section.is-active {
  opacity: 1;
}

.scroll-section h2 {
  font-size: 1.5rem;
  font-weight: 700;
  margin: 0 0 16px;
}

.scroll-section p {
  color: var(--timeline-muted);
  line-height: 1.6;
  margin: 0;
}

.scroll-spacer {
  min-height: 24rem;
}

.timeline-panel {
  width: 50%;
  height: 100vh;
  position: sticky;
  top: 0;
  padding: 48px;
  box-sizing: border-box;
  display: flex;
  flex-direction: column;
  align-items: center;
}

.panel-inner {
  max-width: 36rem;
  width: 100%;
}

.panel-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  margin-bottom: 16px;
}

.panel-date {
  font-size: 1.5rem;
  font-weight: 700;
}

.panel-as-of {
  font-size: 0.875rem;
  color: var(--timeline-faint);
}

.panel-title {
  text-align: center;
  font-size: 1.25rem;
  margin: 0 0 16px;
}

.agent-chart {
  position: relative;
  height: 16rem;
  margin: 0 0 32px;
}

.agent-chart svg {
  width: 100%;
  height: calc(100% - 24px);
  overflow: visible;
}

.chart-grid {
  stroke: var(--timeline-grid);
  stroke-width: 1;
}

.chart-line {
  fill: none;
  stroke-width: 2.5;
  stroke-linejoin: round;
  stroke-linecap: round;
}

.chart-axis {
  position: relative;
  height: 24px;
  font-size: 0.75rem;
  color: var(--timeline-faint);
}

.chart-axis span {
  position: absolute;
  transform: translateX(-50%);
}

.capability-grid {
  list-style: none;
  padding: 0;
  margin: 32px 0;
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 16px;
}

.capability {
  display: flex;
  align-items: center;
  gap: 8px;
  font-size: 1.125rem;
}

.capability svg {
  width: 24px;
  height: 24px;
  color: var(--timeline-muted);
}

.panel-text {
  text-align: center;
  margin: 32px 0;
  line-height: 1.6;
}

.stats-grid {
  display: flex;
  flex-wrap: wrap;
  justify-content: space-between;
  align-items: center;
  text-align: center;
  gap: 16px;
  margin-top: 32px;
}

.stat-cell {
  flex: 1 1 auto;
  display: flex;
  flex-direction: column;
  align-items: center;
}

.stat-value {
  font-size: 1.5rem;
  font-weight: 700;
}

.stat-label {
  color: var(--timeline-muted);
}

.icon-row {
  margin-top: 32px;
}

.icon-captions,
.icon-track {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.icon-captions {
  font-size: 0.875rem;
  color: var(--timeline-faint);
}

.icon-track {
  margin-top: 8px;
}

.timeline-icon {
  font-size: 2.25rem;
}

.insight {
  margin-top: 32px;
}

.insight-button {
  width: 100%;
  padding: 12px 24px;
  border: 0;
  border-radius: var(--timeline-radius);
  background: var(--timeline-accent);
  color: #ffffff;
  font-weight: 700;
  font-size: 1rem;
  cursor: pointer;
  box-shadow: 0 4px 10px rgba(79, 70, 229, 0.25);
  transition: background-color 300ms ease;
}

.insight-button:hover:not(:disabled) {
  background: var(--timeline-accent-hover);
}

.insight-button:disabled {
  background: var(--timeline-disabled);
  cursor: not-allowed;
  box-shadow: none;
}

.ai-insight-box {
  margin-top: 16px;
  padding: 16px;
  border-radius: var(--timeline-radius);
  border: 1px solid var(--timeline-insight-border);
  background: var(--timeline-insight-bg);
  animation: timeline-fade-in 400ms var(--timeline-ease);
}

.ai-insight-box p {
  margin: 0;
  line-height: 1.6;
}

.compute-panel {
  position: absolute;
  right: 0;
  bottom: 0;
  padding: 32px;
  width: 16rem;
  height: 16rem;
  box-sizing: border-box;
}

.compute-panel h3 {
  margin: 0 0 8px;
}

.compute-gauge {
  width: 100%;
  height: calc(100% - 32px);
}

@keyframes timeline-fade-in {
  from {
    opacity: 0;
    transform: translateY(6px);
  }
  to {
    opacity: 1;
    transform: translateY(0);
  }
}

@media (max-width: 768px) {
  .timeline-root {
    flex-direction: column;
  }

  .timeline-scroll,
  .timeline-panel {
    width: 100%;
    padding: 32px;
  }

  .timeline-scroll {
    height: 60vh;
  }

  .timeline-panel {
    height: auto;
    position: static;
  }

  .compute-panel {
    display: none;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head> element"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-timeline-ui", "ai-evolution")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
