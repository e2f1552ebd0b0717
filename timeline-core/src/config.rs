//! Tunable timings and thresholds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Timings and thresholds that drive the timeline view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineConfig {
    /// Length of the counter interpolation between two sections.
    pub animation_duration_ms: u32,
    /// Artificial latency of the simulated insight backend.
    pub insight_delay_ms: u32,
    /// Pause before scrolling a freshly shown insight into view.
    pub insight_scroll_delay_ms: u32,
    /// Fraction of a section that must be visible before it becomes active.
    pub visibility_threshold: f64,
    /// Duration of the eased chart transitions.
    pub chart_transition_ms: u32,
    /// Date shown in the header next to the section date.
    pub as_of: NaiveDate,
    /// Minimum `log` level forwarded to the console.
    pub log_level: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: 1500,
            insight_delay_ms: 1500,
            insight_scroll_delay_ms: 100,
            visibility_threshold: 0.5,
            chart_transition_ms: 800,
            as_of: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default(),
            log_level: "info".to_string(),
        }
    }
}

impl TimelineConfig {
    /// Header label for [`TimelineConfig::as_of`], e.g. `Dec 2024`.
    pub fn as_of_label(&self) -> String {
        self.as_of.format("%b %Y").to_string()
    }

    /// Parsed [`TimelineConfig::log_level`]; unknown names fall back to `Info`.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }

    /// Threshold clamped into `[0, 1]`.
    pub fn threshold(&self) -> f64 {
        if self.visibility_threshold.is_nan() {
            return 0.5;
        }
        self.visibility_threshold.clamp(0.0, 1.0)
    }
}

/// Partial configuration as supplied from JavaScript; unset fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TimelineConfigOverrides {
    #[serde(default)]
    pub animation_duration_ms: Option<u32>,
    #[serde(default)]
    pub insight_delay_ms: Option<u32>,
    #[serde(default)]
    pub insight_scroll_delay_ms: Option<u32>,
    #[serde(default)]
    pub visibility_threshold: Option<f64>,
    #[serde(default)]
    pub chart_transition_ms: Option<u32>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl TimelineConfigOverrides {
    pub fn apply(self, base: &mut TimelineConfig) {
        if let Some(ms) = self.animation_duration_ms {
            base.animation_duration_ms = ms;
        }
        if let Some(ms) = self.insight_delay_ms {
            base.insight_delay_ms = ms;
        }
        if let Some(ms) = self.insight_scroll_delay_ms {
            base.insight_scroll_delay_ms = ms;
        }
        if let Some(threshold) = self.visibility_threshold {
            base.visibility_threshold = threshold;
        }
        if let Some(ms) = self.chart_transition_ms {
            base.chart_transition_ms = ms;
        }
        if let Some(as_of) = self.as_of {
            base.as_of = as_of;
        }
        if let Some(level) = self.log_level {
            base.log_level = level;
        }
    }
}

impl From<TimelineConfigOverrides> for TimelineConfig {
    fn from(overrides: TimelineConfigOverrides) -> Self {
        let mut base = TimelineConfig::default();
        overrides.apply(&mut base);
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_touch_given_fields() {
        let overrides: TimelineConfigOverrides = serde_json::from_value(serde_json::json!({
            "animation_duration_ms": 600,
            "as_of": "2025-03-01"
        }))
        .expect("overrides");
        let config = TimelineConfig::from(overrides);
        assert_eq!(config.animation_duration_ms, 600);
        assert_eq!(config.as_of_label(), "Mar 2025");
        assert_eq!(config.insight_delay_ms, 1500);
    }

    #[test]
    fn defaults_match_reference_timings() {
        let config = TimelineConfig::default();
        assert_eq!(config.animation_duration_ms, 1500);
        assert_eq!(config.insight_delay_ms, 1500);
        assert_eq!(config.chart_transition_ms, 800);
        assert_eq!(config.as_of_label(), "Dec 2024");
    }

    #[test]
    fn bad_log_level_falls_back_to_info() {
        let config = TimelineConfig {
            log_level: "chatty".to_string(),
            ..TimelineConfig::default()
        };
        assert_eq!(config.log_level_filter(), log::LevelFilter::Info);

        let config = TimelineConfig {
            log_level: "debug".to_string(),
            ..TimelineConfig::default()
        };
        assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn threshold_is_clamped() {
        let config = TimelineConfig {
            visibility_threshold: 1.7,
            ..TimelineConfig::default()
        };
        assert_eq!(config.threshold(), 1.0);
    }
}
