//! Linear interpolation of stats and compute share between two sections.

use serde::{Deserialize, Serialize};

use crate::format::{parse_stat_number, stat_unit, StatFormat};
use crate::{Stat, TimelineDataset};

/// Normalised progress `min(elapsed / duration, 1)`, never negative.
pub fn progress(elapsed_ms: f64, duration_ms: u32) -> f64 {
    if duration_ms == 0 || elapsed_ms.is_nan() {
        return 1.0;
    }
    (elapsed_ms.max(0.0) / f64::from(duration_ms)).min(1.0)
}

/// `start + (end - start) * t`, landing exactly on `end` once `t` reaches 1.
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    if t >= 1.0 {
        return end;
    }
    start + (end - start) * t
}

/// What the stat grid and compute gauge display for one animation frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnimationFrameState {
    pub stats: Vec<Stat>,
    pub compute_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct StatTrack {
    label: String,
    unit: String,
    format: StatFormat,
    start: f64,
    end: f64,
}

/// A transition from one section's numbers to another's.
///
/// Stats are matched by position; the target section decides labels, units
/// and formatting. A target stat without a counterpart in the source section
/// starts at its own value.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from_index: usize,
    pub to_index: usize,
    duration_ms: u32,
    tracks: Vec<StatTrack>,
    start_compute: f64,
    end_compute: f64,
}

impl Transition {
    pub fn between(dataset: &TimelineDataset, from: usize, to: usize, duration_ms: u32) -> Self {
        let from = dataset.clamp_index(from);
        let to = dataset.clamp_index(to);
        let source = &dataset[from];
        let target = &dataset[to];

        let tracks = target
            .stats
            .iter()
            .enumerate()
            .map(|(idx, stat)| {
                let unit = stat_unit(&stat.value);
                let end = parse_stat_number(&stat.value);
                let start = source
                    .stats
                    .get(idx)
                    .map(|prev| parse_stat_number(&prev.value))
                    .unwrap_or(end);
                StatTrack {
                    format: StatFormat::for_stat(&stat.label, &unit),
                    label: stat.label.clone(),
                    unit,
                    start,
                    end,
                }
            })
            .collect();

        Self {
            from_index: from,
            to_index: to,
            duration_ms,
            tracks,
            start_compute: source.compute_value,
            end_compute: target.compute_value,
        }
    }

    /// Transition into `to` from the section right before it.
    pub fn into_section(dataset: &TimelineDataset, to: usize, duration_ms: u32) -> Self {
        Self::between(dataset, dataset.predecessor(to), to, duration_ms)
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        progress(elapsed_ms, self.duration_ms)
    }

    pub fn frame_at(&self, elapsed_ms: f64) -> AnimationFrameState {
        self.frame_at_progress(self.progress_at(elapsed_ms))
    }

    pub fn frame_at_progress(&self, t: f64) -> AnimationFrameState {
        let t = t.clamp(0.0, 1.0);
        let stats = self
            .tracks
            .iter()
            .map(|track| Stat {
                label: track.label.clone(),
                value: track
                    .format
                    .render(lerp(track.start, track.end, t), &track.unit),
            })
            .collect();

        AnimationFrameState {
            stats,
            compute_value: lerp(self.start_compute, self.end_compute, t),
        }
    }

    pub fn final_frame(&self) -> AnimationFrameState {
        self.frame_at_progress(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(-10.0, 1500), 0.0);
        assert_eq!(progress(750.0, 1500), 0.5);
        assert_eq!(progress(4000.0, 1500), 1.0);
        assert_eq!(progress(10.0, 0), 1.0);
    }

    #[test]
    fn halfway_frame_matches_worked_example() {
        let dataset = two_sections();
        let transition = Transition::into_section(&dataset, 1, 1500);
        let frame = transition.frame_at(750.0);

        assert!((frame.compute_value - 50.0).abs() < 1e-9);
        assert_eq!(frame.stats, vec![stat("Approval", "50%")]);
    }

    #[test]
    fn first_section_does_not_animate() {
        let dataset = mixed_sections();
        let transition = Transition::into_section(&dataset, 0, 1500);
        assert_eq!(transition.frame_at(0.0), transition.final_frame());
    }

    #[test]
    fn finished_transition_shows_stored_values() {
        let dataset = mixed_sections();
        for index in 0..dataset.len() {
            let frame = Transition::into_section(&dataset, index, 1500).frame_at(1500.0);
            assert_eq!(frame.stats, dataset[index].stats);
            assert_eq!(frame.compute_value, dataset[index].compute_value);
        }
    }

    #[test]
    fn interpolation_is_monotonic_for_rising_values() {
        let dataset = mixed_sections();
        let transition = Transition::into_section(&dataset, 2, 1500);
        let mut previous = f64::MIN;
        for step in 0..=30 {
            let frame = transition.frame_at_progress(f64::from(step) / 30.0);
            assert!(frame.compute_value >= previous);
            assert!(frame.compute_value >= 8.0 && frame.compute_value <= 20.0);
            previous = frame.compute_value;
        }
    }

    #[test]
    fn halfway_magnitude_stat_rounds_tie_up() {
        let dataset = TimelineDataset::new(vec![
            section("a", 0.0, vec![stat("Funding", "2.0B")]),
            section("b", 0.0, vec![stat("Funding", "2.5B")]),
        ])
        .expect("dataset");
        let frame = Transition::into_section(&dataset, 1, 1500).frame_at(750.0);
        assert_eq!(frame.stats, vec![stat("Funding", "2.3B")]);
    }

    #[test]
    fn missing_source_stat_starts_at_target() {
        let dataset = TimelineDataset::new(vec![
            section("a", 0.0, vec![stat("Approval", "10%")]),
            section("b", 0.0, vec![stat("Approval", "30%"), stat("Funding", "2.0B")]),
        ])
        .expect("dataset");
        let frame = Transition::into_section(&dataset, 1, 1000).frame_at(0.0);
        assert_eq!(frame.stats, vec![stat("Approval", "10%"), stat("Funding", "2.0B")]);
    }
}
