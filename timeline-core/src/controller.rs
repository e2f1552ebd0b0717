//! State machine behind the timeline view.
//!
//! The controller never touches a clock or a timer itself. The host calls
//! [`TimelineController::tick`] from its frame callback and
//! [`TimelineController::complete_insight`] from its timeout, and drops its
//! own handles whenever a call reports that the work was superseded.

use serde::Serialize;

use crate::config::TimelineConfig;
use crate::insight::InsightProvider;
use crate::interpolate::{AnimationFrameState, Transition};
use crate::{Section, TimelineDataset};

pub const GENERATE_LABEL: &str = "Generate AI Insight";
pub const GENERATING_LABEL: &str = "Generating...";

/// Insight sub-state. Any section change returns to `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightState {
    Idle,
    Loading { token: u64 },
    Shown(String),
}

/// Flattened state the view renders from.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub current_section_index: usize,
    pub ai_insight: String,
    pub is_loading: bool,
}

/// Handle for a scheduled insight completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightTicket {
    token: u64,
    pub section_index: usize,
}

/// Outcome of a frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Frame applied, schedule another.
    Continue,
    /// Frame applied and the transition is complete.
    Finished,
    /// The loop was cancelled or replaced; nothing was applied.
    Stale,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    pub ui: UiState,
    pub frame: AnimationFrameState,
    pub animating: bool,
    pub button_label: &'static str,
}

#[derive(Debug, Clone)]
struct ActiveLoop {
    generation: u64,
    transition: Transition,
    started_at_ms: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct TimelineController {
    dataset: TimelineDataset,
    config: TimelineConfig,
    current_index: usize,
    generation: u64,
    active: Option<ActiveLoop>,
    frame: AnimationFrameState,
    insight: InsightState,
    next_token: u64,
}

impl TimelineController {
    pub fn new(dataset: TimelineDataset, config: TimelineConfig) -> Self {
        let frame = Transition::into_section(&dataset, 0, config.animation_duration_ms).final_frame();
        Self {
            dataset,
            config,
            current_index: 0,
            generation: 0,
            active: None,
            frame,
            insight: InsightState::Idle,
            next_token: 0,
        }
    }

    pub fn dataset(&self) -> &TimelineDataset {
        &self.dataset
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_section(&self) -> &Section {
        &self.dataset[self.current_index]
    }

    pub fn frame(&self) -> &AnimationFrameState {
        &self.frame
    }

    pub fn insight(&self) -> &InsightState {
        &self.insight
    }

    /// Starts the initial animation for the first section. Returns the loop generation.
    pub fn mount(&mut self) -> u64 {
        self.start_transition()
    }

    /// Cancels the animation and any pending insight.
    pub fn unmount(&mut self) {
        self.cancel_animation();
        self.insight = InsightState::Idle;
    }

    /// Handles a visibility report. Returns the generation of the new loop, or
    /// `None` when `index` is already active.
    pub fn on_section_change(&mut self, index: usize) -> Option<u64> {
        let index = self.dataset.clamp_index(index);
        if index == self.current_index && self.generation > 0 {
            return None;
        }

        log::debug!("active section {} -> {}", self.current_index, index);
        self.current_index = index;
        self.insight = InsightState::Idle;
        Some(self.start_transition())
    }

    fn start_transition(&mut self) -> u64 {
        self.cancel_animation();
        self.generation += 1;

        let transition = Transition::into_section(
            &self.dataset,
            self.current_index,
            self.config.animation_duration_ms,
        );
        self.frame = transition.frame_at_progress(0.0);
        self.active = Some(ActiveLoop {
            generation: self.generation,
            transition,
            started_at_ms: None,
        });
        self.generation
    }

    /// Applies the frame for timestamp `now_ms` if `generation` is still the
    /// running loop. The first tick of a loop fixes its start time.
    pub fn tick(&mut self, generation: u64, now_ms: f64) -> FrameStep {
        let Some(active) = self.active.as_mut() else {
            return FrameStep::Stale;
        };
        if active.generation != generation {
            return FrameStep::Stale;
        }

        let started_at = *active.started_at_ms.get_or_insert(now_ms);
        let elapsed = now_ms - started_at;
        let t = active.transition.progress_at(elapsed);
        self.frame = active.transition.frame_at_progress(t);

        if t >= 1.0 {
            self.active = None;
            FrameStep::Finished
        } else {
            FrameStep::Continue
        }
    }

    pub fn cancel_animation(&mut self) {
        if let Some(active) = self.active.take() {
            log::debug!("cancelled animation loop {}", active.generation);
        }
    }

    /// Number of running animation loops; never more than one.
    pub fn active_loops(&self) -> usize {
        usize::from(self.active.is_some())
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Moves to `Loading` and returns a ticket for the scheduled completion.
    /// Returns `None` while a request is already in flight.
    pub fn request_insight(&mut self) -> Option<InsightTicket> {
        if matches!(self.insight, InsightState::Loading { .. }) {
            return None;
        }

        self.next_token += 1;
        self.insight = InsightState::Loading {
            token: self.next_token,
        };
        log::debug!("insight requested for section {}", self.current_index);
        Some(InsightTicket {
            token: self.next_token,
            section_index: self.current_index,
        })
    }

    /// Shows `text` if `ticket` is still the pending request. Returns whether
    /// the state changed.
    pub fn complete_insight(&mut self, ticket: InsightTicket, text: String) -> bool {
        match self.insight {
            InsightState::Loading { token } if token == ticket.token => {
                self.insight = InsightState::Shown(text);
                true
            }
            _ => {
                log::debug!("dropped superseded insight for section {}", ticket.section_index);
                false
            }
        }
    }

    /// Completes `ticket` with the provider's text for the ticket's section.
    pub fn resolve_insight(&mut self, ticket: InsightTicket, provider: &dyn InsightProvider) -> bool {
        let section = &self.dataset[self.dataset.clamp_index(ticket.section_index)];
        let text = provider.insight_for(section);
        self.complete_insight(ticket, text)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.insight, InsightState::Loading { .. })
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_loading() {
            GENERATING_LABEL
        } else {
            GENERATE_LABEL
        }
    }

    pub fn ui_state(&self) -> UiState {
        let ai_insight = match &self.insight {
            InsightState::Shown(text) => text.clone(),
            _ => String::new(),
        };
        UiState {
            current_section_index: self.current_index,
            ai_insight,
            is_loading: self.is_loading(),
        }
    }

    pub fn view(&self) -> TimelineView {
        TimelineView {
            ui: self.ui_state(),
            frame: self.frame.clone(),
            animating: self.is_animating(),
            button_label: self.button_label(),
        }
    }
}
