#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use timeline_core::{
    FrameStep, InsightTable, TimelineConfig, TimelineController, TimelineDataset, TimelineView,
};
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::charts::{AgentChart, CapabilityGrid, ComputeGauge, IconRow, StatsGrid};
use crate::frame_loop::FrameLoop;
use crate::observer::SectionObserver;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct TimelineAppProps {
    pub dataset: TimelineDataset,
    pub insights: Rc<InsightTable>,
    pub config: TimelineConfig,
}

type SharedController = Rc<RefCell<TimelineController>>;
type PendingTimeout = Rc<RefCell<Option<Timeout>>>;

/// Drives the controller's loop `generation` from animation frames until it
/// finishes or is superseded.
fn run_animation(
    controller: SharedController,
    frames: &FrameLoop,
    generation: u64,
    view: UseStateHandle<TimelineView>,
) {
    frames.start(move |now| {
        let step = controller.borrow_mut().tick(generation, now);
        if step != FrameStep::Stale {
            view.set(controller.borrow().view());
        }
        step == FrameStep::Continue
    });
}

fn scroll_into_view(node: &NodeRef) {
    let Some(element) = node.cast::<Element>() else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Nearest);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[function_component(TimelineApp)]
pub fn timeline_app(props: &TimelineAppProps) -> Html {
    let controller: SharedController = use_mut_ref(|| {
        TimelineController::new(props.dataset.clone(), props.config.clone())
    });
    let view = use_state(|| controller.borrow().view());
    let frames = use_memo((), |_| FrameLoop::default());
    let pending_insight: PendingTimeout = use_mut_ref(|| None);
    let pending_scroll: PendingTimeout = use_mut_ref(|| None);

    let scroll_root = use_node_ref();
    let insight_ref = use_node_ref();
    let section_refs = use_memo(props.dataset.len(), |len| {
        (0..*len).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });

    let on_visible = {
        let controller = Rc::clone(&controller);
        let frames = Rc::clone(&frames);
        let pending_insight = Rc::clone(&pending_insight);
        let pending_scroll = Rc::clone(&pending_scroll);
        let view = view.clone();
        Callback::from(move |index: usize| {
            let Some(generation) = controller.borrow_mut().on_section_change(index) else {
                return;
            };
            pending_insight.borrow_mut().take();
            pending_scroll.borrow_mut().take();
            view.set(controller.borrow().view());
            run_animation(Rc::clone(&controller), &frames, generation, view.clone());
        })
    };

    {
        let controller = Rc::clone(&controller);
        let frames = Rc::clone(&frames);
        let pending_insight = Rc::clone(&pending_insight);
        let pending_scroll = Rc::clone(&pending_scroll);
        let scroll_root = scroll_root.clone();
        let section_refs = Rc::clone(&section_refs);
        let view = view.clone();
        let threshold = props.config.threshold();

        use_effect_with((), move |_| {
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                if let Err(err) = styles::ensure_styles(&document) {
                    log::error!("could not inject timeline styles: {err:?}");
                }
            }

            let generation = controller.borrow_mut().mount();
            run_animation(Rc::clone(&controller), &frames, generation, view);

            let observer = match scroll_root.cast::<Element>() {
                Some(root) => match SectionObserver::new(&root, threshold, on_visible) {
                    Ok(observer) => {
                        for (index, node) in section_refs.iter().enumerate() {
                            if let Some(element) = node.cast::<Element>() {
                                observer.observe(element, index);
                            }
                        }
                        log::debug!("observing {} sections", observer.observed());
                        Some(observer)
                    }
                    Err(err) => {
                        log::warn!("visibility tracking unavailable, section changes disabled: {err:?}");
                        None
                    }
                },
                None => {
                    log::warn!("scroll container not mounted, section changes disabled");
                    None
                }
            };

            move || {
                drop(observer);
                frames.cancel();
                pending_insight.borrow_mut().take();
                pending_scroll.borrow_mut().take();
                controller.borrow_mut().unmount();
            }
        });
    }

    let on_generate = {
        let controller = Rc::clone(&controller);
        let insights = Rc::clone(&props.insights);
        let pending_insight = Rc::clone(&pending_insight);
        let pending_scroll = Rc::clone(&pending_scroll);
        let insight_ref = insight_ref.clone();
        let view = view.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(ticket) = controller.borrow_mut().request_insight() else {
                return;
            };
            view.set(controller.borrow().view());

            let delay = controller.borrow().config().insight_delay_ms;
            let controller = Rc::clone(&controller);
            let insights = Rc::clone(&insights);
            let pending_scroll = Rc::clone(&pending_scroll);
            let insight_ref = insight_ref.clone();
            let view = view.clone();
            let timeout = Timeout::new(delay, move || {
                if !controller.borrow_mut().resolve_insight(ticket, insights.as_ref()) {
                    return;
                }
                view.set(controller.borrow().view());

                let scroll_delay = controller.borrow().config().insight_scroll_delay_ms;
                let scroll = Timeout::new(scroll_delay, move || scroll_into_view(&insight_ref));
                *pending_scroll.borrow_mut() = Some(scroll);
            });
            *pending_insight.borrow_mut() = Some(timeout);
        })
    };

    let current_index = view.ui.current_section_index;
    let section = &props.dataset[props.dataset.clamp_index(current_index)];
    let transition_ms = props.config.chart_transition_ms;
    let generate_label = if view.ui.is_loading {
        view.button_label.to_string()
    } else {
        format!("✨ {}", view.button_label)
    };

    html! {
        <div class="timeline-root">
            <div class="timeline-scroll" ref={scroll_root}>
                {
                    for props.dataset.iter().enumerate().map(|(index, item)| html! {
                        <div
                            class={classes!("scroll-section", (index == current_index).then_some("is-active"))}
                            ref={section_refs[index].clone()}
                            data-index={index.to_string()}
                        >
                            <h2>{ item.date.clone() }</h2>
                            <p>{ item.main_text.clone() }</p>
                        </div>
                    })
                }
                <div class="scroll-spacer"></div>
            </div>

            <div class="timeline-panel">
                <div class="panel-inner">
                    <div class="panel-header">
                        <span class="panel-date mono">{ section.date.clone() }</span>
                        <span class="panel-as-of mono">{ props.config.as_of_label() }</span>
                    </div>

                    <h2 class="panel-title mono">{"Unreliable Agent"}</h2>
                    <AgentChart graph_data={section.graph_data.clone()} transition_ms={transition_ms} />
                    <CapabilityGrid />

                    <p class="panel-text">{ section.main_text.clone() }</p>

                    <StatsGrid stats={view.frame.stats.clone()} />
                    <IconRow icons={section.timeline_icons.clone()} />

                    <div class="insight">
                        <button
                            type="button"
                            class="insight-button"
                            onclick={on_generate}
                            disabled={view.ui.is_loading}
                        >
                            { generate_label }
                        </button>
                        {
                            if view.ui.ai_insight.is_empty() {
                                html! {}
                            } else {
                                html! {
                                    <div class="ai-insight-box" ref={insight_ref}>
                                        <p>{ view.ui.ai_insight.clone() }</p>
                                    </div>
                                }
                            }
                        }
                    </div>
                </div>

                <aside class="compute-panel">
                    <h3 class="mono">{"Compute"}</h3>
                    <ComputeGauge value={view.frame.compute_value} transition_ms={transition_ms} />
                </aside>
            </div>
        </div>
    }
}
