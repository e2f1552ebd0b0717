#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use timeline_core::progress;
use yew::prelude::*;

type Step = Rc<RefCell<dyn FnMut(f64) -> bool>>;

/// A self re-arming `requestAnimationFrame` chain with a single slot.
///
/// Starting a new chain drops the pending frame of the previous one, and
/// dropping an [`AnimationFrame`] cancels it, so two chains never overlap.
#[derive(Clone, Default)]
pub struct FrameLoop {
    slot: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameLoop {
    /// Runs `step` once per frame with the frame timestamp until it returns `false`.
    pub fn start(&self, step: impl FnMut(f64) -> bool + 'static) {
        self.cancel();
        let step: Step = Rc::new(RefCell::new(step));
        schedule(Rc::clone(&self.slot), step);
    }

    pub fn cancel(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

fn schedule(slot: Rc<RefCell<Option<AnimationFrame>>>, step: Step) {
    let next_slot = Rc::clone(&slot);
    let handle = request_animation_frame(move |timestamp| {
        let keep_going = {
            let mut step_fn = step.borrow_mut();
            (*step_fn)(timestamp)
        };
        if keep_going {
            schedule(next_slot, step);
        } else {
            next_slot.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(handle);
}

/// Eases the returned value from its previous target to `target` over
/// `duration_ms` whenever `target` changes.
#[hook]
pub fn use_tween<T>(target: T, duration_ms: u32, blend: fn(&T, &T, f64) -> T) -> T
where
    T: Clone + PartialEq + Default + 'static,
{
    let shown = use_state(T::default);
    let latest = use_mut_ref(T::default);
    let frames = use_memo((), |_| FrameLoop::default());

    {
        let shown = shown.clone();
        let frames = Rc::clone(&frames);
        use_effect_with(target, move |target| {
            let from = latest.borrow().clone();
            let to = target.clone();
            let mut started_at = None;
            let tween_frames = Rc::clone(&frames);
            tween_frames.start(move |now| {
                let start = *started_at.get_or_insert(now);
                let t = progress(now - start, duration_ms);
                let value = blend(&from, &to, t);
                *latest.borrow_mut() = value.clone();
                shown.set(value);
                t < 1.0
            });
            move || frames.cancel()
        });
    }

    (*shown).clone()
}
