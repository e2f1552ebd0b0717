#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Object};
use timeline_core::{VisibilityEntry, VisibilityTracker};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::Callback;

/// Owns an `IntersectionObserver` over the section elements of a scroll
/// container. Every element is unobserved and the observer disconnected on drop.
pub struct SectionObserver {
    observer: IntersectionObserver,
    tracker: Rc<RefCell<VisibilityTracker<Element>>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl SectionObserver {
    pub fn new(root: &Element, threshold: f64, on_visible: Callback<usize>) -> Result<Self, JsValue> {
        let tracker = Rc::new(RefCell::new(VisibilityTracker::new(threshold)));

        let callback = {
            let tracker = Rc::clone(&tracker);
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, _observer: IntersectionObserver| {
                    let entries: Vec<VisibilityEntry<Element>> = entries
                        .iter()
                        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                        .map(|entry| VisibilityEntry {
                            target: entry.target(),
                            ratio: entry.intersection_ratio(),
                            intersecting: entry.is_intersecting(),
                        })
                        .collect();

                    let indices = tracker.borrow().visible_indices(&entries);
                    for index in indices {
                        on_visible.emit(index);
                    }
                },
            )
        };

        let root: &Object = root;
        let options = IntersectionObserverInit::new();
        options.set_root(Some(root));
        options.set_threshold(&JsValue::from_f64(threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            tracker,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: Element, index: usize) {
        self.observer.observe(&element);
        self.tracker.borrow_mut().observe(element, index);
    }

    pub fn observed(&self) -> usize {
        self.tracker.borrow().len()
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        for element in self.tracker.borrow_mut().unobserve_all() {
            self.observer.unobserve(&element);
        }
        self.observer.disconnect();
    }
}
