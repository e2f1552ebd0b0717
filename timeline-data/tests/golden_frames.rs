use std::fs;

use serde_json::Value;
use timeline_core::{TimelineConfig, TimelineController, Transition};
use timeline_data::load_timeline_str;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn halfway_frame_matches_golden() {
    let json = fs::read_to_string(fixture_path("two_sections.json")).expect("read fixture");
    let dataset = load_timeline_str(&json).expect("load fixture");

    let transition = Transition::into_section(&dataset, 1, 1500);
    let actual = serde_json::to_value(transition.frame_at(750.0)).expect("serialize frame");

    let expected = fs::read_to_string(fixture_path("two_sections_halfway_frame.json"))
        .expect("read golden frame");
    let expected: Value = serde_json::from_str(&expected).expect("golden is valid JSON");

    assert_eq!(actual, expected);
}

#[test]
fn controller_settles_on_fixture_values() {
    let json = fs::read_to_string(fixture_path("two_sections.json")).expect("read fixture");
    let dataset = load_timeline_str(&json).expect("load fixture");

    let mut controller = TimelineController::new(dataset.clone(), TimelineConfig::default());
    controller.mount();
    let generation = controller.on_section_change(1).expect("section change");

    let mut now = 16.0;
    let mut frames = 0;
    loop {
        frames += 1;
        match controller.tick(generation, now) {
            timeline_core::FrameStep::Continue => now += 16.0,
            timeline_core::FrameStep::Finished => break,
            timeline_core::FrameStep::Stale => panic!("loop went stale"),
        }
    }

    assert!(frames > 90);
    assert_eq!(controller.frame().stats, dataset[1].stats);
    assert_eq!(controller.frame().compute_value, 90.0);
    assert_eq!(controller.active_loops(), 0);
}
