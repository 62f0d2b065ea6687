//! End-to-end gauge scenarios: build a dial, animate it, and inspect the
//! resulting document.

use std::f64::consts::PI;
use std::time::Duration;

use link_checker::dom::Element;
use link_checker::gauge::{
    drive, path_length, AnimationOptions, AnimationPhase, CancelMode, DriveOutcome,
    FrameDriverOptions, GaugeAnimator, TickOutcome,
};

const RED: &str = "#dc3545";

fn card() -> Element {
    Element::new("section").with_attr("id", "result-card")
}

fn attr(dom: &Element, id: &str, name: &str) -> String {
    dom.find_by_id(id)
        .and_then(|e| e.attr(name))
        .unwrap_or_default()
        .to_string()
}

fn label(dom: &Element, gauge: &GaugeAnimator) -> String {
    dom.find_by_id(&gauge.ids().label)
        .and_then(|e| e.text())
        .unwrap_or_default()
        .to_string()
}

fn filled_fraction(dom: &Element, gauge: &GaugeAnimator) -> f64 {
    let raw = attr(dom, &gauge.ids().arc, "stroke-dasharray");
    let parts: Vec<f64> = raw.split(' ').map(|p| p.parse().unwrap()).collect();
    parts[0] / parts[1]
}

#[tokio::test(start_paused = true)]
async fn test_thirty_percent_red_gauge() {
    let mut dom = card();
    let mut gauge = GaugeAnimator::create(&mut dom, 0.0);
    gauge.animate_to(
        &mut dom,
        30.0,
        RED,
        AnimationOptions::with_duration(Duration::from_millis(1100)),
    );

    let outcome = drive(&mut gauge, &mut dom, &FrameDriverOptions::default(), |_, _| {}).await;

    assert_eq!(outcome, DriveOutcome::Completed(30.0));
    assert_eq!(label(&dom, &gauge), "Confidence: 30%");
    assert_eq!(attr(&dom, &gauge.ids().needle, "transform"), "rotate(-36 100 100)");
    assert_eq!(attr(&dom, &gauge.ids().arc, "stroke"), RED);
    assert!((filled_fraction(&dom, &gauge) - 0.30).abs() < 1e-4);

    let d = attr(&dom, &gauge.ids().arc, "d");
    assert!((path_length(&d).unwrap() - 80.0 * PI).abs() < 1e-6);
}

#[tokio::test(start_paused = true)]
async fn test_over_range_matches_hundred() {
    let mut a = card();
    let mut over = GaugeAnimator::create(&mut a, 0.0);
    over.animate_to(&mut a, 150.0, RED, AnimationOptions::default());
    drive(&mut over, &mut a, &FrameDriverOptions::default(), |_, _| {}).await;

    let mut b = card();
    let mut hundred = GaugeAnimator::create(&mut b, 0.0);
    hundred.animate_to(&mut b, 100.0, RED, AnimationOptions::default());
    drive(&mut hundred, &mut b, &FrameDriverOptions::default(), |_, _| {}).await;

    assert_eq!(label(&a, &over), label(&b, &hundred));
    assert_eq!(
        attr(&a, &over.ids().needle, "transform"),
        attr(&b, &hundred.ids().needle, "transform")
    );
    assert_eq!(
        attr(&a, &over.ids().arc, "stroke-dasharray"),
        attr(&b, &hundred.ids().arc, "stroke-dasharray")
    );
}

#[tokio::test(start_paused = true)]
async fn test_rapid_repeat_requests_leave_one_run() {
    let mut dom = card();
    let mut gauge = GaugeAnimator::create(&mut dom, 0.0);
    let first = gauge
        .animate_to(&mut dom, 70.0, RED, AnimationOptions::default())
        .unwrap();
    let second = gauge
        .animate_to(&mut dom, 70.0, RED, AnimationOptions::default())
        .unwrap();

    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());

    let outcome = drive(&mut gauge, &mut dom, &FrameDriverOptions::default(), |_, _| {}).await;
    assert_eq!(outcome, DriveOutcome::Completed(70.0));
    assert_eq!(label(&dom, &gauge), "Confidence: 70%");
    assert!(second.is_cancelled(), "finished runs release their handle");
    assert!(gauge.active_handle().is_none());

    // A single request for the same target ends in the same visual state.
    let mut single_dom = card();
    let mut single = GaugeAnimator::create(&mut single_dom, 0.0);
    single.animate_to(&mut single_dom, 70.0, RED, AnimationOptions::default());
    drive(&mut single, &mut single_dom, &FrameDriverOptions::default(), |_, _| {}).await;

    assert_eq!(label(&dom, &gauge), label(&single_dom, &single));
    assert_eq!(
        attr(&dom, &gauge.ids().needle, "transform"),
        attr(&single_dom, &single.ids().needle, "transform")
    );
    assert_eq!(
        attr(&dom, &gauge.ids().arc, "stroke-dasharray"),
        attr(&single_dom, &single.ids().arc, "stroke-dasharray")
    );
    assert_eq!(
        attr(&dom, &gauge.ids().arc, "stroke"),
        attr(&single_dom, &single.ids().arc, "stroke")
    );
}

#[test]
fn test_reduced_motion_has_no_frames() {
    let mut dom = card();
    let mut gauge = GaugeAnimator::create(&mut dom, 10.0);
    let handle = gauge.animate_to(&mut dom, 85.0, RED, AnimationOptions::reduced_motion());

    assert!(handle.is_none());
    assert_eq!(gauge.phase(), AnimationPhase::Complete);
    assert_eq!(gauge.intermediate_frames(), 0);
    assert_eq!(label(&dom, &gauge), "Confidence: 85%");
}

#[test]
fn test_cancel_mid_run_keeps_consistent_frame() {
    let mut dom = card();
    let mut gauge = GaugeAnimator::create(&mut dom, 0.0);
    gauge.animate_to(&mut dom, 100.0, RED, AnimationOptions::default());
    gauge.tick(&mut dom, 0.0);
    let value = match gauge.tick(&mut dom, 300.0) {
        TickOutcome::Frame(v) => v,
        other => panic!("expected a frame, got {other:?}"),
    };
    assert!(gauge.cancel(&mut dom, CancelMode::Freeze));

    // Arc, needle and label all describe the same frozen value.
    assert_eq!(gauge.current_value(), value);
    assert!((filled_fraction(&dom, &gauge) - value / 100.0).abs() < 1e-3);
    assert_eq!(
        label(&dom, &gauge),
        format!("Confidence: {}%", value.round() as u8)
    );
    assert_eq!(gauge.tick(&mut dom, 400.0), TickOutcome::Idle);
}

#[test]
fn test_removed_dial_never_panics() {
    let mut dom = card();
    let mut gauge = GaugeAnimator::create(&mut dom, 0.0);
    let needle = gauge.ids().needle.clone();
    dom.remove_by_id(&needle);

    assert!(gauge
        .animate_to(&mut dom, 40.0, RED, AnimationOptions::default())
        .is_none());
    assert_eq!(gauge.tick(&mut dom, 0.0), TickOutcome::Idle);
    assert!(!gauge.snap_to_target(&mut dom));
    assert!(!gauge.cancel(&mut dom, CancelMode::JumpToTarget));
}
