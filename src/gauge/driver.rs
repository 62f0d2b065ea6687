//! Frame driver: plays a gauge animation on the tokio timer.
//!
//! Each interval tick stands in for one animation frame. Timestamps come from
//! `tokio::time::Instant`, so tests with paused time step through frames
//! deterministically.

use std::time::Duration;

use log::debug;
use tokio::time::{interval, Instant, MissedTickBehavior};

use super::animator::{AnimationPhase, GaugeAnimator, TickOutcome};
use crate::config::DEFAULT_FRAME_INTERVAL_MS;
use crate::dom::Element;

/// How frames are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDriverOptions {
    pub frame_interval: Duration,
    /// When false the run is finished immediately (no frame scheduling).
    pub frames_available: bool,
}

impl Default for FrameDriverOptions {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
            frames_available: true,
        }
    }
}

/// How a [`drive`] call ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveOutcome {
    Completed(f64),
    Cancelled,
    Idle,
}

/// Ticks `animator` until its current run ends.
///
/// `on_frame` is called after every rendered frame, including the final one.
/// A run that is already finished (for example after a reduced-motion
/// `animate_to`) is reported without ticking.
pub async fn drive<F>(
    animator: &mut GaugeAnimator,
    dom: &mut Element,
    options: &FrameDriverOptions,
    mut on_frame: F,
) -> DriveOutcome
where
    F: FnMut(&Element, f64),
{
    match animator.phase() {
        AnimationPhase::Animating => {}
        AnimationPhase::Complete => return DriveOutcome::Completed(animator.current_value()),
        AnimationPhase::Cancelled => return DriveOutcome::Cancelled,
        AnimationPhase::Idle => return DriveOutcome::Idle,
    }

    if !options.frames_available {
        debug!(
            "Frame scheduling unavailable; finishing gauge {} immediately",
            animator.root_id()
        );
        if !animator.snap_to_target(dom) {
            return DriveOutcome::Cancelled;
        }
        let value = animator.current_value();
        on_frame(dom, value);
        return DriveOutcome::Completed(value);
    }

    let origin = Instant::now();
    let mut ticker = interval(options.frame_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let now_ms = origin.elapsed().as_secs_f64() * 1000.0;
        match animator.tick(dom, now_ms) {
            TickOutcome::Frame(value) => on_frame(dom, value),
            TickOutcome::Completed(value) => {
                on_frame(dom, value);
                return DriveOutcome::Completed(value);
            }
            TickOutcome::Cancelled | TickOutcome::Detached => return DriveOutcome::Cancelled,
            TickOutcome::Idle => return DriveOutcome::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::{AnimationOptions, CancelMode};

    fn container() -> Element {
        Element::new("div").with_attr("id", "card")
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_plays_to_completion() {
        let mut dom = container();
        let mut gauge = GaugeAnimator::create(&mut dom, 0.0);
        gauge.animate_to(
            &mut dom,
            30.0,
            "#dc3545",
            AnimationOptions::with_duration(Duration::from_millis(1100)),
        );

        let mut frames = Vec::new();
        let started = Instant::now();
        let outcome = drive(&mut gauge, &mut dom, &FrameDriverOptions::default(), |_, v| {
            frames.push(v)
        })
        .await;

        assert_eq!(outcome, DriveOutcome::Completed(30.0));
        assert!(started.elapsed() >= Duration::from_millis(1100));
        assert!(frames.len() > 10, "only {} frames", frames.len());
        assert_eq!(frames.last().copied(), Some(30.0));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_without_frames_snaps() {
        let mut dom = container();
        let mut gauge = GaugeAnimator::create(&mut dom, 0.0);
        gauge.animate_to(&mut dom, 45.0, "#ffc107", AnimationOptions::default());
        let options = FrameDriverOptions {
            frames_available: false,
            ..FrameDriverOptions::default()
        };

        let mut frames = 0;
        let outcome = drive(&mut gauge, &mut dom, &options, |_, _| frames += 1).await;
        assert_eq!(outcome, DriveOutcome::Completed(45.0));
        assert_eq!(frames, 1);
        assert_eq!(gauge.intermediate_frames(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_reports_cancelled_run() {
        let mut dom = container();
        let mut gauge = GaugeAnimator::create(&mut dom, 0.0);
        gauge.animate_to(&mut dom, 45.0, "#ffc107", AnimationOptions::default());
        gauge.cancel(&mut dom, CancelMode::Freeze);
        let outcome = drive(&mut gauge, &mut dom, &FrameDriverOptions::default(), |_, _| {}).await;
        assert_eq!(outcome, DriveOutcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_idle_gauge_returns_immediately() {
        let mut dom = container();
        let mut gauge = GaugeAnimator::create(&mut dom, 12.0);
        let outcome = drive(&mut gauge, &mut dom, &FrameDriverOptions::default(), |_, _| {}).await;
        assert_eq!(outcome, DriveOutcome::Idle);
    }
}
