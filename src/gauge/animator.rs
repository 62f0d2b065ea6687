//! Confidence gauge state machine.
//!
//! A [`GaugeAnimator`] owns one dial: it builds the SVG subtree, remembers
//! which value is on screen, and moves the dial towards a target through a
//! single step function, [`GaugeAnimator::tick`]. It does not schedule
//! anything itself; the frame driver (or a test) calls `tick` with a
//! monotonically increasing timestamp.
//!
//! Phases: `Idle -> Animating -> Complete | Cancelled`. Each run carries an
//! [`AnimationHandle`] whose cancellation token is checked at the top of every
//! tick, and a new [`GaugeAnimator::animate_to`] cancels the previous handle
//! before touching the document.
//!
//! Stroke, needle and label are always written together from one value, so
//! the dial is never left half-updated. When any of them is missing from the
//! document the operation is a no-op.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, trace};
use tokio_util::sync::CancellationToken;

use super::easing::Easing;
use super::geometry::{clamp_confidence, fmt_num, DialGeometry};
use super::path::path_length;
use crate::config::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_GAUGE_COLOR, GAUGE_NEEDLE_COLOR, GAUGE_TRACK_COLOR,
    MIN_ANIMATION_DURATION,
};
use crate::dom::Element;

static NEXT_GAUGE_ID: AtomicU64 = AtomicU64::new(1);

/// Cancellation handle for one animation run.
///
/// Clones share the same token. The token is cancelled when the run ends for
/// any reason (superseded, cancelled, or completed), so a live handle means a
/// running animation.
#[derive(Debug, Clone, Default)]
pub struct AnimationHandle {
    token: CancellationToken,
}

impl AnimationHandle {
    fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the next tick stops the run without mutating the dial.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The underlying token, for `select!`-style waiting.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Per-run options supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationOptions {
    /// Requested duration. Anything shorter than 200 ms is raised to 200 ms.
    pub duration: Duration,
    /// Skip intermediate frames and show the final state immediately.
    pub reduce_motion: bool,
    pub easing: Easing,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS),
            reduce_motion: false,
            easing: Easing::default(),
        }
    }
}

impl AnimationOptions {
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn reduced_motion() -> Self {
        Self {
            reduce_motion: true,
            ..Self::default()
        }
    }

    /// Duration actually used, floored at [`MIN_ANIMATION_DURATION`].
    pub fn effective_duration(&self) -> Duration {
        self.duration.max(MIN_ANIMATION_DURATION)
    }
}

/// Values owned by one gauge instance.
#[derive(Debug, Clone, Default)]
pub struct GaugeState {
    /// Value currently rendered.
    pub current_value: f64,
    /// Value the current (or last) run is heading to.
    pub target_value: f64,
    pub animation_handle: Option<AnimationHandle>,
    /// Timestamp (ms) of the first frame of the current run.
    pub start_timestamp: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Animating,
    Complete,
    Cancelled,
}

/// Result of one [`GaugeAnimator::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing is animating.
    Idle,
    /// An intermediate frame was rendered at this value.
    Frame(f64),
    /// The run reached its target; the value is exact.
    Completed(f64),
    /// The run was cancelled before this tick; nothing was written.
    Cancelled,
    /// Dial elements vanished from the document or could no longer be
    /// rendered; the run was dropped.
    Detached,
}

/// What [`GaugeAnimator::cancel`] leaves on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelMode {
    /// Keep the last rendered frame.
    Freeze,
    /// Render the run's target.
    JumpToTarget,
}

/// Payload passed to completion hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub gauge_id: String,
    pub value: f64,
}

type CompletionHook = Box<dyn FnMut(&mut Element, &Completion) + Send>;

/// Element ids of one dial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialIds {
    pub root: String,
    pub track: String,
    pub arc: String,
    pub needle: String,
    pub label: String,
}

impl DialIds {
    fn new(instance: u64) -> Self {
        let prefix = format!("gauge-{instance}");
        Self {
            track: format!("{prefix}-track"),
            arc: format!("{prefix}-arc"),
            needle: format!("{prefix}-needle"),
            label: format!("{prefix}-label"),
            root: prefix,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveRun {
    from: f64,
    to: f64,
    duration_ms: f64,
    easing: Easing,
}

/// Label text for a value.
pub fn label_text(value: f64) -> String {
    format!("Confidence: {}%", clamp_confidence(value).round() as u8)
}

/// One confidence gauge and its animation lifecycle.
pub struct GaugeAnimator {
    ids: DialIds,
    geometry: DialGeometry,
    state: GaugeState,
    phase: AnimationPhase,
    run: Option<ActiveRun>,
    color: String,
    intermediate_frames: u64,
    hooks: Vec<CompletionHook>,
}

impl std::fmt::Debug for GaugeAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaugeAnimator")
            .field("ids", &self.ids)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("color", &self.color)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl GaugeAnimator {
    /// Builds a dial with the default geometry inside `container`, showing
    /// `initial_value` (clamped) without animation.
    pub fn create(container: &mut Element, initial_value: f64) -> Self {
        Self::create_with(container, initial_value, DialGeometry::default())
    }

    /// Same as [`GaugeAnimator::create`] with explicit geometry.
    pub fn create_with(container: &mut Element, initial_value: f64, geometry: DialGeometry) -> Self {
        let instance = NEXT_GAUGE_ID.fetch_add(1, Ordering::Relaxed);
        let ids = DialIds::new(instance);
        let initial = clamp_confidence(initial_value);

        container.append(build_dial(&ids, &geometry));

        let mut animator = Self {
            ids,
            geometry,
            state: GaugeState {
                current_value: initial,
                target_value: initial,
                ..GaugeState::default()
            },
            phase: AnimationPhase::Idle,
            run: None,
            color: DEFAULT_GAUGE_COLOR.to_string(),
            intermediate_frames: 0,
            hooks: Vec::new(),
        };
        animator.render(container, initial);
        debug!("Created gauge {} at {}", animator.ids.root, initial);
        animator
    }

    pub fn ids(&self) -> &DialIds {
        &self.ids
    }

    pub fn root_id(&self) -> &str {
        &self.ids.root
    }

    /// The dial's root `<svg>` element inside `dom`, if still present.
    pub fn root<'a>(&self, dom: &'a Element) -> Option<&'a Element> {
        dom.find_by_id(&self.ids.root)
    }

    pub fn geometry(&self) -> &DialGeometry {
        &self.geometry
    }

    pub fn state(&self) -> &GaugeState {
        &self.state
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == AnimationPhase::Animating
    }

    pub fn current_value(&self) -> f64 {
        self.state.current_value
    }

    pub fn target_value(&self) -> f64 {
        self.state.target_value
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Handle of the running animation, if any.
    pub fn active_handle(&self) -> Option<&AnimationHandle> {
        self.state.animation_handle.as_ref()
    }

    /// Intermediate (non-final) frames rendered since creation.
    pub fn intermediate_frames(&self) -> u64 {
        self.intermediate_frames
    }

    /// Registers a hook called every time a run completes.
    pub fn on_complete<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Element, &Completion) + Send + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Returns true when arc, needle and label are all present in `dom`.
    pub fn is_mounted(&self, dom: &Element) -> bool {
        dom.find_by_id(&self.ids.arc).is_some()
            && dom.find_by_id(&self.ids.needle).is_some()
            && dom.find_by_id(&self.ids.label).is_some()
    }

    /// Total arc length measured from the arc element's path data.
    pub fn measure_arc(&self, dom: &Element) -> Option<f64> {
        let d = dom.find_by_id(&self.ids.arc)?.attr("d")?;
        match path_length(d) {
            Ok(length) if length.is_finite() && length > 0.0 => Some(length),
            Ok(_) => None,
            Err(e) => {
                debug!("Gauge {} has unusable arc path: {}", self.ids.root, e);
                None
            }
        }
    }

    /// Starts moving the dial to `target_value` (clamped) in `color`.
    ///
    /// Any running animation is cancelled first. With `reduce_motion` the
    /// final state is rendered immediately, completion hooks fire, and no
    /// handle is returned. Returns `None` without side effects when the dial
    /// is no longer in `dom`.
    pub fn animate_to(
        &mut self,
        dom: &mut Element,
        target_value: f64,
        color: &str,
        options: AnimationOptions,
    ) -> Option<AnimationHandle> {
        if !self.is_mounted(dom) {
            debug!("Gauge {} not in document; ignoring animate_to", self.ids.root);
            return None;
        }

        let target = clamp_confidence(target_value);
        self.stop_run(AnimationPhase::Cancelled);

        self.color = color.to_string();
        self.state.target_value = target;
        self.state.start_timestamp = None;

        if options.reduce_motion {
            debug!("Gauge {} snapping to {} (reduced motion)", self.ids.root, target);
            self.complete_at(dom, target);
            return None;
        }

        let duration = options.effective_duration();
        let handle = AnimationHandle::new();
        self.run = Some(ActiveRun {
            from: self.state.current_value,
            to: target,
            duration_ms: duration.as_secs_f64() * 1000.0,
            easing: options.easing,
        });
        self.state.animation_handle = Some(handle.clone());
        self.phase = AnimationPhase::Animating;
        debug!(
            "Gauge {} animating {} -> {} over {:?}",
            self.ids.root, self.state.current_value, target, duration
        );
        Some(handle)
    }

    /// Advances the running animation to `now_ms`.
    ///
    /// The first tick of a run records its start timestamp. Timestamps are
    /// expected to be monotonic; an earlier timestamp is treated as no
    /// elapsed time.
    pub fn tick(&mut self, dom: &mut Element, now_ms: f64) -> TickOutcome {
        if self.phase != AnimationPhase::Animating {
            return TickOutcome::Idle;
        }
        let cancelled = self
            .state
            .animation_handle
            .as_ref()
            .map(AnimationHandle::is_cancelled)
            .unwrap_or(true);
        if cancelled {
            debug!("Gauge {} run cancelled at {}", self.ids.root, self.state.current_value);
            self.stop_run(AnimationPhase::Cancelled);
            return TickOutcome::Cancelled;
        }
        if !self.is_mounted(dom) {
            debug!("Gauge {} left the document mid-run", self.ids.root);
            self.stop_run(AnimationPhase::Cancelled);
            return TickOutcome::Detached;
        }
        let Some(run) = self.run else {
            self.phase = AnimationPhase::Idle;
            return TickOutcome::Idle;
        };

        let start = *self.state.start_timestamp.get_or_insert(now_ms);
        let elapsed = (now_ms - start).max(0.0);
        let progress = (elapsed / run.duration_ms).min(1.0);

        if progress >= 1.0 {
            if !self.complete_at(dom, run.to) {
                return TickOutcome::Detached;
            }
            return TickOutcome::Completed(run.to);
        }

        let value = run.from + (run.to - run.from) * run.easing.apply(progress);
        if !self.render(dom, value) {
            debug!("Gauge {} has no usable arc mid-run", self.ids.root);
            self.stop_run(AnimationPhase::Cancelled);
            return TickOutcome::Detached;
        }
        self.intermediate_frames += 1;
        trace!("Gauge {} frame {:.2} (progress {:.3})", self.ids.root, value, progress);
        TickOutcome::Frame(value)
    }

    /// Immediately finishes the running animation at its target.
    ///
    /// Used when frames cannot be scheduled. Completion hooks fire as if the
    /// run had played out. Returns false when nothing was animating or the
    /// dial could not be rendered.
    pub fn snap_to_target(&mut self, dom: &mut Element) -> bool {
        if self.phase != AnimationPhase::Animating {
            return false;
        }
        let target = self.run.map(|r| r.to).unwrap_or(self.state.target_value);
        self.complete_at(dom, target)
    }

    /// Cancels the running animation. Returns false when nothing was animating.
    ///
    /// Completion hooks do not fire.
    pub fn cancel(&mut self, dom: &mut Element, mode: CancelMode) -> bool {
        if self.phase != AnimationPhase::Animating {
            return false;
        }
        let target = self.run.map(|r| r.to).unwrap_or(self.state.target_value);
        self.stop_run(AnimationPhase::Cancelled);
        if mode == CancelMode::JumpToTarget {
            self.render(dom, target);
        }
        debug!(
            "Gauge {} cancelled ({:?}) at {}",
            self.ids.root, mode, self.state.current_value
        );
        true
    }

    /// Ends the current run (if any) and releases its handle.
    fn stop_run(&mut self, phase: AnimationPhase) {
        if let Some(handle) = self.state.animation_handle.take() {
            handle.cancel();
        }
        self.run = None;
        self.state.start_timestamp = None;
        if self.phase == AnimationPhase::Animating {
            self.phase = phase;
        }
    }

    /// Renders `target` and fires the hooks. When nothing could be written
    /// the run ends as `Cancelled` and the hooks stay silent.
    fn complete_at(&mut self, dom: &mut Element, target: f64) -> bool {
        if let Some(handle) = self.state.animation_handle.take() {
            handle.cancel();
        }
        self.run = None;
        self.state.start_timestamp = None;
        if !self.render(dom, target) {
            debug!("Gauge {} could not render {}; run dropped", self.ids.root, target);
            self.phase = AnimationPhase::Cancelled;
            return false;
        }
        self.phase = AnimationPhase::Complete;

        let completion = Completion {
            gauge_id: self.ids.root.clone(),
            value: target,
        };
        debug!("Gauge {} complete at {}", self.ids.root, target);
        for hook in self.hooks.iter_mut() {
            hook(dom, &completion);
        }
        true
    }

    /// Writes arc, needle and label for `value`. All or nothing.
    fn render(&mut self, dom: &mut Element, value: f64) -> bool {
        if !self.is_mounted(dom) {
            return false;
        }
        let Some(total) = self.measure_arc(dom) else {
            return false;
        };
        let value = clamp_confidence(value);
        let filled = total * self.geometry.arc_fraction(value);

        if let Some(arc) = dom.find_by_id_mut(&self.ids.arc) {
            arc.set_attr(
                "stroke-dasharray",
                format!("{} {}", fmt_num(filled), fmt_num(total)),
            );
            arc.set_attr("stroke", self.color.clone());
        }
        if let Some(needle) = dom.find_by_id_mut(&self.ids.needle) {
            needle.set_attr("transform", self.geometry.needle_transform(value));
        }
        if let Some(label) = dom.find_by_id_mut(&self.ids.label) {
            label.set_text(label_text(value));
        }
        if let Some(root) = dom.find_by_id_mut(&self.ids.root) {
            root.set_attr("aria-valuenow", format!("{}", value.round() as u8));
            root.set_attr("data-value", fmt_num(value));
        }
        self.state.current_value = value;
        true
    }
}

impl Drop for GaugeAnimator {
    fn drop(&mut self) {
        if let Some(handle) = self.state.animation_handle.take() {
            handle.cancel();
        }
    }
}

fn build_dial(ids: &DialIds, geometry: &DialGeometry) -> Element {
    let arc_d = geometry.arc_path();
    let stroke_width = fmt_num(geometry.stroke_width);
    let (tip_x, tip_y) = geometry.needle_tip();

    Element::new("svg")
        .with_attr("id", ids.root.clone())
        .with_attr("class", "confidence-gauge")
        .with_attr("xmlns", "http://www.w3.org/2000/svg")
        .with_attr("viewBox", geometry.view_box())
        .with_attr("role", "meter")
        .with_attr("aria-valuemin", "0")
        .with_attr("aria-valuemax", "100")
        .with_child(
            Element::new("path")
                .with_attr("id", ids.track.clone())
                .with_attr("class", "gauge-track")
                .with_attr("d", arc_d.clone())
                .with_attr("fill", "none")
                .with_attr("stroke", GAUGE_TRACK_COLOR)
                .with_attr("stroke-width", stroke_width.clone())
                .with_attr("stroke-linecap", "round"),
        )
        .with_child(
            Element::new("path")
                .with_attr("id", ids.arc.clone())
                .with_attr("class", "gauge-arc")
                .with_attr("d", arc_d)
                .with_attr("fill", "none")
                .with_attr("stroke", DEFAULT_GAUGE_COLOR)
                .with_attr("stroke-width", stroke_width)
                .with_attr("stroke-linecap", "round"),
        )
        .with_child(
            Element::new("line")
                .with_attr("id", ids.needle.clone())
                .with_attr("class", "gauge-needle")
                .with_attr("x1", fmt_num(geometry.center_x))
                .with_attr("y1", fmt_num(geometry.center_y))
                .with_attr("x2", fmt_num(tip_x))
                .with_attr("y2", fmt_num(tip_y))
                .with_attr("stroke", GAUGE_NEEDLE_COLOR)
                .with_attr("stroke-width", "3")
                .with_attr("stroke-linecap", "round"),
        )
        .with_child(
            Element::new("circle")
                .with_attr("class", "gauge-hub")
                .with_attr("cx", fmt_num(geometry.center_x))
                .with_attr("cy", fmt_num(geometry.center_y))
                .with_attr("r", "6")
                .with_attr("fill", GAUGE_NEEDLE_COLOR),
        )
        .with_child(
            Element::new("text")
                .with_attr("id", ids.label.clone())
                .with_attr("class", "gauge-label")
                .with_attr("x", fmt_num(geometry.center_x))
                .with_attr("y", fmt_num(geometry.center_y + 16.0))
                .with_attr("text-anchor", "middle"),
        )
}
