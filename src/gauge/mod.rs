//! Confidence gauge: an SVG dial whose arc and needle track a 0-100 score.
//!
//! - [`geometry`] maps values to arc fractions and needle angles
//! - [`path`] measures the rendered arc from its path data
//! - [`animator`] is the per-instance state machine
//! - [`driver`] feeds the state machine frames from the tokio timer

pub mod animator;
pub mod driver;
pub mod easing;
pub mod geometry;
pub mod path;

pub use animator::{
    label_text, AnimationHandle, AnimationOptions, AnimationPhase, CancelMode, Completion, DialIds,
    GaugeAnimator, GaugeState, TickOutcome,
};
pub use driver::{drive, DriveOutcome, FrameDriverOptions};
pub use easing::Easing;
pub use geometry::{clamp_confidence, DialGeometry};
pub use path::{path_length, PathError};
