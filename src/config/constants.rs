//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: animation
//! timing, dial layout, verdict colours and URL limits.

use std::time::Duration;

// Animation timing
/// Default gauge animation duration in milliseconds
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 1100;
/// Shortest animation the gauge will run; shorter requests are raised to this
pub const MIN_ANIMATION_DURATION: Duration = Duration::from_millis(200);
/// Default frame interval (~60 frames per second)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

// Simulated processing latency
/// Base delay before a verdict is shown, in milliseconds
pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 900;
/// Upper bound of the random jitter added to the processing delay
pub const PROCESSING_JITTER_MS: u64 = 300;

// Dial layout
/// Needle rotation at value 0 (pointing left)
pub const DIAL_ANGLE_START_DEG: f64 = -90.0;
/// Degrees swept from value 0 to value 100
pub const DIAL_ANGLE_SPAN_DEG: f64 = 180.0;

// Colours
pub const DEFAULT_GAUGE_COLOR: &str = "#6c757d";
pub const GAUGE_TRACK_COLOR: &str = "#e9ecef";
pub const GAUGE_NEEDLE_COLOR: &str = "#343a40";
pub const COLOR_GENUINE: &str = "#28a745";
pub const COLOR_FAKE: &str = "#dc3545";
pub const COLOR_UNKNOWN: &str = "#ffc107";

/// Class added to the gauge label when an animation settles
pub const SETTLE_CLASS: &str = "pulse";

// URL limits
/// Maximum accepted URL length (2048 characters), matching common browser limits
pub const MAX_URL_LENGTH: usize = 2048;
/// URLs longer than this are flagged by the length heuristic
pub const LONG_URL_THRESHOLD: usize = 100;
/// Hosts with more labels than this are flagged by the subdomain heuristic
pub const MAX_HOST_LABELS: usize = 4;

/// Environment variable carrying the reduced-motion preference
pub const REDUCE_MOTION_ENV: &str = "LINK_CHECKER_REDUCE_MOTION";

/// Public page used in share texts
pub const SHARE_SITE_URL: &str = "https://linkchecker.example/";
