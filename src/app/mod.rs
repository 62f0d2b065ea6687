//! Main application modules.
//!
//! URL intake, terminal rendering of the gauge, result card output and
//! statistics printing used by the run loop.

pub mod output;
pub mod render;
pub mod statistics;
pub mod url;

// Re-export public API
pub use output::{card_file_stem, write_card};
pub use render::{gauge_line, print_frame, print_verdict};
pub use statistics::print_check_statistics;
pub use self::url::normalize_url;
