//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_PROCESSING_DELAY_MS,
    REDUCE_MOTION_ENV,
};
use crate::gauge::{AnimationOptions, FrameDriverOptions};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace (one line per animation frame)
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Link checker configuration.
///
/// Parsed from the command line by the binary, or constructed directly when
/// the crate is used as a library.
///
/// # Examples
///
/// ```no_run
/// use link_checker::Config;
///
/// let config = Config {
///     urls: vec!["example.com".to_string()],
///     reduce_motion: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "link_checker",
    version,
    about = "Runs heuristic checks on links and shows a verdict with a confidence gauge"
)]
pub struct Config {
    /// URLs to check
    pub urls: Vec<String>,

    /// File to read URLs from, one per line ("-" for stdin)
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Gauge animation duration in milliseconds (minimum 200)
    #[arg(long, default_value_t = DEFAULT_ANIMATION_DURATION_MS)]
    pub duration_ms: u64,

    /// Show the final gauge state without animating
    #[arg(long, env = REDUCE_MOTION_ENV)]
    pub reduce_motion: bool,

    /// Disable frame scheduling and set the gauge immediately
    #[arg(long)]
    pub no_frames: bool,

    /// Interval between animation frames in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_INTERVAL_MS)]
    pub frame_interval_ms: u64,

    /// Simulated processing delay before a verdict is shown, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PROCESSING_DELAY_MS)]
    pub delay_ms: u64,

    /// Directory to write the rendered result cards to (one HTML file per URL)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Do not draw the gauge in the terminal while it animates
    #[arg(long)]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            file: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            reduce_motion: false,
            no_frames: false,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            delay_ms: DEFAULT_PROCESSING_DELAY_MS,
            output: None,
            quiet: false,
        }
    }
}

impl Config {
    /// Gauge animation options derived from the CLI flags.
    pub fn animation_options(&self) -> AnimationOptions {
        AnimationOptions {
            duration: Duration::from_millis(self.duration_ms),
            reduce_motion: self.reduce_motion,
            ..AnimationOptions::default()
        }
    }

    /// Frame driver options derived from the CLI flags.
    pub fn frame_driver_options(&self) -> FrameDriverOptions {
        FrameDriverOptions {
            frame_interval: Duration::from_millis(self.frame_interval_ms),
            frames_available: !self.no_frames,
        }
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_format_debug() {
        assert_eq!(format!("{:?}", LogFormat::Plain), "Plain");
        assert_eq!(format!("{:?}", LogFormat::Json), "Json");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.urls.is_empty());
        assert_eq!(config.duration_ms, 1100);
        assert_eq!(config.frame_interval_ms, 16);
        assert!(!config.reduce_motion);
        assert!(!config.no_frames);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_derived_options() {
        let config = Config {
            duration_ms: 50,
            reduce_motion: true,
            no_frames: true,
            frame_interval_ms: 33,
            ..Default::default()
        };
        let animation = config.animation_options();
        assert!(animation.reduce_motion);
        assert_eq!(animation.effective_duration(), Duration::from_millis(200));

        let frames = config.frame_driver_options();
        assert!(!frames.frames_available);
        assert_eq!(frames.frame_interval, Duration::from_millis(33));
    }

    #[test]
    fn test_parse_from_args() {
        let config = Config::try_parse_from([
            "link_checker",
            "example.com",
            "http://paypa1-login.xyz",
            "--duration-ms",
            "500",
            "--log-format",
            "json",
        ])
        .expect("valid arguments");
        assert_eq!(config.urls.len(), 2);
        assert_eq!(config.duration_ms, 500);
        assert!(matches!(config.log_format, LogFormat::Json));
    }
}
