//! Application initialization.
//!
//! Logger setup and Ctrl-C wiring for the binary and the run loop.

mod logger;

use log::warn;
use tokio_util::sync::CancellationToken;

pub use logger::init_logger_with;

/// Cancels `token` when the process receives Ctrl-C.
///
/// The listener task ends after the first signal, or stays parked for the
/// life of the runtime if none arrives.
pub fn init_ctrl_c_cancellation(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupted; cancelling pending checks");
                token.cancel();
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
        }
    })
}
