//! Background thread that periodically checks the terminal size.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;

/// Runs `tick` every `interval` on its own thread until stopped.
///
/// The tick does its own locking; a failing tick is logged and the thread keeps going.
pub struct ResizePoller {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ResizePoller {
    pub fn spawn<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                if let Err(e) = tick() {
                    tracing::warn!("resize poll failed: {e:#}");
                }
                thread::sleep(interval);
            }
            tracing::debug!("resize poller stopped");
        });
        Self { stop, handle: Some(handle) }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Ask the thread to stop and wait for it.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("resize poller panicked");
            }
        }
    }
}

impl Drop for ResizePoller {
    fn drop(&mut self) {
        self.stop();
    }
}
