use std::io;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// An owned periodic task running on its own thread.
///
/// The callback receives a 1-based tick counter and keeps running until it
/// returns [`ControlFlow::Break`], [`stop`](Self::stop) is called, or the
/// ticker is dropped. Dropping always stops and joins the thread.
///
/// Ticks are scheduled against fixed deadlines, so a slow callback does not
/// push later ticks back.
pub struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(period: Duration, mut callback: F) -> io::Result<Self>
    where
        F: FnMut(u64) -> ControlFlow<()> + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("holiday-ticker".into())
            .spawn(move || {
                let mut tick = 0;
                let mut deadline = Instant::now() + period;
                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match stopped.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {
                            tick += 1;
                            deadline += period;
                            if callback(tick).is_break() {
                                debug!(tick, "ticker finished");
                                break;
                            }
                        }
                        // Explicit stop, or the owning Ticker went away.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        Ok(Ticker {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Whether the background thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Signal the task to stop and wait for it.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Wait for the callback to finish the task on its own.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("ticker callback panicked");
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The thread may already be gone; nothing to signal then.
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("ticker callback panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
