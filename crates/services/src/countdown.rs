//! Background exam clock.
//!
//! A worker thread publishes the remaining time as `HH:MM:SS` on a fixed
//! cadence and raises an expiry flag at zero. The worker is the only writer
//! of [`CountdownState`]; the session engine only reads it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use quiz_core::Clock;
use quiz_core::time::format_hms;
use tracing::{debug, warn};

use crate::error::CountdownError;

/// Production update cadence.
pub const DEFAULT_TICK: StdDuration = StdDuration::from_secs(1);

/// State shared between the countdown worker and its readers.
#[derive(Debug, Default)]
pub struct CountdownState {
    display: Mutex<String>,
    expired: AtomicBool,
    updates: AtomicU64,
}

impl CountdownState {
    /// Latest published remaining time.
    #[must_use]
    pub fn display(&self) -> String {
        match self.display.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Acquire)
    }

    /// Number of display updates published so far.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Acquire)
    }

    /// Recompute and publish. Returns false once the deadline is reached.
    fn publish(&self, clock: &Clock, deadline: DateTime<Utc>) -> bool {
        let remaining = (deadline - clock.now()).max(Duration::zero());
        let text = format_hms(remaining);
        match self.display.lock() {
            Ok(mut guard) => *guard = text,
            Err(poisoned) => *poisoned.into_inner() = text,
        }
        self.updates.fetch_add(1, Ordering::AcqRel);

        if remaining <= Duration::zero() {
            self.expired.store(true, Ordering::Release);
            return false;
        }
        true
    }
}

/// Handle to a running countdown. Stopping joins the worker.
#[derive(Debug)]
pub struct Countdown {
    state: Arc<CountdownState>,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Publish the initial remaining time and start the worker thread.
    ///
    /// No thread is spawned when the deadline has already passed.
    ///
    /// # Errors
    ///
    /// Returns `CountdownError::Spawn` if the worker thread cannot be created.
    pub fn start(
        clock: Clock,
        deadline: DateTime<Utc>,
        tick: StdDuration,
    ) -> Result<Self, CountdownError> {
        let state = Arc::new(CountdownState::default());
        if !state.publish(&clock, deadline) {
            return Ok(Self {
                state,
                stop_tx: None,
                worker: None,
            });
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let shared = Arc::clone(&state);
        let worker = thread::Builder::new()
            .name("exam-countdown".into())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(tick) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    if !shared.publish(&clock, deadline) {
                        debug!("countdown reached zero");
                        break;
                    }
                }
            })
            .map_err(CountdownError::Spawn)?;

        Ok(Self {
            state,
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }

    /// Shared state for readers that outlive a borrow of the handle.
    #[must_use]
    pub fn state(&self) -> Arc<CountdownState> {
        Arc::clone(&self.state)
    }

    #[must_use]
    pub fn display(&self) -> String {
        self.state.display()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.state.is_expired()
    }

    /// Signal the worker and block until it has exited.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // The worker may already have exited at zero.
            let _ = tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("countdown worker panicked");
            }
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.shutdown();
    }
}
