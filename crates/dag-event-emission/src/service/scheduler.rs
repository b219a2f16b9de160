//! Periodic emission scheduler
//!
//! A two-state machine (Stopped / Running) behind one lock, so concurrent
//! start and stop calls cannot leave a loop running with no handle to stop
//! it. The loop checks its stop signal before every tick and never runs two
//! emissions at once.

use crate::domain::EmissionState;
use crate::service::emitter::EventEmitter;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

enum LoopState {
    Stopped,
    Running {
        stop_tx: watch::Sender<bool>,
        handle: JoinHandle<()>,
    },
}

/// Drives [`EventEmitter::emit_event`] on a fixed interval.
pub struct EmissionScheduler {
    interval: Duration,
    state: Mutex<LoopState>,
}

impl EmissionScheduler {
    /// Create a stopped scheduler.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: Mutex::new(LoopState::Stopped),
        }
    }

    /// Current lifecycle state.
    ///
    /// A loop task that died on its own reports as stopped.
    pub fn state(&self) -> EmissionState {
        match &*self.state.lock() {
            LoopState::Running { handle, .. } if !handle.is_finished() => EmissionState::Running,
            _ => EmissionState::Stopped,
        }
    }

    /// Spawn the emission loop on the current tokio runtime.
    ///
    /// Returns `false` without doing anything if already running. A loop
    /// task that died on its own is replaced.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(&self, emitter: Arc<EventEmitter>) -> bool {
        let mut state = self.state.lock();
        if let LoopState::Running { handle, .. } = &*state {
            if !handle.is_finished() {
                debug!("[dag-emit] Emission already running");
                return false;
            }
            warn!("[dag-emit] Emission loop had exited unexpectedly, restarting");
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(emission_loop(emitter, self.interval, stop_rx));
        *state = LoopState::Running { stop_tx, handle };

        info!(
            "[dag-emit] Event emission started (interval: {:?})",
            self.interval
        );
        true
    }

    /// Signal the loop to exit and wait for it.
    ///
    /// An emission already in progress is allowed to finish. Returns `false`
    /// if the scheduler was already stopped.
    pub async fn stop(&self) -> bool {
        let previous = std::mem::replace(&mut *self.state.lock(), LoopState::Stopped);
        let LoopState::Running { stop_tx, handle } = previous else {
            debug!("[dag-emit] Emission already stopped");
            return false;
        };

        // The loop may already be gone if it panicked; nothing to signal then.
        let _ = stop_tx.send(true);
        if let Err(e) = handle.await {
            error!("[dag-emit] Emission loop terminated abnormally: {}", e);
        }

        info!("[dag-emit] Event emission stopped");
        true
    }
}

async fn emission_loop(
    emitter: Arc<EventEmitter>,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    // First tick one full period after start; late ticks are dropped, not queued.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            _ = ticker.tick() => {
                if let Err(e) = emitter.emit_event().await {
                    if e.is_critical() {
                        error!("[dag-emit] Emission failed: {}", e);
                    } else {
                        warn!("[dag-emit] Emission failed, retrying next tick: {}", e);
                    }
                }
            }
        }
    }
    debug!("[dag-emit] Emission loop exited");
}
