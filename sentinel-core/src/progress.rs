//! Progress Reporter
//!
//! Simulated progress for an in-flight assessment. The oracle gives no
//! progress signal, so a timer advances a heuristic value and phase label.
//!
//! ```text
//! Idle ──start──▶ Running(0..=95) ──ok──▶ Succeeded(100, "complete")
//!                        │
//!                        └──err──▶ Failed(0, "failed")
//! ```
//!
//! Running progress never reaches 100. Failure resets to 0. Once abandoned, a
//! reporter ignores every further transition and its timer is stopped.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::config::ProgressConfig;
use crate::constants::{PHASE_COMPLETE, PHASE_FAILED, PHASE_IDLE};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl ProgressStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressStatus::Succeeded | ProgressStatus::Failed)
    }
}

/// What a status widget renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub progress: f32,
    pub phase: String,
    pub status: ProgressStatus,
}

impl ProgressSnapshot {
    fn idle() -> Self {
        Self {
            progress: 0.0,
            phase: PHASE_IDLE.to_string(),
            status: ProgressStatus::Idle,
        }
    }
}

// ============================================================================
// STATE MACHINE
// ============================================================================

/// Timer-free progress state
#[derive(Debug, Clone)]
pub struct ProgressState {
    config: ProgressConfig,
    status: ProgressStatus,
    progress: f32,
    phase_index: usize,
    abandoned: bool,
}

impl ProgressState {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            status: ProgressStatus::Idle,
            progress: 0.0,
            phase_index: 0,
            abandoned: false,
        }
    }

    /// Begin a run from any non-running state
    pub fn start(&mut self) -> bool {
        if self.abandoned || self.status == ProgressStatus::Running {
            return false;
        }
        self.status = ProgressStatus::Running;
        self.progress = 0.0;
        self.phase_index = 0;
        true
    }

    /// Advance one step. Returns false once there is nothing left to schedule.
    pub fn tick(&mut self) -> bool {
        if self.abandoned || self.status != ProgressStatus::Running {
            return false;
        }
        if self.progress >= self.config.ceiling {
            return false;
        }

        let next = self.progress + self.config.step();
        let reached = (next / self.config.phase_width()).floor() as usize;
        if reached > self.phase_index {
            self.phase_index = (self.phase_index + 1).min(self.config.phases.len().saturating_sub(1));
        }
        self.progress = next.min(self.config.ceiling);
        true
    }

    pub fn succeed(&mut self) -> bool {
        self.settle(ProgressStatus::Succeeded)
    }

    pub fn fail(&mut self) -> bool {
        self.settle(ProgressStatus::Failed)
    }

    fn settle(&mut self, outcome: ProgressStatus) -> bool {
        if self.abandoned || self.status != ProgressStatus::Running {
            return false;
        }
        self.status = outcome;
        self.progress = match outcome {
            ProgressStatus::Succeeded => 100.0,
            _ => 0.0,
        };
        true
    }

    /// Freeze the state for good
    pub fn abandon(&mut self) {
        self.abandoned = true;
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> &str {
        match self.status {
            ProgressStatus::Idle => PHASE_IDLE,
            ProgressStatus::Succeeded => PHASE_COMPLETE,
            ProgressStatus::Failed => PHASE_FAILED,
            ProgressStatus::Running => self
                .config
                .phases
                .get(self.phase_index)
                .map(String::as_str)
                .unwrap_or(PHASE_IDLE),
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            progress: self.progress,
            phase: self.phase().to_string(),
            status: self.status,
        }
    }
}

// ============================================================================
// REPORTER
// ============================================================================

struct Inner {
    state: Mutex<ProgressState>,
    ticker: Mutex<Option<AbortHandle>>,
    tx: watch::Sender<ProgressSnapshot>,
}

impl Inner {
    /// Apply a transition and publish when it changed anything
    fn apply(&self, f: impl FnOnce(&mut ProgressState) -> bool) -> bool {
        let mut state = self.state.lock();
        let changed = f(&mut state);
        if changed {
            self.tx.send_replace(state.snapshot());
        }
        changed
    }

    fn stop_ticker(&self) {
        if let Some(handle) = self.ticker.lock().take() {
            handle.abort();
        }
    }
}

const MIN_TICK: std::time::Duration = std::time::Duration::from_millis(1);

/// Drives a `ProgressState` on a timer while an operation is in flight
#[derive(Clone)]
pub struct ProgressReporter {
    inner: Arc<Inner>,
    tick: std::time::Duration,
}

impl ProgressReporter {
    pub fn new(config: ProgressConfig) -> Self {
        // interval_at panics on a zero period
        let tick = config.tick.max(MIN_TICK);
        let (tx, _rx) = watch::channel(ProgressSnapshot::idle());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(ProgressState::new(config)),
                ticker: Mutex::new(None),
                tx,
            }),
            tick,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.inner.tx.subscribe()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.inner.state.lock().snapshot()
    }

    pub fn is_abandoned(&self) -> bool {
        self.inner.state.lock().is_abandoned()
    }

    /// Caller walked away: stop the timer and freeze the state
    pub fn abandon(&self) {
        self.inner.stop_ticker();
        self.inner.state.lock().abandon();
        log::debug!("Progress reporter abandoned");
    }

    /// Run `operation` with simulated progress. The timer is torn down on
    /// every exit path, including the returned future being dropped.
    pub async fn track<F, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        if !self.inner.apply(ProgressState::start) {
            return operation.await;
        }

        self.spawn_ticker();
        let mut guard = RunGuard {
            reporter: self,
            settled: false,
        };

        let result = operation.await;
        guard.settle(result.is_ok());
        result
    }

    fn spawn_ticker(&self) {
        let inner = self.inner.clone();
        let tick = self.tick;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);
            loop {
                interval.tick().await;
                if !inner.apply(ProgressState::tick) {
                    break;
                }
            }
        });
        self.inner.stop_ticker();
        *self.inner.ticker.lock() = Some(handle.abort_handle());
    }
}

/// Scoped teardown for one tracked run
struct RunGuard<'a> {
    reporter: &'a ProgressReporter,
    settled: bool,
}

impl RunGuard<'_> {
    fn settle(&mut self, ok: bool) {
        self.reporter.inner.stop_ticker();
        self.settled = true;
        if ok {
            self.reporter.inner.apply(ProgressState::succeed);
        } else {
            self.reporter.inner.apply(ProgressState::fail);
        }
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.reporter.abandon();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
