//! Monitor module: the periodic multi-target sampler.
//!
//! Owns the active target list, the cancellable cycle loop, and the rolling
//! history that backs stats and reports.

mod history;
mod report;
mod targets;

pub use history::*;
pub use report::*;
pub use targets::*;

use crate::probe::{Probe, Sample};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Cadences the cycle timer accepts, in seconds.
pub const INTERVAL_CHOICES: &[u64] = &[3, 5, 10, 15, 30, 60];

/// Default cadence in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Monitor error types.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("unsupported interval: {0}s")]
    InvalidInterval(u64),
    #[error("no targets selected")]
    NoTargets,
}

/// Sampler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// Latest sample and window statistics for one active target.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetStatus {
    pub target: String,
    pub latest: Option<Sample>,
    pub stats: Option<TargetStats>,
}

/// Point-in-time view of the sampler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSnapshot {
    pub phase: Phase,
    pub selection: Option<SelectionKind>,
    pub interval_secs: u64,
    pub check_count: u64,
    pub session_start: Option<DateTime<Utc>>,
    pub session_time: String,
    pub overall: OverallStats,
    pub rows: Vec<TargetStatus>,
}

struct MonitorState {
    phase: Phase,
    selection: Option<SelectionKind>,
    targets: Vec<String>,
    interval_secs: u64,
    history: HistoryBook,
    check_count: u64,
    session_start: Option<DateTime<Utc>>,
}

impl MonitorState {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            selection: None,
            targets: Vec::new(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            history: HistoryBook::default(),
            check_count: 0,
            session_start: None,
        }
    }
}

/// The periodic sampler. One per process, shared behind `Arc`.
///
/// All mutable state sits behind one mutex that is only held for short
/// synchronous sections, never across an await. Each run owns a watch
/// channel used as its cancel token; a cancelled run can never record
/// into a later one.
pub struct Monitor {
    state: Arc<Mutex<MonitorState>>,
    probe: Arc<dyn Probe>,
    // Cancel handle for the active run, present while Running.
    stop_tx: Mutex<Option<watch::Sender<bool>>>,
}

impl Monitor {
    /// Create an idle monitor using the given probe.
    pub fn new(probe: Arc<dyn Probe>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MonitorState::new())),
            probe,
            stop_tx: Mutex::new(None),
        }
    }

    /// Replace the active target list wholesale.
    ///
    /// Accumulated history is keyed by target string and survives the
    /// change; a running cycle finishes against the snapshot it took.
    pub fn set_targets(&self, selection: SelectionKind, targets: Vec<String>) {
        let mut state = self.state.lock().unwrap();
        tracing::info!("Monitor: active list set to {} targets", targets.len());
        state.selection = Some(selection);
        state.targets = targets;
    }

    /// Begin sampling: probes once immediately, then on the timer.
    pub fn start(&self) -> Result<(), MonitorError> {
        let mut stop_slot = self.stop_tx.lock().unwrap();

        let interval_secs = {
            let mut state = self.state.lock().unwrap();
            if state.phase == Phase::Running {
                return Ok(());
            }
            if state.targets.is_empty() {
                return Err(MonitorError::NoTargets);
            }
            state.phase = Phase::Running;
            if state.session_start.is_none() {
                state.session_start = Some(Utc::now());
            }
            state.interval_secs
        };

        let (tx, rx) = watch::channel(false);
        *stop_slot = Some(tx);
        self.spawn_loop(rx, interval_secs, true);

        tracing::info!("Monitor: sampling every {}s", interval_secs);
        Ok(())
    }

    /// Pause sampling, keeping all accumulated data.
    ///
    /// The cancel signal lands before the phase flips, so a cycle that is
    /// mid-probe discards its in-flight result instead of recording it.
    pub fn stop(&self) {
        let mut stop_slot = self.stop_tx.lock().unwrap();
        if let Some(tx) = stop_slot.take() {
            let _ = tx.send(true);
        }

        let mut state = self.state.lock().unwrap();
        if state.phase == Phase::Running {
            state.phase = Phase::Paused;
            tracing::info!("Monitor: paused after {} cycles", state.check_count);
        }
    }

    /// Stop and clear the whole session: list, history, counters.
    pub fn reset(&self) {
        let mut stop_slot = self.stop_tx.lock().unwrap();
        if let Some(tx) = stop_slot.take() {
            let _ = tx.send(true);
        }

        let mut state = self.state.lock().unwrap();
        state.phase = Phase::Idle;
        state.selection = None;
        state.targets.clear();
        state.history.clear();
        state.check_count = 0;
        state.session_start = None;
        tracing::info!("Monitor: reset to idle");
    }

    /// Change the cycle cadence.
    ///
    /// While running, the current run is cancelled and a fresh timer is
    /// armed one full interval out; there is no extra immediate cycle.
    pub fn set_interval(&self, secs: u64) -> Result<(), MonitorError> {
        if !INTERVAL_CHOICES.contains(&secs) {
            return Err(MonitorError::InvalidInterval(secs));
        }

        let mut stop_slot = self.stop_tx.lock().unwrap();
        let running = {
            let mut state = self.state.lock().unwrap();
            state.interval_secs = secs;
            state.phase == Phase::Running
        };

        if running {
            if let Some(tx) = stop_slot.take() {
                let _ = tx.send(true);
            }
            let (tx, rx) = watch::channel(false);
            *stop_slot = Some(tx);
            self.spawn_loop(rx, secs, false);
            tracing::info!("Monitor: interval changed to {}s", secs);
        }

        Ok(())
    }

    /// Point-in-time view of the sampler.
    pub fn snapshot(&self) -> MonitorSnapshot {
        let state = self.state.lock().unwrap();

        let rows = state
            .targets
            .iter()
            .map(|target| TargetStatus {
                target: target.clone(),
                latest: state.history.latest(target),
                stats: state.history.stats(target),
            })
            .collect();

        MonitorSnapshot {
            phase: state.phase,
            selection: state.selection,
            interval_secs: state.interval_secs,
            check_count: state.check_count,
            session_start: state.session_start,
            session_time: session_time(state.session_start, Utc::now()),
            overall: state.history.overall(&state.targets),
            rows,
        }
    }

    fn spawn_loop(&self, mut stop_rx: watch::Receiver<bool>, interval_secs: u64, immediate: bool) {
        let state = self.state.clone();
        let probe = self.probe.clone();

        tokio::spawn(async move {
            let period = Duration::from_secs(interval_secs);
            let first_tick = if immediate {
                tokio::time::Instant::now()
            } else {
                tokio::time::Instant::now() + period
            };

            let mut ticker = tokio::time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {}
                }

                if !run_cycle(&state, &probe, &stop_rx).await {
                    break;
                }
            }
        });
    }
}

/// Run one sequential pass over the active list.
///
/// The list is snapshotted at cycle start and the cycle counter bumps with
/// it; the counter is not rolled back if the cycle is cancelled later.
/// Returns false once this run has been cancelled.
async fn run_cycle(
    state: &Arc<Mutex<MonitorState>>,
    probe: &Arc<dyn Probe>,
    stop_rx: &watch::Receiver<bool>,
) -> bool {
    let targets = {
        let mut st = state.lock().unwrap();
        if *stop_rx.borrow() || st.phase != Phase::Running {
            return false;
        }
        st.check_count += 1;
        st.targets.clone()
    };

    // Strictly sequential, in list order.
    for target in targets {
        if *stop_rx.borrow() {
            return false;
        }

        let sample = probe.probe(&target).await;

        // A stop that landed during the probe discards the result.
        if *stop_rx.borrow() {
            return false;
        }

        state.lock().unwrap().history.record(&target, sample);
    }

    true
}
