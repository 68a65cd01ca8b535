//! Debounce engine
//!
//! Collapses bursts of signals into one trailing callback invocation. Each
//! signal cancels the outstanding round and schedules a fresh one on the tokio
//! runtime, so only the last signal of a burst fires.
//!
//! # Round lifecycle
//!
//! ```text
//!            signal()                  wait elapses
//!  Idle ─────────────────► Scheduled ───────────────► Firing ──► Idle
//!   ▲                       │    ▲                       (callback, then
//!   │        cancel()       │    │ signal()               completion)
//!   └───────────────────────┘    └─ (restarts the clock)
//! ```
//!
//! Every transition happens under a single lock. The lock is released before
//! the callback runs, so a slow callback never blocks signals or updates.

use crate::callback::{Callback, Mode};
use crate::completion::{Completion, RoundNotifier};
use crate::config::DebounceConfig;
use crate::error::DebounceError;
use crate::Result;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

/// Deadline used when `now + duration` overflows
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Trailing-edge debouncer
///
/// Cheap to clone; clones share the same engine. When the last clone is
/// dropped any outstanding round is aborted.
///
/// `T` is the payload type for [`Mode::Payload`]. Engines that only use
/// [`signal`](Self::signal) can leave it at the default `()`:
///
/// ```no_run
/// # use debouncer::Debouncer;
/// # use std::time::Duration;
/// # async fn demo() -> debouncer::Result<()> {
/// let debouncer: Debouncer = Debouncer::new(Duration::from_millis(200))
///     .with_triggered(|| println!("settled"));
///
/// debouncer.signal()?;
/// debouncer.signal()?; // restarts the wait, only one firing
/// debouncer.done().await;
/// # Ok(())
/// # }
/// ```
pub struct Debouncer<T = ()> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    state: Mutex<DebounceState<T>>,
    completion: RoundNotifier,
    runtime: Handle,
}

struct DebounceState<T> {
    /// Wait applied to rounds scheduled from now on
    duration: Duration,
    /// Resolved when a round fires, not when it is scheduled
    callback: Callback<T>,
    last_payload: Option<T>,
    /// Outstanding round, if any
    pending: Option<Pending>,
    /// Round whose callback is currently running
    firing: Option<u64>,
    next_round: u64,
}

struct Pending {
    round: u64,
    task: JoinHandle<()>,
}

impl<T> DebounceState<T> {
    fn ensure_mode(&self, expected: Mode) -> Result<()> {
        let found = self.callback.mode();
        if found != expected {
            return Err(DebounceError::ModeMismatch { expected, found });
        }
        Ok(())
    }

    /// Abort the outstanding round; returns its id
    fn cancel_pending(&mut self) -> Option<u64> {
        self.pending.take().map(|pending| {
            pending.task.abort();
            pending.round
        })
    }
}

/// Clears the firing marker once the callback returns, or unwinds
struct FiringGuard<'a, T> {
    inner: &'a Inner<T>,
    round: u64,
}

impl<T> Drop for FiringGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        if state.firing == Some(self.round) {
            state.firing = None;
        }
    }
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        if let Some(round) = self.state.get_mut().cancel_pending() {
            trace!(round, "debouncer dropped, pending round aborted");
        }
    }
}

impl<T> Debouncer<T>
where
    T: Clone + Send + 'static,
{
    /// Create a debouncer on the current tokio runtime
    ///
    /// Starts with a no-op simple callback and nothing scheduled.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use
    /// [`with_handle`](Self::with_handle) there.
    pub fn new(duration: Duration) -> Self {
        Self::with_handle(duration, Handle::current())
    }

    /// Create a debouncer whose rounds run on `runtime`
    pub fn with_handle(duration: Duration, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(DebounceState {
                    duration,
                    callback: Callback::default(),
                    last_payload: None,
                    pending: None,
                    firing: None,
                    next_round: 0,
                }),
                completion: RoundNotifier::new(),
                runtime,
            }),
        }
    }

    /// Create a debouncer from a loaded configuration
    pub fn from_config(config: &DebounceConfig) -> Self {
        Self::new(config.wait())
    }

    /// Configure a simple callback, replacing any callback and mode
    pub fn with_triggered<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.state.lock().callback = Callback::simple(f);
        self
    }

    /// Configure a payload callback, replacing any callback and mode
    pub fn with_payload<F>(self, f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.inner.state.lock().callback = Callback::payload(f);
        self
    }

    /// Start or restart the wait for a simple-mode round
    ///
    /// Fails with [`DebounceError::ModeMismatch`] in payload mode, leaving the
    /// outstanding round untouched.
    pub fn signal(&self) -> Result<()> {
        let mut state = self.inner.state.lock();
        if let Err(err) = state.ensure_mode(Mode::Simple) {
            warn!(%err, "signal rejected");
            return Err(err);
        }
        schedule(&self.inner, &mut state, None);
        Ok(())
    }

    /// Start or restart the wait for a payload-mode round
    ///
    /// The round that finally fires receives the payload of the last call.
    /// Fails with [`DebounceError::ModeMismatch`] in simple mode.
    pub fn signal_with_data(&self, payload: T) -> Result<()> {
        let mut state = self.inner.state.lock();
        if let Err(err) = state.ensure_mode(Mode::Payload) {
            warn!(%err, "signal rejected");
            return Err(err);
        }
        state.last_payload = Some(payload.clone());
        schedule(&self.inner, &mut state, Some(payload));
        Ok(())
    }

    /// Run `action` on the calling thread, then [`signal`](Self::signal)
    ///
    /// The action always runs; the returned error is the signal's.
    pub fn run<F>(&self, action: F) -> Result<()>
    where
        F: FnOnce(),
    {
        action();
        self.signal()
    }

    /// Cancel the outstanding round, if any
    ///
    /// Once this returns the canceled round's callback will not run. A
    /// callback that is already running is not interrupted. The completion
    /// notification is left alone.
    pub fn cancel(&self) {
        if let Some(round) = self.inner.state.lock().cancel_pending() {
            debug!(round, "round canceled");
        }
    }

    /// Replace the simple callback
    ///
    /// Takes effect for the outstanding round too, since the callback is read
    /// when the round fires. Switching modes is rejected.
    pub fn update_triggered<F>(&self, f: F) -> Result<()>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut state = self.inner.state.lock();
        state.ensure_mode(Mode::Simple)?;
        state.callback = Callback::simple(f);
        Ok(())
    }

    /// Replace the payload callback
    ///
    /// Same rules as [`update_triggered`](Self::update_triggered).
    pub fn update_payload<F>(&self, f: F) -> Result<()>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let mut state = self.inner.state.lock();
        state.ensure_mode(Mode::Payload)?;
        state.callback = Callback::payload(f);
        Ok(())
    }

    /// Replace the wait used by future signals
    ///
    /// An already scheduled round keeps its original deadline.
    pub fn update_duration(&self, duration: Duration) {
        self.inner.state.lock().duration = duration;
    }

    /// Future resolving when the next round's callback has returned
    ///
    /// Never resolves before a round completes, and never for canceled
    /// rounds. Every future obtained before a round completes wakes for it; a
    /// future obtained afterward waits for the following round. Resolves to
    /// the total number of completed rounds.
    ///
    /// There is no timeout; race it with `tokio::time::timeout` if needed.
    pub fn done(&self) -> Completion {
        self.inner.completion.subscribe()
    }

    /// Wait for the outstanding round, if any, to finish
    ///
    /// Returns immediately when nothing is scheduled or running. If the round
    /// is canceled while waiting, this waits for the next completed round.
    pub async fn settle(&self) {
        let done = self.done();
        if self.is_pending() {
            done.await;
        }
    }

    /// Configured callback shape
    pub fn mode(&self) -> Mode {
        self.inner.state.lock().callback.mode()
    }

    /// Wait applied to the next signal
    pub fn duration(&self) -> Duration {
        self.inner.state.lock().duration
    }

    /// Whether a round is scheduled or its callback is running
    pub fn is_pending(&self) -> bool {
        let state = self.inner.state.lock();
        state.pending.is_some() || state.firing.is_some()
    }

    /// Most recent payload passed to [`signal_with_data`](Self::signal_with_data)
    pub fn last_payload(&self) -> Option<T> {
        self.inner.state.lock().last_payload.clone()
    }

    /// Number of rounds whose callback ran to completion
    pub fn completed_rounds(&self) -> u64 {
        self.inner.completion.completed()
    }
}

/// Replace the outstanding round with a new one
///
/// Must be called with the state lock held so two rounds are never live at
/// once.
fn schedule<T>(inner: &Arc<Inner<T>>, state: &mut DebounceState<T>, payload: Option<T>)
where
    T: Clone + Send + 'static,
{
    if let Some(round) = state.cancel_pending() {
        trace!(round, "round superseded");
    }

    let round = state.next_round;
    state.next_round += 1;

    let now = Instant::now();
    let deadline = now
        .checked_add(state.duration)
        .unwrap_or_else(|| now + FAR_FUTURE);
    let task = inner
        .runtime
        .spawn(fire(Arc::downgrade(inner), round, deadline, payload));
    state.pending = Some(Pending { round, task });

    debug!(round, wait = ?state.duration, "round scheduled");
}

async fn fire<T>(inner: Weak<Inner<T>>, round: u64, deadline: Instant, payload: Option<T>)
where
    T: Clone + Send + 'static,
{
    tokio::time::sleep_until(deadline).await;

    let Some(inner) = inner.upgrade() else {
        return;
    };

    let callback = {
        let mut state = inner.state.lock();
        match &state.pending {
            Some(pending) if pending.round == round => {}
            // Superseded or canceled while waking up
            _ => {
                trace!(round, "stale round skipped");
                return;
            }
        }
        state.pending = None;
        state.firing = Some(round);
        state.callback.clone()
    };

    let result = {
        let _firing = FiringGuard {
            inner: &inner,
            round,
        };
        callback.invoke(payload)
    };

    match result {
        Ok(()) => {
            let completed = inner.completion.resolve();
            debug!(round, completed, "round fired");
        }
        Err(mode) => {
            warn!(round, %mode, "callback shape changed while round was pending, round dropped");
        }
    }
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Debouncer")
            .field("duration", &state.duration)
            .field("mode", &state.callback.mode())
            .field("pending", &state.pending.as_ref().map(|p| p.round))
            .field("completed", &self.inner.completion.completed())
            .finish()
    }
}
