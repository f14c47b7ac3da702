//! Fixed-period tick producer.
//!
//! A dedicated thread wakes at a fixed rate and sends a [`Tick`] to the
//! consuming loop over a channel. The channel holds at most one pending tick:
//! if the consumer falls behind, extra ticks are dropped rather than queued,
//! so a slow tick never turns into a burst of lookups.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::trace;

/// One wake-up from the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Zero-based tick count, including ticks the consumer never saw
    pub number: u64,
    pub at: Instant,
}

/// Requests a stop. Clones signal the same receiver.
#[derive(Debug, Clone)]
pub struct StopHandle(Sender<()>);

impl StopHandle {
    pub fn stop(&self) {
        // The receiving side may already be gone, which is as good as stopped
        let _ = self.0.send(());
    }
}

/// Receiving side of a [`StopHandle`], used for cancellable waits.
#[derive(Debug)]
pub struct StopSignal(Receiver<()>);

impl StopSignal {
    /// Sleep for up to `timeout`. Returns `true` if a stop was requested
    /// (or every handle was dropped) before the time ran out.
    pub fn wait(&self, timeout: Duration) -> bool {
        match self.0.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }

    /// Non-blocking check.
    pub fn is_stopped(&self) -> bool {
        self.wait(Duration::ZERO)
    }
}

/// Create a connected stop handle and signal.
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = mpsc::channel();
    (StopHandle(tx), StopSignal(rx))
}

/// Background thread sending ticks at a fixed rate.
///
/// Dropping the ticker stops and joins the thread; so does dropping the tick
/// receiver.
#[derive(Debug)]
pub struct Ticker {
    stop: StopHandle,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking every `period`. The first tick fires immediately.
    pub fn spawn(period: Duration) -> (Self, Receiver<Tick>) {
        let (tick_tx, tick_rx) = mpsc::sync_channel(1);
        let (stop, signal) = stop_channel();
        let handle = thread::spawn(move || tick_loop(period, &tick_tx, &signal));
        (
            Self {
                stop,
                handle: Some(handle),
            },
            tick_rx,
        )
    }

    /// A handle that stops this ticker from another thread (e.g. Ctrl-C).
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stop and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn tick_loop(period: Duration, ticks: &SyncSender<Tick>, stop: &StopSignal) {
    let mut deadline = Instant::now();
    let mut number: u64 = 0;

    loop {
        let wait = deadline.saturating_duration_since(Instant::now());
        if stop.wait(wait) {
            trace!(number, "ticker stopped");
            return;
        }

        match ticks.try_send(Tick {
            number,
            at: Instant::now(),
        }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => trace!(number, "consumer busy, tick dropped"),
            Err(TrySendError::Disconnected(_)) => return,
        }
        number += 1;
        deadline = next_deadline(deadline, period, Instant::now());
    }
}

/// Fixed rate: each deadline follows the previous one, so sleep overshoot
/// does not accumulate as drift. A deadline that cannot be represented
/// falls back to one period from `now`.
fn next_deadline(previous: Instant, period: Duration, now: Instant) -> Instant {
    previous
        .checked_add(period)
        .or_else(|| now.checked_add(period))
        .unwrap_or(now)
}
