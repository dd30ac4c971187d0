//! Rate-limit countdown timer with cancellation.

use log::debug;
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

/// Wait duration used when the server does not say how long to back off.
pub const DEFAULT_WAIT_SECS: u64 = 30;

/// Live state of a single countdown, decremented once per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    pub seconds_remaining: u64,
    pub active: bool,
}

impl RetryState {
    pub fn new(seconds: u64) -> Self {
        Self {
            seconds_remaining: seconds,
            active: true,
        }
    }
}

/// Handle to a running countdown task.
///
/// Dropping the handle does not stop the countdown; call [`CountdownHandle::cancel`]
/// (or [`RetryController::cancel`]) to stop it early.
pub struct CountdownHandle {
    task: JoinHandle<()>,
}

impl CountdownHandle {
    /// Stops the countdown before completion. Idempotent; no-op once the
    /// countdown has completed or was already cancelled.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Returns true once the countdown has completed or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until the countdown completes or is cancelled.
    pub async fn wait(self) {
        // JoinError here only means the task was aborted.
        let _ = self.task.await;
    }
}

/// Owns the at-most-one active countdown. Starting a new countdown cancels
/// any countdown still pending on this controller.
#[derive(Default)]
pub struct RetryController {
    current: Option<AbortHandle>,
}

impl RetryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a one-per-second countdown of `seconds` (falling back to
    /// [`DEFAULT_WAIT_SECS`] when missing or zero). `on_tick` is invoked with
    /// the new remaining value after each decrement; when it reaches 0 the
    /// timer stops and `on_complete` is invoked exactly once.
    pub fn start<T, C>(&mut self, seconds: Option<u64>, mut on_tick: T, on_complete: C) -> CountdownHandle
    where
        T: FnMut(u64) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.cancel();

        let total = effective_seconds(seconds);
        debug!("Starting {}s retry countdown", total);

        let task = tokio::spawn(async move {
            let mut state = RetryState::new(total);
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;

            while state.seconds_remaining > 0 {
                interval.tick().await;
                state.seconds_remaining -= 1;
                on_tick(state.seconds_remaining);
            }

            state.active = false;
            debug!("Retry countdown complete");
            on_complete();
        });

        self.current = Some(task.abort_handle());
        CountdownHandle { task }
    }

    /// Cancels the pending countdown, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            debug!("Cancelling pending retry countdown");
            handle.abort();
        }
    }
}

/// Sanitizes a server-provided wait duration. Missing or zero values fall
/// back to [`DEFAULT_WAIT_SECS`].
fn effective_seconds(seconds: Option<u64>) -> u64 {
    match seconds {
        Some(s) if s > 0 => s,
        _ => DEFAULT_WAIT_SECS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<u64>>>, impl FnMut(u64) + Send + 'static) {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let ticks_clone = Arc::clone(&ticks);
        let on_tick = move |remaining| ticks_clone.lock().unwrap().push(remaining);
        (ticks, on_tick)
    }

    #[test]
    fn test_effective_seconds() {
        assert_eq!(effective_seconds(Some(5)), 5);
        assert_eq!(effective_seconds(Some(1)), 1);
        assert_eq!(effective_seconds(Some(0)), DEFAULT_WAIT_SECS);
        assert_eq!(effective_seconds(None), DEFAULT_WAIT_SECS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_down_then_completes_once() {
        let (ticks, on_tick) = recorder();
        let completions = Arc::new(AtomicUsize::new(0));
        let completions_clone = Arc::clone(&completions);

        let mut controller = RetryController::new();
        let handle = controller.start(Some(3), on_tick, move || {
            completions_clone.fetch_add(1, Ordering::SeqCst);
        });

        handle.wait().await;

        assert_eq!(*ticks.lock().unwrap(), vec![2, 1, 0]);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_are_one_second_apart() {
        let start = time::Instant::now();
        let (ticks, _) = recorder();
        let ticks_clone = Arc::clone(&ticks);

        let mut controller = RetryController::new();
        let handle = controller.start(
            Some(2),
            move |remaining| {
                // Record elapsed virtual seconds alongside the tick value.
                ticks_clone
                    .lock()
                    .unwrap()
                    .push(start.elapsed().as_secs() * 10 + remaining);
            },
            || {},
        );

        handle.wait().await;

        // tick(1) at t=1s, tick(0) at t=2s.
        assert_eq!(*ticks.lock().unwrap(), vec![11, 20]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_seconds_falls_back_to_default() {
        let (ticks, on_tick) = recorder();

        let mut controller = RetryController::new();
        let handle = controller.start(Some(0), on_tick, || {});
        handle.wait().await;

        let ticks = ticks.lock().unwrap();
        assert_eq!(ticks.len(), DEFAULT_WAIT_SECS as usize);
        assert_eq!(ticks.first(), Some(&(DEFAULT_WAIT_SECS - 1)));
        assert_eq!(ticks.last(), Some(&0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_seconds_falls_back_to_default() {
        let (ticks, on_tick) = recorder();

        let mut controller = RetryController::new();
        let handle = controller.start(None, on_tick, || {});
        handle.wait().await;

        assert_eq!(ticks.lock().unwrap().len(), DEFAULT_WAIT_SECS as usize);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_further_ticks_and_completion() {
        let (ticks, on_tick) = recorder();
        let completed = Arc::new(AtomicUsize::new(0));
        let completed_clone = Arc::clone(&completed);

        let mut controller = RetryController::new();
        let handle = controller.start(Some(5), on_tick, move || {
            completed_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Let one tick fire, then cancel mid-countdown.
        time::sleep(Duration::from_millis(1500)).await;
        handle.cancel();
        time::sleep(Duration::from_secs(10)).await;

        assert_eq!(*ticks.lock().unwrap(), vec![4]);
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let mut controller = RetryController::new();
        let handle = controller.start(Some(2), |_| {}, || {});

        handle.cancel();
        handle.cancel();
        controller.cancel();
        controller.cancel();

        handle.wait().await;
        time::sleep(Duration::from_secs(5)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_completion_is_noop() {
        let mut controller = RetryController::new();
        let handle = controller.start(Some(1), |_| {}, || {});

        time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());
        handle.cancel();
        controller.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_cancels_first() {
        let (first_ticks, first_on_tick) = recorder();
        let first_completed = Arc::new(AtomicUsize::new(0));
        let first_completed_clone = Arc::clone(&first_completed);

        let (second_ticks, second_on_tick) = recorder();

        let mut controller = RetryController::new();
        let _first = controller.start(Some(3), first_on_tick, move || {
            first_completed_clone.fetch_add(1, Ordering::SeqCst);
        });
        let second = controller.start(Some(2), second_on_tick, || {});

        second.wait().await;
        time::sleep(Duration::from_secs(10)).await;

        // Only the second countdown's ticks are observed.
        assert!(first_ticks.lock().unwrap().is_empty());
        assert_eq!(first_completed.load(Ordering::SeqCst), 0);
        assert_eq!(*second_ticks.lock().unwrap(), vec![1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_is_finished() {
        let mut controller = RetryController::new();
        let handle = controller.start(Some(1), |_| {}, || {});

        assert!(!handle.is_finished());
        time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());
    }

    #[test]
    fn test_retry_state_new() {
        let state = RetryState::new(10);
        assert_eq!(state.seconds_remaining, 10);
        assert!(state.active);
    }
}
