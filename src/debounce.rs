//! Trailing-edge debouncing: act only on the last value of a burst, once
//! the burst has been quiet for a fixed window.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Pending-value bookkeeping, independent of any timer.
///
/// Each [`push`](Debounce::push) replaces the pending value and restarts the
/// window; [`take_ready`](Debounce::take_ready) yields it once the window
/// has elapsed.
#[derive(Debug)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new value, superseding any pending one.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// When the pending value becomes ready, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value if its window has elapsed at `now`.
    pub fn take_ready(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drops the pending value without firing.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// Sleeps until `deadline`, or forever when there is none.
pub(crate) async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

enum Signal<T> {
    Push(T),
    Cancel,
}

/// Runs a callback with the trailing value of each burst on a background task.
///
/// Dropping the debouncer stops the task; a pending value is then discarded
/// and the callback is never invoked again.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Signal<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the timer task. Must be called within a tokio runtime.
    pub fn new<F>(delay: Duration, mut on_fire: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut state = Debounce::new(delay);
            loop {
                tokio::select! {
                    signal = rx.recv() => match signal {
                        Some(Signal::Push(value)) => state.push(value, Instant::now()),
                        Some(Signal::Cancel) => {
                            state.cancel();
                        }
                        None => break,
                    },
                    _ = sleep_until(state.deadline()) => {
                        if let Some(value) = state.take_ready(Instant::now()) {
                            on_fire(value);
                        }
                    }
                }
            }
            debug!("Debouncer stopped");
        });

        Self { tx, task }
    }

    /// Submits a value, restarting the quiet window.
    pub fn push(&self, value: T) {
        let _ = self.tx.send(Signal::Push(value));
    }

    /// Discards the pending value, if any.
    pub fn cancel(&self) {
        let _ = self.tx.send(Signal::Cancel);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::sleep;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(String) + Send + 'static) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        (fired, move |value| sink.lock().unwrap().push(value))
    }

    #[test]
    fn test_state_push_and_take() {
        let start = Instant::now();
        let mut state = Debounce::new(Duration::from_millis(300));
        assert!(state.deadline().is_none());

        state.push("a", start);
        state.push("ab", start + Duration::from_millis(100));
        assert_eq!(state.deadline(), Some(start + Duration::from_millis(400)));

        assert_eq!(state.take_ready(start + Duration::from_millis(399)), None);
        assert_eq!(state.take_ready(start + Duration::from_millis(400)), Some("ab"));
        assert!(!state.is_pending());
        assert_eq!(state.take_ready(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_state_cancel() {
        let start = Instant::now();
        let mut state = Debounce::new(Duration::from_millis(300));
        state.push(1, start);
        assert_eq!(state.cancel(), Some(1));
        assert_eq!(state.take_ready(start + Duration::from_secs(1)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_trailing_value_once() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), on_fire);

        debouncer.push("k".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.push("ku".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.push("kurta".to_string());

        sleep(Duration::from_millis(299)).await;
        assert!(fired.lock().unwrap().is_empty());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["kurta"]);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), on_fire);

        debouncer.push("saree".to_string());
        sleep(Duration::from_millis(500)).await;
        debouncer.push("lehenga".to_string());
        sleep(Duration::from_millis(500)).await;

        assert_eq!(*fired.lock().unwrap(), vec!["saree", "lehenga"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), on_fire);

        debouncer.push("dress".to_string());
        sleep(Duration::from_millis(50)).await;
        debouncer.cancel();
        sleep(Duration::from_secs(1)).await;

        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_fires_after_drop() {
        let (fired, on_fire) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), on_fire);

        debouncer.push("jeans".to_string());
        sleep(Duration::from_millis(10)).await;
        drop(debouncer);
        sleep(Duration::from_secs(1)).await;

        assert!(fired.lock().unwrap().is_empty());
    }
}
