//! Injected scheduling capability.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cancellation handle for a recurring callback.
///
/// One-shot `after` callbacks have no handle: once armed they always
/// fire.
#[derive(Debug, Clone, Default)]
pub struct TickTask {
    cancelled: Arc<AtomicBool>,
}

impl TickTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// "Given a callback and a delay or period, invoke it once that much
/// time has elapsed, repeating if a period was given."
pub trait Scheduler: Send + Sync {
    /// Invoke `callback` once after `delay`.
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce() + Send>);

    /// Invoke `callback` every `period` until the returned task is
    /// cancelled.
    fn every(&self, period: Duration, callback: Box<dyn FnMut() + Send>) -> TickTask;
}

/// Scheduler backed by a tokio runtime.
#[derive(Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

impl Scheduler for TokioScheduler {
    fn after(&self, delay: Duration, callback: Box<dyn FnOnce() + Send>) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
    }

    fn every(&self, period: Duration, mut callback: Box<dyn FnMut() + Send>) -> TickTask {
        let task = TickTask::new();
        let guard = task.clone();
        self.handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // the first tick fires immediately
            loop {
                interval.tick().await;
                if guard.is_cancelled() {
                    break;
                }
                callback();
            }
        });
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn tick_task_cancel_is_visible_through_clones() {
        let task = TickTask::new();
        let clone = task.clone();
        assert!(!clone.is_cancelled());
        task.cancel();
        assert!(clone.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn after_fires_once_the_delay_elapses() {
        let fired = Arc::new(AtomicBool::new(false));
        let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
        let flag = Arc::clone(&fired);
        scheduler.after(
            Duration::from_secs(60),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert!(!fired.load(Ordering::SeqCst));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn every_repeats_until_cancelled() {
        let count = Arc::new(AtomicU32::new(0));
        let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
        let counter = Arc::clone(&count);
        let task = scheduler.every(
            Duration::from_secs(1),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let so_far = count.load(Ordering::SeqCst);
        assert!(so_far >= 3, "expected at least 3 ticks, saw {so_far}");

        task.cancel();
        tokio::time::sleep(Duration::from_secs(3)).await;
        let after_cancel = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(count.load(Ordering::SeqCst) <= after_cancel + 1);
    }
}
