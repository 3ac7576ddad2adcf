//! Quiet-period debouncing for free-text search input.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period used by list search boxes.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

/// Delays committing a value until no new value arrived for the quiet period.
///
/// Every [`push`](Self::push) restarts the timer, so only the last value of a
/// burst reaches the commit callback, exactly once. Dropping the debouncer
/// cancels a pending commit. Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    quiet_period: Duration,
    commit: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(quiet_period: Duration, commit: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            quiet_period,
            commit: Arc::new(commit),
            pending: None,
        }
    }

    /// Records a new value and restarts the quiet-period timer.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let commit = Arc::clone(&self.commit);
        let quiet_period = self.quiet_period;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            commit(value);
        }));
    }

    /// Drops the pending value, if any. Returns `true` when a commit was
    /// actually prevented.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    use super::*;

    fn channel_debouncer() -> (Debouncer<String>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(DEFAULT_QUIET_PERIOD, move |value: String| {
            let _ = tx.send(value);
        });
        (debouncer, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_commits_only_the_last_value_once() {
        let (mut debouncer, mut rx) = channel_debouncer();

        debouncer.push("m".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.push("mo".to_string());
        sleep(Duration::from_millis(300)).await;
        debouncer.push("mon".to_string());
        sleep(Duration::from_millis(450)).await;

        assert_eq!(rx.try_recv().unwrap(), "mon");
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_commits_before_the_quiet_period() {
        let (mut debouncer, mut rx) = channel_debouncer();

        debouncer.push("dell".to_string());
        sleep(Duration::from_millis(399)).await;

        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), "dell");
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_commit() {
        let (mut debouncer, mut rx) = channel_debouncer();

        debouncer.push("late".to_string());
        drop(debouncer);
        sleep(Duration::from_secs(1)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_reports_whether_a_commit_was_pending() {
        let (mut debouncer, mut rx) = channel_debouncer();

        assert!(!debouncer.cancel());
        debouncer.push("x".to_string());
        assert!(debouncer.cancel());
        sleep(Duration::from_secs(1)).await;

        assert!(rx.try_recv().is_err());
    }
}
