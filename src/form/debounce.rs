use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

/// Collapses rapid repeated calls into one delayed action.
///
/// Every [`call`] cancels whatever is still scheduled and re-arms the timer,
/// so the action runs once per quiet window, with the arguments of the last
/// call before the window elapsed. The pending timer is an explicit task
/// handle rather than a captured closure state, which keeps its lifecycle
/// inspectable ([`is_pending`]) and cancellable ([`cancel`]).
///
/// Once the window elapses the action has fired; anything it dispatched is
/// on its own and can no longer be cancelled from here.
///
/// [`call`]: Debouncer::call
/// [`cancel`]: Debouncer::cancel
/// [`is_pending`]: Debouncer::is_pending
pub struct Debouncer<T> {
    window: Duration,
    action: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, action: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            window,
            action: Arc::new(action),
            pending: None,
        }
    }

    /// Schedules the action with `value`, discarding any scheduled call
    /// that has not fired yet. Skipped calls are not queued.
    pub fn call(&mut self, value: T) {
        self.cancel();

        // The quiet window starts now, not when the timer task first gets
        // polled; the deadline has to be pinned before handing off.
        let deadline = time::Instant::now() + self.window;
        let action = Arc::clone(&self.action);
        self.pending = Some(tokio::spawn(async move {
            time::sleep_until(deadline).await;
            action(value);
        }));
    }

    /// Abandons the scheduled call, if any. Not an error; the contract is
    /// simply that the action never runs for it.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Whether a call is scheduled but has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        // Teardown abandons the pending call rather than flushing it.
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}
