use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancellable delayed task used to detect abandoned checkouts.
///
/// The watchdog has no locking of its own: `disarm` may race with the task
/// firing, and the tie is broken by whatever guard the `on_fire` closure
/// checks. Must be armed from within a tokio runtime.
#[derive(Debug, Default)]
pub struct Watchdog {
    handle: Option<JoinHandle<()>>,
}

impl Watchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `on_fire` to run once after `delay`. Re-arming replaces any
    /// previously scheduled task.
    pub fn arm<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.disarm();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        }));
    }

    /// Best-effort cancellation. Idempotent.
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.disarm();
    }
}
