use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Trailing-edge debouncer: each `call` cancels the previously scheduled
/// closure and schedules the new one `delay` out, so only the last call in
/// a burst ever fires.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn call(&self, f: impl FnOnce() + Send + 'static) {
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });

        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    pub fn cancel(&self) {
        if let Some(task) = self.pending.lock().unwrap().take() {
            task.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
