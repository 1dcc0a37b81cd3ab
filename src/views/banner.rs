use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long the contact form's success acknowledgement stays up.
pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_millis(1500);

const HIDDEN: u64 = 0;

/// Transient acknowledgement that hides itself after a delay.
///
/// Each `show` gets a fresh generation number; the timer only hides the banner
/// if its own generation is still the one on display, so a stale timer can
/// never cut a newer banner short. Dropping the banner cancels its timer.
#[derive(Debug, Default)]
pub struct SuccessBanner {
    shown: Arc<AtomicU64>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl SuccessBanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, duration: Duration) {
        self.cancel_timer();

        self.generation += 1;
        let generation = self.generation;
        self.shown.store(generation, Ordering::SeqCst);

        let shown = Arc::clone(&self.shown);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = shown.compare_exchange(generation, HIDDEN, Ordering::SeqCst, Ordering::SeqCst);
        }));
    }

    pub fn dismiss(&mut self) {
        self.cancel_timer();
        self.shown.store(HIDDEN, Ordering::SeqCst);
    }

    pub fn is_visible(&self) -> bool {
        self.shown.load(Ordering::SeqCst) != HIDDEN
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for SuccessBanner {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
