use std::time::{Duration, Instant};

use tracing::info;

/// Scoped timer framing a block of work with start and completion events.
///
/// Emits `[name] start` at creation and `[name] done in X.XX s` when the
/// guard drops. Where the messages land is decided by whichever tracing
/// subscriber is installed; without one they are discarded.
///
/// ```
/// use runcorr::timing::ScopedTimer;
///
/// {
///     let _timer = ScopedTimer::new("load");
///     // timed work
/// }
/// ```
pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        info!("[{}] start", name);
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Time elapsed since the guard was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        info!(
            "[{}] done in {:.2} s",
            self.name,
            self.start.elapsed().as_secs_f64()
        );
    }
}
