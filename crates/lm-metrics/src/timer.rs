use std::time::{Duration, Instant};

/// Chronomètre CPU sur horloge monotone.
///
/// # Example
/// ```
/// use lm_metrics::timer::PerfTimer;
/// let timer = PerfTimer::start();
/// assert!(timer.elapsed_ms() >= 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PerfTimer {
    start: Instant,
}

impl PerfTimer {
    /// Démarre le chronomètre.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn elapsed_s(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_s() * 1_000.0
    }

    #[must_use]
    pub fn elapsed_us(&self) -> f64 {
        self.elapsed_s() * 1_000_000.0
    }
}

/// Exécute `f`, logue sa durée en debug sous `label`, retourne son résultat.
///
/// # Example
/// ```
/// use lm_metrics::timer::measure;
/// let sum = measure("somme", || (1..=10).sum::<u32>());
/// assert_eq!(sum, 55);
/// ```
pub fn measure<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let timer = PerfTimer::start();
    let out = f();
    log::debug!(target: "lumen.perf", "{label}: {:.3} ms", timer.elapsed_ms());
    out
}
