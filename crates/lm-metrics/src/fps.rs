/// Compteur FPS lissé par moyenne mobile exponentielle. Zéro allocation.
///
/// # Example
/// ```
/// use lm_metrics::fps::FpsCounter;
/// let mut counter = FpsCounter::new(0.95, 5.0);
/// assert!(counter.fps().abs() < f64::EPSILON);
/// counter.update(0.016, 0.016);
/// assert!((counter.fps() - 62.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct FpsCounter {
    /// Temps de frame moyen en secondes (0 = aucune frame reçue).
    average_frame_time: f64,
    /// Poids de l'historique [0.0, 1.0].
    decay: f32,
    last_log_time: f64,
    log_interval: f64,
    log_enabled: bool,
}

/// Facteur de décroissance par défaut (très lissé).
pub const DEFAULT_DECAY: f32 = 0.95;
/// Intervalle de log par défaut, en secondes.
pub const DEFAULT_LOG_INTERVAL: f64 = 5.0;

impl FpsCounter {
    /// Create a counter with the given EMA decay and log interval (seconds).
    ///
    /// Un `decay` NaN est remplacé par `DEFAULT_DECAY`.
    #[must_use]
    pub fn new(decay: f32, log_interval: f64) -> Self {
        let decay = if decay.is_nan() { DEFAULT_DECAY } else { decay };
        Self {
            average_frame_time: 0.0,
            decay: decay.clamp(0.0, 1.0),
            last_log_time: 0.0,
            log_interval,
            log_enabled: false,
        }
    }

    /// Active le log périodique `Avg Frame Time | FPS`.
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_enabled = enabled;
        self
    }

    /// Appeler une fois par frame.
    ///
    /// La première frame initialise directement la moyenne.
    pub fn update(&mut self, delta_time: f64, current_time: f64) {
        if self.average_frame_time == 0.0 {
            self.average_frame_time = delta_time;
        } else {
            let decay = f64::from(self.decay);
            self.average_frame_time =
                self.average_frame_time * decay + delta_time * (1.0 - decay);
        }

        if self.log_enabled && current_time - self.last_log_time >= self.log_interval {
            log::info!(
                target: "lumen.fps",
                "Avg Frame Time: {:.3} ms | FPS: {:.1}",
                self.frame_time_ms(),
                self.fps()
            );
            self.last_log_time = current_time;
        }
    }

    /// Temps de frame moyen en secondes.
    #[must_use]
    pub fn average_frame_time(&self) -> f64 {
        self.average_frame_time
    }

    /// Temps de frame moyen en millisecondes.
    #[must_use]
    pub fn frame_time_ms(&self) -> f64 {
        self.average_frame_time * 1000.0
    }

    /// FPS lissé ; 0 tant qu'aucune frame n'a été comptée.
    #[must_use]
    pub fn fps(&self) -> f64 {
        if self.average_frame_time > 0.0 {
            1.0 / self.average_frame_time
        } else {
            0.0
        }
    }

    /// Instant du dernier log émis.
    #[must_use]
    pub fn last_log_time(&self) -> f64 {
        self.last_log_time
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(DEFAULT_DECAY, DEFAULT_LOG_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_seeds_average() {
        let mut fps = FpsCounter::default();
        assert!(fps.average_frame_time().abs() < f64::EPSILON);
        fps.update(0.016, 1.0);
        assert!((fps.average_frame_time() - 0.016).abs() < 1e-12);
    }

    #[test]
    fn ema_blends_towards_new_frames() {
        let mut fps = FpsCounter::new(0.5, 5.0);
        fps.update(0.010, 0.0);
        fps.update(0.030, 0.1);
        assert!((fps.average_frame_time() - 0.020).abs() < 1e-9);
        assert!((fps.fps() - 50.0).abs() < 1e-6);
        assert!((fps.frame_time_ms() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn nan_decay_uses_default() {
        let mut fps = FpsCounter::new(f32::NAN, 5.0);
        fps.update(0.010, 0.0);
        fps.update(0.030, 0.1);
        assert!(fps.fps().is_finite());
        // 0.010 × 0.95 + 0.030 × 0.05
        assert!((fps.average_frame_time() - 0.011).abs() < 1e-6);
    }

    #[test]
    fn converges_on_steady_rate() {
        let mut fps = FpsCounter::default();
        fps.update(0.1, 0.0);
        for i in 0..500 {
            fps.update(1.0 / 60.0, f64::from(i) / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 0.1);
    }

    #[test]
    fn log_stamp_respects_interval() {
        let mut fps = FpsCounter::new(0.9, 1.0).with_logging(true);
        fps.update(0.016, 0.5);
        assert!(fps.last_log_time().abs() < f64::EPSILON);
        fps.update(0.016, 1.2);
        assert!((fps.last_log_time() - 1.2).abs() < f64::EPSILON);
        fps.update(0.016, 1.5);
        assert!((fps.last_log_time() - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn silent_counter_never_stamps() {
        let mut fps = FpsCounter::new(0.9, 0.0);
        fps.update(0.016, 10.0);
        assert!(fps.last_log_time().abs() < f64::EPSILON);
    }
}
