/// Source de frame times simulés : base constante et jitter uniforme.
///
/// # Example
/// ```
/// use lm_app::synthetic::SyntheticFrames;
/// let mut frames = SyntheticFrames::new(16.0, 0.25, Some(3));
/// let dt = frames.next_dt();
/// assert!((0.0119..=0.0201).contains(&dt));
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticFrames {
    rng: fastrand::Rng,
    base: f64,
    jitter: f64,
}

impl SyntheticFrames {
    /// `frame_time_ms` : temps de base ; `jitter` : amplitude relative [0, 1).
    #[must_use]
    pub fn new(frame_time_ms: f64, jitter: f64, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self {
            rng,
            base: frame_time_ms / 1_000.0,
            jitter: jitter.clamp(0.0, 0.99),
        }
    }

    /// Prochain delta en secondes, dans `base × [1 − jitter, 1 + jitter]`.
    pub fn next_dt(&mut self) -> f64 {
        let u = self.rng.f64() * 2.0 - 1.0;
        self.base * (1.0 + self.jitter * u)
    }
}

/// Luminance moyenne de scène simulée : oscille lentement autour du gris moyen.
#[must_use]
pub fn scene_luminance(time: f64) -> f32 {
    (0.18 * (1.0 + 0.5 * (time * 0.5).sin())) as f32
}
