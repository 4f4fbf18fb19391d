use crate::params::AutoExposureParams;

/// Exposition de départ, avant toute mesure de luminance.
pub const INITIAL_EXPOSURE: f32 = 1.2;

/// Adaptation oculaire côté CPU.
///
/// Converge exponentiellement vers `key_value / luminance`, plus vite à la
/// montée qu'à la descente avec les paramètres par défaut.
///
/// # Example
/// ```
/// use lm_postfx::exposure::ExposureAdapter;
/// use lm_postfx::params::AutoExposureParams;
/// let params = AutoExposureParams::default();
/// let mut adapter = ExposureAdapter::new();
/// for _ in 0..600 {
///     adapter.adapt(0.1, 1.0 / 60.0, &params);
/// }
/// assert!((adapter.exposure() - 2.0).abs() < 1e-3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExposureAdapter {
    exposure: f32,
}

impl Default for ExposureAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposureAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            exposure: INITIAL_EXPOSURE,
        }
    }

    /// Fait un pas d'adaptation et retourne la nouvelle exposition.
    pub fn adapt(&mut self, avg_luminance: f32, dt: f32, params: &AutoExposureParams) -> f32 {
        if !dt.is_finite() || dt <= 0.0 || !avg_luminance.is_finite() {
            return self.exposure;
        }

        let lo = params.min_luminance.max(f32::MIN_POSITIVE);
        let hi = params.max_luminance.max(lo);
        let luminance = avg_luminance.clamp(lo, hi);
        let target = params.key_value / luminance;

        let speed = if target > self.exposure {
            params.speed_up
        } else {
            params.speed_down
        };
        let blend = 1.0 - (-dt * speed).exp();
        self.exposure += (target - self.exposure) * blend;
        self.exposure
    }

    #[must_use]
    pub fn exposure(&self) -> f32 {
        self.exposure
    }

    pub fn reset(&mut self) {
        self.exposure = INITIAL_EXPOSURE;
    }
}
