use std::time::Instant;

/// Horloge de frame : fournit la paire `(delta_time, current_time)` consommée
/// par la boucle de rendu.
///
/// Deux modes d'avance :
/// - [`FrameClock::tick`] mesure le temps réel écoulé (horloge monotone) ;
/// - [`FrameClock::advance`] avance d'un pas imposé (frames synthétiques, tests).
///
/// `current_time` est exprimé en secondes depuis la création de l'horloge.
///
/// # Example
/// ```
/// use lm_core::clock::FrameClock;
/// let mut clock = FrameClock::new();
/// let (dt, now) = clock.advance(0.016);
/// assert!((dt - 0.016).abs() < 1e-6);
/// assert!((now - 0.016).abs() < 1e-9);
/// assert_eq!(clock.frame_count(), 1);
/// ```
#[derive(Debug)]
pub struct FrameClock {
    /// Dernier instant mesuré par `tick()`.
    last: Option<Instant>,
    /// Temps courant en secondes.
    now: f64,
    /// Nombre de frames écoulées.
    frames: u64,
}

impl FrameClock {
    /// Crée une horloge à t = 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            now: 0.0,
            frames: 0,
        }
    }

    /// Mesure le temps réel depuis le tick précédent.
    ///
    /// Le premier appel retourne un delta nul : il sert de point d'ancrage.
    pub fn tick(&mut self) -> (f32, f64) {
        let instant = Instant::now();
        let dt = self
            .last
            .map_or(0.0, |prev| instant.duration_since(prev).as_secs_f64());
        self.last = Some(instant);
        self.step(dt)
    }

    /// Avance d'un pas fixe `dt` (secondes). Les valeurs négatives ou non finies
    /// sont ramenées à zéro, le temps reste monotone.
    pub fn advance(&mut self, dt: f64) -> (f32, f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.step(dt)
    }

    #[inline]
    fn step(&mut self, dt: f64) -> (f32, f64) {
        self.now += dt;
        self.frames += 1;
        (dt as f32, self.now)
    }

    /// Temps courant en secondes.
    #[inline]
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Nombre de frames comptées depuis la création.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut clock = FrameClock::new();
        for _ in 0..10 {
            clock.advance(0.1);
        }
        assert!((clock.now() - 1.0).abs() < 1e-9);
        assert_eq!(clock.frame_count(), 10);
    }

    #[test]
    fn advance_rejects_negative_and_nan() {
        let mut clock = FrameClock::new();
        let (dt, now) = clock.advance(-1.0);
        assert!(dt.abs() < f32::EPSILON);
        assert!(now.abs() < f64::EPSILON);
        let (dt, _) = clock.advance(f64::NAN);
        assert!(dt.abs() < f32::EPSILON);
    }

    #[test]
    fn first_tick_is_anchor() {
        let mut clock = FrameClock::new();
        let (dt, _) = clock.tick();
        assert!(dt.abs() < f32::EPSILON);
        let (dt, now) = clock.tick();
        assert!(dt >= 0.0);
        assert!(now >= 0.0);
    }
}
