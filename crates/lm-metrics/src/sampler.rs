//! Échantillonneur adaptatif de frame times.
//!
//! Sur une fenêtre de durée fixe, collecte environ `target_samples` mesures
//! réparties uniformément dans le temps, sans connaître à l'avance le nombre
//! total de frames. À chaque tick :
//!
//! 1. l'estimation du temps de frame (`avg_dt`, EMA) est mise à jour ;
//! 2. le nombre de ticks restants est prévu : `time_left / avg_dt` ;
//! 3. la probabilité d'acceptation vaut `remaining_target / ticks_left`,
//!    bornée à 1 ;
//! 4. un tirage de Bernoulli PCG32 décide de l'enregistrement.
//!
//! La probabilité est recalculée à chaque tick : un pic de frame time fait
//! monter la probabilité, une fenêtre qui s'achève avec des échantillons en
//! retard la pousse vers 1. Une fois la cible atteinte, elle tombe à 0.

use std::collections::TryReserveError;
use std::fmt::Write as _;

use crate::rng::Pcg32;

/// Constante de lissage EMA de l'estimation du temps de frame.
pub const DEFAULT_ALPHA: f32 = 0.15;
/// FPS de repli quand l'estimation initiale est inexploitable.
pub const DEFAULT_FPS_GUESS: f32 = 60.0;
/// Capacité minimale du buffer d'échantillons.
pub const MIN_CAPACITY: usize = 64;

const MIN_FPS_GUESS: f32 = 1.0;
const MIN_TIME_LEFT: f32 = 0.001;
const MIN_TICKS_LEFT: f32 = 1.0;
const MIN_SAFE_DT: f32 = 0.000_01;

const PLOT_ABOVE: f32 = 1.05;
const PLOT_BELOW: f32 = 0.95;
const PLOT_HEADER_WIDTH: usize = 8;
const PLOT_MAX_PADDING: usize = 50;

/// Une mesure acceptée.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Secondes écoulées depuis le début de la fenêtre.
    pub timestamp: f32,
    /// Valeur mesurée : FPS instantané (`1 / dt`).
    pub value: f32,
}

/// Échantillonneur de Bernoulli à budget temporel.
///
/// Appelé une fois par frame via [`AdaptiveSampler::should_sample`]. Pas de
/// rotation automatique : une fois la fenêtre écoulée, l'appelant consulte
/// [`AdaptiveSampler::is_finished`] puis relance avec [`AdaptiveSampler::reset`].
///
/// Non thread-safe : un seul propriétaire pilote l'instance.
///
/// # Example
/// ```
/// use lm_metrics::sampler::AdaptiveSampler;
///
/// let mut sampler = AdaptiveSampler::with_seed(1.0, 1000, 60.0, 7);
/// let mut now = 0.0_f64;
/// for _ in 0..5 {
///     sampler.should_sample(0.2, now);
///     now += 0.2;
/// }
/// // Ticks rares face à une cible élevée : tout est accepté.
/// assert_eq!(sampler.sample_count(), 5);
/// assert!(sampler.is_finished(1.0));
/// ```
#[derive(Debug)]
pub struct AdaptiveSampler {
    rng: Pcg32,

    // Configuration
    window_duration: f32,
    target_samples: usize,

    // Estimation
    avg_dt: f32,
    alpha: f32,

    // Fenêtre
    window_start: Option<f64>,
    samples_taken: usize,

    samples: Vec<Sample>,
}

impl AdaptiveSampler {
    /// Construit un sampler dont le PRNG est seedé par entropie locale.
    ///
    /// `initial_fps_guess < 1.0` (y compris NaN) est remplacé par 60.
    #[must_use]
    pub fn new(window_duration: f32, target_samples: usize, initial_fps_guess: f32) -> Self {
        Self::with_rng(
            window_duration,
            target_samples,
            initial_fps_guess,
            Pcg32::from_entropy(),
        )
    }

    /// Variante reproductible : même seed, mêmes décisions.
    #[must_use]
    pub fn with_seed(
        window_duration: f32,
        target_samples: usize,
        initial_fps_guess: f32,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            window_duration,
            target_samples,
            initial_fps_guess,
            Pcg32::new(seed, crate::rng::DEFAULT_STREAM),
        )
    }

    fn with_rng(
        window_duration: f32,
        target_samples: usize,
        initial_fps_guess: f32,
        rng: Pcg32,
    ) -> Self {
        // La comparaison échoue aussi pour NaN.
        let guess = if initial_fps_guess >= MIN_FPS_GUESS {
            initial_fps_guess
        } else {
            DEFAULT_FPS_GUESS
        };
        let capacity = target_samples.saturating_mul(2).max(MIN_CAPACITY);

        Self {
            rng,
            window_duration,
            target_samples,
            avg_dt: 1.0 / guess,
            alpha: DEFAULT_ALPHA,
            window_start: None,
            samples_taken: 0,
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Démarre une nouvelle fenêtre à `current_time`.
    ///
    /// Conserve la mémoire du buffer, la configuration et l'état du PRNG.
    pub fn reset(&mut self, current_time: f64) {
        self.window_start = Some(current_time);
        self.samples_taken = 0;
        self.samples.clear();
    }

    /// Décide si la mesure de ce tick est enregistrée.
    ///
    /// Le premier appel ouvre implicitement la fenêtre. Retourne `false` dès
    /// que la fenêtre est écoulée, ou si le buffer ne peut pas grandir (la
    /// mesure est alors perdue, le sampler reste utilisable).
    pub fn should_sample(&mut self, delta_time: f32, current_time: f64) -> bool {
        let start = *self.window_start.get_or_insert_with(|| {
            log::debug!("Fenêtre d'échantillonnage ouverte à t={current_time:.3}s");
            current_time
        });

        self.avg_dt = self.alpha * delta_time + (1.0 - self.alpha) * self.avg_dt;

        let elapsed = current_time - start;
        let window = f64::from(self.window_duration);
        if elapsed >= window {
            return false;
        }

        let time_left = ((window - elapsed) as f32).max(MIN_TIME_LEFT);
        let ticks_left = (time_left / self.avg_dt).max(MIN_TICKS_LEFT);

        let remaining = self.target_samples.saturating_sub(self.samples_taken);
        let probability = (remaining as f32 / ticks_left).min(1.0);

        if self.rng.next_f32() >= probability {
            return false;
        }

        self.record(elapsed as f32, delta_time, Vec::try_reserve_exact)
    }

    /// Enregistre une mesure acceptée, en doublant le buffer s'il est plein.
    ///
    /// `reserve` effectue la réservation. En cas d'échec la mesure est
    /// perdue et l'état du sampler reste inchangé.
    fn record<R>(&mut self, timestamp: f32, delta_time: f32, reserve: R) -> bool
    where
        R: FnOnce(&mut Vec<Sample>, usize) -> Result<(), TryReserveError>,
    {
        if self.samples.len() == self.samples.capacity() {
            let additional = self.samples.capacity().max(MIN_CAPACITY);
            if let Err(e) = reserve(&mut self.samples, additional) {
                log::warn!("Croissance du buffer impossible, échantillon perdu : {e}");
                return false;
            }
        }

        self.samples.push(Sample {
            timestamp,
            value: 1.0 / delta_time.max(MIN_SAFE_DT),
        });
        self.samples_taken += 1;
        true
    }

    /// `true` si une fenêtre a démarré et que sa durée est écoulée.
    #[must_use]
    pub fn is_finished(&self, current_time: f64) -> bool {
        self.window_start
            .is_some_and(|start| current_time - start >= f64::from(self.window_duration))
    }

    /// Moyenne arithmétique des valeurs enregistrées ; 0 si aucune.
    #[must_use]
    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|s| f64::from(s.value)).sum();
        (sum / self.samples.len() as f64) as f32
    }

    /// Nombre d'échantillons dans la fenêtre courante.
    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Échantillons de la fenêtre courante, dans l'ordre d'acceptation.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Capacité allouée du buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    #[must_use]
    pub fn window_duration(&self) -> f32 {
        self.window_duration
    }

    #[must_use]
    pub fn target_samples(&self) -> usize {
        self.target_samples
    }

    /// Estimation courante du temps de frame (secondes).
    #[must_use]
    pub fn avg_dt(&self) -> f32 {
        self.avg_dt
    }

    /// Instant absolu d'ouverture de la fenêtre, `None` avant le premier tick.
    #[must_use]
    pub fn window_start(&self) -> Option<f64> {
        self.window_start
    }

    /// Libère le buffer. Un `should_sample` ultérieur réalloue au besoin.
    pub fn cleanup(&mut self) {
        self.samples = Vec::new();
        self.samples_taken = 0;
    }

    /// Timeline ASCII de la fenêtre : une colonne par tranche de temps.
    ///
    /// `'#'` : valeur à ±5 % de `reference`, `'+'` au-dessus, `'-'` en dessous,
    /// `'.'` : aucune mesure. Deux mesures sur la même colonne : la dernière gagne.
    ///
    /// ```text
    /// [0s....5.0s]
    /// |#..+...-..#|
    /// ```
    ///
    /// Retourne une chaîne vide si `width == 0`.
    #[must_use]
    pub fn ascii_plot(&self, width: usize, reference: f32) -> String {
        if width == 0 {
            return String::new();
        }

        let mut line = vec![b'.'; width];
        let last = width - 1;
        for s in &self.samples {
            let pos = ((s.timestamp / self.window_duration) * last as f32 + 0.5) as usize;
            line[pos.min(last)] = if s.value > reference * PLOT_ABOVE {
                b'+'
            } else if s.value < reference * PLOT_BELOW {
                b'-'
            } else {
                b'#'
            };
        }

        let padding = width.saturating_sub(PLOT_HEADER_WIDTH).min(PLOT_MAX_PADDING);
        let mut out = String::with_capacity(width * 2 + 16);
        out.push_str("[0s");
        out.extend(std::iter::repeat_n('.', padding));
        let _ = write!(out, "{:.1}s]\n|", self.window_duration);
        out.extend(line.iter().map(|&b| char::from(b)));
        out.push('|');
        out
    }

    /// Écrit la timeline dans un buffer fourni, tronquée à sa taille.
    ///
    /// Retourne le nombre d'octets écrits ; 0 (aucune écriture) si le buffer
    /// est vide ou `width == 0`. La sortie est ASCII pur, toute troncature
    /// reste donc une chaîne valide.
    pub fn write_ascii_plot(&self, out: &mut [u8], width: usize, reference: f32) -> usize {
        if out.is_empty() || width == 0 {
            return 0;
        }
        let plot = self.ascii_plot(width, reference);
        let n = plot.len().min(out.len());
        out[..n].copy_from_slice(&plot.as_bytes()[..n]);
        n
    }
}
