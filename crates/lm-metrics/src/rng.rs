//! PCG32 : générateur minimal, rapide et statistiquement solide.
//!
//! Seul usage : tirages uniformes dans [0, 1) pour les décisions de Bernoulli
//! de l'`AdaptiveSampler`. Voir <https://www.pcg-random.org/>.

use std::time::{SystemTime, UNIX_EPOCH};

const PCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const XSH_SHIFT: u32 = 18;
const XSH_OUT_SHIFT: u32 = 27;
const ROT_SHIFT: u32 = 59;

/// 1 / 2^32
const FLOAT_SCALE: f32 = 1.0 / 4_294_967_296.0;

/// Sélecteur de flux par défaut pour les instances auto-seedées.
pub const DEFAULT_STREAM: u64 = 54;

/// Générateur PCG32 (XSH-RR 64/32).
///
/// Deux générateurs seedés avec le même couple `(initstate, initseq)`
/// produisent exactement la même séquence.
///
/// # Example
/// ```
/// use lm_metrics::rng::Pcg32;
/// let mut a = Pcg32::new(42, 54);
/// let mut b = Pcg32::new(42, 54);
/// assert_eq!(a.next_u32(), b.next_u32());
/// let u = a.next_f32();
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Clone, Debug)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Dérive l'état interne depuis deux mots de 64 bits (récurrence d'init PCG standard).
    #[must_use]
    pub fn new(initstate: u64, initseq: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (initseq << 1) | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(initstate);
        rng.step();
        rng
    }

    /// Seed non reproductible : horloge murale mélangée à un mot aléatoire par appel.
    ///
    /// Deux instances construites au même instant reçoivent des états distincts.
    #[must_use]
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self::new(nanos ^ fastrand::u64(..), DEFAULT_STREAM)
    }

    #[inline(always)]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(PCG_MULTIPLIER)
            .wrapping_add(self.inc);
    }

    /// Avance d'un pas LCG et permute l'ancien état (xorshift puis rotation).
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        let xorshifted = (((old >> XSH_SHIFT) ^ old) >> XSH_OUT_SHIFT) as u32;
        let rot = (old >> ROT_SHIFT) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform draw in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // f32 rounding can land exactly on 1.0 for the top few draws.
        (self.next_u32() as f32 * FLOAT_SCALE).min(1.0 - f32::EPSILON / 2.0)
    }
}
