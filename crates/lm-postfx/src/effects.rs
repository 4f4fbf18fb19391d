use serde::{Deserialize, Serialize};

/// Effets de post-processing, chacun associé à un bit du masque actif.
///
/// # Example
/// ```
/// use lm_postfx::effects::Effect;
/// assert_eq!(Effect::Bloom.bit(), 0x10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Effect {
    Vignette,
    Grain,
    Exposure,
    ChromaticAberration,
    Bloom,
    ColorGrading,
    DepthOfField,
    /// Visualisation du cercle de confusion.
    DepthOfFieldDebug,
    AutoExposure,
    /// Affichage de la luminance mesurée.
    ExposureDebug,
    MotionBlur,
    /// Visualisation du buffer de vélocité.
    MotionBlurDebug,
}

impl Effect {
    /// Tous les effets, dans l'ordre des bits.
    pub const ALL: [Effect; 12] = [
        Effect::Vignette,
        Effect::Grain,
        Effect::Exposure,
        Effect::ChromaticAberration,
        Effect::Bloom,
        Effect::ColorGrading,
        Effect::DepthOfField,
        Effect::DepthOfFieldDebug,
        Effect::AutoExposure,
        Effect::ExposureDebug,
        Effect::MotionBlur,
        Effect::MotionBlurDebug,
    ];

    /// Bit de l'effet dans le masque partagé avec les shaders.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// Nom court (logs, CLI).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Effect::Vignette => "vignette",
            Effect::Grain => "grain",
            Effect::Exposure => "exposure",
            Effect::ChromaticAberration => "chromatic_aberration",
            Effect::Bloom => "bloom",
            Effect::ColorGrading => "color_grading",
            Effect::DepthOfField => "dof",
            Effect::DepthOfFieldDebug => "dof_debug",
            Effect::AutoExposure => "auto_exposure",
            Effect::ExposureDebug => "exposure_debug",
            Effect::MotionBlur => "motion_blur",
            Effect::MotionBlurDebug => "motion_blur_debug",
        }
    }
}

/// Masque des effets actifs.
///
/// # Example
/// ```
/// use lm_postfx::effects::{Effect, EffectSet};
/// let mut set = EffectSet::empty();
/// set.enable(Effect::Grain);
/// set.toggle(Effect::Bloom);
/// assert!(set.contains(Effect::Grain) && set.contains(Effect::Bloom));
/// assert_eq!(set.bits(), 0x12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EffectSet(u32);

impl EffectSet {
    const MASK: u32 = (1 << Effect::ALL.len()) - 1;

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Construit un masque depuis une liste d'effets.
    #[must_use]
    pub fn of(effects: &[Effect]) -> Self {
        Self(effects.iter().fold(0, |acc, e| acc | e.bit()))
    }

    /// Ignore les bits inconnus.
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::MASK)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn enable(&mut self, effect: Effect) {
        self.0 |= effect.bit();
    }

    #[inline]
    pub fn disable(&mut self, effect: Effect) {
        self.0 &= !effect.bit();
    }

    /// Inverse l'état de l'effet et retourne le nouvel état.
    #[inline]
    pub fn toggle(&mut self, effect: Effect) -> bool {
        self.0 ^= effect.bit();
        self.contains(effect)
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, effect: Effect) -> bool {
        self.0 & effect.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Effets actifs, dans l'ordre des bits.
    pub fn iter(self) -> impl Iterator<Item = Effect> {
        Effect::ALL.into_iter().filter(move |e| self.contains(*e))
    }
}
