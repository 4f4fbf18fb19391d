//! Blocs de paramètres des effets, un par groupe uniforme côté shader.

use serde::{Deserialize, Serialize};

/// Assombrissement des bords de l'image.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct VignetteParams {
    pub intensity: f32,
    pub smoothness: f32,
    pub roundness: f32,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            intensity: 0.8,
            smoothness: 0.5,
            roundness: 1.0,
        }
    }
}

/// Film grain, pondéré par bande de luminance.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct GrainParams {
    pub intensity: f32,
    pub intensity_shadows: f32,
    pub intensity_midtones: f32,
    pub intensity_highlights: f32,
    /// Luminance sous laquelle on est dans les ombres.
    pub shadows_max: f32,
    /// Luminance au-dessus de laquelle on est dans les hautes lumières.
    pub highlights_min: f32,
    pub texel_size: f32,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            intensity: 0.02,
            intensity_shadows: 1.0,
            intensity_midtones: 1.0,
            intensity_highlights: 1.0,
            shadows_max: 0.09,
            highlights_min: 0.5,
            texel_size: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ExposureParams {
    pub exposure: f32,
}

impl Default for ExposureParams {
    fn default() -> Self {
        Self { exposure: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChromaticAberrationParams {
    pub strength: f32,
}

impl Default for ChromaticAberrationParams {
    fn default() -> Self {
        Self { strength: 0.005 }
    }
}

/// Balance des blancs : température en Kelvin, teinte vert/magenta.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct WhiteBalanceParams {
    pub temperature: f32,
    pub tint: f32,
}

impl Default for WhiteBalanceParams {
    fn default() -> Self {
        Self {
            temperature: 6500.0,
            tint: 0.0,
        }
    }
}

/// Étalonnage global. Les valeurs par défaut sont neutres.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ColorGradingParams {
    pub saturation: f32,
    pub contrast: f32,
    pub gamma: f32,
    pub gain: f32,
    pub offset: f32,
}

impl Default for ColorGradingParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl ColorGradingParams {
    pub const NEUTRAL: Self = Self {
        saturation: 1.0,
        contrast: 1.0,
        gamma: 1.0,
        gain: 1.0,
        offset: 0.0,
    };
}

/// Courbe de tonemapping filmique.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct TonemapParams {
    pub slope: f32,
    pub toe: f32,
    pub shoulder: f32,
    pub black_clip: f32,
    pub white_clip: f32,
}

impl Default for TonemapParams {
    fn default() -> Self {
        Self {
            slope: 1.0,
            toe: 0.0,
            shoulder: 0.0,
            black_clip: 0.0,
            white_clip: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct BloomParams {
    pub intensity: f32,
    pub threshold: f32,
    pub soft_threshold: f32,
    /// Rayon du filtre d'upsample, en texels.
    pub radius: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            threshold: 1.0,
            soft_threshold: 0.5,
            radius: 1.0,
        }
    }
}

/// Profondeur de champ, distances en unités monde.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct DepthOfFieldParams {
    pub focal_distance: f32,
    pub focal_range: f32,
    pub bokeh_size: f32,
}

impl Default for DepthOfFieldParams {
    fn default() -> Self {
        Self {
            focal_distance: 20.0,
            focal_range: 5.0,
            bokeh_size: 10.0,
        }
    }
}

/// Bornes et vitesses de l'adaptation automatique.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct AutoExposureParams {
    pub min_luminance: f32,
    pub max_luminance: f32,
    /// Vitesse d'adaptation quand l'exposition doit monter (scène plus sombre).
    pub speed_up: f32,
    /// Vitesse d'adaptation quand l'exposition doit baisser.
    pub speed_down: f32,
    /// Luminance moyenne visée après exposition (middle grey).
    pub key_value: f32,
}

impl Default for AutoExposureParams {
    fn default() -> Self {
        Self {
            min_luminance: 0.05,
            max_luminance: 5000.0,
            speed_up: 2.0,
            speed_down: 1.0,
            key_value: 0.20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct MotionBlurParams {
    pub intensity: f32,
    pub max_velocity: f32,
    pub samples: u32,
}

impl Default for MotionBlurParams {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            max_velocity: 0.05,
            samples: 8,
        }
    }
}
