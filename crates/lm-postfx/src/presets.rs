use lm_core::CoreError;
use serde::{Deserialize, Serialize};

use crate::effects::{Effect, EffectSet};
use crate::params::{
    BloomParams, ChromaticAberrationParams, ColorGradingParams, DepthOfFieldParams,
    ExposureParams, GrainParams, TonemapParams, VignetteParams, WhiteBalanceParams,
};

/// Jeu complet d'effets et de paramètres appliqué d'un bloc.
///
/// Les champs qu'un preset ne personnalise pas gardent leurs valeurs par défaut.
///
/// # Example
/// ```
/// use lm_postfx::presets::Preset;
/// use lm_postfx::effects::Effect;
/// let p = Preset::by_name("matrix").unwrap();
/// assert!(p.active.contains(Effect::ColorGrading));
/// assert!(!p.active.contains(Effect::Vignette));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Preset {
    pub active: EffectSet,
    pub vignette: VignetteParams,
    pub grain: GrainParams,
    pub exposure: ExposureParams,
    pub chromatic_aberration: ChromaticAberrationParams,
    pub white_balance: WhiteBalanceParams,
    pub color_grading: ColorGradingParams,
    pub tonemap: TonemapParams,
    pub bloom: BloomParams,
    pub depth_of_field: DepthOfFieldParams,
}

/// Noms des presets intégrés.
pub const PRESET_NAMES: [&str; 6] = [
    "default",
    "subtle",
    "cinematic",
    "vintage",
    "matrix",
    "bw_contrast",
];

const FILMIC: [Effect; 5] = [
    Effect::Vignette,
    Effect::Grain,
    Effect::ChromaticAberration,
    Effect::Exposure,
    Effect::ColorGrading,
];

impl Preset {
    /// Exposition + étalonnage neutre, rien d'autre.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            active: EffectSet::of(&[Effect::Exposure, Effect::ColorGrading]),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn subtle() -> Self {
        Self::filmic(0.3, 0.7, 0.02, 1.0, 0.01)
    }

    #[must_use]
    pub fn cinematic() -> Self {
        Self::filmic(0.5, 0.6, 0.03, 1.2, 0.015)
    }

    #[must_use]
    pub fn vintage() -> Self {
        Self::filmic(0.7, 0.5, 0.06, 0.9, 0.02)
    }

    /// Désaturé, contrasté, légèrement levé.
    #[must_use]
    pub fn matrix() -> Self {
        Self {
            active: EffectSet::of(&[Effect::ColorGrading]),
            color_grading: ColorGradingParams {
                saturation: 0.5,
                contrast: 1.2,
                gamma: 0.9,
                gain: 1.1,
                offset: 0.02,
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bw_contrast() -> Self {
        Self {
            active: EffectSet::of(&[Effect::ColorGrading]),
            color_grading: ColorGradingParams {
                saturation: 0.0,
                contrast: 1.5,
                ..ColorGradingParams::NEUTRAL
            },
            ..Self::default()
        }
    }

    fn filmic(
        vignette: f32,
        smoothness: f32,
        grain: f32,
        exposure: f32,
        aberration: f32,
    ) -> Self {
        Self {
            active: EffectSet::of(&FILMIC),
            vignette: VignetteParams {
                intensity: vignette,
                smoothness,
                ..VignetteParams::default()
            },
            grain: GrainParams {
                intensity: grain,
                ..GrainParams::default()
            },
            exposure: ExposureParams { exposure },
            chromatic_aberration: ChromaticAberrationParams {
                strength: aberration,
            },
            ..Self::default()
        }
    }

    /// Recherche un preset intégré par nom (insensible à la casse).
    ///
    /// # Errors
    /// Returns `CoreError::UnknownPreset` if the name is not registered.
    pub fn by_name(name: &str) -> Result<Self, CoreError> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::standard()),
            "subtle" => Ok(Self::subtle()),
            "cinematic" => Ok(Self::cinematic()),
            "vintage" => Ok(Self::vintage()),
            "matrix" => Ok(Self::matrix()),
            "bw_contrast" => Ok(Self::bw_contrast()),
            _ => Err(CoreError::UnknownPreset {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_name_resolves() {
        for name in PRESET_NAMES {
            assert!(Preset::by_name(name).is_ok(), "{name}");
        }
        assert!(Preset::by_name("Cinematic").is_ok());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let Err(err) = Preset::by_name("noir") else {
            panic!("noir should not exist");
        };
        assert!(matches!(err, CoreError::UnknownPreset { ref name } if name == "noir"));
    }

    #[test]
    fn standard_is_neutral() {
        let p = Preset::standard();
        assert_eq!(p.active.bits(), 0x04 | 0x20);
        assert_eq!(p.color_grading, ColorGradingParams::NEUTRAL);
        assert!((p.vignette.intensity - 0.8).abs() < f32::EPSILON);
        assert!((p.exposure.exposure - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn filmic_presets_share_effects() {
        let cinematic = Preset::cinematic();
        assert_eq!(cinematic.active, Preset::subtle().active);
        assert_eq!(cinematic.active, Preset::vintage().active);
        assert_eq!(cinematic.active.bits(), 0x01 | 0x02 | 0x04 | 0x08 | 0x20);
        assert!((cinematic.exposure.exposure - 1.2).abs() < f32::EPSILON);
        assert!((cinematic.grain.intensity - 0.03).abs() < f32::EPSILON);
        assert!((cinematic.vignette.smoothness - 0.6).abs() < f32::EPSILON);
        assert!((cinematic.chromatic_aberration.strength - 0.015).abs() < f32::EPSILON);
    }

    #[test]
    fn untouched_groups_keep_defaults() {
        let p = Preset::bw_contrast();
        assert_eq!(p.white_balance, WhiteBalanceParams::default());
        assert_eq!(p.bloom, BloomParams::default());
        assert_eq!(p.depth_of_field, DepthOfFieldParams::default());
        assert!(p.color_grading.saturation.abs() < f32::EPSILON);
        assert!((p.color_grading.gamma - 1.0).abs() < f32::EPSILON);
    }
}
