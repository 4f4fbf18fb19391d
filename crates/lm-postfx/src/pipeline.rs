use lm_core::CoreError;

use crate::effects::{Effect, EffectSet};
use crate::exposure::ExposureAdapter;
use crate::params::{
    AutoExposureParams, BloomParams, ChromaticAberrationParams, ColorGradingParams,
    DepthOfFieldParams, ExposureParams, GrainParams, MotionBlurParams, TonemapParams,
    VignetteParams, WhiteBalanceParams,
};
use crate::presets::Preset;

/// Nombre de niveaux de la chaîne de mips du bloom.
pub const BLOOM_MIP_COUNT: usize = 5;

/// Plancher de l'exposition manuelle.
pub const MIN_EXPOSURE: f32 = 0.1;

/// Passe GPU planifiée pour la frame courante.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Bloom,
    DepthOfField,
    AutoExposure,
    MotionBlur,
    /// Passe finale : tonemap, étalonnage et effets écran vers le backbuffer.
    Composite,
}

/// Passes à exécuter, dans l'ordre, et uniformes du composite.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub passes: Vec<Pass>,
    pub active: EffectSet,
    pub exposure: f32,
    pub time: f32,
}

/// État complet du post-processing.
///
/// # Example
/// ```
/// use lm_postfx::pipeline::{Pass, PostProcess};
/// use lm_postfx::effects::Effect;
/// let mut post = PostProcess::new(1280, 720).unwrap();
/// post.enable(Effect::Bloom);
/// post.update_time(0.016);
/// let plan = post.end_frame(0.18);
/// assert_eq!(plan.passes, [Pass::Bloom, Pass::Composite]);
/// ```
#[derive(Clone, Debug)]
pub struct PostProcess {
    width: u32,
    height: u32,
    active: EffectSet,
    vignette: VignetteParams,
    grain: GrainParams,
    exposure: ExposureParams,
    chromatic_aberration: ChromaticAberrationParams,
    white_balance: WhiteBalanceParams,
    color_grading: ColorGradingParams,
    tonemap: TonemapParams,
    bloom: BloomParams,
    depth_of_field: DepthOfFieldParams,
    auto_exposure: AutoExposureParams,
    motion_blur: MotionBlurParams,
    adapter: ExposureAdapter,
    bloom_mips: Vec<(u32, u32)>,
    time: f32,
    delta_time: f32,
}

fn bloom_chain(width: u32, height: u32) -> Vec<(u32, u32)> {
    let mut w = width;
    let mut h = height;
    (0..BLOOM_MIP_COUNT)
        .map(|_| {
            w = (w / 2).max(1);
            h = (h / 2).max(1);
            (w, h)
        })
        .collect()
}

fn check_dimensions(width: u32, height: u32) -> Result<(), CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height });
    }
    Ok(())
}

impl PostProcess {
    /// Paramètres par défaut, aucun effet actif.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        check_dimensions(width, height)?;
        log::debug!("PostProcess {width}×{height}, {BLOOM_MIP_COUNT} mips de bloom");
        Ok(Self {
            width,
            height,
            active: EffectSet::empty(),
            vignette: VignetteParams::default(),
            grain: GrainParams::default(),
            exposure: ExposureParams::default(),
            chromatic_aberration: ChromaticAberrationParams::default(),
            white_balance: WhiteBalanceParams::default(),
            color_grading: ColorGradingParams::default(),
            tonemap: TonemapParams::default(),
            bloom: BloomParams::default(),
            depth_of_field: DepthOfFieldParams::default(),
            auto_exposure: AutoExposureParams::default(),
            motion_blur: MotionBlurParams::default(),
            adapter: ExposureAdapter::new(),
            bloom_mips: bloom_chain(width, height),
            time: 0.0,
            delta_time: 0.0,
        })
    }

    /// Redimensionne les cibles. Sans effet si la taille n'a pas changé.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if either dimension is zero.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CoreError> {
        check_dimensions(width, height)?;
        if width == self.width && height == self.height {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.bloom_mips = bloom_chain(width, height);
        log::info!("PostProcess redimensionné : {width}×{height}");
        Ok(())
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Résolutions de la chaîne de bloom, de la plus grande à la plus petite.
    #[must_use]
    pub fn bloom_mips(&self) -> &[(u32, u32)] {
        &self.bloom_mips
    }

    // === Effets ===

    pub fn enable(&mut self, effect: Effect) {
        self.active.enable(effect);
    }

    pub fn disable(&mut self, effect: Effect) {
        self.active.disable(effect);
    }

    pub fn toggle(&mut self, effect: Effect) -> bool {
        let on = self.active.toggle(effect);
        log::info!("{} : {}", effect.name(), if on { "on" } else { "off" });
        on
    }

    #[must_use]
    pub fn is_enabled(&self, effect: Effect) -> bool {
        self.active.contains(effect)
    }

    #[must_use]
    pub fn active(&self) -> EffectSet {
        self.active
    }

    // === Paramètres ===

    pub fn set_vignette(&mut self, params: VignetteParams) {
        self.vignette = params;
    }

    pub fn set_grain(&mut self, params: GrainParams) {
        self.grain = params;
    }

    pub fn set_exposure(&mut self, exposure: f32) {
        self.exposure.exposure = exposure;
    }

    pub fn set_chromatic_aberration(&mut self, strength: f32) {
        self.chromatic_aberration.strength = strength;
    }

    pub fn set_white_balance(&mut self, params: WhiteBalanceParams) {
        self.white_balance = params;
    }

    pub fn set_color_grading(&mut self, params: ColorGradingParams) {
        self.color_grading = params;
    }

    pub fn set_tonemap(&mut self, params: TonemapParams) {
        self.tonemap = params;
    }

    pub fn set_bloom(&mut self, params: BloomParams) {
        self.bloom = params;
    }

    pub fn set_bloom_intensity(&mut self, intensity: f32) {
        self.bloom.intensity = intensity;
    }

    pub fn set_depth_of_field(&mut self, params: DepthOfFieldParams) {
        self.depth_of_field = params;
    }

    pub fn set_auto_exposure(&mut self, params: AutoExposureParams) {
        self.auto_exposure = params;
    }

    pub fn set_motion_blur(&mut self, params: MotionBlurParams) {
        self.motion_blur = params;
    }

    /// Étalonnage neutre et active l'effet.
    pub fn set_grading_ue_default(&mut self) {
        self.color_grading = ColorGradingParams::NEUTRAL;
        self.active.enable(Effect::ColorGrading);
    }

    /// Remplace les effets actifs et les paramètres couverts par le preset.
    ///
    /// Auto-exposure et motion blur gardent leurs paramètres courants.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.active = preset.active;
        self.vignette = preset.vignette;
        self.grain = preset.grain;
        self.exposure = preset.exposure;
        self.chromatic_aberration = preset.chromatic_aberration;
        self.white_balance = preset.white_balance;
        self.color_grading = preset.color_grading;
        self.tonemap = preset.tonemap;
        self.bloom = preset.bloom;
        self.depth_of_field = preset.depth_of_field;
    }

    /// Applique un preset intégré par nom.
    ///
    /// # Errors
    /// Returns `CoreError::UnknownPreset` if the name is not registered.
    pub fn apply_preset_named(&mut self, name: &str) -> Result<(), CoreError> {
        let preset = Preset::by_name(name)?;
        self.apply_preset(&preset);
        log::info!("Preset appliqué : {name}");
        Ok(())
    }

    #[must_use]
    pub fn vignette(&self) -> &VignetteParams {
        &self.vignette
    }

    #[must_use]
    pub fn grain(&self) -> &GrainParams {
        &self.grain
    }

    #[must_use]
    pub fn chromatic_aberration(&self) -> &ChromaticAberrationParams {
        &self.chromatic_aberration
    }

    #[must_use]
    pub fn white_balance(&self) -> &WhiteBalanceParams {
        &self.white_balance
    }

    #[must_use]
    pub fn color_grading(&self) -> &ColorGradingParams {
        &self.color_grading
    }

    #[must_use]
    pub fn tonemap(&self) -> &TonemapParams {
        &self.tonemap
    }

    #[must_use]
    pub fn bloom(&self) -> &BloomParams {
        &self.bloom
    }

    #[must_use]
    pub fn depth_of_field(&self) -> &DepthOfFieldParams {
        &self.depth_of_field
    }

    #[must_use]
    pub fn auto_exposure(&self) -> &AutoExposureParams {
        &self.auto_exposure
    }

    #[must_use]
    pub fn motion_blur(&self) -> &MotionBlurParams {
        &self.motion_blur
    }

    // === Temps et exposition ===

    /// Avance l'horloge des effets animés (grain).
    pub fn update_time(&mut self, dt: f32) {
        self.time += dt;
        self.delta_time = dt;
    }

    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Ajuste l'exposition manuelle, sans descendre sous `MIN_EXPOSURE`.
    pub fn adjust_exposure(&mut self, step: f32) -> f32 {
        self.exposure.exposure = (self.exposure.exposure + step).max(MIN_EXPOSURE);
        self.exposure.exposure
    }

    #[must_use]
    pub fn manual_exposure(&self) -> f32 {
        self.exposure.exposure
    }

    /// Exposition effective : adaptée si l'auto-exposure est active.
    #[must_use]
    pub fn current_exposure(&self) -> f32 {
        if self.active.contains(Effect::AutoExposure) {
            self.adapter.exposure()
        } else {
            self.exposure.exposure
        }
    }

    /// Planifie les passes de la frame. Fait avancer l'adaptation si active.
    pub fn end_frame(&mut self, scene_luminance: f32) -> FramePlan {
        let mut passes = Vec::with_capacity(5);

        if self.active.contains(Effect::Bloom) {
            passes.push(Pass::Bloom);
        }
        if self.active.contains(Effect::DepthOfField)
            || self.active.contains(Effect::DepthOfFieldDebug)
        {
            passes.push(Pass::DepthOfField);
        }
        if self.active.contains(Effect::AutoExposure) {
            self.adapter
                .adapt(scene_luminance, self.delta_time, &self.auto_exposure);
            passes.push(Pass::AutoExposure);
        }
        if self.active.contains(Effect::MotionBlur) {
            passes.push(Pass::MotionBlur);
        }
        passes.push(Pass::Composite);

        FramePlan {
            passes,
            active: self.active,
            exposure: self.current_exposure(),
            time: self.time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> PostProcess {
        match PostProcess::new(1920, 1080) {
            Ok(p) => p,
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn new_has_no_active_effect() {
        let p = post();
        assert!(p.active().is_empty());
        assert_eq!(p.size(), (1920, 1080));
        assert_eq!(p.color_grading(), &ColorGradingParams::NEUTRAL);
        assert!((p.manual_exposure() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            PostProcess::new(0, 720),
            Err(CoreError::InvalidDimensions { width: 0, height: 720 })
        ));
        let mut p = post();
        assert!(p.resize(640, 0).is_err());
        assert_eq!(p.size(), (1920, 1080));
    }

    #[test]
    fn bloom_chain_halves_down_to_one() {
        let p = post();
        assert_eq!(
            p.bloom_mips(),
            &[(960, 540), (480, 270), (240, 135), (120, 67), (60, 33)]
        );

        let Ok(tiny) = PostProcess::new(4, 3) else {
            panic!("4×3 is valid");
        };
        assert_eq!(tiny.bloom_mips(), &[(2, 1), (1, 1), (1, 1), (1, 1), (1, 1)]);
    }

    #[test]
    fn resize_same_size_is_noop() {
        let mut p = post();
        let before = p.bloom_mips().to_vec();
        assert!(p.resize(1920, 1080).is_ok());
        assert_eq!(p.bloom_mips(), before.as_slice());

        assert!(p.resize(800, 600).is_ok());
        assert_eq!(p.bloom_mips()[0], (400, 300));
    }

    #[test]
    fn exposure_has_a_floor() {
        let mut p = post();
        for _ in 0..20 {
            p.adjust_exposure(-0.1);
        }
        assert!((p.manual_exposure() - MIN_EXPOSURE).abs() < f32::EPSILON);
        assert!((p.adjust_exposure(0.5) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn ue_default_enables_grading() {
        let mut p = post();
        p.set_color_grading(ColorGradingParams {
            saturation: 0.0,
            ..ColorGradingParams::NEUTRAL
        });
        p.set_grading_ue_default();
        assert!(p.is_enabled(Effect::ColorGrading));
        assert_eq!(p.color_grading(), &ColorGradingParams::NEUTRAL);
    }

    #[test]
    fn preset_replaces_effects_and_params() {
        let mut p = post();
        p.enable(Effect::MotionBlur);
        assert!(p.apply_preset_named("vintage").is_ok());
        assert!(!p.is_enabled(Effect::MotionBlur));
        assert!(p.is_enabled(Effect::Grain));
        assert!((p.grain().intensity - 0.06).abs() < f32::EPSILON);
        assert!((p.manual_exposure() - 0.9).abs() < f32::EPSILON);

        assert!(p.apply_preset_named("sepia").is_err());
        assert!(p.is_enabled(Effect::Grain));
    }

    #[test]
    fn pass_order_is_fixed() {
        let mut p = post();
        for effect in [
            Effect::MotionBlur,
            Effect::AutoExposure,
            Effect::DepthOfFieldDebug,
            Effect::Bloom,
            Effect::Vignette,
        ] {
            p.enable(effect);
        }
        p.update_time(0.016);
        let plan = p.end_frame(0.18);
        assert_eq!(
            plan.passes,
            [
                Pass::Bloom,
                Pass::DepthOfField,
                Pass::AutoExposure,
                Pass::MotionBlur,
                Pass::Composite
            ]
        );
        assert_eq!(plan.active, p.active());
    }

    #[test]
    fn composite_always_runs() {
        let mut p = post();
        assert_eq!(p.end_frame(1.0).passes, [Pass::Composite]);
    }

    #[test]
    fn auto_exposure_drives_current_exposure() {
        let mut p = post();
        p.set_exposure(3.0);
        assert!((p.current_exposure() - 3.0).abs() < f32::EPSILON);

        p.enable(Effect::AutoExposure);
        assert!((p.current_exposure() - 1.2).abs() < f32::EPSILON);

        for _ in 0..600 {
            p.update_time(1.0 / 60.0);
            p.end_frame(0.1);
        }
        assert!((p.current_exposure() - 2.0).abs() < 1e-3);
        assert!((p.time() - 10.0).abs() < 1e-3);

        p.disable(Effect::AutoExposure);
        assert!((p.current_exposure() - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn adapter_holds_still_while_disabled() {
        let mut p = post();
        p.update_time(0.5);
        p.end_frame(0.01);
        p.enable(Effect::AutoExposure);
        assert!((p.current_exposure() - 1.2).abs() < f32::EPSILON);
    }
}
