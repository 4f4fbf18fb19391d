use std::fmt;

use lm_core::CoreError;
use lm_core::config::{AppConfig, PostFxConfig, SamplerConfig};
use lm_metrics::fps::FpsCounter;
use lm_metrics::sampler::AdaptiveSampler;
use lm_postfx::effects::Effect;
use lm_postfx::pipeline::{FramePlan, PostProcess};

/// Bilan d'une fenêtre de mesure terminée.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowReport {
    /// Rang de la fenêtre, à partir de 0.
    pub index: usize,
    /// Moyenne des FPS instantanés échantillonnés.
    pub average_fps: f32,
    pub sample_count: usize,
    /// Timeline ASCII, référencée sur `average_fps`.
    pub plot: String,
}

impl fmt::Display for WindowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Fenêtre {} : {:.1} FPS moyen ({} échantillons)",
            self.index, self.average_fps, self.sample_count
        )?;
        write!(f, "{}", self.plot)
    }
}

/// Orchestration par frame : compteur FPS, post-processing, échantillonnage.
///
/// # Example
/// ```
/// use lm_app::probe::FrameProbe;
/// use lm_core::config::AppConfig;
///
/// let mut config = AppConfig::default();
/// config.sampler.window_duration = 0.5;
/// let mut probe = FrameProbe::new(&config, Some(1)).unwrap();
/// let mut now = 0.0;
/// let report = loop {
///     now += 0.02;
///     if let Some(r) = probe.frame(0.02, now, 0.18) {
///         break r;
///     }
/// };
/// assert_eq!(report.index, 0);
/// assert!(report.sample_count > 0);
/// ```
#[derive(Debug)]
pub struct FrameProbe {
    sampler: AdaptiveSampler,
    sampler_config: SamplerConfig,
    pending_sampler: Option<SamplerConfig>,
    fps: FpsCounter,
    post: PostProcess,
    postfx_config: PostFxConfig,
    last_plan: Option<FramePlan>,
    plot_width: usize,
    seed: Option<u64>,
    windows_done: usize,
}

fn build_sampler(config: &SamplerConfig, seed: Option<u64>) -> AdaptiveSampler {
    match seed {
        Some(seed) => AdaptiveSampler::with_seed(
            config.window_duration,
            config.target_samples,
            config.initial_fps_guess,
            seed,
        ),
        None => AdaptiveSampler::new(
            config.window_duration,
            config.target_samples,
            config.initial_fps_guess,
        ),
    }
}

fn build_fps(config: &AppConfig) -> FpsCounter {
    FpsCounter::new(config.fps.decay, config.fps.log_interval).with_logging(config.fps.log_enabled)
}

/// Preset puis overrides de la section `[postfx]`.
fn configure_postfx(post: &mut PostProcess, config: &PostFxConfig) -> Result<(), CoreError> {
    post.apply_preset_named(&config.preset)?;
    if let Some(exposure) = config.exposure {
        post.set_exposure(exposure);
    }
    if let Some(intensity) = config.bloom_intensity {
        post.set_bloom_intensity(intensity);
        if intensity > 0.0 {
            post.enable(Effect::Bloom);
        }
    }
    if config.auto_exposure {
        post.enable(Effect::AutoExposure);
    }
    Ok(())
}

impl FrameProbe {
    /// `seed` rend l'échantillonnage reproductible ; `None` seed par entropie.
    ///
    /// # Errors
    /// Returns an error if the preset is unknown or the display size is zero.
    pub fn new(config: &AppConfig, seed: Option<u64>) -> Result<Self, CoreError> {
        let mut post = PostProcess::new(config.display.width, config.display.height)?;
        configure_postfx(&mut post, &config.postfx)?;

        Ok(Self {
            sampler: build_sampler(&config.sampler, seed),
            sampler_config: config.sampler.clone(),
            pending_sampler: None,
            fps: build_fps(config),
            post,
            postfx_config: config.postfx.clone(),
            last_plan: None,
            plot_width: config.display.plot_width,
            seed,
            windows_done: 0,
        })
    }

    /// Appeler une fois par frame avec le dt mesuré et l'horloge courante.
    ///
    /// Retourne le bilan quand la fenêtre en cours vient de s'achever ; la
    /// suivante démarre alors à `now`.
    pub fn frame(&mut self, dt: f64, now: f64, scene_luminance: f32) -> Option<WindowReport> {
        self.fps.update(dt, now);
        self.post.update_time(dt as f32);
        self.last_plan = Some(self.post.end_frame(scene_luminance));
        self.sampler.should_sample(dt as f32, now);

        if !self.sampler.is_finished(now) {
            return None;
        }

        let average_fps = self.sampler.average();
        let report = WindowReport {
            index: self.windows_done,
            average_fps,
            sample_count: self.sampler.sample_count(),
            plot: self.sampler.ascii_plot(self.plot_width, average_fps),
        };
        log::info!(
            "Fenêtre {} terminée : {} échantillons, {:.1} FPS",
            report.index,
            report.sample_count,
            report.average_fps
        );
        self.windows_done += 1;

        if let Some(config) = self.pending_sampler.take() {
            let seed = self.seed.map(|s| s.wrapping_add(self.windows_done as u64));
            self.sampler = build_sampler(&config, seed);
            self.sampler_config = config;
            log::debug!("Sampler reconfiguré : {:?}", self.sampler_config);
        }
        self.sampler.reset(now);
        Some(report)
    }

    /// Prend en compte une config rechargée.
    ///
    /// FPS, affichage et post-processing changent immédiatement ; les
    /// réglages du sampler attendent la fin de la fenêtre en cours.
    ///
    /// # Errors
    /// Returns an error if the new preset is unknown or the size is zero.
    /// The probe keeps its previous post-processing state in that case.
    pub fn apply_config(&mut self, config: &AppConfig) -> Result<(), CoreError> {
        if config.postfx != self.postfx_config {
            let mut post = self.post.clone();
            configure_postfx(&mut post, &config.postfx)?;
            self.post = post;
            self.postfx_config = config.postfx.clone();
        }
        self.post
            .resize(config.display.width, config.display.height)?;

        self.fps = build_fps(config);
        self.plot_width = config.display.plot_width;

        if config.sampler != self.sampler_config {
            self.pending_sampler = Some(config.sampler.clone());
        }
        Ok(())
    }

    #[must_use]
    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    #[must_use]
    pub fn sampler(&self) -> &AdaptiveSampler {
        &self.sampler
    }

    #[must_use]
    pub fn post(&self) -> &PostProcess {
        &self.post
    }

    /// Passes planifiées à la dernière frame.
    #[must_use]
    pub fn last_plan(&self) -> Option<&FramePlan> {
        self.last_plan.as_ref()
    }

    #[must_use]
    pub fn windows_done(&self) -> usize {
        self.windows_done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lm_postfx::pipeline::Pass;

    fn probe(config: &AppConfig) -> FrameProbe {
        match FrameProbe::new(config, Some(42)) {
            Ok(p) => p,
            Err(e) => panic!("{e}"),
        }
    }

    fn short_window() -> AppConfig {
        let mut config = AppConfig::default();
        config.sampler.window_duration = 1.0;
        config.sampler.target_samples = 20;
        config
    }

    /// Avance jusqu'au prochain bilan.
    fn run_window(probe: &mut FrameProbe, now: &mut f64, dt: f64) -> WindowReport {
        for _ in 0..10_000 {
            *now += dt;
            if let Some(r) = probe.frame(dt, *now, 0.18) {
                return r;
            }
        }
        panic!("window never finished");
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let mut config = AppConfig::default();
        config.postfx.preset = "sepia".into();
        assert!(matches!(
            FrameProbe::new(&config, None),
            Err(CoreError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn postfx_overrides_apply() {
        let mut config = AppConfig::default();
        config.postfx.exposure = Some(2.5);
        config.postfx.bloom_intensity = Some(0.4);
        config.postfx.auto_exposure = true;
        let p = probe(&config);
        assert!(p.post().is_enabled(Effect::Bloom));
        assert!(p.post().is_enabled(Effect::AutoExposure));
        assert!((p.post().manual_exposure() - 2.5).abs() < f32::EPSILON);
        assert!((p.post().bloom().intensity - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn windows_are_numbered_and_chained() {
        let mut p = probe(&short_window());
        let mut now = 0.0;
        let first = run_window(&mut p, &mut now, 0.01);
        let second = run_window(&mut p, &mut now, 0.01);
        assert_eq!((first.index, second.index), (0, 1));
        assert_eq!(p.windows_done(), 2);
        assert!(first.sample_count <= 20 && first.sample_count > 0);
        assert!((first.average_fps - 100.0).abs() < 0.5);
        assert!(first.plot.starts_with("[0s"));
        assert_eq!(p.sampler().window_start(), Some(now));
    }

    #[test]
    fn every_frame_plans_composite() {
        let mut p = probe(&AppConfig::default());
        assert!(p.last_plan().is_none());
        p.frame(0.016, 0.016, 0.18);
        let Some(plan) = p.last_plan() else {
            panic!("plan missing");
        };
        assert_eq!(plan.passes.last(), Some(&Pass::Composite));
        assert!(p.fps().fps() > 0.0);
    }

    #[test]
    fn sampler_changes_wait_for_next_window() {
        let mut p = probe(&short_window());
        let mut now = 0.0;
        p.frame(0.01, 0.01, 0.18);
        now += 0.01;

        let mut reloaded = short_window();
        reloaded.sampler.target_samples = 5;
        reloaded.display.plot_width = 30;
        assert!(p.apply_config(&reloaded).is_ok());
        assert_eq!(p.sampler().target_samples(), 20);

        run_window(&mut p, &mut now, 0.01);
        assert_eq!(p.sampler().target_samples(), 5);
        let next = run_window(&mut p, &mut now, 0.01);
        assert!(next.sample_count <= 5);
        assert_eq!(next.plot.lines().nth(1).map(str::len), Some(32));
    }

    #[test]
    fn bad_reload_keeps_postfx() {
        let mut p = probe(&AppConfig::default());
        let mut reloaded = AppConfig::default();
        reloaded.postfx.preset = "nope".into();
        assert!(p.apply_config(&reloaded).is_err());
        assert!(p.post().is_enabled(Effect::ColorGrading));

        reloaded.postfx.preset = "matrix".into();
        assert!(p.apply_config(&reloaded).is_ok());
        assert!(!p.post().is_enabled(Effect::Exposure));
    }
}
