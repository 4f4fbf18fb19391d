use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration complète de l'application, hot-rechargeable.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use lm_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.sampler.target_samples, 100);
/// assert_eq!(config.postfx.preset, "default");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    /// Fenêtre d'échantillonnage adaptatif des frame times.
    pub sampler: SamplerConfig,
    /// Compteur FPS lissé (EMA).
    pub fps: FpsConfig,
    /// Surface de rendu et cadence cible.
    pub display: DisplayConfig,
    /// Post-processing : preset et overrides.
    pub postfx: PostFxConfig,
}

/// Adaptive sampler settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SamplerConfig {
    /// Durée de la fenêtre de mesure en secondes.
    pub window_duration: f32,
    /// Nombre d'échantillons visés sur la fenêtre.
    pub target_samples: usize,
    /// Estimation initiale du FPS (< 1.0 → 60).
    pub initial_fps_guess: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            window_duration: 5.0,
            target_samples: 100,
            initial_fps_guess: 60.0,
        }
    }
}

/// Smoothed FPS counter settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FpsConfig {
    /// Facteur de décroissance EMA [0.0, 1.0]. 0.95 = très lissé.
    pub decay: f32,
    /// Intervalle entre deux logs FPS, en secondes.
    pub log_interval: f64,
    /// Active le log périodique.
    pub log_enabled: bool,
}

impl Default for FpsConfig {
    fn default() -> Self {
        Self {
            decay: 0.95,
            log_interval: 5.0,
            log_enabled: false,
        }
    }
}

/// Display surface and pacing.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// FPS cible de la boucle temps réel.
    pub target_fps: u32,
    /// Largeur (en colonnes) de la timeline ASCII.
    pub plot_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            target_fps: 60,
            plot_width: 60,
        }
    }
}

/// Post-processing selection.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PostFxConfig {
    /// Nom du preset : "default", "subtle", "cinematic", "vintage", "matrix", "bw_contrast".
    pub preset: String,
    /// Override de l'exposition manuelle.
    #[serde(default)]
    pub exposure: Option<f32>,
    /// Override de l'intensité du bloom.
    #[serde(default)]
    pub bloom_intensity: Option<f32>,
    /// Active l'adaptation automatique de l'exposition.
    #[serde(default)]
    pub auto_exposure: bool,
}

impl Default for PostFxConfig {
    fn default() -> Self {
        Self {
            preset: "default".into(),
            exposure: None,
            bloom_intensity: None,
            auto_exposure: false,
        }
    }
}

impl AppConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    /// Non-finite values fall back to their defaults first.
    pub fn clamp_all(&mut self) {
        let defaults = Self::default();
        if !self.sampler.window_duration.is_finite() {
            self.sampler.window_duration = defaults.sampler.window_duration;
        }
        if !self.sampler.initial_fps_guess.is_finite() {
            self.sampler.initial_fps_guess = defaults.sampler.initial_fps_guess;
        }
        if self.fps.decay.is_nan() {
            self.fps.decay = defaults.fps.decay;
        }
        if !self.fps.log_interval.is_finite() {
            self.fps.log_interval = defaults.fps.log_interval;
        }

        self.sampler.window_duration = self.sampler.window_duration.max(0.1);
        self.sampler.target_samples = self.sampler.target_samples.max(1);
        self.fps.decay = self.fps.decay.clamp(0.0, 1.0);
        self.fps.log_interval = self.fps.log_interval.max(0.0);
        self.display.width = self.display.width.max(1);
        self.display.height = self.display.height.max(1);
        self.display.target_fps = self.display.target_fps.clamp(1, 1000);
        self.display.plot_width = self.display.plot_width.clamp(8, 200);
        if let Some(v) = self.postfx.exposure.as_mut() {
            *v = v.max(0.1);
        }
        if let Some(v) = self.postfx.bloom_intensity.as_mut() {
            *v = v.max(0.0);
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    sampler: Option<SamplerSection>,
    fps: Option<FpsSection>,
    display: Option<DisplaySection>,
    postfx: Option<PostFxSection>,
}

#[derive(Deserialize)]
struct SamplerSection {
    window_duration: Option<f32>,
    target_samples: Option<usize>,
    initial_fps_guess: Option<f32>,
}

#[derive(Deserialize)]
struct FpsSection {
    decay: Option<f32>,
    log_interval: Option<f64>,
    log_enabled: Option<bool>,
}

#[derive(Deserialize)]
struct DisplaySection {
    width: Option<u32>,
    height: Option<u32>,
    target_fps: Option<u32>,
    plot_width: Option<usize>,
}

#[derive(Deserialize)]
struct PostFxSection {
    preset: Option<String>,
    exposure: Option<f32>,
    bloom_intensity: Option<f32>,
    auto_exposure: Option<bool>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use lm_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse une config TOML depuis une chaîne (mêmes règles de fusion que `load_config`).
///
/// # Errors
/// Returns `CoreError::Config` if the TOML is malformed or has mistyped fields.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;

    let mut config = AppConfig::default();

    if let Some(s) = file.sampler {
        if let Some(v) = s.window_duration {
            config.sampler.window_duration = v;
        }
        if let Some(v) = s.target_samples {
            config.sampler.target_samples = v;
        }
        if let Some(v) = s.initial_fps_guess {
            config.sampler.initial_fps_guess = v;
        }
    }

    if let Some(f) = file.fps {
        if let Some(v) = f.decay {
            config.fps.decay = v;
        }
        if let Some(v) = f.log_interval {
            config.fps.log_interval = v;
        }
        if let Some(v) = f.log_enabled {
            config.fps.log_enabled = v;
        }
    }

    if let Some(d) = file.display {
        if let Some(v) = d.width {
            config.display.width = v;
        }
        if let Some(v) = d.height {
            config.display.height = v;
        }
        if let Some(v) = d.target_fps {
            config.display.target_fps = v;
        }
        if let Some(v) = d.plot_width {
            config.display.plot_width = v;
        }
    }

    if let Some(p) = file.postfx {
        if let Some(v) = p.preset {
            config.postfx.preset = v;
        }
        if p.exposure.is_some() {
            config.postfx.exposure = p.exposure;
        }
        if p.bloom_intensity.is_some() {
            config.postfx.bloom_intensity = p.bloom_intensity;
        }
        if let Some(v) = p.auto_exposure {
            config.postfx.auto_exposure = v;
        }
    }

    config.clamp_all();
    log::debug!("Config chargée : {config:?}");
    Ok(config)
}
