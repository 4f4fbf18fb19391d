use std::path::PathBuf;

use clap::Parser;
use lm_core::config::AppConfig;

/// lumen — Frame-time probe with adaptive sampling and post-processing state.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Preset de post-processing : default, subtle, cinematic, vintage, matrix, bw_contrast.
    #[arg(long)]
    pub preset: Option<String>,

    /// Durée d'une fenêtre de mesure, en secondes.
    #[arg(long)]
    pub window: Option<f32>,

    /// Nombre d'échantillons visés par fenêtre.
    #[arg(long)]
    pub target: Option<usize>,

    /// Estimation initiale du FPS.
    #[arg(long)]
    pub fps_guess: Option<f32>,

    /// Nombre de fenêtres à mesurer avant de quitter.
    #[arg(long, default_value_t = 1)]
    pub windows: usize,

    /// Frame times simulés, sans attente réelle.
    #[arg(long, default_value_t = false)]
    pub synthetic: bool,

    /// Seed du PRNG (sampler et jitter synthétique). Défaut : entropie.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Temps de frame de base en mode synthétique (ms).
    #[arg(long, default_value_t = 16.6)]
    pub frame_time_ms: f64,

    /// Jitter relatif du mode synthétique [0.0, 1.0).
    #[arg(long, default_value_t = 0.1)]
    pub jitter: f64,

    /// Largeur de la timeline ASCII.
    #[arg(long)]
    pub plot_width: Option<usize>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Rejette les valeurs qui rendraient la mesure impossible.
    ///
    /// # Errors
    /// Returns an error if the window, target, window count or synthetic
    /// timing is not strictly usable.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(w) = self.window {
            if !w.is_finite() || w <= 0.0 {
                anyhow::bail!("--window doit être fini et > 0 (reçu {w})");
            }
        }
        if let Some(g) = self.fps_guess {
            if !g.is_finite() {
                anyhow::bail!("--fps-guess doit être fini (reçu {g})");
            }
        }
        if self.target == Some(0) {
            anyhow::bail!("--target doit être > 0");
        }
        if self.windows == 0 {
            anyhow::bail!("--windows doit être > 0");
        }
        if self.synthetic {
            if !self.frame_time_ms.is_finite() || self.frame_time_ms <= 0.0 {
                anyhow::bail!(
                    "--frame-time-ms doit être fini et > 0 (reçu {})",
                    self.frame_time_ms
                );
            }
            if !(0.0..1.0).contains(&self.jitter) {
                anyhow::bail!("--jitter doit être dans [0, 1) (reçu {})", self.jitter);
            }
        }
        Ok(())
    }

    /// Applique les overrides CLI sur une config chargée.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ref name) = self.preset {
            config.postfx.preset.clone_from(name);
        }
        if let Some(w) = self.window {
            config.sampler.window_duration = w;
        }
        if let Some(t) = self.target {
            config.sampler.target_samples = t;
        }
        if let Some(g) = self.fps_guess {
            config.sampler.initial_fps_guess = g;
        }
        if let Some(p) = self.plot_width {
            config.display.plot_width = p;
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("lumen").chain(args.iter().copied());
        match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
        assert_eq!(cli.windows, 1);
        assert!(!cli.synthetic);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(parse(&["--window", "0"]).validate().is_err());
        assert!(parse(&["--window=-2.5"]).validate().is_err());
        assert!(parse(&["--target", "0"]).validate().is_err());
        assert!(parse(&["--windows", "0"]).validate().is_err());
        assert!(parse(&["--synthetic", "--jitter", "1.5"]).validate().is_err());
        assert!(parse(&["--synthetic", "--frame-time-ms", "0"]).validate().is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(parse(&["--window", "inf"]).validate().is_err());
        assert!(parse(&["--window", "NaN"]).validate().is_err());
        assert!(parse(&["--fps-guess", "inf"]).validate().is_err());
        assert!(parse(&["--synthetic", "--frame-time-ms", "inf"]).validate().is_err());
        assert!(parse(&["--synthetic", "--jitter", "NaN"]).validate().is_err());
        assert!(parse(&["--fps-guess", "0"]).validate().is_ok());
    }

    #[test]
    fn overrides_land_in_config() {
        let cli = parse(&[
            "--preset", "vintage", "--window", "2", "--target", "40", "--plot-width", "500",
        ]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.postfx.preset, "vintage");
        assert!((config.sampler.window_duration - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.sampler.target_samples, 40);
        assert_eq!(config.display.plot_width, 200);
    }
}
