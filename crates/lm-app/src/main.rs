use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use clap::Parser;
use lm_app::cli::Cli;
use lm_app::probe::{FrameProbe, WindowReport};
use lm_app::synthetic::SyntheticFrames;
use lm_app::{hotreload, logging, runner};
use lm_core::config::{AppConfig, load_config};

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    logging::init(&cli.log_level);

    // 3. Valider les arguments
    cli.validate()?;

    // 4. Charger la config et appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    log::info!(
        "Fenêtre {:.1}s, cible {} échantillons, preset {}",
        config.sampler.window_duration,
        config.sampler.target_samples,
        config.postfx.preset
    );

    // 5. Construire la sonde
    let mut probe = FrameProbe::new(&config, cli.seed).context("Initialisation de la sonde")?;

    // 6. Ctrl-C : arrêt propre entre deux frames
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("Installation du handler Ctrl-C")?;
    }

    let print = |report: &WindowReport| println!("{report}\n");

    // 7. Boucle principale
    let done = if cli.synthetic {
        let mut frames = SyntheticFrames::new(cli.frame_time_ms, cli.jitter, cli.seed);
        runner::run_synthetic(&mut probe, &mut frames, cli.windows, &stop, print)
    } else {
        let shared = Arc::new(ArcSwap::from_pointee(config));
        let _watcher = if cli.config.exists() {
            let overrides = cli.clone();
            Some(hotreload::spawn_config_watcher(
                &cli.config,
                &shared,
                move |c| overrides.apply_overrides(c),
            )?)
        } else {
            None
        };
        runner::run_realtime(&mut probe, &shared, cli.windows, &stop, print)
    };

    if done < cli.windows {
        log::warn!("Interrompu après {done}/{} fenêtres", cli.windows);
    }
    Ok(())
}

/// Fichier de config s'il existe, sinon les défauts.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    if cli.config.exists() {
        load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(AppConfig::default())
    }
}
