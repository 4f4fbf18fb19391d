use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use lm_core::config::AppConfig;
use notify::{Event, EventKind, RecursiveMode, Watcher};

/// Surveille le fichier config et publie chaque version valide dans l'ArcSwap.
///
/// `adjust` est appliqué à chaque config rechargée (overrides CLI).
/// Retourne le Watcher (doit rester vivant tant que l'app tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use arc_swap::ArcSwap;
/// use lm_core::config::AppConfig;
/// use lm_app::hotreload::spawn_config_watcher;
/// use std::path::Path;
///
/// let config = Arc::new(ArcSwap::from_pointee(AppConfig::default()));
/// let _watcher = spawn_config_watcher(Path::new("config/default.toml"), &config, |_| {});
/// ```
pub fn spawn_config_watcher<F>(
    config_path: &Path,
    config: &Arc<ArcSwap<AppConfig>>,
    adjust: F,
) -> Result<impl Watcher + use<F>>
where
    F: Fn(&mut AppConfig) + Send + 'static,
{
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let Ok(event) = res else { return };
        if !matches!(event.kind, EventKind::Modify(_)) {
            return;
        }
        match lm_core::config::load_config(&path) {
            Ok(mut new_config) => {
                adjust(&mut new_config);
                config.store(Arc::new(new_config));
                log::info!("Config rechargée depuis {}", path.display());
            }
            Err(e) => {
                // On garde l'ancienne config.
                log::warn!("Erreur de rechargement config : {e:#}");
            }
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
