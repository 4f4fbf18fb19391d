use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arc_swap::ArcSwap;
use lm_core::clock::FrameClock;
use lm_core::config::AppConfig;
use lm_metrics::timer::{PerfTimer, measure};

use crate::probe::{FrameProbe, WindowReport};
use crate::synthetic::{SyntheticFrames, scene_luminance};

/// Boucle sans attente sur des frame times simulés.
///
/// S'arrête après `windows` bilans ou quand `stop` passe à `true`.
/// Retourne le nombre de fenêtres terminées.
pub fn run_synthetic(
    probe: &mut FrameProbe,
    frames: &mut SyntheticFrames,
    windows: usize,
    stop: &AtomicBool,
    mut on_report: impl FnMut(&WindowReport),
) -> usize {
    let mut clock = FrameClock::new();
    let mut done = 0;
    while done < windows && !stop.load(Ordering::Relaxed) {
        let dt = frames.next_dt();
        let (_, now) = clock.advance(dt);
        if let Some(report) = probe.frame(dt, now, scene_luminance(now)) {
            on_report(&report);
            done += 1;
        }
    }
    log::debug!("{} frames synthétiques", clock.frame_count());
    done
}

/// Boucle temps réel cadencée sur `display.target_fps`.
///
/// Relit `config` à chaque frame : une nouvelle version publiée par le
/// hot-reload est appliquée à la sonde. Une config rejetée est loguée et
/// l'état précédent conservé.
pub fn run_realtime(
    probe: &mut FrameProbe,
    config: &Arc<ArcSwap<AppConfig>>,
    windows: usize,
    stop: &AtomicBool,
    mut on_report: impl FnMut(&WindowReport),
) -> usize {
    let mut clock = FrameClock::new();
    // Ancrage : le premier tick a un delta nul.
    clock.tick();

    let mut seen = config.load_full();
    let mut done = 0;
    while done < windows && !stop.load(Ordering::Relaxed) {
        let work = PerfTimer::start();

        let current = config.load_full();
        if !Arc::ptr_eq(&current, &seen) {
            if let Err(e) = probe.apply_config(&current) {
                log::warn!("Config rechargée ignorée : {e}");
            }
            seen = current;
        }

        let budget = 1.0 / f64::from(seen.display.target_fps.max(1));
        let idle = budget - work.elapsed_s();
        if idle > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(idle));
        }

        let (dt, now) = clock.tick();
        let report = measure("probe.frame", || {
            probe.frame(f64::from(dt), now, scene_luminance(now))
        });
        if let Some(report) = report {
            on_report(&report);
            done += 1;
        }
    }
    done
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.sampler.window_duration = 0.2;
        config.sampler.target_samples = 10;
        config.display.target_fps = 200;
        config
    }

    #[test]
    fn synthetic_stops_after_requested_windows() {
        let config = AppConfig::default();
        let Ok(mut probe) = FrameProbe::new(&config, Some(5)) else {
            panic!("probe");
        };
        let mut frames = SyntheticFrames::new(16.6, 0.1, Some(5));
        let stop = AtomicBool::new(false);
        let mut seen = Vec::new();
        let done = run_synthetic(&mut probe, &mut frames, 3, &stop, |r| seen.push(r.index));
        assert_eq!(done, 3);
        assert_eq!(seen, [0, 1, 2]);
    }

    #[test]
    fn stop_flag_short_circuits() {
        let Ok(mut probe) = FrameProbe::new(&AppConfig::default(), None) else {
            panic!("probe");
        };
        let mut frames = SyntheticFrames::new(16.6, 0.0, None);
        let stop = AtomicBool::new(true);
        assert_eq!(run_synthetic(&mut probe, &mut frames, 10, &stop, |_| {}), 0);
    }

    #[test]
    fn realtime_paces_and_reports() {
        let config = fast_config();
        let Ok(mut probe) = FrameProbe::new(&config, Some(11)) else {
            panic!("probe");
        };
        let shared = Arc::new(ArcSwap::from_pointee(config));
        let stop = AtomicBool::new(false);
        let mut reports = Vec::new();
        let done = run_realtime(&mut probe, &shared, 1, &stop, |r| reports.push(r.clone()));
        assert_eq!(done, 1);
        assert!(reports[0].sample_count > 0);
        // cadence plafonnée à 200 FPS
        assert!(reports[0].average_fps < 260.0, "{}", reports[0].average_fps);
    }

    #[test]
    fn realtime_picks_up_published_config() {
        let config = fast_config();
        let Ok(mut probe) = FrameProbe::new(&config, Some(12)) else {
            panic!("probe");
        };
        let mut reloaded = config.clone();
        reloaded.postfx.preset = "vintage".into();
        let shared = Arc::new(ArcSwap::from_pointee(config));
        let publisher = Arc::clone(&shared);

        let stop = AtomicBool::new(false);
        let done = run_realtime(&mut probe, &shared, 2, &stop, |r| {
            if r.index == 0 {
                publisher.store(Arc::new(reloaded.clone()));
            }
        });
        assert_eq!(done, 2);
        assert!(probe.post().is_enabled(lm_postfx::effects::Effect::Grain));
    }
}
