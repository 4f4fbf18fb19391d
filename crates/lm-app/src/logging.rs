use std::io::Write;

use log::LevelFilter;

/// Initialise env_logger : `<horodatage ms UTC> - <target> - <LEVEL> - <message>`.
///
/// Un niveau illisible retombe sur `warn`. Sans effet si un logger est déjà installé.
pub fn init(level: &str) {
    let filter = level.parse().unwrap_or(LevelFilter::Warn);
    let installed = env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {:<5} - {}",
                buf.timestamp_millis(),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .try_init();
    if installed.is_err() {
        log::debug!("Logger déjà initialisé");
    }
}
