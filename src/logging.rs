//! Logger setup.

use log::LevelFilter;

/// Environment variable overriding the configured log level.
pub const LOG_ENV: &str = "LEARNGL_LOG";

/// Picks the effective level: a valid `LEARNGL_LOG` value wins over the configured one.
pub fn resolve_level(env: Option<&str>, configured: Option<LevelFilter>) -> LevelFilter {
    env.and_then(|value| value.trim().parse().ok())
        .or(configured)
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger writing to stdout.
pub fn init(configured: Option<LevelFilter>) -> Result<LevelFilter, String> {
    let env = std::env::var(LOG_ENV).ok();
    let level = resolve_level(env.as_deref(), configured);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
        .map_err(|e| e.to_string())?;

    Ok(level)
}
