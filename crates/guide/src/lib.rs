//! Walking Guide Process
//!
//! Process-level plumbing around the fusion engine: logging, layered
//! configuration and the bench collaborators used when no hardware is
//! attached.

pub mod demo;

use fusion::GuideConfig;
use std::path::Path;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment prefix for configuration overrides (`GUIDE__PACING__FAR_CM=400`)
pub const ENV_PREFIX: &str = "GUIDE";

/// Default configuration file, read when present
pub const DEFAULT_CONFIG_PATH: &str = "guide.toml";

/// Initialize logging; `RUST_LOG` overrides the default INFO level
pub fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Load configuration from an optional TOML file plus environment overrides
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<GuideConfig> {
    let path = path.as_ref();
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let config: GuideConfig = settings.try_deserialize()?;
    config.validate()?;
    info!("Configuration loaded (file: {})", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config("/nonexistent/guide.toml").unwrap();
        assert_eq!(config.pacing.far_cm, 300);
        assert_eq!(config.behavior.daylight_confirm_ticks, 7);
        assert_eq!(config.windows.distance_capacity, 10);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let path = std::env::temp_dir().join(format!("guide-zero-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[windows]\nacceleration_capacity = 0").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("non-zero"), "{}", err);
    }

    #[test]
    fn test_file_overrides_single_fields() {
        let path = std::env::temp_dir().join(format!("guide-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[fusion]\nsharpness_threshold = 55.0\n\n[queue]\nretire_after_ticks = 4").unwrap();

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.fusion.sharpness_threshold, 55.0);
        assert_eq!(config.queue.retire_after_ticks, 4);
        // Untouched fields keep their defaults
        assert_eq!(config.fusion.turn_rate_threshold, 20.0);
        assert_eq!(config.proximity.rules.len(), 10);
    }
}
