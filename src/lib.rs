//! rg-Rows: demand-driven row providers for list and combo box widgets
//!
//! This library ties the workspace crates together:
//! - Application configuration (source choice, timezone, widget presets)
//! - Building a `Provider` from that configuration
//! - An in-memory host widget that drives the provider's phase protocol

pub mod config;
pub mod host;

// Re-export commonly used types
pub use config::{AppConfig, WidgetPreset};
pub use host::{ListWidget, RenderedRow};

use anyhow::{Context, Result};
use log::info;
use rg_rows_core::{InstanceIdGenerator, Provider, Registry, SystemClock};

/// Build a provider for the source named in `config`
pub fn build_provider(config: &AppConfig, registry: &Registry) -> Result<Provider> {
    let source_type = config.source.source_type();
    let mut source = registry
        .create_source(source_type)
        .with_context(|| format!("Cannot serve rows from source '{}'", source_type))?;
    source.configure_typed(&config.source)?;

    let clock = SystemClock::with_timezone(&config.timezone)?;

    info!(
        "Serving '{}' rows (timezone {}, {:?} instance ids)",
        source_type, config.timezone, config.instance_ids
    );

    Ok(Provider::new(source)
        .with_clock(clock)
        .with_id_generator(InstanceIdGenerator::new(config.instance_ids))
        .with_fallback_rows(config.default_rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_rows_core::SourceConfig;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        rg_rows_sources::register_all(&mut registry);
        registry
    }

    #[test]
    fn test_build_provider_from_defaults() {
        let provider = build_provider(&AppConfig::default(), &registry()).unwrap();
        assert_eq!(provider.source().metadata().id, "weekday_dates");
    }

    #[test]
    fn test_build_provider_applies_source_config() {
        let config = AppConfig {
            source: SourceConfig::default_for("weekday_names").unwrap(),
            ..Default::default()
        };
        let provider = build_provider(&config, &registry()).unwrap();
        assert_eq!(
            provider.source().get_typed_config().map(|c| c.source_type().to_string()),
            Some("weekday_names".to_string())
        );
    }

    #[test]
    fn test_bad_timezone_is_an_error() {
        let config = AppConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Default::default()
        };
        assert!(build_provider(&config, &registry()).is_err());
    }

    #[test]
    fn test_unregistered_source_is_an_error() {
        assert!(build_provider(&AppConfig::default(), &Registry::new()).is_err());
    }
}
