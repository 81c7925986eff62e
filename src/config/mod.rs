//! Configuration management

mod settings;

pub use settings::{AppConfig, WidgetPreset, CONFIG_VERSION};
