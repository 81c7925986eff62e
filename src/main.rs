use anyhow::Result;
use chrono::{NaiveDate, Weekday};
use clap::Parser;
use log::{error, info, warn};
use rg_rows::config::{AppConfig, WidgetPreset};
use rg_rows::{build_provider, ListWidget};
use rg_rows_core::{ConfigureRequest, ControlKind, Registry, SourceConfig};
use std::path::PathBuf;

/// rg-Rows - serve generated rows to list and combo box widgets
#[derive(Parser, Debug, Clone)]
#[command(name = "rg-rows")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Config file to load instead of the default one
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Row source to serve (overrides the config file)
    #[arg(short = 's', long = "source", value_name = "SOURCE_ID")]
    source: Option<String>,

    /// List available row sources
    #[arg(short = 'l', long = "list")]
    list_sources: bool,

    /// Number of rows to show
    #[arg(long = "rows")]
    rows: Option<u32>,

    /// Anchor date of the first row (yyyy-mm-dd)
    #[arg(long = "anchor", value_name = "DATE")]
    anchor: Option<NaiveDate>,

    /// Display format of the date column (strftime syntax)
    #[arg(long = "format")]
    format: Option<String>,

    /// Weekday to list (e.g. Mon, friday)
    #[arg(long = "weekday")]
    weekday: Option<Weekday>,

    /// Open the widgets as list boxes instead of combo boxes
    #[arg(long = "list-box")]
    list_box: bool,

    /// Write the effective configuration to the default config file
    #[arg(long = "save")]
    save: bool,

    /// Widget identities to open (defaults to the config's presets)
    #[arg(value_name = "WIDGET")]
    widgets: Vec<String>,
}

impl Cli {
    /// Reconfiguration given on the command line
    fn configure_request(&self) -> ConfigureRequest {
        ConfigureRequest {
            anchor_date: self.anchor,
            row_count: self.rows,
            display_format: self.format.clone(),
            weekday: self.weekday,
            ..Default::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger with verbosity based on -d/--debug flag
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting rg-Rows v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut registry = Registry::new();
    rg_rows_sources::register_all(&mut registry);

    if cli.list_sources {
        println!("Available row sources:");
        for id in registry.list_sources() {
            let name = registry
                .source_info(&id)
                .map(|info| info.display_name.clone())
                .unwrap_or_default();
            println!("  {:<16} {}", id, name);
        }
        return Ok(());
    }

    let mut config = load_config(cli.config.as_ref());
    if let Some(ref source_id) = cli.source {
        config.source = SourceConfig::default_for(source_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown source '{}' (try --list)", source_id))?;
    }

    let provider = build_provider(&config, &registry)?;

    if cli.save {
        config.save()?;
        info!("Saved config to: {}", AppConfig::config_path()?.display());
    }

    let kind = if cli.list_box {
        ControlKind::List
    } else {
        ControlKind::Combo
    };
    let presets: Vec<WidgetPreset> = if cli.widgets.is_empty() {
        if config.widgets.is_empty() {
            vec![WidgetPreset {
                id: "rows".to_string(),
                kind,
                tag: None,
                configure: None,
            }]
        } else {
            config.widgets.clone()
        }
    } else {
        cli.widgets
            .iter()
            .map(|id| WidgetPreset {
                id: id.clone(),
                kind,
                tag: None,
                configure: None,
            })
            .collect()
    };

    let overrides = cli.configure_request();
    for preset in presets {
        let mut widget = ListWidget::new(preset.id.as_str(), preset.kind);
        if let Some(tag) = preset.tag {
            widget = widget.with_tag(tag);
        }
        widget.open(&provider);

        if let Some(ref request) = preset.configure {
            provider.configure(&mut widget, request);
        }
        if !overrides.is_empty() {
            for update in provider.configure(&mut widget, &overrides) {
                if !update.is_accepted() {
                    warn!("Widget {}: {:?}", preset.id, update);
                }
            }
        }
        widget.refresh(&provider);

        println!("{} ({} rows)", preset.id, widget.rows().len());
        for line in widget.visible_text() {
            println!("  {}", line);
        }
        widget.close(&provider);
    }

    if log::log_enabled!(log::Level::Debug) {
        provider.store().debug_print();
    }

    Ok(())
}

/// Load configuration from an explicit file, falling back to the default one
fn load_config(path: Option<&PathBuf>) -> AppConfig {
    if let Some(path) = path {
        match AppConfig::load_from_path(path) {
            Ok(config) => {
                info!("Loaded config from: {}", path.display());
                return config;
            }
            Err(e) => warn!("Failed to load config file '{}': {}", path.display(), e),
        }
    }
    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            AppConfig::default()
        }
    }
}
