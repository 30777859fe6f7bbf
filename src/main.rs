//! flightscout - a terminal flight search client
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use flightscout_app::config::{
    apply_env_overrides, apply_fixed_location, default_config_path, init_config_file,
    load_settings, Settings,
};
use flightscout_core::prelude::*;
use flightscout_core::Coordinates;

/// flightscout - search one-way flights from the terminal
#[derive(Parser, Debug)]
#[command(name = "flightscout")]
#[command(about = "Search one-way flights from the terminal", long_about = None)]
struct Args {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Latitude for the nearby-airports list; requires --lng
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude for the nearby-airports list; requires --lat
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Write a commented default config file and exit
    #[arg(long)]
    init_config: bool,
}

impl Args {
    fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_config_path)
    }

    fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

/// Settings from the config file, then the environment, then the CLI
fn resolve_settings(args: &Args) -> Settings {
    let mut settings = match args.config_path() {
        Some(path) => load_settings(&path),
        None => {
            warn!("No config directory available, using defaults");
            Settings::default()
        }
    };
    apply_env_overrides(&mut settings);
    match args.coordinates() {
        Some(coordinates) if coordinates.is_valid() => {
            apply_fixed_location(&mut settings, coordinates)
        }
        Some(coordinates) => warn!(
            "Ignoring out-of-range location {}, {}",
            coordinates.latitude, coordinates.longitude
        ),
        None => {}
    }
    settings
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.init_config {
        let Some(path) = args.config_path() else {
            eprintln!("No config directory available; pass --config PATH");
            std::process::exit(1);
        };
        if init_config_file(&path)? {
            eprintln!("Wrote default config to {}", path.display());
        } else {
            eprintln!("Config already exists at {}", path.display());
        }
        return Ok(());
    }

    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the TUI owns stdout)
    flightscout_core::logging::init()?;

    let settings = resolve_settings(&args);
    if let Some(coordinates) = args.coordinates() {
        info!(
            "Using fixed location {}, {} from the command line",
            coordinates.latitude, coordinates.longitude
        );
    }

    let result = flightscout_tui::run(settings).await;
    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["flightscout"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.coordinates().is_none());
        assert!(!args.init_config);
    }

    #[test]
    fn test_lat_requires_lng() {
        assert!(Args::try_parse_from(["flightscout", "--lat", "51.47"]).is_err());
    }

    #[test]
    fn test_negative_coordinates() {
        let args =
            Args::try_parse_from(["flightscout", "--lat", "51.47", "--lng", "-0.45"]).unwrap();
        let coords = args.coordinates().unwrap();
        assert_eq!(coords.latitude, 51.47);
        assert_eq!(coords.longitude, -0.45);
    }

    #[test]
    fn test_cli_location_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[location]\nmode = \"off\"\n").unwrap();

        let args = Args::try_parse_from([
            "flightscout",
            "--config",
            path.to_str().unwrap(),
            "--lat",
            "40.64",
            "--lng",
            "-73.78",
        ])
        .unwrap();
        let settings = resolve_settings(&args);

        assert_eq!(
            settings.location.coordinates(),
            Some(Coordinates::new(40.64, -73.78))
        );
    }

    #[test]
    fn test_out_of_range_location_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let args = Args::try_parse_from([
            "flightscout",
            "--config",
            path.to_str().unwrap(),
            "--lat",
            "123.0",
            "--lng",
            "0.0",
        ])
        .unwrap();
        let settings = resolve_settings(&args);

        assert!(settings.location.coordinates().is_none());
    }
}
