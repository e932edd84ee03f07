//! Fist alert application: watches the camera for a left-hand fist.

use anyhow::{Context, Result};
use clap::Parser;
use fist_alert::{
    app::GestureApp,
    cli::Args,
    config::{Config, EXAMPLE_CONFIG},
};
use log::{info, warn};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Face and Hand Gesture Detection System");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    args.apply_to(&mut config);
    config.validate()?;

    if let Some(path) = &args.save_config {
        config.to_file(path)?;
        info!("Configuration written to: {}", path.display());
        return Ok(());
    }

    info!("Make a fist with your LEFT hand to trigger an alert");
    info!("Press 'q' to quit, 's' to take a screenshot");

    let mut app = GestureApp::new(config)?;

    let stop = app.stop_handle();
    ctrlc::set_handler(move || stop.request()).context("Failed to install Ctrl+C handler")?;

    app.run()?;

    info!("Done!");
    Ok(())
}
