//! Command-line arguments.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "fist-alert", author, version, about = "Detects a left-hand fist and raises a visual alert", long_about = None)]
pub struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Only try this camera index
    #[arg(long)]
    pub camera: Option<i32>,

    /// Do not mirror frames horizontally
    #[arg(long)]
    pub no_mirror: bool,

    /// Landmark provider executable
    #[arg(long)]
    pub provider: Option<String>,

    /// Seconds the alert stays active after the last trigger
    #[arg(long)]
    pub alert_duration: Option<f64>,

    /// Directory for screenshots
    #[arg(long)]
    pub screenshot_dir: Option<PathBuf>,

    /// Print an example configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write the effective configuration (file plus overrides) to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub save_config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Override configuration values with the ones given on the command line
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(index) = self.camera {
            config.camera.indices = vec![index];
        }
        if self.no_mirror {
            config.camera.mirror = false;
        }
        if let Some(command) = &self.provider {
            config.provider.command = command.clone();
        }
        if let Some(seconds) = self.alert_duration {
            config.alert.duration_secs = seconds;
        }
        if let Some(directory) = &self.screenshot_dir {
            config.screenshot.directory = directory.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_config_alone() {
        let args = Args::try_parse_from(["fist-alert"]).unwrap();
        let mut config = Config::default();
        args.apply_to(&mut config);

        assert_eq!(config.camera.indices, vec![0, 1, 2]);
        assert!(config.camera.mirror);
        assert_eq!(config.alert.duration_secs, 2.0);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "fist-alert",
            "--camera",
            "1",
            "--no-mirror",
            "--provider",
            "python3",
            "--alert-duration",
            "3.5",
            "--screenshot-dir",
            "/tmp/shots",
        ])
        .unwrap();
        let mut config = Config::default();
        args.apply_to(&mut config);

        assert_eq!(config.camera.indices, vec![1]);
        assert!(!config.camera.mirror);
        assert_eq!(config.provider.command, "python3");
        assert_eq!(config.alert.duration_secs, 3.5);
        assert_eq!(config.screenshot.directory, PathBuf::from("/tmp/shots"));
    }
}
