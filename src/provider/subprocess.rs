use super::{
    wire::{wait_ready, WireClient},
    Detections, ImageView, LandmarkProvider,
};
use crate::{
    config::{DetectionConfig, ProviderConfig},
    landmarks::{FaceRegion, HandObservation},
    Error, Result,
};
use log::{info, warn};
use std::io::{self, BufReader};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

const SETUP_HINT: &str = "the reference MediaPipe sidecar needs \
`python3 -m pip install -r sidecar/requirements.txt` and must be started from the repository root; \
set provider.command and provider.args to use another sidecar";

/// Landmark provider running as a child process
///
/// The child is started once and killed when the provider is dropped, so it
/// is released on every exit path of the owning application.
pub struct SubprocessProvider {
    process: Child,
    client: WireClient<BufReader<ChildStdout>, ChildStdin>,
}

impl SubprocessProvider {
    /// Start the sidecar and wait for its ready signal
    ///
    /// Detection thresholds are passed to the sidecar as command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started, its pipes are
    /// unavailable, or it does not signal ready.
    pub fn spawn(provider: &ProviderConfig, detection: &DetectionConfig) -> Result<Self> {
        info!("Starting landmark provider: {}", provider.command);

        let mut process = Command::new(&provider.command)
            .args(&provider.args)
            .args(threshold_args(detection))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::Provider(format!(
                    "Landmark provider `{}` not found; {SETUP_HINT}",
                    provider.command
                )),
                _ => Error::Provider(format!("Failed to start {}: {e}", provider.command)),
            })?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| Error::Provider("Provider stdout unavailable".to_string()))?;
        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| Error::Provider("Provider stdin unavailable".to_string()))?;

        let mut reader = BufReader::new(stdout);
        if let Err(e) = wait_ready(&mut reader) {
            let _ = process.kill();
            let _ = process.wait();
            return Err(match e {
                Error::Provider(message) => Error::Provider(format!("{message}; {SETUP_HINT}")),
                other => other,
            });
        }

        info!("Landmark provider ready");

        Ok(Self {
            process,
            client: WireClient::new(reader, stdin),
        })
    }
}

/// Command-line flags carrying the detection thresholds
#[must_use]
pub fn threshold_args(detection: &DetectionConfig) -> Vec<String> {
    vec![
        "--min-detection-confidence".to_string(),
        detection.min_detection_confidence.to_string(),
        "--min-tracking-confidence".to_string(),
        detection.min_tracking_confidence.to_string(),
        "--max-num-hands".to_string(),
        detection.max_num_hands.to_string(),
    ]
}

impl LandmarkProvider for SubprocessProvider {
    fn detect_faces(&mut self, image: &ImageView<'_>) -> Result<Vec<FaceRegion>> {
        Ok(self.detect(image)?.faces)
    }

    fn detect_hands(&mut self, image: &ImageView<'_>) -> Result<Vec<HandObservation>> {
        Ok(self.detect(image)?.hands)
    }

    fn detect(&mut self, image: &ImageView<'_>) -> Result<Detections> {
        self.client.request(image)
    }
}

impl Drop for SubprocessProvider {
    fn drop(&mut self) {
        info!("Stopping landmark provider");
        if let Err(e) = self.process.kill() {
            warn!("Failed to stop landmark provider: {}", e);
        }
        let _ = self.process.wait();
    }
}
