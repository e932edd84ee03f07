//! Per-frame orchestration: detect, classify, trigger, annotate.

use crate::{
    alert::{AlertState, AlertStateMachine},
    config::HandednessSource,
    gesture::{is_fist, is_left_by_position},
    landmarks::{FaceRegion, HandObservation, Handedness},
    overlay::{FrameAnnotator, FrameOverlay},
    provider::{Frame, LandmarkProvider},
    Result,
};
use log::debug;
use serde::Serialize;
use std::time::{Duration, Instant};

/// What was found in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DetectionSummary {
    /// Number of face regions
    pub faces_detected: usize,
    /// Number of hand observations
    pub hands_detected: usize,
    /// Whether this frame contained a left-hand fist
    pub left_fist_detected: bool,
}

/// A hand observation with its classification for this frame
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedHand {
    /// The provider's observation
    pub observation: HandObservation,
    /// Handedness from the configured source
    pub handedness: Handedness,
    /// Fist verdict
    pub is_fist: bool,
}

impl ClassifiedHand {
    /// Whether this hand qualifies as an alert trigger
    #[must_use]
    pub fn is_trigger(&self) -> bool {
        self.handedness == Handedness::Left && self.is_fist
    }
}

/// Frame pipeline owning the provider, annotator and alert state
pub struct FrameProcessor<P, A> {
    provider: P,
    annotator: A,
    alert: AlertStateMachine,
    handedness_source: HandednessSource,
}

impl<P: LandmarkProvider, A> FrameProcessor<P, A> {
    /// Create a processor with the default two-second alert window
    pub fn new(provider: P, annotator: A) -> Self {
        Self {
            provider,
            annotator,
            alert: AlertStateMachine::default(),
            handedness_source: HandednessSource::Provider,
        }
    }

    /// Use a different alert window
    #[must_use]
    pub fn with_alert_duration(mut self, duration: Duration) -> Self {
        self.alert = AlertStateMachine::new(duration);
        self
    }

    /// Select where handedness is taken from
    #[must_use]
    pub fn with_handedness_source(mut self, source: HandednessSource) -> Self {
        self.handedness_source = source;
        self
    }

    /// Process a frame stamped with the current time
    ///
    /// # Errors
    ///
    /// See [`FrameProcessor::process_at`].
    pub fn process<F>(&mut self, frame: F) -> Result<(F, DetectionSummary)>
    where
        F: Frame,
        A: FrameAnnotator<F>,
    {
        self.process_at(frame, Instant::now())
    }

    /// Process a frame observed at `now`
    ///
    /// # Errors
    ///
    /// Returns an error if the frame pixels are inaccessible, the provider
    /// fails or breaks the 21-landmark contract, or annotation fails. A frame
    /// whose detection fails still counts as a frame without a trigger, so an
    /// active alert keeps timing out while the provider misbehaves.
    pub fn process_at<F>(&mut self, mut frame: F, now: Instant) -> Result<(F, DetectionSummary)>
    where
        F: Frame,
        A: FrameAnnotator<F>,
    {
        let detections = match frame.view().and_then(|image| self.provider.detect(&image)) {
            Ok(detections) => detections,
            Err(e) => {
                self.alert.update(false, now);
                return Err(e);
            }
        };

        let faces: Vec<FaceRegion> = detections.faces;
        let hands: Vec<ClassifiedHand> = detections
            .hands
            .into_iter()
            .map(|observation| self.classify(observation))
            .collect();

        let triggered = hands.iter().any(ClassifiedHand::is_trigger);
        let summary = DetectionSummary {
            faces_detected: faces.len(),
            hands_detected: hands.len(),
            left_fist_detected: triggered,
        };

        let alert = self.alert.update(triggered, now);
        debug!(
            "faces={} hands={} left_fist={} alert_active={}",
            summary.faces_detected,
            summary.hands_detected,
            summary.left_fist_detected,
            alert.is_active()
        );

        let overlay = FrameOverlay {
            summary: &summary,
            faces: &faces,
            hands: &hands,
            alert,
            alert_remaining: self.alert.remaining(now),
        };
        self.annotator.annotate(&mut frame, &overlay)?;

        Ok((frame, summary))
    }

    fn classify(&self, observation: HandObservation) -> ClassifiedHand {
        let handedness = match self.handedness_source {
            HandednessSource::Provider => observation.handedness,
            HandednessSource::WristPosition => {
                if is_left_by_position(&observation.landmarks) {
                    Handedness::Left
                } else {
                    Handedness::Right
                }
            }
        };
        let is_fist = is_fist(&observation.landmarks);

        ClassifiedHand {
            observation,
            handedness,
            is_fist,
        }
    }

    /// Current alert state
    #[must_use]
    pub fn alert_state(&self) -> AlertState {
        self.alert.state()
    }

    /// The alert machine, for timing queries
    #[must_use]
    pub fn alert(&self) -> &AlertStateMachine {
        &self.alert
    }

    #[must_use]
    pub fn annotator(&self) -> &A {
        &self.annotator
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}
