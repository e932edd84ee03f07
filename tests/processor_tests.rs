//! Frame processor integration tests


use fist_alert::{
    alert::AlertState,
    config::HandednessSource,
    landmarks::Handedness,
    processor::{DetectionSummary, FrameProcessor},
    Error,
};
use std::time::{Duration, Instant};
use test_helpers::{
    faces, fist_points, left_fist, left_open, observation, right_fist, RecordingAnnotator, ScriptedProvider,
    TestFrame,
};

#[test]
fn test_scenario_e_no_hands() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new().then(faces(2), Vec::new());
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    let (frame, summary) = processor.process_at(TestFrame::new(), t0).unwrap();

    assert_eq!(
        summary,
        DetectionSummary {
            faces_detected: 2,
            hands_detected: 0,
            left_fist_detected: false,
        }
    );
    assert!(frame.annotated);
    assert_eq!(processor.alert_state(), AlertState::Inactive);
}

#[test]
fn test_no_hands_only_times_out_previous_alert() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new()
        .then(faces(1), vec![left_fist()])
        .then(faces(1), Vec::new())
        .then(faces(1), Vec::new());
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    processor.process_at(TestFrame::new(), t0).unwrap();
    processor.process_at(TestFrame::new(), t0 + Duration::from_secs(1)).unwrap();
    assert_eq!(processor.alert_state(), AlertState::Active { activated_at: t0 });

    processor.process_at(TestFrame::new(), t0 + Duration::from_secs(3)).unwrap();
    assert_eq!(processor.alert_state(), AlertState::Inactive);
}

#[test]
fn test_left_fist_triggers() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new().then(faces(1), vec![left_fist()]);
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    let (_, summary) = processor.process_at(TestFrame::new(), t0).unwrap();

    assert_eq!(summary.faces_detected, 1);
    assert_eq!(summary.hands_detected, 1);
    assert!(summary.left_fist_detected);
    assert!(processor.alert_state().is_active());
}

#[test]
fn test_right_fist_and_left_open_do_not_trigger() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new().then(Vec::new(), vec![right_fist(), left_open()]);
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    let (_, summary) = processor.process_at(TestFrame::new(), t0).unwrap();

    assert_eq!(summary.hands_detected, 2);
    assert!(!summary.left_fist_detected);
    assert!(!processor.alert_state().is_active());

    let drawn = &processor.annotator().frames[0];
    assert_eq!(drawn.labels, vec!["Right - FIST".to_string(), "Left".to_string()]);
}

#[test]
fn test_two_left_fists_trigger_once() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new().then(Vec::new(), vec![left_fist(), left_fist()]);
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    let (_, summary) = processor.process_at(TestFrame::new(), t0).unwrap();
    assert!(summary.left_fist_detected);
    assert_eq!(processor.alert_state(), AlertState::Active { activated_at: t0 });
}

#[test]
fn test_left_fist_flag_is_per_frame() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new()
        .then(Vec::new(), vec![left_fist()])
        .then(Vec::new(), vec![left_open()]);
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    processor.process_at(TestFrame::new(), t0).unwrap();
    let (_, summary) = processor
        .process_at(TestFrame::new(), t0 + Duration::from_millis(33))
        .unwrap();

    // Alert still running from the previous frame, but this frame had no trigger
    assert!(processor.alert_state().is_active());
    assert!(!summary.left_fist_detected);
}

#[test]
fn test_annotator_receives_results_and_alert_state() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new()
        .then(faces(1), vec![left_fist()])
        .then(faces(0), Vec::new());
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    processor.process_at(TestFrame::new(), t0).unwrap();
    processor.process_at(TestFrame::new(), t0 + Duration::from_secs(5)).unwrap();

    let frames = &processor.annotator().frames;
    assert_eq!(frames.len(), 2);

    assert_eq!(frames[0].faces, 1);
    assert_eq!(frames[0].labels, vec!["Left - FIST".to_string()]);
    assert!(frames[0].summary.left_fist_detected);
    assert_eq!(frames[0].alert, AlertState::Active { activated_at: t0 });

    assert_eq!(frames[1].summary, DetectionSummary::default());
    assert_eq!(frames[1].alert, AlertState::Inactive);
}

#[test]
fn test_wrist_position_handedness_source() {
    let t0 = Instant::now();
    // Provider says Right, but the wrist is on the left half of the image
    let mislabelled = observation(Handedness::Right, fist_points(), 0.2);
    let provider = ScriptedProvider::new()
        .then(Vec::new(), vec![mislabelled.clone()])
        .then(Vec::new(), vec![mislabelled]);

    let mut by_position = FrameProcessor::new(provider, RecordingAnnotator::default())
        .with_handedness_source(HandednessSource::WristPosition);
    let (_, summary) = by_position.process_at(TestFrame::new(), t0).unwrap();
    assert!(summary.left_fist_detected);
    assert_eq!(by_position.annotator().frames[0].labels, vec!["Left - FIST".to_string()]);

    let provider = ScriptedProvider::new().then(Vec::new(), vec![observation(Handedness::Right, fist_points(), 0.2)]);
    let mut by_label = FrameProcessor::new(provider, RecordingAnnotator::default());
    let (_, summary) = by_label.process_at(TestFrame::new(), t0).unwrap();
    assert!(!summary.left_fist_detected);
}

#[test]
fn test_provider_error_is_frame_local() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new()
        .then(Vec::new(), vec![left_fist()])
        .then_fail(Error::InvalidLandmarkCount { expected: 21, actual: 19 });
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    processor.process_at(TestFrame::new(), t0).unwrap();
    let result = processor.process_at(TestFrame::new(), t0 + Duration::from_secs(1));

    match result {
        Err(e @ Error::InvalidLandmarkCount { .. }) => assert!(e.is_frame_local()),
        other => panic!("Expected InvalidLandmarkCount, got {other:?}"),
    }
    // The failed frame is not annotated, and cannot trigger
    assert_eq!(processor.alert_state(), AlertState::Active { activated_at: t0 });
    assert_eq!(processor.annotator().frames.len(), 1);
}

#[test]
fn test_alert_times_out_while_provider_keeps_failing() {
    let t0 = Instant::now();
    let mut provider = ScriptedProvider::new().then(Vec::new(), vec![left_fist()]);
    for _ in 0..300 {
        provider = provider.then_fail(Error::Provider("busy".to_string()));
    }
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    processor.process_at(TestFrame::new(), t0).unwrap();
    for frame in 1..=300u64 {
        let now = t0 + Duration::from_millis(frame * 33);
        assert!(matches!(processor.process_at(TestFrame::new(), now), Err(Error::Provider(_))));
        if frame == 60 {
            // 1.98s in: still inside the window
            assert!(processor.alert_state().is_active());
        }
    }

    assert_eq!(processor.alert_state(), AlertState::Inactive);
    assert_eq!(processor.annotator().frames.len(), 1);
}

#[test]
fn test_annotator_receives_remaining_alert_time() {
    let t0 = Instant::now();
    let provider = ScriptedProvider::new()
        .then(Vec::new(), vec![left_fist()])
        .then(Vec::new(), Vec::new())
        .then(Vec::new(), Vec::new());
    let mut processor = FrameProcessor::new(provider, RecordingAnnotator::default());

    processor.process_at(TestFrame::new(), t0).unwrap();
    processor.process_at(TestFrame::new(), t0 + Duration::from_millis(500)).unwrap();
    processor.process_at(TestFrame::new(), t0 + Duration::from_secs(3)).unwrap();

    let frames = &processor.annotator().frames;
    assert_eq!(frames[0].remaining, Duration::from_secs(2));
    assert_eq!(frames[1].remaining, Duration::from_millis(1500));
    assert_eq!(frames[2].remaining, Duration::ZERO);
}

#[test]
fn test_invalid_frame_is_rejected_before_provider() {
    let mut frame = TestFrame::new();
    frame.pixels.truncate(10);
    let mut processor = FrameProcessor::new(ScriptedProvider::new(), RecordingAnnotator::default());

    assert!(matches!(processor.process(frame), Err(Error::InvalidInput(_))));
    assert_eq!(processor.provider_mut().calls, 0);
}
