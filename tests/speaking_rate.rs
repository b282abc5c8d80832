//! End-to-end speaking-rate and pause detection with the production
//! engines, on synthesized signals.

use prosodic::{Sound, SpeakingRateDetector};

/// tone - gap - tone - gap - tone, at 8 kHz.
fn speech_like_signal() -> Sound {
    let sample_rate = 8000.0;
    let tone = |i: usize| 0.8 * (2.0 * std::f64::consts::PI * 220.0 * i as f64 / sample_rate).sin();
    let mut samples = Vec::new();
    samples.extend((0..8000).map(tone)); // 1.0 s tone
    samples.extend(std::iter::repeat(0.0).take(2400)); // 0.3 s gap
    samples.extend((0..8000).map(tone)); // 1.0 s tone
    samples.extend(std::iter::repeat(0.0).take(4000)); // 0.5 s gap
    samples.extend((0..4000).map(tone)); // 0.5 s tone
    Sound::from_slice(&samples, sample_rate)
}

#[test]
fn detects_both_gaps_as_pauses() {
    let sound = speech_like_signal();
    let result = SpeakingRateDetector::new().compute(&sound).unwrap();

    assert!(result.speaking_rate > 0.0);
    assert_eq!(result.pauses.len(), 2);

    // First gap spans [1.0, 1.3], second [2.3, 2.8]; the detected edges
    // are frame-quantized and pulled inward by the analysis window.
    assert!(result.pauses[0].start > 0.9 && result.pauses[0].start < 1.2);
    assert!(result.pauses[0].end > 1.15 && result.pauses[0].end < 1.4);
    assert!(result.pauses[1].start > 2.2 && result.pauses[1].start < 2.5);
    assert!(result.pauses[1].end > 2.6 && result.pauses[1].end < 2.9);
}

#[test]
fn pauses_are_ordered_and_inside_the_signal() {
    let sound = speech_like_signal();
    let result = SpeakingRateDetector::new().compute(&sound).unwrap();

    let duration = sound.duration();
    let mut previous_start = f64::NEG_INFINITY;
    for pause in &result.pauses {
        assert!(pause.start <= pause.end);
        assert!(pause.start >= 0.0 && pause.end <= duration + 1e-9);
        assert!(pause.start >= previous_start);
        previous_start = pause.start;
    }
}

#[test]
fn speaking_rate_is_nonnegative_and_finite() {
    let sound = speech_like_signal();
    let result = SpeakingRateDetector::new().compute(&sound).unwrap();
    assert!(result.speaking_rate >= 0.0);
    assert!(result.speaking_rate.is_finite());
}

#[test]
fn all_silence_gives_zero_rate_and_one_pause() {
    let sound = Sound::from_slice(&vec![0.0; 16000], 8000.0);
    let result = SpeakingRateDetector::new().compute(&sound).unwrap();

    assert_eq!(result.speaking_rate, 0.0);
    assert_eq!(result.pauses.len(), 1);
    assert_eq!(result.pauses[0].start, 0.0);
    assert!((result.pauses[0].end - sound.duration()).abs() < 1e-9);
}

#[test]
fn convenience_method_matches_default_detector() {
    let sound = speech_like_signal();
    let via_method = sound.speaking_rate_and_pauses().unwrap();
    let via_detector = SpeakingRateDetector::new().compute(&sound).unwrap();
    assert_eq!(via_method, via_detector);
}

#[test]
fn repeated_runs_are_identical() {
    let sound = speech_like_signal();
    let detector = SpeakingRateDetector::new();
    let first = detector.compute(&sound).unwrap();
    let second = detector.compute(&sound).unwrap();
    assert_eq!(first, second);
}
