//! WAV loading against files written with hound.

use prosodic::{Error, Sound};

fn write_wav(path: &std::path::Path, channels: u16, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn mono_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mono.wav");

    let samples: Vec<i16> = (0..8000)
        .map(|i| {
            let t = i as f64 / 8000.0;
            (0.5 * (2.0 * std::f64::consts::PI * 220.0 * t).sin() * 32768.0) as i16
        })
        .collect();
    write_wav(&path, 1, &samples);

    let sound = Sound::from_file(&path).unwrap();
    assert_eq!(sound.n_samples(), 8000);
    assert_eq!(sound.sample_rate(), 8000.0);
    assert!((sound.duration() - 1.0).abs() < 1e-9);
    // Integer samples come back normalized to [-1, 1].
    assert!(sound.samples().iter().all(|s| s.abs() <= 1.0));
    let peak = sound.samples().iter().fold(0.0f64, |m, s| m.max(s.abs()));
    assert!((peak - 0.5).abs() < 0.01);
}

#[test]
fn stereo_file_is_rejected_without_channel_choice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");

    // Interleaved L/R: left channel constant 1000, right constant -2000.
    let samples: Vec<i16> = (0..200)
        .map(|i| if i % 2 == 0 { 1000 } else { -2000 })
        .collect();
    write_wav(&path, 2, &samples);

    match Sound::from_file(&path) {
        Err(Error::NotMono(channels)) => assert_eq!(channels, 2),
        other => panic!("expected NotMono, got {:?}", other.map(|s| s.to_string())),
    }
}

#[test]
fn channel_extraction_picks_the_right_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");

    let samples: Vec<i16> = (0..200)
        .map(|i| if i % 2 == 0 { 1000 } else { -2000 })
        .collect();
    write_wav(&path, 2, &samples);

    let left = Sound::from_file_channel(&path, 0).unwrap();
    let right = Sound::from_file_channel(&path, 1).unwrap();
    assert_eq!(left.n_samples(), 100);
    assert_eq!(right.n_samples(), 100);
    assert!(left.samples().iter().all(|&s| s > 0.0));
    assert!(right.samples().iter().all(|&s| s < 0.0));

    assert!(matches!(
        Sound::from_file_channel(&path, 2),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    assert!(matches!(
        Sound::from_file("/nonexistent/definitely-not-here.wav"),
        Err(Error::AudioRead(_))
    ));
}
