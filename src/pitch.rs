//! Pitch - fundamental frequency (F0) track.
//!
//! Thin wrapper around the `pitch-detection` crate: the signal is cut into
//! overlapping frames and each frame goes through a McLeod pitch detector.
//! Candidates outside the configured [floor, ceiling] band are treated as
//! unvoiced, as are frames the detector rejects for low power or low
//! clarity.
//!
//! Unvoiced frames carry the value 0.0.

use ndarray::Array1;
use pitch_detection::detector::mcleod::McLeodDetector;
use pitch_detection::detector::PitchDetector;

use crate::error::{Error, Result};
use crate::sound::Sound;

/// Default lowest admissible F0 in Hz (≈ musical note C2).
pub const DEFAULT_F0_FLOOR_HZ: f64 = 65.41;

/// Default highest admissible F0 in Hz (≈ musical note C7).
pub const DEFAULT_F0_CEILING_HZ: f64 = 2093.0;

/// Detector power gate: frames with less total power are unvoiced.
const POWER_THRESHOLD: f64 = 5.0;

/// Detector clarity gate: candidates below this correlation are unvoiced.
const CLARITY_THRESHOLD: f64 = 0.7;

/// Fundamental frequency track.
///
/// One value per analysis frame; 0.0 marks an unvoiced frame.
#[derive(Debug, Clone)]
pub struct PitchTrack {
    /// Frame center times in seconds.
    times: Array1<f64>,

    /// F0 values in Hz (0.0 = unvoiced).
    values: Array1<f64>,

    /// Analysis frame size in samples.
    frame_length: usize,

    /// Step between frames in samples.
    hop_length: usize,
}

impl PitchTrack {
    /// Create a new track from raw parts.
    pub fn new(
        times: Array1<f64>,
        values: Array1<f64>,
        frame_length: usize,
        hop_length: usize,
    ) -> Self {
        Self {
            times,
            values,
            frame_length,
            hop_length,
        }
    }

    /// Frame center times in seconds.
    #[inline]
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// F0 values in Hz (0.0 = unvoiced).
    #[inline]
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of frames.
    #[inline]
    pub fn n_frames(&self) -> usize {
        self.times.len()
    }

    /// Analysis frame size in samples.
    #[inline]
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Step between frames in samples.
    #[inline]
    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    /// Number of voiced frames (value > 0).
    pub fn voiced_count(&self) -> usize {
        self.values.iter().filter(|&&v| v > 0.0).count()
    }
}

/// Compute the F0 track of a sound.
///
/// # Arguments
///
/// * `sound` - Signal to analyze
/// * `frame_length` - Analysis frame size in samples. Longer frames
///   resolve lower pitches; 2048 works well for speech at common rates.
/// * `hop_length` - Step between frames in samples (e.g. 512).
/// * `floor_hz` / `ceiling_hz` - Admissible F0 band; candidates outside it
///   become unvoiced.
///
/// Signals shorter than one frame produce an empty track.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for an empty signal or non-positive sample rate.
/// - [`Error::InvalidParameter`] for a frame shorter than 16 samples, a
///   zero hop, or a floor/ceiling band that is empty or non-positive.
pub fn sound_to_pitch(
    sound: &Sound,
    frame_length: usize,
    hop_length: usize,
    floor_hz: f64,
    ceiling_hz: f64,
) -> Result<PitchTrack> {
    sound.ensure_analyzable()?;
    if frame_length < 16 {
        return Err(Error::InvalidParameter(format!(
            "frame_length must be at least 16 samples, got {}",
            frame_length
        )));
    }
    if hop_length == 0 {
        return Err(Error::InvalidParameter("hop_length must be positive".into()));
    }
    if !(floor_hz > 0.0) || !(ceiling_hz > floor_hz) {
        return Err(Error::InvalidParameter(format!(
            "F0 band must satisfy 0 < floor < ceiling, got {}..{}",
            floor_hz, ceiling_hz
        )));
    }

    let samples = sound
        .samples()
        .as_slice()
        .expect("sample storage is contiguous");
    let sample_rate = sound.sample_rate();

    let mut detector = McLeodDetector::new(frame_length, frame_length / 2);

    let n = samples.len();
    let mut times = Vec::new();
    let mut values = Vec::new();

    let mut start = 0;
    while start + frame_length <= n {
        let frame = &samples[start..start + frame_length];
        let t = (start as f64 + frame_length as f64 / 2.0) / sample_rate;

        let f0 = detector
            .get_pitch(
                frame,
                sample_rate as usize,
                POWER_THRESHOLD,
                CLARITY_THRESHOLD,
            )
            .map(|p| p.frequency)
            .filter(|&f| f >= floor_hz && f <= ceiling_hz)
            .unwrap_or(0.0);

        times.push(t);
        values.push(f0);
        start += hop_length;
    }

    log::debug!(
        "pitch: {} frames, {} voiced (band {:.1}..{:.1} Hz)",
        times.len(),
        values.iter().filter(|&&v| v > 0.0).count(),
        floor_hz,
        ceiling_hz
    );

    Ok(PitchTrack::new(
        Array1::from_vec(times),
        Array1::from_vec(values),
        frame_length,
        hop_length,
    ))
}
