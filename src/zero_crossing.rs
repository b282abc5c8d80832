//! Zero-crossing rate - frame-based sign-change contour.
//!
//! The zero-crossing rate of a frame is the fraction of adjacent sample
//! pairs whose signs differ, using the `x >= 0` convention so a sample at
//! exactly zero counts as non-negative. Noisy and fricative segments show
//! high rates; voiced segments show low ones (roughly 2·F0 / sample_rate
//! for a tone).

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::sound::Sound;

/// Zero-crossing-rate contour.
#[derive(Debug, Clone)]
pub struct ZeroCrossingContour {
    /// Frame center times in seconds.
    times: Array1<f64>,

    /// Crossing fraction per frame, in [0, 1].
    values: Array1<f64>,

    /// Analysis frame size in samples.
    frame_length: usize,

    /// Step between frames in samples.
    hop_length: usize,
}

impl ZeroCrossingContour {
    /// Create a new contour from raw parts.
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

    /// Crossing fraction per frame.
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
}

/// Fraction of sign changes between adjacent samples.
fn frame_zero_crossing_rate(frame: &[f64]) -> f64 {
    if frame.len() < 2 {
        return 0.0;
    }

    let crossings = frame
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();

    crossings as f64 / (frame.len() - 1) as f64
}

/// Compute the zero-crossing-rate contour of a sound.
///
/// The final partial frame is included so the contour reaches the end of
/// the signal.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for an empty signal or non-positive sample rate.
/// - [`Error::InvalidParameter`] for a frame shorter than 2 samples or a
///   zero hop length.
pub fn sound_to_zero_crossing_rate(
    sound: &Sound,
    frame_length: usize,
    hop_length: usize,
) -> Result<ZeroCrossingContour> {
    sound.ensure_analyzable()?;
    if frame_length < 2 {
        return Err(Error::InvalidParameter(format!(
            "frame_length must be at least 2 samples, got {}",
            frame_length
        )));
    }
    if hop_length == 0 {
        return Err(Error::InvalidParameter("hop_length must be positive".into()));
    }

    let samples = sound
        .samples()
        .as_slice()
        .expect("sample storage is contiguous");
    let sample_rate = sound.sample_rate();
    let n = samples.len();

    let mut times = Vec::new();
    let mut values = Vec::new();

    let mut start = 0;
    while start < n {
        let end = (start + frame_length).min(n);
        let frame = &samples[start..end];
        times.push((start as f64 + (end - start) as f64 / 2.0) / sample_rate);
        values.push(frame_zero_crossing_rate(frame));
        start += hop_length;
    }

    Ok(ZeroCrossingContour::new(
        Array1::from_vec(times),
        Array1::from_vec(values),
        frame_length,
        hop_length,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_signal_has_maximal_rate() {
        let samples: Vec<f64> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        assert_eq!(frame_zero_crossing_rate(&samples), 1.0);
    }

    #[test]
    fn constant_signal_has_zero_rate() {
        assert_eq!(frame_zero_crossing_rate(&[0.7; 128]), 0.0);
        // All-zero frames count as non-negative throughout.
        assert_eq!(frame_zero_crossing_rate(&[0.0; 128]), 0.0);
    }

    #[test]
    fn tone_rate_matches_twice_frequency() {
        let sample_rate = 8000.0;
        let freq = 100.0;
        let samples: Vec<f64> = (0..8000)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate).sin())
            .collect();
        let sound = Sound::from_slice(&samples, sample_rate);
        let contour = sound_to_zero_crossing_rate(&sound, 2048, 512).unwrap();
        let expected = 2.0 * freq / sample_rate;
        for &v in contour.values().iter().take(8) {
            assert!((v - expected).abs() < 0.005, "zcr = {}", v);
        }
    }

    #[test]
    fn short_frame_is_rejected() {
        let sound = Sound::from_slice(&[0.5; 100], 8000.0);
        assert!(matches!(
            sound_to_zero_crossing_rate(&sound, 1, 512),
            Err(Error::InvalidParameter(_))
        ));
    }
}
