//! Energy - frame-based RMS amplitude contour.
//!
//! Root-mean-square amplitude per frame, on a linear scale (not dB). For a
//! perceptual loudness contour in dB use the intensity module instead;
//! this one is the raw short-term energy estimate.

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::sound::Sound;

/// RMS energy contour.
#[derive(Debug, Clone)]
pub struct EnergyContour {
    /// Frame center times in seconds.
    times: Array1<f64>,

    /// RMS amplitude per frame (linear, >= 0).
    values: Array1<f64>,

    /// Analysis frame size in samples.
    frame_length: usize,

    /// Step between frames in samples.
    hop_length: usize,
}

impl EnergyContour {
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

    /// RMS amplitude per frame.
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

/// RMS of one frame of samples.
fn frame_rms(frame: &[f64]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_of_squares: f64 = frame.iter().map(|&s| s * s).sum();
    (sum_of_squares / frame.len() as f64).sqrt()
}

/// Compute the RMS energy contour of a sound.
///
/// The final partial frame (shorter than `frame_length`) is included, so
/// the contour reaches the end of the signal.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for an empty signal or non-positive sample rate.
/// - [`Error::InvalidParameter`] for a zero frame or hop length.
pub fn sound_to_energy(
    sound: &Sound,
    frame_length: usize,
    hop_length: usize,
) -> Result<EnergyContour> {
    sound.ensure_analyzable()?;
    if frame_length == 0 || hop_length == 0 {
        return Err(Error::InvalidParameter(
            "frame_length and hop_length must be positive".into(),
        ));
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
        values.push(frame_rms(frame));
        start += hop_length;
    }

    log::debug!(
        "energy: {} frames (frame {} samples, hop {} samples)",
        times.len(),
        frame_length,
        hop_length
    );

    Ok(EnergyContour::new(
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
    fn rms_of_square_wave_is_its_amplitude() {
        assert_eq!(frame_rms(&[0.25, -0.25, 0.25, -0.25]), 0.25);
        assert_eq!(frame_rms(&[0.0; 16]), 0.0);
    }

    #[test]
    fn sine_rms_is_amplitude_over_sqrt_two() {
        let sample_rate = 8000.0;
        let samples: Vec<f64> = (0..8000)
            .map(|i| 0.8 * (2.0 * std::f64::consts::PI * 200.0 * i as f64 / sample_rate).sin())
            .collect();
        let sound = Sound::from_slice(&samples, sample_rate);
        let contour = sound_to_energy(&sound, 2048, 512).unwrap();
        let expected = 0.8 / 2.0_f64.sqrt();
        // Frames fully inside the signal carry whole periods, so the RMS
        // sits right at a/√2; the trailing partial frames drift a little.
        for &v in contour.values().iter().take(8) {
            assert!((v - expected).abs() < 0.01, "rms = {}", v);
        }
    }

    #[test]
    fn contour_covers_signal_tail() {
        let sound = Sound::from_slice(&[0.5; 3000], 8000.0);
        let contour = sound_to_energy(&sound, 2048, 512).unwrap();
        // Last frame starts before the end of the signal.
        assert_eq!(contour.n_frames(), 6);
        let last_time = contour.times()[contour.n_frames() - 1];
        assert!(last_time <= sound.duration());
    }

    #[test]
    fn zero_lengths_are_rejected() {
        let sound = Sound::from_slice(&[0.5; 100], 8000.0);
        assert!(matches!(
            sound_to_energy(&sound, 0, 512),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            sound_to_energy(&sound, 2048, 0),
            Err(Error::InvalidParameter(_))
        ));
    }
}
