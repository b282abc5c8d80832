//! Intensity - loudness contour in dB.
//!
//! Computes the intensity of a signal over time, expressed in decibels
//! relative to the standard reference sound pressure (2×10⁻⁵ Pa).
//!
//! # Algorithm Overview
//!
//! For each analysis frame:
//! 1. Extract samples centered at the frame time
//! 2. Subtract DC (mean) from the samples
//! 3. Apply a Gaussian window
//! 4. Compute the weighted mean square
//! 5. Convert to dB relative to reference pressure
//!
//! The window size is tied to the minimum pitch: the physical window spans
//! 7.2 / min_pitch seconds, so at least two periods of the lowest expected
//! voice frequency fall inside the effective window. The default time step
//! is 0.8 / min_pitch.
//!
//! This module is the production [`IntensityEngine`]: silence segmentation
//! and the speaking-rate estimate both consume its contour.
//!
//! [`IntensityEngine`]: crate::speaking_rate::IntensityEngine

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::sound::Sound;

/// Window shape parameter for the Gaussian analysis window.
///
/// Higher α narrows the main lobe and lowers the sidelobes.
const GAUSS_ALPHA: f64 = 13.2;

/// Reference pressure squared: (2×10⁻⁵ Pa)², the SPL reference in air.
const P_REF_SQUARED: f64 = 4e-10;

/// Intensity contour (loudness over time).
///
/// Values are in dB SPL. Negative infinity marks a frame with zero energy.
///
/// # Typical Values
///
/// - -∞ dB: complete silence
/// - ~30 dB: whisper
/// - ~60 dB: normal conversation
/// - ~80 dB: loud speech
#[derive(Debug, Clone)]
pub struct IntensityContour {
    /// Frame center times in seconds.
    times: Array1<f64>,

    /// Intensity values in dB.
    values: Array1<f64>,

    /// Time step between frames.
    time_step: f64,

    /// Minimum pitch used for analysis.
    min_pitch: f64,
}

impl IntensityContour {
    /// Create a new contour from raw parts.
    pub fn new(times: Array1<f64>, values: Array1<f64>, time_step: f64, min_pitch: f64) -> Self {
        Self {
            times,
            values,
            time_step,
            min_pitch,
        }
    }

    /// Frame center times in seconds.
    #[inline]
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// Intensity values in dB.
    #[inline]
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of frames.
    #[inline]
    pub fn n_frames(&self) -> usize {
        self.times.len()
    }

    /// Time step between frames.
    #[inline]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Minimum pitch used for analysis.
    #[inline]
    pub fn min_pitch(&self) -> f64 {
        self.min_pitch
    }

    /// Maximum intensity over all finite frames, in dB.
    ///
    /// Returns `None` when every frame is silent (no finite value), which
    /// is how an all-zero signal comes out.
    pub fn max_db(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }
}

/// Generate the Gaussian analysis window.
///
/// ```text
/// w(x) = (exp(-α × x²) - exp(-α)) / (1 - exp(-α))
/// ```
///
/// with x running from -1 to 1 across the window. The edge subtraction and
/// normalization pin the window to exactly 0 at the edges and 1 at the
/// center.
fn gauss_window(n: usize, alpha: f64) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0];
    }

    let mid = (n - 1) as f64 / 2.0;
    let exp_edge = (-alpha).exp();
    let norm = 1.0 - exp_edge;

    (0..n)
        .map(|i| {
            let x = (i as f64 - mid) / mid;
            ((-alpha * x * x).exp() - exp_edge) / norm
        })
        .collect()
}

/// Compute the intensity contour of a sound.
///
/// # Arguments
///
/// * `sound` - Signal to analyze
/// * `min_pitch` - Minimum pitch in Hz. Determines the window size; lower
///   min_pitch = longer windows = smoother but less time-precise contour.
///   Typical: 75 Hz for male voice, 100 Hz for female voice.
/// * `time_step` - Time step in seconds. Use 0 for automatic
///   (0.8 / min_pitch).
///
/// # Errors
///
/// - [`Error::InvalidInput`] for an empty signal or non-positive sample rate.
/// - [`Error::InvalidParameter`] for a non-positive `min_pitch` or a
///   negative `time_step`.
pub fn sound_to_intensity(
    sound: &Sound,
    min_pitch: f64,
    time_step: f64,
) -> Result<IntensityContour> {
    sound.ensure_analyzable()?;
    if !(min_pitch > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "min_pitch must be positive, got {}",
            min_pitch
        )));
    }
    if time_step < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "time_step must be >= 0, got {}",
            time_step
        )));
    }

    let samples = sound.samples();
    let sample_rate = sound.sample_rate();
    let duration = sound.duration();

    let time_step = if time_step <= 0.0 {
        0.8 / min_pitch
    } else {
        time_step
    };

    let physical_window_duration = 7.2 / min_pitch;
    let half_window_duration = physical_window_duration / 2.0;

    // Odd sample count keeps the window symmetric around a center sample.
    let mut window_samples = (physical_window_duration * sample_rate).round() as usize;
    if window_samples % 2 == 0 {
        window_samples += 1;
    }
    let half_window_samples = window_samples / 2;

    let window = gauss_window(window_samples, GAUSS_ALPHA);
    let window_sum: f64 = window.iter().sum();

    // Frames start half a window in; short signals still get one frame.
    let t1 = half_window_duration;
    let t_max = duration - half_window_duration;
    let n_frames = (((t_max - t1) / time_step + 1e-9).floor() as usize + 1).max(1);

    let mut times = Vec::with_capacity(n_frames);
    let mut values = Vec::with_capacity(n_frames);

    let n_samples = samples.len();

    for i in 0..n_frames {
        let t = t1 + i as f64 * time_step;
        times.push(t);

        let center_sample = (t * sample_rate).round() as isize;
        let start_sample = center_sample - half_window_samples as isize;

        // Samples outside the signal count as zero.
        let mut frame = vec![0.0; window_samples];
        for (j, slot) in frame.iter_mut().enumerate() {
            let src = start_sample + j as isize;
            if src >= 0 && (src as usize) < n_samples {
                *slot = samples[src as usize];
            }
        }

        // DC removal, so an offset does not inflate the measurement.
        let mean: f64 = frame.iter().sum::<f64>() / frame.len() as f64;
        for s in frame.iter_mut() {
            *s -= mean;
        }

        // Windowed mean square: Σ(s² × w) / Σw
        let mean_square: f64 = frame
            .iter()
            .zip(window.iter())
            .map(|(&s, &w)| s * s * w)
            .sum::<f64>()
            / window_sum;

        let intensity_db = if mean_square <= 0.0 {
            f64::NEG_INFINITY
        } else {
            10.0 * (mean_square / P_REF_SQUARED).log10()
        };

        values.push(intensity_db);
    }

    log::debug!(
        "intensity: {} frames, step {:.4}s, window {:.4}s (min_pitch {} Hz)",
        n_frames,
        time_step,
        physical_window_duration,
        min_pitch
    );

    Ok(IntensityContour::new(
        Array1::from_vec(times),
        Array1::from_vec(values),
        time_step,
        min_pitch,
    ))
}
