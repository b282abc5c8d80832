//! Autocorrelation - full-signal autocorrelation with a lag axis.
//!
//! Computes the un-normalized linear autocorrelation
//!
//! ```text
//! r[k] = Σ x[i] × x[i+k]
//! ```
//!
//! for lags k = 0 .. max_lag-1, via the Wiener-Khinchin route: zero-pad to
//! a power of two at least twice the signal length, forward FFT, take the
//! power spectrum, inverse FFT. The padding keeps the circular convolution
//! from wrapping, so the result equals the direct sum.
//!
//! `r[0]` is the total signal energy, and `|r[k]| <= r[0]` for every lag.
//! A periodic signal shows peaks at multiples of its period.

use ndarray::Array1;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{Error, Result};
use crate::sound::Sound;

/// Autocorrelation of a whole signal.
#[derive(Debug, Clone)]
pub struct Autocorrelation {
    /// Lag axis in seconds: `lags[k] = k / sample_rate`.
    lags: Array1<f64>,

    /// Autocorrelation values, one per lag.
    values: Array1<f64>,
}

impl Autocorrelation {
    /// Create a new autocorrelation from raw parts.
    pub fn new(lags: Array1<f64>, values: Array1<f64>) -> Self {
        Self { lags, values }
    }

    /// Lag axis in seconds.
    #[inline]
    pub fn lags(&self) -> &Array1<f64> {
        &self.lags
    }

    /// Autocorrelation values.
    #[inline]
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of lags.
    #[inline]
    pub fn n_lags(&self) -> usize {
        self.lags.len()
    }
}

/// Compute the autocorrelation of a sound.
///
/// # Arguments
///
/// * `sound` - Signal to analyze
/// * `max_lag` - Number of lags to keep. `None` keeps one lag per sample
///   (the full one-sided autocorrelation). Values larger than the signal
///   length are clamped.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for an empty signal or non-positive sample rate.
/// - [`Error::InvalidParameter`] for an explicit `max_lag` of 0.
pub fn sound_to_autocorrelation(sound: &Sound, max_lag: Option<usize>) -> Result<Autocorrelation> {
    sound.ensure_analyzable()?;

    let samples = sound.samples();
    let sample_rate = sound.sample_rate();
    let n = samples.len();

    let max_lag = match max_lag {
        Some(0) => {
            return Err(Error::InvalidParameter("max_lag must be positive".into()));
        }
        Some(m) => m.min(n),
        None => n,
    };

    // Power of two >= 2n, so the linear correlation does not wrap.
    let mut fft_size = 1;
    while fft_size < 2 * n {
        fft_size *= 2;
    }

    let mut buffer: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); fft_size];
    for (slot, &sample) in buffer.iter_mut().zip(samples.iter()) {
        *slot = Complex::new(sample, 0.0);
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    let ifft = planner.plan_fft_inverse(fft_size);

    fft.process(&mut buffer);

    // Power spectrum: X[k] × conj(X[k]) = |X[k]|²
    for c in buffer.iter_mut() {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }

    ifft.process(&mut buffer);

    // rustfft leaves the inverse unscaled; divide by fft_size to recover
    // the direct-form sums.
    let values: Vec<f64> = buffer[..max_lag]
        .iter()
        .map(|c| c.re / fft_size as f64)
        .collect();

    let lags: Vec<f64> = (0..max_lag).map(|k| k as f64 / sample_rate).collect();

    Ok(Autocorrelation::new(
        Array1::from_vec(lags),
        Array1::from_vec(values),
    ))
}
