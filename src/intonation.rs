//! Intonation - dominant spectral peak track.
//!
//! For every analysis frame, a Hanning-windowed FFT magnitude spectrum is
//! searched for its highest local peak inside a frequency band, and the
//! peak's frequency is refined by parabolic interpolation over the three
//! surrounding bins. The result is a (frequency, magnitude) pair per
//! frame: a coarse melodic contour that, unlike the F0 track, also says
//! how strongly each frame is pitched.
//!
//! Frames with no peak in the band (silence included) get (0.0, 0.0).

use ndarray::Array1;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{Error, Result};
use crate::sound::Sound;

/// Default lower edge of the search band in Hz.
pub const DEFAULT_INTONATION_FLOOR_HZ: f64 = 150.0;

/// Default upper edge of the search band in Hz.
pub const DEFAULT_INTONATION_CEILING_HZ: f64 = 4000.0;

/// Dominant-peak track: one (frequency, magnitude) pair per frame.
#[derive(Debug, Clone)]
pub struct IntonationTrack {
    /// Frame center times in seconds.
    times: Array1<f64>,

    /// Peak frequencies in Hz (0.0 = no peak found).
    frequencies: Array1<f64>,

    /// Peak magnitudes (linear spectral magnitude, 0.0 = no peak found).
    magnitudes: Array1<f64>,
}

impl IntonationTrack {
    /// Create a new track from raw parts.
    pub fn new(times: Array1<f64>, frequencies: Array1<f64>, magnitudes: Array1<f64>) -> Self {
        Self {
            times,
            frequencies,
            magnitudes,
        }
    }

    /// Frame center times in seconds.
    #[inline]
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// Peak frequencies in Hz.
    #[inline]
    pub fn frequencies(&self) -> &Array1<f64> {
        &self.frequencies
    }

    /// Peak magnitudes.
    #[inline]
    pub fn magnitudes(&self) -> &Array1<f64> {
        &self.magnitudes
    }

    /// Number of frames.
    #[inline]
    pub fn n_frames(&self) -> usize {
        self.times.len()
    }
}

/// Generate a Hanning window.
fn hanning_window(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0];
    }

    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

/// Highest local peak of `magnitudes` within bin range [lo, hi].
///
/// Returns (refined bin position, peak magnitude), or None when the range
/// holds no local maximum above zero. The refinement is a parabolic fit
/// through the peak bin and its two neighbors.
fn dominant_peak(magnitudes: &[f64], lo: usize, hi: usize) -> Option<(f64, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for k in lo.max(1)..hi.min(magnitudes.len().saturating_sub(1)) {
        if magnitudes[k] > magnitudes[k - 1]
            && magnitudes[k] >= magnitudes[k + 1]
            && magnitudes[k] > 0.0
        {
            match best {
                Some((_, m)) if m >= magnitudes[k] => {}
                _ => best = Some((k, magnitudes[k])),
            }
        }
    }

    best.map(|(k, m)| {
        let prev = magnitudes[k - 1];
        let next = magnitudes[k + 1];
        let denom = prev - 2.0 * m + next;
        if denom.abs() > 1e-12 {
            let delta = 0.5 * (prev - next) / denom;
            if delta.abs() < 1.0 {
                return (k as f64 + delta, m);
            }
        }
        (k as f64, m)
    })
}

/// Compute the intonation track of a sound.
///
/// # Arguments
///
/// * `sound` - Signal to analyze
/// * `frame_length` - Analysis frame size in samples (e.g. 2048)
/// * `hop_length` - Step between frames in samples (e.g. 512)
/// * `floor_hz` / `ceiling_hz` - Search band; the ceiling is clamped to
///   the Nyquist frequency.
///
/// Signals shorter than one frame produce an empty track.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for an empty signal or non-positive sample rate.
/// - [`Error::InvalidParameter`] for a frame shorter than 16 samples, a
///   zero hop, or an empty or non-positive band.
pub fn sound_to_intonation(
    sound: &Sound,
    frame_length: usize,
    hop_length: usize,
    floor_hz: f64,
    ceiling_hz: f64,
) -> Result<IntonationTrack> {
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
            "search band must satisfy 0 < floor < ceiling, got {}..{}",
            floor_hz, ceiling_hz
        )));
    }

    let samples = sound
        .samples()
        .as_slice()
        .expect("sample storage is contiguous");
    let sample_rate = sound.sample_rate();
    let nyquist = sample_rate / 2.0;
    let ceiling_hz = ceiling_hz.min(nyquist);

    // Power-of-two FFT size; zero-padding refines the bin spacing.
    let mut fft_size = 1;
    while fft_size < frame_length {
        fft_size *= 2;
    }
    let df = sample_rate / fft_size as f64;

    let lo_bin = (floor_hz / df).ceil() as usize;
    let hi_bin = (ceiling_hz / df).floor() as usize;

    let window = hanning_window(frame_length);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);

    let n = samples.len();
    let mut times = Vec::new();
    let mut frequencies = Vec::new();
    let mut magnitudes = Vec::new();

    let mut start = 0;
    while start + frame_length <= n {
        let t = (start as f64 + frame_length as f64 / 2.0) / sample_rate;

        let mut buffer: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); fft_size];
        for (j, slot) in buffer.iter_mut().take(frame_length).enumerate() {
            *slot = Complex::new(samples[start + j] * window[j], 0.0);
        }

        fft.process(&mut buffer);

        let spectrum: Vec<f64> = buffer[..fft_size / 2 + 1]
            .iter()
            .map(|c| c.norm())
            .collect();

        let (freq, magnitude) = match dominant_peak(&spectrum, lo_bin, hi_bin) {
            Some((bin, m)) => (bin * df, m),
            None => (0.0, 0.0),
        };

        times.push(t);
        frequencies.push(freq);
        magnitudes.push(magnitude);
        start += hop_length;
    }

    log::debug!(
        "intonation: {} frames, band {:.0}..{:.0} Hz, df {:.2} Hz",
        times.len(),
        floor_hz,
        ceiling_hz,
        df
    );

    Ok(IntonationTrack::new(
        Array1::from_vec(times),
        Array1::from_vec(frequencies),
        Array1::from_vec(magnitudes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, duration: f64, sample_rate: f64) -> Sound {
        let n = (duration * sample_rate) as usize;
        let samples: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate).sin())
            .collect();
        Sound::from_slice(&samples, sample_rate)
    }

    #[test]
    fn tone_peak_lands_on_its_frequency() {
        let sound = sine(440.0, 1.0, 8000.0);
        let track = sound_to_intonation(
            &sound,
            2048,
            512,
            DEFAULT_INTONATION_FLOOR_HZ,
            DEFAULT_INTONATION_CEILING_HZ,
        )
        .unwrap();
        assert!(track.n_frames() >= 10);
        for (&f, &m) in track.frequencies().iter().zip(track.magnitudes().iter()) {
            assert!((f - 440.0).abs() < 5.0, "peak at {} Hz", f);
            assert!(m > 0.0);
        }
    }

    #[test]
    fn silence_has_no_peak() {
        let sound = Sound::from_slice(&[0.0; 8000], 8000.0);
        let track = sound_to_intonation(&sound, 2048, 512, 150.0, 4000.0).unwrap();
        assert!(track.n_frames() > 0);
        assert!(track.frequencies().iter().all(|&f| f == 0.0));
        assert!(track.magnitudes().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn out_of_band_tone_is_ignored() {
        // 100 Hz lies below the 150 Hz floor; its spectral peak must not
        // be reported.
        let sound = sine(100.0, 1.0, 8000.0);
        let track = sound_to_intonation(&sound, 2048, 512, 150.0, 4000.0).unwrap();
        for &f in track.frequencies().iter() {
            assert!(f == 0.0 || f >= 150.0);
        }
    }

    #[test]
    fn parabolic_refinement_stays_within_a_bin() {
        let mags = vec![0.0, 1.0, 3.0, 2.0, 0.5, 0.0];
        let (bin, m) = dominant_peak(&mags, 1, 5).unwrap();
        assert!((bin - 2.0).abs() < 0.5);
        assert_eq!(m, 3.0);
    }
}
