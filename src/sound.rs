//! Sound - Audio samples with sample rate.
//!
//! This is the foundation type for all feature extraction in prosodic.
//!
//! # Mono Audio Only
//!
//! Analysis runs on **mono audio only**. Multi-channel files require
//! explicit channel selection via `from_file_channel()`.
//!
//! # Sample Format
//!
//! Samples are stored as 64-bit floating point values. Integer WAV formats
//! are normalized to [-1.0, 1.0] on load.

use std::path::Path;

use ndarray::Array1;

use crate::autocorrelation::Autocorrelation;
use crate::energy::EnergyContour;
use crate::error::{Error, Result};
use crate::intensity::IntensityContour;
use crate::intonation::IntonationTrack;
use crate::pitch::PitchTrack;
use crate::silence::{LabeledInterval, SilenceParams};
use crate::speaking_rate::{SpeakingRateDetector, SpeakingRateResult};
use crate::zero_crossing::ZeroCrossingContour;

/// Audio samples with a sample rate.
///
/// This is the input type for every analysis in the crate. Only mono
/// (single-channel) audio is supported. A `Sound` is immutable once
/// constructed; analyses never modify it.
///
/// # Example
///
/// ```no_run
/// use prosodic::Sound;
///
/// let sound = Sound::from_file("speech.wav").unwrap();
/// println!("Duration: {:.3}s", sound.duration());
/// ```
#[derive(Debug, Clone)]
pub struct Sound {
    /// Audio samples as a 1D array.
    ///
    /// Typically in [-1.0, 1.0] when loaded from integer WAV files; float
    /// files are loaded as-is.
    samples: Array1<f64>,

    /// Sample rate in Hz.
    ///
    /// Common values: 8000, 16000, 22050, 44100, 48000.
    sample_rate: f64,
}

/// Read every interleaved sample of a WAV file as f64.
///
/// Integer formats are normalized by 2^(bits-1); float formats are widened
/// from f32 without scaling.
fn read_wav_samples<P: AsRef<Path>>(path: P) -> Result<(hound::WavSpec, Vec<f64>)> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<std::result::Result<Vec<f64>, _>>()?,
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<std::result::Result<Vec<f64>, _>>()?
        }
    };

    Ok((spec, samples))
}

impl Sound {
    /// Create a Sound from samples and sample rate.
    pub fn new(samples: Array1<f64>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Create a Sound by copying a slice of samples.
    pub fn from_slice(samples: &[f64], sample_rate: f64) -> Self {
        Self {
            samples: Array1::from_vec(samples.to_vec()),
            sample_rate,
        }
    }

    /// Load audio from a mono WAV file.
    ///
    /// # Errors
    ///
    /// - [`Error::NotMono`] if the file has more than one channel; use
    ///   [`Sound::from_file_channel`] for those.
    /// - [`Error::AudioRead`] if the file cannot be read or decoded.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (spec, samples) = read_wav_samples(path)?;

        if spec.channels != 1 {
            return Err(Error::NotMono(spec.channels));
        }

        Ok(Self {
            samples: Array1::from_vec(samples),
            sample_rate: spec.sample_rate as f64,
        })
    }

    /// Load one channel of a multi-channel WAV file.
    ///
    /// WAV files store interleaved samples `[L0, R0, L1, R1, ...]`; this
    /// takes every Nth sample starting at `channel` (0-based).
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if the channel index is out of range.
    /// - [`Error::AudioRead`] if the file cannot be read or decoded.
    pub fn from_file_channel<P: AsRef<Path>>(path: P, channel: usize) -> Result<Self> {
        let (spec, all_samples) = read_wav_samples(path)?;
        let n_channels = spec.channels as usize;

        if channel >= n_channels {
            return Err(Error::InvalidParameter(format!(
                "Channel {} does not exist. File has {} channels.",
                channel, n_channels
            )));
        }

        let samples: Vec<f64> = all_samples
            .iter()
            .skip(channel)
            .step_by(n_channels)
            .copied()
            .collect();

        Ok(Self {
            samples: Array1::from_vec(samples),
            sample_rate: spec.sample_rate as f64,
        })
    }

    /// Get the audio samples.
    #[inline]
    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    /// Get the sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Get the number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Get the total duration in seconds (n_samples / sample_rate).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.n_samples() as f64 / self.sample_rate
    }

    /// Get the sample period in seconds (1 / sample_rate).
    #[inline]
    pub fn dx(&self) -> f64 {
        1.0 / self.sample_rate
    }

    /// Validate that the signal can be analyzed at all.
    ///
    /// Every analysis entry point calls this before doing any work, so a
    /// zero-length signal or a nonsense sample rate surfaces as
    /// [`Error::InvalidInput`] instead of NaN or infinity downstream.
    pub(crate) fn ensure_analyzable(&self) -> Result<()> {
        if self.samples.is_empty() {
            return Err(Error::InvalidInput(
                "signal is empty (zero samples, zero duration)".into(),
            ));
        }
        if !(self.sample_rate > 0.0) {
            return Err(Error::InvalidInput(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        Ok(())
    }

    // ========== Analysis Methods ==========
    //
    // Each method delegates to the module that implements the feature.

    /// Compute the intensity (loudness) contour in dB.
    ///
    /// # Arguments
    ///
    /// * `min_pitch` - Minimum pitch in Hz; determines the analysis window
    ///   size. Lower values = longer windows = smoother contour.
    /// * `time_step` - Time step in seconds. Use 0 for auto (0.8/min_pitch).
    pub fn to_intensity(&self, min_pitch: f64, time_step: f64) -> Result<IntensityContour> {
        crate::intensity::sound_to_intensity(self, min_pitch, time_step)
    }

    /// Compute the fundamental frequency (F0) track.
    ///
    /// Unvoiced frames have value 0.0.
    ///
    /// # Arguments
    ///
    /// * `frame_length` - Analysis frame size in samples (e.g. 2048).
    /// * `hop_length` - Step between frames in samples (e.g. 512).
    /// * `floor_hz` - Lowest admissible F0 in Hz.
    /// * `ceiling_hz` - Highest admissible F0 in Hz.
    pub fn to_pitch(
        &self,
        frame_length: usize,
        hop_length: usize,
        floor_hz: f64,
        ceiling_hz: f64,
    ) -> Result<PitchTrack> {
        crate::pitch::sound_to_pitch(self, frame_length, hop_length, floor_hz, ceiling_hz)
    }

    /// Compute the RMS energy contour (linear amplitude, not dB).
    pub fn to_energy(&self, frame_length: usize, hop_length: usize) -> Result<EnergyContour> {
        crate::energy::sound_to_energy(self, frame_length, hop_length)
    }

    /// Compute the intonation track (dominant spectral peak per frame).
    pub fn to_intonation(
        &self,
        frame_length: usize,
        hop_length: usize,
        floor_hz: f64,
        ceiling_hz: f64,
    ) -> Result<IntonationTrack> {
        crate::intonation::sound_to_intonation(self, frame_length, hop_length, floor_hz, ceiling_hz)
    }

    /// Compute the zero-crossing-rate contour.
    pub fn to_zero_crossing_rate(
        &self,
        frame_length: usize,
        hop_length: usize,
    ) -> Result<ZeroCrossingContour> {
        crate::zero_crossing::sound_to_zero_crossing_rate(self, frame_length, hop_length)
    }

    /// Compute the autocorrelation of the whole signal.
    ///
    /// * `max_lag` - Number of lags to keep; `None` keeps one per sample.
    pub fn to_autocorrelation(&self, max_lag: Option<usize>) -> Result<Autocorrelation> {
        crate::autocorrelation::sound_to_autocorrelation(self, max_lag)
    }

    /// Segment the signal into silent and sounding intervals.
    ///
    /// The returned intervals cover [0, duration] contiguously, in time
    /// order, with no overlaps.
    pub fn to_silences(&self, params: &SilenceParams) -> Result<Vec<LabeledInterval>> {
        crate::silence::sound_to_silences(self, params)
    }

    /// Estimate speaking rate and detect pauses with the default engines.
    ///
    /// Equivalent to `SpeakingRateDetector::new().compute(self)`. Build a
    /// [`SpeakingRateDetector`] directly to substitute engines or change
    /// the segmentation parameters.
    pub fn speaking_rate_and_pauses(&self) -> Result<SpeakingRateResult> {
        SpeakingRateDetector::new().compute(self)
    }
}

impl std::fmt::Display for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sound({} samples, {} Hz, {:.3}s)",
            self.n_samples(),
            self.sample_rate,
            self.duration()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_follows_sample_count() {
        let sound = Sound::from_slice(&[0.0; 8000], 8000.0);
        assert_eq!(sound.n_samples(), 8000);
        assert!((sound.duration() - 1.0).abs() < 1e-12);
        assert!((sound.dx() - 1.0 / 8000.0).abs() < 1e-15);
    }

    #[test]
    fn empty_signal_is_rejected() {
        let sound = Sound::from_slice(&[], 8000.0);
        assert!(matches!(
            sound.ensure_analyzable(),
            Err(crate::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn non_positive_sample_rate_is_rejected() {
        let sound = Sound::from_slice(&[0.1, 0.2], 0.0);
        assert!(matches!(
            sound.ensure_analyzable(),
            Err(crate::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn display_summarizes_signal() {
        let sound = Sound::from_slice(&[0.0; 4000], 8000.0);
        assert_eq!(format!("{}", sound), "Sound(4000 samples, 8000 Hz, 0.500s)");
    }
}
