//! Speaking rate and pause detection.
//!
//! The one composite analysis in the crate: it combines an intensity
//! contour (syllable estimate) with a silence segmentation (pause list)
//! into a single result.
//!
//! # Algorithm
//!
//! 1. Compute the intensity contour.
//! 2. `threshold = 0.3 × max(contour values)`; every contour sample
//!    **strictly** above the threshold counts once toward the syllable
//!    estimate.
//! 3. `speaking_rate = count / duration`, in syllables per second.
//! 4. Segment the signal into silent/sounding intervals with a fixed
//!    parameter set and keep the silent ones, in time order, as pauses.
//!
//! The syllable estimate counts individual contour samples above the
//! threshold rather than contiguous peak regions, so sustained loud
//! stretches inflate it. That behavior is part of the contract; changing
//! it changes the numbers callers see.
//!
//! # Engine injection
//!
//! Both signal sources sit behind traits ([`IntensityEngine`],
//! [`SilenceEngine`]) so tests can substitute deterministic fixtures for
//! the real analyses. [`SpeakingRateDetector::new`] wires the production
//! engines.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::intensity::{sound_to_intensity, IntensityContour};
use crate::silence::{sound_to_silences, LabeledInterval, SilenceParams};
use crate::sound::Sound;

/// Fraction of the contour maximum used as the syllable threshold.
///
/// A fixed heuristic, not adaptively tuned.
pub const SYLLABLE_THRESHOLD_FRACTION: f64 = 0.3;

/// Minimum pitch for the detector's intensity analysis, Hz.
pub const DEFAULT_INTENSITY_MIN_PITCH_HZ: f64 = 100.0;

/// Source of intensity contours.
///
/// The production implementation is [`StandardIntensityEngine`]; tests
/// inject fixtures returning hand-built contours.
pub trait IntensityEngine {
    /// Compute the intensity contour of `sound`.
    fn analyze(&self, sound: &Sound) -> Result<IntensityContour>;
}

/// Source of silence segmentations.
///
/// The production implementation is [`ThresholdSilenceEngine`]; tests
/// inject fixtures returning hand-built interval lists.
pub trait SilenceEngine {
    /// Partition [0, duration] of `sound` into labeled intervals.
    fn segment(&self, sound: &Sound, params: &SilenceParams) -> Result<Vec<LabeledInterval>>;
}

/// Production intensity engine: the crate's own contour analysis.
#[derive(Debug, Clone)]
pub struct StandardIntensityEngine {
    /// Minimum pitch in Hz for the analysis window.
    pub min_pitch: f64,
    /// Time step in seconds; 0 = automatic.
    pub time_step: f64,
}

impl Default for StandardIntensityEngine {
    fn default() -> Self {
        Self {
            min_pitch: DEFAULT_INTENSITY_MIN_PITCH_HZ,
            time_step: 0.0,
        }
    }
}

impl IntensityEngine for StandardIntensityEngine {
    fn analyze(&self, sound: &Sound) -> Result<IntensityContour> {
        sound_to_intensity(sound, self.min_pitch, self.time_step)
    }
}

/// Production silence engine: intensity-threshold segmentation.
#[derive(Debug, Clone, Default)]
pub struct ThresholdSilenceEngine;

impl SilenceEngine for ThresholdSilenceEngine {
    fn segment(&self, sound: &Sound, params: &SilenceParams) -> Result<Vec<LabeledInterval>> {
        sound_to_silences(sound, params)
    }
}

/// One detected pause, start <= end, within [0, duration].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pause {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl Pause {
    /// Pause duration in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Result of speaking-rate and pause detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakingRateResult {
    /// Estimated speaking rate in syllables per second, >= 0.
    pub speaking_rate: f64,

    /// Detected pauses, ordered by start time.
    pub pauses: Vec<Pause>,
}

/// Speaking-rate and pause detector with injectable engines.
///
/// # Example
///
/// ```no_run
/// use prosodic::{Sound, SpeakingRateDetector};
///
/// let sound = Sound::from_file("speech.wav").unwrap();
/// let result = SpeakingRateDetector::new().compute(&sound).unwrap();
/// println!("{:.1} syl/s, {} pauses", result.speaking_rate, result.pauses.len());
/// ```
#[derive(Debug, Clone)]
pub struct SpeakingRateDetector<I = StandardIntensityEngine, S = ThresholdSilenceEngine> {
    intensity: I,
    segmenter: S,
    silence_params: SilenceParams,
}

impl SpeakingRateDetector {
    /// Detector with the production engines and default segmentation
    /// parameters.
    pub fn new() -> Self {
        Self {
            intensity: StandardIntensityEngine::default(),
            segmenter: ThresholdSilenceEngine,
            silence_params: SilenceParams::default(),
        }
    }
}

impl Default for SpeakingRateDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IntensityEngine, S: SilenceEngine> SpeakingRateDetector<I, S> {
    /// Detector with caller-supplied engines and segmentation parameters.
    pub fn with_engines(intensity: I, segmenter: S, silence_params: SilenceParams) -> Self {
        Self {
            intensity,
            segmenter,
            silence_params,
        }
    }

    /// The segmentation parameters this detector passes to its silence
    /// engine.
    #[inline]
    pub fn silence_params(&self) -> &SilenceParams {
        &self.silence_params
    }

    /// Estimate the speaking rate and detect pauses.
    ///
    /// Pure function of the input and the two engines: nothing persists
    /// across calls, and for deterministic engines two calls on the same
    /// sound return identical results.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for an empty signal (zero duration) or
    ///   non-positive sample rate — never a NaN or infinite rate.
    /// - [`Error::AnalysisFailed`] when the intensity engine returns an
    ///   empty contour.
    /// - Engine failures propagate unchanged.
    pub fn compute(&self, sound: &Sound) -> Result<SpeakingRateResult> {
        sound.ensure_analyzable()?;

        let contour = self.intensity.analyze(sound)?;
        let values = contour.values();
        if values.is_empty() {
            return Err(Error::AnalysisFailed(
                "intensity contour has no frames".into(),
            ));
        }

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let threshold = SYLLABLE_THRESHOLD_FRACTION * max;
        let syllable_count = values.iter().filter(|&&v| v > threshold).count();
        let speaking_rate = syllable_count as f64 / sound.duration();

        let intervals = self.segmenter.segment(sound, &self.silence_params)?;
        let pauses: Vec<Pause> = intervals
            .iter()
            .filter(|i| i.is_silent())
            .map(|i| Pause {
                start: i.start,
                end: i.end,
            })
            .collect();

        log::debug!(
            "speaking rate: {:.2} syl/s ({} contour samples over threshold {:.2}), {} pauses",
            speaking_rate,
            syllable_count,
            threshold,
            pauses.len()
        );

        Ok(SpeakingRateResult {
            speaking_rate,
            pauses,
        })
    }
}
