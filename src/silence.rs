//! Silence segmentation - labeled silent/sounding intervals.
//!
//! Partitions a signal's time span into contiguous intervals labeled
//! silent or sounding, from its intensity contour:
//!
//! 1. Compute the intensity contour (dB) at the configured minimum pitch.
//! 2. A frame is silent when its intensity sits more than
//!    `silence_threshold_db` below the contour maximum (the threshold is
//!    relative, so recording gain does not move it).
//! 3. Frame runs become intervals; boundaries fall at the midpoint
//!    between the last frame of one run and the first frame of the next,
//!    clamped so the intervals cover [0, duration] exactly.
//! 4. Runs shorter than the configured minimums are absorbed: first every
//!    too-short silent run turns sounding, then every too-short sounding
//!    run turns silent, and same-label neighbors merge.
//!
//! The output is ordered by start time, gap-free and overlap-free.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::intensity::sound_to_intensity;
use crate::sound::Sound;

/// Default minimum pitch for the underlying intensity analysis, Hz.
pub const DEFAULT_SILENCE_MIN_PITCH_HZ: f64 = 100.0;

/// Default silence threshold relative to the contour maximum, dB.
pub const DEFAULT_SILENCE_THRESHOLD_DB: f64 = -25.0;

/// Default minimum duration of a silent interval, seconds.
pub const DEFAULT_MIN_SILENT_DURATION_S: f64 = 0.1;

/// Default minimum duration of a sounding interval, seconds.
pub const DEFAULT_MIN_SOUNDING_DURATION_S: f64 = 0.1;

/// Parameters for silence segmentation.
///
/// The defaults form a fixed configuration surface; none of them is tuned
/// per signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilenceParams {
    /// Minimum pitch in Hz for the intensity analysis window.
    pub min_pitch: f64,

    /// Intensity time step in seconds; 0 = automatic (0.8 / min_pitch).
    pub time_step: f64,

    /// Threshold in dB relative to the maximum intensity; frames further
    /// below the maximum than this are silent. Negative by convention.
    pub silence_threshold_db: f64,

    /// Silent intervals shorter than this are absorbed into speech.
    pub min_silent_duration: f64,

    /// Sounding intervals shorter than this are absorbed into silence.
    pub min_sounding_duration: f64,
}

impl Default for SilenceParams {
    fn default() -> Self {
        Self {
            min_pitch: DEFAULT_SILENCE_MIN_PITCH_HZ,
            time_step: 0.0,
            silence_threshold_db: DEFAULT_SILENCE_THRESHOLD_DB,
            min_silent_duration: DEFAULT_MIN_SILENT_DURATION_S,
            min_sounding_duration: DEFAULT_MIN_SOUNDING_DURATION_S,
        }
    }
}

/// Classification of one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalLabel {
    /// Below the silence threshold.
    Silent,
    /// At or above the silence threshold.
    Sounding,
}

/// One labeled time interval, start <= end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledInterval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Silent or sounding.
    pub label: IntervalLabel,
}

impl LabeledInterval {
    /// Interval duration in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the interval is silent.
    #[inline]
    pub fn is_silent(&self) -> bool {
        self.label == IntervalLabel::Silent
    }
}

/// Merge adjacent intervals that share a label.
fn merge_adjacent(intervals: Vec<LabeledInterval>) -> Vec<LabeledInterval> {
    let mut merged: Vec<LabeledInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if last.label == interval.label => last.end = interval.end,
            _ => merged.push(interval),
        }
    }
    merged
}

/// Relabel intervals of `label` shorter than `min_duration`, then merge.
///
/// The first and last intervals are kept even when short: the signal edge
/// truncates them, which says nothing about the underlying segment.
fn absorb_short(
    intervals: Vec<LabeledInterval>,
    label: IntervalLabel,
    min_duration: f64,
    into: IntervalLabel,
) -> Vec<LabeledInterval> {
    let n = intervals.len();
    let relabeled = intervals
        .into_iter()
        .enumerate()
        .map(|(i, mut interval)| {
            let interior = i > 0 && i + 1 < n;
            if interior && interval.label == label && interval.duration() < min_duration {
                interval.label = into;
            }
            interval
        })
        .collect();
    merge_adjacent(relabeled)
}

/// Segment a sound into silent and sounding intervals.
///
/// The returned intervals cover [0, duration] contiguously in time order.
/// A signal that never rises above the threshold (or never falls below
/// it) yields a single interval.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for an empty signal or non-positive sample rate.
/// - [`Error::InvalidParameter`] for a non-positive `min_pitch` or
///   negative durations.
pub fn sound_to_silences(sound: &Sound, params: &SilenceParams) -> Result<Vec<LabeledInterval>> {
    if params.min_silent_duration < 0.0 || params.min_sounding_duration < 0.0 {
        return Err(Error::InvalidParameter(
            "minimum interval durations must be >= 0".into(),
        ));
    }

    let contour = sound_to_intensity(sound, params.min_pitch, params.time_step)?;
    let duration = sound.duration();
    let times = contour.times();
    let values = contour.values();

    // No finite frame at all: the whole signal is one silent interval.
    let max_db = match contour.max_db() {
        Some(m) => m,
        None => {
            return Ok(vec![LabeledInterval {
                start: 0.0,
                end: duration,
                label: IntervalLabel::Silent,
            }]);
        }
    };
    let threshold_db = max_db + params.silence_threshold_db;

    // Frame classification -> runs with midpoint boundaries.
    let mut intervals: Vec<LabeledInterval> = Vec::new();
    let mut run_label = label_of(values[0], threshold_db);
    let mut run_start = 0.0;

    for i in 1..contour.n_frames() {
        let label = label_of(values[i], threshold_db);
        if label != run_label {
            let boundary = 0.5 * (times[i - 1] + times[i]);
            intervals.push(LabeledInterval {
                start: run_start,
                end: boundary,
                label: run_label,
            });
            run_start = boundary;
            run_label = label;
        }
    }
    intervals.push(LabeledInterval {
        start: run_start,
        end: duration,
        label: run_label,
    });

    // Short-run absorption: silence first, then speech.
    let intervals = absorb_short(
        intervals,
        IntervalLabel::Silent,
        params.min_silent_duration,
        IntervalLabel::Sounding,
    );
    let intervals = absorb_short(
        intervals,
        IntervalLabel::Sounding,
        params.min_sounding_duration,
        IntervalLabel::Silent,
    );

    log::debug!(
        "silences: {} intervals ({} silent), threshold {:.1} dB (max {:.1} dB)",
        intervals.len(),
        intervals.iter().filter(|i| i.is_silent()).count(),
        threshold_db,
        max_db
    );

    Ok(intervals)
}

#[inline]
fn label_of(value_db: f64, threshold_db: f64) -> IntervalLabel {
    if value_db < threshold_db {
        IntervalLabel::Silent
    } else {
        IntervalLabel::Sounding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// tone - silence - tone, half a second each, at 8 kHz.
    fn tone_gap_tone() -> Sound {
        let sample_rate = 8000.0;
        let tone = |i: usize| (2.0 * std::f64::consts::PI * 220.0 * i as f64 / sample_rate).sin();
        let mut samples = Vec::with_capacity(12000);
        samples.extend((0..4000).map(tone));
        samples.extend(std::iter::repeat(0.0).take(4000));
        samples.extend((8000..12000).map(tone));
        Sound::from_slice(&samples, sample_rate)
    }

    fn assert_contiguous_cover(intervals: &[LabeledInterval], duration: f64) {
        assert!(!intervals.is_empty());
        assert_eq!(intervals[0].start, 0.0);
        assert!((intervals.last().unwrap().end - duration).abs() < 1e-9);
        for pair in intervals.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < 1e-9);
            assert_ne!(pair[0].label, pair[1].label, "adjacent labels must differ");
        }
        for interval in intervals {
            assert!(interval.start <= interval.end);
        }
    }

    #[test]
    fn default_params_match_documented_constants() {
        let params = SilenceParams::default();
        assert_eq!(params.min_pitch, 100.0);
        assert_eq!(params.time_step, 0.0);
        assert_eq!(params.silence_threshold_db, -25.0);
        assert_eq!(params.min_silent_duration, 0.1);
        assert_eq!(params.min_sounding_duration, 0.1);
    }

    #[test]
    fn gap_between_tones_is_found() {
        let sound = tone_gap_tone();
        let intervals = sound_to_silences(&sound, &SilenceParams::default()).unwrap();
        assert_contiguous_cover(&intervals, sound.duration());

        let silent: Vec<&LabeledInterval> =
            intervals.iter().filter(|i| i.is_silent()).collect();
        assert_eq!(silent.len(), 1);
        // The gap spans [0.5, 1.0]; boundary placement is frame-quantized
        // and the analysis window bleeds tone energy inward, so only the
        // rough location is checked.
        assert!(silent[0].start > 0.4 && silent[0].start < 0.65);
        assert!(silent[0].end > 0.85 && silent[0].end < 1.1);
    }

    #[test]
    fn all_silent_signal_is_one_interval() {
        let sound = Sound::from_slice(&[0.0; 8000], 8000.0);
        let intervals = sound_to_silences(&sound, &SilenceParams::default()).unwrap();
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].is_silent());
        assert_eq!(intervals[0].start, 0.0);
        assert!((intervals[0].end - 1.0).abs() < 1e-9);
    }

    #[test]
    fn steady_tone_is_one_sounding_interval() {
        let sample_rate = 8000.0;
        let samples: Vec<f64> = (0..8000)
            .map(|i| (2.0 * std::f64::consts::PI * 220.0 * i as f64 / sample_rate).sin())
            .collect();
        let sound = Sound::from_slice(&samples, sample_rate);
        let intervals = sound_to_silences(&sound, &SilenceParams::default()).unwrap();
        assert_eq!(intervals.len(), 1);
        assert!(!intervals[0].is_silent());
        assert_contiguous_cover(&intervals, sound.duration());
    }

    #[test]
    fn short_gaps_are_absorbed() {
        // An 80 ms gap leaves a silent run of roughly 40 ms once the
        // analysis window has bled tone energy inward, below the 100 ms
        // minimum, so it must be folded back into speech.
        let sample_rate = 8000.0;
        let tone = |i: usize| (2.0 * std::f64::consts::PI * 220.0 * i as f64 / sample_rate).sin();
        let mut samples = Vec::new();
        samples.extend((0..4000).map(tone));
        samples.extend(std::iter::repeat(0.0).take(640));
        samples.extend((4640..8640).map(tone));
        let sound = Sound::from_slice(&samples, sample_rate);

        let intervals = sound_to_silences(&sound, &SilenceParams::default()).unwrap();
        assert_eq!(intervals.len(), 1);
        assert!(!intervals[0].is_silent());
    }

    #[test]
    fn negative_durations_are_rejected() {
        let sound = tone_gap_tone();
        let params = SilenceParams {
            min_silent_duration: -1.0,
            ..SilenceParams::default()
        };
        assert!(matches!(
            sound_to_silences(&sound, &params),
            Err(Error::InvalidParameter(_))
        ));
    }
}
