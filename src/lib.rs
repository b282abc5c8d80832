//! # prosodic
//!
//! Prosodic and temporal speech feature extraction.
//!
//! This library extracts the standard descriptive features of a speech
//! recording:
//!
//! - **Pitch**: fundamental frequency (F0) track
//! - **Energy**: frame-based RMS amplitude contour
//! - **Intensity**: loudness contour in dB
//! - **Speaking rate + pauses**: syllable-rate estimate and silence
//!   intervals
//! - **Intonation**: dominant spectral peak (frequency + magnitude) track
//! - **Zero-crossing rate**: frame-based sign-change contour
//! - **Autocorrelation**: full-signal autocorrelation with a lag axis
//!
//! Most features are thin framings over well-known signal-processing
//! primitives; the one composite analysis is the speaking-rate and pause
//! detector, which combines intensity thresholding with silence
//! segmentation.
//!
//! # Quick Start
//!
//! ```no_run
//! use prosodic::Sound;
//!
//! // Load a mono WAV file
//! let sound = Sound::from_file("speech.wav").unwrap();
//!
//! // F0 track: frame 2048 samples, hop 512, band 65.41-2093 Hz
//! let pitch = sound.to_pitch(2048, 512, 65.41, 2093.0).unwrap();
//! println!("{} voiced frames", pitch.voiced_count());
//!
//! // Speaking rate and pauses with the default engines
//! let result = sound.speaking_rate_and_pauses().unwrap();
//! println!("{:.1} syl/s, {} pauses", result.speaking_rate, result.pauses.len());
//! ```
//!
//! # Module Organization
//!
//! Each feature has its own module containing:
//! - A result struct (e.g. `PitchTrack`, `IntensityContour`)
//! - A conversion function (e.g. `sound_to_pitch`)
//! - Supporting types and constants
//!
//! The `Sound` struct provides convenience methods that delegate to these
//! modules. The speaking-rate detector additionally exposes its two input
//! analyses as injectable traits ([`IntensityEngine`], [`SilenceEngine`])
//! so they can be replaced with deterministic fixtures in tests.
//!
//! # Errors
//!
//! Every analysis returns [`Result`]. Bad input (empty signal, zero
//! duration, broken parameters) is reported as `InvalidInput` /
//! `InvalidParameter`; computation failures as `AnalysisFailed`. Nothing
//! is retried and no partial results are returned.

// Module declarations
pub mod autocorrelation;
pub mod energy;
pub mod error;
pub mod intensity;
pub mod intonation;
pub mod pitch;
pub mod silence;
pub mod sound;
pub mod speaking_rate;
pub mod zero_crossing;

// Re-export main types at crate root for convenient access.

/// Error types.
pub use error::{Error, Result};

/// Audio container; the input to every analysis.
pub use sound::Sound;

/// Intensity (loudness) contour in dB.
pub use intensity::{sound_to_intensity, IntensityContour};

/// Fundamental frequency (F0) track.
pub use pitch::{sound_to_pitch, PitchTrack, DEFAULT_F0_CEILING_HZ, DEFAULT_F0_FLOOR_HZ};

/// RMS energy contour.
pub use energy::{sound_to_energy, EnergyContour};

/// Dominant-spectral-peak intonation track.
pub use intonation::{
    sound_to_intonation, IntonationTrack, DEFAULT_INTONATION_CEILING_HZ,
    DEFAULT_INTONATION_FLOOR_HZ,
};

/// Zero-crossing-rate contour.
pub use zero_crossing::{sound_to_zero_crossing_rate, ZeroCrossingContour};

/// Full-signal autocorrelation.
pub use autocorrelation::{sound_to_autocorrelation, Autocorrelation};

/// Silence segmentation types and parameters.
pub use silence::{sound_to_silences, IntervalLabel, LabeledInterval, SilenceParams};

/// Speaking-rate and pause detection.
pub use speaking_rate::{
    IntensityEngine, Pause, SilenceEngine, SpeakingRateDetector, SpeakingRateResult,
    StandardIntensityEngine, ThresholdSilenceEngine, SYLLABLE_THRESHOLD_FRACTION,
};
