//! Error types for prosodic.
//!
//! All fallible operations in this crate return [`Result`]. The error enum
//! separates the two failure families callers care about: bad input (the
//! signal itself is unusable) and analysis failure (the signal was
//! plausible but a computation could not produce a result). Errors
//! propagate immediately; no operation retries or returns partial results.

use thiserror::Error;

/// Result type alias using prosodic's [`Error`] type.
///
/// # Example
///
/// ```no_run
/// use prosodic::{Result, Sound};
///
/// fn analyze(path: &str) -> Result<()> {
///     let sound = Sound::from_file(path)?;
///     let intensity = sound.to_intensity(100.0, 0.0)?;
///     println!("{} intensity frames", intensity.n_frames());
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading audio or extracting features.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading an audio file.
    ///
    /// Wraps errors from the `hound` WAV library: file not found, not a
    /// valid WAV file, corrupted sample data.
    #[error("Failed to read audio file: {0}")]
    AudioRead(#[from] hound::Error),

    /// General I/O error not specific to WAV decoding.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio file must be mono.
    ///
    /// Only single-channel audio is analyzed. For multi-channel files,
    /// select a channel explicitly with [`Sound::from_file_channel`].
    ///
    /// [`Sound::from_file_channel`]: crate::Sound::from_file_channel
    #[error("Audio must be mono (single channel), got {0} channels")]
    NotMono(u16),

    /// The input signal itself is unusable.
    ///
    /// Returned for an empty signal, a non-positive duration, or a
    /// non-positive sample rate. Distinguished from [`Error::AnalysisFailed`]
    /// so callers can reject the input outright instead of retrying with
    /// different parameters.
    #[error("Invalid input signal: {0}")]
    InvalidInput(String),

    /// An analysis parameter is outside its valid range.
    ///
    /// Examples: zero or negative minimum pitch, a frame length shorter
    /// than two samples, a pitch floor above the ceiling.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// An analysis computation failed to produce a result.
    ///
    /// The signal passed input validation but the underlying computation
    /// could not complete, e.g. an empty intensity contour or a degenerate
    /// spectrum.
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}
