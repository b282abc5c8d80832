//! Run every analysis on a WAV file and print a summary.
//!
//! Usage: cargo run --example extract_all -- path/to/audio.wav

use prosodic::{Sound, SilenceParams, SpeakingRateDetector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: extract_all <audio.wav>")?;

    // Load mono, falling back to channel 0 for multi-channel files.
    let sound = match Sound::from_file(&path) {
        Ok(s) => s,
        Err(prosodic::Error::NotMono(channels)) => {
            println!("({} channels, extracting channel 0)", channels);
            Sound::from_file_channel(&path, 0)?
        }
        Err(e) => return Err(e.into()),
    };
    println!("{}", sound);

    print!("  Pitch... ");
    let pitch = sound.to_pitch(2048, 512, 65.41, 2093.0)?;
    println!(
        "OK ({} frames, {} voiced)",
        pitch.n_frames(),
        pitch.voiced_count()
    );

    print!("  Energy... ");
    let energy = sound.to_energy(2048, 512)?;
    let mean_rms: f64 = energy.values().iter().sum::<f64>() / energy.n_frames() as f64;
    println!("OK ({} frames, mean RMS {:.4})", energy.n_frames(), mean_rms);

    print!("  Intensity... ");
    let intensity = sound.to_intensity(100.0, 0.0)?;
    println!(
        "OK ({} frames, max {} dB)",
        intensity.n_frames(),
        intensity
            .max_db()
            .map(|m| format!("{:.1}", m))
            .unwrap_or_else(|| "-inf".into())
    );

    print!("  Intonation... ");
    let intonation = sound.to_intonation(2048, 512, 150.0, 4000.0)?;
    let pitched = intonation.frequencies().iter().filter(|&&f| f > 0.0).count();
    println!("OK ({} frames, {} pitched)", intonation.n_frames(), pitched);

    print!("  Zero-crossing rate... ");
    let zcr = sound.to_zero_crossing_rate(2048, 512)?;
    let mean_zcr: f64 = zcr.values().iter().sum::<f64>() / zcr.n_frames() as f64;
    println!("OK ({} frames, mean {:.4})", zcr.n_frames(), mean_zcr);

    print!("  Autocorrelation... ");
    let ac = sound.to_autocorrelation(Some(2048))?;
    println!("OK ({} lags, r0 = {:.3})", ac.n_lags(), ac.values()[0]);

    print!("  Silences... ");
    let silences = sound.to_silences(&SilenceParams::default())?;
    println!("OK ({} intervals)", silences.len());

    print!("  Speaking rate... ");
    let result = SpeakingRateDetector::new().compute(&sound)?;
    println!(
        "OK ({:.2} syl/s, {} pauses)",
        result.speaking_rate,
        result.pauses.len()
    );
    for (i, pause) in result.pauses.iter().enumerate() {
        println!(
            "    pause {}: {:.3}s - {:.3}s ({:.3}s)",
            i + 1,
            pause.start,
            pause.end,
            pause.duration()
        );
    }

    Ok(())
}
