//! Synthesized UI sound effects.
//!
//! Effects are generated once per sample rate into mono `f32` PCM and
//! handed to an [`AudioBackend`]. Playback is best-effort.

use std::collections::HashMap;
use std::f32::consts::TAU;

use crate::backend::AudioBackend;

/// Sound effect identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    /// Soft downward blip on every carousel step.
    Move,
    /// A-major chord on confirm and button presses.
    Select,
    /// Silent buffer played at startup so the device is awake for the
    /// first real effect.
    WarmUp,
}

// ---------------------------------------------------------------------------
// PCM generators
// ---------------------------------------------------------------------------

const MOVE_SECS: f32 = 0.1;
const SELECT_SECS: f32 = 0.6;
const WARMUP_SECS: f32 = 0.1;
const SELECT_CHORD: [f32; 3] = [440.0, 554.0, 659.0];

/// Exponential ramp from `from` to `to` over `progress` in `[0, 1]`.
fn exp_ramp(from: f32, to: f32, progress: f32) -> f32 {
    from * (to / from).powf(progress.clamp(0.0, 1.0))
}

/// Unit triangle wave for a phase in cycles.
fn triangle(phase: f32) -> f32 {
    let p = phase.fract();
    4.0 * (p - 0.5).abs() - 1.0
}

fn sample_count(secs: f32, sample_rate: u32) -> usize {
    (secs * sample_rate as f32).round() as usize
}

fn generate_move(sample_rate: u32) -> Vec<f32> {
    let n = sample_count(MOVE_SECS, sample_rate);
    let sr = sample_rate as f32;
    let mut phase = 0.0f32;
    (0..n)
        .map(|i| {
            let p = i as f32 / n as f32;
            let freq = exp_ramp(400.0, 100.0, p);
            let gain = exp_ramp(0.15, 0.01, p);
            let s = (phase * TAU).sin() * gain;
            phase = (phase + freq / sr).fract();
            s
        })
        .collect()
}

fn generate_select(sample_rate: u32) -> Vec<f32> {
    let n = sample_count(SELECT_SECS, sample_rate);
    let sr = sample_rate as f32;
    (0..n)
        .map(|i| {
            let t = i as f32 / sr;
            let gain = exp_ramp(0.1, 0.01, i as f32 / n as f32);
            SELECT_CHORD
                .iter()
                .map(|f| triangle(t * f) * gain)
                .sum::<f32>()
        })
        .collect()
}

/// Mono PCM for `sfx`, scaled by `volume`.
pub fn synthesize(sfx: Sfx, sample_rate: u32, volume: f32) -> Vec<f32> {
    let volume = volume.clamp(0.0, 1.0);
    let raw = match sfx {
        Sfx::Move => generate_move(sample_rate),
        Sfx::Select => generate_select(sample_rate),
        Sfx::WarmUp => return vec![0.0; sample_count(WARMUP_SECS, sample_rate)],
    };
    raw.into_iter().map(|s| s * volume).collect()
}

// ---------------------------------------------------------------------------
// Bank
// ---------------------------------------------------------------------------

/// Lazily synthesized effect cache bound to one output device.
pub struct SoundBank {
    volume: f32,
    enabled: bool,
    cache: HashMap<Sfx, Vec<f32>>,
}

impl SoundBank {
    pub fn new(enabled: bool, volume: f32) -> Self {
        Self {
            volume,
            enabled,
            cache: HashMap::new(),
        }
    }

    pub fn samples(&mut self, sfx: Sfx, sample_rate: u32) -> &[f32] {
        let volume = self.volume;
        self.cache
            .entry(sfx)
            .or_insert_with(|| synthesize(sfx, sample_rate, volume))
    }

    /// Play `sfx`; failures are logged and swallowed.
    pub fn play(&mut self, sfx: Sfx, audio: &mut dyn AudioBackend) {
        if !self.enabled {
            return;
        }
        let rate = audio.sample_rate();
        let samples = self.samples(sfx, rate);
        if let Err(e) = audio.play_samples(samples) {
            log::debug!("Sound {sfx:?} dropped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MarqueeError, Result};

    const RATE: u32 = 44_100;

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<usize>,
        fail: bool,
    }

    impl AudioBackend for RecordingAudio {
        fn sample_rate(&self) -> u32 {
            RATE
        }

        fn play_samples(&mut self, samples: &[f32]) -> Result<()> {
            if self.fail {
                return Err(MarqueeError::Audio("device gone".into()));
            }
            self.played.push(samples.len());
            Ok(())
        }
    }

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn durations_match() {
        assert_eq!(synthesize(Sfx::Move, RATE, 1.0).len(), 4410);
        assert_eq!(synthesize(Sfx::Select, RATE, 1.0).len(), 26_460);
        assert_eq!(synthesize(Sfx::WarmUp, RATE, 1.0).len(), 4410);
    }

    #[test]
    fn warm_up_is_silent() {
        assert_eq!(peak(&synthesize(Sfx::WarmUp, RATE, 1.0)), 0.0);
    }

    #[test]
    fn move_decays() {
        let pcm = synthesize(Sfx::Move, RATE, 1.0);
        assert!(peak(&pcm) <= 0.15 + 1e-6);
        assert!(peak(&pcm[..441]) > peak(&pcm[pcm.len() - 441..]));
        assert!(peak(&pcm[pcm.len() - 441..]) < 0.03);
    }

    #[test]
    fn select_chord_is_bounded() {
        let pcm = synthesize(Sfx::Select, RATE, 1.0);
        assert!(peak(&pcm) <= 0.3 + 1e-6);
        assert!(peak(&pcm) > 0.05);
    }

    #[test]
    fn volume_scales_output() {
        let full = peak(&synthesize(Sfx::Select, RATE, 1.0));
        let half = peak(&synthesize(Sfx::Select, RATE, 0.5));
        assert!((half - full * 0.5).abs() < 1e-5);
        assert_eq!(peak(&synthesize(Sfx::Move, RATE, 0.0)), 0.0);
    }

    #[test]
    fn ramp_endpoints() {
        assert!((exp_ramp(400.0, 100.0, 0.0) - 400.0).abs() < 1e-3);
        assert!((exp_ramp(400.0, 100.0, 1.0) - 100.0).abs() < 1e-3);
        assert!((exp_ramp(400.0, 100.0, 0.5) - 200.0).abs() < 1e-2);
    }

    #[test]
    fn triangle_shape() {
        assert_eq!(triangle(0.0), 1.0);
        assert_eq!(triangle(0.5), -1.0);
        assert_eq!(triangle(0.25), 0.0);
    }

    #[test]
    fn bank_plays_and_caches() {
        let mut bank = SoundBank::new(true, 1.0);
        let mut audio = RecordingAudio::default();
        bank.play(Sfx::Move, &mut audio);
        bank.play(Sfx::Move, &mut audio);
        assert_eq!(audio.played, vec![4410, 4410]);
        assert_eq!(bank.cache.len(), 1);
    }

    #[test]
    fn disabled_bank_is_silent() {
        let mut bank = SoundBank::new(false, 1.0);
        let mut audio = RecordingAudio::default();
        bank.play(Sfx::Select, &mut audio);
        assert!(audio.played.is_empty());
    }

    #[test]
    fn playback_errors_are_swallowed() {
        let mut bank = SoundBank::new(true, 1.0);
        let mut audio = RecordingAudio {
            fail: true,
            ..RecordingAudio::default()
        };
        bank.play(Sfx::Select, &mut audio);
    }
}
