//! SDL2 audio queue output for synthesized sound effects.

use sdl2::AudioSubsystem;
use sdl2::audio::{AudioQueue, AudioSpecDesired};

use marquee_types::backend::AudioBackend;
use marquee_types::error::{MarqueeError, Result};

/// Requested output rate.
pub const SAMPLE_RATE: i32 = 44_100;

/// Mono `f32` queue. A new effect is mixed into whatever is still queued,
/// starting immediately, so overlapping cues play together without adding
/// latency.
pub struct SdlAudio {
    queue: AudioQueue<f32>,
    sample_rate: u32,
    /// Last buffer handed to the queue; its unplayed tail is still queued.
    queued: Vec<f32>,
}

/// Sum `incoming` onto `pending` sample by sample, clamped to `[-1, 1]`.
/// The result is as long as the longer input.
pub fn mix(pending: &[f32], incoming: &[f32]) -> Vec<f32> {
    let len = pending.len().max(incoming.len());
    (0..len)
        .map(|i| {
            let a = pending.get(i).copied().unwrap_or(0.0);
            let b = incoming.get(i).copied().unwrap_or(0.0);
            (a + b).clamp(-1.0, 1.0)
        })
        .collect()
}

impl SdlAudio {
    pub fn open(subsystem: &AudioSubsystem) -> Result<Self> {
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: Some(1024),
        };
        let queue = subsystem
            .open_queue::<f32, _>(None, &desired)
            .map_err(MarqueeError::Audio)?;
        let spec = queue.spec();
        let sample_rate = u32::try_from(spec.freq).unwrap_or(SAMPLE_RATE as u32);
        queue.resume();
        log::info!(
            "Audio queue open: {} Hz, {} channel(s)",
            spec.freq,
            spec.channels
        );
        Ok(Self {
            queue,
            sample_rate,
            queued: Vec::new(),
        })
    }
}

impl AudioBackend for SdlAudio {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play_samples(&mut self, samples: &[f32]) -> Result<()> {
        let remaining = (self.queue.size() as usize / size_of::<f32>()).min(self.queued.len());
        let tail = &self.queued[self.queued.len() - remaining..];
        let mixed = mix(tail, samples);
        self.queue.clear();
        self.queue.queue_audio(&mixed).map_err(MarqueeError::Audio)?;
        self.queued = mixed;
        Ok(())
    }
}
