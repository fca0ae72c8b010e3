//! Procedural sound effects.
//!
//! Every effect is a single oscillator sweep with a short attack and an
//! exponential-style release, described by a [`Tone`]. Hosts with an
//! oscillator API schedule the tone directly; others render samples.

use crate::api::config::Frequencies;
use crate::api::types::SoundEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    pub fn as_str(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    /// One sample at `phase` in cycles, output in [-1, 1].
    fn sample(self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (p * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * p - 1.0,
        }
    }
}

/// A frequency sweep from `start_hz` to `end_hz` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration: f32,
    pub waveform: Waveform,
    /// Peak gain relative to the master volume.
    pub gain: f32,
}

/// Seconds of linear attack at the start of every tone.
pub const ATTACK: f32 = 0.005;

impl Tone {
    pub fn for_effect(effect: SoundEffect, freqs: &Frequencies) -> Self {
        match effect {
            // Short upward chirp.
            SoundEffect::Jump => Tone {
                start_hz: freqs.jump,
                end_hz: freqs.jump * 2.0,
                duration: 0.12,
                waveform: Waveform::Square,
                gain: 0.6,
            },
            SoundEffect::Collect => Tone {
                start_hz: freqs.collect,
                end_hz: freqs.collect * 1.5,
                duration: 0.1,
                waveform: Waveform::Sine,
                gain: 0.8,
            },
            // Long downward slide.
            SoundEffect::GameOver => Tone {
                start_hz: freqs.game_over,
                end_hz: freqs.game_over * 0.5,
                duration: 0.5,
                waveform: Waveform::Sawtooth,
                gain: 0.7,
            },
        }
    }

    /// Instantaneous frequency at `t` seconds (exponential sweep).
    pub fn frequency_at(&self, t: f32) -> f32 {
        if self.duration <= 0.0 || self.start_hz <= 0.0 || self.end_hz <= 0.0 {
            return self.start_hz.max(0.0);
        }
        let progress = (t / self.duration).clamp(0.0, 1.0);
        self.start_hz * (self.end_hz / self.start_hz).powf(progress)
    }

    /// Envelope gain at `t` seconds, 0 outside the tone.
    pub fn envelope_at(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration {
            return 0.0;
        }
        let attack = ATTACK.min(self.duration);
        let level = if t < attack {
            t / attack
        } else {
            let release = (t - attack) / (self.duration - attack).max(f32::EPSILON);
            (1.0 - release).powi(2)
        };
        level * self.gain
    }
}

/// Render `tone` to mono samples at `sample_rate`, scaled by `volume`.
pub fn synthesize(tone: &Tone, sample_rate: u32, volume: f32) -> Vec<f32> {
    if sample_rate == 0 || !(tone.duration > 0.0) {
        return Vec::new();
    }
    let len = (tone.duration * sample_rate as f32).ceil() as usize;
    let step = 1.0 / sample_rate as f32;
    let volume = volume.clamp(0.0, 1.0);

    let mut phase = 0.0f32;
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let t = i as f32 * step;
        out.push(tone.waveform.sample(phase) * tone.envelope_at(t) * volume);
        phase = (phase + tone.frequency_at(t) * step).fract();
    }
    out
}
