use dash_engine::audio::synth::ATTACK;
use dash_engine::{AudioBackend, AudioError, Tone, Waveform};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

/// Exponential ramps cannot reach zero; fade to this instead.
const SILENCE: f32 = 0.0001;

/// Web Audio output: one oscillator and gain node per tone.
pub struct WebAudioBackend {
    ctx: AudioContext,
}

impl WebAudioBackend {
    /// `None` when the browser has no Web Audio support.
    pub fn new() -> Option<Self> {
        match AudioContext::new() {
            Ok(ctx) => Some(Self { ctx }),
            Err(err) => {
                log::warn!("Web Audio unavailable: {:?}", err);
                None
            }
        }
    }

    fn schedule(&self, tone: &Tone, volume: f32) -> Result<(), JsValue> {
        let now = self.ctx.current_time();
        let end = now + f64::from(tone.duration);

        let osc = self.ctx.create_oscillator()?;
        osc.set_type(oscillator_type(tone.waveform));
        let freq = osc.frequency();
        freq.set_value_at_time(tone.start_hz, now)?;
        freq.exponential_ramp_to_value_at_time(tone.end_hz.max(SILENCE), end)?;

        let gain = self.ctx.create_gain()?;
        let peak = (tone.gain * volume).max(SILENCE);
        let level = gain.gain();
        level.set_value_at_time(0.0, now)?;
        level.linear_ramp_to_value_at_time(peak, now + f64::from(ATTACK))?;
        level.exponential_ramp_to_value_at_time(SILENCE, end)?;

        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.ctx.destination())?;
        osc.start_with_when(now)?;
        osc.stop_with_when(end)?;
        Ok(())
    }
}

impl AudioBackend for WebAudioBackend {
    fn resume(&mut self) -> Result<(), AudioError> {
        match self.ctx.state() {
            AudioContextState::Closed => Err(AudioError::Unavailable),
            AudioContextState::Running => Ok(()),
            _ => self
                .ctx
                .resume()
                .map(|_promise| ())
                .map_err(|err| AudioError::Backend(format!("{:?}", err))),
        }
    }

    fn play_tone(&mut self, tone: &Tone, volume: f32) -> Result<(), AudioError> {
        if self.ctx.state() == AudioContextState::Closed {
            return Err(AudioError::Unavailable);
        }
        self.schedule(tone, volume)
            .map_err(|err| AudioError::Backend(format!("{:?}", err)))
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Triangle => OscillatorType::Triangle,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
    }
}
