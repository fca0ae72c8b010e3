use crate::api::config::AudioConfig;
use crate::api::types::SoundEffect;
use crate::audio::synth::Tone;
use crate::error::AudioError;

/// Host audio output. Implementations schedule a tone and return
/// immediately; playback is fire-and-forget.
pub trait AudioBackend {
    /// Resume a suspended output context. Called on the first user gesture.
    fn resume(&mut self) -> Result<(), AudioError>;

    /// Start playing `tone` at `volume` (already includes the master volume).
    fn play_tone(&mut self, tone: &Tone, volume: f32) -> Result<(), AudioError>;
}

type MuteListener = Box<dyn FnMut(bool)>;

/// Sound effect front-end. Every backend failure is logged and swallowed;
/// after an `Unavailable` error the backend is dropped and the system stays
/// silent for the rest of the session.
pub struct AudioSystem {
    config: AudioConfig,
    backend: Option<Box<dyn AudioBackend>>,
    unlocked: bool,
    muted: bool,
    listeners: Vec<(u64, MuteListener)>,
    next_listener: u64,
}

impl AudioSystem {
    pub fn new(config: AudioConfig, backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() && config.enabled {
            log::info!("audio: no backend, running silent");
        }
        let volume = sanitize_volume(config.volume).unwrap_or(0.0);
        Self {
            config: AudioConfig { volume, ..config },
            backend,
            unlocked: false,
            muted: false,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// A system with no backend. Every call is a no-op.
    pub fn silent(config: AudioConfig) -> Self {
        Self::new(config, None)
    }

    /// Resume output after a genuine user gesture. Returns whether audio is
    /// now unlocked. Repeated calls after success do nothing.
    pub fn unlock(&mut self) -> bool {
        if self.unlocked {
            return true;
        }
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };
        match backend.resume() {
            Ok(()) => {
                self.unlocked = true;
                log::info!("audio: unlocked");
            }
            Err(err) => self.degrade(err),
        }
        self.unlocked
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if !self.config.enabled || self.muted || !self.unlocked {
            return;
        }
        let volume = self.config.volume;
        if volume <= 0.0 {
            return;
        }
        let tone = Tone::for_effect(effect, &self.config.frequencies);
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(err) = backend.play_tone(&tone, volume) {
            self.degrade(err);
        }
    }

    /// Set master volume, clamped to [0, 1]. Non-finite values are ignored.
    pub fn set_volume(&mut self, volume: f32) {
        match sanitize_volume(volume) {
            Some(v) => self.config.volume = v,
            None => log::warn!("audio: ignoring volume {}", volume),
        }
    }

    pub fn volume(&self) -> f32 {
        self.config.volume
    }

    pub fn mute(&mut self) {
        self.set_muted(true);
    }

    pub fn unmute(&mut self) {
        self.set_muted(false);
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether a backend is still attached.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Register a callback fired with the new muted flag on every change.
    pub fn on_mute_change(&mut self, listener: impl FnMut(bool) + 'static) -> u64 {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn off_mute_change(&mut self, id: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Drop every mute listener.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        for (_, listener) in self.listeners.iter_mut() {
            listener(muted);
        }
    }

    fn degrade(&mut self, err: AudioError) {
        log::warn!("audio: {}", err);
        if matches!(err, AudioError::Unavailable) {
            self.backend = None;
            self.unlocked = false;
        }
    }
}

fn sanitize_volume(volume: f32) -> Option<f32> {
    volume.is_finite().then(|| volume.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        resumes: u32,
        played: Vec<(f32, f32)>,
    }

    struct Recording {
        log: Rc<RefCell<Log>>,
        resume_error: Option<fn() -> AudioError>,
        play_error: Option<fn() -> AudioError>,
    }

    impl AudioBackend for Recording {
        fn resume(&mut self) -> Result<(), AudioError> {
            self.log.borrow_mut().resumes += 1;
            match self.resume_error {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }

        fn play_tone(&mut self, tone: &Tone, volume: f32) -> Result<(), AudioError> {
            if let Some(make) = self.play_error {
                return Err(make());
            }
            self.log.borrow_mut().played.push((tone.start_hz, volume));
            Ok(())
        }
    }

    fn system() -> (AudioSystem, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let backend = Recording {
            log: log.clone(),
            resume_error: None,
            play_error: None,
        };
        (AudioSystem::new(AudioConfig::default(), Some(Box::new(backend))), log)
    }

    #[test]
    fn silent_until_unlocked() {
        let (mut audio, log) = system();
        audio.play(SoundEffect::Jump);
        assert!(log.borrow().played.is_empty());

        assert!(audio.unlock());
        assert!(audio.unlock());
        assert_eq!(log.borrow().resumes, 1);

        audio.play(SoundEffect::Jump);
        assert_eq!(log.borrow().played, vec![(440.0, 0.3)]);
    }

    #[test]
    fn mute_suppresses_and_notifies() {
        let (mut audio, log) = system();
        audio.unlock();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = audio.on_mute_change(move |m| sink.borrow_mut().push(m));

        audio.mute();
        audio.mute();
        audio.play(SoundEffect::Collect);
        assert!(log.borrow().played.is_empty());
        audio.unmute();
        audio.play(SoundEffect::Collect);
        assert_eq!(log.borrow().played.len(), 1);
        assert_eq!(*seen.borrow(), vec![true, false]);

        assert!(audio.off_mute_change(id));
        audio.toggle_mute();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn cleared_listeners_are_not_notified() {
        let (mut audio, _) = system();
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        let id = audio.on_mute_change(move |_| *sink.borrow_mut() += 1);
        audio.clear_listeners();
        audio.mute();
        assert_eq!(*seen.borrow(), 0);
        assert!(!audio.off_mute_change(id));
    }

    #[test]
    fn volume_is_clamped() {
        let (mut audio, _) = system();
        audio.set_volume(3.0);
        assert_eq!(audio.volume(), 1.0);
        audio.set_volume(-1.0);
        assert_eq!(audio.volume(), 0.0);
        audio.set_volume(f32::NAN);
        assert_eq!(audio.volume(), 0.0);
    }

    #[test]
    fn unavailable_backend_degrades_to_silence() {
        let log = Rc::new(RefCell::new(Log::default()));
        let backend = Recording {
            log: log.clone(),
            resume_error: Some(|| AudioError::Unavailable),
            play_error: None,
        };
        let mut audio = AudioSystem::new(AudioConfig::default(), Some(Box::new(backend)));
        assert!(!audio.unlock());
        assert!(!audio.is_available());
        audio.play(SoundEffect::GameOver);
        assert!(log.borrow().played.is_empty());
    }

    #[test]
    fn transient_play_error_keeps_backend() {
        let log = Rc::new(RefCell::new(Log::default()));
        let backend = Recording {
            log,
            resume_error: None,
            play_error: Some(|| AudioError::Backend("busy".into())),
        };
        let mut audio = AudioSystem::new(AudioConfig::default(), Some(Box::new(backend)));
        audio.unlock();
        audio.play(SoundEffect::Jump);
        assert!(audio.is_available());
    }

    #[test]
    fn disabled_config_never_plays() {
        let log = Rc::new(RefCell::new(Log::default()));
        let backend = Recording {
            log: log.clone(),
            resume_error: None,
            play_error: None,
        };
        let config = AudioConfig {
            enabled: false,
            ..AudioConfig::default()
        };
        let mut audio = AudioSystem::new(config, Some(Box::new(backend)));
        audio.unlock();
        audio.play(SoundEffect::Jump);
        assert!(log.borrow().played.is_empty());
    }

    #[test]
    fn no_backend_is_a_no_op() {
        let mut audio = AudioSystem::silent(AudioConfig::default());
        assert!(!audio.unlock());
        audio.play(SoundEffect::Jump);
        audio.mute();
        assert!(audio.is_muted());
    }
}
