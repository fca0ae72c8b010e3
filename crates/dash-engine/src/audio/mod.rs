pub mod synth;
pub mod system;

pub use synth::{synthesize, Tone, Waveform};
pub use system::{AudioBackend, AudioSystem};
