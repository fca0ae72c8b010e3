pub mod audio;
pub mod outbox;
pub mod runner;
pub mod storage;

pub use audio::WebAudioBackend;
pub use runner::WebGame;
pub use storage::LocalStorageStore;

/// Route `log` to the browser console and panics to `console.error`.
/// Safe to call more than once.
pub fn install_hooks() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
