pub mod handler;
pub mod event;

pub use handler::{ActionListenerId, InputAction, InputHandler, InputState, TouchZone};
pub use event::{InputEvent, Key};
