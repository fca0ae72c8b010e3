pub mod instance;
pub mod surface;

pub use instance::{OutlineInstance, RenderBuffer, RenderInstance, TextItem};
pub use surface::{Color, RenderSurface, SpriteDraw};
