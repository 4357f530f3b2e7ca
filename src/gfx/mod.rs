// gfx/mod.rs

pub mod context;
pub mod lights;
pub mod renderer;

pub use context::WindowlessContext;
pub use lights::{LightInfo, LightPositionModel, LightSetup};
pub use renderer::{Renderer, RendererFlags};
