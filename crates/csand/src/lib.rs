//! csand - a headless falling-sand sandbox
//!
//! Wraps the `csand-simulation` core with layered configuration, input
//! controls, starting scenes and text rendering.

pub mod config;
pub mod input;
pub mod render;
pub mod scenes;
pub mod session;

pub use config::{GridConfig, MaterialOverride, SandConfig, SimConfig};
pub use input::{Controls, InputEvent};
pub use render::TextRenderer;
pub use scenes::Scene;
pub use session::Session;
