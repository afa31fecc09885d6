//! Engine: the public surface application code talks to.
//!
//! Owns the render scheduler, the event registry and the drawing surface.

mod config;
#[allow(clippy::module_inception)]
mod engine;
mod error;
mod scheduler;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use scheduler::{DoneFn, RenderScheduler};
