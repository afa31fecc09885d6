//! Strata engine crate.
//!
//! A retained 2D scene graph: shapes are queued for painting in z-order,
//! repaints are coalesced per turn, and pointer events are routed to the
//! topmost shape under the pointer.

pub mod coords;
pub mod engine;
pub mod events;
pub mod input;
pub mod logging;
pub mod scene;
pub mod surface;

pub use engine::{Engine, EngineConfig, EngineError};
