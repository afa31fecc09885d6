//! Coordinate types shared by the scheduler and the hit tester.
//!
//! Two spaces exist:
//! - client space: absolute pointer coordinates as reported by the host
//! - surface space: origin at the surface's top-left corner, +X right, +Y down
//!
//! Shape geometry always lives in surface space. [`SurfaceInfo::to_local`]
//! converts between the two.

mod color;
mod surface_info;

pub use color::Color;
pub use surface_info::SurfaceInfo;
