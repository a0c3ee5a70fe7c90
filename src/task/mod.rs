//! Render task system
//!
//! A pipeline is an ordered list of [`Job`]s. Jobs exchange data through
//! [`Varying`] ports wired together when the pipeline is assembled, and every
//! job receives the same [`SceneContext`] and [`RenderContext`] when it runs.

pub mod context;
pub mod job;
pub mod pipeline;
pub mod varying;

pub use context::*;
pub use job::*;
pub use pipeline::*;
pub use varying::*;
