//! Material classification consumed by the render stages

pub mod material;

pub use material::*;
