//! Render Task - a job-graph based render pipeline
//!
//! A frame is produced by running [`task::Pipeline`]s: ordered lists of jobs
//! that pass typed data to each other through [`task::Varying`] ports.
//!
//! # Features
//! - Type-erased ports checked once, when a pipeline is wired
//! - Four job shapes: no ports, input only, output only, input and output
//! - Standard stages for fetching, culling, depth sorting and material sorting
//!   scene items, plus draw stages for every item class
//! - Frame statistics and a recorded draw list for inspection

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod resources;
pub mod scene;
pub mod task;

pub use engine::RenderEngine;
pub use error::{TaskError, TaskResult};
pub use task::{
    DrawCommand, DrawPass, FrameStats, Job, Pipeline, PipelineBuilder, RenderArgs, RenderContext,
    SceneContext, Varying,
};

/// Switches and limits read by the draw stages every frame
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Drop opaque shapes outside the view before drawing
    pub cull_opaque: bool,
    /// Draw opaque shapes front to back
    pub sort_opaque: bool,
    pub render_opaque: bool,
    /// Drop transparent shapes outside the view before drawing
    pub cull_transparent: bool,
    /// Draw transparent shapes back to front
    pub sort_transparent: bool,
    pub render_transparent: bool,
    pub draw_background: bool,
    pub draw_lights: bool,
    /// Opaque draw limit per frame, unlimited when `None`
    pub max_drawn_opaque_items: Option<usize>,
    /// Transparent draw limit per frame, unlimited when `None`
    pub max_drawn_transparent_items: Option<usize>,
    /// Layered overlay draw limit per frame, unlimited when `None`
    pub max_drawn_overlay_items: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cull_opaque: true,
            sort_opaque: true,
            render_opaque: true,
            cull_transparent: true,
            sort_transparent: true,
            render_transparent: true,
            draw_background: true,
            draw_lights: true,
            max_drawn_opaque_items: None,
            max_drawn_transparent_items: None,
            max_drawn_overlay_items: None,
        }
    }
}

impl PipelineConfig {
    pub fn with_cull_opaque(mut self, cull: bool) -> Self {
        self.cull_opaque = cull;
        self
    }

    pub fn with_sort_opaque(mut self, sort: bool) -> Self {
        self.sort_opaque = sort;
        self
    }

    pub fn with_cull_transparent(mut self, cull: bool) -> Self {
        self.cull_transparent = cull;
        self
    }

    pub fn with_sort_transparent(mut self, sort: bool) -> Self {
        self.sort_transparent = sort;
        self
    }

    pub fn with_max_drawn_opaque_items(mut self, max: Option<usize>) -> Self {
        self.max_drawn_opaque_items = max;
        self
    }

    pub fn with_max_drawn_transparent_items(mut self, max: Option<usize>) -> Self {
        self.max_drawn_transparent_items = max;
        self
    }

    pub fn with_max_drawn_overlay_items(mut self, max: Option<usize>) -> Self {
        self.max_drawn_overlay_items = max;
        self
    }

    /// Draw limit applying to `pass`
    pub fn max_drawn(&self, pass: DrawPass) -> Option<usize> {
        match pass {
            DrawPass::Opaque => self.max_drawn_opaque_items,
            DrawPass::Transparent => self.max_drawn_transparent_items,
            DrawPass::PostLayered => self.max_drawn_overlay_items,
            DrawPass::Background | DrawPass::Light => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_enable_everything() {
        let config = PipelineConfig::default();
        assert!(config.cull_opaque && config.sort_opaque && config.render_opaque);
        assert!(config.cull_transparent && config.sort_transparent && config.render_transparent);
        assert!(config.draw_background && config.draw_lights);
        assert_eq!(config.max_drawn(DrawPass::Opaque), None);
    }

    #[test]
    fn test_config_limits_per_pass() {
        let config = PipelineConfig::default()
            .with_max_drawn_opaque_items(Some(10))
            .with_max_drawn_overlay_items(Some(2));
        assert_eq!(config.max_drawn(DrawPass::Opaque), Some(10));
        assert_eq!(config.max_drawn(DrawPass::PostLayered), Some(2));
        assert_eq!(config.max_drawn(DrawPass::Transparent), None);
        assert_eq!(config.max_drawn(DrawPass::Light), None);
    }
}
