//! Main engine orchestrator

use crate::scene::{Camera, Scene};
use crate::task::{FrameStats, Pipeline, RenderArgs, RenderContext, SceneContext};
use crate::PipelineConfig;

/// Owns the scene, the render state and the pipelines run every frame
#[derive(Debug, Default)]
pub struct RenderEngine {
    scene: SceneContext,
    render: RenderContext,
    pipelines: Vec<Pipeline>,
}

impl RenderEngine {
    /// Create an engine drawing `scene` with the given view and settings
    pub fn new(scene: Scene, args: RenderArgs, config: PipelineConfig) -> Self {
        Self {
            scene: SceneContext::new(scene),
            render: RenderContext::new(args, config),
            pipelines: Vec::new(),
        }
    }

    /// Append a pipeline; pipelines run in the order they were added
    pub fn add_pipeline(&mut self, pipeline: Pipeline) {
        log::info!(
            "Added pipeline '{}' with {} jobs",
            pipeline.name(),
            pipeline.len()
        );
        self.pipelines.push(pipeline);
    }

    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    /// Get reference to the scene
    pub fn scene(&self) -> &Scene {
        self.scene.scene()
    }

    /// Get mutable reference to the scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scene.scene_mut()
    }

    pub fn scene_context(&self) -> &SceneContext {
        &self.scene
    }

    pub fn render_context(&self) -> &RenderContext {
        &self.render
    }

    pub fn render_context_mut(&mut self) -> &mut RenderContext {
        &mut self.render
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.render.args.camera
    }

    pub fn config_mut(&mut self) -> &mut PipelineConfig {
        &mut self.render.settings
    }

    /// Resize the view, keeping the camera aspect in sync
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        self.render.args.width = width;
        self.render.args.height = height;
        self.render.args.camera.set_aspect(width as f32, height as f32);
    }

    /// Run every pipeline once and return the frame's statistics
    pub fn run_frame(&mut self) -> &FrameStats {
        self.render.begin_frame();
        if self.pipelines.is_empty() {
            log::warn!("Running frame {} with no pipelines", self.render.stats().frame);
        }

        for pipeline in &self.pipelines {
            pipeline.run(&self.scene, &mut self.render);
        }

        let stats = self.render.stats();
        log::debug!(
            "Frame {}: {} draws recorded",
            stats.frame,
            self.render.draw_list().len()
        );
        stats
    }
}
