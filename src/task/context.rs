//! Execution contexts handed to every job run

use crate::scene::{Camera, ItemId, Scene};
use crate::PipelineConfig;

/// Read-only scene state for one pipeline run
#[derive(Debug, Default)]
pub struct SceneContext {
    scene: Scene,
}

impl SceneContext {
    pub fn new(scene: Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Edit the scene between frames
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}

/// Per-frame view parameters
#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub camera: Camera,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            width: 1280,
            height: 720,
        }
    }
}

/// Which stage issued a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawPass {
    Background,
    Opaque,
    Light,
    Transparent,
    PostLayered,
}

impl DrawPass {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A recorded unit of draw work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    Draw { pass: DrawPass, item: ItemId },
    ClearDepth,
    ResetState,
}

/// Ordered draw work accumulated during a frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn draw(&mut self, pass: DrawPass, item: ItemId) {
        self.commands.push(DrawCommand::Draw { pass, item });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Items drawn by `pass`, in submission order
    pub fn items(&self, pass: DrawPass) -> Vec<ItemId> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Draw { pass: p, item } if *p == pass => Some(*item),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Item counts for one draw pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Items fetched from the scene
    pub fed: usize,
    /// Items left after culling
    pub visible: usize,
    pub drawn: usize,
}

/// Counters gathered while running a frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    passes: [PassStats; DrawPass::COUNT],
}

impl FrameStats {
    pub fn pass(&self, pass: DrawPass) -> &PassStats {
        &self.passes[pass.index()]
    }

    pub fn pass_mut(&mut self, pass: DrawPass) -> &mut PassStats {
        &mut self.passes[pass.index()]
    }

    pub fn total_drawn(&self) -> usize {
        self.passes.iter().map(|p| p.drawn).sum()
    }
}

/// Mutable per-frame render state shared by all jobs
#[derive(Debug, Default)]
pub struct RenderContext {
    pub args: RenderArgs,
    pub settings: PipelineConfig,
    draw_list: DrawList,
    stats: FrameStats,
}

impl RenderContext {
    pub fn new(args: RenderArgs, settings: PipelineConfig) -> Self {
        Self {
            args,
            settings,
            draw_list: DrawList::default(),
            stats: FrameStats::default(),
        }
    }

    /// Reset per-frame accumulators and advance the frame counter
    pub fn begin_frame(&mut self) {
        let frame = self.stats.frame + 1;
        self.draw_list.clear();
        self.stats = FrameStats {
            frame,
            ..Default::default()
        };
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn draw_list_mut(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut FrameStats {
        &mut self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_by_pass() {
        let mut list = DrawList::default();
        list.draw(DrawPass::Opaque, ItemId(2));
        list.push(DrawCommand::ClearDepth);
        list.draw(DrawPass::Transparent, ItemId(5));
        list.draw(DrawPass::Opaque, ItemId(1));

        assert_eq!(list.len(), 4);
        assert_eq!(list.items(DrawPass::Opaque), vec![ItemId(2), ItemId(1)]);
        assert_eq!(list.items(DrawPass::Light), vec![]);
    }

    #[test]
    fn test_begin_frame_resets_accumulators() {
        let mut render = RenderContext::default();
        render.draw_list_mut().draw(DrawPass::Light, ItemId(0));
        render.stats_mut().pass_mut(DrawPass::Light).drawn = 1;

        render.begin_frame();
        assert!(render.draw_list().is_empty());
        assert_eq!(render.stats().total_drawn(), 0);
        assert_eq!(render.stats().frame, 1);

        render.begin_frame();
        assert_eq!(render.stats().frame, 2);
    }
}
