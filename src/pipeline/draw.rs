//! Draw stages
//!
//! [`DrawItems`] draws a wired item list. The remaining stages have no ports:
//! they gather their items straight from the scene and record into the render
//! context.

use crate::pipeline::cull::cull_items;
use crate::pipeline::depth_sort::depth_sort_items;
use crate::scene::{ItemBound, ItemFilter, ItemIdsBounds, Scene};
use crate::task::{DrawCommand, DrawPass, InputJobBody, JobBody, RenderContext, SceneContext};

/// Record draws for `items` in order, stopping after `max_drawn` when set.
/// Returns the number of items drawn.
pub fn render_items(
    render: &mut RenderContext,
    pass: DrawPass,
    items: &[ItemBound],
    max_drawn: Option<usize>,
) -> usize {
    let count = max_drawn.map_or(items.len(), |max| max.min(items.len()));
    for item in &items[..count] {
        render.draw_list_mut().draw(pass, item.id);
    }
    render.stats_mut().pass_mut(pass).drawn += count;

    if count < items.len() {
        log::debug!("{pass:?}: drew {count} of {} items", items.len());
    }
    count
}

/// Double-buffered item list reused across frames by the portless stages
#[derive(Debug, Default)]
struct ItemBuffers {
    front: ItemIdsBounds,
    back: ItemIdsBounds,
}

impl ItemBuffers {
    fn fetch(&mut self, scene: &Scene, filter: &ItemFilter) -> usize {
        self.front.clear();
        scene.fetch(filter, &mut self.front);
        self.front.len()
    }

    fn cull(&mut self, render: &RenderContext) {
        cull_items(&render.args.camera.frustum(), &self.front, &mut self.back);
        std::mem::swap(&mut self.front, &mut self.back);
    }

    fn depth_sort(&mut self, render: &RenderContext, front_to_back: bool) {
        depth_sort_items(&render.args.camera, front_to_back, &self.front, &mut self.back);
        std::mem::swap(&mut self.front, &mut self.back);
    }

    fn items(&self) -> &[ItemBound] {
        &self.front
    }
}

/// How one portless stage selects and orders its items
#[derive(Debug, Clone)]
struct PassSpec {
    pass: DrawPass,
    filter: ItemFilter,
    cull: bool,
    /// `Some(front_to_back)` to depth sort
    sort: Option<bool>,
    max_drawn: Option<usize>,
}

/// Fetch, optionally cull and sort, then draw one class of items
fn draw_filtered(
    buffers: &mut ItemBuffers,
    scene: &SceneContext,
    render: &mut RenderContext,
    spec: &PassSpec,
) -> usize {
    let fed = buffers.fetch(scene.scene(), &spec.filter);
    draw_fetched(buffers, render, spec, fed)
}

/// Cull, sort and draw items already fetched into `buffers`
fn draw_fetched(
    buffers: &mut ItemBuffers,
    render: &mut RenderContext,
    spec: &PassSpec,
    fed: usize,
) -> usize {
    if spec.cull {
        buffers.cull(render);
    }
    if let Some(front_to_back) = spec.sort {
        buffers.depth_sort(render, front_to_back);
    }

    let stats = render.stats_mut().pass_mut(spec.pass);
    stats.fed += fed;
    stats.visible += buffers.items().len();

    render_items(render, spec.pass, buffers.items(), spec.max_drawn)
}

/// Draws the item list wired into its input
#[derive(Debug, Clone)]
pub struct DrawItems {
    pub pass: DrawPass,
    /// Overrides the per-pass limit from the render settings
    pub max_drawn: Option<usize>,
}

impl DrawItems {
    pub fn new(pass: DrawPass) -> Self {
        Self {
            pass,
            max_drawn: None,
        }
    }

    pub fn with_max_drawn(mut self, max_drawn: usize) -> Self {
        self.max_drawn = Some(max_drawn);
        self
    }
}

impl Default for DrawItems {
    fn default() -> Self {
        Self::new(DrawPass::Opaque)
    }
}

impl InputJobBody for DrawItems {
    type Input = ItemIdsBounds;

    fn run(&mut self, _scene: &SceneContext, render: &mut RenderContext, input: &ItemIdsBounds) {
        let max_drawn = self.max_drawn.or(render.settings.max_drawn(self.pass));
        render_items(render, self.pass, input, max_drawn);
    }
}

/// Opaque, non-layered shapes drawn front to back
#[derive(Debug, Default)]
pub struct DrawOpaque {
    buffers: ItemBuffers,
}

impl JobBody for DrawOpaque {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        let settings = render.settings.clone();
        if !settings.render_opaque {
            return;
        }
        let spec = PassSpec {
            pass: DrawPass::Opaque,
            filter: ItemFilter::opaque_shape().without_layered(),
            cull: settings.cull_opaque,
            sort: settings.sort_opaque.then_some(true),
            max_drawn: settings.max_drawn_opaque_items,
        };
        draw_filtered(&mut self.buffers, scene, render, &spec);
    }
}

/// Translucent, non-layered shapes drawn back to front
#[derive(Debug, Default)]
pub struct DrawTransparent {
    buffers: ItemBuffers,
}

impl JobBody for DrawTransparent {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        let settings = render.settings.clone();
        if !settings.render_transparent {
            return;
        }
        let spec = PassSpec {
            pass: DrawPass::Transparent,
            filter: ItemFilter::transparent_shape().without_layered(),
            cull: settings.cull_transparent,
            sort: settings.sort_transparent.then_some(false),
            max_drawn: settings.max_drawn_transparent_items,
        };
        draw_filtered(&mut self.buffers, scene, render, &spec);
    }
}

/// Light volumes touching the view
#[derive(Debug, Default)]
pub struct DrawLight {
    buffers: ItemBuffers,
}

impl JobBody for DrawLight {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        if !render.settings.draw_lights {
            return;
        }
        let spec = PassSpec {
            pass: DrawPass::Light,
            filter: ItemFilter::light(),
            cull: true,
            sort: None,
            max_drawn: None,
        };
        draw_filtered(&mut self.buffers, scene, render, &spec);
    }
}

/// Background items (sky, clear color), never culled
#[derive(Debug, Default)]
pub struct DrawBackground {
    buffers: ItemBuffers,
}

impl JobBody for DrawBackground {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        if !render.settings.draw_background {
            return;
        }
        let spec = PassSpec {
            pass: DrawPass::Background,
            filter: ItemFilter::background(),
            cull: false,
            sort: None,
            max_drawn: None,
        };
        draw_filtered(&mut self.buffers, scene, render, &spec);
    }
}

/// Layered opaque shapes drawn over the scene after a depth clear
#[derive(Debug, Default)]
pub struct DrawPostLayered {
    buffers: ItemBuffers,
}

impl JobBody for DrawPostLayered {
    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext) {
        let spec = PassSpec {
            pass: DrawPass::PostLayered,
            filter: ItemFilter::opaque_shape().with_layered(),
            cull: true,
            sort: Some(true),
            max_drawn: render.settings.max_drawn_overlay_items,
        };
        // Skip the depth clear entirely when there is nothing layered
        let fed = self.buffers.fetch(scene.scene(), &spec.filter);
        if fed == 0 {
            return;
        }
        render.draw_list_mut().push(DrawCommand::ClearDepth);
        draw_fetched(&mut self.buffers, render, &spec, fed);
    }
}

/// Restores default device state at the end of a frame
#[derive(Debug, Default)]
pub struct ResetGlState;

impl JobBody for ResetGlState {
    fn run(&mut self, _scene: &SceneContext, render: &mut RenderContext) {
        render.draw_list_mut().push(DrawCommand::ResetState);
    }
}
