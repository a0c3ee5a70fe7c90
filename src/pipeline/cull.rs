//! Cull stage: drops items outside the view volume

use crate::scene::{Frustum, ItemBound, ItemIdsBounds};
use crate::task::{DrawPass, InputOutputJobBody, RenderContext, SceneContext};

/// Copy the items of `in_items` whose bounds touch `frustum` into `out_items`,
/// keeping their relative order
pub fn cull_items(frustum: &Frustum, in_items: &[ItemBound], out_items: &mut ItemIdsBounds) {
    out_items.clear();
    out_items.extend(
        in_items
            .iter()
            .filter(|item| frustum.intersects_aabb(&item.bound))
            .copied(),
    );
}

/// Removes items outside the camera frustum of the current frame
#[derive(Debug, Clone)]
pub struct CullItems {
    /// Pass credited with the visible count in the frame stats
    pub pass: DrawPass,
}

impl Default for CullItems {
    fn default() -> Self {
        Self {
            pass: DrawPass::Opaque,
        }
    }
}

impl InputOutputJobBody for CullItems {
    type Input = ItemIdsBounds;
    type Output = ItemIdsBounds;

    fn run(
        &mut self,
        _scene: &SceneContext,
        render: &mut RenderContext,
        input: &ItemIdsBounds,
        output: &mut ItemIdsBounds,
    ) {
        let frustum = render.args.camera.frustum();
        cull_items(&frustum, input, output);
        render.stats_mut().pass_mut(self.pass).visible += output.len();
        log::debug!(
            "CullItems ({:?}): {} of {} items visible",
            self.pass,
            output.len(),
            input.len()
        );
    }
}
