//! Fetch stage: selects candidate items from the scene

use crate::scene::{ItemFilter, ItemIdsBounds};
use crate::task::{DrawPass, OutputJobBody, RenderContext, SceneContext};

/// Produces the ids and bounds of every scene item passing a filter
#[derive(Debug, Clone)]
pub struct FetchItems {
    pub filter: ItemFilter,
    /// Pass credited with the fetched count in the frame stats
    pub pass: DrawPass,
}

impl Default for FetchItems {
    fn default() -> Self {
        Self {
            filter: ItemFilter::opaque_shape().without_layered(),
            pass: DrawPass::Opaque,
        }
    }
}

impl FetchItems {
    pub fn new(filter: ItemFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn for_pass(mut self, pass: DrawPass) -> Self {
        self.pass = pass;
        self
    }
}

impl OutputJobBody for FetchItems {
    type Output = ItemIdsBounds;

    fn run(&mut self, scene: &SceneContext, render: &mut RenderContext, output: &mut ItemIdsBounds) {
        output.clear();
        scene.scene().fetch(&self.filter, output);
        render.stats_mut().pass_mut(self.pass).fed += output.len();
        log::debug!("FetchItems ({:?}): {} items", self.pass, output.len());
    }
}
