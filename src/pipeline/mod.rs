//! Standard render stages and the pipelines built from them
//!
//! Two pipelines are provided:
//! 1. [`build_draw_scene_pipeline`] - portless stages that each gather and draw
//!    one class of items (background, opaque, lights, transparent, layered)
//! 2. [`build_opaque_pipeline`] - an explicit port-wired chain:
//!    fetch -> cull -> depth sort -> material sort -> draw

pub mod cull;
pub mod depth_sort;
pub mod draw;
pub mod fetch;
pub mod material_sort;

pub use cull::{cull_items, CullItems};
pub use depth_sort::{depth_sort_items, DepthSortItems};
pub use draw::{
    render_items, DrawBackground, DrawItems, DrawLight, DrawOpaque, DrawPostLayered,
    DrawTransparent, ResetGlState,
};
pub use fetch::FetchItems;
pub use material_sort::{material_sort_items, ItemMaterialBucketMap, MaterialSortItems};

use crate::error::TaskResult;
use crate::scene::ItemFilter;
use crate::task::{DrawPass, Job, Pipeline, PipelineBuilder};

/// Job names used by [`build_opaque_pipeline`]
pub mod job_names {
    pub const FETCH: &str = "fetch";
    pub const CULL: &str = "cull";
    pub const DEPTH_SORT: &str = "depth_sort";
    pub const MATERIAL_SORT: &str = "material_sort";
    pub const DRAW: &str = "draw";
}

/// Build the full scene pipeline out of portless draw stages
pub fn build_draw_scene_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new("draw_scene");
    pipeline.push(Job::new("DrawBackground", DrawBackground::default()));
    pipeline.push(Job::new("DrawOpaque", DrawOpaque::default()));
    pipeline.push(Job::new("DrawLight", DrawLight::default()));
    pipeline.push(Job::new("DrawTransparent", DrawTransparent::default()));
    pipeline.push(Job::new("DrawPostLayered", DrawPostLayered::default()));
    pipeline.push(Job::new("ResetGlState", ResetGlState));
    pipeline
}

/// Build a port-wired pipeline drawing the items passing `filter`
pub fn build_opaque_pipeline(filter: ItemFilter, front_to_back: bool) -> TaskResult<Pipeline> {
    use job_names::*;

    let fetch = Job::with_output(FETCH, FetchItems::new(filter));
    let cull = Job::with_input_output(CULL, CullItems::default(), &fetch.output())?;
    let sort = Job::with_input_output(
        DEPTH_SORT,
        DepthSortItems::new(front_to_back),
        &cull.output(),
    )?;
    let material = Job::with_input_output(MATERIAL_SORT, MaterialSortItems::default(), &sort.output())?;
    let draw = Job::with_input(DRAW, DrawItems::new(DrawPass::Opaque), &material.output())?;

    Ok(PipelineBuilder::new("opaque")
        .job(fetch)?
        .job(cull)?
        .job(sort)?
        .job(material)?
        .job(draw)?
        .build())
}
