//! Draw Scene Demo
//!
//! Fills a scene with a grid of items, runs the standard pipelines for a few
//! frames and logs what each pass drew.
//!
//! Run with: `cargo run --example draw_scene -- --items 2000 --frames 3`

use clap::Parser;
use glam::Vec3;
use render_task::pipeline::{build_draw_scene_pipeline, build_opaque_pipeline};
use render_task::resources::Material;
use render_task::scene::{Aabb, Camera, Item, ItemFilter, Scene};
use render_task::{DrawPass, PipelineConfig, RenderArgs, RenderEngine, TaskResult};

#[derive(Parser, Debug)]
#[command(
    name = "draw_scene",
    about = "Run the render task pipelines over a generated scene"
)]
struct Args {
    /// Number of items to generate.
    #[arg(long, default_value = "500")]
    items: usize,

    /// Number of frames to run.
    #[arg(long, default_value = "2")]
    frames: u64,

    /// Opaque draw limit per frame.
    #[arg(long)]
    max_drawn: Option<usize>,

    /// Draw the wired opaque pipeline back to front.
    #[arg(long)]
    back_to_front: bool,
}

fn build_scene(count: usize) -> Scene {
    let materials = [
        Material::plastic(Vec3::new(0.8, 0.2, 0.2)),
        Material::metal(Vec3::splat(0.9), 0.3),
        Material::glass(),
    ];
    let side = (count as f32).sqrt().ceil().max(1.0) as usize;

    let mut scene = Scene::new();
    scene.add_item(Item::background());
    for i in 0..count {
        let x = (i % side) as f32 * 2.0 - side as f32;
        let z = -2.0 - (i / side) as f32 * 2.0;
        let bound = Aabb::from_center_half_extents(Vec3::new(x, 0.0, z), Vec3::splat(0.5));

        let material = &materials[i % materials.len()];
        let item = if material.key().is_opaque() {
            Item::opaque_shape(bound)
        } else {
            Item::transparent_shape(bound)
        };
        scene.add_item(item.with_material(material.key()));

        if i % 50 == 0 {
            scene.add_item(Item::light(bound));
        }
    }
    scene
}

fn main() -> TaskResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let render_args = RenderArgs {
        camera: Camera::new(Vec3::new(0.0, 4.0, 6.0), Vec3::new(0.0, 0.0, -10.0)),
        ..Default::default()
    };
    let config = PipelineConfig::default().with_max_drawn_opaque_items(args.max_drawn);

    let mut engine = RenderEngine::new(build_scene(args.items), render_args, config);
    engine.add_pipeline(build_opaque_pipeline(
        ItemFilter::opaque_shape().without_layered(),
        !args.back_to_front,
    )?);
    engine.add_pipeline(build_draw_scene_pipeline());

    for _ in 0..args.frames {
        let stats = engine.run_frame().clone();
        for pass in [
            DrawPass::Background,
            DrawPass::Opaque,
            DrawPass::Light,
            DrawPass::Transparent,
            DrawPass::PostLayered,
        ] {
            let counts = stats.pass(pass);
            log::info!(
                "frame {} {:?}: fed {} visible {} drawn {}",
                stats.frame,
                pass,
                counts.fed,
                counts.visible,
                counts.drawn
            );
        }
        log::info!("frame {}: {} draws total", stats.frame, stats.total_drawn());
    }

    Ok(())
}
