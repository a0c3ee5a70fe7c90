use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;

use render_task::pipeline::{
    build_draw_scene_pipeline, build_opaque_pipeline, cull_items, depth_sort_items,
    material_sort_items, ItemMaterialBucketMap,
};
use render_task::resources::MaterialKey;
use render_task::scene::{Aabb, Camera, Item, ItemFilter, ItemIdsBounds, Scene};
use render_task::{PipelineConfig, RenderArgs, RenderContext, SceneContext};

fn camera() -> Camera {
    Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
}

fn grid_scene(count: usize) -> Scene {
    let mut scene = Scene::new();
    for i in 0..count {
        let x = (i % 64) as f32 * 3.0 - 96.0;
        let z = -2.0 - (i / 64) as f32 * 3.0;
        let bound = Aabb::from_center_half_extents(Vec3::new(x, 0.0, z), Vec3::ONE);
        let material = if i % 3 == 0 {
            MaterialKey::ALBEDO | MaterialKey::EMISSIVE
        } else {
            MaterialKey::ALBEDO
        };
        scene.add_item(Item::opaque_shape(bound).with_material(material));
    }
    scene
}

fn fetched(scene: &Scene) -> ItemIdsBounds {
    let mut items = ItemIdsBounds::new();
    scene.fetch(&ItemFilter::opaque_shape(), &mut items);
    items
}

// ---------------------------------------------------------------------------
// Stage functions
// ---------------------------------------------------------------------------

fn bench_cull(c: &mut Criterion) {
    let items = fetched(&grid_scene(4096));
    let frustum = camera().frustum();
    let mut output = ItemIdsBounds::new();

    c.bench_function("cull_items_4096", |b| {
        b.iter(|| {
            cull_items(&frustum, black_box(&items), &mut output);
            black_box(&output);
        });
    });
}

fn bench_depth_sort(c: &mut Criterion) {
    let items = fetched(&grid_scene(4096));
    let camera = camera();
    let mut output = ItemIdsBounds::new();

    c.bench_function("depth_sort_items_4096", |b| {
        b.iter(|| {
            depth_sort_items(&camera, true, black_box(&items), &mut output);
            black_box(&output);
        });
    });
}

fn bench_material_sort(c: &mut Criterion) {
    let scene = grid_scene(4096);
    let items = fetched(&scene);
    let mut buckets = ItemMaterialBucketMap::standard();
    let mut output = ItemIdsBounds::new();

    c.bench_function("material_sort_items_4096", |b| {
        b.iter(|| {
            material_sort_items(&scene, &mut buckets, black_box(&items), &mut output);
            black_box(&output);
        });
    });
}

// ---------------------------------------------------------------------------
// Full pipelines
// ---------------------------------------------------------------------------

fn contexts(count: usize) -> (SceneContext, RenderContext) {
    let args = RenderArgs {
        camera: camera(),
        ..Default::default()
    };
    (
        SceneContext::new(grid_scene(count)),
        RenderContext::new(args, PipelineConfig::default()),
    )
}

fn bench_opaque_pipeline(c: &mut Criterion) {
    let (scene, mut render) = contexts(4096);
    let pipeline = build_opaque_pipeline(ItemFilter::opaque_shape(), true).unwrap();

    c.bench_function("opaque_pipeline_4096", |b| {
        b.iter(|| {
            render.begin_frame();
            pipeline.run(&scene, &mut render);
            black_box(render.stats());
        });
    });
}

fn bench_draw_scene_pipeline(c: &mut Criterion) {
    let (scene, mut render) = contexts(4096);
    let pipeline = build_draw_scene_pipeline();

    c.bench_function("draw_scene_pipeline_4096", |b| {
        b.iter(|| {
            render.begin_frame();
            pipeline.run(&scene, &mut render);
            black_box(render.stats());
        });
    });
}

fn bench_pipeline_build(c: &mut Criterion) {
    c.bench_function("opaque_pipeline_build", |b| {
        b.iter(|| black_box(build_opaque_pipeline(ItemFilter::opaque_shape(), true).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_cull,
    bench_depth_sort,
    bench_material_sort,
    bench_opaque_pipeline,
    bench_draw_scene_pipeline,
    bench_pipeline_build,
);
criterion_main!(benches);
