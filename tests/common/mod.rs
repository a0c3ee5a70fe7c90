//! Shared scene fixtures for the integration tests.

#![allow(dead_code)]

use glam::Vec3;
use render_task::resources::MaterialKey;
use render_task::scene::{Aabb, Camera, Item, ItemId, Scene};
use render_task::{PipelineConfig, RenderArgs, RenderContext, SceneContext};

/// Camera at the origin looking down -Z
pub fn forward_camera() -> Camera {
    Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
}

/// Unit box centered at `(x, 0, z)`
pub fn unit_box(x: f32, z: f32) -> Aabb {
    Aabb::from_center_half_extents(Vec3::new(x, 0.0, z), Vec3::splat(0.5))
}

/// Scene used by the opaque pipeline tests.
///
/// Five opaque shapes: three in front of the camera at depths 8, 3 and 5, one
/// behind the camera and one far off to the side.
pub struct OpaqueScene {
    pub scene: Scene,
    pub far: ItemId,
    pub behind: ItemId,
    pub near: ItemId,
    pub aside: ItemId,
    pub middle: ItemId,
}

impl OpaqueScene {
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let far = scene.add_item(Item::opaque_shape(unit_box(0.0, -8.0)));
        let behind = scene.add_item(Item::opaque_shape(unit_box(0.0, 6.0)));
        let near = scene.add_item(
            Item::opaque_shape(unit_box(0.5, -3.0))
                .with_material(MaterialKey::ALBEDO | MaterialKey::EMISSIVE),
        );
        let aside = scene.add_item(Item::opaque_shape(unit_box(400.0, -5.0)));
        let middle = scene.add_item(Item::opaque_shape(unit_box(-0.5, -5.0)));
        Self {
            scene,
            far,
            behind,
            near,
            aside,
            middle,
        }
    }

    /// Visible items, nearest first
    pub fn visible_front_to_back(&self) -> Vec<ItemId> {
        vec![self.near, self.middle, self.far]
    }
}

pub fn contexts(scene: Scene, config: PipelineConfig) -> (SceneContext, RenderContext) {
    let args = RenderArgs {
        camera: forward_camera(),
        ..Default::default()
    };
    (SceneContext::new(scene), RenderContext::new(args, config))
}
