//! Depth sort stage

use crate::scene::{depth_in_view, Camera, ItemBound, ItemIdsBounds};
use crate::task::{InputOutputJobBody, RenderContext, SceneContext};

/// Order `in_items` by the view depth of their bound centers into `out_items`.
///
/// The sort is stable: items at equal depth keep their input order in both
/// directions.
pub fn depth_sort_items(
    camera: &Camera,
    front_to_back: bool,
    in_items: &[ItemBound],
    out_items: &mut ItemIdsBounds,
) {
    let view = camera.view_matrix();
    let mut keyed: Vec<(f32, ItemBound)> = in_items
        .iter()
        .map(|item| (depth_in_view(&view, item.bound.center()), *item))
        .collect();

    if front_to_back {
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    } else {
        keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    }

    out_items.clear();
    out_items.extend(keyed.into_iter().map(|(_, item)| item));
}

/// Reorders items by distance from the camera
#[derive(Debug, Clone)]
pub struct DepthSortItems {
    pub front_to_back: bool,
}

impl Default for DepthSortItems {
    fn default() -> Self {
        Self {
            front_to_back: true,
        }
    }
}

impl DepthSortItems {
    pub fn new(front_to_back: bool) -> Self {
        Self { front_to_back }
    }
}

impl InputOutputJobBody for DepthSortItems {
    type Input = ItemIdsBounds;
    type Output = ItemIdsBounds;

    fn run(
        &mut self,
        _scene: &SceneContext,
        render: &mut RenderContext,
        input: &ItemIdsBounds,
        output: &mut ItemIdsBounds,
    ) {
        depth_sort_items(&render.args.camera, self.front_to_back, input, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Aabb, ItemId};
    use glam::Vec3;
    use rstest::rstest;

    fn item(id: u32, depth: f32) -> ItemBound {
        ItemBound::new(
            ItemId(id),
            Aabb::from_center_half_extents(Vec3::new(id as f32, 0.0, -depth), Vec3::splat(0.25)),
        )
    }

    fn ids(items: &[ItemBound]) -> Vec<u32> {
        items.iter().map(|b| b.id.0).collect()
    }

    #[rstest]
    #[case::front_to_back(true, vec![3, 1, 4, 0, 2])]
    #[case::back_to_front(false, vec![0, 2, 1, 4, 3])]
    fn test_sort_is_stable(#[case] front_to_back: bool, #[case] expected: Vec<u32>) {
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        // 0 and 2 share a depth, as do 1 and 4
        let input = vec![item(0, 9.0), item(1, 5.0), item(2, 9.0), item(3, 1.0), item(4, 5.0)];

        let mut output = ItemIdsBounds::new();
        depth_sort_items(&camera, front_to_back, &input, &mut output);
        assert_eq!(ids(&output), expected);
    }

    #[test]
    fn test_sort_uses_view_space_depth() {
        // Looking down +X: depth grows with x
        let camera = Camera::new(Vec3::ZERO, Vec3::X);
        let near = ItemBound::new(
            ItemId(0),
            Aabb::from_center_half_extents(Vec3::new(2.0, 0.0, -30.0), Vec3::ONE),
        );
        let far = ItemBound::new(
            ItemId(1),
            Aabb::from_center_half_extents(Vec3::new(20.0, 0.0, 0.0), Vec3::ONE),
        );

        let mut output = ItemIdsBounds::new();
        depth_sort_items(&camera, true, &[far, near], &mut output);
        assert_eq!(ids(&output), vec![0, 1]);
    }

    #[test]
    fn test_sort_agrees_with_camera_view_depth() {
        let camera = Camera::new(Vec3::new(3.0, 5.0, 2.0), Vec3::new(-1.0, 0.0, -8.0));
        let input: Vec<_> = (0..8)
            .map(|i| {
                let center = Vec3::new(i as f32 * 1.7 - 6.0, (i % 3) as f32, -(i as f32) * 2.3);
                ItemBound::new(ItemId(i), Aabb::from_center_half_extents(center, Vec3::ONE))
            })
            .collect();

        let mut output = ItemIdsBounds::new();
        depth_sort_items(&camera, true, &input, &mut output);
        let depths: Vec<f32> = output
            .iter()
            .map(|item| camera.view_depth(item.bound.center()))
            .collect();
        assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
