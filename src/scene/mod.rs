//! Scene item store

mod camera;
mod item;

pub use camera::*;
pub use item::*;

use crate::resources::MaterialKey;

/// Store of drawable items, queried by the fetch stages
#[derive(Debug, Default)]
pub struct Scene {
    /// Slots indexed by [`ItemId`]; removed items leave a hole so ids stay stable
    items: Vec<Option<Item>>,
    live: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the scene
    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(Some(item));
        self.live += 1;
        id
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.items.get_mut(id.index())?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())?.as_ref()
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id.index())?.as_mut()
    }

    pub fn material_key(&self, id: ItemId) -> Option<MaterialKey> {
        self.item(id).map(|item| item.material)
    }

    /// Number of live items
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (ItemId(index as u32), item)))
    }

    /// Append every item passing `filter` to `out`, in id order
    pub fn fetch(&self, filter: &ItemFilter, out: &mut ItemIdsBounds) {
        out.extend(
            self.iter()
                .filter(|(_, item)| filter.test(item.key))
                .map(|(id, item)| ItemBound::new(id, item.bound)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn unit_box(x: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, 0.0, -5.0), Vec3::splat(0.5))
    }

    #[test]
    fn test_fetch_by_filter() {
        let mut scene = Scene::new();
        let a = scene.add_item(Item::opaque_shape(unit_box(0.0)));
        let _t = scene.add_item(Item::transparent_shape(unit_box(1.0)));
        let c = scene.add_item(Item::opaque_shape(unit_box(2.0)));
        let _l = scene.add_item(Item::opaque_shape(unit_box(3.0)).layered());

        let mut out = ItemIdsBounds::new();
        scene.fetch(&ItemFilter::opaque_shape().without_layered(), &mut out);
        let ids: Vec<_> = out.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(out[1].bound, unit_box(2.0));
    }

    #[test]
    fn test_remove_keeps_ids_stable() {
        let mut scene = Scene::new();
        let a = scene.add_item(Item::opaque_shape(unit_box(0.0)));
        let b = scene.add_item(Item::light(unit_box(1.0)));
        assert_eq!(scene.len(), 2);

        assert!(scene.remove_item(a).is_some());
        assert!(scene.remove_item(a).is_none());
        assert_eq!(scene.len(), 1);
        assert!(scene.item(a).is_none());
        assert!(scene.item(b).is_some());

        let c = scene.add_item(Item::background());
        assert_ne!(c, a);
        assert_eq!(scene.iter().count(), 2);
    }

    #[test]
    fn test_material_key() {
        let mut scene = Scene::new();
        let id = scene.add_item(
            Item::opaque_shape(unit_box(0.0)).with_material(MaterialKey::METALLIC),
        );
        assert_eq!(scene.material_key(id), Some(MaterialKey::METALLIC));

        scene.item_mut(id).unwrap().material = MaterialKey::GLOSS;
        assert_eq!(scene.material_key(id), Some(MaterialKey::GLOSS));
    }
}
