//! Material bucket sort stage

use crate::resources::{MaterialFilter, MaterialKey};
use crate::scene::{ItemBound, ItemId, ItemIds, ItemIdsBounds, Scene};
use crate::task::{InputOutputJobBody, RenderContext, SceneContext};
use std::collections::BTreeMap;

/// Item ids grouped into buckets keyed by material filter.
///
/// Buckets enumerate in [`MaterialFilter`] order. An item goes into every
/// bucket whose filter accepts its key.
#[derive(Debug, Clone, Default)]
pub struct ItemMaterialBucketMap {
    buckets: BTreeMap<MaterialFilter, ItemIds>,
}

impl ItemMaterialBucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with the standard buckets already allocated
    pub fn standard() -> Self {
        let mut map = Self::new();
        map.allocate_standard_material_buckets();
        map
    }

    pub fn allocate_bucket(&mut self, filter: MaterialFilter) {
        self.buckets.entry(filter).or_default();
    }

    pub fn allocate_standard_material_buckets(&mut self) {
        self.allocate_bucket(MaterialFilter::opaque_albedo());
        self.allocate_bucket(MaterialFilter::transparent());
        self.allocate_bucket(MaterialFilter::emissive());
    }

    /// Insert `id` into every bucket accepting `key`; returns whether any did
    pub fn insert(&mut self, id: ItemId, key: MaterialKey) -> bool {
        let mut inserted = false;
        for (filter, ids) in self.buckets.iter_mut() {
            if filter.test(key) {
                ids.push(id);
                inserted = true;
            }
        }
        inserted
    }

    pub fn bucket(&self, filter: &MaterialFilter) -> Option<&[ItemId]> {
        self.buckets.get(filter).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MaterialFilter, &ItemIds)> {
        self.buckets.iter()
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Empty every bucket, keeping the allocated filters
    pub fn clear_items(&mut self) {
        for ids in self.buckets.values_mut() {
            ids.clear();
        }
    }
}

/// Regroup `in_items` by material into `out_items`.
///
/// Entries are emitted bucket by bucket, each at its first accepting bucket,
/// keeping input order within a bucket. Entries no bucket accepts follow in
/// input order. Every input entry appears exactly once in the output, repeated
/// ids included. `buckets` is refilled in the process.
pub fn material_sort_items(
    scene: &Scene,
    buckets: &mut ItemMaterialBucketMap,
    in_items: &[ItemBound],
    out_items: &mut ItemIdsBounds,
) {
    let keys: Vec<MaterialKey> = in_items
        .iter()
        .map(|item| scene.material_key(item.id).unwrap_or_default())
        .collect();

    buckets.clear_items();
    for (item, key) in in_items.iter().zip(&keys) {
        buckets.insert(item.id, *key);
    }

    let mut emitted = vec![false; in_items.len()];
    out_items.clear();
    for filter in buckets.buckets.keys() {
        for (index, item) in in_items.iter().enumerate() {
            if !emitted[index] && filter.test(keys[index]) {
                emitted[index] = true;
                out_items.push(*item);
            }
        }
    }
    out_items.extend(
        in_items
            .iter()
            .zip(&emitted)
            .filter(|(_, done)| !**done)
            .map(|(item, _)| *item),
    );
}

/// Groups items by material so draws with the same material traits are adjacent
#[derive(Debug, Clone)]
pub struct MaterialSortItems {
    buckets: ItemMaterialBucketMap,
}

impl Default for MaterialSortItems {
    fn default() -> Self {
        Self {
            buckets: ItemMaterialBucketMap::standard(),
        }
    }
}

impl InputOutputJobBody for MaterialSortItems {
    type Input = ItemIdsBounds;
    type Output = ItemIdsBounds;

    fn run(
        &mut self,
        scene: &SceneContext,
        _render: &mut RenderContext,
        input: &ItemIdsBounds,
        output: &mut ItemIdsBounds,
    ) {
        material_sort_items(scene.scene(), &mut self.buckets, input, output);
    }
}
