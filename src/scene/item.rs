//! Drawable items and item classification

use crate::resources::MaterialKey;
use bitflags::bitflags;
use glam::Vec3;

/// Identifier of an item in a [`Scene`](crate::scene::Scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Coarse traits of an item, used to select which stages draw it
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemKey: u32 {
        const SHAPE = 1 << 0;
        const LIGHT = 1 << 1;
        const BACKGROUND = 1 << 2;
        const TRANSLUCENT = 1 << 3;
        const VIEW_SPACE = 1 << 4;
        const DYNAMIC = 1 << 5;
        const DEFORMED = 1 << 6;
        const INVISIBLE = 1 << 7;
        const SHADOW_CASTER = 1 << 8;
        const PICKABLE = 1 << 9;
        const LAYERED = 1 << 10;
    }
}

/// Exact-bit filter over [`ItemKey`]: a key passes when every masked bit
/// matches the value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemFilter {
    pub value: ItemKey,
    pub mask: ItemKey,
}

impl ItemFilter {
    /// A filter accepting every key
    pub fn everything() -> Self {
        Self::default()
    }

    /// Require all of `flags` to be set
    pub fn with(mut self, flags: ItemKey) -> Self {
        self.value |= flags;
        self.mask |= flags;
        self
    }

    /// Require all of `flags` to be clear
    pub fn without(mut self, flags: ItemKey) -> Self {
        self.value &= !flags;
        self.mask |= flags;
        self
    }

    pub fn with_layered(self) -> Self {
        self.with(ItemKey::LAYERED)
    }

    pub fn without_layered(self) -> Self {
        self.without(ItemKey::LAYERED)
    }

    pub fn with_visible(self) -> Self {
        self.without(ItemKey::INVISIBLE)
    }

    pub fn with_world_space(self) -> Self {
        self.without(ItemKey::VIEW_SPACE)
    }

    pub fn opaque_shape() -> Self {
        Self::everything()
            .with(ItemKey::SHAPE)
            .without(ItemKey::TRANSLUCENT)
            .with_world_space()
            .with_visible()
    }

    pub fn transparent_shape() -> Self {
        Self::everything()
            .with(ItemKey::SHAPE | ItemKey::TRANSLUCENT)
            .with_world_space()
            .with_visible()
    }

    pub fn light() -> Self {
        Self::everything().with(ItemKey::LIGHT).with_visible()
    }

    pub fn background() -> Self {
        Self::everything().with(ItemKey::BACKGROUND).with_visible()
    }

    pub fn test(&self, key: ItemKey) -> bool {
        (key & self.mask) == (self.value & self.mask)
    }
}

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// An item id paired with its world bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBound {
    pub id: ItemId,
    pub bound: Aabb,
}

impl ItemBound {
    pub fn new(id: ItemId, bound: Aabb) -> Self {
        Self { id, bound }
    }
}

/// The data passed between fetch, cull and sort stages
pub type ItemIdsBounds = Vec<ItemBound>;

/// Plain list of item ids
pub type ItemIds = Vec<ItemId>;

/// A drawable entry in the scene
#[derive(Debug, Clone)]
pub struct Item {
    pub key: ItemKey,
    pub bound: Aabb,
    pub material: MaterialKey,
}

impl Item {
    pub fn new(key: ItemKey, bound: Aabb) -> Self {
        Self {
            key,
            bound,
            material: MaterialKey::empty(),
        }
    }

    pub fn opaque_shape(bound: Aabb) -> Self {
        Self::new(ItemKey::SHAPE, bound).with_material(MaterialKey::opaque_albedo())
    }

    pub fn transparent_shape(bound: Aabb) -> Self {
        Self::new(ItemKey::SHAPE | ItemKey::TRANSLUCENT, bound)
            .with_material(MaterialKey::ALBEDO | MaterialKey::TRANSPARENT)
    }

    pub fn light(bound: Aabb) -> Self {
        Self::new(ItemKey::LIGHT, bound)
    }

    pub fn background() -> Self {
        Self::new(ItemKey::BACKGROUND, Aabb::default())
    }

    pub fn with_material(mut self, material: MaterialKey) -> Self {
        self.material = material;
        self
    }

    pub fn with_flags(mut self, flags: ItemKey) -> Self {
        self.key |= flags;
        self
    }

    pub fn layered(self) -> Self {
        self.with_flags(ItemKey::LAYERED)
    }
}
