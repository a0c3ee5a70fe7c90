//! Material definitions and material classification

use bitflags::bitflags;
use glam::{Vec3, Vec4};
use std::cmp::Ordering;

bitflags! {
    /// Coarse trait description of a material, used to classify draw items.
    ///
    /// Value bits say a trait is present; map bits say it comes from a texture.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MaterialKey: u32 {
        const EMISSIVE = 1 << 0;
        const ALBEDO = 1 << 1;
        const METALLIC = 1 << 2;
        const GLOSS = 1 << 3;
        const TRANSPARENT = 1 << 4;

        const EMISSIVE_MAP = 1 << 5;
        const ALBEDO_MAP = 1 << 6;
        const METALLIC_MAP = 1 << 7;
        const GLOSS_MAP = 1 << 8;
        const TRANSPARENT_MAP = 1 << 9;
        const NORMAL_MAP = 1 << 10;
        const LIGHTMAP_MAP = 1 << 11;
    }
}

/// Texture slot of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapChannel {
    Emissive,
    Albedo,
    Metallic,
    Gloss,
    Transparent,
    Normal,
    Lightmap,
}

impl MapChannel {
    pub const ALL: [MapChannel; 7] = [
        MapChannel::Emissive,
        MapChannel::Albedo,
        MapChannel::Metallic,
        MapChannel::Gloss,
        MapChannel::Transparent,
        MapChannel::Normal,
        MapChannel::Lightmap,
    ];

    /// The key bit marking this channel as textured
    pub fn flag(self) -> MaterialKey {
        match self {
            MapChannel::Emissive => MaterialKey::EMISSIVE_MAP,
            MapChannel::Albedo => MaterialKey::ALBEDO_MAP,
            MapChannel::Metallic => MaterialKey::METALLIC_MAP,
            MapChannel::Gloss => MaterialKey::GLOSS_MAP,
            MapChannel::Transparent => MaterialKey::TRANSPARENT_MAP,
            MapChannel::Normal => MaterialKey::NORMAL_MAP,
            MapChannel::Lightmap => MaterialKey::LIGHTMAP_MAP,
        }
    }
}

impl MaterialKey {
    pub fn opaque_albedo() -> Self {
        MaterialKey::ALBEDO
    }

    pub fn is_opaque(&self) -> bool {
        !self.contains(MaterialKey::TRANSPARENT)
    }

    pub fn set_map_channel(&mut self, channel: MapChannel, value: bool) {
        self.set(channel.flag(), value);
    }

    pub fn has_map_channel(&self, channel: MapChannel) -> bool {
        self.contains(channel.flag())
    }
}

/// Exact-bit filter over [`MaterialKey`].
///
/// Filters are totally ordered by value bits, then mask bits, so they can key
/// a sorted bucket map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialFilter {
    pub value: MaterialKey,
    pub mask: MaterialKey,
}

impl MaterialFilter {
    pub fn new(value: MaterialKey, mask: MaterialKey) -> Self {
        Self { value, mask }
    }

    /// Require all of `flags` to be set
    pub fn with(mut self, flags: MaterialKey) -> Self {
        self.value |= flags;
        self.mask |= flags;
        self
    }

    /// Require all of `flags` to be clear
    pub fn without(mut self, flags: MaterialKey) -> Self {
        self.value &= !flags;
        self.mask |= flags;
        self
    }

    pub fn opaque_albedo() -> Self {
        Self::default()
            .with(MaterialKey::ALBEDO)
            .without(MaterialKey::TRANSPARENT)
    }

    pub fn transparent() -> Self {
        Self::default().with(MaterialKey::TRANSPARENT)
    }

    pub fn emissive() -> Self {
        Self::default().with(MaterialKey::EMISSIVE)
    }

    pub fn test(&self, key: MaterialKey) -> bool {
        (key & self.mask) == (self.value & self.mask)
    }
}

impl Ord for MaterialFilter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .bits()
            .cmp(&other.value.bits())
            .then_with(|| self.mask.bits().cmp(&other.mask.bits()))
    }
}

impl PartialOrd for MaterialFilter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// PBR material properties
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub base_color: Vec4,
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: Vec3,

    /// Texture ids per channel (None means no map)
    pub texture_maps: [Option<usize>; 7],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            metallic: 0.0,
            roughness: 0.9,
            emissive: Vec3::ZERO,
            texture_maps: [None; 7],
        }
    }
}

impl Material {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_base_color(mut self, color: Vec4) -> Self {
        self.base_color = color;
        self
    }

    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic;
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_emissive(mut self, emissive: Vec3) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_texture_map(mut self, channel: MapChannel, texture: usize) -> Self {
        self.texture_maps[channel as usize] = Some(texture);
        self
    }

    pub fn texture_map(&self, channel: MapChannel) -> Option<usize> {
        self.texture_maps[channel as usize]
    }

    pub fn opacity(&self) -> f32 {
        self.base_color.w
    }

    /// Classification key derived from the current parameters
    pub fn key(&self) -> MaterialKey {
        let mut key = MaterialKey::ALBEDO;
        key.set(MaterialKey::EMISSIVE, self.emissive != Vec3::ZERO);
        key.set(MaterialKey::METALLIC, self.metallic > 0.0);
        key.set(MaterialKey::GLOSS, self.roughness < 1.0);
        key.set(MaterialKey::TRANSPARENT, self.opacity() < 1.0);
        for channel in MapChannel::ALL {
            key.set_map_channel(channel, self.texture_map(channel).is_some());
        }
        key
    }

    /// Convert a legacy specular exponent to PBR roughness
    pub fn shininess_to_roughness(shininess: f32) -> f32 {
        1.0 - shininess / 128.0
    }

    pub fn plastic(color: Vec3) -> Self {
        Self::new("plastic")
            .with_base_color(color.extend(1.0))
            .with_metallic(0.0)
            .with_roughness(0.4)
    }

    pub fn metal(color: Vec3, roughness: f32) -> Self {
        Self::new("metal")
            .with_base_color(color.extend(1.0))
            .with_metallic(1.0)
            .with_roughness(roughness)
    }

    pub fn glass() -> Self {
        Self::new("glass")
            .with_base_color(Vec4::new(1.0, 1.0, 1.0, 0.3))
            .with_roughness(0.1)
    }
}
