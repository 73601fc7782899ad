//! Owned material descriptions and semantic slot resolution.
//!
//! Materials are copied out of the parser's temporaries at import time so
//! nothing here borrows from the glTF document.

use crate::cache::TextureCache;
use crate::mesh::{TextureRef, TextureSlot};

/// Texture channel a source material can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialChannel {
    BaseColor,
    MetallicRoughness,
    Normal,
    Occlusion,
    Emissive,
}

impl MaterialChannel {
    pub const ALL: [MaterialChannel; 5] = [
        MaterialChannel::BaseColor,
        MaterialChannel::MetallicRoughness,
        MaterialChannel::Normal,
        MaterialChannel::Occlusion,
        MaterialChannel::Emissive,
    ];
}

/// Texture declarations of one material: relative paths per channel, in
/// declaration order.
#[derive(Clone, Debug, Default)]
pub struct Material {
    pub name: Option<String>,
    pub(crate) paths: [Vec<String>; MaterialChannel::ALL.len()],
}

impl Material {
    pub fn push_texture(&mut self, channel: MaterialChannel, relative_path: impl Into<String>) {
        self.paths[channel as usize].push(relative_path.into());
    }

    pub fn texture_paths(&self, channel: MaterialChannel) -> &[String] {
        &self.paths[channel as usize]
    }
}

/// Mapping from semantic texture slots to source material channels.
///
/// The default preserves the legacy asset convention this demo inherited
/// (height maps ride in the ambient/occlusion channel); other asset sets
/// can remap without touching the importer.
#[derive(Clone, Copy, Debug)]
pub struct SlotMapping {
    pub diffuse: MaterialChannel,
    pub specular: MaterialChannel,
    pub normal: MaterialChannel,
    pub height: MaterialChannel,
}

impl Default for SlotMapping {
    fn default() -> Self {
        Self {
            diffuse: MaterialChannel::BaseColor,
            specular: MaterialChannel::MetallicRoughness,
            normal: MaterialChannel::Normal,
            height: MaterialChannel::Occlusion,
        }
    }
}

impl SlotMapping {
    pub fn channel_for(&self, slot: TextureSlot) -> MaterialChannel {
        match slot {
            TextureSlot::Diffuse => self.diffuse,
            TextureSlot::Specular => self.specular,
            TextureSlot::Normal => self.normal,
            TextureSlot::Height => self.height,
        }
    }
}

/// Resolve one semantic slot of a material against the texture cache.
///
/// Every path the material declares for the mapped channel is loaded (or
/// found) in the cache and tagged with the slot. A material without that
/// channel yields an empty sequence; that is not an error.
pub fn resolve_slot(
    material: &Material,
    slot: TextureSlot,
    mapping: &SlotMapping,
    cache: &mut TextureCache,
) -> Vec<TextureRef> {
    material
        .texture_paths(mapping.channel_for(slot))
        .iter()
        .map(|path| TextureRef {
            texture: cache.load(path),
            slot,
            path: path.clone(),
        })
        .collect()
}
