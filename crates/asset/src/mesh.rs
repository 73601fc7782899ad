//! CPU-side mesh representation produced by the importer.

use bytemuck::{Pod, Zeroable};

pub const MAX_BONE_INFLUENCE: usize = 4;

/// Interleaved vertex. Field order is the GPU attribute layout contract.
///
/// Bone influences are carried for format compatibility; the demo never
/// animates them and they upload as zeros for static scenes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
    pub bone_indices: [i32; MAX_BONE_INFLUENCE],
    pub bone_weights: [f32; MAX_BONE_INFLUENCE],
}

impl Vertex {
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Semantic role a material binds a texture to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Diffuse,
    Specular,
    Normal,
    Height,
}

impl TextureSlot {
    /// Resolution order at import time; also the slot-name order shaders see.
    pub const ALL: [TextureSlot; 4] = [
        TextureSlot::Diffuse,
        TextureSlot::Specular,
        TextureSlot::Normal,
        TextureSlot::Height,
    ];

    /// Shader-facing base name, numbered per slot at bind time.
    pub fn name(self) -> &'static str {
        match self {
            TextureSlot::Diffuse => "texture_diffuse",
            TextureSlot::Specular => "texture_specular",
            TextureSlot::Normal => "texture_normal",
            TextureSlot::Height => "texture_height",
        }
    }
}

/// Index into a model's decoded image table (decode order, dense).
pub type TextureId = usize;

/// A mesh's reference to one cached texture.
///
/// Many meshes may reference the same id; `path` is the relative path the
/// material declared, which is also the cache key.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureRef {
    pub texture: TextureId,
    pub slot: TextureSlot,
    pub path: String,
}

/// One drawable unit: vertices, indices and ordered texture references.
///
/// Indices must stay within `vertices`; the importer guarantees this for
/// parsed scenes and the GPU mesh builder does not re-validate it.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub textures: Vec<TextureRef>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, textures: Vec<TextureRef>) -> Self {
        Self {
            vertices,
            indices,
            textures,
        }
    }
}

/// Shader uniform names for a texture sequence, in bind order.
///
/// Each texture occupies the unit equal to its sequence position and is
/// named `material.texture_<slot>N` with N counting per slot type from 1,
/// so a second diffuse map becomes `material.texture_diffuse2`.
pub fn sampler_uniforms(textures: &[TextureRef]) -> Vec<String> {
    let mut counts = [0u32; TextureSlot::ALL.len()];
    textures
        .iter()
        .map(|t| {
            let i = t.slot as usize;
            counts[i] += 1;
            format!("material.{}{}", t.slot.name(), counts[i])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tex(texture: TextureId, slot: TextureSlot) -> TextureRef {
        TextureRef {
            texture,
            slot,
            path: format!("tex{texture}.png"),
        }
    }

    #[test]
    fn sampler_names_count_per_slot_type() {
        let refs = [
            tex(0, TextureSlot::Diffuse),
            tex(1, TextureSlot::Diffuse),
            tex(2, TextureSlot::Specular),
        ];
        assert_eq!(
            sampler_uniforms(&refs),
            vec![
                "material.texture_diffuse1",
                "material.texture_diffuse2",
                "material.texture_specular1",
            ]
        );
    }

    #[test]
    fn sampler_names_follow_sequence_order_across_slots() {
        let refs = [
            tex(0, TextureSlot::Normal),
            tex(1, TextureSlot::Diffuse),
            tex(0, TextureSlot::Height),
            tex(1, TextureSlot::Normal),
        ];
        assert_eq!(
            sampler_uniforms(&refs),
            vec![
                "material.texture_normal1",
                "material.texture_diffuse1",
                "material.texture_height1",
                "material.texture_normal2",
            ]
        );
    }

    #[test]
    fn vertex_is_tightly_packed() {
        // 14 floats + 4 ints + 4 floats, no padding.
        assert_eq!(std::mem::size_of::<Vertex>(), 88);
    }
}
