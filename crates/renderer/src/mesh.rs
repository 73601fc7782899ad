//! GPU mesh builder: static vertex/index buffers plus the material bind
//! group realizing the `material.texture_<slot>N` naming contract.

use asset::{MeshData, Vertex, sampler_uniforms};
use wgpu::{
    BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    Buffer, BufferUsages, Device, Queue, RenderPass, SamplerBindingType, ShaderStages,
    TextureSampleType, TextureViewDimension, VertexBufferLayout, VertexStepMode,
    util::DeviceExt,
};

use crate::texture::{self, GpuTexture};

/// Attribute layout matching [`asset::Vertex`] field order.
pub const VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2, // uv
        3 => Float32x3, // tangent
        4 => Float32x3, // bitangent
        5 => Sint32x4,  // bone indices
        6 => Float32x4, // bone weights
    ],
};

/// Sampler uniforms the mesh shader declares, in binding order. A mesh's
/// texture sequence is matched against these by name; unmatched shader
/// slots fall back to neutral 1x1 textures.
pub const SHADER_SLOTS: [&str; 2] = ["material.texture_diffuse1", "material.texture_normal1"];

/// Shared material bind group layout: one texture per shader slot plus one
/// sampler, with per-slot fallback textures.
pub struct MaterialLayout {
    bgl: BindGroupLayout,
    sampler: wgpu::Sampler,
    fallbacks: [GpuTexture; SHADER_SLOTS.len()],
}

impl MaterialLayout {
    pub fn new(device: &Device, queue: &Queue) -> Self {
        let texture_entry = |binding| BindGroupLayoutEntry {
            binding,
            visibility: ShaderStages::FRAGMENT,
            ty: BindingType::Texture {
                sample_type: TextureSampleType::Float { filterable: true },
                view_dimension: TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Material BGL"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                BindGroupLayoutEntry {
                    binding: 2,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let fallbacks = [
            texture::solid_color(device, queue, "FallbackDiffuse", [255, 255, 255, 255]),
            // Flat tangent-space normal keeps unlit meshes shaded by their
            // vertex normals.
            texture::solid_color(device, queue, "FallbackNormal", [128, 128, 255, 255]),
        ];
        Self {
            bgl,
            sampler: texture::default_sampler(device),
            fallbacks,
        }
    }

    pub fn bind_group_layout(&self) -> &BindGroupLayout {
        &self.bgl
    }
}

/// Map each shader slot name to the texture-sequence position bound to it.
fn resolve_slot_units(uniform_names: &[String]) -> [Option<usize>; SHADER_SLOTS.len()] {
    SHADER_SLOTS.map(|slot| uniform_names.iter().position(|name| name == slot))
}

/// A GPU-resident drawable mesh. Buffers and bind group are created once
/// at build time and never mutated.
pub struct GpuMesh {
    vertex_buf: Buffer,
    index_buf: Buffer,
    index_count: u32,
    material_bg: BindGroup,
}

impl GpuMesh {
    /// Upload a [`MeshData`]. Indices are trusted to be in range; the
    /// builder performs no validation (out-of-range indices are undefined
    /// behavior at draw time).
    pub fn build(
        device: &Device,
        data: &MeshData,
        textures: &[GpuTexture],
        layout: &MaterialLayout,
    ) -> Self {
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh VB"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh IB"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: BufferUsages::INDEX,
        });

        let names = sampler_uniforms(&data.textures);
        let units = resolve_slot_units(&names);
        let view_for = |slot: usize| {
            units[slot]
                .and_then(|unit| textures.get(data.textures[unit].texture))
                .map(|t| &t.view)
                .unwrap_or(&layout.fallbacks[slot].view)
        };
        let material_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Material BG"),
            layout: &layout.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view_for(0)),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view_for(1)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&layout.sampler),
                },
            ],
        });

        Self {
            vertex_buf,
            index_buf,
            index_count: data.indices.len() as u32,
            material_bg,
        }
    }

    /// Rebind this mesh's material and issue its indexed draw. The globals
    /// bind group (group 0) must already be set.
    pub fn draw(&self, rpass: &mut RenderPass<'_>) {
        rpass.set_bind_group(1, &self.material_bg, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buf.slice(..));
        rpass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset::{TextureRef, TextureSlot};

    fn tex(texture: usize, slot: TextureSlot) -> TextureRef {
        TextureRef {
            texture,
            slot,
            path: String::new(),
        }
    }

    #[test]
    fn first_diffuse_and_normal_map_to_shader_slots() {
        let refs = [
            tex(0, TextureSlot::Specular),
            tex(1, TextureSlot::Diffuse),
            tex(2, TextureSlot::Normal),
            tex(3, TextureSlot::Diffuse),
        ];
        let units = resolve_slot_units(&sampler_uniforms(&refs));
        // texture_diffuse1 is the first diffuse in sequence order (unit 1);
        // texture_diffuse2 (unit 3) has no shader slot in this demo.
        assert_eq!(units, [Some(1), Some(2)]);
    }

    #[test]
    fn missing_slots_resolve_to_none() {
        let refs = [tex(0, TextureSlot::Height)];
        let units = resolve_slot_units(&sampler_uniforms(&refs));
        assert_eq!(units, [None, None]);
    }

    #[test]
    fn vertex_layout_covers_every_field() {
        let total: u64 = VERTEX_LAYOUT
            .attributes
            .iter()
            .map(|a| a.format.size())
            .sum();
        assert_eq!(total, VERTEX_LAYOUT.array_stride);
    }
}
