//! Procedurally animated water: a flat grid displaced by Gerstner-style
//! waves in the vertex shader.

use bytemuck::{Pod, Zeroable};
use wgpu::{
    BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    BlendState, Buffer, BufferBindingType, BufferUsages, ColorTargetState, ColorWrites, Device,
    FragmentState, Queue, RenderPass, RenderPipeline, RenderPipelineDescriptor,
    ShaderModuleDescriptor, ShaderSource, ShaderStages, TextureFormat, VertexBufferLayout,
    VertexState, VertexStepMode, util::DeviceExt,
};

/// Wave parameters driven by the overlay at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterParams {
    pub amplitude: f32,
    pub wavelength: f32,
    pub speed: f32,
    pub steepness: f32,
    pub direction_deg: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            amplitude: 0.35,
            wavelength: 9.0,
            speed: 1.2,
            steepness: 0.6,
            direction_deg: 25.0,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct WaterUniform {
    /// amplitude, angular frequency (2*pi/wavelength), phase speed, steepness
    wave: [f32; 4],
    /// unit direction in the xz plane
    direction: [f32; 4],
}

impl WaterUniform {
    fn from_params(params: &WaterParams) -> Self {
        let frequency = std::f32::consts::TAU / params.wavelength.max(0.01);
        let (sin, cos) = params.direction_deg.to_radians().sin_cos();
        Self {
            wave: [params.amplitude, frequency, params.speed, params.steepness],
            direction: [cos, sin, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct WaterVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

const WATER_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: std::mem::size_of::<WaterVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
};

/// Flat grid centered on the origin: `resolution`^2 quads over
/// `extent` x `extent` world units, uv spanning [0, 1].
pub fn grid_mesh(extent: f32, resolution: u32) -> (Vec<WaterVertex>, Vec<u32>) {
    let res = resolution.max(1);
    let verts_per_side = res + 1;
    let mut vertices = Vec::with_capacity((verts_per_side * verts_per_side) as usize);
    for z in 0..verts_per_side {
        for x in 0..verts_per_side {
            let u = x as f32 / res as f32;
            let v = z as f32 / res as f32;
            vertices.push(WaterVertex {
                position: [(u - 0.5) * extent, 0.0, (v - 0.5) * extent],
                uv: [u, v],
            });
        }
    }
    let mut indices = Vec::with_capacity((res * res * 6) as usize);
    for z in 0..res {
        for x in 0..res {
            let i00 = z * verts_per_side + x;
            let i10 = i00 + 1;
            let i01 = i00 + verts_per_side;
            let i11 = i01 + 1;
            indices.extend([i00, i01, i11, i00, i11, i10]);
        }
    }
    (vertices, indices)
}

pub struct WaterPass {
    pipeline: RenderPipeline,
    params_buf: Buffer,
    params_bg: BindGroup,
    vertex_buf: Buffer,
    index_buf: Buffer,
    index_count: u32,
}

impl WaterPass {
    pub fn new(
        device: &Device,
        surface_format: TextureFormat,
        depth_format: TextureFormat,
        globals_bgl: &BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Water WGSL"),
            source: ShaderSource::Wgsl(include_str!("shaders/water.wgsl").into()),
        });

        let params_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Water BGL"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let params_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water UBO"),
            contents: bytemuck::bytes_of(&WaterUniform::from_params(&WaterParams::default())),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let params_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Water BG"),
            layout: &params_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: params_buf.as_entire_binding(),
            }],
        });

        let (vertices, indices) = grid_mesh(220.0, 256);
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water VB"),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water IB"),
            contents: bytemuck::cast_slice(&indices),
            usage: BufferUsages::INDEX,
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Water PipelineLayout"),
            bind_group_layouts: &[globals_bgl, &params_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Water Pipeline"),
            layout: Some(&layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[WATER_VERTEX_LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                // The surface is visible from below when diving.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            params_buf,
            params_bg,
            vertex_buf,
            index_buf,
            index_count: indices.len() as u32,
        }
    }

    pub fn update(&self, queue: &Queue, params: &WaterParams) {
        queue.write_buffer(
            &self.params_buf,
            0,
            bytemuck::bytes_of(&WaterUniform::from_params(params)),
        );
    }

    pub fn draw(&self, rpass: &mut RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.params_bg, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buf.slice(..));
        rpass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts_match_resolution() {
        let (vertices, indices) = grid_mesh(10.0, 8);
        assert_eq!(vertices.len(), 9 * 9);
        assert_eq!(indices.len(), 8 * 8 * 6);
    }

    #[test]
    fn grid_indices_stay_in_bounds() {
        let (vertices, indices) = grid_mesh(50.0, 33);
        let max = *indices.iter().max().unwrap();
        assert!((max as usize) < vertices.len());
    }

    #[test]
    fn grid_uv_spans_unit_square() {
        let (vertices, _) = grid_mesh(4.0, 4);
        assert_eq!(vertices.first().unwrap().uv, [0.0, 0.0]);
        assert_eq!(vertices.last().unwrap().uv, [1.0, 1.0]);
        assert!(vertices.iter().all(|v| {
            v.uv[0] >= 0.0 && v.uv[0] <= 1.0 && v.uv[1] >= 0.0 && v.uv[1] <= 1.0
        }));
    }

    #[test]
    fn uniform_derives_frequency_from_wavelength() {
        let params = WaterParams {
            wavelength: std::f32::consts::TAU,
            ..WaterParams::default()
        };
        let uniform = WaterUniform::from_params(&params);
        assert!((uniform.wave[1] - 1.0).abs() < 1e-6);
        // Direction is a unit vector.
        let len = (uniform.direction[0].powi(2) + uniform.direction[1].powi(2)).sqrt();
        assert!((len - 1.0).abs() < 1e-6);
    }
}
