//! Textured cube rendering.
//!
//! [`CubeRenderer`] owns one pipeline and one shared cube mesh. Every live cube gets its own
//! uniform buffer and bind group (matrix, sampler, texture), created the first time the cube is
//! seen and dropped once the cube leaves the scene.

use crate::math::mat::Mat4;
use crate::renderer::pipeline_builder::{
    BindGroupLayoutBuilder, PipelineBuilder, create_uniform_buffer, depth_stencil_state,
};
use crate::renderer::textures;
use crate::renderer::uniform::Uniforms;
use crate::renderer::vertex::{CUBE_VERTEX_COUNT, CubeVertex, cube_vertices};
use crate::renderer::wgpu_lib::DEPTH_FORMAT;
use crate::scene::TransformSink;
use crate::scene::cube::{CubeId, SpawnedCube};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use wgpu::util::DeviceExt;

struct CubeSlot {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture_views: Vec<wgpu::TextureView>,
    slots: HashMap<CubeId, CubeSlot>,
}

impl CubeRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        image_path: &Path,
    ) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Cube Bind Group Layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX)
            .with_sampler(1, wgpu::ShaderStages::FRAGMENT)
            .with_texture(2, wgpu::ShaderStages::FRAGMENT)
            .build();

        let pipeline =
            PipelineBuilder::new(device, surface_format, include_str!("shaders/cube.wgsl"))
                .with_label("Cube Pipeline")
                .with_vertex_buffer(CubeVertex::desc())
                .with_bind_group_layout(&bind_group_layout)
                .with_depth_stencil(depth_stencil_state(DEPTH_FORMAT))
                .build();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&cube_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Cube Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let texture_views = textures::cube_texture_images(image_path)
            .iter()
            .enumerate()
            .map(|(i, img)| {
                textures::upload_texture(device, queue, img, &format!("Cube Texture {i}"))
                    .create_view(&wgpu::TextureViewDescriptor::default())
            })
            .collect();

        Self {
            pipeline,
            vertex_buffer,
            bind_group_layout,
            sampler,
            texture_views,
            slots: HashMap::new(),
        }
    }

    /// Number of textures a cube may pick from.
    pub fn texture_count(&self) -> usize {
        self.texture_views.len()
    }

    /// Creates resources for new cubes and releases those of cubes no longer present.
    pub fn sync<'a>(
        &mut self,
        device: &wgpu::Device,
        cubes: impl IntoIterator<Item = &'a SpawnedCube>,
    ) {
        let mut live = HashSet::new();
        for cube in cubes {
            live.insert(cube.id());
            if !self.slots.contains_key(&cube.id()) {
                let slot = self.create_slot(device, cube);
                self.slots.insert(cube.id(), slot);
            }
        }
        self.slots.retain(|id, _| live.contains(id));
    }

    fn create_slot(&self, device: &wgpu::Device, cube: &SpawnedCube) -> CubeSlot {
        let label = format!("Cube {} Uniforms", cube.id().0);
        let uniform_buffer = create_uniform_buffer(device, &Uniforms::new(), &label);
        // Out-of-range indices wrap rather than fail.
        let texture = &self.texture_views[cube.texture_index() % self.texture_views.len()];

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&label),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(texture),
                },
            ],
        });

        CubeSlot {
            uniform_buffer,
            bind_group,
        }
    }

    /// Sink that writes each submitted matrix into the matching cube's uniform buffer.
    pub fn transform_sink<'a>(&'a self, queue: &'a wgpu::Queue) -> GpuTransformSink<'a> {
        GpuTransformSink {
            slots: &self.slots,
            queue,
        }
    }

    /// Draws the given cubes in order. Cubes without a slot are skipped.
    pub fn draw<'a>(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        cubes: impl IntoIterator<Item = &'a SpawnedCube>,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        for cube in cubes {
            if let Some(slot) = self.slots.get(&cube.id()) {
                pass.set_bind_group(0, &slot.bind_group, &[]);
                pass.draw(0..CUBE_VERTEX_COUNT, 0..1);
            }
        }
    }
}

pub struct GpuTransformSink<'a> {
    slots: &'a HashMap<CubeId, CubeSlot>,
    queue: &'a wgpu::Queue,
}

impl TransformSink for GpuTransformSink<'_> {
    fn submit(&mut self, id: CubeId, matrix: &Mat4) {
        match self.slots.get(&id) {
            Some(slot) => {
                let uniforms = Uniforms::from_matrix(matrix);
                self.queue
                    .write_buffer(&slot.uniform_buffer, 0, uniforms.as_bytes());
            }
            None => log::warn!("No GPU slot for cube {}", id.0),
        }
    }
}
