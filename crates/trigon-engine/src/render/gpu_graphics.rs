use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::bootstrap::{DrawStatus, Graphics};
use crate::coords::ViewportRect;
use crate::device::{Gpu, SurfaceRecovery};
use crate::error::BootstrapError;
use crate::geometry::{DrawCall, Mesh};
use crate::paint::Color;
use crate::shader::LinkedProgram;

/// Static geometry resident on the GPU.
pub struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: Option<wgpu::Buffer>,
}

impl Graphics for Gpu {
    type Pipeline = wgpu::RenderPipeline;
    type Mesh = GpuMesh;

    fn create_pipeline(&mut self, program: &LinkedProgram) -> Result<wgpu::RenderPipeline, BootstrapError> {
        let limits = self.device().limits();
        let layout = &program.layout;
        if layout.attributes.len() as u32 > limits.max_vertex_attributes {
            return Err(BootstrapError::ProgramLink(format!(
                "{} vertex attributes exceed the device limit of {}",
                layout.attributes.len(),
                limits.max_vertex_attributes
            )));
        }
        if layout.stride > limits.max_vertex_buffer_array_stride as u64 {
            return Err(BootstrapError::ProgramLink(format!(
                "vertex stride {} exceeds the device limit of {}",
                layout.stride, limits.max_vertex_buffer_array_stride
            )));
        }

        let device = self.device();

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trigon vertex shader"),
            source: wgpu::ShaderSource::Wgsl(program.vertex.source.as_str().into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trigon fragment shader"),
            source: wgpu::ShaderSource::Wgsl(program.fragment.source.as_str().into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trigon pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let attributes = layout.wgpu_attributes();
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: layout.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        }];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trigon pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(program.vertex.entry_point.as_str()),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(program.fragment.entry_point.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // The pipeline keeps what it needs; the stage modules drop here.
        Ok(pipeline)
    }

    fn upload_mesh(&mut self, mesh: &Mesh) -> GpuMesh {
        let vertices = self.device().create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trigon vbo"),
            contents: mesh.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices = mesh.index_bytes().map(|bytes| {
            self.device().create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("trigon ibo"),
                contents: bytes,
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        GpuMesh { vertices, indices }
    }

    fn resize_framebuffer(&mut self, width: u32, height: u32) {
        self.resize(PhysicalSize::new(width, height));
    }

    fn draw(
        &mut self,
        clear: Color,
        viewport: ViewportRect,
        pipeline: &wgpu::RenderPipeline,
        mesh: &GpuMesh,
        call: DrawCall,
    ) -> DrawStatus {
        let target = self.configured_size();
        let viewport = viewport.clamped_to(target.width, target.height);
        if viewport.is_empty() {
            return DrawStatus::Skipped;
        }

        let mut frame = match self.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("failed to acquire frame: {err}");
                return match self.handle_surface_error(err) {
                    SurfaceRecovery::Lost => DrawStatus::Lost,
                    SurfaceRecovery::Reconfigured | SurfaceRecovery::Skip => DrawStatus::Skipped,
                };
            }
        };

        // Render pass is dropped before the encoder is moved into submit().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trigon frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let (x, y, w, h) = viewport.as_f32();
            rpass.set_viewport(x, y, w, h, 0.0, 1.0);
            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(0, mesh.vertices.slice(..));

            match (call, mesh.indices.as_ref()) {
                (DrawCall::Arrays { vertex_count }, _) => rpass.draw(0..vertex_count, 0..1),
                (DrawCall::Indexed { index_count }, Some(indices)) => {
                    rpass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..index_count, 0, 0..1);
                }
                (DrawCall::Indexed { .. }, None) => {
                    log::error!("indexed draw requested for a mesh without an index buffer");
                }
            }
        }

        self.submit(frame);
        DrawStatus::Presented
    }

    fn release_mesh(&mut self, mesh: GpuMesh) {
        mesh.vertices.destroy();
        if let Some(indices) = mesh.indices {
            indices.destroy();
        }
        log::debug!("released vertex/index buffers");
    }

    fn release_pipeline(&mut self, pipeline: wgpu::RenderPipeline) {
        drop(pipeline);
        log::debug!("released pipeline");
    }
}
