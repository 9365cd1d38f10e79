use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{Vec2, Viewport};
use crate::pointer::{PointerTrail, TRAIL_LENGTH};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::Camera;

/// GPU uniform block for the trail shader.
///
/// Layout matches `SceneUniforms` in `shaders/trail.wgsl`:
///
///  offset   0  resolution     vec2f
///  offset   8  pointer        vec2f
///  offset  16  camera_pos     vec3f
///  offset  28  time           f32
///  offset  32  camera_target  vec3f
///  offset  44  aspect         f32
///  offset  48  focal          f32
///  offset  52  near           f32
///  offset  56  far            f32
///  offset  64  trail          array<vec4f, 15>
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TrailUniform {
    pub resolution: [f32; 2],
    pub pointer: [f32; 2],
    pub camera_pos: [f32; 3],
    pub time: f32,
    pub camera_target: [f32; 3],
    pub aspect: f32,
    pub focal: f32,
    pub near: f32,
    pub far: f32,
    pub _pad: f32,
    pub trail: [[f32; 4]; TRAIL_LENGTH],
}

impl TrailUniform {
    /// Assembles the per-frame uniform bundle.
    pub fn new(
        viewport: Viewport,
        camera: &Camera,
        pointer: Vec2,
        trail: &PointerTrail,
        time: f32,
    ) -> Self {
        Self {
            resolution: [viewport.width, viewport.height],
            pointer: [pointer.x, pointer.y],
            camera_pos: camera.position.to_array(),
            time,
            camera_target: camera.target.to_array(),
            aspect: camera.aspect(),
            focal: camera.focal(),
            near: camera.near(),
            far: camera.far(),
            _pad: 0.0,
            trail: trail.to_uniform(),
        }
    }
}

/// Renderer for the full-screen trail plane.
///
/// The pipeline is built lazily and rebuilt if the surface format
/// changes. Geometry is a single quad spanning clip space; all of the
/// visual work happens in the fragment shader.
#[derive(Default)]
pub struct PlaneRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
}

impl PlaneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        uniforms: &TrailUniform,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(uniforms));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("comet trail pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("comet trail shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/trail.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("comet trail bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(uniform_min_binding_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("comet trail pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("comet trail pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
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

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("comet trail ubo"),
            size: std::mem::size_of::<TrailUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("comet trail bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("comet trail quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("comet trail quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Returns the `wgpu` minimum binding size for the trail uniform buffer.
///
/// `TrailUniform` is a fixed, non-empty layout, so the size is always
/// non-zero. Centralising this avoids `.unwrap()` at the pipeline
/// creation site.
fn uniform_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<TrailUniform>() as u64)
        .expect("TrailUniform has non-zero size by construction")
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Quad corner in clip space.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2], // -1..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    use crate::coords::Vec3;

    // The WGSL side declares `SceneUniforms` with these exact offsets;
    // drifting here means garbage uniforms, not a compile error.

    #[test]
    fn uniform_block_size() {
        assert_eq!(size_of::<TrailUniform>(), 304);
    }

    #[test]
    fn uniform_field_offsets_match_wgsl() {
        assert_eq!(offset_of!(TrailUniform, resolution), 0);
        assert_eq!(offset_of!(TrailUniform, pointer), 8);
        assert_eq!(offset_of!(TrailUniform, camera_pos), 16);
        assert_eq!(offset_of!(TrailUniform, time), 28);
        assert_eq!(offset_of!(TrailUniform, camera_target), 32);
        assert_eq!(offset_of!(TrailUniform, aspect), 44);
        assert_eq!(offset_of!(TrailUniform, focal), 48);
        assert_eq!(offset_of!(TrailUniform, near), 52);
        assert_eq!(offset_of!(TrailUniform, far), 56);
        assert_eq!(offset_of!(TrailUniform, trail), 64);
    }

    #[test]
    fn uniform_bundle_picks_up_frame_state() {
        let mut trail = PointerTrail::new();
        trail.push(Vec2::new(0.5, -0.5));

        let mut camera = Camera::new(1.0);
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        camera.set_aspect(2.0);

        let u = TrailUniform::new(
            Viewport::new(1280.0, 640.0),
            &camera,
            Vec2::new(0.25, 0.75),
            &trail,
            3.5,
        );

        assert_eq!(u.resolution, [1280.0, 640.0]);
        assert_eq!(u.pointer, [0.25, 0.75]);
        assert_eq!(u.aspect, 2.0);
        assert_eq!(u.time, 3.5);
        assert_eq!(u.trail[0], [0.5, -0.5, 0.0, 0.0]);
    }
}
