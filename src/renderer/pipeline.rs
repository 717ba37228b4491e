//! WebGPU render pipeline setup

use wgpu::util::DeviceExt;

use super::RenderError;
use super::surface::Frame;
use super::vertex::Vertex;
use crate::assets::Color;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    /// Surface stores sRGB, so colors are linearized before writing
    pub linearize: bool,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("flappy-drone-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;
        let linearize = surface_format.is_srgb();
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(if linearize { "fs_main" } else { "fs_passthrough" }),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            // Triangle list, no culling: flipped sprites reverse winding
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer: None,
            vertex_count: 0,
            linearize,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure after the surface was lost or outdated
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload a finished frame and draw it
    pub fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let (w, h) = self.size;
        let ndc_vertices: Vec<Vertex> = frame
            .vertices
            .iter()
            .map(|v| {
                let [x, y] = screen_to_ndc(v.position, w, h);
                Vertex::new(x, y, v.color)
            })
            .collect();

        // Recreated every frame; the scene is a few thousand vertices at most
        self.vertex_buffer = (!ndc_vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(&ndc_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(frame.clear, self.linearize)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &self.vertex_buffer {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Map logical screen pixels (origin top-left, y down) to clip space.
///
/// The 400x600 playfield keeps its aspect ratio and is letterboxed inside a
/// viewport of any shape.
pub fn screen_to_ndc(position: [f32; 2], viewport_w: u32, viewport_h: u32) -> [f32; 2] {
    let [x, y] = position;
    let logical_aspect = SCREEN_WIDTH / SCREEN_HEIGHT;
    let aspect = viewport_w.max(1) as f32 / viewport_h.max(1) as f32;

    let (sx, sy) = if aspect > logical_aspect {
        // Wider than the playfield: bars left and right
        (logical_aspect / aspect, 1.0)
    } else {
        (1.0, aspect / logical_aspect)
    };

    [
        (x / SCREEN_WIDTH * 2.0 - 1.0) * sx,
        (1.0 - y / SCREEN_HEIGHT * 2.0) * sy,
    ]
}

/// Logical-to-viewport pixel ratio inside the letterbox
pub fn viewport_scale(viewport_w: u32, viewport_h: u32) -> f32 {
    let w = viewport_w.max(1) as f32 / SCREEN_WIDTH;
    let h = viewport_h.max(1) as f32 / SCREEN_HEIGHT;
    w.min(h)
}

/// Map logical screen pixels to viewport pixels (origin top-left, y down),
/// landing on the same spot [`screen_to_ndc`] does
pub fn screen_to_viewport(position: [f32; 2], viewport_w: u32, viewport_h: u32) -> [f32; 2] {
    let [x, y] = screen_to_ndc(position, viewport_w, viewport_h);
    [
        (x + 1.0) * 0.5 * viewport_w as f32,
        (1.0 - y) * 0.5 * viewport_h as f32,
    ]
}

/// Clear color matching what the fragment shader writes for the same palette
/// value
fn clear_color(color: Color, linearize: bool) -> wgpu::Color {
    let [r, g, b, a] = color.0.map(f64::from);
    let channel = |c: f64| if linearize { c.powf(2.2) } else { c };
    wgpu::Color {
        r: channel(r),
        g: channel(g),
        b: channel(b),
        a,
    }
}
