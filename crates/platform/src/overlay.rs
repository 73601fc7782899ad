//! Debug overlay: egui panel with water controls, camera readout and
//! import statistics, composited after the scene pass.

use corelib::camera::Camera;
use egui_wgpu::ScreenDescriptor;
use renderer::WaterParams;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{event::WindowEvent, window::Window};

use crate::ImportStats;

pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Overlay {
    pub fn new(window: &Window, device: &Device, surface_format: TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );
        // Drawn in its own pass on top of the scene; no depth attachment.
        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);
        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui. Returns true when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        window: &Window,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        water: &mut WaterParams,
        camera: &Camera,
        stats: Option<ImportStats>,
        frame_ms: f32,
    ) {
        let raw_input = self.state.take_egui_input(window);
        let output = self.ctx.run(raw_input, |ctx| {
            egui::Window::new("Ocean3D")
                .default_width(260.0)
                .show(ctx, |ui| {
                    ui.label(format!("frame: {frame_ms:.2} ms"));
                    ui.separator();

                    ui.heading("Water");
                    ui.add(
                        egui::Slider::new(&mut water.amplitude, 0.0..=2.0).text("amplitude"),
                    );
                    ui.add(
                        egui::Slider::new(&mut water.wavelength, 1.0..=40.0).text("wavelength"),
                    );
                    ui.add(egui::Slider::new(&mut water.speed, 0.0..=5.0).text("speed"));
                    ui.add(
                        egui::Slider::new(&mut water.steepness, 0.0..=1.0).text("steepness"),
                    );
                    ui.add(
                        egui::Slider::new(&mut water.direction_deg, -180.0..=180.0)
                            .text("direction"),
                    );
                    ui.separator();

                    ui.heading("Camera");
                    let pos = camera.position;
                    ui.label(format!("pos: {:.1} {:.1} {:.1}", pos.x, pos.y, pos.z));
                    ui.label(format!(
                        "yaw {:.1}  pitch {:.1}  fov {:.1}",
                        camera.yaw_deg(),
                        camera.pitch_deg(),
                        camera.fov_y_deg()
                    ));
                    ui.label("WASD move, RMB look, wheel zoom");

                    if let Some(stats) = stats {
                        ui.separator();
                        ui.heading("Model");
                        ui.label(format!(
                            "{} meshes, {} textures, {} tris",
                            stats.meshes, stats.textures, stats.triangles
                        ));
                        ui.label(format!("import: {:.1} ms", stats.import_ms));
                    }
                });
        });

        self.state
            .handle_platform_output(window, output.platform_output);
        let clipped = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        let size = window.inner_size();
        let screen = ScreenDescriptor {
            size_in_pixels: [size.width.max(1), size.height.max(1)],
            pixels_per_point: output.pixels_per_point,
        };
        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &clipped, &screen);

        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("OverlayPass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.renderer
                .render(&mut rpass.forget_lifetime(), &clipped, &screen);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
