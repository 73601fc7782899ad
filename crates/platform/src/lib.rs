//! Platform layer: window, event loop, input, and the glue between the
//! import pipeline, the renderer and the debug overlay.
//!
//! Uses the winit 0.30 `ApplicationHandler` model: the window and GPU state
//! are created in `resumed`, everything else reacts to events.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use corelib::camera::{Camera, CameraMove};
use corelib::transform::Transform;
use corelib::vec3;
use renderer::{FrameInputs, GpuState, WaterParams};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

mod overlay;

use overlay::Overlay;

/// Startup options collected by the binary's argument parsing.
pub struct RunConfig {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub model_path: Option<PathBuf>,
    pub overlay: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            width: 1280,
            height: 720,
            model_path: None,
            overlay: true,
        }
    }
}

/// Summary of one import, shown in the overlay.
#[derive(Clone, Copy)]
pub struct ImportStats {
    pub meshes: usize,
    pub textures: usize,
    pub triangles: usize,
    pub import_ms: f32,
}

/// Keys currently held, polled every frame for smooth movement.
#[derive(Default)]
struct InputState {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

/// Run the demo until the window closes.
pub fn run(config: RunConfig) -> Result<()> {
    let event_loop: EventLoop<()> = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App {
        config,
        state: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    config: RunConfig,
    state: Option<AppState>,
}

struct AppState {
    window: Arc<Window>,
    gpu: GpuState,
    camera: Camera,
    water: WaterParams,
    overlay: Option<Overlay>,
    input: InputState,
    // Mouse look is active only while the right button is held.
    look_active: bool,
    import_stats: Option<ImportStats>,
    started: Instant,
    last_frame: Instant,
    frame_ms: f32,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Ocean3D")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let mut gpu = pollster::block_on(GpuState::new(window.clone(), self.config.backends));

        // Blocking import before the first frame; the demo has nothing to
        // show until the model is resident anyway.
        let import_stats = self.config.model_path.as_deref().and_then(|path| {
            let t0 = Instant::now();
            match asset::import_model(path, &asset::ImportSettings::default()) {
                Ok(model) => {
                    let stats = ImportStats {
                        meshes: model.mesh_count(),
                        textures: model.texture_count(),
                        triangles: model.triangle_count(),
                        import_ms: t0.elapsed().as_secs_f32() * 1000.0,
                    };
                    log::info!(
                        "Imported {}: {} meshes, {} textures, {} triangles in {:.1} ms",
                        path.display(),
                        stats.meshes,
                        stats.textures,
                        stats.triangles,
                        stats.import_ms,
                    );
                    gpu.load_model(&model);
                    Some(stats)
                }
                Err(err) => {
                    log::error!("Failed to import {}: {err}", path.display());
                    None
                }
            }
        });
        if self.config.model_path.is_none() {
            log::info!("No model given (--model=<path>); rendering water and sky only");
        }

        let overlay = self
            .config
            .overlay
            .then(|| Overlay::new(&window, gpu.device(), gpu.surface_format()));

        let now = Instant::now();
        self.state = Some(AppState {
            window,
            gpu,
            camera: Camera::new(vec3(0.0, 12.0, 30.0)),
            water: WaterParams::default(),
            overlay,
            input: InputState::default(),
            look_active: false,
            import_stats,
            started: now,
            last_frame: now,
            frame_ms: 0.0,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if window_id != state.window.id() {
            return;
        }

        let consumed = state
            .overlay
            .as_mut()
            .is_some_and(|overlay| overlay.on_window_event(&state.window, &event));

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if consumed {
                    return;
                }
                let pressed = event.state == ElementState::Pressed;
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) if pressed => event_loop.exit(),
                    PhysicalKey::Code(KeyCode::KeyW) => state.input.forward = pressed,
                    PhysicalKey::Code(KeyCode::KeyS) => state.input.backward = pressed,
                    PhysicalKey::Code(KeyCode::KeyA) => state.input.left = pressed,
                    PhysicalKey::Code(KeyCode::KeyD) => state.input.right = pressed,
                    PhysicalKey::Code(KeyCode::Space) => state.input.up = pressed,
                    PhysicalKey::Code(KeyCode::ShiftLeft) => state.input.down = pressed,
                    _ => {}
                }
            }
            WindowEvent::MouseInput { state: button_state, button, .. } => {
                if button == MouseButton::Right && !consumed {
                    state.look_active = button_state == ElementState::Pressed;
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if consumed {
                    return;
                }
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                state.camera.on_scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                state.tick();
                state.render(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if state.look_active {
                // Screen y grows downwards; the camera expects "up" positive.
                state.camera.on_mouse_move(dx as f32, -dy as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    /// Advance the simulation: frame timing and held-key movement.
    fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        self.frame_ms = dt * 1000.0;

        let moves = [
            (self.input.forward, CameraMove::Forward),
            (self.input.backward, CameraMove::Backward),
            (self.input.left, CameraMove::Left),
            (self.input.right, CameraMove::Right),
            (self.input.up, CameraMove::Up),
            (self.input.down, CameraMove::Down),
        ];
        for (held, dir) in moves {
            if held {
                self.camera.on_move(dir, dt);
            }
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        // Snapshot the wave parameters: the overlay closure may edit them
        // mid-frame and the edits take effect next frame.
        let water_now = self.water;
        let inputs = FrameInputs {
            camera: &self.camera,
            model_transform: Transform::from_translation(vec3(0.0, 2.0, 0.0)),
            water: &water_now,
            time_secs: self.started.elapsed().as_secs_f32(),
        };

        let window = &self.window;
        let overlay = &mut self.overlay;
        let camera = &self.camera;
        let water = &mut self.water;
        let stats = self.import_stats;
        let frame_ms = self.frame_ms;
        let result = self.gpu.render(&inputs, |device, queue, encoder, view| {
            if let Some(overlay) = overlay {
                overlay.draw(
                    window, device, queue, encoder, view, water, camera, stats, frame_ms,
                );
            }
        });

        match result {
            Ok(()) => {}
            Err(err) if GpuState::is_surface_lost(&err) => {
                log::warn!("Surface lost ({err}); reconfiguring");
                self.gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory. Exiting.");
                event_loop.exit();
            }
            Err(err) => log::warn!("Frame dropped: {err}"),
        }
    }
}
