//! Comet viewer.
//!
//! Opens a window with a full-screen shader plane whose uniforms react to
//! pointer movement. Left-drag orbits the view, the wheel zooms, Escape
//! exits.

use anyhow::Result;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use comet_engine::coords::Vec2;
use comet_engine::core::{App, AppControl, FrameCtx};
use comet_engine::device::GpuInit;
use comet_engine::logging::{init_logging, LoggingConfig};
use comet_engine::render::{PlaneRenderer, TrailUniform};
use comet_engine::scene::{Camera, OrbitController};
use comet_engine::window::{Runtime, RuntimeConfig};

/// Background clear color: #99a1af in linear space (sRGB surface).
const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.3186,
    g: 0.3564,
    b: 0.4288,
    a: 1.0,
};

struct TrailApp {
    renderer: PlaneRenderer,
    camera: Camera,
    orbit: OrbitController,
}

impl TrailApp {
    fn new() -> Self {
        Self {
            renderer: PlaneRenderer::new(),
            // Matches the default window size; corrected by the first
            // Resized event either way.
            camera: Camera::new(1280.0 / 720.0),
            orbit: OrbitController::new(),
        }
    }
}

impl App for TrailApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    return AppControl::Exit;
                }
            }

            WindowEvent::Resized(size) => {
                if size.height > 0 {
                    self.camera.set_aspect(size.width as f32 / size.height as f32);
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.orbit.begin_drag(),
                ElementState::Released => self.orbit.end_drag(),
            },

            WindowEvent::CursorMoved { position, .. } => {
                self.orbit
                    .on_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                self.orbit.on_scroll(lines);
            }

            _ => {}
        }

        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.orbit.update(&mut self.camera);

        let uniforms = TrailUniform::new(
            ctx.gpu.viewport(),
            &self.camera,
            ctx.pointer.coords(),
            ctx.trail,
            ctx.time.elapsed,
        );

        let renderer = &mut self.renderer;
        ctx.render(CLEAR, |rctx, target| {
            renderer.render(rctx, target, &uniforms);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("comet viewer starting");

    Runtime::run(
        RuntimeConfig {
            title: "comet pointer trail".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
        TrailApp::new(),
    )
}
