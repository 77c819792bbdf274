//! Yard3D demo
//!
//! Opens a window, builds the stock yard from `assets/yard.ron` and runs the
//! frame loop. There is no rasterizer here: the render host reports what
//! survived culling in the window title.
//!
//! Keys: `1` fixed camera, `2` waypoint tour, `3` automatic orbit,
//! `4` orbit controls (drag with the left button, wheel to zoom), `Esc` quits.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use yard_3d_engine::yard3d::{
    self, attach_surface, FrameContext, PointerButton, PointerEvent, RenderHost, SurfaceHost,
};
use yard_3d_engine::yard3d::camera::Camera;
use yard_3d_engine::yard3d::config::{CameraMode, EngineConfig, SurfaceConfig};
use yard_3d_engine::yard3d::log::{DefaultLogger, LogSeverity};
use yard_3d_engine::yard3d::scene::{NodeKind, Scene, SceneDescription};

const SOURCE: &str = "yard3d_demo";
const PIXELS_PER_WHEEL_LINE: f32 = 40.0;
const TITLE_REFRESH_FRAMES: u64 = 30;

fn log(severity: LogSeverity, message: String) {
    yard_3d_engine::log::log(severity, SOURCE, message);
}

fn asset_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
}

// ===== SURFACE HOST =====

/// Windows play the part of surface containers, keyed by container id
struct WindowHost<'a> {
    event_loop: &'a ActiveEventLoop,
    windows: &'a mut HashMap<String, Arc<Window>>,
    surface: &'a SurfaceConfig,
}

impl SurfaceHost for WindowHost<'_> {
    type Container = Arc<Window>;

    fn find_container(&mut self, id: &str) -> Option<Arc<Window>> {
        self.windows.get(id).cloned()
    }

    fn create_container(&mut self, id: &str) -> yard3d::Result<Arc<Window>> {
        let attributes = Window::default_attributes()
            .with_title(self.surface.title.clone())
            .with_inner_size(LogicalSize::new(self.surface.width, self.surface.height))
            .with_visible(false);
        let window = self.event_loop.create_window(attributes)
            .map_err(|e| yard3d::Error::InitializationFailed(format!("window '{}': {}", id, e)))?;
        let window = Arc::new(window);
        self.windows.insert(id.to_string(), window.clone());
        Ok(window)
    }

    fn attach(&mut self, container: &Arc<Window>) -> yard3d::Result<()> {
        container.set_visible(true);
        container.request_redraw();
        Ok(())
    }
}

// ===== RENDER HOST =====

/// Counts drawable meshes and shows the tally in the window title
struct TitleRenderHost {
    window: Arc<Window>,
    title: String,
    frames: u64,
}

impl TitleRenderHost {
    fn new(window: Arc<Window>, title: &str) -> Self {
        Self { window, title: title.to_string(), frames: 0 }
    }
}

impl RenderHost for TitleRenderHost {
    fn render(&mut self, scene: &Scene, camera: &Camera) -> yard3d::Result<()> {
        self.frames += 1;
        if self.frames % TITLE_REFRESH_FRAMES != 1 {
            return Ok(());
        }

        let mut meshes = 0;
        let mut drawn = 0;
        for (key, node) in scene.nodes() {
            if matches!(node.kind(), NodeKind::Mesh { .. }) {
                meshes += 1;
                if scene.is_effectively_visible(key) {
                    drawn += 1;
                }
            }
        }
        let eye = camera.position();
        self.window.set_title(&format!(
            "{} | {}/{} meshes | camera ({:.1}, {:.1}, {:.1})",
            self.title, drawn, meshes, eye.x, eye.y, eye.z));
        Ok(())
    }
}

// ===== APPLICATION =====

struct App {
    config: EngineConfig,
    context: FrameContext,
    windows: HashMap<String, Arc<Window>>,
    renderer: Option<TitleRenderHost>,
    cursor: Option<PhysicalPosition<f64>>,
    dragging: bool,
}

impl App {
    fn new(config: EngineConfig, description: &SceneDescription) -> yard3d::Result<Self> {
        let mut context = FrameContext::new(&config)?;
        context.build_scene(description)?;
        Ok(Self {
            config,
            context,
            windows: HashMap::new(),
            renderer: None,
            cursor: None,
            dragging: false,
        })
    }

    fn select_mode(&mut self, key: &str) {
        let mode = match key {
            "1" => CameraMode::Fixed,
            "2" => CameraMode::Path,
            "3" => CameraMode::Orbit,
            "4" => CameraMode::Controls,
            _ => return,
        };
        match self.context.set_camera_mode(mode) {
            Ok(()) => log(LogSeverity::Info, format!("Camera mode: {:?}", mode)),
            Err(e) => log(LogSeverity::Warn, format!("Cannot switch camera mode: {}", e)),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if let Err(e) = self.context.frame(renderer) {
            log(LogSeverity::Error, format!("Frame failed: {}", e));
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        let container_id = &self.config.surface.container_id;
        let mut host = WindowHost {
            event_loop,
            windows: &mut self.windows,
            surface: &self.config.surface,
        };
        // The main window is the expected container
        let attached = match host.find_container(container_id) {
            Some(_) => attach_surface(&mut host, container_id),
            None => host.create_container(container_id)
                .and_then(|_| attach_surface(&mut host, container_id)),
        };
        match attached {
            Ok(window) => {
                let size = window.inner_size();
                self.context.on_resize(size.width, size.height);
                self.renderer = Some(TitleRenderHost::new(window, &self.config.surface.title));
            }
            Err(e) => {
                log(LogSeverity::Error, format!("Failed to create window: {}", e));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    Key::Character(key) => self.select_mode(key),
                    _ => {}
                }
            }
            WindowEvent::Resized(size) => {
                self.context.on_resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(previous)) = (self.dragging, self.cursor) {
                    self.context.on_pointer_drag(
                        (position.x - previous.x) as f32,
                        (position.y - previous.y) as f32,
                    );
                }
                self.cursor = Some(position);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.dragging = state == ElementState::Pressed;
                }
                if state == ElementState::Pressed {
                    let button = match button {
                        MouseButton::Left => PointerButton::Primary,
                        MouseButton::Right => PointerButton::Secondary,
                        _ => PointerButton::Middle,
                    };
                    let (x, y) = self.cursor.map_or((0.0, 0.0), |p| (p.x as f32, p.y as f32));
                    self.context.on_click(&PointerEvent { x, y, button });
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // Scrolling up moves the camera closer
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y,
                    MouseScrollDelta::PixelDelta(p) => -(p.y as f32) / PIXELS_PER_WHEEL_LINE,
                };
                self.context.on_wheel(steps);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = &self.renderer {
            renderer.window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    yard3d::log::set_logger(DefaultLogger);

    let mut args = std::env::args().skip(1);
    let scene_path = args.next().map(PathBuf::from).unwrap_or_else(|| asset_path("yard.ron"));
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(|| asset_path("config.ron"));

    let config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        log(LogSeverity::Warn, format!("Using default configuration: {}", e));
        EngineConfig::default()
    });
    let description = SceneDescription::load(&scene_path)?;
    log(LogSeverity::Info, format!(
        "Loaded {} ({} objects, {} nodes, {} lights)",
        scene_path.display(), description.objects.len(), description.node_count(),
        description.lights.len()));

    let mut app = App::new(config, &description)?;
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
