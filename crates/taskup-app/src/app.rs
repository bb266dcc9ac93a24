//! Core application state and lifecycle.

use std::sync::Arc;
use std::time::Instant;
use taskup_core::{ConfigError, HapticFeedback, LogHaptics, SheetEvent, SheetStack};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::config::AppConfig;
use crate::screen::TaskScreen;

/// Longest frame step fed to animations (seconds).
const MAX_FRAME_DT: f64 = 0.1;

/// Background behind the egui layer.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.973,
    g: 0.980,
    b: 0.988,
    a: 1.0,
};

/// Sheet container height in logical points for a window of `size`.
fn container_height(size: PhysicalSize<u32>, scale_factor: f64) -> f64 {
    size.to_logical::<f64>(scale_factor).height
}

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// GPU surface and device.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    async fn new(window: Arc<Window>) -> Result<Self, AppError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let size = window.inner_size();
        let surface_config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or(AppError::UnsupportedSurface)?;
        surface.configure(&device, &surface_config);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }
}

/// Runtime state for the application.
struct AppState {
    window: Arc<Window>,
    gpu: Gpu,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // Screen and its sheets
    screen: TaskScreen,
    sheets: SheetStack,
    haptics: LogHaptics,
    last_frame: Instant,
}

impl AppState {
    /// Handle a hardware-back style key press.
    fn back_pressed(&mut self) {
        if self.sheets.back_pressed() {
            self.window.request_redraw();
        } else {
            log::debug!("Back pressed with no sheet to dismiss");
        }
    }

    /// Route sheet notifications to haptics and the screen.
    fn dispatch_sheet_events(&mut self) {
        for (id, event) in self.sheets.take_events() {
            match event {
                SheetEvent::Haptic(style) => self.haptics.impact(style),
                SheetEvent::Closed { reason } => {
                    log::info!("Sheet {} closed ({:?})", id, reason);
                    self.screen.sheet_closed(id);
                }
                SheetEvent::Opened => log::debug!("Sheet {} opened", id),
                SheetEvent::SnapChanged { index } => {
                    log::debug!("Sheet {} moved to snap {}", id, index)
                }
            }
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_frame)
            .as_secs_f64()
            .min(MAX_FRAME_DT);
        self.last_frame = now;

        self.sheets.tick(dt);

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            self.screen.show(ctx, &mut self.sheets);
        });
        self.dispatch_sheet_events();

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.gpu.resize(size.width, size.height);
                self.window.request_redraw();
                return;
            }
            Err(e) => {
                log::error!("Failed to acquire surface texture: {:?}", e);
                return;
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.surface_config.width, self.gpu.surface_config.height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        // Update egui textures
        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui encoder"),
        });
        self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &egui_primitives,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Use forget_lifetime to satisfy egui-wgpu's 'static requirement
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));

        // Free egui textures
        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        let wants_repaint = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| viewport.repaint_delay.is_zero());
        if wants_repaint || self.sheets.is_any_mounted() {
            self.window.request_redraw();
        }
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    /// First fatal error raised inside the event loop.
    error: Option<AppError>,
}

impl App {
    /// Create a new application with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            error: None,
        }
    }

    /// Run the application until its window closes.
    pub async fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new(config);
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        log::info!("Creating window...");
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu = pollster::block_on(Gpu::new(window.clone()))?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let mut sheets = SheetStack::new(container_height(window.inner_size(), window.scale_factor()));
        let screen = TaskScreen::new(&self.config, &mut sheets)?;

        log::info!(
            "TaskUp initialized - {}x{}",
            gpu.surface_config.width,
            gpu.surface_config.height
        );
        log::info!("Press Escape to dismiss the topmost sheet");

        window.request_redraw();
        Ok(AppState {
            window,
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            screen,
            sheets,
            haptics: LogHaptics,
            last_frame: Instant::now(),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Initialization failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                state
                    .sheets
                    .set_container_height(container_height(size, state.window.scale_factor()));
                state.window.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let is_back = event.state == ElementState::Pressed
                    && !event.repeat
                    && event.logical_key == Key::Named(NamedKey::Escape);
                if is_back {
                    state.back_pressed();
                }
            }

            WindowEvent::RedrawRequested => {
                state.redraw();
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskup_core::{SheetConfig, SheetPhase};

    #[test]
    fn test_container_height_is_logical() {
        let size = PhysicalSize::new(840, 1720);
        assert!((container_height(size, 2.0) - 860.0).abs() < f64::EPSILON);
        assert!((container_height(size, 1.0) - 1720.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_moves_closed_sheets_to_new_bottom() {
        let mut sheets = SheetStack::new(container_height(PhysicalSize::new(420, 860), 1.0));
        let id = sheets.insert(SheetConfig::default()).expect("valid config");

        sheets.set_container_height(container_height(PhysicalSize::new(840, 2400), 2.0));
        assert!(sheets.open(id));
        let sheet = sheets.get(id).expect("sheet");
        assert_eq!(sheet.phase(), SheetPhase::Opening);
        assert!((sheet.offset() - 1200.0).abs() < f64::EPSILON);
    }
}
