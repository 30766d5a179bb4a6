#![deny(missing_docs)]

//! High level utilities for running Beatframe scenes in a desktop window.

#[cfg(not(feature = "desktop"))]
compile_error!("beatframe-app must be built with the `desktop` feature enabled.");

#[cfg(not(feature = "renderer-pixels"))]
compile_error!("beatframe-app currently requires the `renderer-pixels` feature.");

use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use beatframe_app_shell::AppShell;
use beatframe_platform_desktop_winit::DesktopWinitPlatform;
use beatframe_render_pixels::PixelsRenderer;
use beatframe_ui::{SceneConfig, SceneRoot};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

/// Wake-up interval while a tooltip is waiting for its delay.
const TOOLTIP_POLL: Duration = Duration::from_millis(16);

/// Error returned by an application setup callback.
pub type SetupError = Box<dyn Error + 'static>;

/// Failure to bring up the application window.
#[derive(Debug)]
pub enum AppError {
    /// The window could not be created.
    Window(winit::error::OsError),
    /// The pixel buffer could not be created.
    Pixels(pixels::Error),
    /// The setup callback failed.
    Setup(SetupError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Window(err) => write!(f, "failed to create window: {err}"),
            AppError::Pixels(err) => write!(f, "failed to create pixel buffer: {err}"),
            AppError::Setup(err) => write!(f, "application setup failed: {err}"),
        }
    }
}

impl Error for AppError {}

/// Builder used to configure and launch a Beatframe application.
#[derive(Debug, Clone, Default)]
pub struct AppBuilder {
    options: AppOptions,
}

impl AppBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title for the application.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    /// Sets the initial logical size of the application window.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.options.initial_size = (width, height);
        self
    }

    /// Sets the scene configuration.
    pub fn scene(mut self, config: SceneConfig) -> Self {
        self.options.scene = config;
        self
    }

    /// Runs the application. `setup` populates the scene and registers
    /// textures before the first frame.
    pub fn run(
        self,
        setup: impl FnOnce(&SceneRoot, &mut PixelsRenderer) -> Result<(), SetupError> + 'static,
    ) -> ! {
        run_app(self.options, setup)
    }
}

/// Options used to configure the application window.
#[derive(Debug, Clone)]
pub struct AppOptions {
    title: String,
    initial_size: (u32, u32),
    scene: SceneConfig,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            title: "Beatframe App".to_string(),
            initial_size: (800, 600),
            scene: SceneConfig::default(),
        }
    }
}

impl AppOptions {
    /// Sets the title used for the application window.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.initial_size = (width, height);
        self
    }

    /// Sets the scene configuration.
    pub fn with_scene(mut self, config: SceneConfig) -> Self {
        self.scene = config;
        self
    }
}

/// Launches an application using the default options.
pub fn beatframe_app(
    setup: impl FnOnce(&SceneRoot, &mut PixelsRenderer) -> Result<(), SetupError> + 'static,
) -> ! {
    AppBuilder::default().run(setup)
}

/// Launches an application using the provided options.
pub fn run_app(
    options: AppOptions,
    setup: impl FnOnce(&SceneRoot, &mut PixelsRenderer) -> Result<(), SetupError> + 'static,
) -> ! {
    match run_pixels_app(&options, setup) {
        Ok(never) => match never {},
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}

enum Never {}

struct Surface {
    pixels: Pixels,
    renderer: PixelsRenderer,
}

impl Surface {
    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(size.width, size.height)?;
        self.pixels.resize_buffer(size.width, size.height)
    }
}

fn resize(app: &mut AppShell, surface: &mut Surface, size: PhysicalSize<u32>, scale: f64) -> bool {
    if size.width == 0 || size.height == 0 {
        return true;
    }
    if let Err(err) = surface.resize(size) {
        log::error!("failed to resize pixel buffer: {err}");
        return false;
    }
    let logical: LogicalSize<f64> = size.to_logical(scale);
    app.set_buffer_size(size.width, size.height);
    app.set_viewport(logical.width as f32, logical.height as f32);
    true
}

fn create_window(options: &AppOptions, event_loop: &EventLoop<()>) -> Result<Window, AppError> {
    WindowBuilder::new()
        .with_title(options.title.clone())
        .with_inner_size(LogicalSize::new(
            options.initial_size.0 as f64,
            options.initial_size.1 as f64,
        ))
        .build(event_loop)
        .map_err(AppError::Window)
}

fn run_pixels_app(
    options: &AppOptions,
    setup: impl FnOnce(&SceneRoot, &mut PixelsRenderer) -> Result<(), SetupError> + 'static,
) -> Result<Never, AppError> {
    let event_loop = EventLoop::new();
    let window = create_window(options, &event_loop)?;

    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let pixels =
        Pixels::new(size.width, size.height, surface_texture).map_err(AppError::Pixels)?;

    let mut platform = DesktopWinitPlatform::new(window.scale_factor());
    let logical: LogicalSize<f64> = size.to_logical(platform.scale_factor());
    let mut app = AppShell::new(
        logical.width as f32,
        logical.height as f32,
        options.scene.clone(),
    );
    app.set_buffer_size(size.width, size.height);
    app.set_viewport(logical.width as f32, logical.height as f32);

    let mut surface = Surface {
        pixels,
        renderer: PixelsRenderer::new(),
    };
    setup(app.scene(), &mut surface.renderer).map_err(AppError::Setup)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    if !resize(&mut app, &mut surface, new_size, platform.scale_factor()) {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::ScaleFactorChanged {
                    scale_factor,
                    new_inner_size,
                    ..
                } => {
                    platform.set_scale_factor(scale_factor);
                    if !resize(&mut app, &mut surface, *new_inner_size, scale_factor) {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let logical = platform.pointer_position(position);
                    app.pointer_moved(logical.x, logical.y);
                }
                WindowEvent::CursorLeft { .. } => app.pointer_left(),
                WindowEvent::MouseInput { state, button, .. } => {
                    if let Some(button) = platform.pointer_button(button) {
                        match state {
                            ElementState::Pressed => app.pointer_pressed(button),
                            ElementState::Released => app.pointer_released(button),
                        };
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let (amount_x, amount_y) = platform.scroll_amount(delta);
                    app.scrolled(amount_x, amount_y);
                }
                WindowEvent::ModifiersChanged(state) => {
                    app.set_modifiers(platform.modifiers(state));
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state,
                            virtual_keycode: Some(keycode),
                            ..
                        },
                    ..
                } => {
                    let key = platform.key_code(keycode);
                    match state {
                        ElementState::Pressed => {
                            let consumed = app.key_pressed(key);
                            if !consumed && keycode == VirtualKeyCode::F12 {
                                app.log_debug_info();
                            }
                        }
                        ElementState::Released => {
                            app.key_released(key);
                        }
                    }
                }
                WindowEvent::ReceivedCharacter(character) if !character.is_control() => {
                    app.character_typed(character);
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                app.update();
                if app.should_render() {
                    window.request_redraw();
                }
                if app.scene().has_pending_tooltip() {
                    *control_flow = ControlFlow::WaitUntil(Instant::now() + TOOLTIP_POLL);
                }
            }
            Event::RedrawRequested(_) => {
                let (buffer_width, buffer_height) = app.buffer_size();
                let scale = platform.scale_factor() as f32;
                {
                    let Surface { pixels, renderer } = &mut surface;
                    let mut frame =
                        renderer.begin_frame(pixels.frame_mut(), buffer_width, buffer_height, scale);
                    app.render(&mut frame);
                }
                if let Err(err) = surface.pixels.render() {
                    log::error!("pixels render failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}
