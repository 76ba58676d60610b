//! Overlay host: a transparent, click-through window driven by winit.
//!
//! The overlay owns the frame loop. Each `RedrawRequested` steps the
//! animator, renders, and requests the next redraw; occlusion pauses the
//! loop and resuming resets the animator's time baseline.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId, WindowLevel};

use crate::animator::Animator;
use crate::assets::ImageLoader;
use crate::config::FallConfig;
use crate::error::OverlayError;
use crate::gpu::SpriteRenderer;
use crate::sprite::SpriteArt;

/// How long a resize burst must stay quiet before the surface is
/// reconfigured.
const RESIZE_SETTLE: Duration = Duration::from_millis(100);

/// Default stamp resolution for glyphs without registered art.
const GLYPH_ART_SIZE: u32 = 64;

/// A falling-particle overlay window.
///
/// Use method chaining to configure, then call
/// [`run`](Overlay::run) to open the window and block until the host exits.
///
/// ```ignore
/// use driftfall::{FallConfig, Overlay};
///
/// Overlay::new(FallConfig::default()).run()?;
/// ```
pub struct Overlay {
    config: FallConfig,
    glyph_art: HashMap<String, SpriteArt>,
}

impl Overlay {
    /// Create an overlay with the given configuration.
    pub fn new(config: FallConfig) -> Self {
        Self {
            config,
            glyph_art: HashMap::new(),
        }
    }

    /// Register custom sprite art stamped whenever `glyph` is drawn.
    ///
    /// Glyphs without registered art use the built-in snowflake sprite.
    pub fn with_glyph_art(mut self, glyph: impl Into<String>, art: SpriteArt) -> Self {
        self.glyph_art.insert(glyph.into(), art);
        self
    }

    /// Open the overlay window and run until the host exits.
    ///
    /// When the configuration is disabled this performs no action and
    /// returns immediately.
    pub fn run(self) -> Result<(), OverlayError> {
        if !self.config.enabled {
            info!("falling animation disabled");
            return Ok(());
        }

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, self.glyph_art);
        event_loop.run_app(&mut app)?;
        match app.init_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    config: FallConfig,
    glyph_art: HashMap<String, SpriteArt>,
    window: Option<Arc<Window>>,
    renderer: Option<SpriteRenderer>,
    animator: Option<Animator>,
    loader: Option<ImageLoader>,
    pending_resize: Option<(PhysicalSize<u32>, Instant)>,
    occluded: bool,
    init_error: Option<OverlayError>,
}

impl App {
    fn new(config: FallConfig, glyph_art: HashMap<String, SpriteArt>) -> Self {
        Self {
            config,
            glyph_art,
            window: None,
            renderer: None,
            animator: None,
            loader: None,
            pending_resize: None,
            occluded: false,
            init_error: None,
        }
    }

    /// Hand the settled image batch to the animator, once.
    fn poll_loader(&mut self) {
        let settled = match &self.loader {
            Some(loader) => loader.try_settle(),
            None => return,
        };
        if let Some(images) = settled {
            self.loader = None;
            if let (Some(animator), Some(renderer)) =
                (self.animator.as_mut(), self.renderer.as_mut())
            {
                for image in &images {
                    renderer.register_image(image);
                }
                animator.start(images);
                animator.seed_initial();
                if self.occluded {
                    animator.pause();
                }
            }
        }
    }

    /// Apply the most recent resize once the burst has settled.
    fn apply_settled_resize(&mut self) {
        if let Some((size, at)) = self.pending_resize {
            if at.elapsed() < RESIZE_SETTLE {
                return;
            }
            self.pending_resize = None;
            debug!("viewport resized to {}x{}", size.width, size.height);
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(size);
            }
            if let Some(animator) = &mut self.animator {
                animator.resize(Vec2::new(size.width as f32, size.height as f32));
            }
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.apply_settled_resize();
        self.poll_loader();

        if let (Some(animator), Some(renderer)) = (self.animator.as_mut(), self.renderer.as_mut())
        {
            animator.tick(Instant::now());
            animator.render(renderer);
            match renderer.present() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    let size = renderer.size();
                    renderer.resize(size);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory, shutting down overlay");
                    event_loop.exit();
                    return;
                }
                Err(e) => warn!("render error: {:?}", e),
            }
        }

        // The frame callback reschedules itself while visible; occlusion
        // breaks the chain until visibility returns.
        if !self.occluded {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // The windowing system may deliver this more than once; one overlay
        // window, one frame loop.
        if self.window.is_some() {
            return;
        }

        let mut attrs = Window::default_attributes()
            .with_title("driftfall")
            .with_transparent(true)
            .with_decorations(false)
            .with_window_level(WindowLevel::AlwaysOnTop);
        attrs = match event_loop.primary_monitor() {
            Some(monitor) => attrs
                .with_inner_size(monitor.size())
                .with_position(PhysicalPosition::new(0, 0)),
            None => attrs.with_maximized(true),
        };

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("failed to create overlay window: {}", e);
                self.init_error = Some(OverlayError::Window(e));
                event_loop.exit();
                return;
            }
        };

        // The overlay is decoration; it must never swallow clicks meant for
        // what is underneath.
        if let Err(e) = window.set_cursor_hittest(false) {
            warn!("input passthrough unavailable: {}", e);
        }

        let renderer = match pollster::block_on(SpriteRenderer::new(
            window.clone(),
            self.config.max_items.max(1),
        )) {
            Ok(renderer) => renderer,
            Err(e) => {
                error!("GPU initialization failed: {}", e);
                self.init_error = Some(OverlayError::Gpu(e));
                event_loop.exit();
                return;
            }
        };
        self.renderer = Some(renderer);

        let default_art = SpriteArt::snowflake(GLYPH_ART_SIZE);
        if let Some(renderer) = &mut self.renderer {
            for glyph in &self.config.characters {
                let art = self.glyph_art.get(glyph).unwrap_or(&default_art);
                renderer.register_glyph(glyph, art);
            }
        }

        let size = window.inner_size();
        self.animator = Some(Animator::new(
            self.config.clone(),
            Vec2::new(size.width as f32, size.height as f32),
        ));
        self.loader = Some(ImageLoader::spawn(self.config.images.clone()));

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Occluded(hidden) => {
                self.occluded = hidden;
                if let Some(animator) = &mut self.animator {
                    if hidden {
                        animator.pause();
                    } else {
                        animator.resume();
                    }
                }
                if !hidden {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::Resized(physical_size) => {
                // Debounced: bursts of resize events settle before the
                // surface is reconfigured.
                self.pending_resize = Some((physical_size, Instant::now()));
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Resizes must land even while the redraw chain is paused.
        self.apply_settled_resize();
    }
}
