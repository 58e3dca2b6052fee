//! Window and GL context bootstrap.
//!
//! [`Context::new`] is the one place a sample gets its window, EGL display,
//! GL(ES) context and surface from. What to ask for is described by a
//! [`ContextConfig`]; what went wrong, if anything, comes back as a
//! [`ContextError`].

use std::{fmt, num::NonZeroU32};

use glow::HasContext;
use glutin::{
    config::{Api, Config, ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, Version,
    },
    display::{Display, DisplayApiPreference, GlDisplay},
    surface::{GlSurface, Surface, SwapInterval, WindowSurface},
};
use glutin_winit::GlWindow;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::{dpi::LogicalSize, error::OsError, event_loop::ActiveEventLoop, window::Window};

/// The client API and version a context is created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphicsApi {
    /// Desktop OpenGL 3.3, core profile.
    Gl33,
    /// Desktop OpenGL 4.6, core profile.
    Gl46,
    /// OpenGL ES 2.0.
    Gles20,
    /// OpenGL ES 3.2.
    Gles32,
}

impl GraphicsApi {
    pub const ALL: [GraphicsApi; 4] = [Self::Gl33, Self::Gl46, Self::Gles20, Self::Gles32];

    /// Requested context version as `(major, minor)`.
    pub const fn version(self) -> (u8, u8) {
        match self {
            Self::Gl33 => (3, 3),
            Self::Gl46 => (4, 6),
            Self::Gles20 => (2, 0),
            Self::Gles32 => (3, 2),
        }
    }

    pub const fn is_es(self) -> bool {
        matches!(self, Self::Gles20 | Self::Gles32)
    }

    /// The `#version` directive every shader for this API starts with.
    pub const fn glsl_version(self) -> &'static str {
        match self {
            Self::Gl33 => "#version 330 core",
            Self::Gl46 => "#version 460 core",
            Self::Gles20 => "#version 100",
            Self::Gles32 => "#version 320 es",
        }
    }

    /// GLSL ES 1.00 still speaks `attribute`/`varying`/`gl_FragColor`;
    /// everything newer uses `in`/`out`.
    pub const fn has_modern_glsl(self) -> bool {
        !matches!(self, Self::Gles20)
    }

    /// ES 2.0 has no vertex array objects, core profiles require one.
    pub const fn has_vertex_arrays(self) -> bool {
        !matches!(self, Self::Gles20)
    }

    fn config_api(self) -> Api {
        match self {
            Self::Gl33 | Self::Gl46 => Api::OPENGL,
            Self::Gles20 => Api::GLES2,
            Self::Gles32 => Api::GLES3,
        }
    }

    fn context_api(self) -> ContextApi {
        let (major, minor) = self.version();
        let version = Some(Version::new(major, minor));
        if self.is_es() {
            ContextApi::Gles(version)
        } else {
            ContextApi::OpenGl(version)
        }
    }
}

/// Picks the API enabled through the `gl46`, `gl33`, `gles20` and `gles32`
/// cargo features, in that order of precedence.
impl Default for GraphicsApi {
    fn default() -> Self {
        if cfg!(feature = "gl46") {
            Self::Gl46
        } else if cfg!(feature = "gl33") {
            Self::Gl33
        } else if cfg!(feature = "gles20") {
            Self::Gles20
        } else {
            Self::Gles32
        }
    }
}

impl fmt::Display for GraphicsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.version();
        let name = if self.is_es() { "OpenGL ES" } else { "OpenGL" };
        write!(f, "{} {}.{}", name, major, minor)
    }
}

/// What a sample asks the bootstrap for.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub api: GraphicsApi,
    pub vsync: bool,
    /// Request a 24 bit depth buffer.
    pub depth: bool,
}

impl ContextConfig {
    pub const DEFAULT_WIDTH: u32 = 640;
    pub const DEFAULT_HEIGHT: u32 = 480;

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            api: GraphicsApi::default(),
            vsync: true,
            depth: false,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_api(mut self, api: GraphicsApi) -> Self {
        self.api = api;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_depth(mut self, depth: bool) -> Self {
        self.depth = depth;
        self
    }
}

/// Why the bootstrap gave up.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("failed to open an EGL display for the window: {0}")]
    Display(String),
    #[error("failed to create the window: {0}")]
    Window(#[from] OsError),
    #[error("window handle unavailable: {0}")]
    Handle(#[from] raw_window_handle::HandleError),
    #[error("failed to create an {api} context: {source}")]
    CreateContext {
        api: GraphicsApi,
        source: glutin::error::Error,
    },
    #[error("failed to create the window surface: {0}")]
    Surface(glutin::error::Error),
    #[error("failed to make the context current: {0}")]
    MakeCurrent(glutin::error::Error),
}

/// A window with a current GL context bound to its surface.
///
/// Fields drop in declaration order: GL state first, the window last.
pub struct Context {
    pub gl: glow::Context,
    pub api: GraphicsApi,
    /// Colour the framebuffer is cleared to by [`Context::clear`].
    pub clear_colour: [f32; 4],
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl Context {
    /// Creates the window, picks an EGL config, creates and binds the
    /// context, and logs the display and GL version strings.
    pub fn new(event_loop: &ActiveEventLoop, config: &ContextConfig) -> Result<Self, ContextError> {
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let mut template = ConfigTemplateBuilder::new().with_api(config.api.config_api());
        if config.depth {
            template = template.with_depth_size(24);
        }

        let raw_display = event_loop.display_handle()?.as_raw();
        let gl_display = unsafe { Display::new(raw_display, DisplayApiPreference::Egl) }
            .map_err(|e| ContextError::Display(e.to_string()))?;
        let configs = unsafe { gl_display.find_configs(template.build()) }
            .map_err(|e| ContextError::Display(e.to_string()))?;
        let gl_config = pick_config(configs).ok_or_else(|| {
            ContextError::Display(format!("no EGL config supports {}", config.api))
        })?;
        let window = glutin_winit::finalize_window(event_loop, window_attributes, &gl_config)?;

        log::info!("EGL Version: {}", gl_display.version_string());

        let mut context_attributes =
            ContextAttributesBuilder::new().with_context_api(config.api.context_api());
        if !config.api.is_es() {
            context_attributes = context_attributes.with_profile(GlProfile::Core);
        }
        let context_attributes = context_attributes.build(Some(window.window_handle()?.as_raw()));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|source| ContextError::CreateContext {
                api: config.api,
                source,
            })?;

        let surface_attributes = window.build_surface_attributes(Default::default())?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(ContextError::Surface)?;
        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(ContextError::MakeCurrent)?;

        if config.vsync {
            if let Err(e) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("Could not enable vsync: {}", e);
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol))
        };
        let gl_version = unsafe { gl.get_parameter_string(glow::VERSION) };
        let label = if config.api.is_es() { "OpenGL ES" } else { "OpenGL" };
        log::info!("{} Version: {}", label, gl_version);

        let size = window.inner_size();
        unsafe { gl.viewport(0, 0, size.width as i32, size.height as i32) };

        Ok(Self {
            gl,
            api: config.api,
            clear_colour: [0.0, 0.0, 0.0, 1.0],
            gl_surface,
            gl_context,
            window,
        })
    }

    /// Resizes the EGL surface and resets the viewport. Zero sized
    /// dimensions (a minimized window) are ignored and `false` is returned.
    pub fn resize(&self, width: u32, height: u32) -> bool {
        match drawable_size(width, height) {
            Some((w, h)) => {
                self.gl_surface.resize(&self.gl_context, w, h);
                unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
                true
            }
            None => false,
        }
    }

    /// Clears the buffers in `mask` to [`Context::clear_colour`] (and depth 1.0).
    pub fn clear(&self, mask: u32) {
        let [r, g, b, a] = self.clear_colour;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(mask);
        }
    }

    /// Depth testing plus back-face culling with counter-clockwise front faces.
    pub fn enable_depth_and_culling(&self) {
        unsafe {
            self.gl.enable(glow::DEPTH_TEST);
            self.gl.enable(glow::CULL_FACE);
            self.gl.front_face(glow::CCW);
            self.gl.cull_face(glow::BACK);
        }
    }

    pub fn swap_buffers(&self) -> Result<(), glutin::error::Error> {
        self.gl_surface.swap_buffers(&self.gl_context)
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Current framebuffer size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}

/// `Some` only when both dimensions can back a surface.
fn drawable_size(width: u32, height: u32) -> Option<(NonZeroU32, NonZeroU32)> {
    Some((NonZeroU32::new(width)?, NonZeroU32::new(height)?))
}

// Prefers single-sampled configs.
fn pick_config<I: Iterator<Item = Config>>(configs: I) -> Option<Config> {
    configs.min_by_key(|config| config.num_samples())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glsl_versions_follow_api() {
        assert_eq!(GraphicsApi::Gl33.glsl_version(), "#version 330 core");
        assert_eq!(GraphicsApi::Gl46.glsl_version(), "#version 460 core");
        assert_eq!(GraphicsApi::Gles20.glsl_version(), "#version 100");
        assert_eq!(GraphicsApi::Gles32.glsl_version(), "#version 320 es");
        assert!(GraphicsApi::Gles20.is_es() && GraphicsApi::Gles32.is_es());
        assert!(!GraphicsApi::Gl33.is_es() && !GraphicsApi::Gl46.is_es());
    }

    #[test]
    fn only_gles20_lacks_vertex_arrays() {
        let without: Vec<_> = GraphicsApi::ALL
            .into_iter()
            .filter(|api| !api.has_vertex_arrays())
            .collect();
        assert_eq!(without, vec![GraphicsApi::Gles20]);
    }

    #[test]
    fn display_names_version() {
        assert_eq!(GraphicsApi::Gl33.to_string(), "OpenGL 3.3");
        assert_eq!(GraphicsApi::Gles32.to_string(), "OpenGL ES 3.2");
    }

    #[test]
    fn no_matching_config_is_none() {
        assert!(pick_config(std::iter::empty::<Config>()).is_none());
    }

    #[test]
    fn minimized_window_is_not_drawable() {
        assert_eq!(drawable_size(640, 0), None);
        assert_eq!(drawable_size(0, 480), None);
        let (w, h) = drawable_size(800, 600).unwrap();
        assert_eq!((w.get(), h.get()), (800, 600));
    }

    #[test]
    fn setters_override_defaults() {
        let config = ContextConfig::new("Test")
            .with_size(1024, 768)
            .with_api(GraphicsApi::Gles20)
            .with_vsync(false);
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.api, GraphicsApi::Gles20);
        assert!(!config.vsync);
        assert!(!config.depth);
    }

    #[test]
    fn config_defaults_to_640_by_480() {
        let config = ContextConfig::new("Test").with_depth(true);
        assert_eq!((config.width, config.height), (640, 480));
        assert!(config.depth);
        assert!(config.vsync);
        assert_eq!(config.api, GraphicsApi::default());
    }
}
