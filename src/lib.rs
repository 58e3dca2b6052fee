//! gl-samples
//!
//! Small, self-contained OpenGL and OpenGL ES sample programs. Each binary
//! under `src/bin/` opens a window, creates a GL(ES) context through EGL,
//! draws one thing and exits when the window is closed. This library holds
//! the little they share: the context bootstrap, the render loop, shader and
//! buffer helpers, and column-major matrix math.
//!
//! High-level modules
//! - `camera`: fixed look-at camera and resizable perspective projection
//! - `context`: window, EGL display, GL context and surface in one struct
//! - `data_structures`: vertex formats, static geometry, textures
//! - `flow`: the per-sample trait and the event loop that drives it
//! - `matrix`: `Mat4`, a flat column-major 4x4 matrix with pure helpers
//! - `pipelines`: shader sources and program compile/link
//!
//! The context API (desktop GL 3.3/4.6 or GLES 2.0/3.2) defaults to GLES 3.2
//! and is picked with the `gl33`, `gl46`, `gles20` and `gles32` features.

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod matrix;
pub mod pipelines;

// Re-exports commonly used types for convenience in the samples.
pub use cgmath::{Deg, Point3, Rad, Vector3, Vector4};
pub use glow;
pub use glow::HasContext;
