//! Sample data: vertex formats, static geometry and textures.
//!
//! - `mesh` holds the vertex layouts, the triangle and cube data, and
//!   [`mesh::GpuMesh`] which uploads and draws them
//! - `texture` builds the procedural checkerboard and uploads it

pub mod mesh;
pub mod texture;

/// A GL object could not be created.
#[derive(Debug, thiserror::Error)]
#[error("failed to create {what}: {reason}")]
pub struct ResourceError {
    pub what: &'static str,
    pub reason: String,
}

impl ResourceError {
    pub(crate) fn create(what: &'static str, reason: String) -> Self {
        Self { what, reason }
    }
}
