//! Vertex formats, the samples' static geometry, and its GPU upload.

use std::mem::{offset_of, size_of};

use glow::HasContext;

use crate::{context::GraphicsApi, data_structures::ResourceError};

/// One float vector attribute within an interleaved vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Name of the shader input it feeds.
    pub name: &'static str,
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

/// An interleaved vertex whose attributes are all `f32` vectors.
///
/// Attribute `i` of [`Vertex::ATTRIBUTES`] is bound to location `i`.
pub trait Vertex: bytemuck::Pod {
    const ATTRIBUTES: &'static [VertexAttribute];

    fn stride() -> i32 {
        size_of::<Self>() as i32
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for ColoredVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            name: "vertPosition",
            components: 3,
            offset: offset_of!(ColoredVertex, position) as i32,
        },
        VertexAttribute {
            name: "vertColor",
            components: 3,
            offset: offset_of!(ColoredVertex, color) as i32,
        },
    ];
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for TexturedVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            name: "vertPosition",
            components: 3,
            offset: offset_of!(TexturedVertex, position) as i32,
        },
        VertexAttribute {
            name: "vertTexCoord",
            components: 2,
            offset: offset_of!(TexturedVertex, tex_coords) as i32,
        },
    ];
}

const fn colored(position: [f32; 3], color: [f32; 3]) -> ColoredVertex {
    ColoredVertex { position, color }
}

const fn textured(position: [f32; 3], tex_coords: [f32; 2]) -> TexturedVertex {
    TexturedVertex {
        position,
        tex_coords,
    }
}

/// Red, green and blue corners, already in clip space.
pub const TRIANGLE: [ColoredVertex; 3] = [
    colored([0.0, 0.5, 0.0], [1.0, 0.0, 0.0]),
    colored([-0.5, -0.5, 0.0], [0.0, 1.0, 0.0]),
    colored([0.5, -0.5, 0.0], [0.0, 0.0, 1.0]),
];

/// Unit cube (half extent 1), four vertices per face in the order top,
/// left, right, front, back, bottom, one flat colour per face.
pub const COLORED_CUBE: [ColoredVertex; 24] = [
    // Top
    colored([-1.0, 1.0, -1.0], [0.5, 0.5, 0.5]),
    colored([-1.0, 1.0, 1.0], [0.5, 0.5, 0.5]),
    colored([1.0, 1.0, 1.0], [0.5, 0.5, 0.5]),
    colored([1.0, 1.0, -1.0], [0.5, 0.5, 0.5]),
    // Left
    colored([-1.0, 1.0, 1.0], [0.75, 0.25, 0.5]),
    colored([-1.0, -1.0, 1.0], [0.75, 0.25, 0.5]),
    colored([-1.0, -1.0, -1.0], [0.75, 0.25, 0.5]),
    colored([-1.0, 1.0, -1.0], [0.75, 0.25, 0.5]),
    // Right
    colored([1.0, 1.0, 1.0], [0.25, 0.25, 0.75]),
    colored([1.0, -1.0, 1.0], [0.25, 0.25, 0.75]),
    colored([1.0, -1.0, -1.0], [0.25, 0.25, 0.75]),
    colored([1.0, 1.0, -1.0], [0.25, 0.25, 0.75]),
    // Front
    colored([1.0, 1.0, 1.0], [1.0, 0.0, 0.15]),
    colored([1.0, -1.0, 1.0], [1.0, 0.0, 0.15]),
    colored([-1.0, -1.0, 1.0], [1.0, 0.0, 0.15]),
    colored([-1.0, 1.0, 1.0], [1.0, 0.0, 0.15]),
    // Back
    colored([1.0, 1.0, -1.0], [0.0, 1.0, 0.15]),
    colored([1.0, -1.0, -1.0], [0.0, 1.0, 0.15]),
    colored([-1.0, -1.0, -1.0], [0.0, 1.0, 0.15]),
    colored([-1.0, 1.0, -1.0], [0.0, 1.0, 0.15]),
    // Bottom
    colored([-1.0, -1.0, -1.0], [0.5, 0.5, 1.0]),
    colored([-1.0, -1.0, 1.0], [0.5, 0.5, 1.0]),
    colored([1.0, -1.0, 1.0], [0.5, 0.5, 1.0]),
    colored([1.0, -1.0, -1.0], [0.5, 0.5, 1.0]),
];

/// Same faces as [`COLORED_CUBE`], each mapped to the full `0..1` UV square.
pub const TEXTURED_CUBE: [TexturedVertex; 24] = [
    // Top
    textured([-1.0, 1.0, -1.0], [0.0, 0.0]),
    textured([-1.0, 1.0, 1.0], [0.0, 1.0]),
    textured([1.0, 1.0, 1.0], [1.0, 1.0]),
    textured([1.0, 1.0, -1.0], [1.0, 0.0]),
    // Left
    textured([-1.0, 1.0, 1.0], [0.0, 0.0]),
    textured([-1.0, -1.0, 1.0], [0.0, 1.0]),
    textured([-1.0, -1.0, -1.0], [1.0, 1.0]),
    textured([-1.0, 1.0, -1.0], [1.0, 0.0]),
    // Right
    textured([1.0, 1.0, 1.0], [0.0, 0.0]),
    textured([1.0, -1.0, 1.0], [0.0, 1.0]),
    textured([1.0, -1.0, -1.0], [1.0, 1.0]),
    textured([1.0, 1.0, -1.0], [1.0, 0.0]),
    // Front
    textured([1.0, 1.0, 1.0], [0.0, 0.0]),
    textured([1.0, -1.0, 1.0], [0.0, 1.0]),
    textured([-1.0, -1.0, 1.0], [1.0, 1.0]),
    textured([-1.0, 1.0, 1.0], [1.0, 0.0]),
    // Back
    textured([1.0, 1.0, -1.0], [0.0, 0.0]),
    textured([1.0, -1.0, -1.0], [0.0, 1.0]),
    textured([-1.0, -1.0, -1.0], [1.0, 1.0]),
    textured([-1.0, 1.0, -1.0], [1.0, 0.0]),
    // Bottom
    textured([-1.0, -1.0, -1.0], [0.0, 0.0]),
    textured([-1.0, -1.0, 1.0], [0.0, 1.0]),
    textured([1.0, -1.0, 1.0], [1.0, 1.0]),
    textured([1.0, -1.0, -1.0], [1.0, 0.0]),
];

/// Two triangles per cube face, counter-clockwise seen from outside.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // Top
    5, 4, 6, 6, 4, 7, // Left
    8, 9, 10, 8, 10, 11, // Right
    13, 12, 14, 15, 14, 12, // Front
    16, 17, 18, 16, 18, 19, // Back
    21, 20, 22, 22, 20, 23, // Bottom
];

/// Vertex (and optional index) buffers plus their attribute layout.
#[derive(Debug)]
pub struct GpuMesh {
    vertex_array: Option<glow::NativeVertexArray>,
    vertex_buffer: glow::NativeBuffer,
    index_buffer: Option<glow::NativeBuffer>,
    attributes: &'static [VertexAttribute],
    stride: i32,
    count: i32,
}

impl GpuMesh {
    /// Uploads `vertices` and, if given, `indices` as `STATIC_DRAW` buffers.
    ///
    /// A vertex array object captures the layout where `api` has one; on
    /// ES 2.0 the layout is re-applied on every [`GpuMesh::draw`].
    pub fn new<V: Vertex>(
        gl: &glow::Context,
        api: GraphicsApi,
        vertices: &[V],
        indices: Option<&[u16]>,
    ) -> Result<Self, ResourceError> {
        unsafe {
            let vertex_array = if api.has_vertex_arrays() {
                let vao = gl
                    .create_vertex_array()
                    .map_err(|reason| ResourceError::create("vertex array", reason))?;
                gl.bind_vertex_array(Some(vao));
                Some(vao)
            } else {
                None
            };

            let vertex_buffer = gl
                .create_buffer()
                .map_err(|reason| ResourceError::create("vertex buffer", reason))?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            let index_buffer = match indices {
                Some(indices) => {
                    let buffer = gl
                        .create_buffer()
                        .map_err(|reason| ResourceError::create("index buffer", reason))?;
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        bytemuck::cast_slice(indices),
                        glow::STATIC_DRAW,
                    );
                    Some(buffer)
                }
                None => None,
            };

            let mesh = Self {
                vertex_array,
                vertex_buffer,
                index_buffer,
                attributes: V::ATTRIBUTES,
                stride: V::stride(),
                count: indices.map_or(vertices.len(), |indices| indices.len()) as i32,
            };
            mesh.apply_layout(gl);

            if vertex_array.is_some() {
                gl.bind_vertex_array(None);
            }
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            log::debug!(
                "Uploaded {} vertices ({} bytes each), {} indices",
                vertices.len(),
                mesh.stride,
                indices.map_or(0, |indices| indices.len())
            );
            Ok(mesh)
        }
    }

    unsafe fn apply_layout(&self, gl: &glow::Context) {
        for (location, attribute) in self.attributes.iter().enumerate() {
            unsafe {
                gl.vertex_attrib_pointer_f32(
                    location as u32,
                    attribute.components,
                    glow::FLOAT,
                    false,
                    self.stride,
                    attribute.offset,
                );
                gl.enable_vertex_attrib_array(location as u32);
            }
        }
    }

    /// Draws the whole mesh as a triangle list.
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            match self.vertex_array {
                Some(vao) => gl.bind_vertex_array(Some(vao)),
                None => {
                    gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vertex_buffer));
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.index_buffer);
                    self.apply_layout(gl);
                }
            }
            if self.index_buffer.is_some() {
                gl.draw_elements(glow::TRIANGLES, self.count, glow::UNSIGNED_SHORT, 0);
            } else {
                gl.draw_arrays(glow::TRIANGLES, 0, self.count);
            }
            if self.vertex_array.is_some() {
                gl.bind_vertex_array(None);
            }
        }
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe {
            if let Some(vao) = self.vertex_array {
                gl.delete_vertex_array(vao);
            }
            gl.delete_buffer(self.vertex_buffer);
            if let Some(buffer) = self.index_buffer {
                gl.delete_buffer(buffer);
            }
        }
    }
}
