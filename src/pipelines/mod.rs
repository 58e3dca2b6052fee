//! Shader sources and linked GL programs.
//!
//! Shader bodies are written once against a handful of macros and get an
//! API specific prelude when compiled:
//!
//! - `ATTRIBUTE` is a vertex input (`attribute` or `in`)
//! - `VARYING` is an interpolated value (`varying`, or `out`/`in` per stage)
//! - `TEXTURE` samples a 2D texture (`texture2D` or `texture`)
//! - `FRAG_COLOR` is the fragment output (`gl_FragColor` or a declared `out`)
//!
//! Attribute locations are bound by name before linking, so no body needs
//! `layout(location = ...)`.

use glow::HasContext;

use crate::{
    context::GraphicsApi,
    data_structures::mesh::VertexAttribute,
    matrix::Mat4,
};

/// A vertex and fragment shader body pair, embedded at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderSource {
    /// Per-vertex colour, positions already in clip space.
    pub const TRIANGLE: ShaderSource = ShaderSource {
        vertex: include_str!("triangle.vert"),
        fragment: include_str!("colored.frag"),
    };

    /// Per-vertex colour through world, view and projection matrices.
    pub const COLORED: ShaderSource = ShaderSource {
        vertex: include_str!("colored.vert"),
        fragment: include_str!("colored.frag"),
    };

    /// Texture lookup through world, view and projection matrices.
    pub const TEXTURED: ShaderSource = ShaderSource {
        vertex: include_str!("textured.vert"),
        fragment: include_str!("textured.frag"),
    };

    /// Full vertex and fragment source for `api`.
    pub fn for_api(&self, api: GraphicsApi) -> (String, String) {
        (
            vertex_prelude(api) + self.vertex,
            fragment_prelude(api) + self.fragment,
        )
    }
}

pub fn vertex_prelude(api: GraphicsApi) -> String {
    let mut prelude = format!("{}\n", api.glsl_version());
    if api.has_modern_glsl() {
        prelude.push_str("#define ATTRIBUTE in\n#define VARYING out\n");
    } else {
        prelude.push_str("#define ATTRIBUTE attribute\n#define VARYING varying\n");
    }
    prelude
}

pub fn fragment_prelude(api: GraphicsApi) -> String {
    let mut prelude = format!("{}\n", api.glsl_version());
    if api.is_es() {
        prelude.push_str("precision mediump float;\n");
    }
    if api.has_modern_glsl() {
        prelude.push_str(
            "#define VARYING in\n#define TEXTURE texture\nout vec4 out_color;\n#define FRAG_COLOR out_color\n",
        );
    } else {
        prelude.push_str(
            "#define VARYING varying\n#define TEXTURE texture2D\n#define FRAG_COLOR gl_FragColor\n",
        );
    }
    prelude
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to create {stage} shader: {reason}")]
    CreateShader { stage: ShaderStage, reason: String },
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to create program: {0}")]
    CreateProgram(String),
    #[error("shader program linking failed: {log}")]
    Link { log: String },
}

/// A linked vertex + fragment program.
#[derive(Debug)]
pub struct Program {
    raw: glow::NativeProgram,
}

impl Program {
    /// Compiles both stages of `source` for `api`, binds `attributes` to
    /// locations `0..n` in order, and links.
    pub fn new(
        gl: &glow::Context,
        api: GraphicsApi,
        source: &ShaderSource,
        attributes: &[VertexAttribute],
    ) -> Result<Self, ShaderError> {
        let (vertex_src, fragment_src) = source.for_api(api);
        unsafe {
            let vertex = compile(gl, ShaderStage::Vertex, &vertex_src)?;
            let fragment = match compile(gl, ShaderStage::Fragment, &fragment_src) {
                Ok(shader) => shader,
                Err(e) => {
                    gl.delete_shader(vertex);
                    return Err(e);
                }
            };

            let program = match gl.create_program() {
                Ok(program) => program,
                Err(reason) => {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                    return Err(ShaderError::CreateProgram(reason));
                }
            };
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            for (location, attribute) in attributes.iter().enumerate() {
                gl.bind_attrib_location(program, location as u32, attribute.name);
            }
            gl.link_program(program);

            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }
            log::debug!("Linked program {:?}", program);
            Ok(Self { raw: program })
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.raw)) };
    }

    pub fn uniform(&self, gl: &glow::Context, name: &str) -> Option<glow::NativeUniformLocation> {
        let location = unsafe { gl.get_uniform_location(self.raw, name) };
        if location.is_none() {
            log::warn!("Uniform `{}` is not active in program {:?}", name, self.raw);
        }
        location
    }

    /// Uploads `matrix` column-major. The program must be bound.
    pub fn set_mat4(
        &self,
        gl: &glow::Context,
        location: Option<&glow::NativeUniformLocation>,
        matrix: &Mat4,
    ) {
        unsafe { gl.uniform_matrix_4_f32_slice(location, false, matrix.as_array()) };
    }

    /// Points a sampler uniform at texture unit `unit`. The program must be bound.
    pub fn set_sampler(
        &self,
        gl: &glow::Context,
        location: Option<&glow::NativeUniformLocation>,
        unit: i32,
    ) {
        unsafe { gl.uniform_1_i32(location, unit) };
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.raw) };
    }
}

unsafe fn compile(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::NativeShader, ShaderError> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_enum())
            .map_err(|reason| ShaderError::CreateShader { stage, reason })?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }
        Ok(shader)
    }
}

/// Locations of the `mWorld`, `mView` and `mProj` uniforms shared by the
/// 3D shaders.
#[derive(Debug)]
pub struct TransformUniforms {
    world: Option<glow::NativeUniformLocation>,
    view: Option<glow::NativeUniformLocation>,
    projection: Option<glow::NativeUniformLocation>,
}

impl TransformUniforms {
    pub fn locate(gl: &glow::Context, program: &Program) -> Self {
        Self {
            world: program.uniform(gl, "mWorld"),
            view: program.uniform(gl, "mView"),
            projection: program.uniform(gl, "mProj"),
        }
    }

    pub fn set_world(&self, gl: &glow::Context, program: &Program, world: &Mat4) {
        program.set_mat4(gl, self.world.as_ref(), world);
    }

    pub fn set_view(&self, gl: &glow::Context, program: &Program, view: &Mat4) {
        program.set_mat4(gl, self.view.as_ref(), view);
    }

    pub fn set_projection(&self, gl: &glow::Context, program: &Program, projection: &Mat4) {
        program.set_mat4(gl, self.projection.as_ref(), projection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_starts_with_version() {
        for api in GraphicsApi::ALL {
            let (vertex, fragment) = ShaderSource::COLORED.for_api(api);
            assert!(vertex.starts_with(api.glsl_version()));
            assert!(fragment.starts_with(api.glsl_version()));
        }
    }

    #[test]
    fn gles20_uses_legacy_interface() {
        let (vertex, fragment) = ShaderSource::TEXTURED.for_api(GraphicsApi::Gles20);
        assert!(vertex.contains("#define ATTRIBUTE attribute"));
        assert!(fragment.contains("#define FRAG_COLOR gl_FragColor"));
        assert!(fragment.contains("#define TEXTURE texture2D"));
        assert!(!fragment.contains("out vec4"));
    }

    #[test]
    fn modern_apis_declare_fragment_output() {
        for api in [GraphicsApi::Gl33, GraphicsApi::Gl46, GraphicsApi::Gles32] {
            let fragment = fragment_prelude(api);
            assert!(fragment.contains("out vec4 out_color;"));
            assert!(vertex_prelude(api).contains("#define VARYING out"));
        }
    }

    #[test]
    fn precision_only_for_es() {
        assert!(fragment_prelude(GraphicsApi::Gles20).contains("precision mediump float;"));
        assert!(fragment_prelude(GraphicsApi::Gles32).contains("precision mediump float;"));
        assert!(!fragment_prelude(GraphicsApi::Gl33).contains("precision"));
    }

    #[test]
    fn info_log_appears_once_in_error_chain() {
        let err = anyhow::Error::new(ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:4: 'foo' : undeclared identifier".to_string(),
        })
        .context("cube program");
        let shown = format!("{:#}", err);
        assert!(shown.starts_with("cube program: fragment shader compilation failed"));
        assert_eq!(shown.matches("undeclared identifier").count(), 1);
    }

    #[test]
    fn bodies_only_use_portable_macros() {
        for source in [ShaderSource::TRIANGLE, ShaderSource::COLORED, ShaderSource::TEXTURED] {
            for body in [source.vertex, source.fragment] {
                assert!(!body.contains("#version"));
                assert!(!body.contains("gl_FragColor"));
                assert!(!body.contains("attribute "));
            }
        }
    }
}
