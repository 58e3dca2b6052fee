//! One triangle with red, green and blue corners, no transforms.

use std::process::ExitCode;

use anyhow::Context as _;
use gl_samples::{
    context::{Context, ContextConfig},
    data_structures::mesh::{ColoredVertex, GpuMesh, TRIANGLE, Vertex},
    flow::{self, GraphicsFlow},
    glow,
    pipelines::{Program, ShaderSource},
};

struct ColoredTriangle {
    program: Option<Program>,
    mesh: Option<GpuMesh>,
}

impl ColoredTriangle {
    fn new(ctx: &mut Context) -> anyhow::Result<Self> {
        let program = Program::new(
            &ctx.gl,
            ctx.api,
            &ShaderSource::TRIANGLE,
            ColoredVertex::ATTRIBUTES,
        )
        .context("triangle program")?;
        let mesh = GpuMesh::new(&ctx.gl, ctx.api, &TRIANGLE, None).context("triangle mesh")?;
        Ok(Self {
            program: Some(program),
            mesh: Some(mesh),
        })
    }
}

impl GraphicsFlow for ColoredTriangle {
    fn on_render(&self, ctx: &Context) {
        ctx.clear(glow::COLOR_BUFFER_BIT);
        if let (Some(program), Some(mesh)) = (&self.program, &self.mesh) {
            program.bind(&ctx.gl);
            mesh.draw(&ctx.gl);
        }
    }

    fn on_teardown(&mut self, ctx: &Context) {
        if let Some(mesh) = self.mesh.take() {
            mesh.delete(&ctx.gl);
        }
        if let Some(program) = self.program.take() {
            program.delete(&ctx.gl);
        }
    }
}

fn main() -> ExitCode {
    let config = ContextConfig::new("Erlangsters - Colored Triangle");
    flow::exit_code(flow::run(config, ColoredTriangle::new))
}
