//! A spinning cube with one solid colour per face.

use std::{process::ExitCode, time::Duration};

use anyhow::Context as _;
use gl_samples::{
    Deg, Point3,
    camera::{self, Camera, Projection},
    context::{Context, ContextConfig},
    data_structures::mesh::{COLORED_CUBE, CUBE_INDICES, ColoredVertex, GpuMesh, Vertex},
    flow::{self, GraphicsFlow},
    glow,
    pipelines::{Program, ShaderSource, TransformUniforms},
};

struct Resources {
    program: Program,
    mesh: GpuMesh,
}

struct ColoredCube {
    resources: Option<Resources>,
    uniforms: TransformUniforms,
    projection: Projection,
}

impl ColoredCube {
    fn new(ctx: &mut Context) -> anyhow::Result<Self> {
        ctx.clear_colour = [0.75, 0.85, 0.8, 1.0];
        ctx.enable_depth_and_culling();

        let program = Program::new(
            &ctx.gl,
            ctx.api,
            &ShaderSource::COLORED,
            ColoredVertex::ATTRIBUTES,
        )
        .context("cube program")?;
        let mesh = GpuMesh::new(&ctx.gl, ctx.api, &COLORED_CUBE, Some(&CUBE_INDICES))
            .context("cube mesh")?;

        let (width, height) = ctx.size();
        let projection = Projection::new(width, height, Deg(45.0), 0.1, 1000.0);
        let camera = Camera::new(Point3::new(0.0, 0.0, -8.0), Point3::new(0.0, 0.0, 0.0));

        let uniforms = TransformUniforms::locate(&ctx.gl, &program);
        program.bind(&ctx.gl);
        uniforms.set_world(&ctx.gl, &program, &camera::spin(0.0));
        uniforms.set_view(&ctx.gl, &program, &camera.calc_matrix());
        uniforms.set_projection(&ctx.gl, &program, &projection.calc_matrix());

        Ok(Self {
            resources: Some(Resources { program, mesh }),
            uniforms,
            projection,
        })
    }
}

impl GraphicsFlow for ColoredCube {
    fn on_resize(&mut self, ctx: &Context, width: u32, height: u32) {
        self.projection.resize(width, height);
        if let Some(Resources { program, .. }) = &self.resources {
            program.bind(&ctx.gl);
            self.uniforms
                .set_projection(&ctx.gl, program, &self.projection.calc_matrix());
        }
    }

    fn on_update(&mut self, ctx: &Context, elapsed: Duration) {
        if let Some(Resources { program, .. }) = &self.resources {
            program.bind(&ctx.gl);
            self.uniforms
                .set_world(&ctx.gl, program, &camera::spin(elapsed.as_secs_f32()));
        }
    }

    fn on_render(&self, ctx: &Context) {
        ctx.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        if let Some(Resources { program, mesh }) = &self.resources {
            program.bind(&ctx.gl);
            mesh.draw(&ctx.gl);
        }
    }

    fn on_teardown(&mut self, ctx: &Context) {
        if let Some(Resources { program, mesh }) = self.resources.take() {
            mesh.delete(&ctx.gl);
            program.delete(&ctx.gl);
        }
    }
}

fn main() -> ExitCode {
    let config = ContextConfig::new("Erlangsters - Colored Cube").with_depth(true);
    flow::exit_code(flow::run(config, ColoredCube::new))
}
