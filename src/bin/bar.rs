//! Placeholder sample: an empty window cleared every frame.

use std::process::ExitCode;

use gl_samples::{
    context::{Context, ContextConfig},
    flow::{self, GraphicsFlow},
    glow,
};

struct Bar;

impl GraphicsFlow for Bar {
    fn on_render(&self, ctx: &Context) {
        ctx.clear(glow::COLOR_BUFFER_BIT);
    }

    fn on_teardown(&mut self, _ctx: &Context) {}
}

fn main() -> ExitCode {
    let config = ContextConfig::new("OpenGL Samples - Bar");
    flow::exit_code(flow::run(config, |_| Ok(Bar)))
}
