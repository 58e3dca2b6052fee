//! Empty window: clears the colour buffer every frame.

use std::process::ExitCode;

use gl_samples::{
    context::{Context, ContextConfig},
    flow::{self, GraphicsFlow},
    glow,
};

struct Foo;

impl GraphicsFlow for Foo {
    fn on_render(&self, ctx: &Context) {
        ctx.clear(glow::COLOR_BUFFER_BIT);
    }

    fn on_teardown(&mut self, _ctx: &Context) {}
}

fn main() -> ExitCode {
    let config = ContextConfig::new("OpenGL Samples - Foo");
    flow::exit_code(flow::run(config, |_| Ok(Foo)))
}
