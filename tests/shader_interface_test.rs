use gl_samples::{
    context::GraphicsApi,
    data_structures::mesh::{ColoredVertex, TexturedVertex, Vertex, VertexAttribute},
    pipelines::ShaderSource,
};

fn declared_attributes(vertex_body: &str) -> Vec<&str> {
    vertex_body
        .lines()
        .filter_map(|line| line.trim().strip_prefix("ATTRIBUTE "))
        .filter_map(|decl| decl.trim_end_matches(';').split_whitespace().nth(1))
        .collect()
}

fn names(attributes: &[VertexAttribute]) -> Vec<&str> {
    attributes.iter().map(|a| a.name).collect()
}

#[test]
fn vertex_layouts_match_shader_inputs() {
    let pairs = [
        (ShaderSource::TRIANGLE, ColoredVertex::ATTRIBUTES),
        (ShaderSource::COLORED, ColoredVertex::ATTRIBUTES),
        (ShaderSource::TEXTURED, TexturedVertex::ATTRIBUTES),
    ];
    for (source, attributes) in pairs {
        assert_eq!(declared_attributes(source.vertex), names(attributes));
    }
}

#[test]
fn three_d_shaders_take_world_view_projection() {
    for source in [ShaderSource::COLORED, ShaderSource::TEXTURED] {
        for uniform in ["mWorld", "mView", "mProj"] {
            assert!(source.vertex.contains(&format!("uniform mat4 {};", uniform)));
        }
        assert!(source.vertex.contains("mProj * mView * mWorld"));
    }
    assert!(!ShaderSource::TRIANGLE.vertex.contains("uniform"));
}

#[test]
fn textured_shader_samples_checker() {
    assert!(ShaderSource::TEXTURED.fragment.contains("uniform sampler2D checker;"));
}

#[test]
fn every_api_gets_one_version_line() {
    for api in GraphicsApi::ALL {
        for source in [ShaderSource::TRIANGLE, ShaderSource::COLORED, ShaderSource::TEXTURED] {
            let (vertex, fragment) = source.for_api(api);
            for full in [vertex, fragment] {
                assert_eq!(full.matches("#version").count(), 1);
                assert_eq!(full.lines().next(), Some(api.glsl_version()));
            }
        }
    }
}
