// src/rendering_lib/mod.rs

pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod vertex;

pub use mesh::FrameMesh;
pub use renderer::Renderer;
pub use shader::WGSL_SHADER_SOURCE;
pub use vertex::Vertex;
