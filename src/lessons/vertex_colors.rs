//! A triangle with a color attribute per vertex, interpolated by the rasterizer.

use std::sync::Arc;

use glam::Vec3;

use super::{FrameContext, Lesson, LessonError};
use crate::abs::{ColorVertex, Mesh, ShaderProgram};
use crate::config::Config;

pub const SHADERS: (&str, &str) = ("vertex_colors.vs", "vertex_colors.fs");

pub const VERTICES: [ColorVertex; 3] = [
    ColorVertex {
        position: Vec3::new(0.5, -0.5, 0.0),
        color: Vec3::new(1.0, 0.0, 0.0),
    },
    ColorVertex {
        position: Vec3::new(-0.5, -0.5, 0.0),
        color: Vec3::new(0.0, 1.0, 0.0),
    },
    ColorVertex {
        position: Vec3::new(0.0, 0.5, 0.0),
        color: Vec3::new(0.0, 0.0, 1.0),
    },
];

pub struct VertexColors {
    program: ShaderProgram,
    mesh: Mesh,
}

impl VertexColors {
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, LessonError> {
        let (vs, fs) = SHADERS;
        let program = ShaderProgram::from_files(gl, config.shader_path(vs), config.shader_path(fs))?;
        let mesh = Mesh::new(gl, &VERTICES, None, glow::TRIANGLES)?;
        Ok(Self { program, mesh })
    }
}

impl Lesson for VertexColors {
    fn render(&mut self, _frame: &FrameContext) {
        self.mesh.draw(&self.program);
    }
}
