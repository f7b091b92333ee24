//! A single orange triangle drawn without an index buffer.

use std::sync::Arc;

use glam::Vec3;

use super::{FrameContext, Lesson, LessonError};
use crate::abs::{Mesh, PositionVertex, ShaderProgram};
use crate::config::Config;

pub const SHADERS: (&str, &str) = ("triangle.vs", "triangle.fs");

pub const VERTICES: [PositionVertex; 3] = [
    PositionVertex { position: Vec3::new(-0.5, -0.5, 0.0) },
    PositionVertex { position: Vec3::new(0.5, -0.5, 0.0) },
    PositionVertex { position: Vec3::new(0.0, 0.5, 0.0) },
];

pub struct Triangle {
    program: ShaderProgram,
    mesh: Mesh,
}

impl Triangle {
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, LessonError> {
        let program = ShaderProgram::from_files(
            gl,
            config.shader_path(SHADERS.0),
            config.shader_path(SHADERS.1),
        )?;
        let mesh = Mesh::new(gl, &VERTICES, None, glow::TRIANGLES)?;
        Ok(Self { program, mesh })
    }
}

impl Lesson for Triangle {
    fn render(&mut self, _frame: &FrameContext) {
        self.mesh.draw(&self.program);
    }
}
