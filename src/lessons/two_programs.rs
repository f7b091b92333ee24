//! Two triangles, each drawn with its own shader program.

use std::sync::Arc;

use glam::Vec3;

use super::{FrameContext, Lesson, LessonError};
use crate::abs::{Mesh, PositionVertex, ShaderProgram};
use crate::config::Config;

pub const YELLOW_SHADERS: (&str, &str) = ("triangle.vs", "yellow.fs");

pub const LEFT: [PositionVertex; 3] = [
    PositionVertex { position: Vec3::new(-0.9, -0.5, 0.0) },
    PositionVertex { position: Vec3::new(-0.0, -0.5, 0.0) },
    PositionVertex { position: Vec3::new(-0.45, 0.5, 0.0) },
];

pub const RIGHT: [PositionVertex; 3] = [
    PositionVertex { position: Vec3::new(0.0, -0.5, 0.0) },
    PositionVertex { position: Vec3::new(0.9, -0.5, 0.0) },
    PositionVertex { position: Vec3::new(0.45, 0.5, 0.0) },
];

pub struct TwoPrograms {
    orange: ShaderProgram,
    yellow: ShaderProgram,
    left: Mesh,
    right: Mesh,
}

impl TwoPrograms {
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, LessonError> {
        let (vs, fs) = super::triangle::SHADERS;
        let orange = ShaderProgram::from_files(gl, config.shader_path(vs), config.shader_path(fs))?;
        let (vs, fs) = YELLOW_SHADERS;
        let yellow = ShaderProgram::from_files(gl, config.shader_path(vs), config.shader_path(fs))?;

        Ok(Self {
            orange,
            yellow,
            left: Mesh::new(gl, &LEFT, None, glow::TRIANGLES)?,
            right: Mesh::new(gl, &RIGHT, None, glow::TRIANGLES)?,
        })
    }
}

impl Lesson for TwoPrograms {
    fn render(&mut self, _frame: &FrameContext) {
        self.left.draw(&self.orange);
        self.right.draw(&self.yellow);
    }
}
