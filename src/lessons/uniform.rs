//! A triangle whose color is set from the CPU every frame through a uniform.

use std::sync::Arc;

use glam::Vec4;

use super::{FrameContext, Lesson, LessonError};
use crate::abs::{Mesh, ShaderProgram};
use crate::config::Config;

pub const SHADERS: (&str, &str) = ("triangle.vs", "uniform_color.fs");
pub const COLOR_UNIFORM: &str = "ourColor";

/// Green pulsing between 0 and 1 with a period of 2π seconds.
pub fn pulse_color(elapsed: f32) -> Vec4 {
    let green = elapsed.sin() / 2.0 + 0.5;
    Vec4::new(0.0, green, 0.0, 1.0)
}

pub struct UniformColor {
    program: ShaderProgram,
    mesh: Mesh,
}

impl UniformColor {
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, LessonError> {
        let (vs, fs) = SHADERS;
        let program = ShaderProgram::from_files(gl, config.shader_path(vs), config.shader_path(fs))?;
        let mesh = Mesh::new(gl, &super::triangle::VERTICES, None, glow::TRIANGLES)?;
        Ok(Self { program, mesh })
    }
}

impl Lesson for UniformColor {
    fn render(&mut self, frame: &FrameContext) {
        self.program.set_uniform(COLOR_UNIFORM, pulse_color(frame.elapsed));
        self.mesh.draw(&self.program);
    }
}
