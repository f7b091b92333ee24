//! A rectangle made of two triangles sharing vertices through an element buffer.

use std::sync::Arc;

use glam::Vec3;

use super::{FrameContext, Lesson, LessonError};
use crate::abs::{Mesh, PositionVertex, ShaderProgram};
use crate::config::Config;

pub const VERTICES: [PositionVertex; 4] = [
    PositionVertex { position: Vec3::new(0.5, 0.5, 0.0) },   // top right
    PositionVertex { position: Vec3::new(0.5, -0.5, 0.0) },  // bottom right
    PositionVertex { position: Vec3::new(-0.5, -0.5, 0.0) }, // bottom left
    PositionVertex { position: Vec3::new(-0.5, 0.5, 0.0) },  // top left
];

pub const INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

pub struct Indexed {
    program: ShaderProgram,
    mesh: Mesh,
}

impl Indexed {
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, LessonError> {
        let (vs, fs) = super::triangle::SHADERS;
        let program = ShaderProgram::from_files(gl, config.shader_path(vs), config.shader_path(fs))?;
        let mesh = Mesh::new(gl, &VERTICES, Some(&INDICES), glow::TRIANGLES)?;
        Ok(Self { program, mesh })
    }
}

impl Lesson for Indexed {
    fn render(&mut self, _frame: &FrameContext) {
        self.mesh.draw(&self.program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_reference_existing_vertices() {
        assert!(INDICES.iter().all(|&i| (i as usize) < VERTICES.len()));
        assert_eq!(INDICES.len() % 3, 0);
    }

    #[test]
    fn every_vertex_is_used() {
        for i in 0..VERTICES.len() as u32 {
            assert!(INDICES.contains(&i), "vertex {} unused", i);
        }
    }
}
