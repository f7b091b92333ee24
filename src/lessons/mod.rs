//! Module providing the [`Lesson`] trait and all lesson implementations.
//!
//! Every lesson owns its GPU resources and draws the same static geometry each frame.

use std::{fmt, sync::Arc};

use crate::abs::ShaderError;
use crate::config::Config;

pub mod indexed;
pub mod textured;
pub mod triangle;
pub mod two_programs;
pub mod uniform;
pub mod vertex_colors;

/// Per-frame information handed to a lesson.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the lesson started.
    pub elapsed: f32,
}

/// The Lesson trait defines the common interface for all lessons.
pub trait Lesson {
    /// Handles an event.
    fn handle_event(&mut self, _event: &sdl2::event::Event) {}

    /// Draws one frame. The color buffer is already cleared.
    fn render(&mut self, frame: &FrameContext);
}

/// Errors raised while setting up a lesson.
#[derive(Debug)]
pub enum LessonError {
    Shader(ShaderError),
    Setup(String),
}

impl fmt::Display for LessonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LessonError::Shader(e) => write!(f, "{}", e),
            LessonError::Setup(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for LessonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LessonError::Shader(e) => Some(e),
            LessonError::Setup(_) => None,
        }
    }
}

impl From<ShaderError> for LessonError {
    fn from(e: ShaderError) -> Self {
        LessonError::Shader(e)
    }
}

impl From<String> for LessonError {
    fn from(message: String) -> Self {
        LessonError::Setup(message)
    }
}

/// The available lessons, in teaching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonKind {
    Triangle,
    Indexed,
    TwoPrograms,
    Uniform,
    VertexColors,
    Textured,
}

impl LessonKind {
    pub const ALL: [LessonKind; 6] = [
        LessonKind::Triangle,
        LessonKind::Indexed,
        LessonKind::TwoPrograms,
        LessonKind::Uniform,
        LessonKind::VertexColors,
        LessonKind::Textured,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LessonKind::Triangle => "triangle",
            LessonKind::Indexed => "indexed",
            LessonKind::TwoPrograms => "two-programs",
            LessonKind::Uniform => "uniform",
            LessonKind::VertexColors => "vertex-colors",
            LessonKind::Textured => "textured",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LessonKind::Triangle => "a single triangle drawn with draw_arrays",
            LessonKind::Indexed => "a quad built from four vertices and an element buffer",
            LessonKind::TwoPrograms => "two triangles drawn with two shader programs",
            LessonKind::Uniform => "a triangle whose color is driven by a uniform over time",
            LessonKind::VertexColors => "per-vertex colors interpolated across a triangle",
            LessonKind::Textured => "a quad mixing two sampled textures",
        }
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LessonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        LessonKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = LessonKind::ALL.iter().map(|kind| kind.name()).collect();
                format!("Unknown lesson `{}` (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Builds the lesson of the given kind, creating all of its GPU resources.
pub fn build_lesson(
    kind: LessonKind,
    gl: &Arc<glow::Context>,
    config: &Config,
) -> Result<Box<dyn Lesson>, LessonError> {
    let lesson: Box<dyn Lesson> = match kind {
        LessonKind::Triangle => Box::new(triangle::Triangle::new(gl, config)?),
        LessonKind::Indexed => Box::new(indexed::Indexed::new(gl, config)?),
        LessonKind::TwoPrograms => Box::new(two_programs::TwoPrograms::new(gl, config)?),
        LessonKind::Uniform => Box::new(uniform::UniformColor::new(gl, config)?),
        LessonKind::VertexColors => Box::new(vertex_colors::VertexColors::new(gl, config)?),
        LessonKind::Textured => Box::new(textured::Textured::new(gl, config)?),
    };
    log::info!("Lesson `{}` ready: {}", kind, kind.description());
    Ok(lesson)
}
