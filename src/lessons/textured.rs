//! A quad sampling two textures and mixing them in the fragment shader.
//!
//! The Up and Down keys change how much of the second texture shows through.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use sdl2::{event::Event, keyboard::Keycode};

use super::{FrameContext, Lesson, LessonError};
use crate::abs::{Mesh, ShaderProgram, Texture, TextureOptions, TexturedVertex, checkerboard};
use crate::config::Config;

pub const SHADERS: (&str, &str) = ("textured.vs", "textured.fs");
pub const MIX_UNIFORM: &str = "mixValue";
pub const TEXTURES: [&str; 2] = ["container.jpg", "awesomeface.png"];

const MIX_STEP: f32 = 0.1;

pub const VERTICES: [TexturedVertex; 4] = [
    TexturedVertex {
        position: Vec3::new(0.5, 0.5, 0.0),
        color: Vec3::new(1.0, 0.0, 0.0),
        uv: Vec2::new(1.0, 1.0),
    },
    TexturedVertex {
        position: Vec3::new(0.5, -0.5, 0.0),
        color: Vec3::new(0.0, 1.0, 0.0),
        uv: Vec2::new(1.0, 0.0),
    },
    TexturedVertex {
        position: Vec3::new(-0.5, -0.5, 0.0),
        color: Vec3::new(0.0, 0.0, 1.0),
        uv: Vec2::new(0.0, 0.0),
    },
    TexturedVertex {
        position: Vec3::new(-0.5, 0.5, 0.0),
        color: Vec3::new(1.0, 1.0, 0.0),
        uv: Vec2::new(0.0, 1.0),
    },
];

pub const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Moves `current` by `delta`, keeping it within `0.0..=1.0`.
pub fn step_mix(current: f32, delta: f32) -> f32 {
    (current + delta).clamp(0.0, 1.0)
}

pub struct Textured {
    program: ShaderProgram,
    mesh: Mesh,
    textures: [Texture; 2],
    mix: f32,
}

impl Textured {
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, LessonError> {
        let (vs, fs) = SHADERS;
        let program = ShaderProgram::from_files(gl, config.shader_path(vs), config.shader_path(fs))?;
        let mesh = Mesh::new(gl, &VERTICES, Some(&INDICES), glow::TRIANGLES)?;

        let options = TextureOptions::default();
        let textures = [
            load_or_fallback(gl, config, TEXTURES[0], &options, [200, 140, 70, 255])?,
            load_or_fallback(gl, config, TEXTURES[1], &options, [240, 220, 40, 255])?,
        ];

        // Sampler units only need to be assigned once.
        program.set_uniform("texture1", 0);
        program.set_uniform("texture2", 1);

        Ok(Self {
            program,
            mesh,
            textures,
            mix: 0.2,
        })
    }
}

fn load_or_fallback(
    gl: &Arc<glow::Context>,
    config: &Config,
    name: &str,
    options: &TextureOptions,
    color: [u8; 4],
) -> Result<Texture, String> {
    match Texture::load(gl, config.asset_path(name), options) {
        Ok(texture) => {
            log::debug!("Loaded texture {} ({}x{})", name, texture.width(), texture.height());
            Ok(texture)
        }
        Err(e) => {
            log::warn!("Failed to load texture {}, using a placeholder", e);
            Texture::from_image(gl, &checkerboard(256, 8, color, [30, 30, 30, 255]), options)
        }
    }
}

impl Lesson for Textured {
    fn handle_event(&mut self, event: &Event) {
        let delta = match event {
            Event::KeyDown {
                keycode: Some(Keycode::Up),
                ..
            } => MIX_STEP,
            Event::KeyDown {
                keycode: Some(Keycode::Down),
                ..
            } => -MIX_STEP,
            _ => return,
        };
        self.mix = step_mix(self.mix, delta);
        log::debug!("{} = {:.1}", MIX_UNIFORM, self.mix);
    }

    fn render(&mut self, _frame: &FrameContext) {
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(unit as u32);
        }
        self.program.set_uniform(MIX_UNIFORM, self.mix);
        self.mesh.draw(&self.program);
    }
}
