//! The slice of the OpenGL API the shader wrappers need.
//!
//! [`ShaderBackend`] is implemented for [`glow::Context`]. Keeping the shader layer
//! behind this trait lets it be exercised without a live context.

use glow::HasContext;

use super::ShaderStage;

/// Shader and program entry points of a graphics context.
pub trait ShaderBackend {
    type Shader: Copy;
    type Program: Copy;
    type UniformLocation;

    /// Creates an empty shader object for the given stage.
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;

    /// Uploads `source` and compiles it. On failure returns the info log.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> Result<(), String>;

    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;

    /// Attaches `shaders`, links and detaches them again. On failure returns the info log.
    fn link_program(&self, program: Self::Program, shaders: &[Self::Shader]) -> Result<(), String>;

    fn delete_program(&self, program: Self::Program);

    fn use_program(&self, program: Option<Self::Program>);

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32);
    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);
    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32);
    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32);
    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, data: &[f32; 16]);
}

impl ShaderBackend for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage.gl_enum()) }
    }

    fn compile_shader(&self, shader: Self::Shader, source: &str) -> Result<(), String> {
        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);

            if !self.get_shader_compile_status(shader) {
                return Err(self.get_shader_info_log(shader));
            }
        }
        Ok(())
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn link_program(&self, program: Self::Program, shaders: &[Self::Shader]) -> Result<(), String> {
        unsafe {
            for shader in shaders {
                self.attach_shader(program, *shader);
            }

            HasContext::link_program(self, program);
            let linked = self.get_program_link_status(program);

            for shader in shaders {
                self.detach_shader(program, *shader);
            }

            if !linked {
                return Err(self.get_program_info_log(program));
            }
        }
        Ok(())
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32) {
        unsafe { HasContext::uniform_1_i32(self, Some(location), x) }
    }

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32) {
        unsafe { HasContext::uniform_1_f32(self, Some(location), x) }
    }

    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
        unsafe { HasContext::uniform_2_f32(self, Some(location), x, y) }
    }

    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32) {
        unsafe { HasContext::uniform_3_f32(self, Some(location), x, y, z) }
    }

    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32) {
        unsafe { HasContext::uniform_4_f32(self, Some(location), x, y, z, w) }
    }

    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, data: &[f32; 16]) {
        unsafe { self.uniform_matrix_4_f32_slice(Some(location), false, data) }
    }
}
