//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.
//!
//! A [`ShaderProgram`] only exists once both stages compiled and linked. Failed attempts
//! release every object they created before returning a [`ShaderError`].

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use glam::{Mat4, Vec2, Vec3, Vec4};

use super::ShaderBackend;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The OpenGL enum naming this stage.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Errors produced while building a [`ShaderProgram`].
#[derive(Debug)]
pub enum ShaderError {
    /// A source file could not be opened or read to completion.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A stage failed to compile. `log` is the driver's diagnostic text.
    Compile { stage: ShaderStage, log: String },
    /// The compiled stages failed to link. `log` is the driver's diagnostic text.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::FileRead { path, source } => {
                write!(f, "failed to read shader source {}: {}", path.display(), source)
            }
            ShaderError::Compile { stage, log } => {
                write!(f, "{} shader compilation failed: {}", stage, log.trim_end())
            }
            ShaderError::Link { log } => {
                write!(f, "shader program linking failed: {}", log.trim_end())
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reads a whole shader source file as UTF-8 text.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, ShaderError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| ShaderError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Represents an individual OpenGL shader.
pub struct Shader<B: ShaderBackend = glow::Context> {
    gl: Arc<B>,
    id: B::Shader,
}

impl<B: ShaderBackend> Shader<B> {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<B>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let id = gl
            .create_shader(stage)
            .map_err(|log| ShaderError::Compile { stage, log })?;

        if let Err(log) = gl.compile_shader(id, source) {
            gl.delete_shader(id);
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(Self {
            gl: Arc::clone(gl),
            id,
        })
    }
}

impl<B: ShaderBackend> Drop for Shader<B> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Uploads the value to the given uniform location of the current program.
    ///
    /// Called by [`ShaderProgram::set_uniform`] once the owning program is current.
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation);
}

impl Uniform for bool {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_1_i32(location, *self as i32);
    }
}

impl Uniform for i32 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_1_i32(location, *self);
    }
}

impl Uniform for f32 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_1_f32(location, *self);
    }
}

impl Uniform for Vec2 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_2_f32(location, self.x, self.y);
    }
}

impl Uniform for Vec3 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_3_f32(location, self.x, self.y, self.z);
    }
}

impl Uniform for Vec4 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_4_f32(location, self.x, self.y, self.z, self.w);
    }
}

impl Uniform for Mat4 {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        gl.uniform_matrix_4_f32(location, &self.to_cols_array());
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform<B: ShaderBackend>(&self, gl: &B, location: &B::UniformLocation) {
        (*self).set_uniform(gl, location);
    }
}

/// Represents an OpenGL shader program composed of a vertex and a fragment shader.
pub struct ShaderProgram<B: ShaderBackend = glow::Context> {
    gl: Arc<B>,
    id: B::Program,
}

impl<B: ShaderBackend> ShaderProgram<B> {
    /// Links a new shader program from the given shaders.
    ///
    /// The shaders are detached again after linking; dropping them afterwards releases
    /// the stage objects while the program stays valid.
    pub fn new(gl: &Arc<B>, shaders: &[&Shader<B>]) -> Result<Self, ShaderError> {
        let program = gl.create_program().map_err(|log| ShaderError::Link { log })?;
        let ids: Vec<B::Shader> = shaders.iter().map(|shader| shader.id).collect();

        if let Err(log) = gl.link_program(program, &ids) {
            gl.delete_program(program);
            return Err(ShaderError::Link { log });
        }

        Ok(Self {
            gl: Arc::clone(gl),
            id: program,
        })
    }

    /// Compiles and links a program from in-memory vertex and fragment sources.
    pub fn from_sources(gl: &Arc<B>, vertex: &str, fragment: &str) -> Result<Self, ShaderError> {
        let vert = Shader::new(gl, ShaderStage::Vertex, vertex)?;
        let frag = Shader::new(gl, ShaderStage::Fragment, fragment)?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Reads, compiles and links a program from a vertex and a fragment source file.
    ///
    /// Both files are read before anything is created on the context.
    pub fn from_files(
        gl: &Arc<B>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();
        let vertex = read_source(vertex_path)?;
        let fragment = read_source(fragment_path)?;

        let program = Self::from_sources(gl, &vertex, &fragment)?;
        log::debug!(
            "Linked shader program from {} and {}",
            vertex_path.display(),
            fragment_path.display()
        );
        Ok(program)
    }

    /// Returns the driver handle of the program.
    pub fn id(&self) -> B::Program {
        self.id
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gl.use_program(Some(self.id));
    }

    /// Returns whether `name` resolves to an active uniform of this program.
    pub fn has_uniform(&self, name: &str) -> bool {
        self.gl.uniform_location(self.id, name).is_some()
    }

    /// Sets a uniform variable in the shader program.
    ///
    /// Makes this program current before uploading, so it stays current afterwards.
    /// Names that do not resolve to an active uniform are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = self.gl.uniform_location(self.id, name) {
            self.use_program();
            value.set_uniform(&*self.gl, &location);
        }
    }
}

impl<B: ShaderBackend> Drop for ShaderProgram<B> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Value {
        Int(i32),
        Float(f32),
        Floats(usize, [f32; 4]),
        Matrix([f32; 16]),
    }

    #[derive(Default)]
    struct State {
        next_id: u32,
        shaders: HashMap<u32, (ShaderStage, String)>,
        programs: HashMap<u32, Vec<String>>,
        current: Option<u32>,
        uploads: Vec<(u32, String, Value)>,
        refuse_programs: bool,
    }

    /// Pretends to be a driver: sources without `void main` fail to compile, and a
    /// fragment `in` with no matching vertex `out` fails to link.
    #[derive(Default)]
    pub struct FakeGl {
        state: RefCell<State>,
    }

    #[derive(Debug)]
    pub struct Location {
        program: u32,
        name: String,
    }

    fn declared(source: &str, qualifier: &str) -> Vec<String> {
        source
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix(qualifier))
            .filter_map(|rest| rest.trim_end_matches(';').split_whitespace().last())
            .map(str::to_string)
            .collect()
    }

    impl FakeGl {
        /// Makes every later `create_program` call fail.
        pub fn refuse_programs(&self) {
            self.state.borrow_mut().refuse_programs = true;
        }

        pub fn live_shaders(&self) -> usize {
            self.state.borrow().shaders.len()
        }

        pub fn live_programs(&self) -> usize {
            self.state.borrow().programs.len()
        }

        pub fn current(&self) -> Option<u32> {
            self.state.borrow().current
        }

        pub fn uploads(&self) -> Vec<(u32, String, Value)> {
            self.state.borrow().uploads.clone()
        }

        fn record(&self, location: &Location, value: Value) {
            let mut state = self.state.borrow_mut();
            assert_eq!(state.current, Some(location.program), "uniform set on a program that is not current");
            state.uploads.push((location.program, location.name.clone(), value));
        }
    }

    impl ShaderBackend for FakeGl {
        type Shader = u32;
        type Program = u32;
        type UniformLocation = Location;

        fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.shaders.insert(id, (stage, String::new()));
            Ok(id)
        }

        fn compile_shader(&self, shader: u32, source: &str) -> Result<(), String> {
            let mut state = self.state.borrow_mut();
            let entry = state.shaders.get_mut(&shader).ok_or("no such shader")?;
            entry.1 = source.to_string();
            if source.contains("void main") {
                Ok(())
            } else {
                let line = source
                    .lines()
                    .position(|line| line.contains("main"))
                    .map_or(0, |index| index + 1);
                Err(format!("0:{}(1): error: syntax error, unexpected IDENTIFIER near 'oid main'\n", line))
            }
        }

        fn delete_shader(&self, shader: u32) {
            self.state.borrow_mut().shaders.remove(&shader);
        }

        fn create_program(&self) -> Result<u32, String> {
            let mut state = self.state.borrow_mut();
            if state.refuse_programs {
                return Err("out of program objects".to_string());
            }
            state.next_id += 1;
            let id = state.next_id;
            state.programs.insert(id, Vec::new());
            Ok(id)
        }

        fn link_program(&self, program: u32, shaders: &[u32]) -> Result<(), String> {
            let mut state = self.state.borrow_mut();
            let mut outputs = Vec::new();
            let mut inputs = Vec::new();
            let mut uniforms = Vec::new();
            for shader in shaders {
                let (stage, source) = state.shaders.get(shader).ok_or("no such shader")?;
                match stage {
                    ShaderStage::Vertex => outputs.extend(declared(source, "out ")),
                    ShaderStage::Fragment => inputs.extend(declared(source, "in ")),
                }
                uniforms.extend(declared(source, "uniform "));
            }
            if let Some(missing) = inputs.iter().find(|input| !outputs.contains(input)) {
                return Err(format!(
                    "error: fragment shader input `{}` has no matching vertex shader output\n",
                    missing
                ));
            }
            state.programs.insert(program, uniforms);
            Ok(())
        }

        fn delete_program(&self, program: u32) {
            let mut state = self.state.borrow_mut();
            state.programs.remove(&program);
            if state.current == Some(program) {
                state.current = None;
            }
        }

        fn use_program(&self, program: Option<u32>) {
            self.state.borrow_mut().current = program;
        }

        fn uniform_location(&self, program: u32, name: &str) -> Option<Location> {
            let state = self.state.borrow();
            let uniforms = state.programs.get(&program)?;
            uniforms.iter().any(|uniform| uniform == name).then(|| Location {
                program,
                name: name.to_string(),
            })
        }

        fn uniform_1_i32(&self, location: &Location, x: i32) {
            self.record(location, Value::Int(x));
        }

        fn uniform_1_f32(&self, location: &Location, x: f32) {
            self.record(location, Value::Float(x));
        }

        fn uniform_2_f32(&self, location: &Location, x: f32, y: f32) {
            self.record(location, Value::Floats(2, [x, y, 0.0, 0.0]));
        }

        fn uniform_3_f32(&self, location: &Location, x: f32, y: f32, z: f32) {
            self.record(location, Value::Floats(3, [x, y, z, 0.0]));
        }

        fn uniform_4_f32(&self, location: &Location, x: f32, y: f32, z: f32, w: f32) {
            self.record(location, Value::Floats(4, [x, y, z, w]));
        }

        fn uniform_matrix_4_f32(&self, location: &Location, data: &[f32; 16]) {
            self.record(location, Value::Matrix(*data));
        }
    }

    const VERT: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
out vec3 vertexColor;
void main()
{
    gl_Position = vec4(aPos, 1.0);
    vertexColor = vec3(1.0, 0.5, 0.2);
}
";

    const FRAG: &str = "#version 330 core
in vec3 vertexColor;
out vec4 FragColor;
uniform bool useColor;
uniform float alpha;
uniform vec4 tint;
void main()
{
    FragColor = vec4(vertexColor, alpha) * tint;
}
";

    fn gl() -> Arc<FakeGl> {
        Arc::new(FakeGl::default())
    }

    #[test]
    fn valid_pair_links_and_releases_stages() {
        let gl = gl();
        let program = ShaderProgram::from_sources(&gl, VERT, FRAG).unwrap();
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 1);

        program.use_program();
        assert_eq!(gl.current(), Some(program.id()));

        drop(program);
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.current(), None);
    }

    #[test]
    fn fragment_typo_names_fragment_stage() {
        let gl = gl();
        let broken = FRAG.replace("void main", "oid main");
        match ShaderProgram::from_sources(&gl, VERT, &broken) {
            Err(ShaderError::Compile { stage, log }) => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(log.contains("oid main"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("broken fragment shader compiled"),
        }
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn vertex_syntax_error_names_vertex_stage() {
        let gl = gl();
        let broken = VERT.replace("void main", "oid main");
        let err = ShaderProgram::from_sources(&gl, &broken, FRAG).err().unwrap();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Vertex, .. }));
        assert!(err.to_string().starts_with("vertex shader compilation failed"));
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn mismatched_interface_fails_to_link_without_leaks() {
        let gl = gl();
        let frag = FRAG.replace("in vec3 vertexColor;", "in vec3 vertexColour;");
        let err = ShaderProgram::from_sources(&gl, VERT, &frag).err().unwrap();
        match err {
            ShaderError::Link { log } => assert!(log.contains("vertexColour")),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn unknown_uniform_is_ignored() {
        let gl = gl();
        let program = ShaderProgram::from_sources(&gl, VERT, FRAG).unwrap();
        program.use_program();
        program.set_uniform("doesNotExist", 1.0f32);
        program.set_uniform("", 3);
        assert!(gl.uploads().is_empty());
        assert!(!program.has_uniform("doesNotExist"));
        assert!(program.has_uniform("alpha"));
    }

    #[test]
    fn bool_and_int_upload_the_same_value() {
        let gl = gl();
        let program = ShaderProgram::from_sources(&gl, VERT, FRAG).unwrap();
        program.use_program();
        program.set_uniform("useColor", true);
        program.set_uniform("useColor", 1);
        program.set_uniform("useColor", false);

        let uploads = gl.uploads();
        assert_eq!(uploads.len(), 3);
        assert_eq!(uploads[0].2, uploads[1].2);
        assert_eq!(uploads[2].2, Value::Int(0));
    }

    #[test]
    fn vector_and_float_uniforms() {
        let gl = gl();
        let program = ShaderProgram::from_sources(&gl, VERT, FRAG).unwrap();
        program.use_program();
        program.set_uniform("alpha", 0.5f32);
        program.set_uniform("tint", &Vec4::new(0.0, 1.0, 0.0, 1.0));

        let uploads = gl.uploads();
        assert_eq!(uploads[0], (program.id(), "alpha".to_string(), Value::Float(0.5)));
        assert_eq!(uploads[1].2, Value::Floats(4, [0.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn missing_file_reports_path_before_touching_context() {
        let gl = gl();
        let missing = Path::new("definitely/not/here.fs");
        let err = ShaderProgram::from_files(&gl, missing, missing).err().unwrap();
        match &err {
            ShaderError::FileRead { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains("here.fs"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn set_uniform_targets_its_own_program() {
        let gl = gl();
        let a = ShaderProgram::from_sources(&gl, VERT, FRAG).unwrap();
        let b = ShaderProgram::from_sources(&gl, VERT, FRAG).unwrap();
        a.use_program();
        b.set_uniform("alpha", 0.5f32);

        let uploads = gl.uploads();
        assert_eq!(uploads, vec![(b.id(), "alpha".to_string(), Value::Float(0.5))]);
        assert_eq!(gl.current(), Some(b.id()));
    }

    #[test]
    fn unknown_uniform_leaves_current_program_alone() {
        let gl = gl();
        let a = ShaderProgram::from_sources(&gl, VERT, FRAG).unwrap();
        let b = ShaderProgram::from_sources(&gl, VERT, FRAG).unwrap();
        a.use_program();
        b.set_uniform("doesNotExist", 1);
        assert_eq!(gl.current(), Some(a.id()));
    }

    #[test]
    fn program_creation_failure_releases_stages() {
        let gl = gl();
        gl.refuse_programs();
        let err = ShaderProgram::from_sources(&gl, VERT, FRAG).err().unwrap();
        match err {
            ShaderError::Link { log } => assert!(log.contains("out of program objects")),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn stage_display_and_enum() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
        assert_eq!(ShaderStage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
    }
}
