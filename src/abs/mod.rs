//! This module contains the owning wrappers around OpenGL objects,
//! including application setup, shader management, meshes and textures.

pub mod app;
pub mod backend;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use backend::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
