//! OpenGL lessons built on a small set of owning wrappers around driver objects.
//!
//! The [`abs`] module holds the wrappers ([`abs::ShaderProgram`], [`abs::Mesh`],
//! [`abs::Texture`], [`abs::App`]); [`lessons`] holds the programs that use them.

pub mod abs;
pub mod config;
pub mod lessons;
pub mod logging;
