//! SDL2 + OpenGL backend shared by the tutorial lessons: window and context
//! bootstrap, shader program building, vertex buffers and configuration.

pub mod config;
pub mod error;
pub mod glutils;
pub mod logging;
pub mod mesh;
pub mod shaders;
pub mod system;

pub use config::AppConfig;
pub use error::BackendError;
pub use shaders::{ShaderError, ShaderProgram, ShaderStage};
pub use system::System;
