//! Shaders loaded from disk, with a color per vertex interpolated across
//! the triangle.

use crate::{resolve_asset, FrameInfo, Lesson, ShadedTriangle};
use anyhow::Context;
use backend::config::AppConfig;
use backend::mesh::{POSITION_COLOR, TRIANGLE_COLORED};
use backend::ShaderProgram;
use std::path::Path;

#[derive(Default)]
pub struct ShaderFiles {
    triangle: Option<ShadedTriangle>,
}

impl Lesson for ShaderFiles {
    fn name(&self) -> &'static str {
        "shader_files"
    }

    fn clear_color(&self) -> [f32; 3] {
        [0.2, 0.3, 0.3]
    }

    fn setup(&mut self, config: &AppConfig) -> anyhow::Result<()> {
        let vertex = resolve_asset(Path::new(&config.shaders.vertex));
        let fragment = resolve_asset(Path::new(&config.shaders.fragment));
        log::info!("loading shaders {} and {}", vertex.display(), fragment.display());

        let program = ShaderProgram::from_files(&vertex, &fragment)
            .with_context(|| format!("building program from {}", vertex.display()))?;
        self.triangle = Some(ShadedTriangle::new(
            program,
            &TRIANGLE_COLORED,
            &POSITION_COLOR,
        )?);
        Ok(())
    }

    fn render(&mut self, _frame: &FrameInfo) -> anyhow::Result<()> {
        if let Some(triangle) = &self.triangle {
            triangle.draw();
        }
        Ok(())
    }
}
