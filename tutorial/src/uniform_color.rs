//! The fragment color comes from a uniform whose green channel pulses
//! over time.

use crate::hello_triangle::VERTEX_SHADER_SRC;
use crate::{FrameInfo, Lesson, ShadedTriangle};
use anyhow::Context;
use backend::config::AppConfig;
use backend::mesh::{POSITION_ONLY, TRIANGLE_POSITIONS};
use backend::ShaderProgram;

pub const COLOR_UNIFORM: &str = "ourColor";

pub const UNIFORM_FRAG_SHADER_SRC: &str = "#version 330 core
out vec4 FragColor;
uniform vec4 ourColor;

void main()
{
    FragColor = ourColor;
}
";

/// Green intensity in [0, 1] at `time` seconds.
pub fn pulse_green(time: f32) -> f32 {
    time.sin() / 2.0 + 0.5
}

#[derive(Default)]
pub struct UniformColor {
    triangle: Option<ShadedTriangle>,
}

impl Lesson for UniformColor {
    fn name(&self) -> &'static str {
        "uniform_color"
    }

    fn clear_color(&self) -> [f32; 3] {
        [0.2, 0.3, 0.3]
    }

    fn setup(&mut self, _config: &AppConfig) -> anyhow::Result<()> {
        let program = ShaderProgram::from_str(VERTEX_SHADER_SRC, UNIFORM_FRAG_SHADER_SRC)
            .context("building the uniform color program")?;
        self.triangle = Some(ShadedTriangle::new(
            program,
            &TRIANGLE_POSITIONS,
            &POSITION_ONLY,
        )?);
        Ok(())
    }

    fn render(&mut self, frame: &FrameInfo) -> anyhow::Result<()> {
        let Some(triangle) = &self.triangle else {
            return Ok(());
        };
        // uniforms apply to the program in use
        triangle.program.use_program();
        triangle
            .program
            .set_vec4(COLOR_UNIFORM, 0.0, pulse_green(frame.time), 0.0, 1.0)?;
        triangle.draw();
        Ok(())
    }
}
