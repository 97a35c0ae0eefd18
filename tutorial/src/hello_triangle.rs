//! Inline shaders and a hard-coded fragment color.

use crate::{FrameInfo, Lesson, ShadedTriangle};
use anyhow::Context;
use backend::config::AppConfig;
use backend::mesh::{POSITION_ONLY, TRIANGLE_POSITIONS};
use backend::ShaderProgram;

pub const VERTEX_SHADER_SRC: &str = "#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

pub const ORANGE_FRAG_SHADER_SRC: &str = "#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

#[derive(Default)]
pub struct HelloTriangle {
    triangle: Option<ShadedTriangle>,
}

impl Lesson for HelloTriangle {
    fn name(&self) -> &'static str {
        "hello_triangle"
    }

    fn clear_color(&self) -> [f32; 3] {
        [0.2, 0.3, 0.3]
    }

    fn setup(&mut self, _config: &AppConfig) -> anyhow::Result<()> {
        let program = ShaderProgram::from_str(VERTEX_SHADER_SRC, ORANGE_FRAG_SHADER_SRC)
            .context("building the orange triangle program")?;
        self.triangle = Some(ShadedTriangle::new(
            program,
            &TRIANGLE_POSITIONS,
            &POSITION_ONLY,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_shader_reads_position_attribute() {
        assert!(VERTEX_SHADER_SRC.starts_with("#version 330 core"));
        assert!(VERTEX_SHADER_SRC.contains("layout (location = 0) in vec3 aPos"));
        assert_eq!(POSITION_ONLY.attributes[0].location, 0);
    }

    #[test]
    fn nothing_drawn_before_setup() {
        let mut lesson = HelloTriangle::default();
        lesson.render(&FrameInfo { time: 0.0, frame: 0 }).unwrap();
        assert!(lesson.triangle.is_none());
    }
}
