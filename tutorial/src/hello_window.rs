//! An empty window cleared to red every frame.

use crate::{FrameInfo, Lesson};

#[derive(Default)]
pub struct HelloWindow;

impl Lesson for HelloWindow {
    fn name(&self) -> &'static str {
        "hello_window"
    }

    fn clear_color(&self) -> [f32; 3] {
        [1.0, 0.0, 0.0]
    }

    fn render(&mut self, _frame: &FrameInfo) -> anyhow::Result<()> {
        Ok(())
    }
}
