use std::process::ExitCode;
use tutorial::uniform_color::UniformColor;

fn main() -> ExitCode {
    tutorial::launch(UniformColor::default())
}
