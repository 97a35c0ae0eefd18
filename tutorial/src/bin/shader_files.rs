use std::process::ExitCode;
use tutorial::shader_files::ShaderFiles;

fn main() -> ExitCode {
    tutorial::launch(ShaderFiles::default())
}
