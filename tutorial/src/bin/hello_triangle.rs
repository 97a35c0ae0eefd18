use std::process::ExitCode;
use tutorial::hello_triangle::HelloTriangle;

fn main() -> ExitCode {
    tutorial::launch(HelloTriangle::default())
}
