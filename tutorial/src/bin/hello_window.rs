use std::process::ExitCode;
use tutorial::hello_window::HelloWindow;

fn main() -> ExitCode {
    tutorial::launch(HelloWindow::default())
}
