//! The LearnOpenGL "getting started" lessons: each one is a binary under
//! `src/bin/` that hands a [`Lesson`] to [`run`].

use anyhow::Context;
use backend::config::AppConfig;
use backend::glutils;
use backend::logging::{init_logging, LoggingConfig};
use backend::mesh::{VertexArray, VertexLayout};
use backend::{ShaderError, ShaderProgram, System};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

pub mod hello_triangle;
pub mod hello_window;
pub mod shader_files;
pub mod uniform_color;

pub const CONFIG_DIR: &str = "config";

pub struct FrameInfo {
    /// Seconds since the window was opened.
    pub time: f32,
    pub frame: u64,
}

pub trait Lesson {
    fn name(&self) -> &'static str;

    fn clear_color(&self) -> [f32; 3];

    /// Called once the GL context is current.
    fn setup(&mut self, _config: &AppConfig) -> anyhow::Result<()> {
        Ok(())
    }

    fn render(&mut self, frame: &FrameInfo) -> anyhow::Result<()>;
}

/// A linked program and the triangle it draws.
pub struct ShadedTriangle {
    pub program: ShaderProgram,
    pub vertices: VertexArray,
}

impl ShadedTriangle {
    pub fn new(
        program: ShaderProgram,
        data: &[f32],
        layout: &VertexLayout,
    ) -> anyhow::Result<ShadedTriangle> {
        let vertices = VertexArray::new(data, layout).context("uploading triangle vertices")?;
        Ok(ShadedTriangle { program, vertices })
    }

    pub fn draw(&self) {
        self.program.use_program();
        self.vertices.draw();
    }
}

/// Paths are tried as given first (relative to the working directory),
/// then relative to this crate, so lessons also start from the workspace root.
pub fn resolve_asset(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let in_crate = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    if in_crate.exists() {
        in_crate
    } else {
        path.to_path_buf()
    }
}

fn load_config() -> AppConfig {
    let dir = resolve_asset(Path::new(CONFIG_DIR));
    match AppConfig::load_from(&dir) {
        Ok(config) => {
            init_logging(LoggingConfig::from(&config.logging));
            config
        }
        Err(e) => {
            init_logging(LoggingConfig::default());
            log::warn!("failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    }
}

/// Opens the window, sets the lesson up and renders it until the window is
/// closed or Escape is pressed.
pub fn run<L: Lesson>(lesson: L) -> anyhow::Result<()> {
    let config = load_config();
    log::info!("starting lesson '{}'", lesson.name());

    let mut system =
        System::new(&config.window, &config.gl).context("lesson initialization failure")?;
    glutils::print_opengl_info();

    // the lesson owns GL objects, so it must be gone before the context
    drive(&mut system, lesson, &config)
}

/// Entry point for the lesson binaries: runs the lesson and turns a failure
/// into a single log line and a non-zero exit status.
pub fn launch<L: Lesson>(lesson: L) -> ExitCode {
    match run(lesson) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", exit_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// Shader failures are already logged with their stage and info log by the
/// backend, so only the outer context is repeated for them.
pub fn exit_message(err: &anyhow::Error) -> String {
    if err.chain().any(|cause| cause.is::<ShaderError>()) {
        format!("{err}")
    } else {
        format!("{err:#}")
    }
}

fn drive<L: Lesson>(
    system: &mut System,
    mut lesson: L,
    config: &AppConfig,
) -> anyhow::Result<()> {
    lesson
        .setup(config)
        .with_context(|| format!("setting up lesson '{}'", lesson.name()))?;
    glutils::check_gl_err("lesson setup");

    let [r, g, b] = lesson.clear_color();
    let mut frame = 0u64;
    while system.process_io_events() {
        system.clear_screen(r, g, b);
        lesson.render(&FrameInfo {
            time: system.elapsed_secs(),
            frame,
        })?;
        system.draw_to_screen();
        frame += 1;
    }

    let (w, h) = system.size();
    log::info!(
        "lesson '{}' finished after {} frames at {}x{}",
        lesson.name(),
        frame,
        w,
        h
    );
    Ok(())
}
