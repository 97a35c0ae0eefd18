//! Shader build failures must leave an `error` record behind.

use backend::ShaderProgram;
use log::{Level, Log, Metadata, Record};
use std::sync::{Mutex, Once};

struct Capture(Mutex<Vec<(Level, String)>>);

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.0
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));
static INSTALL: Once = Once::new();

fn errors_mentioning(needle: &str) -> usize {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURE
        .0
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, msg)| *level == Level::Error && msg.contains(needle))
        .count()
}

#[test]
fn unreadable_vertex_file_is_logged_once_at_error() {
    assert_eq!(errors_mentioning("missing/first.vs"), 0);
    let err = ShaderProgram::from_files("missing/first.vs", "missing/first.fs").unwrap_err();
    assert!(err.to_string().contains("missing/first.vs"));
    assert_eq!(errors_mentioning("error reading missing/first.vs"), 1);
}

#[test]
fn unreadable_geometry_file_is_logged_at_error() {
    let dir = std::env::temp_dir();
    let vs = dir.join(format!("diag-{}.vs", std::process::id()));
    let fs_path = dir.join(format!("diag-{}.fs", std::process::id()));
    std::fs::write(&vs, "void main() {}").unwrap();
    std::fs::write(&fs_path, "void main() {}").unwrap();

    assert_eq!(errors_mentioning("missing/second.gs"), 0);
    let result = ShaderProgram::from_files_full(
        &vs,
        &fs_path,
        Some(std::path::Path::new("missing/second.gs")),
    );
    std::fs::remove_file(&vs).unwrap();
    std::fs::remove_file(&fs_path).unwrap();

    assert!(result.is_err());
    assert_eq!(errors_mentioning("error reading missing/second.gs"), 1);
}
