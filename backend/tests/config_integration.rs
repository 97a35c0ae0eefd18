//! Configuration loading from files and environment variables.

use backend::config::AppConfig;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

fn config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("backend-config-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn env_overrides_window_size() {
    let dir = config_dir("env");
    std::env::set_var("LEARNGL_WINDOW__WIDTH", "1024");
    let config = AppConfig::load_from(&dir).unwrap();
    std::env::remove_var("LEARNGL_WINDOW__WIDTH");
    fs::remove_dir_all(&dir).unwrap();
    assert_eq!(config.window.width, 1024);
    assert_eq!(config.window.height, 600);
}

#[test]
#[serial]
fn user_file_overrides_default_file() {
    let dir = config_dir("layers");
    fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"Lesson\"\nwidth = 640\nheight = 480\nresizable = true\nvsync = true\n",
    )
    .unwrap();
    fs::write(dir.join("user.toml"), "[window]\nwidth = 1280\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.window.title, "Lesson");
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.window.height, 480);
}

#[test]
#[serial]
fn partial_sections_keep_defaults() {
    let dir = config_dir("partial");
    fs::write(dir.join("default.toml"), "[shaders]\nvertex = \"alt/basic.vs\"\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.shaders.vertex, "alt/basic.vs");
    assert_eq!(config.shaders.fragment, "resources/shaders/shader.fs");
    assert_eq!(config.gl.major, 3);
}

#[test]
#[serial]
fn malformed_value_is_an_error() {
    let dir = config_dir("bad");
    fs::write(dir.join("default.toml"), "[window]\nwidth = \"wide\"\n").unwrap();

    let result = AppConfig::load_from(&dir);
    fs::remove_dir_all(&dir).unwrap();

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("configuration error"));
}
