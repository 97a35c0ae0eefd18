use super::glutils::*;
use gl::{types::*, *};
use std::ffi::{CStr, CString};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const INFO_LOG_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    fn gl_type(self) -> GLenum {
        match self {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
            ShaderStage::Geometry => GEOMETRY_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
            ShaderStage::Geometry => "GEOMETRY",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub enum ShaderError {
    Read { path: PathBuf, source: io::Error },
    CreateShader(ShaderStage),
    CreateProgram,
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
    InvalidName(String),
    /// The name is not an active uniform of the program.
    Uniform { program: u32, name: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Read { path, source } => {
                write!(f, "error reading {}: {}", path.display(), source)
            }
            ShaderError::CreateShader(stage) => {
                write!(f, "gl::CreateShader({stage}) failed")
            }
            ShaderError::CreateProgram => f.write_str("gl::CreateProgram failed"),
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader compilation error: {}", log.trim_end())
            }
            ShaderError::Link { log } => write!(f, "PROGRAM link error: {}", log.trim_end()),
            ShaderError::InvalidName(name) => {
                write!(f, "uniform name {name:?} contains an interior NUL byte")
            }
            ShaderError::Uniform { program, name } => write!(
                f,
                "program({program}): '{name}' does not correspond to an active uniform variable"
            ),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn report(e: ShaderError) -> ShaderError {
    log::error!("{e}");
    e
}

pub fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// A compiled stage, deleted once it goes out of scope. A program keeps
/// its own reference to attached stages, so this is safe after linking.
struct StageObject(u32);

impl Drop for StageObject {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.0) };
    }
}

fn info_log(
    id: u32,
    getter: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
) -> String {
    let mut v = vec![0u8; INFO_LOG_CAPACITY];
    let mut log_len = 0_i32;
    unsafe {
        getter(
            id,
            INFO_LOG_CAPACITY as GLsizei,
            &mut log_len,
            v.as_mut_ptr().cast(),
        )
    };
    v.truncate(log_len.clamp(0, INFO_LOG_CAPACITY as i32) as usize);
    String::from_utf8_lossy(&v).into_owned()
}

/// A linked GL program. The handle is released on drop.
#[derive(Debug)]
pub struct ShaderProgram {
    program_id: u32,
}

impl ShaderProgram {
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        vertex_file: P,
        fragment_file: Q,
    ) -> Result<ShaderProgram, ShaderError> {
        Self::from_files_full(vertex_file.as_ref(), fragment_file.as_ref(), None)
    }

    /// Reads every source before touching GL, so a missing file never
    /// leaves half-built objects behind.
    pub fn from_files_full(
        vertex_file: &Path,
        fragment_file: &Path,
        geometry_file: Option<&Path>,
    ) -> Result<ShaderProgram, ShaderError> {
        let vertex_code = read_source(vertex_file).map_err(report)?;
        let fragment_code = read_source(fragment_file).map_err(report)?;
        let geometry_code = geometry_file
            .map(read_source)
            .transpose()
            .map_err(report)?;

        log::debug!(
            "building program from {} and {}",
            vertex_file.display(),
            fragment_file.display()
        );
        Self::from_str_full(&vertex_code, &fragment_code, geometry_code.as_deref())
    }

    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<ShaderProgram, ShaderError> {
        Self::from_str_full(vertex_code, fragment_code, None)
    }

    pub fn from_str_full(
        vertex_code: &str,
        fragment_code: &str,
        geometry_code: Option<&str>,
    ) -> Result<ShaderProgram, ShaderError> {
        Self::build(vertex_code, fragment_code, geometry_code).map_err(report)
    }

    fn build(
        vertex_code: &str,
        fragment_code: &str,
        geometry_code: Option<&str>,
    ) -> Result<ShaderProgram, ShaderError> {
        let vertex = Self::compile(ShaderStage::Vertex, vertex_code)?;
        let fragment = Self::compile(ShaderStage::Fragment, fragment_code)?;
        let geometry = match geometry_code {
            Some(code) => Some(Self::compile(ShaderStage::Geometry, code)?),
            None => None,
        };

        let shader_program = unsafe { gl::CreateProgram() };
        if shader_program == 0 {
            return Err(ShaderError::CreateProgram);
        }
        // from here on the program is released if linking fails
        let program = ShaderProgram {
            program_id: shader_program,
        };

        unsafe { gl::AttachShader(shader_program, vertex.0) };
        unsafe { gl::AttachShader(shader_program, fragment.0) };
        if let Some(geometry) = &geometry {
            unsafe { gl::AttachShader(shader_program, geometry.0) };
        }

        unsafe { gl::LinkProgram(shader_program) };

        let mut success = 0;
        unsafe { gl::GetProgramiv(shader_program, LINK_STATUS, &mut success) };
        if success == 0 {
            return Err(ShaderError::Link {
                log: info_log(shader_program, gl::GetProgramInfoLog),
            });
        }

        log::debug!("linked program {}", shader_program);
        Ok(program)
    }

    fn compile(stage: ShaderStage, shader_code: &str) -> Result<StageObject, ShaderError> {
        let shader_id = unsafe { gl::CreateShader(stage.gl_type()) };
        if shader_id == 0 {
            return Err(ShaderError::CreateShader(stage));
        }
        let shader = StageObject(shader_id);

        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_ptr().cast()),
                &(shader_code.len() as GLint),
            );
        }

        unsafe { gl::CompileShader(shader_id) };

        let mut success = 0;
        unsafe { gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success) };
        if success == 0 {
            return Err(ShaderError::Compile {
                stage,
                log: info_log(shader_id, gl::GetShaderInfoLog),
            });
        }
        Ok(shader)
    }

    pub fn id(&self) -> u32 {
        self.program_id
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
        check_gl_err("use_program");
    }

    fn uniform_location(&self, name: &str) -> Result<Option<i32>, ShaderError> {
        let c_name =
            CString::new(name).map_err(|_| ShaderError::InvalidName(name.to_string()))?;
        Ok(self.uniform_location_cstr(&c_name))
    }

    fn uniform_location_cstr(&self, c_name: &CStr) -> Option<i32> {
        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr()) };
        (location != -1).then_some(location)
    }

    /// Every setter funnels through here so GL errors are checked uniformly.
    fn set_uniform(&self, name: &str, apply: impl FnOnce(i32)) -> Result<(), ShaderError> {
        let location = self.uniform_location(name)?.ok_or_else(|| ShaderError::Uniform {
            program: self.program_id,
            name: name.to_string(),
        })?;
        apply(location);
        check_gl_err(name);
        Ok(())
    }

    fn try_set_uniform(&self, name: &str, apply: impl FnOnce(i32)) {
        if let Ok(Some(location)) = self.uniform_location(name) {
            apply(location);
            check_gl_err(name);
        }
    }

    pub fn set_bool(&self, name: &str, value: bool) -> Result<(), ShaderError> {
        self.set_uniform(name, |location| unsafe {
            gl::Uniform1i(location, i32::from(value))
        })
    }

    pub fn set_i32(&self, name: &str, value: i32) -> Result<(), ShaderError> {
        self.set_uniform(name, |location| unsafe { gl::Uniform1i(location, value) })
    }

    pub fn try_set_i32(&self, name: &str, value: i32) {
        self.try_set_uniform(name, |location| unsafe { gl::Uniform1i(location, value) })
    }

    pub fn set_f32(&self, name: &str, value: f32) -> Result<(), ShaderError> {
        self.set_uniform(name, |location| unsafe { gl::Uniform1f(location, value) })
    }

    pub fn try_set_f32(&self, name: &str, value: f32) {
        self.try_set_uniform(name, |location| unsafe { gl::Uniform1f(location, value) })
    }

    pub fn set_vec3(&self, name: &str, v0: f32, v1: f32, v2: f32) -> Result<(), ShaderError> {
        self.set_uniform(name, |location| unsafe { gl::Uniform3f(location, v0, v1, v2) })
    }

    pub fn set_vec4(
        &self,
        name: &str,
        v0: f32,
        v1: f32,
        v2: f32,
        v3: f32,
    ) -> Result<(), ShaderError> {
        self.set_uniform(name, |location| unsafe {
            gl::Uniform4f(location, v0, v1, v2, v3)
        })
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("backend-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "VERTEX");
        assert_eq!(ShaderStage::Fragment.to_string(), "FRAGMENT");
        assert_eq!(ShaderStage::Geometry.to_string(), "GEOMETRY");
    }

    #[test]
    fn missing_vertex_file_is_reported_before_gl() {
        let err = ShaderProgram::from_files("no/such/shader.vs", "no/such/shader.fs").unwrap_err();
        match err {
            ShaderError::Read { path, source } => {
                assert_eq!(path, PathBuf::from("no/such/shader.vs"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_fragment_file_names_fragment_path() {
        let vs = temp_file("only.vs", "#version 330 core\nvoid main() {}\n");
        let err = ShaderProgram::from_files(&vs, "no/such/shader.fs").unwrap_err();
        fs::remove_file(&vs).unwrap();
        assert!(err.to_string().starts_with("error reading no/such/shader.fs"));
    }

    #[test]
    fn missing_geometry_file_is_an_error() {
        let vs = temp_file("geo.vs", "void main() {}");
        let fs_path = temp_file("geo.fs", "void main() {}");
        let err = ShaderProgram::from_files_full(&vs, &fs_path, Some(Path::new("no/such.gs")))
            .unwrap_err();
        fs::remove_file(&vs).unwrap();
        fs::remove_file(&fs_path).unwrap();
        assert!(matches!(err, ShaderError::Read { .. }));
    }

    #[test]
    fn read_source_returns_contents() {
        let path = temp_file("plain.fs", "out vec4 FragColor;");
        assert_eq!(read_source(&path).unwrap(), "out vec4 FragColor;");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn nul_in_uniform_name_is_rejected_before_gl() {
        let program = ShaderProgram { program_id: 7 };
        let err = program.set_f32("bad\0name", 1.0).unwrap_err();
        assert!(matches!(err, ShaderError::InvalidName(ref n) if n == "bad\0name"));
        assert!(matches!(
            program.set_bool("also\0bad", true),
            Err(ShaderError::InvalidName(_))
        ));
        for result in [
            program.set_i32("i\0", 1),
            program.set_vec3("v3\0", 0.0, 0.0, 0.0),
            program.set_vec4("v4\0", 0.0, 0.0, 0.0, 1.0),
        ] {
            assert!(matches!(result, Err(ShaderError::InvalidName(_))));
        }
        // lenient setters swallow it
        program.try_set_i32("bad\0name", 3);
        program.try_set_f32("bad\0name", 3.0);
        // no context here, so skip the DeleteProgram in Drop
        std::mem::forget(program);
    }

    #[test]
    fn compile_error_message_names_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "FRAGMENT shader compilation error: 0:3(1): error: syntax error"
        );
        let err = ShaderError::Link {
            log: "undefined varying".to_string(),
        };
        assert_eq!(err.to_string(), "PROGRAM link error: undefined varying");
    }
}
