use std::fmt;

/// Failures raised while bringing up the window and GL context, or while
/// uploading vertex data.
#[derive(Debug)]
pub enum BackendError {
    /// SDL itself or one of its subsystems failed to initialize.
    Sdl(String),
    /// The OpenGL window could not be built.
    Window(String),
    /// The GL context could not be created or made current.
    GlContext(String),
    /// Function pointers were not resolved by the loader.
    GlLoader(&'static str),
    /// Vertex data does not match its layout.
    VertexData { len: usize, stride: usize },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Sdl(e) => write!(f, "SDL initialization failed: {e}"),
            BackendError::Window(e) => write!(f, "error while building OpenGL window: {e}"),
            BackendError::GlContext(e) => write!(f, "error while creating GL context: {e}"),
            BackendError::GlLoader(name) => {
                write!(f, "failed to load OpenGL function pointers ({name} missing)")
            }
            BackendError::VertexData { len, stride } => write!(
                f,
                "vertex data of {len} floats is not a multiple of the stride ({stride} floats)"
            ),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<sdl2::video::WindowBuildError> for BackendError {
    fn from(e: sdl2::video::WindowBuildError) -> Self {
        BackendError::Window(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_error_names_missing_function() {
        let e = BackendError::GlLoader("glCreateShader");
        assert_eq!(
            e.to_string(),
            "failed to load OpenGL function pointers (glCreateShader missing)"
        );
    }

    #[test]
    fn vertex_data_error_reports_sizes() {
        let e = BackendError::VertexData { len: 10, stride: 6 };
        assert!(e.to_string().contains("10 floats"));
        assert!(e.to_string().contains("6 floats"));
    }
}
