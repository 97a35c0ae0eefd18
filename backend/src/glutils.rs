use gl::{types::*, *};
use std::ffi::{c_char, CStr};

/// Returns the oldest pending GL error, if any.
pub fn gl_error() -> Option<GLenum> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        None
    } else {
        Some(err)
    }
}

pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

/// Drains the GL error queue, logging every entry. Returns false if
/// anything was pending.
pub fn check_gl_err(context: &str) -> bool {
    let mut clean = true;
    while let Some(err) = gl_error() {
        log::error!("{context}: {} (0x{err:04x})", gl_error_name(err));
        clean = false;
    }
    clean
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unavailable>".to_string();
    }
    unsafe { CStr::from_ptr(ptr as *const c_char) }
        .to_string_lossy()
        .into_owned()
}

pub fn print_opengl_info() {
    log::info!("GL_VENDOR = {}", gl_string(VENDOR));
    log::info!("GL_RENDERER = {}", gl_string(RENDERER));
    log::info!("GL_VERSION = {}", gl_string(VERSION));
    log::info!("GL_SHADING_LANGUAGE_VERSION = {}", gl_string(SHADING_LANGUAGE_VERSION));

    let mut attribs: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_VERTEX_ATTRIBS, &mut attribs) };
    log::info!("MAX_VERTEX_ATTRIBS = {}", attribs);
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

/// Points attribute `index` at `size` floats, `stride` and `offset` given
/// in floats, and enables it.
pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: usize, offset: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride * std::mem::size_of::<f32>()) as i32,
            (offset * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_error_codes() {
        assert_eq!(gl_error_name(gl::INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(gl_error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(gl_error_name(0xdead), "unknown GL error");
    }
}
