//! Vertex data for the lessons and the VAO/VBO pair that holds it on the GPU.

use super::error::BackendError;
use super::glutils::*;
use gl::*;

/// One float vector attribute bound to a shader `location`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: u32,
}

/// Interleaved float attributes, in buffer order.
#[derive(Debug, Clone, Copy)]
pub struct VertexLayout {
    pub attributes: &'static [VertexAttribute],
}

impl VertexLayout {
    /// Floats per vertex.
    pub fn stride(&self) -> usize {
        self.attributes.iter().map(|a| a.components as usize).sum()
    }

    pub fn stride_bytes(&self) -> usize {
        self.stride() * std::mem::size_of::<f32>()
    }

    /// Attributes paired with their offset (in floats) from the start of a vertex.
    pub fn offsets(&self) -> impl Iterator<Item = (VertexAttribute, usize)> + '_ {
        self.attributes.iter().scan(0usize, |offset, attr| {
            let current = *offset;
            *offset += attr.components as usize;
            Some((*attr, current))
        })
    }

    pub fn vertex_count(&self, data: &[f32]) -> Result<usize, BackendError> {
        let stride = self.stride();
        if stride == 0 || data.len() % stride != 0 {
            return Err(BackendError::VertexData {
                len: data.len(),
                stride,
            });
        }
        Ok(data.len() / stride)
    }
}

pub const POSITION_ONLY: VertexLayout = VertexLayout {
    attributes: &[VertexAttribute {
        location: 0,
        components: 3,
    }],
};

pub const POSITION_COLOR: VertexLayout = VertexLayout {
    attributes: &[
        VertexAttribute {
            location: 0,
            components: 3,
        },
        VertexAttribute {
            location: 1,
            components: 3,
        },
    ],
};

#[rustfmt::skip]
pub const TRIANGLE_POSITIONS: [f32; 9] = [
    -0.5, -0.5, 0.0, // left
     0.5, -0.5, 0.0, // right
     0.0,  0.5, 0.0, // top
];

#[rustfmt::skip]
pub const TRIANGLE_COLORED: [f32; 18] = [
    // positions       colors
     0.5, -0.5, 0.0,   1.0, 0.0, 0.0, // bottom right
    -0.5, -0.5, 0.0,   0.0, 1.0, 0.0, // bottom left
     0.0,  0.5, 0.0,   0.0, 0.0, 1.0, // top
];

/// Static vertex data uploaded once. Both GL objects are deleted on drop.
#[derive(Debug)]
pub struct VertexArray {
    vao: u32,
    vbo: u32,
    count: i32,
}

impl VertexArray {
    pub fn new(data: &[f32], layout: &VertexLayout) -> Result<VertexArray, BackendError> {
        let count = layout.vertex_count(data)?;

        let mut vao = 0;
        let mut vbo = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        unsafe { gl::GenBuffers(1, &mut vbo) };

        // the VAO records the buffer binding and attribute setup below
        unsafe { gl::BindVertexArray(vao) };
        unsafe { gl::BindBuffer(ARRAY_BUFFER, vbo) };
        gl_buffer_data_arr_stat(data);

        let stride = layout.stride();
        for (attr, offset) in layout.offsets() {
            gl_vertex_attrib_ptr_enab(attr.location, attr.components, stride, offset);
        }

        unsafe { gl::BindBuffer(ARRAY_BUFFER, 0) };
        unsafe { gl::BindVertexArray(0) };
        check_gl_err("VertexArray::new");

        log::debug!("uploaded {} vertices (vao {}, vbo {})", count, vao, vbo);
        Ok(VertexArray {
            vao,
            vbo,
            count: count as i32,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.count as usize
    }

    pub fn draw(&self) {
        unsafe { gl::BindVertexArray(self.vao) };
        unsafe { gl::DrawArrays(TRIANGLES, 0, self.count) };
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.vao) };
        unsafe { gl::DeleteBuffers(1, &self.vbo) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_color_is_interleaved() {
        assert_eq!(POSITION_COLOR.stride(), 6);
        assert_eq!(POSITION_COLOR.stride_bytes(), 24);
        let offsets: Vec<(u32, usize)> = POSITION_COLOR
            .offsets()
            .map(|(attr, offset)| (attr.location, offset))
            .collect();
        assert_eq!(offsets, vec![(0, 0), (1, 3)]);
    }

    #[test]
    fn triangles_have_three_vertices() {
        assert_eq!(POSITION_ONLY.vertex_count(&TRIANGLE_POSITIONS).unwrap(), 3);
        assert_eq!(POSITION_COLOR.vertex_count(&TRIANGLE_COLORED).unwrap(), 3);
    }

    #[test]
    fn ragged_data_is_rejected() {
        let err = POSITION_COLOR.vertex_count(&TRIANGLE_POSITIONS).unwrap_err();
        assert!(matches!(err, BackendError::VertexData { len: 9, stride: 6 }));
    }

    #[test]
    fn empty_layout_is_rejected() {
        let layout = VertexLayout { attributes: &[] };
        assert!(layout.vertex_count(&[]).is_err());
    }

    #[test]
    fn colored_triangle_vertices_are_primary_colors() {
        let colors: Vec<[f32; 3]> = TRIANGLE_COLORED
            .chunks(6)
            .map(|v| [v[3], v[4], v[5]])
            .collect();
        assert_eq!(colors, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }
}
