//! Static mesh data and GPU upload
//!
//! [`MeshData`] is plain CPU-side geometry: flat xyz positions and triangle
//! indices. [`Mesh`] is the uploaded form, a VAO with one position buffer
//! bound to attribute 0 and an element buffer. It is drawn with a single
//! `glDrawElements` call and released on drop.

use crate::render::shader::POSITION_ATTRIBUTE;
use gl::types::{GLsizei, GLsizeiptr, GLuint};
use thiserror::Error;

/// Mesh validation and upload errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// No positions or no indices
    #[error("Mesh has no vertices or no indices")]
    Empty,

    /// Position array length is not a multiple of 3
    #[error("Position array length {0} is not a multiple of 3")]
    MalformedPositions(usize),

    /// Index references a vertex that does not exist
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// Mesh is too large for a single GL draw call
    #[error("Mesh too large to upload: {0} bytes")]
    TooLarge(usize),

    /// GL returned a zero name for a buffer or vertex array
    #[error("Could not create GL {0}")]
    BufferCreation(&'static str),
}

/// CPU-side indexed triangle geometry
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Flat xyz positions
    pub positions: Vec<f32>,
    /// Triangle list indices into `positions`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create mesh data without validating it
    pub fn new(positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Axis-aligned unit cube centred on the origin
    ///
    /// Eight shared corners, two triangles per face.
    pub fn cube() -> Self {
        #[rustfmt::skip]
        let positions = vec![
            -0.5,  0.5,  0.5, // V0
            -0.5, -0.5,  0.5, // V1
             0.5, -0.5,  0.5, // V2
             0.5,  0.5,  0.5, // V3
            -0.5,  0.5, -0.5, // V4
             0.5,  0.5, -0.5, // V5
            -0.5, -0.5, -0.5, // V6
             0.5, -0.5, -0.5, // V7
        ];

        let indices = vec![
            0, 1, 3, 3, 1, 2, // Front face
            4, 0, 5, 5, 0, 3, // Top face
            3, 2, 5, 5, 2, 7, // Right face
            4, 6, 0, 0, 6, 1, // Left face
            1, 6, 2, 2, 6, 7, // Bottom face
            4, 5, 6, 6, 5, 7, // Back face
        ];

        Self { positions, indices }
    }

    /// Number of vertices described by `positions`
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Check the data is drawable
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.is_empty() || self.indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.positions.len() % 3 != 0 {
            return Err(MeshError::MalformedPositions(self.positions.len()));
        }

        let vertex_count = self.vertex_count();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange { index, vertex_count });
        }
        Ok(())
    }
}

/// Uploaded static mesh
pub struct Mesh {
    vao: GLuint,
    vertex_buffer: GLuint,
    index_buffer: GLuint,
    index_count: GLsizei,
}

impl Mesh {
    /// Validate `data` and upload it into new GL buffers
    ///
    /// Requires a current GL context.
    pub fn upload(data: &MeshData) -> Result<Self, MeshError> {
        data.validate()?;

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&data.positions);
        let index_bytes: &[u8] = bytemuck::cast_slice(&data.indices);
        let vertex_size = byte_size(vertex_bytes.len())?;
        let index_size = byte_size(index_bytes.len())?;
        let index_count = GLsizei::try_from(data.indices.len())
            .map_err(|_| MeshError::TooLarge(index_bytes.len()))?;

        let mut mesh = Self {
            vao: 0,
            vertex_buffer: 0,
            index_buffer: 0,
            index_count,
        };

        unsafe {
            gl::GenVertexArrays(1, &mut mesh.vao);
            gl::GenBuffers(1, &mut mesh.vertex_buffer);
            gl::GenBuffers(1, &mut mesh.index_buffer);
        }
        // Drop releases whatever was created
        if mesh.vao == 0 {
            return Err(MeshError::BufferCreation("vertex array"));
        }
        if mesh.vertex_buffer == 0 || mesh.index_buffer == 0 {
            return Err(MeshError::BufferCreation("buffer"));
        }

        unsafe {
            gl::BindVertexArray(mesh.vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vertex_buffer);
            gl::BufferData(gl::ARRAY_BUFFER, vertex_size, vertex_bytes.as_ptr().cast(), gl::STATIC_DRAW);
            gl::VertexAttribPointer(POSITION_ATTRIBUTE, 3, gl::FLOAT, gl::FALSE, 0, std::ptr::null());
            gl::EnableVertexAttribArray(POSITION_ATTRIBUTE);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);

            // Element buffer binding is recorded in the VAO
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, mesh.index_buffer);
            gl::BufferData(gl::ELEMENT_ARRAY_BUFFER, index_size, index_bytes.as_ptr().cast(), gl::STATIC_DRAW);

            gl::BindVertexArray(0);
        }

        log::info!(
            "Uploaded mesh: {} vertices, {} indices (vao {})",
            data.vertex_count(), data.indices.len(), mesh.vao
        );
        Ok(mesh)
    }

    /// Number of indices drawn per call
    pub fn index_count(&self) -> usize {
        self.index_count as usize
    }

    /// Draw the mesh as a triangle list with the currently bound program
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(gl::TRIANGLES, self.index_count, gl::UNSIGNED_INT, std::ptr::null());
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::BindVertexArray(0);
            if self.index_buffer != 0 {
                gl::DeleteBuffers(1, &self.index_buffer);
            }
            if self.vertex_buffer != 0 {
                gl::DeleteBuffers(1, &self.vertex_buffer);
            }
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
            }
        }
        log::debug!("Mesh (vao {}) released", self.vao);
    }
}

fn byte_size(len: usize) -> Result<GLsizeiptr, MeshError> {
    GLsizeiptr::try_from(len).map_err(|_| MeshError::TooLarge(len))
}
