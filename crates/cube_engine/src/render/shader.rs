//! GLSL shader loading, compilation and program management
//!
//! [`ShaderSources`] reads the two source files from disk, which needs no GL
//! context. [`ShaderProgram`] compiles and links them and releases the program
//! object on drop.
//!
//! Uniform locations are looked up once per name and cached. A name the
//! linker optimised away (or that never existed) logs a single warning and is
//! skipped from then on.

use crate::config::ShaderConfig;
use crate::foundation::math::Mat4;
use crate::render::uniforms::MatrixUniforms;
use gl::types::{GLchar, GLenum, GLint, GLuint};
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Vertex attribute slot the position stream is bound to
pub const POSITION_ATTRIBUTE: GLuint = 0;

/// Shader errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// Source file does not exist
    #[error("Could not find shader source: {path}")]
    SourceNotFound {
        /// Path that was tried
        path: String,
    },

    /// Source file exists but could not be read
    #[error("Could not read shader source {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Source contains an interior NUL byte
    #[error("{stage} shader source contains a NUL byte")]
    InvalidSource {
        /// Stage the source belongs to
        stage: ShaderStage,
    },

    /// `glCreateProgram` returned 0
    #[error("Could not create shader program")]
    ProgramCreation,

    /// `glCreateShader` returned 0
    #[error("Error creating {stage} shader")]
    StageCreation {
        /// Stage that failed
        stage: ShaderStage,
    },

    /// Compiler rejected a stage
    #[error("Error compiling {stage} shader: {log}")]
    Compile {
        /// Stage that failed
        stage: ShaderStage,
        /// Compiler info log
        log: String,
    },

    /// Linker rejected the program
    #[error("Error linking shader program: {log}")]
    Link {
        /// Linker info log
        log: String,
    },
}

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Vertex and fragment GLSL sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

impl ShaderSources {
    /// Read both stages from the paths in `config`
    pub fn load(config: &ShaderConfig) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_source(&config.vertex_shader_path)?,
            fragment: read_source(&config.fragment_shader_path)?,
        })
    }
}

fn read_source(path: &str) -> Result<String, ShaderError> {
    if !Path::new(path).exists() {
        return Err(ShaderError::SourceNotFound { path: path.to_string() });
    }
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_string(),
        source,
    })?;
    log::debug!("Read shader source {} ({} bytes)", path, source.len());
    Ok(source)
}

/// Linked GL shader program
pub struct ShaderProgram {
    program_id: GLuint,
    uniform_locations: HashMap<String, Option<GLint>>,
}

impl ShaderProgram {
    /// Compile and link a program from loaded sources
    pub fn from_sources(sources: &ShaderSources) -> Result<Self, ShaderError> {
        Self::new(&sources.vertex, &sources.fragment)
    }

    /// Compile both stages and link them into a program
    ///
    /// Requires a current GL context.
    pub fn new(vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        let program_id = unsafe { gl::CreateProgram() };
        if program_id == 0 {
            return Err(ShaderError::ProgramCreation);
        }
        // Owns the id from here so every early return releases it
        let program = Self {
            program_id,
            uniform_locations: HashMap::new(),
        };

        let vertex = compile_stage(ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile_stage(ShaderStage::Fragment, fragment_source) {
            Ok(id) => id,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex) };
                return Err(e);
            }
        };

        let linked = unsafe {
            gl::AttachShader(program_id, vertex);
            gl::AttachShader(program_id, fragment);
            gl::BindAttribLocation(program_id, POSITION_ATTRIBUTE, c"position".as_ptr());
            gl::LinkProgram(program_id);

            let mut status = GLint::from(gl::FALSE);
            gl::GetProgramiv(program_id, gl::LINK_STATUS, &mut status);

            gl::DetachShader(program_id, vertex);
            gl::DetachShader(program_id, fragment);
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);

            status == GLint::from(gl::TRUE)
        };

        if !linked {
            return Err(ShaderError::Link { log: program_info_log(program_id) });
        }

        log::info!("Shader program {} linked", program_id);
        Ok(program)
    }

    /// Raw GL program name
    pub fn id(&self) -> GLuint {
        self.program_id
    }

    /// Make this the active program
    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }

    /// Clear the active program
    pub fn unbind(&self) {
        unsafe { gl::UseProgram(0) };
    }

    fn uniform_location(&mut self, name: &str) -> Option<GLint> {
        let program_id = self.program_id;
        cached_uniform_location(&mut self.uniform_locations, program_id, name, |c_name| unsafe {
            gl::GetUniformLocation(program_id, c_name.as_ptr())
        })
    }
}

/// Resolve `name` through `cache`, calling `lookup` only on the first request
///
/// A lookup result of -1 means the program has no such active uniform; that
/// is warned about once and remembered as absent.
fn cached_uniform_location(
    cache: &mut HashMap<String, Option<GLint>>,
    program_id: GLuint,
    name: &str,
    lookup: impl FnOnce(&CStr) -> GLint,
) -> Option<GLint> {
    if let Some(cached) = cache.get(name) {
        return *cached;
    }

    let location = CString::new(name)
        .ok()
        .map(|c_name| lookup(&c_name))
        .filter(|location| *location != -1);

    if location.is_none() {
        log::warn!("Could not find uniform '{}' in program {}", name, program_id);
    }
    cache.insert(name.to_string(), location);
    location
}

impl MatrixUniforms for ShaderProgram {
    /// Upload to the bound program; unknown names are skipped
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4) {
        if let Some(location) = self.uniform_location(name) {
            // nalgebra storage is column-major, as GL expects with transpose = FALSE
            unsafe {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr());
            }
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::UseProgram(0);
            gl::DeleteProgram(self.program_id);
        }
        log::debug!("Shader program {} released", self.program_id);
    }
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<GLuint, ShaderError> {
    let c_source = CString::new(source).map_err(|_| ShaderError::InvalidSource { stage })?;

    let shader_id = unsafe { gl::CreateShader(stage.gl_enum()) };
    if shader_id == 0 {
        return Err(ShaderError::StageCreation { stage });
    }

    let compiled = unsafe {
        gl::ShaderSource(shader_id, 1, &c_source.as_ptr(), std::ptr::null());
        gl::CompileShader(shader_id);

        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader_id, gl::COMPILE_STATUS, &mut status);
        status == GLint::from(gl::TRUE)
    };

    if !compiled {
        let log = shader_info_log(shader_id);
        unsafe { gl::DeleteShader(shader_id) };
        return Err(ShaderError::Compile { stage, log });
    }

    log::debug!("Compiled {} shader {}", stage, shader_id);
    Ok(shader_id)
}

fn shader_info_log(shader_id: GLuint) -> String {
    let mut length: GLint = 0;
    unsafe { gl::GetShaderiv(shader_id, gl::INFO_LOG_LENGTH, &mut length) };
    read_info_log(length, |capacity, written, buffer| unsafe {
        gl::GetShaderInfoLog(shader_id, capacity, written, buffer);
    })
}

fn program_info_log(program_id: GLuint) -> String {
    let mut length: GLint = 0;
    unsafe { gl::GetProgramiv(program_id, gl::INFO_LOG_LENGTH, &mut length) };
    read_info_log(length, |capacity, written, buffer| unsafe {
        gl::GetProgramInfoLog(program_id, capacity, written, buffer);
    })
}

fn read_info_log(length: GLint, fetch: impl FnOnce(GLint, *mut GLint, *mut GLchar)) -> String {
    if length <= 0 {
        return String::new();
    }
    let mut buffer = vec![0u8; length as usize];
    let mut written: GLint = 0;
    fetch(length, &mut written, buffer.as_mut_ptr().cast::<GLchar>());
    buffer.truncate(written.clamp(0, length) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}
