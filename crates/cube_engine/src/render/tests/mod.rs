//! Render integration tests that run without a GL context

mod camera_uniforms;
