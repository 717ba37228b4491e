//! Rendering module
//!
//! Composition produces draw commands from the game state; a [`Surface`]
//! replays them. [`MeshSurface`] turns them into flat-colored triangles and
//! [`RenderState`] uploads and presents those with wgpu.

use thiserror::Error;

pub mod commands;
pub mod pipeline;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use commands::{DrawCommand, TEXT_SIZE, compose, score_text};
pub use pipeline::{RenderState, screen_to_ndc, screen_to_viewport, viewport_scale};
pub use surface::{Frame, MeshSurface, Surface, TextRun, execute};
pub use vertex::Vertex;

/// GPU setup or presentation failure
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no texture formats")]
    NoSurfaceFormat,
    #[error(transparent)]
    Surface(#[from] wgpu::SurfaceError),
}

impl RenderError {
    /// Lost or outdated surfaces recover by reconfiguring
    pub fn needs_reconfigure(&self) -> bool {
        matches!(
            self,
            RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)
        )
    }
}
