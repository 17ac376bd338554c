use std::fmt::Debug;

use glam::Mat3;
use kiosk_core::types::{Color, Size};
use thiserror::Error;

use crate::compositor::surface::ClientSurface;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Cannot make output context current: {0}")]
    ContextNotCurrent(String),
    #[error("Buffer swap/presentation failed: {0}")]
    BufferSwapFailed(String),
    #[error("Texture draw failed: {0}")]
    DrawFailed(String),
    #[error("Generic renderer error: {0}")]
    Generic(String),
}

/// A GPU texture holding a client buffer.
pub trait RenderableTexture: Debug {
    fn id(&self) -> u64;
}

/// Draw calls of one render pass. A pass is `begin`, any number of `clear`
/// and texture draws, then `end`.
pub trait Renderer {
    /// Starts a pass on a viewport of `size` pixels.
    fn begin(&mut self, size: Size<i32>);

    fn clear(&mut self, color: Color);

    /// Draws the unit square of `texture` transformed by `matrix` into
    /// normalized device coordinates.
    fn render_texture_with_matrix(
        &mut self,
        texture: &dyn RenderableTexture,
        matrix: &Mat3,
        alpha: f32,
    ) -> Result<(), RendererError>;

    fn end(&mut self);
}

/// Finds the texture to draw for a surface.
///
/// Must not change any state, so asking again after a miss is harmless.
pub trait TextureImporter {
    fn resolve<'s>(&self, surface: &'s dyn ClientSurface) -> Option<&'s dyn RenderableTexture>;
}

/// Uses the texture the platform already imported for the surface's current
/// buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfaceTextureImporter;

impl TextureImporter for SurfaceTextureImporter {
    fn resolve<'s>(&self, surface: &'s dyn ClientSurface) -> Option<&'s dyn RenderableTexture> {
        surface.texture()
    }
}
