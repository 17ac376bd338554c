//! Placement of surfaces in an output's pixel space.
//!
//! Everything a draw call needs to put a surface texture on screen is a single
//! 3x3 matrix taking the texture's unit square to normalized device
//! coordinates. It is the output projection (pixel space to NDC, compensating
//! the output transform) times the box matrix (unit square to the surface's
//! physical box, compensating the surface transform).

use glam::{Mat3, Vec2};
use kiosk_core::types::{Point, Rect, Size};
use tracing::{debug, warn};

use crate::compositor::render::FrameContext;
use crate::compositor::renderer_interface::{Renderer, TextureImporter};
use crate::compositor::surface::ClientSurface;
use crate::compositor::transform::{from_row_major, Transform};

/// Builds the draw matrix of a box.
pub trait ProjectionBuilder {
    /// `physical_box` is in output pixels, `transform` is applied around the
    /// box's center and `projection` is the output's projection matrix.
    fn build(&self, physical_box: Rect<i32>, transform: Transform, projection: &Mat3) -> Mat3;
}

/// Box projection in the usual order: translate to the box origin, scale to
/// its size, then turn around its center.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxProjection;

impl BoxProjection {
    /// Matrix taking the unit square to `physical_box` with `transform`
    /// applied, before projection.
    pub fn box_matrix(physical_box: Rect<i32>, transform: Transform) -> Mat3 {
        let origin = Vec2::new(physical_box.x() as f32, physical_box.y() as f32);
        let size = Vec2::new(physical_box.width() as f32, physical_box.height() as f32);
        let mut mat = Mat3::from_translation(origin) * Mat3::from_scale(size);
        if transform != Transform::Normal {
            let half = Vec2::splat(0.5);
            mat = mat * Mat3::from_translation(half) * transform.matrix() * Mat3::from_translation(-half);
        }
        mat
    }
}

impl ProjectionBuilder for BoxProjection {
    fn build(&self, physical_box: Rect<i32>, transform: Transform, projection: &Mat3) -> Mat3 {
        *projection * Self::box_matrix(physical_box, transform)
    }
}

/// Projection of an output of `size` pixels shown with `transform`: pixel
/// coordinates with a top-left origin to normalized device coordinates.
pub fn output_projection(size: Size<i32>, transform: Transform) -> Mat3 {
    let t = transform.matrix().transpose().to_cols_array();
    let x = 2.0 / size.width.max(1) as f32;
    let y = 2.0 / size.height.max(1) as f32;

    let m0 = x * t[0];
    let m1 = x * t[1];
    let m3 = -y * t[3];
    let m4 = -y * t[4];
    let m2 = -(1.0f32.copysign(m0 + m1));
    let m5 = -(1.0f32.copysign(m3 + m4));

    from_row_major([m0, m1, m2, m3, m4, m5, 0.0, 0.0, 1.0])
}

/// What happened to one surface during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceDraw {
    /// No buffer attached; nothing drawn, no frame-done.
    NoBuffer,
    /// The buffer has no texture yet; nothing drawn, no frame-done.
    NoTexture,
    Drawn,
    /// The draw call failed; the surface still got its frame-done.
    DrawFailed,
}

/// Draws single surfaces of a view onto the frame's output.
pub struct CoordinateProjector<'a> {
    importer: &'a dyn TextureImporter,
    builder: &'a dyn ProjectionBuilder,
}

impl<'a> CoordinateProjector<'a> {
    pub fn new(importer: &'a dyn TextureImporter, builder: &'a dyn ProjectionBuilder) -> Self {
        CoordinateProjector { importer, builder }
    }

    /// Box covered by a surface at `(sx, sy)` from the view's root surface, in
    /// physical pixels of the frame's output.
    pub fn physical_box(ctx: &FrameContext<'_>, surface: &dyn ClientSurface, sx: i32, sy: i32) -> Rect<i32> {
        let layout_offset = ctx
            .layout
            .output_coords(ctx.output.name(), Point::new(0.0, 0.0))
            .unwrap_or_default();
        let origin = layout_offset + ctx.view.position.to_f64() + Point::new(sx, sy).to_f64();
        let scale = ctx.output.scale();
        Rect::new(origin.to_physical(scale), surface.size().to_physical(scale))
    }

    /// Draws one surface and signals frame-done to it.
    pub fn render_surface(
        &self,
        ctx: &FrameContext<'_>,
        renderer: &mut dyn Renderer,
        surface: &dyn ClientSurface,
        sx: i32,
        sy: i32,
    ) -> SurfaceDraw {
        if !surface.has_buffer() {
            return SurfaceDraw::NoBuffer;
        }

        let Some(texture) = self.importer.resolve(surface) else {
            debug!(output = %ctx.output.name(), "Cannot obtain surface texture");
            return SurfaceDraw::NoTexture;
        };

        let physical_box = Self::physical_box(ctx, surface, sx, sy);
        let transform = surface.transform().invert();
        let matrix = self
            .builder
            .build(physical_box, transform, &ctx.output.transform_matrix());

        let outcome = match renderer.render_texture_with_matrix(texture, &matrix, 1.0) {
            Ok(()) => SurfaceDraw::Drawn,
            Err(err) => {
                warn!(texture = texture.id(), error = %err, "Surface texture draw failed");
                SurfaceDraw::DrawFailed
            }
        };
        surface.send_frame_done(ctx.when);
        outcome
    }
}
