//! Client surfaces and their sub-surface trees.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use kiosk_core::types::{Point, Size};

use crate::compositor::renderer_interface::RenderableTexture;
use crate::compositor::transform::Transform;

/// A client surface as seen by the output pipeline. Owned by the platform;
/// the kiosk only reads it and signals frame completion.
pub trait ClientSurface {
    /// Whether a buffer is attached to the current state.
    fn has_buffer(&self) -> bool;

    /// Current size in logical pixels.
    fn size(&self) -> Size<i32>;

    /// Transform the client declared for its buffer.
    fn transform(&self) -> Transform;

    /// Texture of the current buffer, if the renderer has imported it.
    fn texture(&self) -> Option<&dyn RenderableTexture>;

    /// Tells the client that a frame using its current buffer was drawn at
    /// `time` (monotonic).
    fn send_frame_done(&self, time: Duration);
}

pub type SurfaceRef = Rc<dyn ClientSurface>;

/// Stacking of a sub-surface relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Below,
    Above,
}

pub struct Subsurface {
    /// Position relative to the parent surface.
    pub offset: Point<i32>,
    pub placement: Placement,
    pub tree: SurfaceTree,
}

/// A surface with its sub-surfaces, in stacking order within each placement.
pub struct SurfaceTree {
    pub surface: SurfaceRef,
    pub children: Vec<Subsurface>,
}

impl SurfaceTree {
    pub fn new(surface: SurfaceRef) -> Self {
        SurfaceTree {
            surface,
            children: Vec::new(),
        }
    }

    pub fn with_subsurface(mut self, offset: Point<i32>, placement: Placement, tree: SurfaceTree) -> Self {
        self.children.push(Subsurface {
            offset,
            placement,
            tree,
        });
        self
    }

    /// Visits the tree bottom to top: sub-surfaces placed below, the surface
    /// itself, then sub-surfaces placed above. `(sx, sy)` is the position of
    /// this tree's surface; children receive it plus their offset.
    pub fn for_each_surface(&self, sx: i32, sy: i32, on_surface: &mut dyn FnMut(&dyn ClientSurface, i32, i32)) {
        self.visit_children(Placement::Below, sx, sy, on_surface);
        on_surface(self.surface.as_ref(), sx, sy);
        self.visit_children(Placement::Above, sx, sy, on_surface);
    }

    fn visit_children(
        &self,
        placement: Placement,
        sx: i32,
        sy: i32,
        on_surface: &mut dyn FnMut(&dyn ClientSurface, i32, i32),
    ) {
        for child in self.children.iter().filter(|c| c.placement == placement) {
            child
                .tree
                .for_each_surface(sx + child.offset.x, sy + child.offset.y, on_surface);
        }
    }

    /// Number of surfaces in the tree, root included.
    pub fn surface_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.tree.surface_count()).sum::<usize>()
    }
}

impl fmt::Debug for SurfaceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceTree")
            .field("surfaces", &self.surface_count())
            .finish()
    }
}
