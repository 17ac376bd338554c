//! Views and surface enumeration.
//!
//! A [`View`] is one application window on screen. What it draws is behind
//! the [`Drawable`] trait, with one implementation per kind of client window.
//! [`SurfaceCompositor`] walks a view's surfaces for the frame renderer.

use std::fmt;

use kiosk_core::types::Point;
use tracing::error;

use crate::compositor::errors::{CompositorError, Result};
use crate::compositor::surface::{ClientSurface, SurfaceRef, SurfaceTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    XdgShell,
    Xwayland,
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewType::XdgShell => f.write_str("xdg-shell"),
            ViewType::Xwayland => f.write_str("xwayland"),
        }
    }
}

/// Surface content of a view.
pub trait Drawable {
    fn view_type(&self) -> ViewType;

    /// Calls `on_surface(surface, sx, sy)` for every surface of the view, bottom
    /// to top, with `(sx, sy)` relative to the view's root surface.
    ///
    /// Kinds that cannot enumerate their surfaces keep this default.
    fn for_each_surface(&self, _on_surface: &mut dyn FnMut(&dyn ClientSurface, i32, i32)) -> Result<()> {
        Err(CompositorError::UnsupportedViewType(self.view_type().to_string()))
    }
}

/// A popup of an xdg-shell surface, itself able to carry popups.
pub struct Popup {
    /// Position relative to the parent's root surface.
    pub offset: Point<i32>,
    pub surface: XdgShellView,
}

/// View backed by an xdg-shell toplevel.
pub struct XdgShellView {
    tree: SurfaceTree,
    popups: Vec<Popup>,
}

impl XdgShellView {
    pub fn new(tree: SurfaceTree) -> Self {
        XdgShellView {
            tree,
            popups: Vec::new(),
        }
    }

    pub fn with_popup(mut self, offset: Point<i32>, popup: XdgShellView) -> Self {
        self.popups.push(Popup {
            offset,
            surface: popup,
        });
        self
    }

    fn visit(&self, sx: i32, sy: i32, on_surface: &mut dyn FnMut(&dyn ClientSurface, i32, i32)) {
        self.tree.for_each_surface(sx, sy, on_surface);
        for popup in &self.popups {
            popup
                .surface
                .visit(sx + popup.offset.x, sy + popup.offset.y, on_surface);
        }
    }
}

impl Drawable for XdgShellView {
    fn view_type(&self) -> ViewType {
        ViewType::XdgShell
    }

    fn for_each_surface(&self, on_surface: &mut dyn FnMut(&dyn ClientSurface, i32, i32)) -> Result<()> {
        self.visit(0, 0, on_surface);
        Ok(())
    }
}

/// View backed by an X11 window. Its surfaces are not enumerated here.
pub struct XwaylandView {
    surface: SurfaceRef,
}

impl XwaylandView {
    pub fn new(surface: SurfaceRef) -> Self {
        XwaylandView { surface }
    }

    pub fn surface(&self) -> &SurfaceRef {
        &self.surface
    }
}

impl Drawable for XwaylandView {
    fn view_type(&self) -> ViewType {
        ViewType::Xwayland
    }
}

pub struct View {
    /// Logical position relative to the output.
    pub position: Point<i32>,
    drawable: Box<dyn Drawable>,
}

impl View {
    pub fn new(position: Point<i32>, drawable: Box<dyn Drawable>) -> Self {
        View { position, drawable }
    }

    pub fn view_type(&self) -> ViewType {
        self.drawable.view_type()
    }

    pub fn drawable(&self) -> &dyn Drawable {
        self.drawable.as_ref()
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("position", &self.position)
            .field("type", &self.view_type())
            .finish()
    }
}

/// Mapped views, foreground first.
#[derive(Debug, Default)]
pub struct ViewStack {
    views: Vec<View>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `view` on top of all others.
    pub fn push_front(&mut self, view: View) {
        self.views.insert(0, view);
    }

    /// Puts `view` beneath all others.
    pub fn push_back(&mut self, view: View) {
        self.views.push(view);
    }

    pub fn remove(&mut self, index: usize) -> Option<View> {
        (index < self.views.len()).then(|| self.views.remove(index))
    }

    pub fn front(&self) -> Option<&View> {
        self.views.first()
    }

    /// Foreground to background.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &View> {
        self.views.iter()
    }

    /// Background to foreground, the order views are painted in.
    pub fn iter_back_to_front(&self) -> impl Iterator<Item = &View> {
        self.views.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Surface enumeration for the frame renderer.
pub struct SurfaceCompositor;

impl SurfaceCompositor {
    /// Visits every surface of `view`. A view whose kind cannot enumerate its
    /// surfaces is logged and skipped; returns whether the view was visited.
    pub fn for_each_surface(view: &View, on_surface: &mut dyn FnMut(&dyn ClientSurface, i32, i32)) -> bool {
        match view.drawable().for_each_surface(on_surface) {
            Ok(()) => true,
            Err(err) => {
                error!(view_type = %view.view_type(), error = %err, "Unrecognized view type, skipping view");
                false
            }
        }
    }
}
