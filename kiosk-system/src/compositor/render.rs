//! Frame rendering of the kiosk output.
//!
//! Each frame-ready signal of the output repaints it completely: clear to the
//! background color, then every view from the background to the foreground,
//! then present.

use std::time::{Duration, Instant};

use kiosk_core::types::Color;
use tracing::{debug, error, trace};

use crate::compositor::backend::{OutputHandle, SharedOutput};
use crate::compositor::output_layout::OutputLayout;
use crate::compositor::projection::{CoordinateProjector, SurfaceDraw};
use crate::compositor::renderer_interface::Renderer;
use crate::compositor::view::{SurfaceCompositor, View, ViewStack};

/// Data shared by the draw calls of one view in one frame.
pub struct FrameContext<'a> {
    pub layout: &'a OutputLayout,
    pub output: &'a dyn OutputHandle,
    pub view: &'a View,
    /// Monotonic time the frame started at.
    pub when: Duration,
}

/// Monotonic time since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The output context could not be made current; nothing was drawn.
    Skipped,
    Presented,
    /// Everything was drawn but the swap failed.
    PresentFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub views: usize,
    pub drawn: usize,
    pub skipped_surfaces: usize,
}

pub struct FrameRenderer {
    clock: MonotonicClock,
    background: Color,
}

impl FrameRenderer {
    pub fn new(background: Color) -> Self {
        FrameRenderer {
            clock: MonotonicClock::new(),
            background,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Renders and presents one frame on `output`.
    ///
    /// A failed make-current drops the frame without touching the renderer.
    /// Otherwise exactly one present is attempted.
    pub fn render(
        &self,
        output: &SharedOutput,
        layout: &OutputLayout,
        views: &ViewStack,
        renderer: &mut dyn Renderer,
        projector: &CoordinateProjector<'_>,
    ) -> FrameOutcome {
        if let Err(err) = output.borrow_mut().make_current() {
            debug!(error = %err, "Cannot make output current, dropping frame");
            return FrameOutcome::Skipped;
        }

        let when = self.clock.now();
        let mut stats = FrameStats::default();
        let name = {
            let handle = output.borrow();
            let resolution = handle.effective_resolution();

            renderer.begin(resolution);
            renderer.clear(self.background);

            for view in views.iter_back_to_front() {
                let ctx = FrameContext {
                    layout,
                    output: &*handle,
                    view,
                    when,
                };
                stats.views += 1;
                SurfaceCompositor::for_each_surface(view, &mut |surface, sx, sy| {
                    match projector.render_surface(&ctx, renderer, surface, sx, sy) {
                        SurfaceDraw::Drawn => stats.drawn += 1,
                        _ => stats.skipped_surfaces += 1,
                    }
                });
            }

            renderer.end();
            handle.name().to_string()
        };

        trace!(
            output = %name,
            views = stats.views,
            drawn = stats.drawn,
            skipped = stats.skipped_surfaces,
            "Frame rendered"
        );

        match output.borrow_mut().swap_buffers() {
            Ok(()) => FrameOutcome::Presented,
            Err(err) => {
                error!(output = %name, error = %err, "Failed to present frame");
                FrameOutcome::PresentFailed
            }
        }
    }
}
