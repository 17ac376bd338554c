//! Server context of the kiosk.
//!
//! [`KioskState`] is the data the calloop event loop dispatches into. It owns
//! the output lifecycle, the output layout, the mapped views and the rendering
//! collaborators, and routes each backend notification to its handler.

use calloop::channel::{Channel, Event};
use calloop::LoopHandle;
use kiosk_core::config::KioskConfig;
use tracing::{debug, info, trace};

use crate::compositor::backend::{AttachOutputEvent, OutputSignals};
use crate::compositor::cursor_manager::{CursorBackend, CursorManager};
use crate::compositor::display_loop::{Shutdown, Subscription};
use crate::compositor::errors::Result;
use crate::compositor::output_layout::OutputLayout;
use crate::compositor::output_manager::{AttachOutcome, OutputLifecycleManager, OutputSubscriptions};
use crate::compositor::projection::{CoordinateProjector, ProjectionBuilder};
use crate::compositor::render::{FrameOutcome, FrameRenderer};
use crate::compositor::renderer_interface::{Renderer, TextureImporter};
use crate::compositor::view::ViewStack;

/// Rendering collaborators provided by the platform.
pub struct RenderBackend {
    pub renderer: Box<dyn Renderer>,
    pub importer: Box<dyn TextureImporter>,
    pub projection: Box<dyn ProjectionBuilder>,
}

pub struct KioskState {
    pub loop_handle: LoopHandle<'static, KioskState>,
    pub shutdown: Box<dyn Shutdown>,
    pub outputs: OutputLifecycleManager,
    pub output_layout: OutputLayout,
    /// Mapped views, foreground first. Maintained by the shell handlers.
    pub views: ViewStack,
    pub frame_renderer: FrameRenderer,
    pub render_backend: RenderBackend,
    pub cursor: CursorManager,
}

impl KioskState {
    pub fn new(
        config: &KioskConfig,
        loop_handle: LoopHandle<'static, KioskState>,
        shutdown: Box<dyn Shutdown>,
        render_backend: RenderBackend,
        cursor_backend: Box<dyn CursorBackend>,
    ) -> Self {
        info!(
            mode_policy = ?config.output.mode_policy,
            background = %config.output.background,
            "Creating kiosk state"
        );
        KioskState {
            loop_handle,
            shutdown,
            outputs: OutputLifecycleManager::new(config.output.mode_policy),
            output_layout: OutputLayout::new(),
            views: ViewStack::new(),
            frame_renderer: FrameRenderer::new(config.output.background),
            render_backend,
            cursor: CursorManager::new(config.cursor.clone(), cursor_backend),
        }
    }

    /// Starts accepting outputs from the backend's new-output channel. The
    /// registration is dropped once an output is attached.
    pub fn listen_for_outputs(&mut self, new_outputs: Channel<AttachOutputEvent>) -> Result<()> {
        let subscription = Subscription::insert(&self.loop_handle, new_outputs, |event, _, state: &mut KioskState| {
            match event {
                Event::Msg(attach) => {
                    state.handle_new_output(attach);
                }
                Event::Closed => debug!("New-output channel closed"),
            }
        })?;
        self.outputs.set_attach_subscription(subscription);
        Ok(())
    }

    pub fn handle_new_output(&mut self, event: AttachOutputEvent) -> AttachOutcome {
        let handle = self.loop_handle.clone();
        self.outputs.on_attach(event, &mut self.output_layout, &mut self.cursor, |signals| {
            register_output_signals(&handle, signals)
        })
    }

    /// Renders one frame on the attached output.
    pub fn handle_output_frame(&mut self) -> Option<FrameOutcome> {
        let Some(output) = self.outputs.device().map(|d| d.output().clone()) else {
            debug!("Frame event without an attached output, ignoring");
            return None;
        };

        let RenderBackend {
            renderer,
            importer,
            projection,
        } = &mut self.render_backend;
        let projector = CoordinateProjector::new(&**importer, &**projection);
        let outcome = self.frame_renderer.render(
            &output,
            &self.output_layout,
            &self.views,
            &mut **renderer,
            &projector,
        );
        trace!(?outcome, "Frame handled");
        Some(outcome)
    }

    pub fn handle_output_destroy(&mut self) {
        self.outputs
            .on_detach(&mut self.output_layout, self.shutdown.as_ref());
    }
}

/// Connects an output's frame and destroy channels to the kiosk handlers.
pub fn register_output_signals(
    handle: &LoopHandle<'static, KioskState>,
    signals: OutputSignals,
) -> Result<OutputSubscriptions> {
    let OutputSignals { frame, destroy } = signals;
    let frame = Subscription::insert(handle, frame, |event, _, state: &mut KioskState| {
        if let Event::Msg(_) = event {
            state.handle_output_frame();
        }
    })?;
    let destroy = Subscription::insert(handle, destroy, |event, _, state: &mut KioskState| {
        if let Event::Msg(_) = event {
            state.handle_output_destroy();
        }
    })?;
    Ok(OutputSubscriptions { frame, destroy })
}
