// Recording stand-ins for the platform collaborators, shared by the
// compositor tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use calloop::channel::{channel, Sender};
use calloop::LoopSignal;
use glam::Mat3;
use kiosk_core::types::{Color, Point, Size};

use crate::compositor::backend::{DetachOutputEvent, FrameReadyEvent, Mode, OutputHandle, OutputSignals, SharedOutput};
use crate::compositor::cursor_manager::{CursorBackend, CursorError};
use crate::compositor::display_loop::Shutdown;
use crate::compositor::renderer_interface::{RenderableTexture, Renderer, RendererError};
use crate::compositor::surface::{ClientSurface, SurfaceTree};
use crate::compositor::transform::Transform;
use crate::compositor::view::{View, XdgShellView};

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
pub struct MockTexture {
    pub id: u64,
}

impl RenderableTexture for MockTexture {
    fn id(&self) -> u64 {
        self.id
    }
}

pub struct MockSurface {
    pub size: Size<i32>,
    pub transform: Transform,
    pub texture: Option<MockTexture>,
    pub has_buffer: bool,
    pub frame_done: RefCell<Vec<Duration>>,
}

impl MockSurface {
    /// A surface with a buffer and an imported texture tagged `id`.
    pub fn textured(id: u64, width: i32, height: i32) -> Rc<Self> {
        Rc::new(MockSurface {
            size: Size::new(width, height),
            transform: Transform::Normal,
            texture: Some(MockTexture { id }),
            has_buffer: true,
            frame_done: RefCell::new(Vec::new()),
        })
    }

    pub fn rotated(id: u64, width: i32, height: i32, transform: Transform) -> Rc<Self> {
        Rc::new(MockSurface {
            size: Size::new(width, height),
            transform,
            texture: Some(MockTexture { id }),
            has_buffer: true,
            frame_done: RefCell::new(Vec::new()),
        })
    }

    pub fn without_buffer() -> Rc<Self> {
        Rc::new(MockSurface {
            size: Size::new(10, 10),
            transform: Transform::Normal,
            texture: None,
            has_buffer: false,
            frame_done: RefCell::new(Vec::new()),
        })
    }

    /// A buffer the renderer has not imported.
    pub fn without_texture() -> Rc<Self> {
        Rc::new(MockSurface {
            size: Size::new(10, 10),
            transform: Transform::Normal,
            texture: None,
            has_buffer: true,
            frame_done: RefCell::new(Vec::new()),
        })
    }

    pub fn frames_done(&self) -> usize {
        self.frame_done.borrow().len()
    }
}

impl ClientSurface for MockSurface {
    fn has_buffer(&self) -> bool {
        self.has_buffer
    }
    fn size(&self) -> Size<i32> {
        self.size
    }
    fn transform(&self) -> Transform {
        self.transform
    }
    fn texture(&self) -> Option<&dyn RenderableTexture> {
        self.texture.as_ref().map(|t| t as &dyn RenderableTexture)
    }
    fn send_frame_done(&self, time: Duration) {
        self.frame_done.borrow_mut().push(time);
    }
}

/// A view at `position` whose only surface is `surface`.
pub fn single_surface_view(position: Point<i32>, surface: Rc<MockSurface>) -> View {
    View::new(position, Box::new(XdgShellView::new(SurfaceTree::new(surface))))
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Begin(Size<i32>),
    Clear(Color),
    Draw { texture: u64, matrix: Mat3, alpha: f32 },
    End,
}

#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Rc<RefCell<Vec<RenderCall>>>,
    pub fail_draws: bool,
}

impl RecordingRenderer {
    pub fn drawn_textures(&self) -> Vec<u64> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                RenderCall::Draw { texture, .. } => Some(*texture),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self, size: Size<i32>) {
        self.calls.borrow_mut().push(RenderCall::Begin(size));
    }
    fn clear(&mut self, color: Color) {
        self.calls.borrow_mut().push(RenderCall::Clear(color));
    }
    fn render_texture_with_matrix(
        &mut self,
        texture: &dyn RenderableTexture,
        matrix: &Mat3,
        alpha: f32,
    ) -> Result<(), RendererError> {
        self.calls.borrow_mut().push(RenderCall::Draw {
            texture: texture.id(),
            matrix: *matrix,
            alpha,
        });
        if self.fail_draws {
            Err(RendererError::DrawFailed("mock".to_string()))
        } else {
            Ok(())
        }
    }
    fn end(&mut self) {
        self.calls.borrow_mut().push(RenderCall::End);
    }
}

/// Calls made on a [`MockOutput`], observable after it moved into the kiosk.
#[derive(Debug, Default)]
pub struct OutputLog {
    pub make_current: Cell<u32>,
    pub swaps: Cell<u32>,
    pub modes_set: RefCell<Vec<Mode>>,
}

pub struct OutputSenders {
    pub frame: Sender<FrameReadyEvent>,
    pub destroy: Sender<DetachOutputEvent>,
}

pub struct MockOutput {
    pub name: String,
    pub modes: Vec<Mode>,
    pub mode: Option<Mode>,
    pub resolution: Size<i32>,
    pub scale: f64,
    pub transform: Transform,
    pub can_make_current: bool,
    pub can_swap: bool,
    pub signals: Option<OutputSignals>,
    pub log: Rc<OutputLog>,
}

impl MockOutput {
    pub fn new(name: &str, resolution: Size<i32>) -> (Self, OutputSenders) {
        let (frame_tx, frame_rx) = channel();
        let (destroy_tx, destroy_rx) = channel();
        let output = MockOutput {
            name: name.to_string(),
            modes: Vec::new(),
            mode: None,
            resolution,
            scale: 1.0,
            transform: Transform::Normal,
            can_make_current: true,
            can_swap: true,
            signals: Some(OutputSignals {
                frame: frame_rx,
                destroy: destroy_rx,
            }),
            log: Rc::new(OutputLog::default()),
        };
        let senders = OutputSenders {
            frame: frame_tx,
            destroy: destroy_tx,
        };
        (output, senders)
    }

    pub fn shared(self) -> (SharedOutput, Rc<OutputLog>) {
        let log = self.log.clone();
        let shared: SharedOutput = Rc::new(RefCell::new(self));
        (shared, log)
    }
}

impl OutputHandle for MockOutput {
    fn name(&self) -> &str {
        &self.name
    }
    fn modes(&self) -> &[Mode] {
        &self.modes
    }
    fn set_mode(&mut self, mode: Mode) {
        self.log.modes_set.borrow_mut().push(mode);
        self.resolution = mode.size;
        self.mode = Some(mode);
    }
    fn current_mode(&self) -> Option<Mode> {
        self.mode
    }
    fn resolution(&self) -> Size<i32> {
        self.resolution
    }
    fn scale(&self) -> f64 {
        self.scale
    }
    fn transform(&self) -> Transform {
        self.transform
    }
    fn make_current(&mut self) -> Result<(), RendererError> {
        self.log.make_current.set(self.log.make_current.get() + 1);
        if self.can_make_current {
            Ok(())
        } else {
            Err(RendererError::ContextNotCurrent("mock".to_string()))
        }
    }
    fn swap_buffers(&mut self) -> Result<(), RendererError> {
        self.log.swaps.set(self.log.swaps.get() + 1);
        if self.can_swap {
            Ok(())
        } else {
            Err(RendererError::BufferSwapFailed("mock".to_string()))
        }
    }
    fn take_signals(&mut self) -> Option<OutputSignals> {
        self.signals.take()
    }
}

/// Counts stop requests and forwards them to a real loop signal if given.
#[derive(Clone, Default)]
pub struct CountingShutdown {
    pub stops: Rc<Cell<u32>>,
    pub signal: Option<LoopSignal>,
}

impl Shutdown for CountingShutdown {
    fn stop(&self) {
        self.stops.set(self.stops.get() + 1);
        if let Some(signal) = &self.signal {
            signal.stop();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CursorCall {
    LoadTheme { scale: f64 },
    SetImage(String),
    Warp(Point<f64>),
}

#[derive(Clone, Default)]
pub struct RecordingCursor {
    pub calls: Rc<RefCell<Vec<CursorCall>>>,
}

impl CursorBackend for RecordingCursor {
    fn load_theme(&mut self, _theme: Option<&str>, _size: u32, scale: f64) -> Result<(), CursorError> {
        self.calls.borrow_mut().push(CursorCall::LoadTheme { scale });
        Ok(())
    }
    fn set_image(&mut self, name: &str) -> Result<(), CursorError> {
        self.calls.borrow_mut().push(CursorCall::SetImage(name.to_string()));
        Ok(())
    }
    fn warp(&mut self, position: Point<f64>) {
        self.calls.borrow_mut().push(CursorCall::Warp(position));
    }
}
