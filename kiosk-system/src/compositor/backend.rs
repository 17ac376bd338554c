//! Contract between the kiosk and the platform's output backend.
//!
//! The backend owns the output devices. The kiosk sees each one through a
//! [`SharedOutput`] and receives its notifications over calloop channels: new
//! outputs arrive on a channel of [`AttachOutputEvent`], and every output hands
//! out one [`OutputSignals`] pair carrying its frame and destroy events.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use calloop::channel::Channel;
use glam::Mat3;
use kiosk_core::types::Size;

use crate::compositor::projection::output_projection;
use crate::compositor::renderer_interface::RendererError;
use crate::compositor::transform::Transform;

/// A display mode advertised by an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode {
    /// Physical pixels.
    pub size: Size<i32>,
    /// Refresh rate in mHz.
    pub refresh: i32,
    pub preferred: bool,
}

impl Mode {
    pub fn new(width: i32, height: i32, refresh: i32) -> Self {
        Mode {
            size: Size::new(width, height),
            refresh,
            preferred: false,
        }
    }

    pub fn preferred(mut self) -> Self {
        self.preferred = true;
        self
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}@{}.{:03}Hz",
            self.size.width,
            self.size.height,
            self.refresh / 1000,
            self.refresh % 1000
        )
    }
}

/// A new output became available.
pub struct AttachOutputEvent {
    pub output: SharedOutput,
}

impl fmt::Debug for AttachOutputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .output
            .try_borrow()
            .map(|o| o.name().to_string())
            .unwrap_or_else(|_| "<borrowed>".to_string());
        f.debug_struct("AttachOutputEvent").field("output", &name).finish()
    }
}

/// The output is going away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetachOutputEvent;

/// The output is ready for a new frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReadyEvent;

/// Receiving ends of an output's notifications.
pub struct OutputSignals {
    pub frame: Channel<FrameReadyEvent>,
    pub destroy: Channel<DetachOutputEvent>,
}

/// A display output as exposed by the platform backend.
pub trait OutputHandle {
    fn name(&self) -> &str;

    /// Supported modes in the backend's advertised order. Empty for outputs
    /// without modes, e.g. nested windows.
    fn modes(&self) -> &[Mode];

    fn set_mode(&mut self, mode: Mode);

    fn current_mode(&self) -> Option<Mode>;

    /// Current width and height in physical pixels, untransformed.
    fn resolution(&self) -> Size<i32>;

    fn scale(&self) -> f64;

    fn transform(&self) -> Transform;

    /// Logical size of the output: the resolution with the transform applied,
    /// divided by the scale.
    fn effective_resolution(&self) -> Size<i32> {
        let size = self.transform().transform_size(self.resolution());
        let scale = self.scale();
        Size::new(
            (f64::from(size.width) / scale) as i32,
            (f64::from(size.height) / scale) as i32,
        )
    }

    /// Projection from the output's pixel space to normalized device
    /// coordinates, rotated by the output transform.
    fn transform_matrix(&self) -> Mat3 {
        output_projection(self.resolution(), self.transform())
    }

    /// Binds the output's rendering context for the next frame.
    fn make_current(&mut self) -> Result<(), RendererError>;

    /// Presents the frame rendered since the last `make_current`.
    fn swap_buffers(&mut self) -> Result<(), RendererError>;

    /// Hands out the output's notification channels. Returns `None` once they
    /// have been taken.
    fn take_signals(&mut self) -> Option<OutputSignals>;
}

pub type SharedOutput = Rc<RefCell<dyn OutputHandle>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedOutput {
        resolution: Size<i32>,
        scale: f64,
        transform: Transform,
    }

    impl OutputHandle for FixedOutput {
        fn name(&self) -> &str {
            "fixed"
        }
        fn modes(&self) -> &[Mode] {
            &[]
        }
        fn set_mode(&mut self, _mode: Mode) {}
        fn current_mode(&self) -> Option<Mode> {
            None
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
            Ok(())
        }
        fn swap_buffers(&mut self) -> Result<(), RendererError> {
            Ok(())
        }
        fn take_signals(&mut self) -> Option<OutputSignals> {
            None
        }
    }

    #[test]
    fn test_effective_resolution_applies_transform_then_scale() {
        let output = FixedOutput {
            resolution: Size::new(3840, 2160),
            scale: 2.0,
            transform: Transform::Rotate90,
        };
        assert_eq!(output.effective_resolution(), Size::new(1080, 1920));
    }

    #[test]
    fn test_effective_resolution_truncates_fractional_scale() {
        let output = FixedOutput {
            resolution: Size::new(1366, 768),
            scale: 1.5,
            transform: Transform::Normal,
        };
        assert_eq!(output.effective_resolution(), Size::new(910, 512));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::new(1920, 1080, 59_940).to_string(), "1920x1080@59.940Hz");
    }
}
