// kiosk-system/src/compositor/cursor_manager.rs

use kiosk_core::config::CursorConfig;
use kiosk_core::types::Point;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::compositor::backend::OutputHandle;

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("Cannot load XCursor theme {theme:?} at scale {scale}: {reason}")]
    ThemeLoad {
        theme: Option<String>,
        scale: f64,
        reason: String,
    },
    #[error("Cursor image '{0}' not found in theme")]
    ImageNotFound(String),
    #[error("Cursor backend error: {0}")]
    Backend(String),
}

/// The seat's pointer cursor, as provided by the platform.
pub trait CursorBackend {
    /// Loads `theme` (platform default when `None`) with images of `size`
    /// logical pixels rendered for `scale`.
    fn load_theme(&mut self, theme: Option<&str>, size: u32, scale: f64) -> Result<(), CursorError>;

    /// Shows the named image from the loaded theme.
    fn set_image(&mut self, name: &str) -> Result<(), CursorError>;

    /// Moves the pointer to `position` in output pixels.
    fn warp(&mut self, position: Point<f64>);
}

/// Manages the cursor appearance and theme.
pub struct CursorManager {
    config: CursorConfig,
    backend: Box<dyn CursorBackend>,
}

impl CursorManager {
    pub fn new(config: CursorConfig, backend: Box<dyn CursorBackend>) -> Self {
        info!(theme = ?config.theme, size = config.size, "Initializing CursorManager");
        CursorManager { config, backend }
    }

    /// Prepares the cursor for a newly attached output: theme at the output's
    /// scale, the default image, and the pointer in the middle of the screen.
    ///
    /// Failures are logged; the cursor stays usable in a degraded state.
    pub fn setup_for_output(&mut self, output: &dyn OutputHandle) {
        let scale = output.scale();
        if let Err(err) = self
            .backend
            .load_theme(self.config.theme.as_deref(), self.config.size, scale)
        {
            error!(
                output = %output.name(),
                scale,
                error = %err,
                "Cannot load XCursor theme for output"
            );
        }

        if let Err(err) = self.backend.set_image(&self.config.default_image) {
            warn!(image = %self.config.default_image, error = %err, "Cannot set default cursor image");
        }

        let resolution = output.resolution();
        let center = Point::new(
            f64::from(resolution.width / 2),
            f64::from(resolution.height / 2),
        );
        self.backend.warp(center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::backend::{Mode, OutputSignals};
    use crate::compositor::renderer_interface::RendererError;
    use crate::compositor::transform::Transform;
    use kiosk_core::types::Size;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(Option<String>, u32, f64),
        Image(String),
        Warp(f64, f64),
    }

    struct Recording {
        calls: Rc<RefCell<Vec<Call>>>,
        fail_load: bool,
    }

    impl CursorBackend for Recording {
        fn load_theme(&mut self, theme: Option<&str>, size: u32, scale: f64) -> Result<(), CursorError> {
            self.calls
                .borrow_mut()
                .push(Call::Load(theme.map(str::to_string), size, scale));
            if self.fail_load {
                Err(CursorError::ThemeLoad {
                    theme: theme.map(str::to_string),
                    scale,
                    reason: "missing".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn set_image(&mut self, name: &str) -> Result<(), CursorError> {
            self.calls.borrow_mut().push(Call::Image(name.to_string()));
            Ok(())
        }

        fn warp(&mut self, position: Point<f64>) {
            self.calls.borrow_mut().push(Call::Warp(position.x, position.y));
        }
    }

    struct Screen(Size<i32>, f64);

    impl OutputHandle for Screen {
        fn name(&self) -> &str {
            "screen"
        }
        fn modes(&self) -> &[Mode] {
            &[]
        }
        fn set_mode(&mut self, _mode: Mode) {}
        fn current_mode(&self) -> Option<Mode> {
            None
        }
        fn resolution(&self) -> Size<i32> {
            self.0
        }
        fn scale(&self) -> f64 {
            self.1
        }
        fn transform(&self) -> Transform {
            Transform::Normal
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

    fn manager(fail_load: bool) -> (CursorManager, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let backend = Recording {
            calls: calls.clone(),
            fail_load,
        };
        (CursorManager::new(CursorConfig::default(), Box::new(backend)), calls)
    }

    #[test]
    fn test_setup_loads_theme_sets_image_and_centers() {
        let (mut cursor, calls) = manager(false);
        cursor.setup_for_output(&Screen(Size::new(1921, 1080), 2.0));
        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Load(None, 24, 2.0),
                Call::Image("left_ptr".to_string()),
                Call::Warp(960.0, 540.0),
            ]
        );
    }

    #[test]
    fn test_theme_failure_is_not_fatal() {
        let (mut cursor, calls) = manager(true);
        cursor.setup_for_output(&Screen(Size::new(800, 600), 1.0));
        let calls = calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2], Call::Warp(400.0, 300.0));
    }
}
