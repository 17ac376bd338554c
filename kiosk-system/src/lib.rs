//! # Kiosk System (`kiosk-system`)
//!
//! Output pipeline of a single-output kiosk compositor. It attaches the one
//! display output the platform offers, repaints it on every frame-ready
//! signal with the mapped application views, and stops the event loop when
//! the output goes away.
//!
//! Platform pieces (output handles, surfaces, renderer, cursor) come in
//! through the traits of [`compositor::backend`], [`compositor::surface`],
//! [`compositor::renderer_interface`] and [`compositor::cursor_manager`].
//!
//! ```rust,ignore
//! use kiosk_system::compositor::{display_loop, state::KioskState};
//!
//! let mut event_loop = display_loop::create_event_loop()?;
//! let mut state = KioskState::new(
//!     &config,
//!     event_loop.handle(),
//!     Box::new(event_loop.get_signal()),
//!     render_backend,
//!     cursor_backend,
//! );
//! state.listen_for_outputs(new_outputs)?;
//! display_loop::run(&mut event_loop, &mut state)?;
//! ```

pub mod compositor;

pub use compositor::{CompositorError, Result};
