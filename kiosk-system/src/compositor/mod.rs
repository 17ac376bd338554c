//! The kiosk's output pipeline.
//!
//! Leaves first: [`transform`] and [`projection`] place surfaces,
//! [`view`] enumerates them, [`render`] paints a frame, and
//! [`output_manager`] owns the output's attach/detach lifecycle. [`state`]
//! wires everything to the calloop event loop in [`display_loop`].

pub mod backend;
pub mod cursor_manager;
pub mod display_loop;
pub mod errors;
pub mod output_layout;
pub mod output_manager;
pub mod projection;
pub mod render;
pub mod renderer_interface;
#[cfg(feature = "smithay")]
pub mod smithay_interop;
pub mod state;
pub mod surface;
pub mod transform;
pub mod view;

#[cfg(test)]
mod test_support;

pub use errors::{CompositorError, Result};
