//! Event loop plumbing for the kiosk.
//!
//! The kiosk runs on a single calloop [`EventLoop`]. Backend notifications are
//! calloop sources; each registration the kiosk keeps is held as a
//! [`Subscription`], which removes its source from the loop when dropped.
//! Termination goes through the [`Shutdown`] handle.

use std::fmt;

use calloop::{EventLoop, EventSource, LoopHandle, LoopSignal, RegistrationToken};
use tracing::{debug, info};

use crate::compositor::errors::Result;
use crate::compositor::state::KioskState;

/// Removes event sources from the loop they were registered with.
pub trait SourceRemover {
    fn remove_source(&self, token: RegistrationToken);
}

impl<Data: 'static> SourceRemover for LoopHandle<'static, Data> {
    fn remove_source(&self, token: RegistrationToken) {
        self.remove(token);
    }
}

/// An event source registered with the loop for as long as this value lives.
///
/// Dropping it from within the source's own callback is allowed; the loop
/// finishes the dispatch before the source goes away.
pub struct Subscription {
    token: Option<RegistrationToken>,
    remover: Box<dyn SourceRemover>,
}

impl Subscription {
    /// Registers `source` with `callback` on the loop behind `handle`.
    pub fn insert<Data, S, F>(handle: &LoopHandle<'static, Data>, source: S, callback: F) -> Result<Self>
    where
        Data: 'static,
        S: EventSource + 'static,
        F: FnMut(S::Event, &mut S::Metadata, &mut Data) -> S::Ret + 'static,
    {
        let token = handle.insert_source(source, callback)?;
        Ok(Subscription {
            token: Some(token),
            remover: Box::new(handle.clone()),
        })
    }

    pub fn token(&self) -> Option<RegistrationToken> {
        self.token
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            debug!(?token, "Removing event source");
            self.remover.remove_source(token);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("token", &self.token).finish()
    }
}

/// Ends the kiosk's event loop.
pub trait Shutdown {
    fn stop(&self);
}

impl Shutdown for LoopSignal {
    fn stop(&self) {
        LoopSignal::stop(self);
        self.wakeup();
    }
}

pub fn create_event_loop() -> Result<EventLoop<'static, KioskState>> {
    Ok(EventLoop::try_new()?)
}

/// Dispatches events into `state` until the loop is stopped.
pub fn run(event_loop: &mut EventLoop<'static, KioskState>, state: &mut KioskState) -> Result<()> {
    info!("Starting kiosk event loop");
    event_loop.run(None, state, |_| {})?;
    info!("Kiosk event loop stopped");
    Ok(())
}
