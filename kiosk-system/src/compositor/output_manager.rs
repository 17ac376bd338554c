// kiosk-system/src/compositor/output_manager.rs
// Lifecycle of the kiosk's single output: attach, mode selection, detach.

use kiosk_core::config::ModePolicy;
use kiosk_core::types::{Point, Size};
use tracing::{debug, error, info, warn};

use crate::compositor::backend::{AttachOutputEvent, Mode, OutputSignals, SharedOutput};
use crate::compositor::cursor_manager::CursorManager;
use crate::compositor::display_loop::{Shutdown, Subscription};
use crate::compositor::errors::Result;
use crate::compositor::output_layout::OutputLayout;
use crate::compositor::transform::Transform;

/// Picks the mode to apply among the advertised ones, `None` if there are
/// none.
pub fn select_mode(modes: &[Mode], policy: ModePolicy) -> Option<Mode> {
    match policy {
        ModePolicy::Last => modes.last().copied(),
        ModePolicy::Preferred => modes
            .iter()
            .find(|m| m.preferred)
            .or_else(|| modes.last())
            .copied(),
    }
}

/// Registrations tying an output's notifications to the kiosk.
#[derive(Debug)]
pub struct OutputSubscriptions {
    pub frame: Subscription,
    pub destroy: Subscription,
}

/// The attached output.
pub struct OutputDevice {
    output: SharedOutput,
    name: String,
    mode: Option<Mode>,
    scale: f64,
    transform: Transform,
    effective_resolution: Size<i32>,
    position: Point<i32>,
    subscriptions: Option<OutputSubscriptions>,
}

impl OutputDevice {
    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn effective_resolution(&self) -> Size<i32> {
        self.effective_resolution
    }

    /// Position in the output layout.
    pub fn position(&self) -> Point<i32> {
        self.position
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscriptions.is_some()
    }
}

impl std::fmt::Debug for OutputDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputDevice")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("scale", &self.scale)
            .field("transform", &self.transform)
            .field("position", &self.position)
            .field("subscriptions", &self.subscriptions)
            .finish()
    }
}

#[derive(Debug, Default)]
pub enum OutputSlot {
    #[default]
    Empty,
    Attached(OutputDevice),
}

impl OutputSlot {
    pub fn device(&self) -> Option<&OutputDevice> {
        match self {
            OutputSlot::Attached(device) => Some(device),
            OutputSlot::Empty => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, OutputSlot::Attached(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// An output was already attached; the new one was ignored.
    Rejected,
}

/// Owns the single output slot and drives its transitions.
#[derive(Debug)]
pub struct OutputLifecycleManager {
    slot: OutputSlot,
    mode_policy: ModePolicy,
    attach_subscription: Option<Subscription>,
}

impl OutputLifecycleManager {
    pub fn new(mode_policy: ModePolicy) -> Self {
        OutputLifecycleManager {
            slot: OutputSlot::Empty,
            mode_policy,
            attach_subscription: None,
        }
    }

    pub fn slot(&self) -> &OutputSlot {
        &self.slot
    }

    pub fn device(&self) -> Option<&OutputDevice> {
        self.slot.device()
    }

    /// Keeps the registration delivering new outputs until the first attach.
    pub fn set_attach_subscription(&mut self, subscription: Subscription) {
        self.attach_subscription = Some(subscription);
    }

    pub fn is_listening_for_outputs(&self) -> bool {
        self.attach_subscription.is_some()
    }

    /// Takes ownership of a newly available output.
    ///
    /// `register` connects the output's notification channels to the event
    /// loop. Failures are logged; the device is recorded regardless.
    pub fn on_attach<R>(
        &mut self,
        event: AttachOutputEvent,
        layout: &mut OutputLayout,
        cursor: &mut CursorManager,
        register: R,
    ) -> AttachOutcome
    where
        R: FnOnce(OutputSignals) -> Result<OutputSubscriptions>,
    {
        let output = event.output;
        if let OutputSlot::Attached(existing) = &self.slot {
            error!(
                output = %output.borrow().name(),
                existing = %existing.name(),
                "An output is already attached, ignoring the new one"
            );
            return AttachOutcome::Rejected;
        }

        let (name, mode, signals) = {
            let mut handle = output.borrow_mut();
            if let Some(mode) = select_mode(handle.modes(), self.mode_policy) {
                debug!(output = %handle.name(), %mode, "Setting output mode");
                handle.set_mode(mode);
            }
            // Record what the output actually runs at.
            (handle.name().to_string(), handle.current_mode(), handle.take_signals())
        };

        let subscriptions = match signals {
            Some(signals) => match register(signals) {
                Ok(subscriptions) => Some(subscriptions),
                Err(err) => {
                    error!(output = %name, error = %err, "Cannot subscribe to output events");
                    None
                }
            },
            None => {
                error!(output = %name, "Output signals were already taken");
                None
            }
        };

        let (scale, transform, effective_resolution) = {
            let handle = output.borrow();
            (handle.scale(), handle.transform(), handle.effective_resolution())
        };
        let position = layout.add_auto(&name, effective_resolution);

        // One output only: stop listening for more.
        self.attach_subscription.take();

        cursor.setup_for_output(&*output.borrow());

        info!(
            output = %name,
            mode = ?mode,
            scale,
            ?transform,
            width = effective_resolution.width,
            height = effective_resolution.height,
            "Output attached"
        );

        self.slot = OutputSlot::Attached(OutputDevice {
            output,
            name,
            mode,
            scale,
            transform,
            effective_resolution,
            position,
            subscriptions,
        });
        AttachOutcome::Attached
    }

    /// Releases the output and stops the event loop.
    ///
    /// There is nothing to run without the output, so the loop is stopped even
    /// if no output was attached.
    pub fn on_detach(&mut self, layout: &mut OutputLayout, shutdown: &dyn Shutdown) {
        match std::mem::take(&mut self.slot) {
            OutputSlot::Attached(mut device) => {
                device.subscriptions.take();
                layout.remove(&device.name);
                info!(output = %device.name, "Output detached, terminating");
            }
            OutputSlot::Empty => {
                warn!("Detach without an attached output, terminating");
            }
        }
        shutdown.stop();
    }
}
