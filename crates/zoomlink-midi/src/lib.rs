//! Zoom R16/R24 MIDI input for zoomlink
//!
//! This crate provides:
//! - The byte → [`ControllerInputEvent`] decoder for the recorder's DAW-control mode
//! - MIDI port discovery and input handling via midir
//! - MIDI message parsing via midly
//! - Controller profile (YAML) and port name matching
//! - Normalization of controller values to host ranges
//!
//! # Architecture
//!
//! ```text
//! Zoom R24 → midir callback → decode → flume channel → session loop → Session::submit
//! ```
//!
//! The midir callback runs on the driver thread and must not block, so it
//! only decodes and `try_send`s. The session is fed from the receiving end.

mod config;
mod connection;
mod decode;
mod input;
mod normalize;

pub use config::{normalize_port_name, port_matches, ControllerProfile};
pub use connection::{find_input_port, list_input_ports, MidiConnectionError};
pub use decode::decode;
pub use input::MidiInputHandler;
pub use normalize::{normalize_value, ControlRange, RESOLUTION};

use flume::Receiver;
use zoomlink_core::ControllerInputEvent;

/// Error type for controller operations
#[derive(Debug, thiserror::Error)]
pub enum MidiError {
    #[error("MIDI connection error: {0}")]
    ConnectionError(#[from] MidiConnectionError),

    #[error("No MIDI device found matching '{0}'")]
    NoDeviceFound(String),
}

/// Connected Zoom controller
///
/// Dropping it closes the MIDI port, which disconnects the event channel.
pub struct ZoomController {
    /// Receiver for decoded controller events
    event_rx: Receiver<ControllerInputEvent>,
    /// Input handler (owns midir connection)
    input_handler: MidiInputHandler,
}

impl ZoomController {
    /// Connect to the port matching `profile`
    ///
    /// An absent device is reported as [`MidiError::NoDeviceFound`] so callers
    /// can fall back to listing the available ports.
    pub fn connect(profile: &ControllerProfile) -> Result<Self, MidiError> {
        let (event_tx, event_rx) = flume::bounded(profile.channel_capacity.max(1));

        let input_handler = match MidiInputHandler::connect(profile, event_tx) {
            Ok(handler) => handler,
            Err(MidiConnectionError::NoInputPorts | MidiConnectionError::PortNotFound(_)) => {
                log::info!("MIDI: No device found matching '{}'", profile.port_match);
                return Err(MidiError::NoDeviceFound(profile.port_match.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        log::info!(
            "MIDI: Connected to {} on '{}'",
            profile.name,
            input_handler.port_name()
        );

        Ok(Self {
            event_rx,
            input_handler,
        })
    }

    /// Name of the connected port
    pub fn port_name(&self) -> &str {
        self.input_handler.port_name()
    }

    /// Get the event receiver for blocking or async consumption
    pub fn event_receiver(&self) -> Receiver<ControllerInputEvent> {
        self.event_rx.clone()
    }
}
