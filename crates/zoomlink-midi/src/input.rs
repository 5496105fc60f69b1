//! MIDI input handling
//!
//! Receives raw MIDI bytes from the midir callback, decodes them and sends
//! controller events to the session loop via a flume channel.

use crate::connection::{find_input_port, MidiConnectionError};
use crate::config::ControllerProfile;
use crate::decode::decode;
use flume::Sender;
use midir::{Ignore, MidiInputConnection};
use zoomlink_core::ControllerInputEvent;

/// Callback data passed to midir
struct CallbackData {
    event_tx: Sender<ControllerInputEvent>,
    /// Events dropped because the channel was full
    dropped: u64,
}

/// MIDI input handler
///
/// Owns the midir connection; dropping it closes the port.
pub struct MidiInputHandler {
    _connection: MidiInputConnection<CallbackData>,
    port_name: String,
}

impl MidiInputHandler {
    /// Connect to the port matching `profile` with the decoding callback
    pub fn connect(
        profile: &ControllerProfile,
        event_tx: Sender<ControllerInputEvent>,
    ) -> Result<Self, MidiConnectionError> {
        let (mut midi_in, port, port_name) = find_input_port(profile)?;

        // MMC transport arrives as SysEx
        midi_in.ignore(Ignore::TimeAndActiveSense);

        let callback_data = CallbackData {
            event_tx,
            dropped: 0,
        };

        let connection = midi_in
            .connect(
                &port,
                "zoomlink-midi-input",
                Self::midi_callback,
                callback_data,
            )
            .map_err(|e| MidiConnectionError::ConnectionError(e.to_string()))?;

        log::info!("MIDI: Input handler connected to '{}'", port_name);

        Ok(Self {
            _connection: connection,
            port_name,
        })
    }

    /// Name of the connected port
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// The midir callback function
    ///
    /// Called from the MIDI driver thread whenever a message is received.
    /// Must be fast and non-blocking.
    fn midi_callback(_timestamp: u64, data: &[u8], callback_data: &mut CallbackData) {
        let event = match decode(data) {
            Some(e) => e,
            None => {
                log::trace!("[MIDI IN] {:02X?} -> (unmapped)", data);
                return;
            }
        };

        log::debug!("[MIDI IN] {:?}", event);

        if callback_data.event_tx.try_send(event).is_err() {
            callback_data.dropped += 1;
            log::warn!(
                "MIDI: Event channel full, dropping event ({} dropped)",
                callback_data.dropped
            );
        }
    }
}
