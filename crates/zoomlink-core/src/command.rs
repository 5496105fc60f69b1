//! Commands emitted by the reducer
//!
//! Each variant maps to exactly one host call in [`crate::dispatch`].
//! Track and parameter indices are always relative to the bank the host is
//! currently scrolled to.

use crate::event::Slot;
use crate::model::{Layout, Mode};

/// Outgoing host command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Transport
    Play,
    Stop,
    Record,
    FastForward,
    Rewind,

    // Mixer
    /// Set track volume (0-127)
    Volume { track: Slot, level: u8 },
    /// Set track pan (0-127, 64 = centre)
    Pan { track: Slot, level: u8 },
    MasterVolume(u8),
    MasterPan(u8),

    /// Set a parameter of the selected device (0-127)
    Parameter { param: Slot, value: u8 },

    // Track toggles (proposed value; the host confirms via observer events)
    Mute { track: Slot, on: bool },
    Solo { track: Slot, on: bool },
    Rec { track: Slot, on: bool },

    // Banking
    TrackBankUp,
    TrackBankDown,
    DeviceBankUp,
    DeviceBankDown,

    // Jog wheel
    JogClockwise,
    JogAntiClockwise,
    ZoomIn,
    ZoomOut,

    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Faders now address the given mode
    ToggleMode(Mode),
    /// Ask the host to switch view
    SetLayout(Layout),
}

impl Command {
    /// The track slot this command addresses, if any
    ///
    /// The dispatcher checks these against the host before acting.
    pub fn track(&self) -> Option<Slot> {
        match *self {
            Self::Volume { track, .. }
            | Self::Pan { track, .. }
            | Self::Mute { track, .. }
            | Self::Solo { track, .. }
            | Self::Rec { track, .. } => Some(track),
            _ => None,
        }
    }
}
