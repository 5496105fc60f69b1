//! Host API seam
//!
//! The DAW side of the bridge. Implementations translate these calls into
//! whatever the host actually exposes; the dispatcher calls exactly one of
//! them per [`Command`](crate::Command).
//!
//! Track indices are bank-relative slots: the host resolves them against
//! the bank it is currently scrolled to. Levels are raw controller values
//! (0-127); scaling to the host's range is the implementation's job.

use crate::event::Slot;
use crate::model::{Layout, Mode};

/// Bank scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Forwards,
    Backwards,
}

/// Transport nudge direction from the jog wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogDirection {
    Clockwise,
    AntiClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zoom {
    In,
    Out,
}

/// Navigation key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// Host-side operations used by the dispatcher
///
/// Calls may synchronously trigger host callbacks that reach the
/// [`HostObserver`](crate::HostObserver); the session queues those instead
/// of recursing.
pub trait Host {
    // Transport
    fn play(&mut self);
    fn stop(&mut self);
    fn record(&mut self);
    fn fast_forward(&mut self);
    fn rewind(&mut self);

    /// Whether the slot currently shows an existing track
    fn track_exists(&self, track: Slot) -> bool;

    // Mixer
    fn set_track_volume(&mut self, track: Slot, level: u8);
    fn set_track_pan(&mut self, track: Slot, level: u8);
    fn set_master_volume(&mut self, level: u8);
    fn set_master_pan(&mut self, level: u8);

    /// Parameter of the selected device, relative to the device bank
    fn set_device_parameter(&mut self, param: Slot, value: u8);

    // Track toggles
    fn set_track_mute(&mut self, track: Slot, on: bool);
    fn set_track_solo(&mut self, track: Slot, on: bool);
    fn set_track_arm(&mut self, track: Slot, on: bool);

    // Banking
    fn scroll_tracks(&mut self, direction: ScrollDirection);
    fn scroll_device_parameters(&mut self, direction: ScrollDirection);

    // Jog wheel and navigation
    fn jog(&mut self, direction: JogDirection);
    fn zoom(&mut self, zoom: Zoom);
    fn arrow(&mut self, key: Arrow);

    /// Faders switched between track and device control
    fn indicate_mode(&mut self, mode: Mode);
    /// Switch the host view
    fn set_layout(&mut self, layout: Layout);

    /// Show a user-visible notification
    fn notify(&mut self, message: &str);
}
