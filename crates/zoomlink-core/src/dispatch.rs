//! Command → host call table
//!
//! One command, one host call. The only check performed here is whether an
//! addressed track exists; missing tracks are reported, not acted on.

use crate::command::Command;
use crate::event::Slot;
use crate::host::{Arrow, Host, JogDirection, ScrollDirection, Zoom};

/// Error returned when a command cannot be applied on the host
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Track {} does not exist", .track.number())]
    TrackMissing { track: Slot },
}

/// Apply a command to the host
pub fn dispatch<H: Host + ?Sized>(host: &mut H, command: &Command) -> Result<(), DispatchError> {
    if let Some(track) = command.track() {
        if !host.track_exists(track) {
            return Err(DispatchError::TrackMissing { track });
        }
    }

    match *command {
        Command::Play => host.play(),
        Command::Stop => host.stop(),
        Command::Record => host.record(),
        Command::FastForward => host.fast_forward(),
        Command::Rewind => host.rewind(),

        Command::Volume { track, level } => host.set_track_volume(track, level),
        Command::Pan { track, level } => host.set_track_pan(track, level),
        Command::MasterVolume(level) => host.set_master_volume(level),
        Command::MasterPan(level) => host.set_master_pan(level),
        Command::Parameter { param, value } => host.set_device_parameter(param, value),

        Command::Mute { track, on } => host.set_track_mute(track, on),
        Command::Solo { track, on } => host.set_track_solo(track, on),
        Command::Rec { track, on } => host.set_track_arm(track, on),

        Command::TrackBankUp => host.scroll_tracks(ScrollDirection::Forwards),
        Command::TrackBankDown => host.scroll_tracks(ScrollDirection::Backwards),
        Command::DeviceBankUp => host.scroll_device_parameters(ScrollDirection::Forwards),
        Command::DeviceBankDown => host.scroll_device_parameters(ScrollDirection::Backwards),

        Command::JogClockwise => host.jog(JogDirection::Clockwise),
        Command::JogAntiClockwise => host.jog(JogDirection::AntiClockwise),
        Command::ZoomIn => host.zoom(Zoom::In),
        Command::ZoomOut => host.zoom(Zoom::Out),

        Command::ArrowUp => host.arrow(Arrow::Up),
        Command::ArrowDown => host.arrow(Arrow::Down),
        Command::ArrowLeft => host.arrow(Arrow::Left),
        Command::ArrowRight => host.arrow(Arrow::Right),

        Command::ToggleMode(mode) => host.indicate_mode(mode),
        Command::SetLayout(layout) => host.set_layout(layout),
    }
    Ok(())
}
