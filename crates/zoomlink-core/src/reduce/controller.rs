use crate::command::Command;
use crate::event::{ButtonAction, ControllerId, ControllerInputEvent, Slot};
use crate::model::{AppState, Mode};

use super::Reduction;

pub(super) fn reduce(state: &AppState, event: &ControllerInputEvent) -> Reduction {
    // Edge-sensitive controls first: latches follow both edges, the jog
    // wheel encodes its direction in the edge.
    match event.control {
        ControllerId::F1 => {
            let next = AppState {
                shift: event.action == ButtonAction::On,
                ..state.clone()
            };
            return (next, None);
        }
        ControllerId::F2 => {
            let next = AppState {
                ctrl: event.action == ButtonAction::On,
                ..state.clone()
            };
            return (next, None);
        }
        ControllerId::JogWheel => return (state.clone(), Some(jog(state, event.action))),
        _ => {}
    }

    // Everything else is momentary or continuous: only ON matters
    if event.action == ButtonAction::Off {
        return (state.clone(), None);
    }

    match event.control {
        ControllerId::F5 => {
            let mode = state.mode.toggled();
            let next = AppState {
                mode,
                ..state.clone()
            };
            (next, Some(Command::ToggleMode(mode)))
        }
        // Layout only moves when the host echoes LayoutChanged
        ControllerId::F3 => (state.clone(), Some(Command::SetLayout(state.layout.next()))),
        // Unassigned on this surface
        ControllerId::F4 => (state.clone(), None),

        ControllerId::Play => (state.clone(), Some(Command::Play)),
        ControllerId::Stop => (state.clone(), Some(Command::Stop)),
        ControllerId::Rec => (state.clone(), Some(Command::Record)),
        ControllerId::Ff => (state.clone(), Some(Command::FastForward)),
        ControllerId::Rew => (state.clone(), Some(Command::Rewind)),

        ControllerId::Fader(slot) => (state.clone(), Some(fader(state, slot, event.value))),
        ControllerId::MasterFader => {
            let command = if state.shift {
                Command::MasterPan(event.value)
            } else {
                Command::MasterVolume(event.value)
            };
            (state.clone(), Some(command))
        }

        ControllerId::Up
        | ControllerId::Down
        | ControllerId::Left
        | ControllerId::Right => (state.clone(), arrow(event.control, state.shift)),

        ControllerId::BankUp => {
            let command = match state.mode {
                Mode::Tracks => Command::TrackBankUp,
                Mode::Devices => Command::DeviceBankUp,
            };
            (state.clone(), Some(command))
        }
        ControllerId::BankDown => {
            let command = match state.mode {
                Mode::Tracks => Command::TrackBankDown,
                Mode::Devices => Command::DeviceBankDown,
            };
            (state.clone(), Some(command))
        }

        ControllerId::Pmr(slot) => (state.clone(), pmr(state, slot)),

        // Handled above
        ControllerId::F1 | ControllerId::F2 | ControllerId::JogWheel => (state.clone(), None),
    }
}

fn jog(state: &AppState, action: ButtonAction) -> Command {
    match (action, state.shift) {
        (ButtonAction::On, false) => Command::JogClockwise,
        (ButtonAction::Off, false) => Command::JogAntiClockwise,
        (ButtonAction::On, true) => Command::ZoomIn,
        (ButtonAction::Off, true) => Command::ZoomOut,
    }
}

fn fader(state: &AppState, slot: Slot, value: u8) -> Command {
    match (state.mode, state.shift) {
        (Mode::Tracks, false) => Command::Volume {
            track: slot,
            level: value,
        },
        (Mode::Tracks, true) => Command::Pan {
            track: slot,
            level: value,
        },
        // Device parameters have no pan
        (Mode::Devices, _) => Command::Parameter { param: slot, value },
    }
}

/// Shift swaps each arrow for its opposite (works around a faulty key on the unit)
fn arrow(control: ControllerId, shift: bool) -> Option<Command> {
    let command = match (control, shift) {
        (ControllerId::Up, false) | (ControllerId::Down, true) => Command::ArrowUp,
        (ControllerId::Down, false) | (ControllerId::Up, true) => Command::ArrowDown,
        (ControllerId::Left, false) | (ControllerId::Right, true) => Command::ArrowLeft,
        (ControllerId::Right, false) | (ControllerId::Left, true) => Command::ArrowRight,
        _ => return None,
    };
    Some(command)
}

/// Propose the inverse of the mirrored flag; the mirror itself is left alone
fn pmr(state: &AppState, slot: Slot) -> Option<Command> {
    let track = state.absolute_track(slot);
    match (state.shift, state.ctrl) {
        (false, false) => Some(Command::Mute {
            track: slot,
            on: !state.mute_state.get(track),
        }),
        (true, false) => Some(Command::Solo {
            track: slot,
            on: !state.solo_state.get(track),
        }),
        (false, true) => Some(Command::Rec {
            track: slot,
            on: !state.rec_state.get(track),
        }),
        (true, true) => None,
    }
}
