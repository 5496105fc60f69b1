use crate::event::HostStateEvent;
use crate::model::{bank_for_start, AppState};

/// Host events overwrite the mirror unconditionally and never emit a command
pub(super) fn reduce(state: &AppState, event: &HostStateEvent) -> AppState {
    match *event {
        HostStateEvent::Muted { track, on } => AppState {
            mute_state: state.mute_state.with(track, on),
            ..state.clone()
        },
        HostStateEvent::Soloed { track, on } => AppState {
            solo_state: state.solo_state.with(track, on),
            ..state.clone()
        },
        HostStateEvent::Armed { track, on } => AppState {
            rec_state: state.rec_state.with(track, on),
            ..state.clone()
        },
        HostStateEvent::TrackBankChanged { start } => AppState {
            current_track_bank: bank_for_start(start),
            ..state.clone()
        },
        HostStateEvent::DeviceBankChanged { start } => AppState {
            current_device_bank: bank_for_start(start),
            ..state.clone()
        },
        HostStateEvent::LayoutChanged(layout) => AppState {
            layout,
            ..state.clone()
        },
    }
}
