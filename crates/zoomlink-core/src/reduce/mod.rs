//! Pure state reducer
//!
//! `reduce(state, event)` is the single source of truth for how an event
//! changes the application state and which command (if any) it produces.
//!
//! Reducers are pure. They do NOT:
//! - Call into the host
//! - Log
//! - Mutate the state they were given
//!
//! Controller presses only *propose* toggle, bank and layout changes through
//! the emitted command. The corresponding state fields move only when the
//! host confirms through a [`HostStateEvent`](crate::HostStateEvent).

mod controller;
mod host_state;

use crate::command::Command;
use crate::event::InputEvent;
use crate::model::AppState;

/// New state plus at most one command
pub type Reduction = (AppState, Option<Command>);

/// Apply one event to the state
///
/// Total over every state/event combination; never fails.
pub fn reduce(state: &AppState, event: &InputEvent) -> Reduction {
    match event {
        InputEvent::Controller(e) => controller::reduce(state, e),
        InputEvent::Host(e) => (host_state::reduce(state, e), None),
    }
}
