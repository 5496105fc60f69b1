//! Core of the zoomlink controller bridge
//!
//! This crate provides:
//! - The application state model (mode, layout, modifiers, banks, mirrored toggles)
//! - The event and command vocabulary shared by the decoder and the host adapter
//! - The pure state reducer: `reduce(state, event) -> (state', command?)`
//! - A one-to-one command dispatcher onto the [`Host`] trait
//! - The host observer bridge that feeds host state changes back in
//! - A [`Session`] that serializes events from both sources
//!
//! # Architecture
//!
//! ```text
//! Controller → decoder → Session::submit ─┐
//!                                          ├→ reduce → commit state → dispatch → Host
//! Host callbacks → HostObserver ───────────┘
//! ```
//!
//! The reducer never touches the host. The session commits the new state
//! before dispatching, so host callbacks raised synchronously by a command
//! always see consistent state.

mod command;
mod dispatch;
mod event;
mod host;
mod model;
mod observer;
mod reduce;
mod session;

#[cfg(test)]
mod test_host;

pub use command::Command;
pub use dispatch::{dispatch, DispatchError};
pub use event::{
    ButtonAction, ControllerId, ControllerInputEvent, HostStateEvent, InputEvent, Slot,
};
pub use host::{Arrow, Host, JogDirection, ScrollDirection, Zoom};
pub use model::{
    bank_for_start, AppState, Layout, Mode, TrackToggles, BANK_SIZE, NO_OF_BANKS, NO_OF_PARAMS,
    TOTAL_TRACKS,
};
pub use observer::{EventSink, HostObserver};
pub use reduce::{reduce, Reduction};
pub use session::{Session, SessionConfig};
