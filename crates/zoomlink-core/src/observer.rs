//! Host observer bridge
//!
//! Host adapters call into a [`HostObserver`] from their change callbacks.
//! The observer filters out tracks that do not exist, converts the change
//! into a [`HostStateEvent`] and submits it to the session.

use crate::event::{HostStateEvent, InputEvent};
use crate::model::{Layout, TOTAL_TRACKS};
use std::sync::Weak;

/// Anything that accepts input events (implemented by the session)
pub trait EventSink: Send + Sync {
    fn submit(&self, event: InputEvent);
}

/// Which per-track flag changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackFlag {
    Mute,
    Solo,
    Arm,
}

/// Cloneable handle given to host adapters
///
/// Holds the session weakly so a host owning an observer does not keep the
/// session alive.
#[derive(Clone)]
pub struct HostObserver {
    sink: Weak<dyn EventSink>,
}

impl HostObserver {
    pub fn new(sink: Weak<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Host reported a mute flag for an absolute track
    pub fn track_muted(&self, track: usize, exists: bool, on: bool) {
        self.track_changed(TrackFlag::Mute, track, exists, on);
    }

    /// Host reported a solo flag for an absolute track
    pub fn track_soloed(&self, track: usize, exists: bool, on: bool) {
        self.track_changed(TrackFlag::Solo, track, exists, on);
    }

    /// Host reported a record-arm flag for an absolute track
    pub fn track_armed(&self, track: usize, exists: bool, on: bool) {
        self.track_changed(TrackFlag::Arm, track, exists, on);
    }

    /// Host track bank scrolled to `start`
    pub fn track_bank_scrolled(&self, start: usize) {
        self.forward(HostStateEvent::TrackBankChanged { start });
    }

    /// Host device parameter page scrolled to `start`
    pub fn device_bank_scrolled(&self, start: usize) {
        self.forward(HostStateEvent::DeviceBankChanged { start });
    }

    /// Host switched view
    pub fn layout_changed(&self, layout: Layout) {
        self.forward(HostStateEvent::LayoutChanged(layout));
    }

    fn track_changed(&self, flag: TrackFlag, track: usize, exists: bool, on: bool) {
        if let Some(event) = track_event(flag, track, exists, on) {
            self.forward(event);
        } else {
            log::trace!(
                "observer: ignoring {:?} change for track {} (exists: {})",
                flag,
                track,
                exists
            );
        }
    }

    fn forward(&self, event: HostStateEvent) {
        match self.sink.upgrade() {
            Some(sink) => sink.submit(event.into()),
            None => log::debug!("observer: session gone, dropping {:?}", event),
        }
    }
}

impl std::fmt::Debug for HostObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostObserver")
            .field("attached", &(self.sink.strong_count() > 0))
            .finish()
    }
}

/// Only existing tracks inside the addressable universe produce events
fn track_event(flag: TrackFlag, track: usize, exists: bool, on: bool) -> Option<HostStateEvent> {
    if !exists || track >= TOTAL_TRACKS {
        return None;
    }
    Some(match flag {
        TrackFlag::Mute => HostStateEvent::Muted { track, on },
        TrackFlag::Solo => HostStateEvent::Soloed { track, on },
        TrackFlag::Arm => HostStateEvent::Armed { track, on },
    })
}
