//! Recording host for unit tests
//!
//! Clones share the call log and scroll position, so a test can keep one
//! clone while the session owns the other.

use crate::event::Slot;
use crate::host::{Arrow, Host, JogDirection, ScrollDirection, Zoom};
use crate::model::{Layout, Mode, BANK_SIZE, TOTAL_TRACKS};
use crate::observer::HostObserver;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostCall {
    Play,
    Stop,
    Record,
    FastForward,
    Rewind,
    Volume(Slot, u8),
    Pan(Slot, u8),
    MasterVolume(u8),
    MasterPan(u8),
    Parameter(Slot, u8),
    Mute(Slot, bool),
    Solo(Slot, bool),
    Arm(Slot, bool),
    ScrollTracks(ScrollDirection),
    ScrollParams(ScrollDirection),
    Jog(JogDirection),
    Zoom(Zoom),
    Arrow(Arrow),
    Mode(Mode),
    Layout(Layout),
    Notify(String),
}

type Hook = Arc<dyn Fn(&HostCall) + Send + Sync>;

#[derive(Clone)]
pub(crate) struct RecordingHost {
    tracks: usize,
    calls: Arc<Mutex<Vec<HostCall>>>,
    track_scroll: Arc<Mutex<usize>>,
    param_scroll: Arc<Mutex<usize>>,
    observer: Option<HostObserver>,
    hook: Option<Hook>,
}

impl RecordingHost {
    pub(crate) fn with_tracks(tracks: usize) -> Self {
        Self {
            tracks,
            calls: Arc::default(),
            track_scroll: Arc::default(),
            param_scroll: Arc::default(),
            observer: None,
            hook: None,
        }
    }

    /// Report toggle, bank and layout changes back synchronously, like a DAW would
    pub(crate) fn echoing(mut self, observer: HostObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run `hook` after every recorded call, on the calling thread
    pub(crate) fn with_hook(mut self, hook: impl Fn(&HostCall) + Send + Sync + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub(crate) fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn scroll_position(&self) -> usize {
        *self.track_scroll.lock().unwrap()
    }

    fn log_call(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call.clone());
        if let Some(hook) = &self.hook {
            hook(&call);
        }
    }

    fn absolute(&self, track: Slot) -> usize {
        self.scroll_position() + track.index()
    }

    fn echo(&self, f: impl FnOnce(&HostObserver)) {
        if let Some(observer) = &self.observer {
            f(observer);
        }
    }
}

fn scrolled(position: usize, direction: ScrollDirection, limit: usize) -> usize {
    match direction {
        ScrollDirection::Forwards if position + BANK_SIZE < limit => position + BANK_SIZE,
        ScrollDirection::Forwards => position,
        ScrollDirection::Backwards => position.saturating_sub(BANK_SIZE),
    }
}

impl Host for RecordingHost {
    fn play(&mut self) {
        self.log_call(HostCall::Play);
    }

    fn stop(&mut self) {
        self.log_call(HostCall::Stop);
    }

    fn record(&mut self) {
        self.log_call(HostCall::Record);
    }

    fn fast_forward(&mut self) {
        self.log_call(HostCall::FastForward);
    }

    fn rewind(&mut self) {
        self.log_call(HostCall::Rewind);
    }

    fn track_exists(&self, track: Slot) -> bool {
        self.absolute(track) < self.tracks
    }

    fn set_track_volume(&mut self, track: Slot, level: u8) {
        self.log_call(HostCall::Volume(track, level));
    }

    fn set_track_pan(&mut self, track: Slot, level: u8) {
        self.log_call(HostCall::Pan(track, level));
    }

    fn set_master_volume(&mut self, level: u8) {
        self.log_call(HostCall::MasterVolume(level));
    }

    fn set_master_pan(&mut self, level: u8) {
        self.log_call(HostCall::MasterPan(level));
    }

    fn set_device_parameter(&mut self, param: Slot, value: u8) {
        self.log_call(HostCall::Parameter(param, value));
    }

    fn set_track_mute(&mut self, track: Slot, on: bool) {
        self.log_call(HostCall::Mute(track, on));
        let (abs, exists) = (self.absolute(track), self.track_exists(track));
        self.echo(|o| o.track_muted(abs, exists, on));
    }

    fn set_track_solo(&mut self, track: Slot, on: bool) {
        self.log_call(HostCall::Solo(track, on));
        let (abs, exists) = (self.absolute(track), self.track_exists(track));
        self.echo(|o| o.track_soloed(abs, exists, on));
    }

    fn set_track_arm(&mut self, track: Slot, on: bool) {
        self.log_call(HostCall::Arm(track, on));
        let (abs, exists) = (self.absolute(track), self.track_exists(track));
        self.echo(|o| o.track_armed(abs, exists, on));
    }

    fn scroll_tracks(&mut self, direction: ScrollDirection) {
        self.log_call(HostCall::ScrollTracks(direction));
        let start = {
            let mut position = self.track_scroll.lock().unwrap();
            let next = scrolled(*position, direction, self.tracks);
            if next == *position {
                return;
            }
            *position = next;
            next
        };
        self.echo(|o| o.track_bank_scrolled(start));
    }

    fn scroll_device_parameters(&mut self, direction: ScrollDirection) {
        self.log_call(HostCall::ScrollParams(direction));
        let start = {
            let mut position = self.param_scroll.lock().unwrap();
            *position = scrolled(*position, direction, TOTAL_TRACKS);
            *position
        };
        self.echo(|o| o.device_bank_scrolled(start));
    }

    fn jog(&mut self, direction: JogDirection) {
        self.log_call(HostCall::Jog(direction));
    }

    fn zoom(&mut self, zoom: Zoom) {
        self.log_call(HostCall::Zoom(zoom));
    }

    fn arrow(&mut self, key: Arrow) {
        self.log_call(HostCall::Arrow(key));
    }

    fn indicate_mode(&mut self, mode: Mode) {
        self.log_call(HostCall::Mode(mode));
    }

    fn set_layout(&mut self, layout: Layout) {
        self.log_call(HostCall::Layout(layout));
        self.echo(|o| o.layout_changed(layout));
    }

    fn notify(&mut self, message: &str) {
        self.log_call(HostCall::Notify(message.to_string()));
    }
}
