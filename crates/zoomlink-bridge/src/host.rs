//! Simulated DAW host
//!
//! Stands in for a real DAW: keeps a small mixer/transport model, logs every
//! call and reports toggle, bank and layout changes back through the
//! [`HostObserver`] synchronously, the way a DAW's change callbacks do.

use serde::{Deserialize, Serialize};
use zoomlink_core::{
    Arrow, Host, HostObserver, JogDirection, Layout, Mode, ScrollDirection, Slot, Zoom, BANK_SIZE,
    TOTAL_TRACKS,
};
use zoomlink_midi::{normalize_value, ControlRange};

/// Simulated host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedHostConfig {
    /// Tracks in the simulated project
    pub track_count: usize,
    /// Beats per bar, used for fast forward / rewind
    pub beats_per_bar: u32,
}

impl Default for SimulatedHostConfig {
    fn default() -> Self {
        Self {
            track_count: 16,
            beats_per_bar: 4,
        }
    }
}

/// Per-track mixer state
#[derive(Debug, Clone, PartialEq)]
pub struct TrackState {
    pub volume: f32,
    pub pan: f32,
    pub mute: bool,
    pub solo: bool,
    pub arm: bool,
}

impl Default for TrackState {
    fn default() -> Self {
        Self {
            volume: 0.8,
            pan: 0.0,
            mute: false,
            solo: false,
            arm: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stopped,
    Playing,
    Recording,
}

pub struct SimulatedHost {
    config: SimulatedHostConfig,
    observer: HostObserver,
    tracks: Vec<TrackState>,
    master_volume: f32,
    master_pan: f32,
    parameters: [f32; TOTAL_TRACKS],
    transport: Transport,
    /// Playhead in beats
    position: i64,
    zoom_level: i32,
    selected_track: usize,
    track_scroll: usize,
    parameter_scroll: usize,
    layout: Layout,
    notifications: Vec<String>,
}

impl SimulatedHost {
    pub fn new(config: SimulatedHostConfig, observer: HostObserver) -> Self {
        let track_count = config.track_count.min(TOTAL_TRACKS);
        if track_count < config.track_count {
            log::warn!(
                "[HOST] {} tracks requested, only {} are addressable",
                config.track_count,
                TOTAL_TRACKS
            );
        }
        log::info!("[HOST] Simulated project with {} tracks", track_count);
        Self {
            config,
            observer,
            tracks: vec![TrackState::default(); track_count],
            master_volume: 0.8,
            master_pan: 0.0,
            parameters: [0.0; TOTAL_TRACKS],
            transport: Transport::Stopped,
            position: 0,
            zoom_level: 0,
            selected_track: 0,
            track_scroll: 0,
            parameter_scroll: 0,
            layout: Layout::Arrange,
            notifications: Vec::new(),
        }
    }

    fn absolute(&self, track: Slot) -> usize {
        self.track_scroll + track.index()
    }

    fn track_mut(&mut self, track: Slot) -> Option<(usize, &mut TrackState)> {
        let index = self.absolute(track);
        self.tracks.get_mut(index).map(|t| (index, t))
    }

    fn bar(&self) -> i64 {
        i64::from(self.config.beats_per_bar.max(1))
    }

    fn move_playhead(&mut self, beats: i64) {
        self.position = (self.position + beats).max(0);
        log::info!("[HOST] Playhead at beat {}", self.position);
    }
}

#[cfg(test)]
impl SimulatedHost {
    pub fn track(&self, index: usize) -> Option<&TrackState> {
        self.tracks.get(index)
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn master(&self) -> (f32, f32) {
        (self.master_volume, self.master_pan)
    }

    pub fn parameter(&self, index: usize) -> Option<f32> {
        self.parameters.get(index).copied()
    }

    pub fn track_scroll(&self) -> usize {
        self.track_scroll
    }

    pub fn selected_track(&self) -> usize {
        self.selected_track
    }

    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }
}

impl Host for SimulatedHost {
    fn play(&mut self) {
        self.transport = Transport::Playing;
        log::info!("[HOST] Transport {:?}", self.transport);
    }

    fn stop(&mut self) {
        self.transport = Transport::Stopped;
        log::info!("[HOST] Transport {:?}", self.transport);
    }

    fn record(&mut self) {
        self.transport = Transport::Recording;
        log::info!("[HOST] Transport {:?}", self.transport);
    }

    fn fast_forward(&mut self) {
        let bar = self.bar();
        self.move_playhead(bar);
    }

    fn rewind(&mut self) {
        let bar = self.bar();
        self.move_playhead(-bar);
    }

    fn track_exists(&self, track: Slot) -> bool {
        self.absolute(track) < self.tracks.len()
    }

    fn set_track_volume(&mut self, track: Slot, level: u8) {
        if let Some((index, t)) = self.track_mut(track) {
            t.volume = normalize_value(level, ControlRange::Unit);
            log::info!("[HOST] Track {} volume {:.3}", index + 1, t.volume);
        }
    }

    fn set_track_pan(&mut self, track: Slot, level: u8) {
        if let Some((index, t)) = self.track_mut(track) {
            t.pan = normalize_value(level, ControlRange::Bipolar);
            log::info!("[HOST] Track {} pan {:+.3}", index + 1, t.pan);
        }
    }

    fn set_master_volume(&mut self, level: u8) {
        self.master_volume = normalize_value(level, ControlRange::Unit);
        log::info!("[HOST] Master volume {:.3}", self.master_volume);
    }

    fn set_master_pan(&mut self, level: u8) {
        self.master_pan = normalize_value(level, ControlRange::Bipolar);
        log::info!("[HOST] Master pan {:+.3}", self.master_pan);
    }

    fn set_device_parameter(&mut self, param: Slot, value: u8) {
        let index = self.parameter_scroll + param.index();
        if let Some(p) = self.parameters.get_mut(index) {
            *p = normalize_value(value, ControlRange::Unit);
            log::info!("[HOST] Device parameter {} = {:.3}", index + 1, *p);
        }
    }

    fn set_track_mute(&mut self, track: Slot, on: bool) {
        if let Some((index, t)) = self.track_mut(track) {
            t.mute = on;
            log::info!("[HOST] Track {} mute {}", index + 1, t.mute);
            self.observer.track_muted(index, true, on);
        }
    }

    fn set_track_solo(&mut self, track: Slot, on: bool) {
        if let Some((index, t)) = self.track_mut(track) {
            t.solo = on;
            log::info!("[HOST] Track {} solo {}", index + 1, t.solo);
            self.observer.track_soloed(index, true, on);
        }
    }

    fn set_track_arm(&mut self, track: Slot, on: bool) {
        if let Some((index, t)) = self.track_mut(track) {
            t.arm = on;
            log::info!("[HOST] Track {} arm {}", index + 1, t.arm);
            self.observer.track_armed(index, true, on);
        }
    }

    fn scroll_tracks(&mut self, direction: ScrollDirection) {
        let next = match direction {
            ScrollDirection::Forwards if self.track_scroll + BANK_SIZE < self.tracks.len() => {
                self.track_scroll + BANK_SIZE
            }
            ScrollDirection::Forwards => self.track_scroll,
            ScrollDirection::Backwards => self.track_scroll.saturating_sub(BANK_SIZE),
        };
        if next == self.track_scroll {
            log::debug!("[HOST] Track bank already at {}", self.track_scroll);
            return;
        }
        self.track_scroll = next;
        log::info!("[HOST] Track bank starts at track {}", next + 1);
        self.observer.track_bank_scrolled(next);
    }

    fn scroll_device_parameters(&mut self, direction: ScrollDirection) {
        let next = match direction {
            ScrollDirection::Forwards if self.parameter_scroll + BANK_SIZE < TOTAL_TRACKS => {
                self.parameter_scroll + BANK_SIZE
            }
            ScrollDirection::Forwards => self.parameter_scroll,
            ScrollDirection::Backwards => self.parameter_scroll.saturating_sub(BANK_SIZE),
        };
        if next == self.parameter_scroll {
            return;
        }
        self.parameter_scroll = next;
        log::info!("[HOST] Parameter page starts at {}", next + 1);
        self.observer.device_bank_scrolled(next);
    }

    fn jog(&mut self, direction: JogDirection) {
        match direction {
            JogDirection::Clockwise => self.move_playhead(1),
            JogDirection::AntiClockwise => self.move_playhead(-1),
        }
    }

    fn zoom(&mut self, zoom: Zoom) {
        self.zoom_level += match zoom {
            Zoom::In => 1,
            Zoom::Out => -1,
        };
        log::info!("[HOST] Zoom level {}", self.zoom_level);
    }

    fn arrow(&mut self, key: Arrow) {
        match key {
            Arrow::Up => self.selected_track = self.selected_track.saturating_sub(1),
            Arrow::Down => {
                if self.selected_track + 1 < self.tracks.len() {
                    self.selected_track += 1;
                }
            }
            Arrow::Left => self.move_playhead(-1),
            Arrow::Right => self.move_playhead(1),
        }
        log::info!("[HOST] {:?} (selected track {})", key, self.selected_track + 1);
    }

    fn indicate_mode(&mut self, mode: Mode) {
        let label = match mode {
            Mode::Tracks => "Faders: tracks",
            Mode::Devices => "Faders: device parameters",
        };
        self.notify(label);
    }

    fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        log::info!("[HOST] Layout {:?}", self.layout);
        self.observer.layout_changed(layout);
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
        log::warn!("[HOST] Popup #{}: {}", self.notifications.len(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex, Weak};
    use zoomlink_core::{
        ControllerId, ControllerInputEvent, EventSink, HostStateEvent, InputEvent, Session,
        SessionConfig,
    };

    #[derive(Default)]
    struct CollectingSink {
        events: Mutex<Vec<InputEvent>>,
    }

    impl EventSink for CollectingSink {
        fn submit(&self, event: InputEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn host_with_sink(track_count: usize) -> (SimulatedHost, Arc<CollectingSink>) {
        let sink = Arc::new(CollectingSink::default());
        let weak: Weak<dyn EventSink> = Arc::downgrade(&sink) as Weak<dyn EventSink>;
        let config = SimulatedHostConfig {
            track_count,
            ..SimulatedHostConfig::default()
        };
        (SimulatedHost::new(config, HostObserver::new(weak)), sink)
    }

    fn slot(i: usize) -> Slot {
        Slot::new(i).unwrap()
    }

    #[test]
    fn test_levels_are_normalized() {
        let (mut host, _sink) = host_with_sink(8);
        host.set_track_volume(slot(0), 64);
        host.set_track_pan(slot(0), 0);
        host.set_master_volume(127);

        let track = host.track(0).unwrap();
        assert_eq!(track.volume, 0.5);
        assert_eq!(track.pan, -1.0);
        assert!(host.master().0 > 0.99);
    }

    #[test]
    fn test_toggles_are_reported() {
        let (mut host, sink) = host_with_sink(8);
        host.set_track_mute(slot(3), true);
        host.set_track_arm(slot(3), true);

        assert!(host.track(3).unwrap().mute);
        let events = sink.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                HostStateEvent::Muted { track: 3, on: true }.into(),
                HostStateEvent::Armed { track: 3, on: true }.into(),
            ]
        );
    }

    #[test]
    fn test_track_scroll_stops_at_last_bank() {
        let (mut host, sink) = host_with_sink(12);
        host.scroll_tracks(ScrollDirection::Forwards);
        host.scroll_tracks(ScrollDirection::Forwards);
        assert_eq!(host.track_scroll(), 8);
        assert!(host.track_exists(slot(3)));
        assert!(!host.track_exists(slot(4)));

        host.scroll_tracks(ScrollDirection::Backwards);
        host.scroll_tracks(ScrollDirection::Backwards);
        assert_eq!(host.track_scroll(), 0);

        let events = sink.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                HostStateEvent::TrackBankChanged { start: 8 }.into(),
                HostStateEvent::TrackBankChanged { start: 0 }.into(),
            ]
        );
    }

    #[test]
    fn test_device_parameters_follow_page() {
        let (mut host, _sink) = host_with_sink(8);
        host.scroll_device_parameters(ScrollDirection::Forwards);
        host.set_device_parameter(slot(1), 64);
        assert_eq!(host.parameter(9), Some(0.5));
        assert_eq!(host.parameter(1), Some(0.0));
    }

    #[test]
    fn test_transport_and_playhead() {
        let (mut host, _sink) = host_with_sink(8);
        host.play();
        assert_eq!(host.transport(), Transport::Playing);
        host.fast_forward();
        host.jog(JogDirection::Clockwise);
        assert_eq!(host.position(), 5);
        host.rewind();
        host.rewind();
        assert_eq!(host.position(), 0);
        host.stop();
        assert_eq!(host.transport(), Transport::Stopped);
    }

    #[test]
    fn test_navigation_and_zoom() {
        let (mut host, _sink) = host_with_sink(2);
        host.arrow(Arrow::Down);
        host.arrow(Arrow::Down);
        assert_eq!(host.selected_track(), 1);
        host.arrow(Arrow::Up);
        assert_eq!(host.selected_track(), 0);
        host.zoom(Zoom::In);
        host.zoom(Zoom::In);
        host.zoom(Zoom::Out);
        assert_eq!(host.zoom_level(), 1);
    }

    #[test]
    fn test_mode_and_missing_tracks_show_popups() {
        let (mut host, _sink) = host_with_sink(8);
        host.indicate_mode(Mode::Devices);
        host.notify("Track 9 does not exist");
        assert_eq!(
            host.notifications(),
            ["Faders: device parameters", "Track 9 does not exist"]
        );
    }

    #[test]
    fn test_session_round_trip() {
        let _ = env_logger::builder().is_test(true).try_init();

        let session = Session::with_observer(SessionConfig::default(), |observer| {
            SimulatedHost::new(SimulatedHostConfig::default(), observer)
        });

        // Held shift + bank up: host echoes the new bank from inside the call
        session.submit(ControllerInputEvent::on(ControllerId::F1));
        session.submit(ControllerInputEvent::on(ControllerId::BankUp));
        session.submit(ControllerInputEvent::on(ControllerId::Pmr(slot(2))));
        session.submit(ControllerInputEvent::off(ControllerId::F1));
        session.submit(ControllerInputEvent::on(ControllerId::F3));

        let state = session.state();
        assert_eq!(state.current_track_bank, 1);
        assert!(state.solo_state.get(10));
        assert!(!state.shift);
        assert_eq!(state.layout, Layout::Mix);
    }
}
