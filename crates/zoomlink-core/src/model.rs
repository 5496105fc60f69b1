//! Application state model
//!
//! A single [`AppState`] value describes everything the reducer needs to
//! interpret the next event. It is replaced wholesale on every event; the
//! per-track toggle vectors are a mirror of what the host last reported.

use crate::event::Slot;

/// Tracks (or device parameters) addressed by one bank of faders
pub const BANK_SIZE: usize = 8;
/// Number of banks in the addressable universe
pub const NO_OF_BANKS: usize = 8;
/// Device parameters per device bank
pub const NO_OF_PARAMS: usize = 8;
/// Total addressable tracks (64 by default)
pub const TOTAL_TRACKS: usize = BANK_SIZE * NO_OF_BANKS;

/// What the faders currently address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Track mixer (volume/pan)
    #[default]
    Tracks,
    /// Parameters of the selected device
    Devices,
}

impl Mode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Tracks => Self::Devices,
            Self::Devices => Self::Tracks,
        }
    }
}

/// Active host view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    #[default]
    Arrange,
    Edit,
    Mix,
}

impl Layout {
    /// Next layout in the F3 cycle: Arrange → Mix → Edit → Arrange
    pub fn next(self) -> Self {
        match self {
            Self::Arrange => Self::Mix,
            Self::Mix => Self::Edit,
            Self::Edit => Self::Arrange,
        }
    }
}

/// Fixed-length per-track boolean vector, indexed by absolute track number
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackToggles([bool; TOTAL_TRACKS]);

impl TrackToggles {
    /// All tracks off
    pub const fn new() -> Self {
        Self([false; TOTAL_TRACKS])
    }

    /// State of an absolute track (false for indices outside the universe)
    pub fn get(&self, track: usize) -> bool {
        self.0.get(track).copied().unwrap_or(false)
    }

    /// Copy of this vector with one slot overwritten
    ///
    /// Indices outside the universe leave the vector unchanged.
    pub fn with(&self, track: usize, on: bool) -> Self {
        let mut next = *self;
        if let Some(slot) = next.0.get_mut(track) {
            *slot = on;
        }
        next
    }

    /// Always `TOTAL_TRACKS`
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Absolute indices that are currently on
    pub fn active(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(idx, on)| on.then_some(idx))
    }
}

impl Default for TrackToggles {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TrackToggles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 64 booleans are unreadable; show the active tracks only
        f.debug_set().entries(self.active()).finish()
    }
}

/// Complete application state
///
/// Value semantics: the reducer returns a new `AppState` for every event and
/// never mutates the one it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: Mode,
    pub layout: Layout,
    /// Latched by F1
    pub shift: bool,
    /// Latched by F2
    pub ctrl: bool,
    /// Track bank page index as last reported by the host
    pub current_track_bank: usize,
    /// Device parameter page index as last reported by the host
    pub current_device_bank: usize,
    /// Host-reported mute flags
    pub mute_state: TrackToggles,
    /// Host-reported solo flags
    pub solo_state: TrackToggles,
    /// Host-reported record-arm flags
    pub rec_state: TrackToggles,
}

impl AppState {
    /// Startup state: Tracks mode, Arrange layout, no modifiers, bank 0, all toggles off
    pub const fn initial() -> Self {
        Self {
            mode: Mode::Tracks,
            layout: Layout::Arrange,
            shift: false,
            ctrl: false,
            current_track_bank: 0,
            current_device_bank: 0,
            mute_state: TrackToggles::new(),
            solo_state: TrackToggles::new(),
            rec_state: TrackToggles::new(),
        }
    }

    /// Resolve an on-screen slot to an absolute track in the current bank
    pub fn absolute_track(&self, slot: Slot) -> usize {
        self.current_track_bank * BANK_SIZE + slot.index()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Bank index for a host-reported scroll position
///
/// Positions beyond the addressable universe land on the last bank.
pub fn bank_for_start(start: usize) -> usize {
    (start / BANK_SIZE).min(NO_OF_BANKS - 1)
}
